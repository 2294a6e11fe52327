//! Path resolution for the config file and vault directory.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_vault_path, StrongboxConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking STRONGBOX_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the vault directory.
///
/// Precedence: `--vault` / STRONGBOX_PATH, then `vault.path` from the
/// config file, then the XDG data directory.
pub fn resolve_vault_path(cli: &Cli, config: &StrongboxConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.vault.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.vault.path.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    default_vault_path()
}

/// Error message when no vault exists at the resolved path.
pub fn missing_vault_message(path: &Path) -> String {
    format!(
        "No vault found at {}\n\nRun:\n  strongbox init\n\nOr specify a vault directory:\n  STRONGBOX_PATH=/path/to/vault strongbox init",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flag_wins_over_config() {
        let cli = Cli::try_parse_from(["strongbox", "--vault", "/tmp/flag", "status"]).unwrap();
        let config = StrongboxConfig::new(Path::new("/tmp/config"));
        assert_eq!(
            resolve_vault_path(&cli, &config).unwrap(),
            PathBuf::from("/tmp/flag")
        );
    }

    #[test]
    fn test_config_path_used_without_flag() {
        let mut cli = Cli::try_parse_from(["strongbox", "status"]).unwrap();
        cli.vault = None;
        let config = StrongboxConfig::new(Path::new("/tmp/config"));
        assert_eq!(
            resolve_vault_path(&cli, &config).unwrap(),
            PathBuf::from("/tmp/config")
        );
    }

    #[test]
    fn test_missing_vault_message_mentions_init() {
        let message = missing_vault_message(Path::new("/tmp/none"));
        assert!(message.contains("/tmp/none"));
        assert!(message.contains("strongbox init"));
    }
}
