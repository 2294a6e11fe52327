use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strongbox_core::crypto::passphrase::DEFAULT_MIN_PASSPHRASE_LENGTH;
use strongbox_core::crypto::{KdfParams, PassphrasePolicy, DEFAULT_KDF_ITERATIONS};
use strongbox_core::VaultOptions;

use crate::constants::MIN_CONFIG_KDF_ITERATIONS;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StrongboxConfig {
    #[serde(default)]
    pub vault: VaultSection,
    #[serde(default)]
    pub security: SecuritySection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VaultSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    pub min_passphrase_length: usize,
    pub kdf_iterations: u32,
}

impl Default for SecuritySection {
    fn default() -> Self {
        Self {
            min_passphrase_length: DEFAULT_MIN_PASSPHRASE_LENGTH,
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

impl StrongboxConfig {
    pub fn new(vault_path: &Path) -> Self {
        Self {
            vault: VaultSection {
                path: Some(vault_path.to_string_lossy().to_string()),
            },
            security: SecuritySection::default(),
        }
    }

    /// Reject settings that would weaken new vaults below the built-in floor.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.security.kdf_iterations < MIN_CONFIG_KDF_ITERATIONS {
            return Err(anyhow::anyhow!(
                "security.kdf_iterations must be at least {} (got {})",
                MIN_CONFIG_KDF_ITERATIONS,
                self.security.kdf_iterations
            ));
        }
        if self.security.min_passphrase_length < DEFAULT_MIN_PASSPHRASE_LENGTH {
            return Err(anyhow::anyhow!(
                "security.min_passphrase_length must be at least {} (got {})",
                DEFAULT_MIN_PASSPHRASE_LENGTH,
                self.security.min_passphrase_length
            ));
        }
        Ok(())
    }

    pub fn vault_options(&self) -> anyhow::Result<VaultOptions> {
        Ok(VaultOptions {
            policy: PassphrasePolicy::new(self.security.min_passphrase_length),
            kdf: KdfParams::new(self.security.kdf_iterations)?,
        })
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_vault_path() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

pub fn read_config(path: &Path) -> anyhow::Result<StrongboxConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    let config: StrongboxConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
    Ok(config)
}

pub fn write_config(path: &Path, config: &StrongboxConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    strongbox_core::fs::write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("strongbox"));
        }
    }
    Ok(home_dir()?.join(".config").join("strongbox"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("strongbox"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("strongbox"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: StrongboxConfig = toml::from_str("").unwrap();
        assert!(config.vault.path.is_none());
        assert_eq!(config.security.kdf_iterations, DEFAULT_KDF_ITERATIONS);
        assert_eq!(
            config.security.min_passphrase_length,
            DEFAULT_MIN_PASSPHRASE_LENGTH
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_security_section() {
        let config: StrongboxConfig = toml::from_str(
            "[vault]\npath = \"/tmp/vault\"\n\n[security]\nkdf_iterations = 300000\n",
        )
        .unwrap();
        assert_eq!(config.vault.path.as_deref(), Some("/tmp/vault"));
        assert_eq!(config.security.kdf_iterations, 300_000);
        assert_eq!(config.security.min_passphrase_length, 8);

        let options = config.vault_options().unwrap();
        assert_eq!(options.kdf.iterations, 300_000);
        assert_eq!(options.policy.min_length, 8);
    }

    #[test]
    fn test_low_iterations_rejected() {
        let config: StrongboxConfig =
            toml::from_str("[security]\nkdf_iterations = 1000\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_min_length_rejected() {
        let config: StrongboxConfig =
            toml::from_str("[security]\nmin_passphrase_length = 4\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = StrongboxConfig::new(Path::new("/data/strongbox"));

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.vault.path.as_deref(), Some("/data/strongbox"));
        assert_eq!(loaded.security.kdf_iterations, DEFAULT_KDF_ITERATIONS);
    }
}
