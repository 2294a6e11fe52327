//! Application context for the Strongbox CLI.
//!
//! Bundles the parsed CLI arguments with the lazily loaded config file and
//! the piped stdin lines used for non-interactive input.

use std::cell::RefCell;
use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use secrecy::SecretString;
use strongbox_core::VaultOptions;

use crate::cli::Cli;
use crate::config::{read_config, StrongboxConfig};
use crate::helpers::StdinLines;
use crate::ui::prompt::{prompt_new_passphrase, prompt_passphrase, prompt_secret};
use crate::ui::UiContext;

use super::resolver::{resolve_config_path, resolve_vault_path};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<StrongboxConfig>,
    stdin: OnceCell<RefCell<StdinLines>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
            stdin: OnceCell::new(),
        }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Build the UI context for a command's output flags.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }

    /// The config file, or defaults when none exists.
    pub fn config(&self) -> anyhow::Result<&StrongboxConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                read_config(&path)
            } else {
                Ok(StrongboxConfig::default())
            }
        })
    }

    pub fn vault_options(&self) -> anyhow::Result<VaultOptions> {
        self.config()?.vault_options()
    }

    pub fn vault_path(&self) -> anyhow::Result<PathBuf> {
        resolve_vault_path(self.cli, self.config()?)
    }

    /// Whether passphrases come from a prompt rather than stdin.
    pub fn interactive_passphrase(&self) -> bool {
        !self.cli.passphrase_stdin
    }

    /// Read the master passphrase of an existing vault.
    pub fn read_passphrase(&self) -> anyhow::Result<SecretString> {
        if self.cli.passphrase_stdin {
            self.next_stdin_line("passphrase")
        } else {
            prompt_passphrase()
        }
    }

    /// Read a new master passphrase (confirmed twice when prompting).
    pub fn read_new_passphrase(&self) -> anyhow::Result<SecretString> {
        if self.cli.passphrase_stdin {
            self.next_stdin_line("passphrase")
        } else {
            prompt_new_passphrase()
        }
    }

    /// Read an entry secret, from stdin or a hidden prompt.
    pub fn read_secret(&self, from_stdin: bool) -> anyhow::Result<SecretString> {
        if from_stdin {
            self.next_stdin_line("secret")
        } else {
            prompt_secret(true)
        }
    }

    fn next_stdin_line(&self, what: &str) -> anyhow::Result<SecretString> {
        let lines = self
            .stdin
            .get_or_try_init(|| StdinLines::from_stdin().map(RefCell::new))?;
        lines.borrow_mut().next_line(what)
    }
}
