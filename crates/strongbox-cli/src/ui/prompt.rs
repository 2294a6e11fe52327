//! Interactive prompts for passphrases, secrets and confirmations.
//!
//! Every prompt refuses to run without a terminal on stdin and points the
//! user at the matching `--*-stdin` flag instead.

use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Confirm, Password};
use secrecy::SecretString;

use crate::errors::CliError;

fn require_terminal(what: &str, flag: &str) -> anyhow::Result<()> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Interactive {} input required. Use {} or run on a TTY.",
            what,
            flag
        ))
    }
}

/// Prompt for the master passphrase of an existing vault.
pub fn prompt_passphrase() -> anyhow::Result<SecretString> {
    require_terminal("passphrase", "--passphrase-stdin")?;

    let value = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Master passphrase")
        .interact()?;
    Ok(SecretString::from(value))
}

/// Prompt for a new master passphrase, asking twice.
pub fn prompt_new_passphrase() -> anyhow::Result<SecretString> {
    require_terminal("passphrase", "--passphrase-stdin")?;

    let value = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("New master passphrase")
        .with_confirmation("Confirm passphrase", "Passphrases do not match")
        .interact()?;
    Ok(SecretString::from(value))
}

/// Prompt for an entry secret.
pub fn prompt_secret(confirm: bool) -> anyhow::Result<SecretString> {
    require_terminal("secret", "--secret-stdin")?;

    let theme = ColorfulTheme::default();
    let builder = Password::with_theme(&theme).with_prompt("Secret");
    let value = if confirm {
        builder
            .with_confirmation("Confirm secret", "Secrets do not match")
            .interact()?
    } else {
        builder.interact()?
    };
    Ok(SecretString::from(value))
}

/// Prompt for a yes/no confirmation.
pub fn prompt_confirm(prompt: &str, default: bool) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "Confirmation required but stdin is not a terminal. Pass --yes to proceed.",
        )
        .into());
    }

    let result = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()?;
    Ok(result)
}
