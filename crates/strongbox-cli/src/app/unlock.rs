//! Opening and creating vault sessions with passphrase retry logic.

use std::io::IsTerminal;
use std::path::Path;

use secrecy::ExposeSecret;
use strongbox_core::{JsonFileStore, Session, VaultError};

use crate::constants::INTERACTIVE_UNLOCK_ATTEMPTS;
use crate::errors::CliError;
use crate::ui::progress::run_with_spinner;
use crate::ui::UiContext;

use super::context::AppContext;
use super::resolver::missing_vault_message;

/// A session over the on-disk vault.
pub type VaultSession = Session<JsonFileStore>;

/// Open the store at the resolved vault path without unlocking it.
///
/// Fails with not-found when the directory does not exist, so read-only
/// commands never create it.
pub fn open_store(ctx: &AppContext) -> anyhow::Result<VaultSession> {
    let path = ctx.vault_path()?;
    if !path.is_dir() {
        return Err(not_initialized(&path).into());
    }
    let store = JsonFileStore::open(&path)?;
    Ok(Session::new(store, ctx.vault_options()?))
}

/// Open and unlock the vault, prompting for the passphrase.
pub fn open_session(ctx: &AppContext, ui_ctx: &UiContext) -> anyhow::Result<VaultSession> {
    let mut session = open_store(ctx)?;
    if !session.has_master()? {
        return Err(not_initialized(session.store().dir()).into());
    }
    unlock_with_retry(ctx, ui_ctx, &mut session)?;
    Ok(session)
}

/// Create a new vault at `path` and leave its session unlocked.
pub fn create_session(
    ctx: &AppContext,
    ui_ctx: &UiContext,
    path: &Path,
) -> anyhow::Result<VaultSession> {
    let store = JsonFileStore::open(path)?;
    let mut session = Session::new(store, ctx.vault_options()?);
    if session.has_master()? {
        return Err(CliError::invalid_input(format!(
            "A vault already exists at {}",
            path.display()
        ))
        .into());
    }

    let interactive = ctx.interactive_passphrase() && std::io::stdin().is_terminal();
    loop {
        let passphrase = ctx.read_new_passphrase()?;
        let result = run_with_spinner(ui_ctx, "Deriving master key", || {
            session.create_master(passphrase.expose_secret())
        });
        match result {
            Ok(()) => return Ok(session),
            Err(VaultError::WeakPassphrase(reason)) if interactive => {
                eprintln!("Passphrase does not meet requirements: {}", reason);
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn unlock_with_retry(
    ctx: &AppContext,
    ui_ctx: &UiContext,
    session: &mut VaultSession,
) -> anyhow::Result<()> {
    let interactive = ctx.interactive_passphrase() && std::io::stdin().is_terminal();
    let max_attempts: u32 = if interactive {
        INTERACTIVE_UNLOCK_ATTEMPTS
    } else {
        1
    };
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let passphrase = ctx.read_passphrase()?;
        let result = run_with_spinner(ui_ctx, "Unlocking vault", || {
            session.unlock(passphrase.expose_secret())
        });
        match result {
            Ok(()) => return Ok(()),
            Err(VaultError::AuthenticationFailed) => {
                let remaining = max_attempts.saturating_sub(attempts);
                if remaining == 0 {
                    if max_attempts == 1 {
                        return Err(CliError::auth_failed("Incorrect passphrase.").into());
                    }
                    return Err(CliError::auth_failed_with_hint(
                        "Too many failed passphrase attempts.",
                        "Hint: If you forgot your passphrase, the vault cannot be recovered.",
                    )
                    .into());
                }
                eprintln!(
                    "Incorrect passphrase. {} attempt{} remaining.",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn not_initialized(path: &Path) -> CliError {
    CliError::not_found(
        missing_vault_message(path),
        "Hint: Run `strongbox status` to see which vault path is in use.",
    )
}
