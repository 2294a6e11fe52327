use std::path::Path;

use strongbox_core::storage::json_file::RECORDS_FILE;
use strongbox_core::{JsonFileStore, VaultStore};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::StatusArgs;
use crate::ui::{badge, blank_line, header, hint, kv, print, Badge, OutputMode};

/// Report where the vault lives and whether it is initialized.
///
/// Reads file metadata and the master credential; the vault is never
/// unlocked. Iterations are those fixed in the vault at creation, the
/// config value only applies to vaults created later.
pub fn handle_status(ctx: &AppContext, args: &StatusArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json, None);
    let config_path = resolve_config_path()?;
    let vault_path = ctx.vault_path()?;
    let vault_iterations = if vault_path.is_dir() {
        JsonFileStore::open(&vault_path)?
            .load_credential()?
            .map(|credential| credential.kdf.iterations)
    } else {
        None
    };
    let initialized = vault_iterations.is_some();
    let records_bytes = file_size(&vault_path.join(RECORDS_FILE));
    let new_vault_iterations = ctx.config()?.security.kdf_iterations;

    if ui_ctx.mode.is_json() {
        let output = serde_json::json!({
            "vault_path": vault_path,
            "initialized": initialized,
            "records_bytes": records_bytes,
            "config_path": config_path,
            "config_exists": config_path.exists(),
            "kdf_iterations": vault_iterations,
            "new_vault_kdf_iterations": new_vault_iterations,
            "version": strongbox_core::VERSION,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let vault_display = vault_path.display().to_string();
    let config_display = if config_path.exists() {
        config_path.display().to_string()
    } else {
        format!("{} (not present, using defaults)", config_path.display())
    };

    match ui_ctx.mode {
        OutputMode::Pretty => {
            print(&ui_ctx, &header(&ui_ctx, "status", None));
            blank_line(&ui_ctx);
            if initialized {
                print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "Vault initialized"));
            } else {
                print(&ui_ctx, &badge(&ui_ctx, Badge::Warn, "No vault"));
            }
            print(&ui_ctx, &format!("  {}", kv(&ui_ctx, "Vault", &vault_display)));
            print(&ui_ctx, &format!("  {}", kv(&ui_ctx, "Config", &config_display)));
            if let Some(iterations) = vault_iterations {
                print(
                    &ui_ctx,
                    &format!("  {}", kv(&ui_ctx, "KDF iterations", &iterations.to_string())),
                );
            }
            print(
                &ui_ctx,
                &format!(
                    "  {}",
                    kv(&ui_ctx, "New vault iterations", &new_vault_iterations.to_string())
                ),
            );
            if !initialized {
                blank_line(&ui_ctx);
                print(&ui_ctx, &hint(&ui_ctx, "strongbox init"));
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("{}", kv(&ui_ctx, "Vault", &vault_display));
            println!("{}", kv(&ui_ctx, "Initialized", &initialized.to_string()));
            println!("{}", kv(&ui_ctx, "Config", &config_path.display().to_string()));
            if let Some(iterations) = vault_iterations {
                println!("{}", kv(&ui_ctx, "KDF iterations", &iterations.to_string()));
            }
            println!(
                "{}",
                kv(&ui_ctx, "New vault iterations", &new_vault_iterations.to_string())
            );
        }
    }
    Ok(())
}

fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|meta| meta.len())
}
