use std::path::PathBuf;

use crate::app::{create_session, resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, StrongboxConfig};
use crate::ui::{blank_line, header, hint, print, receipt, OutputMode};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);
    let vault_path = match args.path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => ctx.vault_path()?,
    };

    if !ctx.quiet() && ui_ctx.mode.is_pretty() {
        print(&ui_ctx, &header(&ui_ctx, "init", None));
        blank_line(&ui_ctx);
    }

    let mut session = create_session(ctx, &ui_ctx, &vault_path)?;
    let iterations = session.options().kdf.iterations;
    session.lock();

    // An existing config is left alone; it may point at another vault.
    let config_path = resolve_config_path()?;
    let config_written = if args.no_config || config_path.exists() {
        false
    } else {
        write_config(&config_path, &StrongboxConfig::new(&vault_path))?;
        true
    };

    if !ctx.quiet() {
        let vault_display = vault_path.display().to_string();
        let config_display = if config_written {
            config_path.display().to_string()
        } else {
            "not written".to_string()
        };
        let iterations_display = iterations.to_string();
        match ui_ctx.mode {
            OutputMode::Pretty => {
                blank_line(&ui_ctx);
                print(
                    &ui_ctx,
                    &receipt(
                        &ui_ctx,
                        "Vault created",
                        &[
                            ("Vault", vault_display.as_str()),
                            ("Config", config_display.as_str()),
                            ("KDF iterations", iterations_display.as_str()),
                        ],
                    ),
                );
                blank_line(&ui_ctx);
                print(
                    &ui_ctx,
                    &hint(
                        &ui_ctx,
                        "strongbox add <service> <username>  \u{00B7}  There is no passphrase recovery.",
                    ),
                );
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("vault={}", vault_display);
                if config_written {
                    println!("config={}", config_display);
                }
            }
        }
    }
    Ok(())
}
