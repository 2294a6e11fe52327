use crate::app::{open_store, AppContext};
use crate::cli::ResetArgs;
use crate::ui::prompt::prompt_confirm;
use crate::ui::{badge, print, Badge, OutputMode};

/// Destroy the vault. No passphrase is needed, so a forgotten one can be
/// recovered from by starting over.
pub fn handle_reset(ctx: &AppContext, args: &ResetArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);
    let mut session = open_store(ctx)?;
    let vault = session.store().dir().display().to_string();

    if !args.yes {
        let confirmed = prompt_confirm(
            &format!(
                "Permanently delete the vault at {} and every entry in it?",
                vault
            ),
            false,
        )?;
        if !confirmed {
            if !ctx.quiet() {
                match ui_ctx.mode {
                    OutputMode::Pretty => {
                        print(&ui_ctx, &badge(&ui_ctx, Badge::Info, "Cancelled"));
                    }
                    OutputMode::Plain | OutputMode::Json => {
                        println!("status=cancelled");
                    }
                }
            }
            return Ok(());
        }
    }

    session.reset_vault()?;

    if !ctx.quiet() {
        match ui_ctx.mode {
            OutputMode::Pretty => {
                print(
                    &ui_ctx,
                    &badge(&ui_ctx, Badge::Warn, &format!("Vault at {} was reset", vault)),
                );
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("reset={}", vault);
            }
        }
    }
    Ok(())
}
