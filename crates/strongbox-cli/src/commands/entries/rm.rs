use crate::app::{open_session, AppContext};
use crate::cli::RmArgs;
use crate::helpers::resolve_entry_id;
use crate::ui::prompt::prompt_confirm;
use crate::ui::{badge, print, Badge, OutputMode};

pub fn handle_rm(ctx: &AppContext, args: &RmArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);
    let mut session = open_session(ctx, &ui_ctx)?;
    let id = resolve_entry_id(&args.id, session.entries()?)?;
    let entry = session.get_entry(&id)?.clone();

    if !args.yes {
        let confirmed = prompt_confirm(
            &format!("Delete {} / {}?", entry.service, entry.username),
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

    session.delete_entry(&id)?;
    session.lock();

    if !ctx.quiet() {
        match ui_ctx.mode {
            OutputMode::Pretty => {
                print(
                    &ui_ctx,
                    &badge(
                        &ui_ctx,
                        Badge::Ok,
                        &format!("Deleted {} / {}", entry.service, entry.username),
                    ),
                );
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("deleted={}", entry.id);
            }
        }
    }
    Ok(())
}
