use secrecy::ExposeSecret;
use strongbox_core::NewEntry;

use crate::app::{open_session, AppContext};
use crate::cli::AddArgs;
use crate::ui::{blank_line, hint, print, receipt, short_id, OutputMode};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);
    let mut session = open_session(ctx, &ui_ctx)?;

    let secret = ctx.read_secret(args.secret_stdin)?;
    let mut new_entry = NewEntry::new(
        args.service.as_str(),
        args.username.as_str(),
        secret.expose_secret(),
    );
    if let Some(notes) = args.notes.as_deref() {
        new_entry = new_entry.with_notes(notes);
    }

    let entry = session.add_entry(new_entry)?;
    session.lock();

    if !ctx.quiet() {
        match ui_ctx.mode {
            OutputMode::Pretty => {
                let id = short_id(&entry.id);
                print(
                    &ui_ctx,
                    &receipt(
                        &ui_ctx,
                        "Added entry",
                        &[
                            ("ID", id.as_str()),
                            ("Service", entry.service.as_str()),
                            ("Username", entry.username.as_str()),
                        ],
                    ),
                );
                blank_line(&ui_ctx);
                print(
                    &ui_ctx,
                    &hint(
                        &ui_ctx,
                        &format!("strongbox reveal {}  \u{00B7}  strongbox list", id),
                    ),
                );
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("id={}", entry.id);
            }
        }
    }
    Ok(())
}
