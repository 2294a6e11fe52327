use secrecy::ExposeSecret;
use strongbox_core::EntryUpdate;

use crate::app::{open_session, AppContext};
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::resolve_entry_id;
use crate::ui::{print, receipt, short_id, OutputMode};

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut update = EntryUpdate::new();
    if let Some(service) = args.service.as_deref() {
        update = update.service(service);
    }
    if let Some(username) = args.username.as_deref() {
        update = update.username(username);
    }
    if let Some(notes) = args.notes.as_deref() {
        update = update.notes(notes);
    }
    if update.is_empty() && !args.secret {
        return Err(CliError::invalid_input(
            "Nothing to change. Pass --service, --username, --notes or --secret.",
        )
        .into());
    }

    let ui_ctx = ctx.ui_context(false, None);
    let mut session = open_session(ctx, &ui_ctx)?;
    let id = resolve_entry_id(&args.id, session.entries()?)?;
    // Fail on an unknown id before prompting for a new secret.
    session.get_entry(&id)?;

    if args.secret {
        let secret = ctx.read_secret(args.secret_stdin)?;
        update = update.secret(secret.expose_secret());
    }

    let entry = session.update_entry(&id, update)?;
    session.lock();

    if !ctx.quiet() {
        match ui_ctx.mode {
            OutputMode::Pretty => {
                let short = short_id(&entry.id);
                let secret_state = if args.secret { "replaced" } else { "unchanged" };
                print(
                    &ui_ctx,
                    &receipt(
                        &ui_ctx,
                        "Updated entry",
                        &[
                            ("ID", short.as_str()),
                            ("Service", entry.service.as_str()),
                            ("Username", entry.username.as_str()),
                            ("Secret", secret_state),
                        ],
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
