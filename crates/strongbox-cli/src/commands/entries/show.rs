use crate::app::{open_session, AppContext};
use crate::cli::ShowArgs;
use crate::helpers::resolve_entry_id;
use crate::output::{entry_json, print_entry};
use crate::ui::{blank_line, header, hint, print, short_id};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json, None);
    let mut session = open_session(ctx, &ui_ctx)?;
    let id = resolve_entry_id(&args.id, session.entries()?)?;
    let entry = session.get_entry(&id)?.clone();
    session.lock();

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entry_json(&entry))?);
        return Ok(());
    }

    let short = short_id(&entry.id);
    print(&ui_ctx, &header(&ui_ctx, "show", Some(short.as_str())));
    blank_line(&ui_ctx);
    print_entry(&ui_ctx, &entry);
    if ui_ctx.mode.is_pretty() {
        blank_line(&ui_ctx);
        print(
            &ui_ctx,
            &hint(&ui_ctx, &format!("strongbox reveal {}", short)),
        );
    }
    Ok(())
}
