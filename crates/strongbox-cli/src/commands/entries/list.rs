use crate::app::{open_session, AppContext};
use crate::cli::ListArgs;
use crate::output::{entries_json, print_entry_list};
use crate::ui::{blank_line, header_with_context, hint, parse_format, print, OutputMode};

use super::sort_for_display;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_format(args.format.as_deref())?;
    let ui_ctx = ctx.ui_context(args.json, format);

    let mut session = open_session(ctx, &ui_ctx)?;
    let mut entries = session.entries()?.to_vec();
    let vault = session.store().dir().display().to_string();
    session.lock();
    sort_for_display(&mut entries);

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entries_json(&entries))?);
        return Ok(());
    }

    if entries.is_empty() {
        if !ctx.quiet() {
            match ui_ctx.mode {
                OutputMode::Pretty => {
                    let title = header_with_context(&ui_ctx, "list", None, Some(vault.as_str()));
                    print(&ui_ctx, &title);
                    blank_line(&ui_ctx);
                    print(
                        &ui_ctx,
                        &hint(&ui_ctx, "No entries yet. strongbox add <service> <username>"),
                    );
                }
                OutputMode::Plain | OutputMode::Json => {
                    println!("count=0");
                }
            }
        }
        return Ok(());
    }

    match ui_ctx.mode {
        OutputMode::Pretty => {
            let title = header_with_context(&ui_ctx, "list", None, Some(vault.as_str()));
            print(&ui_ctx, &title);
            blank_line(&ui_ctx);
            print_entry_list(&ui_ctx, &entries);
            blank_line(&ui_ctx);
            print(
                &ui_ctx,
                &hint(
                    &ui_ctx,
                    &format!(
                        "{} entr{}  \u{00B7}  strongbox show <id>",
                        entries.len(),
                        if entries.len() == 1 { "y" } else { "ies" }
                    ),
                ),
            );
        }
        OutputMode::Plain | OutputMode::Json => print_entry_list(&ui_ctx, &entries),
    }
    Ok(())
}
