use crate::app::{open_session, AppContext};
use crate::cli::SearchArgs;
use crate::output::{entries_json, print_entry_list};
use crate::ui::{blank_line, header, hint, parse_format, print, OutputMode};

use super::sort_for_display;

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    let format = parse_format(args.format.as_deref())?;
    let ui_ctx = ctx.ui_context(args.json, format);

    let mut session = open_session(ctx, &ui_ctx)?;
    let mut entries = session.search(&args.query)?;
    session.lock();
    sort_for_display(&mut entries);

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entries_json(&entries))?);
        return Ok(());
    }

    let query = format!("\"{}\"", args.query.trim());
    match ui_ctx.mode {
        OutputMode::Pretty => {
            print(&ui_ctx, &header(&ui_ctx, "search", Some(query.as_str())));
            blank_line(&ui_ctx);
            if entries.is_empty() {
                print(&ui_ctx, &hint(&ui_ctx, "No matching entries."));
            } else {
                print_entry_list(&ui_ctx, &entries);
                blank_line(&ui_ctx);
                print(
                    &ui_ctx,
                    &hint(&ui_ctx, &format!("{} matches", entries.len())),
                );
            }
        }
        OutputMode::Plain | OutputMode::Json => {
            if entries.is_empty() {
                if !ctx.quiet() {
                    println!("count=0");
                }
            } else {
                print_entry_list(&ui_ctx, &entries);
            }
        }
    }
    Ok(())
}
