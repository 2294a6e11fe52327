//! Text output for entries (tables and detail blocks).

use strongbox_core::Entry;

use crate::ui::{
    blank_line, format_datetime, kv, or_dash, print, short_id, single_line, table, truncate,
    Column, UiContext,
};

const NOTES_COLUMN_WIDTH: usize = 40;

/// Print entries as a table (pretty) or tab-separated rows (plain).
///
/// Plain rows carry the full ID so scripts can feed it back.
pub fn print_entry_list(ctx: &UiContext, entries: &[Entry]) {
    let pretty = ctx.mode.is_pretty();
    let notes_width = (ctx.width / 4).clamp(12, NOTES_COLUMN_WIDTH);
    let columns = [
        Column::new("ID"),
        Column::new("Service"),
        Column::new("Username"),
        Column::new("Notes"),
        Column::new("Modified"),
    ];
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| {
            let id = if pretty {
                short_id(&entry.id)
            } else {
                entry.id.to_string()
            };
            vec![
                id,
                single_line(&entry.service),
                single_line(&entry.username),
                or_dash(&truncate(&single_line(&entry.notes), notes_width)),
                format_datetime(&entry.modified_at, pretty),
            ]
        })
        .collect();
    print(ctx, &table(ctx, &columns, &rows));
}

/// Print the details of one entry. The secret is never shown here.
pub fn print_entry(ctx: &UiContext, entry: &Entry) {
    let pretty = ctx.mode.is_pretty();
    let id = entry.id.to_string();
    let created = format_datetime(&entry.created_at, pretty);
    let modified = format_datetime(&entry.modified_at, pretty);
    let secret = match (pretty, ctx.unicode) {
        (true, true) => "\u{2022}".repeat(8),
        (true, false) => "*".repeat(8),
        (false, _) => "hidden".to_string(),
    };

    for (key, value) in [
        ("ID", id.as_str()),
        ("Service", entry.service.as_str()),
        ("Username", entry.username.as_str()),
        ("Secret", secret.as_str()),
        ("Created", created.as_str()),
        ("Modified", modified.as_str()),
    ] {
        print(ctx, &kv(ctx, key, value));
    }

    if !entry.notes.is_empty() {
        blank_line(ctx);
        if pretty {
            print(ctx, &kv(ctx, "Notes", ""));
            for line in entry.notes.lines() {
                print(ctx, &format!("  {}", line));
            }
        } else {
            print(ctx, &kv(ctx, "Notes", &single_line(&entry.notes)));
        }
    }
}
