pub mod add;
pub mod edit;
pub mod list;
pub mod reveal;
pub mod rm;
pub mod search;
pub mod show;

pub use add::handle_add;
pub use edit::handle_edit;
pub use list::handle_list;
pub use reveal::handle_reveal;
pub use rm::handle_rm;
pub use search::handle_search;
pub use show::handle_show;

use strongbox_core::Entry;

/// Sort for display: service case-insensitively, then username.
pub(crate) fn sort_for_display(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        a.service
            .to_lowercase()
            .cmp(&b.service.to_lowercase())
            .then_with(|| a.username.cmp(&b.username))
    });
}
