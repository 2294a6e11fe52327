pub mod reset;
pub mod status;

pub use reset::handle_reset;
pub use status::handle_status;
