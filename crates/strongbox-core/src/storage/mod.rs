//! Storage layer for Strongbox vaults.
//!
//! - **traits**: the `VaultStore` interface the session persists through
//! - **types**: entries and the records document
//! - **json_file**: directory of two JSON documents, written atomically
//! - **memory**: in-process store

pub mod json_file;
pub mod memory;
pub mod traits;
pub mod types;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::VaultStore;
pub use types::{Entry, EntryUpdate, NewEntry, RecordsDocument};
