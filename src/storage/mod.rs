//!  Storage is organized through [entry_storage::JsonEntryStorage].
//!  The basic idea is:
//!   - All entries live in a single JSON file that is replaced as a whole on every save.
//!   - The file carries a schema version, records from unknown versions are not read.
//!   - A missing or unreadable file simply means there is no prior data.

pub mod entry_storage;
pub mod error;
pub mod schema;
