//! SQLite implementations of the stores.

mod entry;
mod user;

pub use entry::SQLiteEntryStore;
pub use user::SQLiteUserStore;
