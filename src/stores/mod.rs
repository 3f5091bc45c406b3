//! Contains the traits for the objects that persist entries and users, and their SQLite
//! implementations.

mod entry;
mod user;

pub mod sqlite;

pub use entry::EntryStore;
pub use user::UserStore;
