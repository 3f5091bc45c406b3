//! Wires a SQLite database into the entry and user services.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    services::{EntryService, UserService},
    stores::sqlite::{SQLiteEntryStore, SQLiteUserStore},
};

/// The services of the application, backed by a single SQLite connection.
#[derive(Debug, Clone)]
pub struct Bookkeeper {
    /// Creates, changes and searches entries.
    pub entries: EntryService<SQLiteEntryStore>,
    /// Registers and authenticates users.
    pub users: UserService<SQLiteUserStore>,
}

impl Bookkeeper {
    /// Create the services for `db_connection`.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `hash_cost` is the bcrypt cost for new password hashes.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, hash_cost: u32) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            entries: EntryService::new(SQLiteEntryStore::new(connection.clone())),
            users: UserService::new(SQLiteUserStore::new(connection), hash_cost),
        })
    }
}
