//! Implements a SQLite backed entry store.
use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use rusqlite::{
    Connection, OptionalExtension, Row, named_params, params_from_iter,
    types::{Type, Value},
};
use rust_decimal::Decimal;

use crate::{
    Entry, EntryFilter, EntryId, EntryStatus, EntryType, Error, UserID,
    db::{CreateTable, MapRow},
    stores::EntryStore,
};

const ENTRY_COLUMNS: &str =
    "id, description, month, year, user_id, value, type, status, registration_date";

/// Stores entries in a SQLite database.
///
/// Entries reference the user table, so the user table must be set up in the same database, see
/// [initialize](crate::db::initialize).
#[derive(Debug, Clone)]
pub struct SQLiteEntryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteEntryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl EntryStore for SQLiteEntryStore {
    /// Insert `entry` into the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidUser] if the owner does not refer to a valid user,
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error, e.g. a required field is missing.
    fn create(&mut self, entry: &Entry) -> Result<Entry, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let entry = connection
            .prepare(&format!(
                "INSERT INTO entry (description, month, year, user_id, value, type, status, registration_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 RETURNING {ENTRY_COLUMNS}"
            ))?
            .query_row(
                (
                    &entry.description,
                    entry.month,
                    entry.year,
                    entry.owner_id.map(|id| id.as_i64()),
                    entry.value.map(|value| value.to_string()),
                    entry.entry_type,
                    entry.status,
                    entry.registration_date,
                ),
                Self::map_row,
            )?;

        Ok(entry)
    }

    /// Retrieve an entry in the database by its `id`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get(&self, id: EntryId) -> Result<Option<Entry>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&format!("SELECT {ENTRY_COLUMNS} FROM entry WHERE id = :id"))?
            .query_row(&[(":id", &id.as_i64())], Self::map_row)
            .optional()
            .map_err(|error| error.into())
    }

    /// Overwrite the entry with `id` in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingEntry] if `id` does not refer to a valid entry,
    /// - [Error::InvalidUser] if the owner does not refer to a valid user,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&mut self, id: EntryId, entry: &Entry) -> Result<Entry, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection
            .prepare(&format!(
                "UPDATE entry
                 SET description = ?1, month = ?2, year = ?3, user_id = ?4, value = ?5,
                     type = ?6, status = ?7, registration_date = ?8
                 WHERE id = ?9
                 RETURNING {ENTRY_COLUMNS}"
            ))?
            .query_row(
                (
                    &entry.description,
                    entry.month,
                    entry.year,
                    entry.owner_id.map(|id| id.as_i64()),
                    entry.value.map(|value| value.to_string()),
                    entry.entry_type,
                    entry.status,
                    entry.registration_date,
                    id.as_i64(),
                ),
                Self::map_row,
            )
            .optional()?
            .ok_or(Error::UpdateMissingEntry)
    }

    /// Delete the entry with `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingEntry] if `id` does not refer to a valid entry,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, id: EntryId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .execute("DELETE FROM entry WHERE id = ?1", (id.as_i64(),))?;

        if rows_affected == 0 {
            return Err(Error::DeleteMissingEntry);
        }

        Ok(())
    }

    /// Query for entries in the database, ordered by ID.
    ///
    /// The description is matched in Rust with [EntryFilter::matches] since SQLite's `lower`
    /// only folds ASCII characters.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn query(&self, filter: &EntryFilter) -> Result<Vec<Entry>, Error> {
        let mut query_string_parts = vec![format!("SELECT {ENTRY_COLUMNS} FROM entry")];
        let mut where_clause_parts = vec![];
        let mut query_parameters = vec![];

        let mut push_equals = |column: &str, value: Value| {
            where_clause_parts.push(format!("{column} = ?{}", query_parameters.len() + 1));
            query_parameters.push(value);
        };

        if let Some(month) = filter.month {
            push_equals("month", Value::Integer(month.into()));
        }

        if let Some(year) = filter.year {
            push_equals("year", Value::Integer(year.into()));
        }

        if let Some(owner_id) = filter.owner_id {
            push_equals("user_id", Value::Integer(owner_id.as_i64()));
        }

        if let Some(entry_type) = filter.entry_type {
            push_equals("type", Value::Text(entry_type.as_str().to_owned()));
        }

        if let Some(status) = filter.status {
            push_equals("status", Value::Text(status.as_str().to_owned()));
        }

        if !where_clause_parts.is_empty() {
            query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        }

        query_string_parts.push("ORDER BY id ASC".to_string());

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;
        let mut statement = connection.prepare(&query_string)?;

        let mut entries = Vec::new();
        for maybe_entry in statement.query_map(params, Self::map_row)? {
            let entry = maybe_entry?;

            if filter.matches(&entry) {
                entries.push(entry);
            }
        }

        Ok(entries)
    }

    /// Sum the values of the matching entries.
    ///
    /// Values are stored as text, since SQLite has no decimal type, so they are added up here
    /// rather than with `SUM`, which would go through floating point.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::ValueOverflow] if the sum does not fit in a decimal,
    /// - or [Error::SqlError] if there is an SQL error.
    fn sum_values(
        &self,
        owner_id: UserID,
        entry_type: EntryType,
        status: EntryStatus,
    ) -> Result<Option<Decimal>, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let mut statement = connection.prepare(
            "SELECT e.value FROM entry e
             INNER JOIN user u ON e.user_id = u.id
             WHERE u.id = :user_id AND e.type = :type AND e.status = :status",
        )?;

        let values = statement
            .query_map(
                named_params! {
                    ":user_id": owner_id.as_i64(),
                    ":type": entry_type,
                    ":status": status,
                },
                |row| get_decimal(row, 0),
            )?
            .collect::<Result<Vec<Decimal>, rusqlite::Error>>()?;

        values.into_iter().try_fold(None::<Decimal>, |total, value| match total {
            None => Ok(Some(value)),
            Some(total) => total
                .checked_add(value)
                .map(Some)
                .ok_or(Error::ValueOverflow),
        })
    }
}

fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw_value: String = row.get(index)?;

    Decimal::from_str(&raw_value).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

impl CreateTable for SQLiteEntryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS entry (
                    id INTEGER PRIMARY KEY,
                    description TEXT NOT NULL,
                    month INTEGER NOT NULL,
                    year INTEGER NOT NULL,
                    user_id INTEGER NOT NULL,
                    value TEXT NOT NULL,
                    type TEXT NOT NULL,
                    status TEXT NOT NULL,
                    registration_date TEXT NOT NULL,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_entry_user_type_status ON entry(user_id, type, status)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteEntryStore {
    type ReturnType = Entry;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Entry {
            id: Some(EntryId::new(row.get(offset)?)),
            description: Some(row.get(offset + 1)?),
            month: Some(row.get(offset + 2)?),
            year: Some(row.get(offset + 3)?),
            owner_id: Some(UserID::new(row.get(offset + 4)?)),
            value: Some(get_decimal(row, offset + 5)?),
            entry_type: Some(row.get(offset + 6)?),
            status: row.get(offset + 7)?,
            registration_date: row.get(offset + 8)?,
        })
    }
}
