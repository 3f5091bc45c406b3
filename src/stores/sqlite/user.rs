//! Implements a SQLite backed user store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error, PasswordHash, User, UserID,
    db::{CreateTable, MapRow},
    stores::UserStore,
};

/// Handles the creation and retrieval of User objects.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Errors
    ///
    /// Returns a [Error::DuplicateEmail] if the email is taken, [Error::DatabaseLockError] if the
    /// database lock is poisoned or [Error::SqlError] if an SQL related error occurred.
    fn create(
        &mut self,
        name: &str,
        email: &str,
        password_hash: PasswordHash,
    ) -> Result<User, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        connection.execute(
            "INSERT INTO user (name, email, password) VALUES (?1, ?2, ?3)",
            (name, email, password_hash.as_ref()),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash,
        })
    }

    fn get(&self, id: UserID) -> Result<Option<User>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare("SELECT id, name, email, password FROM user WHERE id = :id")?
            .query_row(&[(":id", &id.as_i64())], SQLiteUserStore::map_row)
            .optional()
            .map_err(|error| error.into())
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare("SELECT id, name, email, password FROM user WHERE email = :email")?
            .query_row(&[(":email", email)], SQLiteUserStore::map_row)
            .optional()
            .map_err(|error| error.into())
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM user WHERE email = ?1)",
                (email,),
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let name = row.get(offset + 1)?;
        let email = row.get(offset + 2)?;
        let raw_password_hash: String = row.get(offset + 3)?;

        Ok(User {
            id: UserID::new(raw_id),
            name,
            email,
            password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        })
    }
}

#[cfg(test)]
mod user_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, PasswordHash, UserID, db::initialize};

    use super::{SQLiteUserStore, UserStore};

    fn get_store() -> SQLiteUserStore {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        SQLiteUserStore::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn insert_user_succeeds() {
        let mut store = get_store();
        let password_hash = PasswordHash::new_unchecked("hunter2");

        let inserted_user = store
            .create("Foo", "hello@world.com", password_hash.clone())
            .unwrap();

        assert!(inserted_user.id.as_i64() > 0);
        assert_eq!(inserted_user.name, "Foo");
        assert_eq!(inserted_user.email, "hello@world.com");
        assert_eq!(inserted_user.password_hash, password_hash);
    }

    #[test]
    fn insert_user_fails_on_duplicate_email() {
        let mut store = get_store();

        assert!(
            store
                .create("Foo", "hello@world.com", PasswordHash::new_unchecked("hunter2"))
                .is_ok()
        );

        assert_eq!(
            store.create("Bar", "hello@world.com", PasswordHash::new_unchecked("hunter3")),
            Err(Error::DuplicateEmail)
        );
    }

    #[test]
    fn get_user_returns_none_for_non_existent_id() {
        let store = get_store();

        assert_eq!(store.get(UserID::new(42)), Ok(None));
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let mut store = get_store();
        let test_user = store
            .create("Foo", "foo@bar.baz", PasswordHash::new_unchecked("hunter2"))
            .unwrap();

        let retrieved_user = store.get(test_user.id).unwrap();

        assert_eq!(retrieved_user, Some(test_user));
    }

    #[test]
    fn get_user_returns_none_for_non_existent_email() {
        let store = get_store();

        assert_eq!(store.get_by_email("notavalidemail@foo.bar"), Ok(None));
    }

    #[test]
    fn get_user_succeeds_with_existing_email() {
        let mut store = get_store();
        let test_user = store
            .create("Foo", "foo@bar.baz", PasswordHash::new_unchecked("hunter2"))
            .unwrap();

        let retrieved_user = store.get_by_email(&test_user.email).unwrap();

        assert_eq!(retrieved_user, Some(test_user));
    }

    #[test]
    fn exists_by_email_reflects_registered_users() {
        let mut store = get_store();

        assert_eq!(store.exists_by_email("foo@bar.baz"), Ok(false));

        store
            .create("Foo", "foo@bar.baz", PasswordHash::new_unchecked("hunter2"))
            .unwrap();

        assert_eq!(store.exists_by_email("foo@bar.baz"), Ok(true));
        assert_eq!(store.exists_by_email("other@bar.baz"), Ok(false));
    }
}
