//! In-memory stores that record how they were called, for testing the services.

#![allow(missing_docs)]

use rust_decimal::Decimal;

use crate::{
    Entry, EntryFilter, EntryId, EntryStatus, EntryType, Error, PasswordHash, User, UserID,
    stores::{EntryStore, UserStore},
};

#[derive(Debug, Default)]
pub(crate) struct FakeEntryStore {
    pub entries: Vec<Entry>,
    pub create_calls: usize,
    pub update_calls: usize,
    pub delete_calls: usize,
    last_id: i64,
    /// Make every write fail with [Error::DatabaseLockError].
    pub fail_writes: bool,
}

impl FakeEntryStore {
    fn check_writable(&self) -> Result<(), Error> {
        if self.fail_writes {
            Err(Error::DatabaseLockError)
        } else {
            Ok(())
        }
    }
}

impl EntryStore for FakeEntryStore {
    fn create(&mut self, entry: &Entry) -> Result<Entry, Error> {
        self.create_calls += 1;
        self.check_writable()?;

        self.last_id += 1;
        let id = EntryId::new(self.last_id);
        let entry = Entry {
            id: Some(id),
            ..entry.clone()
        };
        self.entries.push(entry.clone());

        Ok(entry)
    }

    fn get(&self, id: EntryId) -> Result<Option<Entry>, Error> {
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.id == Some(id))
            .cloned())
    }

    fn update(&mut self, id: EntryId, entry: &Entry) -> Result<Entry, Error> {
        self.update_calls += 1;
        self.check_writable()?;

        let stored = self
            .entries
            .iter_mut()
            .find(|stored| stored.id == Some(id))
            .ok_or(Error::UpdateMissingEntry)?;
        *stored = Entry {
            id: Some(id),
            ..entry.clone()
        };

        Ok(stored.clone())
    }

    fn delete(&mut self, id: EntryId) -> Result<(), Error> {
        self.delete_calls += 1;
        self.check_writable()?;

        let count_before = self.entries.len();
        self.entries.retain(|entry| entry.id != Some(id));

        if self.entries.len() == count_before {
            return Err(Error::DeleteMissingEntry);
        }

        Ok(())
    }

    fn query(&self, filter: &EntryFilter) -> Result<Vec<Entry>, Error> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect())
    }

    fn sum_values(
        &self,
        owner_id: UserID,
        entry_type: EntryType,
        status: EntryStatus,
    ) -> Result<Option<Decimal>, Error> {
        let filter = EntryFilter {
            owner_id: Some(owner_id),
            entry_type: Some(entry_type),
            status: Some(status),
            ..Default::default()
        };

        Ok(self
            .entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .filter_map(|entry| entry.value)
            .reduce(|total, value| total + value))
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeUserStore {
    pub users: Vec<User>,
    pub create_calls: usize,
}

impl FakeUserStore {
    /// Create a store that already holds a user with `email` and `raw_password`.
    pub fn with_user(email: &str, raw_password: &str) -> Self {
        let user = User {
            id: UserID::new(1),
            name: "Foo".to_owned(),
            email: email.to_owned(),
            password_hash: PasswordHash::new(raw_password, 4).unwrap(),
        };

        Self {
            users: vec![user],
            create_calls: 0,
        }
    }
}

impl UserStore for FakeUserStore {
    fn create(
        &mut self,
        name: &str,
        email: &str,
        password_hash: PasswordHash,
    ) -> Result<User, Error> {
        self.create_calls += 1;

        if self.users.iter().any(|user| user.email == email) {
            return Err(Error::DuplicateEmail);
        }

        let user = User {
            id: UserID::new(self.users.len() as i64 + 1),
            name: name.to_owned(),
            email: email.to_owned(),
            password_hash,
        };
        self.users.push(user.clone());

        Ok(user)
    }

    fn get(&self, id: UserID) -> Result<Option<User>, Error> {
        Ok(self.users.iter().find(|user| user.id == id).cloned())
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        Ok(self.users.iter().find(|user| user.email == email).cloned())
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, Error> {
        Ok(self.users.iter().any(|user| user.email == email))
    }
}
