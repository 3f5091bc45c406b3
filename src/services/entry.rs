//! Creating, changing, removing and searching financial entries.

use rust_decimal::Decimal;

use crate::{
    Entry, EntryFilter, EntryId, EntryStatus, EntryType, Error, UserID, stores::EntryStore,
    validate_entry,
};

/// Applies the entry rules on top of an [EntryStore].
///
/// Every write is validated with [validate_entry] first, nothing reaches the store if validation
/// fails.
#[derive(Debug, Clone)]
pub struct EntryService<S> {
    store: S,
}

impl<S: EntryStore> EntryService<S> {
    /// Create a service that persists entries in `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and save a new entry.
    ///
    /// The entry is always saved as [EntryStatus::Pending], whatever status it was given. The
    /// returned entry carries the ID assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidEntry] if the entry fails validation, or any error from the store.
    pub fn create(&mut self, mut entry: Entry) -> Result<Entry, Error> {
        validate_entry(&entry).inspect_err(|error| {
            tracing::debug!("Rejected new entry: {error}");
        })?;

        entry.status = EntryStatus::Pending;
        let entry = self.store.create(&entry)?;

        tracing::debug!("Created entry {:?}", entry.id);

        Ok(entry)
    }

    /// Validate and save changes to an existing entry.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::MissingEntryId] if the entry has never been saved, checked before validation,
    /// - [Error::InvalidEntry] if the entry fails validation,
    /// - or any error from the store, e.g. [Error::UpdateMissingEntry].
    pub fn update(&mut self, entry: Entry) -> Result<Entry, Error> {
        let id = entry.id.ok_or(Error::MissingEntryId)?;

        validate_entry(&entry).inspect_err(|error| {
            tracing::debug!("Rejected changes to entry {id}: {error}");
        })?;

        let entry = self.store.update(id, &entry)?;

        tracing::debug!("Updated entry {id}");

        Ok(entry)
    }

    /// Remove a saved entry.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingEntryId] if the entry has never been saved, or any error from the
    /// store, e.g. [Error::DeleteMissingEntry].
    pub fn delete(&mut self, entry: &Entry) -> Result<(), Error> {
        let id = entry.id.ok_or(Error::MissingEntryId)?;

        self.store.delete(id)?;

        tracing::debug!("Deleted entry {id}");

        Ok(())
    }

    /// Set the status of `entry` to `status` and save the whole entry with [EntryService::update].
    ///
    /// `entry` keeps the new status even if the update fails.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [EntryService::update].
    pub fn change_status(&mut self, entry: &mut Entry, status: EntryStatus) -> Result<Entry, Error> {
        tracing::info!(
            "Changing status of entry {:?} from {} to {}",
            entry.id,
            entry.status,
            status
        );

        entry.status = status;
        self.update(entry.clone())
    }

    /// Find the entries that satisfy `filter`, in the order the store returns them.
    ///
    /// # Errors
    ///
    /// Returns any error from the store.
    pub fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, Error> {
        self.store.query(filter)
    }

    /// Get the entry with `id`, or `None` if there is no such entry.
    ///
    /// # Errors
    ///
    /// Returns any error from the store.
    pub fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, Error> {
        self.store.get(id)
    }

    /// The total value of the entries owned by `user_id` with the given type and status.
    ///
    /// Returns `None` when there are no such entries.
    ///
    /// # Errors
    ///
    /// Returns any error from the store.
    pub fn get_balance(
        &self,
        user_id: UserID,
        entry_type: EntryType,
        status: EntryStatus,
    ) -> Result<Option<Decimal>, Error> {
        self.store.sum_values(user_id, entry_type, status)
    }
}
