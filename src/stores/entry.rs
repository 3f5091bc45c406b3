//! Defines the entry store trait.

use rust_decimal::Decimal;

use crate::{Entry, EntryFilter, EntryId, EntryStatus, EntryType, Error, UserID};

/// Handles the creation, retrieval, modification and deletion of entries.
pub trait EntryStore {
    /// Save `entry` as a new entry and return it with the ID assigned by the store.
    ///
    /// Any ID already set on `entry` is ignored.
    fn create(&mut self, entry: &Entry) -> Result<Entry, Error>;

    /// Retrieve the entry with `id`, or `None` if there is no such entry.
    fn get(&self, id: EntryId) -> Result<Option<Entry>, Error>;

    /// Overwrite the stored entry with ID `id` with the fields of `entry`.
    ///
    /// Implementers should return [Error::UpdateMissingEntry] if there is no entry with `id`.
    fn update(&mut self, id: EntryId, entry: &Entry) -> Result<Entry, Error>;

    /// Remove the entry with `id`.
    ///
    /// Implementers should return [Error::DeleteMissingEntry] if there is no entry with `id`.
    fn delete(&mut self, id: EntryId) -> Result<(), Error>;

    /// Retrieve the entries that satisfy `filter`.
    fn query(&self, filter: &EntryFilter) -> Result<Vec<Entry>, Error>;

    /// Sum the values of the entries owned by `owner_id` with the given type and status.
    ///
    /// Returns `None` if no entries match, so that callers can tell "no entries" apart from
    /// entries that add up to zero.
    fn sum_values(
        &self,
        owner_id: UserID,
        entry_type: EntryType,
        status: EntryStatus,
    ) -> Result<Option<Decimal>, Error>;
}
