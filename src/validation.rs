//! Checks that an entry is complete and sensible before it may be saved.

use rust_decimal::Decimal;

use crate::Entry;

/// The first rule an entry broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The description is missing or only whitespace.
    #[error("invalid description")]
    InvalidDescription,
    /// The month is missing or outside 1 to 12.
    #[error("invalid month")]
    InvalidMonth,
    /// The year is missing or is not written with exactly four characters.
    #[error("invalid year")]
    InvalidYear,
    /// The entry has no owner.
    #[error("invalid user")]
    InvalidUser,
    /// The value is missing, zero or negative.
    #[error("invalid value")]
    InvalidValue,
    /// The entry type is missing.
    #[error("invalid entry type")]
    InvalidEntryType,
}

/// Check `entry` against the field rules, in order, and report the first one that fails.
///
/// The rules are checked in this order: description, month, year, owner, value, type. Later
/// rules are not checked once one fails.
///
/// # Errors
///
/// Returns the [ValidationError] for the first rule that `entry` breaks.
pub fn validate_entry(entry: &Entry) -> Result<(), ValidationError> {
    if entry
        .description
        .as_deref()
        .is_none_or(|description| description.trim().is_empty())
    {
        return Err(ValidationError::InvalidDescription);
    }

    if entry.month.is_none_or(|month| !(1..=12).contains(&month)) {
        return Err(ValidationError::InvalidMonth);
    }

    if entry.year.is_none_or(|year| year.to_string().len() != 4) {
        return Err(ValidationError::InvalidYear);
    }

    if entry.owner_id.is_none() {
        return Err(ValidationError::InvalidUser);
    }

    if entry.value.is_none_or(|value| value <= Decimal::ZERO) {
        return Err(ValidationError::InvalidValue);
    }

    if entry.entry_type.is_none() {
        return Err(ValidationError::InvalidEntryType);
    }

    Ok(())
}
