//! Defines the financial entry, the core type of the application, and the filter used to search
//! for entries.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::UserID;

/// A newtype wrapper for integer entry IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct EntryId(i64);

impl EntryId {
    /// Create a new entry ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the entry ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A string did not name a variant of [EntryType] or [EntryStatus].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{0}\" is not a recognised value")]
pub struct UnknownVariant(String);

/// Whether an entry records money coming in or going out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl EntryType {
    /// The name used to store the type in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "INCOME",
            EntryType::Expense => "EXPENSE",
        }
    }
}

impl FromStr for EntryType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(EntryType::Income),
            "EXPENSE" => Ok(EntryType::Expense),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

/// Where an entry is in its lifecycle.
///
/// Any status may follow any other status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    /// Recorded but not yet settled. New entries always start here.
    #[default]
    Pending,
    /// The money has actually changed hands.
    Confirmed,
    /// The entry no longer applies.
    Canceled,
}

impl EntryStatus {
    /// The name used to store the status in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "PENDING",
            EntryStatus::Confirmed => "CONFIRMED",
            EntryStatus::Canceled => "CANCELED",
        }
    }
}

impl FromStr for EntryStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(EntryStatus::Pending),
            "CONFIRMED" => Ok(EntryStatus::Confirmed),
            "CANCELED" => Ok(EntryStatus::Canceled),
            other => Err(UnknownVariant(other.to_owned())),
        }
    }
}

macro_rules! impl_sql_text {
    ($name:ty) => {
        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|error| FromSqlError::Other(Box::new(error)))
            }
        }
    };
}

impl_sql_text!(EntryType);
impl_sql_text!(EntryStatus);

/// A single income or expense recorded by a user for one month of one year.
///
/// Every field that the user fills in is optional so that incomplete input can be represented
/// and rejected by [validate_entry](crate::validate_entry). An entry read back from a store
/// always has every field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The ID assigned by the store. `None` means the entry has never been saved.
    pub id: Option<EntryId>,
    /// What the entry was for.
    pub description: Option<String>,
    /// The month of the entry, 1 to 12.
    pub month: Option<i32>,
    /// The four digit year of the entry.
    pub year: Option<i32>,
    /// The user that owns the entry.
    pub owner_id: Option<UserID>,
    /// The amount of money, always positive. The direction is given by `entry_type`.
    pub value: Option<Decimal>,
    /// Whether the entry is income or an expense.
    pub entry_type: Option<EntryType>,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// When the entry was recorded.
    pub registration_date: Date,
}

impl Entry {
    /// Start a new, unsaved entry with no fields filled in, a pending status and today's date as
    /// the registration date.
    pub fn new() -> Self {
        Self {
            id: None,
            description: None,
            month: None,
            year: None,
            owner_id: None,
            value: None,
            entry_type: None,
            status: EntryStatus::Pending,
            registration_date: OffsetDateTime::now_utc().date(),
        }
    }

    /// Set the ID.
    pub fn id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Set the month.
    pub fn month(mut self, month: i32) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the year.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the owner.
    pub fn owner(mut self, owner_id: UserID) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Set the value.
    pub fn value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the type.
    pub fn entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    /// Set the status.
    pub fn status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the registration date.
    pub fn registration_date(mut self, date: Date) -> Self {
        self.registration_date = date;
        self
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

/// Selects entries by the fields that are set.
///
/// A `None` field matches everything. The description matches any entry whose description
/// contains it, ignoring case. The other fields must match exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    /// Text the description must contain.
    pub description: Option<String>,
    /// The month to match.
    pub month: Option<i32>,
    /// The year to match.
    pub year: Option<i32>,
    /// The owner to match.
    pub owner_id: Option<UserID>,
    /// The type to match.
    pub entry_type: Option<EntryType>,
    /// The status to match.
    pub status: Option<EntryStatus>,
}

impl EntryFilter {
    /// Check whether `entry` satisfies every field set on the filter.
    pub fn matches(&self, entry: &Entry) -> bool {
        fn field_matches<T: PartialEq>(wanted: &Option<T>, actual: &Option<T>) -> bool {
            match wanted {
                Some(wanted) => actual.as_ref() == Some(wanted),
                None => true,
            }
        }

        let description_matches = match &self.description {
            Some(needle) => entry.description.as_ref().is_some_and(|description| {
                description
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            }),
            None => true,
        };

        description_matches
            && field_matches(&self.month, &entry.month)
            && field_matches(&self.year, &entry.year)
            && field_matches(&self.owner_id, &entry.owner_id)
            && field_matches(&self.entry_type, &entry.entry_type)
            && self.status.is_none_or(|status| status == entry.status)
    }
}
