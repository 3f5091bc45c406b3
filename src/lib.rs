//! Bookkeeper records the income and expenses of its users.
//!
//! Users register with a unique email address and log in with their password. Each financial
//! entry belongs to one user, is dated by month and year, and moves between the pending,
//! confirmed and canceled statuses. Entries are validated before they are saved, and the balance
//! of a user's entries can be summed by type and status.
//!
//! The [EntryService] and [UserService] hold the business rules and talk to storage through the
//! [stores::EntryStore] and [stores::UserStore] traits. [Bookkeeper] wires both services to a
//! SQLite database.

#![warn(missing_docs)]

mod app_state;
mod config;
mod entry;
mod error;
mod logging;
mod password;
mod user;
mod validation;

pub mod db;
pub mod services;
pub mod stores;

#[cfg(test)]
mod test_utils;

pub use app_state::Bookkeeper;
pub use config::Config;
pub use entry::{Entry, EntryFilter, EntryId, EntryStatus, EntryType, UnknownVariant};
pub use error::{Error, ErrorKind};
pub use logging::init_logging;
pub use password::PasswordHash;
pub use services::{EntryService, UserService};
pub use user::{NewUser, User, UserID};
pub use validation::{ValidationError, validate_entry};
