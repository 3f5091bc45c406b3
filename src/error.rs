//! Defines the crate level error type and its conversion from SQL errors.

use crate::validation::ValidationError;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The entry failed validation and was not saved.
    ///
    /// The wrapped error describes the first rule that was violated.
    #[error("{0}")]
    InvalidEntry(#[from] ValidationError),

    /// A user with the given email address is already registered.
    #[error("a user with this email already exists")]
    DuplicateEmail,

    /// Tried to update or delete an entry that has never been saved.
    #[error("the entry has no ID, it must be saved before it can be updated or deleted")]
    MissingEntryId,

    /// The user ID used to save an entry did not match a registered user.
    #[error("the user ID does not refer to a valid user")]
    InvalidUser,

    /// Tried to update an entry that does not exist
    #[error("tried to update an entry that is not in the database")]
    UpdateMissingEntry,

    /// Tried to delete an entry that does not exist
    #[error("tried to delete an entry that is not in the database")]
    DeleteMissingEntry,

    /// No registered user has the email address given when logging in.
    #[error("user not found for the given email")]
    UserNotFound,

    /// The password given when logging in did not match the stored password.
    #[error("invalid password")]
    InvalidPassword,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging. Callers should
    /// report a general internal error instead.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The sum of the entry values does not fit in a decimal.
    #[error("the balance is too large to be represented")]
    ValueOverflow,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

/// The broad category of an [Error], which tells the caller how to react to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input broke a business rule. The caller can fix the input and retry.
    BusinessRule,
    /// The credentials were rejected.
    ///
    /// The two causes are kept apart so they can be logged and tested, but
    /// end users should be shown a single generic message.
    Authentication,
    /// Something went wrong below the service layer, e.g. in the database.
    Infrastructure,
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidEntry(_)
            | Error::DuplicateEmail
            | Error::MissingEntryId
            | Error::InvalidUser
            | Error::UpdateMissingEntry
            | Error::DeleteMissingEntry => ErrorKind::BusinessRule,
            Error::UserNotFound | Error::InvalidPassword => ErrorKind::Authentication,
            Error::HashingError(_)
            | Error::ValueOverflow
            | Error::SqlError(_)
            | Error::DatabaseLockError => ErrorKind::Infrastructure,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.email") =>
            {
                Error::DuplicateEmail
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 787 => {
                Error::InvalidUser
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use crate::validation::ValidationError;

    use super::{Error, ErrorKind};

    #[test]
    fn invalid_entry_uses_validation_message() {
        let error = Error::from(ValidationError::InvalidMonth);

        assert_eq!(error.to_string(), "invalid month");
    }

    #[test]
    fn authentication_errors_have_distinct_messages() {
        assert_eq!(
            Error::UserNotFound.to_string(),
            "user not found for the given email"
        );
        assert_eq!(Error::InvalidPassword.to_string(), "invalid password");
    }

    #[test]
    fn classifies_errors() {
        assert_eq!(Error::DuplicateEmail.kind(), ErrorKind::BusinessRule);
        assert_eq!(Error::MissingEntryId.kind(), ErrorKind::BusinessRule);
        assert_eq!(
            Error::InvalidEntry(ValidationError::InvalidValue).kind(),
            ErrorKind::BusinessRule
        );
        assert_eq!(Error::UserNotFound.kind(), ErrorKind::Authentication);
        assert_eq!(Error::InvalidPassword.kind(), ErrorKind::Authentication);
        assert_eq!(Error::DatabaseLockError.kind(), ErrorKind::Infrastructure);
    }

    #[test]
    fn unhandled_sql_errors_are_infrastructure_errors() {
        let error = Error::from(rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(error, Error::SqlError(rusqlite::Error::QueryReturnedNoRows));
        assert_eq!(error.kind(), ErrorKind::Infrastructure);
    }
}
