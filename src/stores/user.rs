//! Defines the user store trait.

use crate::{Error, PasswordHash, User, UserID};

/// Handles the creation and retrieval of User objects.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Implementers should return [Error::DuplicateEmail] if `email` is already in use.
    fn create(
        &mut self,
        name: &str,
        email: &str,
        password_hash: PasswordHash,
    ) -> Result<User, Error>;

    /// Get a user by their ID, or `None` if no such user exists.
    fn get(&self, id: UserID) -> Result<Option<User>, Error>;

    /// Get a user by their email, or `None` if no such user exists.
    fn get_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    /// Check whether a user with `email` exists.
    fn exists_by_email(&self, email: &str) -> Result<bool, Error>;
}
