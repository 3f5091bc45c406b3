//! Registering users and checking their credentials.

use crate::{Error, NewUser, PasswordHash, User, UserID, stores::UserStore};

/// Applies the registration and log-in rules on top of a [UserStore].
#[derive(Debug, Clone)]
pub struct UserService<S> {
    store: S,
    hash_cost: u32,
}

impl<S: UserStore> UserService<S> {
    /// Create a service that persists users in `store`.
    ///
    /// `hash_cost` is the bcrypt cost used when hashing passwords, see
    /// [PasswordHash::DEFAULT_COST].
    pub fn new(store: S, hash_cost: u32) -> Self {
        Self { store, hash_cost }
    }

    /// Register a new user.
    ///
    /// The email is checked with [UserService::validate_email] before anything else happens.
    /// The password is hashed before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateEmail] if the email is taken, [Error::HashingError] if the
    /// password could not be hashed, or any error from the store.
    pub fn register(&mut self, new_user: NewUser) -> Result<User, Error> {
        self.validate_email(&new_user.email)?;

        let password_hash = PasswordHash::new(&new_user.password, self.hash_cost)?;
        let user = self
            .store
            .create(&new_user.name, &new_user.email, password_hash)?;

        tracing::info!("Registered user {}", user.id);

        Ok(user)
    }

    /// Check that no registered user has `email`.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateEmail] if the email is taken, or any error from the store.
    pub fn validate_email(&self, email: &str) -> Result<(), Error> {
        if self.store.exists_by_email(email)? {
            tracing::debug!("Email is already registered");
            return Err(Error::DuplicateEmail);
        }

        Ok(())
    }

    /// Get the user with `email` if `raw_password` matches their password.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::UserNotFound] if no user has `email`,
    /// - [Error::InvalidPassword] if the password does not match,
    /// - [Error::HashingError] if the stored hash could not be checked,
    /// - or any error from the store.
    pub fn authenticate(&self, email: &str, raw_password: &str) -> Result<User, Error> {
        let user = self.store.get_by_email(email)?.ok_or_else(|| {
            tracing::warn!("Log-in attempt for an unregistered email");
            Error::UserNotFound
        })?;

        if !user.password_hash.verify(raw_password)? {
            tracing::warn!("Log-in attempt with the wrong password for user {}", user.id);
            return Err(Error::InvalidPassword);
        }

        Ok(user)
    }

    /// Get the user with `id`, or `None` if there is no such user.
    ///
    /// # Errors
    ///
    /// Returns any error from the store.
    pub fn find_by_id(&self, id: UserID) -> Result<Option<User>, Error> {
        self.store.get(id)
    }
}

#[cfg(test)]
mod user_service_tests {
    use crate::{Error, NewUser, UserID, test_utils::FakeUserStore};

    use super::UserService;

    fn get_service(store: FakeUserStore) -> UserService<FakeUserStore> {
        UserService::new(store, 4)
    }

    #[test]
    fn register_saves_user_with_hashed_password() {
        let mut service = get_service(FakeUserStore::default());

        let user = service
            .register(NewUser::new("name", "email@email.com", "password"))
            .unwrap();

        assert_eq!(user.id, UserID::new(1));
        assert_eq!(user.name, "name");
        assert_eq!(user.email, "email@email.com");
        assert_ne!(user.password_hash.as_ref(), "password");
        assert!(user.password_hash.verify("password").unwrap());
    }

    #[test]
    fn register_fails_on_duplicate_email_without_saving() {
        let mut service = get_service(FakeUserStore::with_user("email@email.com", "password"));

        let result = service.register(NewUser::new("other", "email@email.com", "hunter2"));

        assert_eq!(result, Err(Error::DuplicateEmail));
        assert_eq!(service.store.create_calls, 0);
    }

    #[test]
    fn validate_email_fails_for_registered_email() {
        let service = get_service(FakeUserStore::with_user("email@email.com", "password"));

        let result = service.validate_email("email@email.com");

        assert_eq!(result, Err(Error::DuplicateEmail));
        assert_eq!(
            Error::DuplicateEmail.to_string(),
            "a user with this email already exists"
        );
    }

    #[test]
    fn validate_email_succeeds_for_new_email() {
        let service = get_service(FakeUserStore::with_user("email@email.com", "password"));

        assert_eq!(service.validate_email("other@email.com"), Ok(()));
    }

    #[test]
    fn authenticate_succeeds_with_correct_password() {
        let service = get_service(FakeUserStore::with_user("email@email.com", "password"));

        let user = service.authenticate("email@email.com", "password").unwrap();

        assert_eq!(user.email, "email@email.com");
    }

    #[test]
    fn authenticate_fails_for_unknown_email() {
        let service = get_service(FakeUserStore::default());

        let result = service.authenticate("email@email.com", "password");

        assert_eq!(result, Err(Error::UserNotFound));
    }

    #[test]
    fn authenticate_fails_for_wrong_password() {
        let service = get_service(FakeUserStore::with_user("email@email.com", "password"));

        let result = service.authenticate("email@email.com", "123");

        assert_eq!(result, Err(Error::InvalidPassword));
    }

    #[test]
    fn find_by_id_returns_none_for_missing_user() {
        let service = get_service(FakeUserStore::with_user("email@email.com", "password"));

        assert!(service.find_by_id(UserID::new(1)).unwrap().is_some());
        assert_eq!(service.find_by_id(UserID::new(2)), Ok(None));
    }
}
