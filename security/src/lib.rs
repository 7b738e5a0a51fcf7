// security/src/lib.rs
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use lib::config::SeedConfig;
use lib::errors::StoreError;
use lib::storage_engine::{HospitalStorage, SessionStorageEngine, UserStorageEngine};
use models::errors::require_non_empty;
use models::medical::{validate_email, NewUser, User};
use models::{Session, ValidationError};

pub mod roles;

pub use roles::Role;

/// User registration data transfer object (DTO), as posted by the register form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User login data transfer object (DTO).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

/// Custom authentication errors.
#[derive(Debug)]
pub enum AuthError {
    UserExists(String),
    EmailExists(String),
    /// Unknown username or wrong password; the two are never told apart.
    InvalidCredentials,
    Validation(ValidationError),
    PasswordHashError(String),
    InternalError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuthError::UserExists(name) => write!(f, "Username '{}' already exists", name),
            AuthError::EmailExists(_) => write!(f, "Email already registered"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::Validation(e) => write!(f, "{}", e),
            AuthError::PasswordHashError(msg) => write!(f, "Password hashing error: {}", msg),
            AuthError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken(name) => AuthError::UserExists(name),
            StoreError::EmailTaken(email) => AuthError::EmailExists(email),
            StoreError::Validation(e) => AuthError::Validation(e),
            other => AuthError::InternalError(other.to_string()),
        }
    }
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::Validation(err)
    }
}

/// Hashes a password using Argon2 with a fresh random salt.
pub fn hash_password_argon2(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHashError(format!("Failed to hash password with Argon2: {}", e)))
}

/// Verifies a password against an Argon2 hash. A mismatch is `Ok(false)`;
/// only an unreadable hash is an error.
pub fn verify_password_argon2(password: &str, hashed_password: &str) -> Result<bool, AuthError> {
    let password_hash = PasswordHash::new(hashed_password)
        .map_err(|e| AuthError::InternalError(format!("Failed to parse Argon2 password hash: {}", e)))?;
    match Argon2::default().verify_password(password.as_bytes(), &password_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::InternalError(format!("Failed to verify Argon2 password: {}", e))),
    }
}

/// Registers a new, non-admin user. Username and email must both be unused.
pub async fn register_user(
    registration: UserRegistration,
    store: &dyn HospitalStorage,
) -> Result<User, AuthError> {
    let username = registration.username.trim();
    let email = registration.email.trim();
    require_non_empty("username", username)?;
    require_non_empty("email", email)?;
    validate_email(email)?;
    require_non_empty("password", &registration.password)?;

    if store.get_user_by_username(username).await?.is_some() {
        return Err(AuthError::UserExists(username.to_string()));
    }

    let new_user = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: hash_password_argon2(&registration.password)?,
        is_admin: false,
    };
    // Both unique keys are re-checked inside the store's write.
    let user = store.create_user(new_user).await?;
    info!("Registered user '{}' (id {})", user.username, user.id);
    Ok(user)
}

/// Logs in a user. Returns the new server-side session on success; nothing is
/// stored on failure.
pub async fn login_user(login: UserLogin, store: &dyn HospitalStorage) -> Result<Session, AuthError> {
    let Some(user) = store.get_user_by_username(&login.username).await? else {
        warn!("Login failed for unknown user '{}'", login.username);
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password_argon2(&login.password, &user.password_hash)? {
        warn!("Login failed for user '{}': wrong password", user.username);
        return Err(AuthError::InvalidCredentials);
    }

    let session = Session::for_user(&user);
    store.put_session(&session).await?;
    info!("User '{}' logged in", user.username);
    Ok(session)
}

/// Ends the session behind `token`. Returns whether one existed.
pub async fn logout_user(token: &str, store: &dyn HospitalStorage) -> Result<bool, AuthError> {
    let removed = store.delete_session(token).await?;
    if removed {
        info!("Session ended");
    }
    Ok(removed)
}

/// Looks up the session for a token presented by a client.
pub async fn resolve_session(token: &str, store: &dyn HospitalStorage) -> Result<Option<Session>, AuthError> {
    if token.is_empty() {
        return Ok(None);
    }
    Ok(store.get_session(token).await?)
}

/// Creates the configured admin account unless a user of that name exists.
/// An account already holding the admin email is left alone with a warning.
/// Returns whether the account was created.
pub async fn ensure_admin_account(seed: &SeedConfig, store: &dyn HospitalStorage) -> Result<bool, AuthError> {
    if store.get_user_by_username(&seed.admin_username).await?.is_some() {
        return Ok(false);
    }
    require_non_empty("admin_password", &seed.admin_password)?;
    let created = store
        .create_user(NewUser {
            username: seed.admin_username.clone(),
            email: seed.admin_email.clone(),
            password_hash: hash_password_argon2(&seed.admin_password)?,
            is_admin: true,
        })
        .await;
    let admin = match created {
        Ok(admin) => admin,
        Err(StoreError::EmailTaken(email)) => {
            warn!(
                "Skipping admin account '{}': email '{}' already belongs to another user",
                seed.admin_username, email
            );
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };
    info!("Created admin account '{}'", admin.username);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::storage_engine::SledStorage;

    fn registration(username: &str, email: &str) -> UserRegistration {
        UserRegistration {
            username: username.to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
        }
    }

    fn login(username: &str, password: &str) -> UserLogin {
        UserLogin { username: username.to_string(), password: password.to_string() }
    }

    #[test]
    fn argon2_hash_verifies_only_the_original_password() {
        let hash = hash_password_argon2("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password_argon2("s3cret", &hash).unwrap());
        assert!(!verify_password_argon2("S3cret", &hash).unwrap());
        assert!(verify_password_argon2("s3cret", "not-a-hash").is_err());
    }

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let store = SledStorage::temporary().unwrap();
        let user = register_user(registration("erin", "erin@example.com"), &store).await.unwrap();
        assert!(!user.is_admin);
        assert_ne!(user.password_hash, "correct horse");

        let session = login_user(login("erin", "correct horse"), &store).await.unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(resolve_session(&session.token, &store).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn failed_logins_are_indistinguishable_and_store_nothing() {
        let store = SledStorage::temporary().unwrap();
        register_user(registration("erin", "erin@example.com"), &store).await.unwrap();

        let wrong_password = login_user(login("erin", "nope"), &store).await.unwrap_err();
        let unknown_user = login_user(login("frank", "nope"), &store).await.unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let store = SledStorage::temporary().unwrap();
        register_user(registration("erin", "erin@example.com"), &store).await.unwrap();

        let same_name = register_user(registration("erin", "other@example.com"), &store).await;
        assert!(matches!(same_name, Err(AuthError::UserExists(_))));
        let same_email = register_user(registration("erin2", "ERIN@example.com"), &store).await;
        assert!(matches!(same_email, Err(AuthError::EmailExists(_))));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_password_is_a_validation_error() {
        let store = SledStorage::temporary().unwrap();
        let mut reg = registration("gail", "gail@example.com");
        reg.password = String::new();
        assert!(matches!(
            register_user(reg, &store).await,
            Err(AuthError::Validation(ValidationError::EmptyField("password")))
        ));
    }

    #[tokio::test]
    async fn logout_removes_the_session() {
        let store = SledStorage::temporary().unwrap();
        register_user(registration("erin", "erin@example.com"), &store).await.unwrap();
        let session = login_user(login("erin", "correct horse"), &store).await.unwrap();

        assert!(logout_user(&session.token, &store).await.unwrap());
        assert!(!logout_user(&session.token, &store).await.unwrap());
        assert_eq!(resolve_session(&session.token, &store).await.unwrap(), None);
        assert_eq!(resolve_session("", &store).await.unwrap(), None);
    }

    #[tokio::test]
    async fn admin_account_is_created_once() {
        let store = SledStorage::temporary().unwrap();
        let seed = SeedConfig::default();
        assert!(ensure_admin_account(&seed, &store).await.unwrap());
        assert!(!ensure_admin_account(&seed, &store).await.unwrap());

        let session = login_user(login("admin", "admin123"), &store).await.unwrap();
        assert!(session.is_admin);
    }

    #[tokio::test]
    async fn admin_email_held_by_another_user_skips_the_admin() {
        let store = SledStorage::temporary().unwrap();
        let seed = SeedConfig::default();
        register_user(registration("hal", &seed.admin_email), &store).await.unwrap();

        assert!(!ensure_admin_account(&seed, &store).await.unwrap());
        assert_eq!(store.count_users().await.unwrap(), 1);
        assert!(store.get_user_by_username(&seed.admin_username).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn registration_checks_fields_before_touching_the_store() {
        let store = SledStorage::temporary().unwrap();
        assert!(matches!(
            register_user(registration("  ", "ivy@example.com"), &store).await,
            Err(AuthError::Validation(ValidationError::EmptyField("username")))
        ));
        assert!(matches!(
            register_user(registration("ivy", "not-an-email"), &store).await,
            Err(AuthError::Validation(ValidationError::InvalidEmail(_)))
        ));
        let user = register_user(registration(" ivy ", " ivy@example.com "), &store).await.unwrap();
        assert_eq!(user.username, "ivy");
        assert_eq!(user.email, "ivy@example.com");
        assert!(user.password_hash.starts_with("$argon2"));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }
}
