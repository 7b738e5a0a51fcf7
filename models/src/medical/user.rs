// models/src/medical/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_empty, ValidationError, ValidationResult};

// --- DTO for a user about to be stored ---
// The password has already been hashed by the security crate; storage never
// sees the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl NewUser {
    /// Checks the fields that the store relies on for its unique indexes.
    pub fn validate(&self) -> ValidationResult<()> {
        require_non_empty("username", &self.username)?;
        require_non_empty("email", &self.email)?;
        require_non_empty("password_hash", &self.password_hash)?;
        validate_email(&self.email)
    }
}

// --- Stored User Struct ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds the stored row for `new_user` once the store has allocated `id`.
    pub fn from_new_user(id: u64, new_user: NewUser) -> Self {
        User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_admin: new_user.is_admin,
            created_at: Utc::now(),
        }
    }
}

/// Minimal shape check: something before and after a single '@'.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn from_new_user_keeps_fields() {
        let user = User::from_new_user(7, new_user("alice", "alice@example.com"));
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin);
    }

    #[test]
    fn validate_rejects_blank_username() {
        assert_eq!(
            new_user("", "a@b.org").validate(),
            Err(ValidationError::EmptyField("username"))
        );
    }

    #[test]
    fn validate_rejects_malformed_email() {
        assert!(matches!(
            new_user("bob", "bob.example.com").validate(),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert!(new_user("bob", "bob@example.com").validate().is_ok());
    }
}
