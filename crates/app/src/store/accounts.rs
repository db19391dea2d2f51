//! Mock account directory.
//!
//! An email-keyed map of plain-text passwords. The persisted form is a JSON
//! object `{ "email": "password" }`. Directories written as a list of
//! `{ "email", "password" }` records are still readable and are rewritten
//! in the object form on the next save. Entries are checked one by one: an
//! invalid entry is dropped and logged, the rest are kept.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use food3d_core::{Account, Email, EmailError};

/// Errors that can occur during mock authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Registration for an email that is already a key.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Login for an email that was never registered.
    #[error("user not found")]
    UserNotFound,

    /// Login with a registered email and the wrong password.
    #[error("incorrect password")]
    IncorrectPassword,
}

/// Persisted directory shapes, before per-entry validation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredDirectory {
    Map(BTreeMap<String, Value>),
    Records(Vec<Value>),
}

/// Email to password mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccountDirectory {
    accounts: BTreeMap<Email, String>,
}

impl AccountDirectory {
    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if nobody has registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if `email` is already a key; the
    /// stored password is left untouched.
    pub fn register(&mut self, email: Email, password: &str) -> Result<(), AuthError> {
        if self.accounts.contains_key(&email) {
            return Err(AuthError::UserAlreadyExists);
        }
        self.accounts.insert(email, password.to_owned());
        Ok(())
    }

    /// Check `password` against the account for `email`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if `email` is not registered and
    /// `AuthError::IncorrectPassword` if the password does not match.
    pub fn verify(&self, email: &Email, password: &str) -> Result<(), AuthError> {
        let stored = self.accounts.get(email).ok_or(AuthError::UserNotFound)?;
        if stored == password {
            Ok(())
        } else {
            Err(AuthError::IncorrectPassword)
        }
    }
}

impl From<StoredDirectory> for AccountDirectory {
    fn from(stored: StoredDirectory) -> Self {
        let mut accounts = BTreeMap::new();
        match stored {
            StoredDirectory::Map(entries) => {
                for (key, value) in entries {
                    let (Ok(email), Value::String(password)) = (Email::parse(&key), value) else {
                        tracing::warn!(key = %key, "Skipping malformed stored account");
                        continue;
                    };
                    accounts.entry(email).or_insert(password);
                }
            }
            StoredDirectory::Records(records) => {
                // First record wins, matching a front-to-back lookup.
                for (index, record) in records.into_iter().enumerate() {
                    match serde_json::from_value::<Account>(record) {
                        Ok(account) => {
                            accounts.entry(account.email).or_insert(account.password);
                        }
                        Err(e) => {
                            tracing::warn!(index, error = %e, "Skipping malformed stored account");
                        }
                    }
                }
            }
        }
        Self { accounts }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_register_duplicate_keeps_first_password() {
        let mut directory = AccountDirectory::default();
        directory.register(email("a@x.com"), "p").unwrap();

        let err = directory.register(email("a@x.com"), "other").unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
        assert!(directory.verify(&email("a@x.com"), "p").is_ok());
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_verify_errors() {
        let mut directory = AccountDirectory::default();
        directory.register(email("a@x.com"), "p").unwrap();

        assert!(matches!(
            directory.verify(&email("b@x.com"), "p"),
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            directory.verify(&email("a@x.com"), "wrong"),
            Err(AuthError::IncorrectPassword)
        ));
    }

    #[test]
    fn test_serializes_as_object() {
        let mut directory = AccountDirectory::default();
        directory.register(email("a@x.com"), "p").unwrap();
        assert_eq!(
            serde_json::to_string(&directory).unwrap(),
            r#"{"a@x.com":"p"}"#
        );
    }

    #[test]
    fn test_reads_object_shape() {
        let stored: StoredDirectory = serde_json::from_str(r#"{"a@x.com":"p"}"#).unwrap();
        let directory = AccountDirectory::from(stored);
        assert!(directory.verify(&email("a@x.com"), "p").is_ok());
    }

    #[test]
    fn test_reads_legacy_record_list() {
        let json = r#"[
            {"email": "a@x.com", "password": "first"},
            {"email": "b@x.com", "password": "q"},
            {"email": "a@x.com", "password": "second"}
        ]"#;
        let stored: StoredDirectory = serde_json::from_str(json).unwrap();
        let directory = AccountDirectory::from(stored);

        assert_eq!(directory.len(), 2);
        assert!(directory.verify(&email("a@x.com"), "first").is_ok());
        assert!(directory.verify(&email("b@x.com"), "q").is_ok());
    }

    #[test]
    fn test_bad_legacy_record_does_not_drop_the_rest() {
        let json = r#"[
            {"email": "a@x.com", "password": "p"},
            {"email": "bob", "password": "q"},
            {"password": "no email"},
            {"email": "c@x.com", "password": "r"}
        ]"#;
        let stored: StoredDirectory = serde_json::from_str(json).unwrap();
        let directory = AccountDirectory::from(stored);

        assert_eq!(directory.len(), 2);
        assert!(directory.verify(&email("a@x.com"), "p").is_ok());
        assert!(directory.verify(&email("c@x.com"), "r").is_ok());
    }

    #[test]
    fn test_bad_map_entry_does_not_drop_the_rest() {
        let json = r#"{"a@x.com": "p", "bob": "q", "c@x.com": 7}"#;
        let stored: StoredDirectory = serde_json::from_str(json).unwrap();
        let directory = AccountDirectory::from(stored);

        assert_eq!(directory.len(), 1);
        assert!(directory.verify(&email("a@x.com"), "p").is_ok());
    }
}
