//! Mock account and session records.
//!
//! Passwords are plain text. The demo's login gates a view, it does not
//! protect anything, so there is nothing to hash against.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::email::Email;

/// A registered (mock) account.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub email: Email,
    pub password: String,
}

impl Account {
    /// Create a new account record.
    #[must_use]
    pub const fn new(email: Email, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Logged-in state and current user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub logged_in: bool,
    pub current_user_email: Option<Email>,
}

impl Session {
    /// A session for a freshly logged-in user.
    #[must_use]
    pub const fn logged_in_as(email: Email) -> Self {
        Self {
            logged_in: true,
            current_user_email: Some(email),
        }
    }

    /// Returns the current user if logged in.
    #[must_use]
    pub fn current_user(&self) -> Option<&Email> {
        if self.logged_in {
            self.current_user_email.as_ref()
        } else {
            None
        }
    }

    /// True only when the flag is set and a user is known.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current_user().is_some()
    }
}
