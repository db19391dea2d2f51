//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email cannot contain whitespace")]
    Whitespace,
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    #[error("email must contain only one @ symbol")]
    MultipleAtSymbols,
    #[error("email is missing the part before the @")]
    EmptyLocalPart,
    #[error("email is missing the part after the @")]
    EmptyDomain,
    #[error("email domain '{0}' is not valid")]
    InvalidDomain(String),
}

/// An email address, used as the account directory key.
///
/// Accepts what a browser `type=email` field would let through to a submit
/// handler: one `@` with something on both sides, no embedded whitespace,
/// and a dot-separated domain without empty labels. Surrounding whitespace
/// is trimmed first. Deserialization applies the same checks.
///
/// ```
/// use food3d_core::Email;
///
/// assert_eq!(Email::parse(" a@x.com ").unwrap().as_str(), "a@x.com");
/// assert!(Email::parse("a@@x.com").is_err());
/// assert!(Email::parse("a@x..com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse and normalize an email address.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] the input trips.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::MultipleAtSymbols);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }
        if domain.split('.').any(str::is_empty) {
            return Err(EmailError::InvalidDomain(domain.to_owned()));
        }

        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for input in ["a@x.com", "first.last+food@mail.example.co.uk", "a@localhost"] {
            assert_eq!(Email::parse(input).unwrap().as_str(), input);
        }
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(Email::parse("\t a@x.com \n").unwrap().as_str(), "a@x.com");
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
    }

    #[test]
    fn test_rejections() {
        assert_eq!(Email::parse("a x@y.com"), Err(EmailError::Whitespace));
        assert_eq!(Email::parse("no-at-symbol"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::MultipleAtSymbols));
        assert_eq!(Email::parse("@x.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("a@"), Err(EmailError::EmptyDomain));
        assert_eq!(
            Email::parse("a@.x.com"),
            Err(EmailError::InvalidDomain(".x.com".to_string()))
        );
        assert!(matches!(
            Email::parse(&format!("{}@x.com", "a".repeat(250))),
            Err(EmailError::TooLong { max: 254 })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let email: Email = serde_json::from_str("\" a@x.com\"").unwrap();
        assert_eq!(email.as_str(), "a@x.com");
        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"a@x.com\"");
    }

    #[test]
    fn test_orders_as_string() {
        let mut emails = vec![Email::parse("z@x.com").unwrap(), Email::parse("a@x.com").unwrap()];
        emails.sort();
        assert_eq!(emails[0].as_str(), "a@x.com");
    }
}
