//! Session identifier

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Maximum length for session IDs
pub const MAX_SESSION_ID_LENGTH: usize = 64;

static SESSION_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("session id pattern is valid"));

/// Identifier of a chat session owning its own statistics
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    pub const DEFAULT: &'static str = "default";

    /// Create a new SessionId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.is_empty() {
            return Err(DomainError::validation("Session ID cannot be empty"));
        }

        if id.len() > MAX_SESSION_ID_LENGTH {
            return Err(DomainError::validation(format!(
                "Session ID too long: {} characters (max {})",
                id.len(),
                MAX_SESSION_ID_LENGTH
            )));
        }

        if !SESSION_ID_PATTERN.is_match(&id) {
            return Err(DomainError::validation(format!(
                "Invalid session ID format '{}': must be alphanumeric with hyphens or underscores",
                id
            )));
        }

        Ok(Self(id))
    }

    /// Parse an optional ID, falling back to the default session
    pub fn parse_or_default(id: Option<&str>) -> Result<Self, DomainError> {
        match id {
            Some(id) => Self::new(id),
            None => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl TryFrom<String> for SessionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
