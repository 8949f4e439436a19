use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::Key;

/// An opaque string key identifying a Station or a Train.
///
/// Equality and hashing are on the raw string; nothing in this crate
/// normalises casing or whitespace, so a station name is just whatever
/// string the operator typed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraitsKey(String);

impl TraitsKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Key for TraitsKey {
    fn string_key(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Display for TraitsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TraitsKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TraitsKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for TraitsKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
