use serde::{Deserialize, Serialize};

/// `^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$`, enforced both by a
/// relational `CHECK` constraint and, character class for character
/// class, by `traits::looks_like_email` before the insert is attempted.
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub details: Option<String>,
}

impl User {
    pub fn new(email: impl Into<String>, details: Option<String>) -> Self {
        Self {
            email: email.into(),
            details,
        }
    }
}
