use serde::{Deserialize, Serialize};
use utility::key::TraitsKey;

/// A named location. Stations are never mutated once created and have no
/// exposed delete operation — their graph-store counterpart is a `Station`
/// node keyed by the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: TraitsKey,
    pub details: Option<String>,
}

impl Station {
    pub fn new(name: TraitsKey, details: Option<String>) -> Self {
        Self { name, details }
    }
}
