use serde::{Deserialize, Serialize};
use utility::key::TraitsKey;

/// `status` column is stored as an integer in the schema; the numeric
/// values below match the canonical ordering of the lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum TrainStatus {
    Operational = 0,
    Delayed = 1,
    Broken = 2,
}

impl TrainStatus {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Operational),
            1 => Some(Self::Delayed),
            2 => Some(Self::Broken),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    pub name: TraitsKey,
    pub capacity: u32,
    pub status: TrainStatus,
}

impl Train {
    pub fn new(name: TraitsKey, capacity: u32, status: TrainStatus) -> Self {
        Self {
            name,
            capacity,
            status,
        }
    }
}
