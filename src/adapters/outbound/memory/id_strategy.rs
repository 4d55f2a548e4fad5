use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How an in-memory store assigns ids to new records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Decimal counter per collection, never reused after deletes
    #[default]
    Sequential,
    /// Random v4 UUIDs
    Uuid,
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(IdStrategy::Sequential),
            "uuid" => Ok(IdStrategy::Uuid),
            _ => Err(format!(
                "Invalid id strategy: {}. Please specify 'sequential' or 'uuid'",
                s
            )),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::Sequential => write!(f, "sequential"),
            IdStrategy::Uuid => write!(f, "uuid"),
        }
    }
}

/// Per-collection id source.
///
/// The sequential counter only moves forward, so ids freed by deletes
/// are never handed out again. Once it reaches `u64::MAX` it stays
/// there and new ids come from UUIDs instead. Every candidate is still
/// checked against the live ids, since seeded records may hold arbitrary
/// strings.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdGenerator {
    high_water: u64,
}

impl IdGenerator {
    /// Raises the counter past an id that is already taken
    pub(crate) fn observe(&mut self, id: &str) {
        if let Ok(n) = id.parse::<u64>() {
            self.high_water = self.high_water.max(n);
        }
    }

    pub(crate) fn next(&mut self, strategy: IdStrategy, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let candidate = match strategy {
                IdStrategy::Sequential => match self.high_water.checked_add(1) {
                    Some(next) => {
                        self.high_water = next;
                        next.to_string()
                    }
                    None => Uuid::new_v4().to_string(),
                },
                IdStrategy::Uuid => Uuid::new_v4().to_string(),
            };
            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}
