//! Strongly-typed expense identifier
//!
//! Wraps a UUID so expense ids can't be confused with other strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix used when displaying a shortened id
const DISPLAY_PREFIX: &str = "exp-";

/// Unique identifier of an expense, serialized as a plain UUID string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse an ID from a full UUID string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Whether `query` names this id, either as the short display form
    /// (`exp-1a2b3c4d`) or as a leading portion of the hyphenated UUID
    pub fn matches_prefix(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        let query = query.strip_prefix(DISPLAY_PREFIX).unwrap_or(&query);
        !query.is_empty() && self.0.to_string().starts_with(query)
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DISPLAY_PREFIX, &self.0.to_string()[..8])
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}
