//! Common domain types for Firi API.

use serde::{Deserialize, Serialize};

use crate::error::FiriError;

/// Which end of the history a paginated query reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Oldest entries first
    Start,
    /// Newest entries first
    #[default]
    End,
}

impl Direction {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Start => "start",
            Direction::End => "end",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = FiriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Direction::Start),
            "end" => Ok(Direction::End),
            other => Err(FiriError::InvalidArgument(format!(
                "direction must be \"start\" or \"end\", got {other:?}"
            ))),
        }
    }
}
