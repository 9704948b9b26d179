//! Named relevancy levels for filter weights.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Human label for a filter's relevancy weight.
///
/// Weights 1 through 5 have names; 0 and anything outside that band is a
/// flag, i.e. the filter marks parties without adding to their score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevancyLevel {
    Flag,
    Lowest,
    Low,
    Modest,
    High,
    Extreme,
}

impl RelevancyLevel {
    pub fn from_weight(weight: i32) -> Self {
        match weight {
            1 => RelevancyLevel::Lowest,
            2 => RelevancyLevel::Low,
            3 => RelevancyLevel::Modest,
            4 => RelevancyLevel::High,
            5 => RelevancyLevel::Extreme,
            _ => RelevancyLevel::Flag,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RelevancyLevel::Flag => "Flag only",
            RelevancyLevel::Lowest => "Lowest relevancy",
            RelevancyLevel::Low => "Low relevancy",
            RelevancyLevel::Modest => "Modest relevancy",
            RelevancyLevel::High => "High relevancy",
            RelevancyLevel::Extreme => "Extreme relevancy",
        }
    }
}

impl fmt::Display for RelevancyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
