//! Level range targeted by a LEVEL condition.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Inclusive character level range a filter is looking for.
///
/// Ranges are not normalised: an inverted range (`min > max`) is an empty
/// range and simply overlaps less. Use [`LevelRange::validated`] where user
/// input is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRange {
    pub min: i32,
    pub max: i32,
}

impl LevelRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Authoring-side constructor that rejects inverted ranges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `min > max`.
    pub fn validated(min: i32, max: i32) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::validation(format!(
                "Level range minimum {} exceeds maximum {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    fn as_range(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    /// Symmetric overlap test against a party's advertised level bounds.
    ///
    /// The party range, with missing bounds widened to the extremes, must
    /// contain one of our endpoints, or our range must contain one of the
    /// party's stated bounds. A missing party bound is never "contained".
    pub fn overlaps(&self, party_min: Option<i32>, party_max: Option<i32>) -> bool {
        let party_range = party_min.unwrap_or(i32::MIN)..=party_max.unwrap_or(i32::MAX);
        let target = self.as_range();

        party_range.contains(&self.min)
            || party_range.contains(&self.max)
            || party_min.is_some_and(|level| target.contains(&level))
            || party_max.is_some_and(|level| target.contains(&level))
    }
}

impl std::fmt::Display for LevelRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}
