//! Engine configuration loaded from the environment.
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file by `dotenvy` at startup. Missing or unparseable values fall
//! back to defaults.

use std::path::PathBuf;

use assemble_domain::DEFAULT_MAX_AGE_MINUTES;

/// Environment variable for the party freshness limit, in minutes
pub const MAX_PARTY_AGE_ENV: &str = "ASSEMBLE_MAX_PARTY_AGE_MINUTES";

/// Environment variable for the JSON snapshot read by the binary
pub const SNAPSHOT_PATH_ENV: &str = "ASSEMBLE_SNAPSHOT_PATH";

const DEFAULT_SNAPSHOT_PATH: &str = "snapshot.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Parties not observed within this many minutes are not ranked
    pub max_party_age_minutes: i64,
    pub snapshot_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_party_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let max_party_age_minutes = match lookup(MAX_PARTY_AGE_ENV) {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = defaults.max_party_age_minutes,
                        "Invalid {}, using default", MAX_PARTY_AGE_ENV
                    );
                    defaults.max_party_age_minutes
                }
            },
            None => defaults.max_party_age_minutes,
        };

        let snapshot_path = lookup(SNAPSHOT_PATH_ENV)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.snapshot_path);

        Self {
            max_party_age_minutes,
            snapshot_path,
        }
    }
}
