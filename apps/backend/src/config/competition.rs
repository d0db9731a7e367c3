//! Competition tunables: roster size and the registration-closing threshold.

use std::env;

use crate::error::AppError;

pub const DEFAULT_ROSTER_SIZE: usize = 4;
pub const DEFAULT_ACTIVATION_THRESHOLD: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetitionConfig {
    /// Regular (non-lead, non-mentor) members a team needs to be complete.
    pub roster_size: usize,
    /// Number of active teams that closes registration.
    pub activation_threshold: usize,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            roster_size: DEFAULT_ROSTER_SIZE,
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
        }
    }
}

impl CompetitionConfig {
    /// Read `HACKATHON_ROSTER_SIZE` and `HACKATHON_ACTIVATION_THRESHOLD`,
    /// falling back to the defaults when unset.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        Ok(Self {
            roster_size: parse_positive(
                "HACKATHON_ROSTER_SIZE",
                lookup("HACKATHON_ROSTER_SIZE"),
                DEFAULT_ROSTER_SIZE,
            )?,
            activation_threshold: parse_positive(
                "HACKATHON_ACTIVATION_THRESHOLD",
                lookup("HACKATHON_ACTIVATION_THRESHOLD"),
                DEFAULT_ACTIVATION_THRESHOLD,
            )?,
        })
    }

    pub fn with_activation_threshold(mut self, threshold: usize) -> Self {
        self.activation_threshold = threshold;
        self
    }
}

fn parse_positive(name: &str, raw: Option<String>, default: usize) -> Result<usize, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(AppError::config(format!("{name} must be greater than zero"))),
        Ok(value) => Ok(value),
        Err(_) => Err(AppError::config(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}
