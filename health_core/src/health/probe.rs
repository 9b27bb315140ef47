//! Probe contract and the UP/DOWN outcome it produces

use crate::error::ProbeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthState {
    Up,
    Down,
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthState::Up => write!(f, "UP"),
            HealthState::Down => write!(f, "DOWN"),
        }
    }
}

/// Result of a single probe evaluation, tagged with the probe's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub name: String,
    pub state: HealthState,
}

impl Outcome {
    pub fn up(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: HealthState::Up,
        }
    }

    pub fn down(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: HealthState::Down,
        }
    }

    pub fn is_up(&self) -> bool {
        self.state == HealthState::Up
    }
}

/// A named check of one external dependency.
#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    /// Stable identifier; the registry keys probes by it.
    fn name(&self) -> &str;

    /// Test the dependency once.
    ///
    /// Implementations should map expected failures (unreachable endpoint,
    /// bad configuration) to `Outcome::down` themselves. An `Err` is treated
    /// as unexpected and reported as `DOWN` by the registry.
    async fn evaluate(&self) -> Result<Outcome, ProbeError>;

    /// Precondition consulted once at wiring time.
    fn is_usable(&self) -> bool {
        true
    }
}
