//! Overall health derived from the outcomes of a run

use super::probe::{HealthState, Outcome};
use serde::{Deserialize, Serialize};

/// Consolidated view of one `run_all` pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub outcome: HealthState,
    pub checks: Vec<Outcome>,
}

impl HealthReport {
    /// Overall state is `UP` only when every check is `UP`; an empty set of
    /// checks is `UP`.
    pub fn from_outcomes(checks: Vec<Outcome>) -> Self {
        Self {
            outcome: overall_state(&checks),
            checks,
        }
    }

    pub fn is_up(&self) -> bool {
        self.outcome == HealthState::Up
    }

    pub fn down_checks(&self) -> impl Iterator<Item = &Outcome> {
        self.checks.iter().filter(|c| !c.is_up())
    }
}

pub fn overall_state(checks: &[Outcome]) -> HealthState {
    if checks.iter().all(Outcome::is_up) {
        HealthState::Up
    } else {
        HealthState::Down
    }
}
