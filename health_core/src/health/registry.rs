//! Concurrent store of named probes with fan-out execution

use super::probe::{Outcome, Probe};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Registry of health probes keyed by name.
///
/// Clones share the same store, so the instance built at startup can be handed
/// to wiring code and to the endpoint that runs the checks.
#[derive(Clone, Default)]
pub struct HealthRegistry {
    probes: Arc<RwLock<HashMap<String, Arc<dyn Probe>>>>,
    probe_timeout: Option<Duration>,
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a probe as `DOWN` once it has been running for `timeout`.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = Some(timeout);
        self
    }

    pub fn probe_timeout(&self) -> Option<Duration> {
        self.probe_timeout
    }

    /// Insert or replace the probe stored under `name`.
    pub fn register(&self, name: impl Into<String>, probe: Arc<dyn Probe>) {
        let name = name.into();
        let replaced = self.probes.write().insert(name.clone(), probe).is_some();

        if replaced {
            debug!("Replaced health probe '{}'", name);
        } else {
            debug!("Registered health probe '{}'", name);
        }
    }

    /// Register `probe` under its own name if its precondition holds.
    pub fn register_probe(&self, probe: Arc<dyn Probe>) -> bool {
        if !probe.is_usable() {
            warn!("Health probe '{}' is not usable and was not registered", probe.name());
            return false;
        }

        let name = probe.name().to_string();
        self.register(name, probe);
        true
    }

    pub fn unregister(&self, name: &str) {
        if self.probes.write().remove(name).is_some() {
            debug!("Unregistered health probe '{}'", name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.probes.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.probes.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.probes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.read().is_empty()
    }

    /// Evaluate every registered probe concurrently and collect the outcomes.
    ///
    /// Works on a snapshot taken at call time. Every outcome carries the name
    /// the probe is registered under, so names never repeat. A probe that
    /// errors, panics or exceeds the configured timeout is reported as `DOWN`.
    /// The returned list has no meaningful order.
    pub async fn run_all(&self) -> Vec<Outcome> {
        let snapshot: Vec<(String, Arc<dyn Probe>)> = self
            .probes
            .read()
            .iter()
            .map(|(name, probe)| (name.clone(), Arc::clone(probe)))
            .collect();

        debug!("Running {} health probes", snapshot.len());
        let start = Instant::now();

        let handles: Vec<(String, JoinHandle<Outcome>)> = snapshot
            .into_iter()
            .map(|(name, probe)| {
                let handle = tokio::spawn(evaluate_isolated(
                    name.clone(),
                    probe,
                    self.probe_timeout,
                ));
                (name, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) if e.is_panic() => {
                    error!("Health probe '{}' panicked during evaluation", name);
                    outcomes.push(Outcome::down(name));
                }
                Err(e) => {
                    error!("Health probe '{}' did not complete: {}", name, e);
                    outcomes.push(Outcome::down(name));
                }
            }
        }

        let down = outcomes.iter().filter(|o| !o.is_up()).count();
        info!(
            "Health probes completed in {:?}: {} up, {} down",
            start.elapsed(),
            outcomes.len() - down,
            down
        );

        outcomes
    }

    /// Evaluate the single probe registered under `name`, with the same
    /// isolation as `run_all`.
    pub async fn run_one(&self, name: &str) -> Option<Outcome> {
        let probe = self.probes.read().get(name).cloned()?;
        let handle = tokio::spawn(evaluate_isolated(name.to_string(), probe, self.probe_timeout));

        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                error!("Health probe '{}' did not complete: {}", name, e);
                Some(Outcome::down(name))
            }
        }
    }
}

async fn evaluate_isolated(
    name: String,
    probe: Arc<dyn Probe>,
    probe_timeout: Option<Duration>,
) -> Outcome {
    let result = match probe_timeout {
        Some(limit) => match tokio::time::timeout(limit, probe.evaluate()).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Health probe '{}' timed out after {:?}", name, limit);
                return Outcome::down(name);
            }
        },
        None => probe.evaluate().await,
    };

    match result {
        Ok(outcome) => Outcome {
            name,
            state: outcome.state,
        },
        Err(e) => {
            error!("Health probe '{}' failed unexpectedly: {}", name, e);
            Outcome::down(name)
        }
    }
}
