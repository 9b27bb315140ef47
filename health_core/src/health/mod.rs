pub mod checks;
pub mod probe;
pub mod registry;
pub mod report;


pub use checks::{register_builtin_probes, DataSourceProbe, FnProbe, RabbitProbe};
pub use probe::{HealthState, Outcome, Probe};
pub use registry::HealthRegistry;
pub use report::HealthReport;
