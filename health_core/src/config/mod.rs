pub mod lookup;
pub mod settings;

pub use lookup::ConfigLookup;
pub use settings::{AppConfig, BuiltinChecksConfig, HealthConfig, ServerConfig};
