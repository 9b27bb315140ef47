use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_NAMESPACE: &str = "kumuluzee.health.checks";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Prefix for built-in probe names and their configuration keys.
    pub namespace: String,
    /// Per-probe timeout in milliseconds; 0 disables it.
    pub probe_timeout_ms: u64,
    pub checks: BuiltinChecksConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuiltinChecksConfig {
    pub data_source: bool,
    pub rabbit: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            probe_timeout_ms: 0,
            checks: BuiltinChecksConfig::default(),
        }
    }
}

impl HealthConfig {
    pub fn probe_timeout(&self) -> Option<Duration> {
        (self.probe_timeout_ms > 0).then(|| Duration::from_millis(self.probe_timeout_ms))
    }
}

impl AppConfig {
    /// Defaults, then `config.toml` from the working directory if present,
    /// then `HEALTH__*` environment variables.
    pub fn load_source() -> Result<Config, ConfigError> {
        let file = Path::new("config.toml");
        Self::load_source_with(file.exists().then_some(file), default_environment())
    }

    pub fn load_source_with(
        file: Option<&Path>,
        environment: Environment,
    ) -> Result<Config, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder.add_source(environment).build()
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(&Self::load_source()?)
    }

    pub fn from_source(source: &Config) -> Result<Self, ConfigError> {
        let app_config: AppConfig = source.clone().try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.server.host.is_empty() {
            return Err(ConfigError::Message("Server host cannot be empty".to_string()));
        }

        if self.health.namespace.is_empty() {
            return Err(ConfigError::Message(
                "Health namespace cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn default_environment() -> Environment {
    Environment::with_prefix("HEALTH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
