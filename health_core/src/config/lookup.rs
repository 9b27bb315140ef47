//! Key-value view over the layered configuration used by built-in probes

use config::Config;

/// Read-only lookup keyed by dot/bracket paths such as
/// `kumuluzee.health.checks.rabbit-health-check.connection-url` or
/// `datasources[0].jndi-name`.
pub trait ConfigLookup: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Number of elements in the list stored at `key`.
    fn list_len(&self, key: &str) -> Option<usize>;
}

impl ConfigLookup for Config {
    fn get(&self, key: &str) -> Option<String> {
        self.get_string(key).ok()
    }

    fn list_len(&self, key: &str) -> Option<usize> {
        self.get_array(key).ok().map(|values| values.len())
    }
}
