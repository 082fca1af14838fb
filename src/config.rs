use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::behavioral::strategy::EVICTION_POLICIES;
use crate::error::{CatalogError, Result};

/// Environment variable consulted by [`CatalogConfig::load`] when no path is given.
pub const CONFIG_ENV: &str = "PATTERN_CATALOG_CONFIG";

/// Upper bound on threads spawned for the singleton race.
pub const MAX_RACERS: usize = 1024;

/// Upper bound on the proxy's per-URL request allowance.
pub const MAX_ALLOWED_REQUESTS: u32 = 10_000;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub capacity: usize,
    pub policy: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: 2,
            policy: "fifo".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendingSettings {
    pub item_count: u32,
    pub item_price: u32,
}

impl Default for VendingSettings {
    fn default() -> Self {
        Self {
            item_count: 1,
            item_price: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub max_allowed_requests: u32,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            max_allowed_requests: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonSettings {
    pub racers: usize,
}

impl Default for SingletonSettings {
    fn default() -> Self {
        Self { racers: 30 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeSettings {
    pub discount_rate: f64,
    pub unit_price: f64,
}

impl Default for FacadeSettings {
    fn default() -> Self {
        Self {
            discount_rate: 0.9,
            unit_price: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

// =============================================================================
// Root
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub cache: CacheSettings,
    pub vending: VendingSettings,
    pub proxy: ProxySettings,
    pub singleton: SingletonSettings,
    pub facade: FacadeSettings,
    pub logging: LoggingSettings,
}

impl CatalogConfig {
    /// Parses and validates a TOML document. Missing sections fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CatalogConfig = toml::from_str(content).map_err(CatalogError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            CatalogError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Explicit path first, then `PATTERN_CATALOG_CONFIG`, then built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let resolved: Option<PathBuf> = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        match resolved {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading catalog config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache.capacity == 0 {
            return Err(CatalogError::invalid("cache.capacity", "must be at least 1"));
        }
        let policy = self.cache.policy.to_ascii_lowercase();
        if !EVICTION_POLICIES.contains(&policy.as_str()) {
            return Err(CatalogError::invalid(
                "cache.policy",
                format!(
                    "'{}' is not one of {}",
                    self.cache.policy,
                    EVICTION_POLICIES.join(", ")
                ),
            ));
        }
        if self.vending.item_price == 0 {
            return Err(CatalogError::invalid("vending.item_price", "must be at least 1"));
        }
        if self.singleton.racers == 0 {
            return Err(CatalogError::invalid("singleton.racers", "must be at least 1"));
        }
        if self.singleton.racers > MAX_RACERS {
            return Err(CatalogError::invalid(
                "singleton.racers",
                format!("{} exceeds the limit of {MAX_RACERS}", self.singleton.racers),
            ));
        }
        if self.proxy.max_allowed_requests > MAX_ALLOWED_REQUESTS {
            return Err(CatalogError::invalid(
                "proxy.max_allowed_requests",
                format!(
                    "{} exceeds the limit of {MAX_ALLOWED_REQUESTS}",
                    self.proxy.max_allowed_requests
                ),
            ));
        }
        let rate = self.facade.discount_rate;
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(CatalogError::invalid(
                "facade.discount_rate",
                format!("{rate} is outside (0, 1]"),
            ));
        }
        if self.facade.unit_price < 0.0 {
            return Err(CatalogError::invalid("facade.unit_price", "must not be negative"));
        }
        Ok(())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::Config(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache.capacity, 2);
        assert_eq!(config.proxy.max_allowed_requests, 2);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = CatalogConfig::from_toml_str("[cache]\npolicy = \"lru\"\n").unwrap();
        assert_eq!(config.cache.policy, "lru");
        assert_eq!(config.cache.capacity, 2);
        assert_eq!(config.vending, VendingSettings::default());
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let err = CatalogConfig::from_toml_str("[cache]\npolicy = \"random\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { ref field, .. } if field == "cache.policy"));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = CatalogConfig::from_toml_str("[cache]\ncapacity = 0\n").unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }));
    }

    #[test]
    fn test_rejects_bad_discount() {
        let err = CatalogConfig::from_toml_str("[facade]\ndiscount_rate = 1.5\n").unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { ref field, .. } if field == "facade.discount_rate"));
    }

    #[test]
    fn test_rejects_excessive_racers() {
        let err = CatalogConfig::from_toml_str("[singleton]\nracers = 1000000\n").unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { ref field, .. } if field == "singleton.racers"));
        assert!(CatalogConfig::from_toml_str("[singleton]\nracers = 1024\n").is_ok());
    }

    #[test]
    fn test_rejects_excessive_request_limit() {
        let err = CatalogConfig::from_toml_str("[proxy]\nmax_allowed_requests = 4000000000\n")
            .unwrap_err();
        assert!(
            matches!(err, CatalogError::Invalid { ref field, .. } if field == "proxy.max_allowed_requests")
        );
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = CatalogConfig::from_toml_str("[cache\ncapacity = 3").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[vending]\nitem_count = 5\nitem_price = 25").unwrap();

        let config = CatalogConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.vending.item_count, 5);
        assert_eq!(config.vending.item_price, 25);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Config(msg) if msg.contains("failed to read")));
    }
}
