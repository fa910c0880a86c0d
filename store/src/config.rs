//! Record store configuration (`[store]` section of `prodtrack.toml`)

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::{Result, StoreError};
use crate::models::ReportOrder;

/// Storage settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the SQLite database file (`~/` is expanded)
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Maximum pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// How long a writer waits on a locked database before failing
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Direction of the full chronological listing
    #[serde(default)]
    pub report_order: ReportOrder,
}

fn default_db_path() -> String {
    dirs::data_dir()
        .map(|d| {
            d.join("prodtrack")
                .join("database.db")
                .to_string_lossy()
                .into_owned()
        })
        .unwrap_or_else(|| "database.db".to_string())
}

fn default_pool_size() -> u32 {
    4
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            pool_size: default_pool_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
            report_order: ReportOrder::default(),
        }
    }
}

impl StoreConfig {
    /// Config pointing at an explicit database file, defaults elsewhere.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: path.into().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(StoreError::config("store.pool_size must be at least 1"));
        }
        if self.db_path.trim().is_empty() {
            return Err(StoreError::config("store.db_path must not be empty"));
        }
        if self.busy_timeout_ms == 0 {
            tracing::warn!("store.busy_timeout_ms is 0; concurrent writers will fail fast");
        }
        Ok(())
    }

    /// Get the resolved database path (expanding ~ if needed)
    pub fn resolved_db_path(&self) -> PathBuf {
        let path = &self.db_path;
        if let Some(stripped) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(stripped);
        }
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default)]
        store: StoreConfig,
    }

    #[test]
    fn test_defaults_apply_to_missing_keys() {
        let parsed: Wrapper = toml::from_str(
            r#"
            [store]
            db_path = "/tmp/prodtrack.db"
            "#,
        )
        .expect("should parse");
        assert_eq!(parsed.store.db_path, "/tmp/prodtrack.db");
        assert_eq!(parsed.store.pool_size, 4);
        assert_eq!(parsed.store.busy_timeout_ms, 5000);
        assert_eq!(parsed.store.report_order, ReportOrder::Desc);
    }

    #[test]
    fn test_report_order_from_toml() {
        let parsed: Wrapper = toml::from_str(
            r#"
            [store]
            report_order = "asc"
            "#,
        )
        .expect("should parse");
        assert_eq!(parsed.store.report_order, ReportOrder::Asc);
    }

    #[test]
    fn test_zero_pool_is_rejected() {
        let cfg = StoreConfig {
            pool_size: 0,
            ..StoreConfig::default()
        };
        let err = cfg.validate().expect_err("pool_size 0");
        assert_eq!(err.category(), crate::errors::ErrorCategory::ConfigError);
    }

    #[test]
    fn test_tilde_expansion() {
        let cfg = StoreConfig::at_path("~/prodtrack/db.sqlite");
        let resolved = cfg.resolved_db_path();
        if dirs::home_dir().is_some() {
            assert!(!resolved.starts_with("~"));
            assert!(resolved.ends_with("prodtrack/db.sqlite"));
        }
    }
}
