//! `prodtrack.toml` loading
//!
//! Looked up at `--config`, then `PRODTRACK_CONFIG`, then
//! `~/.config/prodtrack/prodtrack.toml`. Only the last one may be absent, in
//! which case every section falls back to its defaults.

use std::path::{Path, PathBuf};

use prodtrack_report::ExportConfig;
use prodtrack_store::StoreConfig;
use serde::Deserialize;

use crate::stages::StagePolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Root configuration
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub stages: StageConfig,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
pub struct StageConfig {
    /// Whether production commands accept any stage text
    #[serde(default)]
    pub policy: StagePolicy,
}

impl AppConfig {
    /// Environment variable that overrides the config location
    pub const ENV_CONFIG_PATH: &'static str = "PRODTRACK_CONFIG";

    /// Default config filename
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "prodtrack.toml";

    /// Load from an explicit path, the environment, or the default location.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        if let Ok(path) = std::env::var(Self::ENV_CONFIG_PATH) {
            return Self::load_from_file(Path::new(&path));
        }

        let path = Self::default_config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            let cfg = Self::default();
            cfg.validate()?;
            return Ok(cfg);
        }
        Self::load_from_file(&path)
    }

    /// Load from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: AppConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        cfg.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(cfg)
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("prodtrack").join(Self::DEFAULT_CONFIG_FILENAME))
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CONFIG_FILENAME))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.store
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.export.validate();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodtrack_report::ExportFormat;
    use prodtrack_store::ReportOrder;

    #[test]
    fn test_full_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prodtrack.toml");
        std::fs::write(
            &path,
            r#"
            [store]
            db_path = "/srv/prodtrack/database.db"
            pool_size = 2
            report_order = "asc"

            [export]
            format = "csv"
            filename = "producao.csv"

            [stages]
            policy = "known"
            "#,
        )
        .expect("write config");

        let cfg = AppConfig::load(Some(&path)).expect("should load");
        assert_eq!(cfg.store.db_path, "/srv/prodtrack/database.db");
        assert_eq!(cfg.store.pool_size, 2);
        assert_eq!(cfg.store.report_order, ReportOrder::Asc);
        assert_eq!(cfg.export.format, ExportFormat::Csv);
        assert_eq!(cfg.stages.policy, StagePolicy::Known);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prodtrack.toml");
        std::fs::write(&path, "").expect("write config");

        let cfg = AppConfig::load(Some(&path)).expect("should load");
        assert_eq!(cfg.store.report_order, ReportOrder::Desc);
        assert_eq!(cfg.export.filename, "relatorio.xlsx");
        assert_eq!(cfg.stages.policy, StagePolicy::Open);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = AppConfig::load(Some(&dir.path().join("nope.toml"))).expect_err("missing");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_zero_pool_is_invalid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prodtrack.toml");
        std::fs::write(&path, "[store]\npool_size = 0\n").expect("write config");

        let err = AppConfig::load(Some(&path)).expect_err("invalid");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
