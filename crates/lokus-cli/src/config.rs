use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use lokus_manifest::{ManifestError, Result};

pub const CONFIG_ENV: &str = "LOKUS_MANIFEST_CONFIG";
pub const LOG_LEVEL_ENV: &str = "LOKUS_LOG_LEVEL";
pub const DENY_WARNINGS_ENV: &str = "LOKUS_DENY_WARNINGS";

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Root configuration — maps to `lokus-manifest.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub logging: LoggingConfig,
    pub check: CheckConfig,
    /// File the config was read from; `None` when defaults were used.
    #[serde(skip)]
    pub source: Option<PathBuf>,
    /// Environment values that were present but not understood.
    #[serde(skip)]
    pub env_warnings: Vec<String>,
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "compact", "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

// ── Check ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Fail `check` when a manifest is valid but carries warnings.
    pub deny_warnings: bool,
}

impl CliConfig {
    /// Resolve the config path: explicit path > LOKUS_MANIFEST_CONFIG env > ~/.lokus/lokus-manifest.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lokus")
            .join("lokus-manifest.toml")
    }

    /// Load the config from disk, falling back to defaults when the file is
    /// absent. An explicit path that does not exist is an error.
    ///
    /// Runs before the log subscriber exists, so nothing is logged here;
    /// `source` and `env_warnings` are reported by the caller instead.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(explicit);
        let config = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let mut config = toml::from_str::<CliConfig>(&raw).map_err(|e| {
                ManifestError::Config(format!("failed to parse {}: {}", path.display(), e))
            })?;
            config.source = Some(path);
            config
        } else if explicit.is_some() {
            return Err(ManifestError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        } else {
            CliConfig::default()
        };

        Ok(config.apply_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| ManifestError::Config(e.to_string()))
    }

    /// Apply LOKUS_LOG_LEVEL and LOKUS_DENY_WARNINGS. `lookup` stands in for
    /// the process environment.
    pub fn apply_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
        if let Some(v) = lookup(DENY_WARNINGS_ENV) {
            match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.check.deny_warnings = true,
                "0" | "false" | "no" => self.check.deny_warnings = false,
                other => self.env_warnings.push(format!(
                    "{DENY_WARNINGS_ENV}: ignoring unrecognized value '{other}' (valid: 1, true, yes, 0, false, no)"
                )),
            }
        }
        self
    }

    /// Advisory findings about the loaded config.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = self.env_warnings.clone();
        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            warnings.push(format!(
                "logging.level: unknown log level '{}' (valid: {})",
                self.logging.level,
                VALID_LEVELS.join(", ")
            ));
        }
        if !VALID_FORMATS.contains(&self.logging.format.as_str()) {
            warnings.push(format!(
                "logging.format: unknown log format '{}' (valid: {})",
                self.logging.format,
                VALID_FORMATS.join(", ")
            ));
        }
        warnings
    }
}
