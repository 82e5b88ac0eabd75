//! Configuration file support for cve-store.
//!
//! Provides YAML-based configuration through `cve-store.config.yml` files,
//! including data structures, file loading, validation, and the merge of
//! file values with command-line flags into [`Settings`].

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::cve_tracking::domain::RetentionPolicy;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "cve-store.config.yml";

/// Store URL used when neither the command line nor the config file names one
pub const DEFAULT_DBPATH: &str = "redis://127.0.0.1:6379/0";

/// Schema of `cve-store.config.yml`. Every field is optional.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Store connection URL
    pub dbpath: Option<String>,
    /// Retention in seconds; 0 keeps keys forever
    pub expire: Option<u64>,
    /// Default for Red Hat unfixed queries
    pub ignore_will_not_fix: Option<bool>,
    /// Anything else in the file, reported and otherwise ignored
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Loads the file named by `--config`. A missing file is an error.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Looks for `cve-store.config.yml` in `dir`; `None` when there is none.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref dbpath) = config.dbpath {
        if dbpath.trim().is_empty() {
            bail!(
                "Invalid config: dbpath must not be empty.\n\n\
                 💡 Hint: Use a connection URL such as \"{}\", or remove the field to use the default.",
                DEFAULT_DBPATH
            );
        }
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
    }
}

/// Settings resolved from command-line flags, the config file and defaults,
/// in that order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dbpath: String,
    pub retention: RetentionPolicy,
    pub ignore_will_not_fix: bool,
}

impl Settings {
    pub fn resolve(
        dbpath: Option<String>,
        expire: Option<u64>,
        ignore_will_not_fix: bool,
        config: Option<&ConfigFile>,
    ) -> Self {
        let dbpath = dbpath
            .or_else(|| config.and_then(|c| c.dbpath.clone()))
            .unwrap_or_else(|| DEFAULT_DBPATH.to_string());
        let expire = expire
            .or_else(|| config.and_then(|c| c.expire))
            .unwrap_or(0);
        let ignore_will_not_fix = ignore_will_not_fix
            || config
                .and_then(|c| c.ignore_will_not_fix)
                .unwrap_or(false);

        Self {
            dbpath,
            retention: RetentionPolicy::from_seconds(expire),
            ignore_will_not_fix,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(None, None, false, None)
    }
}
