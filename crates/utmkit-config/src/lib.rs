use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use utmkit_core::domain::NormalizationConfig;

const APP_DIR: &str = "utmkit";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 10_000;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Seeds the settings row the first time a database is used.
    pub normalization: NormalizationConfig,
    pub links: LinksConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinksConfig {
    pub list_limit: i64,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid links.list_limit value: {0} (expected 1..=10000)")]
    InvalidListLimit(i64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    normalization: Option<NormalizationFile>,
    links: Option<LinksFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NormalizationFile {
    normalize_values: Option<bool>,
    lowercase_values: Option<bool>,
    replace_spaces: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinksFile {
    list_limit: Option<i64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfigPath(path));
        }
        return Ok(path);
    }

    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if dir.is_empty() => return Err(ConfigError::InvalidConfigPath(dir.into())),
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .ok_or(ConfigError::MissingHomeDir)?
            .join(".config"),
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(normalization) = parsed.normalization {
        let target = &mut config.normalization;
        if let Some(value) = normalization.normalize_values {
            target.normalize_values = value;
        }
        if let Some(value) = normalization.lowercase_values {
            target.lowercase_values = value;
        }
        if let Some(value) = normalization.replace_spaces {
            target.replace_spaces = value;
        }
    }

    if let Some(limit) = parsed.links.and_then(|links| links.list_limit) {
        if !(1..=MAX_LIST_LIMIT).contains(&limit) {
            return Err(ConfigError::InvalidListLimit(limit));
        }
        config.links.list_limit = limit;
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.permissions().mode() & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
