use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Store file used when nothing else is configured
pub const DEFAULT_STORE_FILE: &str = "Contacts.json";

/// Environment variable naming the store file directly
pub const STORE_FILE_ENV: &str = "CONTACTS_FILE";

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "CONTACTS_CONFIG_PATH";

/// User configuration, persisted as YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Location of the contacts store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Loads the config from the provided path; a missing file gives the default config
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Loads the config, falling back to the default when the file is unreadable
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            warn!("Ignoring config file {:?}: {:#}", path.as_ref(), e);
            Self::default()
        })
    }

    /// Save the config to the specified path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(&self)?;

        // Ensure parent directories exist
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Gets the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    // Default to ~/.contacts.config
    let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

    Ok(home_dir.join(".contacts.config"))
}

/// Determines the store file to use
///
/// Priority: explicit path, then `CONTACTS_FILE`, then the config file,
/// then `Contacts.json` in the current directory.
pub fn determine_store_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let env_path = env::var(STORE_FILE_ENV).ok().filter(|p| !p.is_empty());

    // The config file is only consulted when nothing more specific is given
    let config = if explicit.is_none() && env_path.is_none() {
        Config::load_or_default(get_config_path()?)
    } else {
        Config::default()
    };

    Ok(resolve_store_path(explicit, env_path.as_deref(), &config))
}

fn resolve_store_path(explicit: Option<&Path>, env_path: Option<&str>, config: &Config) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = env_path {
        return PathBuf::from(path);
    }
    if let Some(path) = &config.store_path {
        return path.clone();
    }
    PathBuf::from(DEFAULT_STORE_FILE)
}
