use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Top-level agent configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub host: HostConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Filesystem root the firmware, proc and sys trees are read from.
    /// Also passed to lsblk as `--sysroot` when it is not `/`.
    pub root: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Block-device listing utility. A bare name is looked up on PATH.
    pub lsblk: String,
    /// Upper bound on a single lsblk invocation.
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            lsblk: "lsblk".to_string(),
            timeout_secs: 30,
        }
    }
}

impl StorageConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the emitted profile.
    pub pretty: bool,
}

const SYSTEM_CONFIG: &str = "/etc/rebuild-agent/config.toml";

/// An absent layer is skipped silently; an unreadable or broken one is
/// skipped with a warning so the remaining layers still apply.
fn read_layer(path: &Path) -> Option<toml::Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config, ignoring it");
            return None;
        }
    };
    toml::from_str(&content)
        .inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to parse config, ignoring it");
        })
        .ok()
}

fn load_system() -> Option<toml::Value> {
    read_layer(Path::new(SYSTEM_CONFIG))
}

/// Load the user config file (~/.config/rebuild-agent/config.toml) if it exists.
fn load_user() -> Option<toml::Value> {
    let dir = dirs::config_dir()?;
    read_layer(&dir.join("rebuild-agent").join("config.toml"))
}

/// Recursively merge two TOML values. Tables are merged key-by-key;
/// all other types in `overlay` replace `base`.
fn merge_values(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_values(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

fn load_from_path(path: &Path) -> AgentConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
            AgentConfig::default()
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
            AgentConfig::default()
        }
    }
}

/// Load the merged config: system defaults, then user overrides.
/// If `override_path` is provided, use only that file instead.
pub fn load(override_path: Option<&Path>) -> AgentConfig {
    if let Some(path) = override_path {
        return load_from_path(path);
    }

    let merged = match (load_system(), load_user()) {
        (Some(s), Some(u)) => Some(merge_values(s, u)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    };

    match merged {
        Some(value) => value.try_into().unwrap_or_else(|e| {
            warn!(error = %e, "failed to deserialize config, using defaults");
            AgentConfig::default()
        }),
        None => AgentConfig::default(),
    }
}
