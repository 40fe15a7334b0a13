//! User configuration - profiles defined in BLEPROF_HOME/profiles.json
//!
//! ```json
//! {
//!   "profiles": {
//!     "muse": {
//!       "name": "Muse S",
//!       "service": "0000fe8d-0000-1000-8000-00805f9b34fb",
//!       "characteristic": "273e0003-4c4d-454d-96be-f03bac821358",
//!       "write_characteristic": "273e0001-4c4d-454d-96be-f03bac821358",
//!       "parser": "json"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::descriptor::{ProfileDescriptor, ProfileError};
use crate::parser::ParserKind;
use crate::registry::ProfileRegistry;

pub const HOME_ENV: &str = "BLEPROF_HOME";
pub const PROFILES_FILE: &str = "profiles.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid profile '{key}': {source}")]
    InvalidProfile {
        key: String,
        #[source]
        source: ProfileError,
    },
}

/// BLEPROF_HOME, or ~/.bleprof
pub fn bleprof_home() -> Option<PathBuf> {
    resolve_home(std::env::var(HOME_ENV).ok())
}

fn resolve_home(env_value: Option<String>) -> Option<PathBuf> {
    match env_value {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => dirs::home_dir().map(|home| home.join(".bleprof")),
    }
}

/// Where user profiles are read from by default
pub fn default_profiles_path() -> Option<PathBuf> {
    bleprof_home().map(|home| home.join(PROFILES_FILE))
}

/// One profile as written in the profiles file
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileEntry {
    pub name: String,
    pub service: String,
    pub characteristic: String,
    #[serde(alias = "tx_characteristic")]
    pub write_characteristic: String,
    #[serde(default)]
    pub parser: ParserKind,
}

impl ProfileEntry {
    pub fn into_descriptor(self) -> ProfileDescriptor {
        ProfileDescriptor::new(
            self.name,
            self.service,
            self.characteristic,
            self.write_characteristic,
            self.parser.parse_fn(),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProfilesFile {
    #[serde(default)]
    profiles: BTreeMap<String, ProfileEntry>,
}

/// Load and validate the profiles in `path`, sorted by key.
///
/// A missing file is not an error, it just defines no profiles.
pub fn load_profiles(path: &Path) -> Result<Vec<(String, ProfileDescriptor)>, ConfigError> {
    if !path.exists() {
        log::debug!("no profiles file at {}", path.display());
        return Ok(Vec::new());
    }

    let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ProfilesFile = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut loaded = Vec::with_capacity(file.profiles.len());
    for (key, entry) in file.profiles {
        let descriptor = entry.into_descriptor();
        descriptor
            .validate()
            .map_err(|source| ConfigError::InvalidProfile { key: key.clone(), source })?;
        loaded.push((key, descriptor));
    }

    log::debug!("loaded {} profile(s) from {}", loaded.len(), path.display());
    Ok(loaded)
}

/// Register every profile in `path`. Returns how many were registered.
///
/// Nothing is registered if any entry is invalid. Call after the built-ins
/// so that a user profile can replace one.
pub fn register_from_file(registry: &mut ProfileRegistry, path: &Path) -> Result<usize, ConfigError> {
    let loaded = load_profiles(path)?;
    let count = loaded.len();
    for (key, descriptor) in loaded {
        registry.register(&key, descriptor);
    }
    Ok(count)
}
