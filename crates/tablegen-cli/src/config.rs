//! Layered configuration.
//!
//! Built-in defaults, then the `[generate]` table of `tablegen.toml`, then
//! environment variables and command-line flags (merged by clap, flags win).
//! Relative paths in the config file are resolved against the file's own
//! directory.

use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tablegen_build::{GeneratorConfig, paths::CratePaths};
use thiserror::Error as ThisError;

pub const DEFAULT_CONFIG_FILE: &str = "tablegen.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("generate.{key}: '{value}' must be a plain file name")]
    FileName { key: &'static str, value: String },

    #[error("generate.{key}: '{value}' is already used by {other}")]
    DuplicateFileName {
        key: &'static str,
        other: &'static str,
        value: String,
    },

    #[error("generate.core_crate: '{value}' is not a Rust path: {reason}")]
    CoreCrate { value: String, reason: String },
}

///
/// ConfigFile
///

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub generate: GenerateTable,

    #[serde(skip)]
    base_dir: PathBuf,
}

///
/// GenerateTable
///

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateTable {
    pub schema: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub records_file: Option<String>,
    pub models_file: Option<String>,
    pub migration_file: Option<String>,
    pub core_crate: Option<String>,
}

impl ConfigFile {
    /// Read the explicit config file, or `./tablegen.toml` if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::read(path)
                } else {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        tracing::debug!(path = %path.display(), "config loaded");

        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply this file over the defaults and the overrides over both.
    pub fn resolve(self, overrides: Overrides) -> Result<GeneratorConfig, ConfigError> {
        let mut config = GeneratorConfig::default();
        let table = self.generate;
        let base = |path: PathBuf| self.base_dir.join(path);

        if let Some(schema) = overrides.schema.or_else(|| table.schema.map(base)) {
            config.schema_path = schema;
        }
        if let Some(out_dir) = overrides.out_dir.or_else(|| table.out_dir.map(base)) {
            config.out_dir = out_dir;
        }
        for (key, value, slot) in [
            ("records_file", table.records_file, &mut config.records_file),
            ("models_file", table.models_file, &mut config.models_file),
            ("migration_file", table.migration_file, &mut config.migration_file),
        ] {
            if let Some(value) = value {
                *slot = file_name(key, value)?;
            }
        }
        distinct_file_names(&config)?;
        if let Some(value) = table.core_crate {
            config.paths = CratePaths::new(&value).map_err(|err| ConfigError::CoreCrate {
                reason: err.to_string(),
                value,
            })?;
        }

        Ok(config)
    }
}

///
/// Overrides
/// Values from the environment or the command line.
///

#[derive(Debug, Default)]
pub struct Overrides {
    pub schema: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

fn file_name(key: &'static str, value: String) -> Result<String, ConfigError> {
    let plain = !value.is_empty()
        && Path::new(&value).file_name().and_then(|n| n.to_str()) == Some(value.as_str());

    if plain {
        Ok(value)
    } else {
        Err(ConfigError::FileName { key, value })
    }
}

// Each artifact needs its own file; defaults count as taken.
fn distinct_file_names(config: &GeneratorConfig) -> Result<(), ConfigError> {
    let names = [
        ("records_file", &config.records_file),
        ("models_file", &config.models_file),
        ("migration_file", &config.migration_file),
    ];

    for (i, &(key, value)) in names.iter().enumerate() {
        if let Some(&(other, _)) = names[..i].iter().find(|(_, earlier)| *earlier == value) {
            return Err(ConfigError::DuplicateFileName {
                key,
                other,
                value: value.clone(),
            });
        }
    }

    Ok(())
}

///
/// TESTS
///
