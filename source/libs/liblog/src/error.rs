// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Error type shared by every liblog entry point
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable

use std::io;

use thiserror::Error;

/// Result alias used throughout liblog.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by log writes and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    /// The channel devices could not be opened; the logger is in null mode.
    #[error("log channels unavailable")]
    Unavailable,
    /// A raw channel id outside of main/radio/events/system.
    #[error("invalid log channel id {0}")]
    InvalidChannel(u32),
    /// The vectored write failed with something other than `EINTR`.
    #[error("log write failed: {0}")]
    Io(#[from] io::Error),
    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(value: toml::de::Error) -> Self {
        Self::Config(value.to_string())
    }
}
