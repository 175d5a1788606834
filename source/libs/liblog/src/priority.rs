// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Record priorities as transmitted in the first byte of a text record
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable

use core::fmt;

/// Log priority, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Priority {
    Unknown = 0,
    Default = 1,
    Verbose = 2,
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
    Fatal = 7,
    Silent = 8,
}

impl Priority {
    pub const fn from_u8(value: u8) -> Option<Priority> {
        Some(match value {
            0 => Priority::Unknown,
            1 => Priority::Default,
            2 => Priority::Verbose,
            3 => Priority::Debug,
            4 => Priority::Info,
            5 => Priority::Warn,
            6 => Priority::Error,
            7 => Priority::Fatal,
            8 => Priority::Silent,
            _ => return None,
        })
    }

    /// Maps the leading letter of a `log.tag.*` property value.
    ///
    /// Only the six letters understood by the property lookup are accepted.
    pub const fn from_property_char(c: u8) -> Option<Priority> {
        match c {
            b'E' => Some(Priority::Error),
            b'W' => Some(Priority::Warn),
            b'I' => Some(Priority::Info),
            b'D' => Some(Priority::Debug),
            b'V' => Some(Priority::Verbose),
            b'S' => Some(Priority::Silent),
            _ => None,
        }
    }

    /// Parses the single-letter priority used by the `log` tool (case-insensitive).
    pub fn from_letter(c: char) -> Option<Priority> {
        match c.to_ascii_lowercase() {
            'v' => Some(Priority::Verbose),
            'd' => Some(Priority::Debug),
            'i' => Some(Priority::Info),
            'w' => Some(Priority::Warn),
            'e' => Some(Priority::Error),
            'f' => Some(Priority::Fatal),
            's' => Some(Priority::Silent),
            _ => None,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Priority::Unknown => '?',
            Priority::Default | Priority::Debug => 'D',
            Priority::Verbose => 'V',
            Priority::Info => 'I',
            Priority::Warn => 'W',
            Priority::Error => 'E',
            Priority::Fatal => 'F',
            Priority::Silent => 'S',
        }
    }
}

impl From<log::Level> for Priority {
    fn from(level: log::Level) -> Priority {
        match level {
            log::Level::Error => Priority::Error,
            log::Level::Warn => Priority::Warn,
            log::Level::Info => Priority::Info,
            log::Level::Debug => Priority::Debug,
            log::Level::Trace => Priority::Verbose,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_stable() {
        assert_eq!(Priority::Verbose as u8, 2);
        assert_eq!(Priority::Fatal as u8, 7);
        for v in 0..=8u8 {
            assert_eq!(Priority::from_u8(v).map(|p| p as u8), Some(v));
        }
        assert_eq!(Priority::from_u8(9), None);
    }

    #[test]
    fn property_letters() {
        assert_eq!(Priority::from_property_char(b'W'), Some(Priority::Warn));
        assert_eq!(Priority::from_property_char(b'S'), Some(Priority::Silent));
        assert_eq!(Priority::from_property_char(b'F'), None);
        assert_eq!(Priority::from_property_char(b'w'), None);
    }

    #[test]
    fn trace_maps_to_verbose() {
        assert_eq!(Priority::from(log::Level::Trace), Priority::Verbose);
        assert_eq!(Priority::from(log::Level::Error), Priority::Error);
    }
}
