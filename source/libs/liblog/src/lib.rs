// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Process-local client for the kernel log channels (main, radio, events, system)
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE:
//!   - Unit tests: per module (`router`, `record`, `format`, `writer`, `logger`, `bridge`, ...)
//!   - Integration: `source/libs/liblog/tests/` (device files in a tempdir, fallback matrix,
//!     byte layout, concurrent first use, fatal assert in a child process)
//!
//! PUBLIC API:
//!   - `write`/`buf_write`: text records (priority, tag, message)
//!   - `print`/`buf_print` + `log_print!`/`log_buf_print!`: bounded (1024 byte) formatting
//!   - `assert_fail` + `log_assert!`: fatal record, then abort
//!   - `bwrite`/`btwrite`/`write_event_*`: binary records on the events channel
//!   - `dev_available`/`is_loggable`: availability and per-tag threshold checks
//!   - `Logger`: explicit instance (custom config or writer)
//!   - `bridge::LogBridge`: backend for the `log` facade
//!
//! The free functions use one process-wide [`Logger`] configured from the environment
//! (`LIBLOG_CONFIG`, `LIBLOG_DEVICE_DIR`). Its channels are opened on the first write.

#![forbid(unsafe_code)]

pub mod bridge;
pub mod channel;
pub mod config;
pub mod error;
pub mod format;
pub mod host;
pub mod loggable;
pub mod logger;
pub mod priority;
pub mod record;
pub mod router;
pub mod writer;

use std::fmt;

use once_cell::sync::Lazy;

pub use bridge::{LogBridge, TagMode};
pub use channel::{LogId, LOG_ID_MAX};
pub use config::LogConfig;
pub use error::{Error, Result};
pub use format::LOG_BUF_SIZE;
pub use logger::Logger;
pub use priority::Priority;
pub use record::EventType;
pub use writer::{LogWriter, NullWriter};

static GLOBAL: Lazy<Logger> = Lazy::new(|| {
    let config = LogConfig::from_env().unwrap_or_else(|err| {
        log::warn!(target: "liblog::config", "{err}; using defaults");
        LogConfig::default()
    });
    Logger::new(config)
});

/// The process-wide logger behind the free functions.
pub fn logger() -> &'static Logger {
    &GLOBAL
}

pub fn write(prio: Priority, tag: &str, msg: &str) -> Result<usize> {
    GLOBAL.write(prio, tag, msg)
}

pub fn buf_write(id: LogId, prio: Priority, tag: &str, msg: &str) -> Result<usize> {
    GLOBAL.buf_write(id, prio, tag, msg)
}

pub fn print(prio: Priority, tag: &str, args: fmt::Arguments<'_>) -> Result<usize> {
    GLOBAL.print(prio, tag, args)
}

pub fn buf_print(id: LogId, prio: Priority, tag: &str, args: fmt::Arguments<'_>) -> Result<usize> {
    GLOBAL.buf_print(id, prio, tag, args)
}

pub fn assert_fail(cond: Option<&str>, tag: &str, args: Option<fmt::Arguments<'_>>) -> ! {
    GLOBAL.assert_fail(cond, tag, args)
}

pub fn bwrite(tag: i32, payload: &[u8]) -> Result<usize> {
    GLOBAL.bwrite(tag, payload)
}

pub fn btwrite(tag: i32, kind: impl Into<u8>, payload: &[u8]) -> Result<usize> {
    GLOBAL.btwrite(tag, kind, payload)
}

pub fn write_event_int(tag: i32, value: i32) -> Result<usize> {
    GLOBAL.write_event_int(tag, value)
}

pub fn write_event_long(tag: i32, value: i64) -> Result<usize> {
    GLOBAL.write_event_long(tag, value)
}

pub fn dev_available() -> bool {
    GLOBAL.dev_available()
}

pub fn is_loggable(prio: Priority, tag: Option<&str>) -> bool {
    GLOBAL.is_loggable(prio, tag)
}

/// Formats and writes a text record to the main channel.
///
/// ```no_run
/// use liblog::{log_print, Priority};
/// log_print!(Priority::Info, "netd", "link {} up", "eth0").ok();
/// ```
#[macro_export]
macro_rules! log_print {
    ($prio:expr, $tag:expr, $($arg:tt)+) => {
        $crate::print($prio, $tag, ::core::format_args!($($arg)+))
    };
}

/// Formats and writes a text record to an explicit channel.
#[macro_export]
macro_rules! log_buf_print {
    ($id:expr, $prio:expr, $tag:expr, $($arg:tt)+) => {
        $crate::buf_print($id, $prio, $tag, ::core::format_args!($($arg)+))
    };
}

/// Aborts with a fatal record when `cond` is false.
///
/// Without a message the record reads `Assertion failed: <cond>`.
#[macro_export]
macro_rules! log_assert {
    ($cond:expr, $tag:expr $(,)?) => {
        if !$cond {
            $crate::assert_fail(::core::option::Option::Some(::core::stringify!($cond)), $tag, ::core::option::Option::None)
        }
    };
    ($cond:expr, $tag:expr, $($arg:tt)+) => {
        if !$cond {
            $crate::assert_fail(
                ::core::option::Option::Some(::core::stringify!($cond)),
                $tag,
                ::core::option::Option::Some(::core::format_args!($($arg)+)),
            )
        }
    };
}
