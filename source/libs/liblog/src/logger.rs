// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Logger instance: one-time channel initialization plus the write/print/assert/event entry points
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests below; device-backed tests in `tests/`
//!
//! INVARIANTS:
//! - The dispatch target is chosen once (kernel or null) and never changes afterwards
//! - Concurrent first writers block on the same initialization; exactly one opens the devices
//! - Writes themselves take no lock

use std::borrow::Cow;
use std::fmt;

use once_cell::sync::OnceCell;

use crate::channel::LogId;
use crate::config::LogConfig;
use crate::error::Result;
use crate::format::{assert_message, LineBuf};
use crate::loggable;
use crate::priority::Priority;
use crate::record::{nul_terminated, EventRecord, EventType, TextRecord};
use crate::router::{self, Route};
use crate::writer::{self, LogWriter};

pub struct Logger {
    config: LogConfig,
    dispatch: OnceCell<Box<dyn LogWriter>>,
    device_status: OnceCell<bool>,
}

impl Logger {
    /// Creates a logger that opens its channels on first use.
    pub fn new(config: LogConfig) -> Self {
        Self { config, dispatch: OnceCell::new(), device_status: OnceCell::new() }
    }

    /// Creates a logger bound to an explicit writer; no devices are opened.
    pub fn with_writer(config: LogConfig, writer: Box<dyn LogWriter>) -> Self {
        Self { config, dispatch: OnceCell::with_value(writer), device_status: OnceCell::new() }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// `true` once the dispatch target has been chosen.
    pub fn is_initialized(&self) -> bool {
        self.dispatch.get().is_some()
    }

    /// Initializes if needed; `false` means every write will fail.
    pub fn is_available(&self) -> bool {
        self.writer().is_available()
    }

    fn writer(&self) -> &dyn LogWriter {
        &**self.dispatch.get_or_init(|| writer::open_channels(&self.config))
    }

    /// Writes a text record to the main channel (radio tags are rerouted).
    pub fn write(&self, prio: Priority, tag: &str, msg: &str) -> Result<usize> {
        self.write_text(router::route_default(tag.as_bytes()), prio, nul_terminated(msg.as_bytes()))
    }

    /// Writes a text record to `id` (radio tags are rerouted unless `id` is radio).
    pub fn buf_write(&self, id: LogId, prio: Priority, tag: &str, msg: &str) -> Result<usize> {
        self.write_text(router::route_explicit(id, tag.as_bytes()), prio, nul_terminated(msg.as_bytes()))
    }

    /// Formats into a bounded buffer, then behaves like [`Logger::write`].
    pub fn print(&self, prio: Priority, tag: &str, args: fmt::Arguments<'_>) -> Result<usize> {
        self.write_line(None, prio, tag, &LineBuf::format(args))
    }

    /// Formats into a bounded buffer, then behaves like [`Logger::buf_write`].
    pub fn buf_print(
        &self,
        id: LogId,
        prio: Priority,
        tag: &str,
        args: fmt::Arguments<'_>,
    ) -> Result<usize> {
        self.write_line(Some(id), prio, tag, &LineBuf::format(args))
    }

    /// Logs a fatal record describing a failed assertion and aborts the process.
    pub fn assert_fail(&self, cond: Option<&str>, tag: &str, args: Option<fmt::Arguments<'_>>) -> ! {
        let line = assert_message(cond, args);
        // The process goes down whether or not the record made it out.
        let _ = self.write_line(None, Priority::Fatal, tag, &line);
        std::process::abort()
    }

    /// Writes an untyped binary event.
    pub fn bwrite(&self, tag: i32, payload: &[u8]) -> Result<usize> {
        let rec = EventRecord::new(tag, payload);
        self.writer().write_segments(LogId::Events, &rec.segments())
    }

    /// Writes a binary event with a leading type byte (an `EventType` or a raw code).
    pub fn btwrite(&self, tag: i32, kind: impl Into<u8>, payload: &[u8]) -> Result<usize> {
        let rec = EventRecord::typed(tag, kind, payload);
        self.writer().write_segments(LogId::Events, &rec.segments())
    }

    pub fn write_event_int(&self, tag: i32, value: i32) -> Result<usize> {
        self.btwrite(tag, EventType::Int, &value.to_ne_bytes())
    }

    pub fn write_event_long(&self, tag: i32, value: i64) -> Result<usize> {
        self.btwrite(tag, EventType::Long, &value.to_ne_bytes())
    }

    /// Whether the main device exists and is writable; probed once.
    pub fn dev_available(&self) -> bool {
        *self.device_status.get_or_init(|| writer::main_device_writable(&self.config))
    }

    /// Checks `prio` against the `log.tag.*` properties of this logger's config.
    pub fn is_loggable(&self, prio: Priority, tag: Option<&str>) -> bool {
        loggable::is_loggable(&self.config, prio, tag, self.config.fallback())
    }

    /// Writes a preformatted line; `None` takes the default-channel routing.
    pub(crate) fn write_line(
        &self,
        channel: Option<LogId>,
        prio: Priority,
        tag: &str,
        line: &LineBuf,
    ) -> Result<usize> {
        let route = match channel {
            Some(id) => router::route_explicit(id, tag.as_bytes()),
            None => router::route_default(tag.as_bytes()),
        };
        self.write_text(route, prio, nul_terminated(line.as_bytes_with_nul()))
    }

    fn write_text(&self, route: Route<'_>, prio: Priority, msg: Cow<'_, [u8]>) -> Result<usize> {
        let rec = TextRecord::from_parts(prio, route.tag, msg);
        self.writer().write_segments(route.id, &rec.segments())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("device_dir", &self.config.device_dir)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
