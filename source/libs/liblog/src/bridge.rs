// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: `log` facade backend writing records into the kernel channels
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests below
//!
//! liblog reports its own initialization through `log` under the `liblog` target.
//! Those records are never forwarded, otherwise a failing first write would
//! re-enter channel initialization.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::channel::LogId;
use crate::format::LineBuf;
use crate::logger::Logger;
use crate::priority::Priority;

const INTERNAL_TARGET: &str = "liblog";

/// How the tag of a forwarded record is chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TagMode {
    /// The record target as-is.
    Target,
    /// First path segment of the target (`app::net::dns` logs as `app`).
    #[default]
    TargetRoot,
    /// Fixed tag for every record.
    Fixed(String),
}

pub struct LogBridge {
    logger: &'static Logger,
    tag: TagMode,
    channel: Option<LogId>,
    level: LevelFilter,
}

impl LogBridge {
    pub fn new(logger: &'static Logger) -> Self {
        Self { logger, tag: TagMode::default(), channel: None, level: LevelFilter::Info }
    }

    /// Bridge onto the process-wide logger.
    pub fn global() -> Self {
        Self::new(crate::logger())
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = TagMode::Fixed(tag.into());
        self
    }

    pub fn tag_mode(mut self, mode: TagMode) -> Self {
        self.tag = mode;
        self
    }

    /// Writes to `id` instead of the default (main) channel.
    pub fn channel(mut self, id: LogId) -> Self {
        self.channel = Some(id);
        self
    }

    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    fn tag_for<'a>(&'a self, target: &'a str) -> &'a str {
        match &self.tag {
            TagMode::Target => target,
            TagMode::TargetRoot => target.split("::").next().unwrap_or(target),
            TagMode::Fixed(tag) => tag.as_str(),
        }
    }

    /// Installs this bridge as the global `log` backend.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

/// Routes the `log` facade into the process-wide logger at `level`.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    LogBridge::global().level(level).init()
}

fn is_internal(target: &str) -> bool {
    target == INTERNAL_TARGET
        || target.strip_prefix(INTERNAL_TARGET).is_some_and(|rest| rest.starts_with("::"))
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level && !is_internal(metadata.target())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let prio = Priority::from(record.level());
        let tag = self.tag_for(record.target());
        let line = LineBuf::format(*record.args());
        // A logger has nowhere to report its own write failures.
        let _ = self.logger.write_line(self.channel, prio, tag, &line);
    }

    fn flush(&self) {}
}
