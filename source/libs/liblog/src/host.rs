// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: In-process capture writer for host-based testing
//!
//! OWNERS: @runtime
//!
//! PUBLIC API:
//!   - struct MemoryWriter: records every vectored write per channel
//!   - MemoryWriter::records(): snapshot of the frames written to one channel
//!
//! Each write is stored as one flattened frame, so record boundaries are kept
//! even when several threads write concurrently.

use std::io::IoSlice;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::channel::{LogId, LOG_ID_MAX};
use crate::error::Result;
use crate::writer::LogWriter;

/// Writer that keeps every frame in memory, one list per channel.
#[derive(Clone, Default)]
pub struct MemoryWriter {
    channels: Arc<[Mutex<Vec<Vec<u8>>>; LOG_ID_MAX]>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames written to `id`, oldest first.
    pub fn records(&self, id: LogId) -> Vec<Vec<u8>> {
        self.channels[id.index()].lock().clone()
    }

    pub fn total(&self) -> usize {
        self.channels.iter().map(|ch| ch.lock().len()).sum()
    }

    pub fn clear(&self) {
        for ch in self.channels.iter() {
            ch.lock().clear();
        }
    }
}

impl LogWriter for MemoryWriter {
    fn write_segments(&self, id: LogId, segments: &[IoSlice<'_>]) -> Result<usize> {
        let len = segments.iter().map(|s| s.len()).sum();
        let mut frame = Vec::with_capacity(len);
        for seg in segments {
            frame.extend_from_slice(seg);
        }
        self.channels[id.index()].lock().push(frame);
        Ok(len)
    }
}
