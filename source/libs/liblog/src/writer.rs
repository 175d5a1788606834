// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Dispatch targets for records: kernel channel writer and null writer
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests below; fallback matrix in `tests/channel_fallback.rs`
//!
//! INVARIANTS:
//! - main, radio and events must all open, otherwise every descriptor is closed
//!   and the null writer is used
//! - system degrades on its own by sharing the main descriptor
//! - `EINTR` is retried; any other write error is returned to the caller

use std::fs::{File, OpenOptions};
use std::io::{self, IoSlice, Write};

use log::{debug, warn};

use crate::channel::LogId;
use crate::config::LogConfig;
use crate::error::{Error, Result};

/// Destination for encoded record segments.
pub trait LogWriter: Send + Sync {
    /// Writes all segments of one record in a single vectored call.
    fn write_segments(&self, id: LogId, segments: &[IoSlice<'_>]) -> Result<usize>;

    /// `false` for the null writer.
    fn is_available(&self) -> bool {
        true
    }
}

/// Writer used when the channel devices could not be opened.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWriter;

impl LogWriter for NullWriter {
    fn write_segments(&self, _id: LogId, _segments: &[IoSlice<'_>]) -> Result<usize> {
        Err(Error::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Open descriptors for the four kernel channels.
#[derive(Debug)]
pub struct KernelWriter {
    main: File,
    radio: File,
    events: File,
    // `None` when the system device is missing; writes go to `main`.
    system: Option<File>,
}

impl KernelWriter {
    fn file(&self, id: LogId) -> &File {
        match id {
            LogId::Main => &self.main,
            LogId::Radio => &self.radio,
            LogId::Events => &self.events,
            LogId::System => self.system.as_ref().unwrap_or(&self.main),
        }
    }
}

impl LogWriter for KernelWriter {
    fn write_segments(&self, id: LogId, segments: &[IoSlice<'_>]) -> Result<usize> {
        write_retrying(self.file(id), segments)
    }
}

/// Vectored write, retried while interrupted.
pub(crate) fn write_retrying<W: Write>(mut out: W, segments: &[IoSlice<'_>]) -> Result<usize> {
    loop {
        match out.write_vectored(segments) {
            Ok(n) => return Ok(n),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::Io(err)),
        }
    }
}

fn open_channel(config: &LogConfig, id: LogId) -> io::Result<File> {
    // std opens with O_CLOEXEC.
    OpenOptions::new().write(true).open(config.device_path(id))
}

/// Opens all channels and picks the dispatch target.
pub fn open_channels(config: &LogConfig) -> Box<dyn LogWriter> {
    let main = open_channel(config, LogId::Main);
    let radio = open_channel(config, LogId::Radio);
    let events = open_channel(config, LogId::Events);
    let system = open_channel(config, LogId::System);

    match (main, radio, events) {
        (Ok(main), Ok(radio), Ok(events)) => {
            let system = match system {
                Ok(file) => Some(file),
                Err(err) => {
                    debug!(target: "liblog::init", "system channel unavailable ({err}); sharing main");
                    None
                }
            };
            debug!(target: "liblog::init", "log channels open in {}", config.device_dir.display());
            Box::new(KernelWriter { main, radio, events, system })
        }
        (main, radio, events) => {
            for (id, res) in [(LogId::Main, &main), (LogId::Radio, &radio), (LogId::Events, &events)] {
                if let Err(err) = res {
                    warn!(target: "liblog::init", "cannot open {} channel: {err}", id);
                }
            }
            // Remaining descriptors are closed on drop.
            Box::new(NullWriter)
        }
    }
}

/// Whether the main device is writable.
pub fn main_device_writable(config: &LogConfig) -> bool {
    open_channel(config, LogId::Main).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn make_devices(dir: &std::path::Path, ids: &[LogId]) {
        for id in ids {
            fs::write(dir.join(id.device_name()), b"").expect("create device");
        }
    }

    #[test]
    fn null_writer_fails_without_side_effects() {
        let err = NullWriter.write_segments(LogId::Main, &[IoSlice::new(b"x")]).unwrap_err();
        assert!(matches!(err, Error::Unavailable));
        assert!(!NullWriter.is_available());
    }

    #[test]
    fn all_channels_open() {
        let dir = tempdir().expect("tempdir");
        make_devices(dir.path(), &LogId::ALL);
        let writer = open_channels(&LogConfig::with_device_dir(dir.path()));
        assert!(writer.is_available());
        let n = writer.write_segments(LogId::System, &[IoSlice::new(b"ab"), IoSlice::new(b"c")]).unwrap();
        assert_eq!(n, 3);
        assert_eq!(fs::read(dir.path().join("system")).unwrap(), b"abc");
    }

    #[test]
    fn missing_events_falls_back_to_null() {
        let dir = tempdir().expect("tempdir");
        make_devices(dir.path(), &[LogId::Main, LogId::Radio, LogId::System]);
        let writer = open_channels(&LogConfig::with_device_dir(dir.path()));
        assert!(!writer.is_available());
        assert!(writer.write_segments(LogId::Main, &[IoSlice::new(b"x")]).is_err());
        assert!(fs::read(dir.path().join("main")).unwrap().is_empty());
    }

    struct Flaky {
        interrupts: usize,
        written: Vec<u8>,
    }

    impl Write for Flaky {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.write_vectored(&[IoSlice::new(buf)])
        }

        fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
            if self.interrupts > 0 {
                self.interrupts -= 1;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            for buf in bufs {
                self.written.extend_from_slice(buf);
            }
            Ok(self.written.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn interrupted_writes_are_retried() {
        let mut out = Flaky { interrupts: 3, written: Vec::new() };
        let n = write_retrying(&mut out, &[IoSlice::new(b"\x04"), IoSlice::new(b"t\0")]).unwrap();
        assert_eq!(n, 3);
        assert_eq!(out.interrupts, 0);
        assert_eq!(out.written, b"\x04t\0");
    }

    #[test]
    fn other_errors_propagate() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let err = write_retrying(Broken, &[IoSlice::new(b"x")]).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::PermissionDenied));
    }

    #[test]
    fn main_device_probe() {
        let dir = tempdir().expect("tempdir");
        let config = LogConfig::with_device_dir(dir.path());
        assert!(!main_device_writable(&config));
        make_devices(dir.path(), &[LogId::Main]);
        assert!(main_device_writable(&config));
    }
}
