// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: Channel open fallback matrix against device files in a tempdir
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE: 3 integration tests
//!
//! TEST_SCENARIOS:
//!   - every_device_subset(): all 16 present/missing combinations of the four devices
//!   - system_shares_main_descriptor(): system records land in `main` when `system` is missing
//!   - dispatch_is_sticky(): devices created after the first write are never picked up

use std::fs;
use std::path::Path;

use liblog::{Error, LogConfig, LogId, Logger, Priority};
use tempfile::tempdir;

fn create(dir: &Path, ids: &[LogId]) {
    for id in ids {
        fs::write(dir.join(id.device_name()), b"").expect("create device");
    }
}

fn read(dir: &Path, id: LogId) -> Vec<u8> {
    fs::read(dir.join(id.device_name())).unwrap_or_default()
}

#[test]
fn every_device_subset() {
    for mask in 0u8..16 {
        let dir = tempdir().expect("tempdir");
        let present: Vec<LogId> =
            LogId::ALL.iter().copied().filter(|id| mask & (1 << id.index()) != 0).collect();
        create(dir.path(), &present);

        let logger = Logger::new(LogConfig::with_device_dir(dir.path()));
        let core_open = [LogId::Main, LogId::Radio, LogId::Events].iter().all(|id| present.contains(id));
        let res = logger.write(Priority::Info, "t", "m");

        assert_eq!(logger.is_available(), core_open, "mask {mask:#06b}");
        assert_eq!(logger.dev_available(), present.contains(&LogId::Main), "mask {mask:#06b}");
        if core_open {
            assert_eq!(res.expect("write"), 5, "mask {mask:#06b}");
            assert_eq!(read(dir.path(), LogId::Main), b"\x04t\0m\0");
        } else {
            assert!(matches!(res, Err(Error::Unavailable)), "mask {mask:#06b}");
            assert!(matches!(logger.bwrite(1, b"x"), Err(Error::Unavailable)));
            for id in LogId::ALL {
                assert!(read(dir.path(), id).is_empty(), "mask {mask:#06b} wrote to {id}");
            }
        }
    }
}

#[test]
fn system_shares_main_descriptor() {
    let dir = tempdir().expect("tempdir");
    create(dir.path(), &[LogId::Main, LogId::Radio, LogId::Events]);
    let logger = Logger::new(LogConfig::with_device_dir(dir.path()));

    logger.write(Priority::Info, "a", "1").expect("main");
    logger.buf_write(LogId::System, Priority::Warn, "b", "2").expect("system");

    assert_eq!(read(dir.path(), LogId::Main), b"\x04a\x001\0\x05b\x002\0");
    assert!(!dir.path().join("system").exists());
}

#[test]
fn dispatch_is_sticky() {
    let dir = tempdir().expect("tempdir");
    let logger = Logger::new(LogConfig::with_device_dir(dir.path()));
    assert!(logger.write(Priority::Info, "t", "early").is_err());

    create(dir.path(), &LogId::ALL);
    assert!(matches!(logger.write(Priority::Info, "t", "late"), Err(Error::Unavailable)));
    assert!(read(dir.path(), LogId::Main).is_empty());

    // A fresh logger sees the new devices.
    let fresh = Logger::new(LogConfig::with_device_dir(dir.path()));
    assert!(fresh.write(Priority::Info, "t", "late").is_ok());
}
