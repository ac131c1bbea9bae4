// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line and environment configuration

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Forward cluster events to Graylog as GELF
#[derive(Debug, Clone, Parser)]
#[command(name = "event-forwarder-gelf", version, long_version = long_version())]
pub struct Config {
    /// Graylog TCP endpoint host
    #[arg(long, env = "GRAYLOG_HOST", value_parser = NonEmptyStringValueParser::new())]
    pub host: String,

    /// Graylog TCP endpoint port
    #[arg(long, env = "GRAYLOG_PORT")]
    pub port: u16,

    /// Name of this cluster
    #[arg(long, env = "CLUSTER", value_parser = NonEmptyStringValueParser::new())]
    pub cluster: String,

    /// Show verbose debug information (0-3)
    #[arg(short, long, env = "VERBOSE", default_value_t = 0)]
    pub verbose: u8,

    /// JSON-lines event feed to read; `-` reads standard input
    #[arg(long, env = "EVENTS_FILE", default_value = "-")]
    pub events: PathBuf,
}

/// `--version` text: release, then target platform
pub fn long_version() -> String {
    format!(
        "v{} {}/{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Where events are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Stdin,
    File(PathBuf),
}

impl Config {
    /// Default tracing filter for the configured verbosity.
    ///
    /// `RUST_LOG` takes precedence when set.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn feed(&self) -> FeedLocation {
        if self.events.as_os_str() == "-" {
            FeedLocation::Stdin
        } else {
            FeedLocation::File(self.events.clone())
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
