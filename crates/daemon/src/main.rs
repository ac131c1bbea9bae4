// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! event-forwarder-gelf
//!
//! Watches cluster events and forwards fresh ones to Graylog as GELF.

use clap::Parser;
use efg_daemon::{install_signal_handler, startup, Config};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    // Set up logging
    let log_guard = setup_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting event-forwarder-gelf"
    );

    let (forwarder, feed) = match startup(&config).await {
        Ok(parts) => parts,
        Err(e) => {
            error!("failed to start: {}", e);
            drop(log_guard);
            return Err(e.into());
        }
    };

    if let Err(e) = install_signal_handler(forwarder.stop_handle()) {
        error!("{}", e);
        drop(log_guard);
        return Err(e.into());
    }

    let report = forwarder.run(feed).await;
    if let Err(e) = &report.close_result {
        warn!(error = %e, "sink did not close cleanly");
    }

    let code = if report.is_clean() {
        info!(reason = %report.reason, "stopped");
        0
    } else {
        warn!(reason = %report.reason, "stopped after failure");
        1
    };
    drop(log_guard);

    // A stdin read parked on the blocking pool would keep the runtime alive
    std::process::exit(code)
}

fn setup_logging(config: &Config) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    guard
}
