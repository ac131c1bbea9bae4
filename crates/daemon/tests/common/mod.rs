// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared utilities for forwarder integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use chrono::{DateTime, Utc};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::process::{Child, ChildStdin, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

const ENV_VARS: [&str; 6] = [
    "GRAYLOG_HOST",
    "GRAYLOG_PORT",
    "CLUSTER",
    "VERBOSE",
    "EVENTS_FILE",
    "RUST_LOG",
];

/// Forwarder command with configuration variables cleared
pub fn forwarder() -> Command {
    let mut cmd = Command::cargo_bin("event-forwarder-gelf").expect("binary should build");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// A one-connection TCP endpoint standing in for Graylog
pub struct GraylogStub {
    pub port: u16,
    reader: JoinHandle<Vec<u8>>,
}

impl GraylogStub {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub");
        let port = listener.local_addr().expect("Failed to read address").port();
        let reader = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("Failed to accept");
            let mut received = Vec::new();
            stream
                .read_to_end(&mut received)
                .expect("Failed to read frames");
            received
        });
        Self { port, reader }
    }

    /// Wait for the forwarder to close its connection and decode every frame
    pub fn frames(self) -> Vec<serde_json::Value> {
        let received = self.reader.join().expect("stub thread panicked");
        received
            .split(|b| *b == 0)
            .filter(|frame| !frame.is_empty())
            .map(|frame| serde_json::from_slice(frame).expect("frame should be JSON"))
            .collect()
    }
}

/// Port with nothing listening on it
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("Failed to read address").port();
    drop(listener);
    port
}

/// Port whose listener accepts one connection and immediately hangs up
pub fn hang_up_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("Failed to read address").port();
    std::thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            drop(stream);
        }
    });
    port
}

/// A forwarder process whose stdin stays open until dropped
pub struct RunningForwarder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: mpsc::Receiver<String>,
}

impl RunningForwarder {
    #[allow(deprecated)]
    pub fn spawn(port: u16) -> Self {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("event-forwarder-gelf"));
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        let mut child = cmd
            .args(["--host", "127.0.0.1", "--cluster", "prod"])
            .args(["--port", &port.to_string()])
            .stdin(Stdio::piped())
            .stderr(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .expect("Failed to spawn forwarder");

        let stdin = child.stdin.take();
        let stderr = child.stderr.take().expect("stderr should be piped");
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self {
            child,
            stdin,
            stderr: rx,
        }
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Block until a log line containing `needle` appears
    pub fn wait_for_log(&self, needle: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while let Some(left) = deadline.checked_duration_since(Instant::now()) {
            match self.stderr.recv_timeout(left) {
                Ok(line) if line.contains(needle) => return true,
                Ok(_) => continue,
                Err(_) => return false,
            }
        }
        false
    }

    /// Write one line to the forwarder's stdin; false once the pipe is gone
    pub fn feed(&mut self, line: &str) -> bool {
        match self.stdin.as_mut() {
            Some(stdin) => writeln!(stdin, "{}", line).and_then(|_| stdin.flush()).is_ok(),
            None => false,
        }
    }

    /// Poll for exit without closing stdin
    pub fn wait_exit(&mut self, timeout: Duration) -> Option<ExitStatus> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Some(status) = self.child.try_wait().expect("Failed to poll child") {
                return Some(status);
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        None
    }
}

impl Drop for RunningForwarder {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// One event record as a JSON line
pub fn event_line(name: &str, created: DateTime<Utc>, count: i32) -> String {
    serde_json::json!({
        "metadata": {
            "name": name,
            "namespace": "shop",
            "creationTimestamp": created.to_rfc3339(),
        },
        "involvedObject": { "kind": "Pod", "namespace": "shop", "name": "web-1" },
        "reason": "Scheduled",
        "message": format!("{} happened", name),
        "source": { "component": "scheduler", "host": "node-1" },
        "count": count,
        "type": "Normal",
    })
    .to_string()
}
