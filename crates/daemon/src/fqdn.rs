// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fully qualified name of the local host, used as the GELF `host` field

use std::path::Path;
use thiserror::Error;

const HOSTS_FILE: &str = "/etc/hosts";

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read hostname: {0}")]
    Hostname(#[from] nix::Error),
    #[error("hostname is not valid UTF-8")]
    NotUtf8,
}

/// Resolve the fully qualified domain name of this machine.
///
/// A dotted kernel hostname is returned as-is. Otherwise the hosts file is
/// searched for a qualified alias of the hostname, falling back to the bare
/// hostname.
pub fn resolve_fqdn() -> Result<String, HostError> {
    let hostname = nix::unistd::gethostname()?
        .into_string()
        .map_err(|_| HostError::NotUtf8)?;
    let hosts = read_hosts(Path::new(HOSTS_FILE));
    Ok(qualify(&hostname, &hosts))
}

fn read_hosts(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "hosts file unavailable");
            String::new()
        }
    }
}

/// Qualify `hostname` using hosts-file contents.
///
/// The trailing root dot is always stripped.
pub fn qualify(hostname: &str, hosts: &str) -> String {
    let hostname = hostname.trim_end_matches('.');
    if hostname.contains('.') || hostname.is_empty() {
        return hostname.to_string();
    }

    let prefix = format!("{}.", hostname);
    hosts
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        // First field is the address
        .flat_map(|line| line.split_whitespace().skip(1))
        .map(|name| name.trim_end_matches('.'))
        .find(|name| name.starts_with(&prefix))
        .map(str::to_string)
        .unwrap_or_else(|| hostname.to_string())
}

#[cfg(test)]
#[path = "fqdn_tests.rs"]
mod tests;
