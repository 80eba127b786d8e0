// Repository coordinates from git remotes

use crate::errors::{ProtectError, Result};
use regex::Regex;
use std::fmt;
use std::process::Command;

pub const DEFAULT_REMOTE: &str = "origin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
}

impl RepoCoordinates {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Extract `(owner, repo)` from a remote url
///
/// Accepts `https://<host>/<owner>/<repo>`, `git@<host>:<owner>/<repo>` and
/// `ssh://git@<host>/<owner>/<repo>`, each with an optional `.git` suffix.
pub fn parse_remote_url(url: &str) -> Option<RepoCoordinates> {
    let patterns = [
        r"^https?://(?:[^@/]+@)?[^/]+/(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
        r"^ssh://(?:[^@/]+@)?[^/:]+(?::\d+)?/(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
        r"^[^@/:]+@[^:/]+:(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
    ];

    let url = url.trim();
    for pattern in patterns {
        let re = Regex::new(pattern).ok()?;
        if let Some(caps) = re.captures(url) {
            let owner = caps.name("owner")?.as_str();
            let repo = caps.name("repo")?.as_str();
            return Some(RepoCoordinates::new(owner, repo));
        }
    }
    None
}

/// Where the remote url of the working copy comes from
pub trait RemoteLookup {
    fn remote_url(&self, remote: &str) -> Result<String>;
}

/// Asks the `git` binary for the remote url
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }
}

impl RemoteLookup for GitCli {
    fn remote_url(&self, remote: &str) -> Result<String> {
        log::debug!("Running git remote get-url {}", remote);

        let output = Command::new("git")
            .args(["remote", "get-url", remote])
            .output()
            .map_err(|e| ProtectError::Git(format!("Failed to execute git command: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProtectError::Git(stderr.trim().to_string()));
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if url.is_empty() {
            return Err(ProtectError::Git(format!("remote '{}' has no url", remote)));
        }
        log::debug!("Remote {} points to {}", remote, url);
        Ok(url)
    }
}

/// Use the configured coordinates, or fall back to the remote url when either
/// part is missing.
pub fn resolve_coordinates(
    owner: Option<&str>,
    repo: Option<&str>,
    lookup: &impl RemoteLookup,
) -> Result<RepoCoordinates> {
    if let (Some(owner), Some(repo)) = (owner, repo) {
        return Ok(RepoCoordinates::new(owner, repo));
    }

    crate::output::info("Auto-detecting repository from git remote...");
    let url = lookup.remote_url(DEFAULT_REMOTE).map_err(|e| {
        log::debug!("Remote lookup failed: {}", e);
        ProtectError::UnresolvedRepository
    })?;

    parse_remote_url(&url).ok_or_else(|| {
        log::debug!("Unrecognized remote url: {}", url);
        ProtectError::UnresolvedRepository
    })
}

#[cfg(test)]
pub struct MockRemote {
    pub url: Option<String>,
    pub lookups: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockRemote {
    pub fn new(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            lookups: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            url: None,
            lookups: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn get_lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl RemoteLookup for MockRemote {
    fn remote_url(&self, remote: &str) -> Result<String> {
        self.lookups.lock().unwrap().push(remote.to_string());
        self.url
            .clone()
            .ok_or_else(|| ProtectError::Git(format!("No such remote '{}'", remote)))
    }
}
