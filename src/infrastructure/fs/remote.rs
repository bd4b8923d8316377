//! SSH Remote File System
//!
//! Implements the RemoteFileSystem port by running shell commands on the
//! host through the system `ssh` binary. Authentication, host keys and
//! connection reuse are left to the user's ssh configuration.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::domain::ports::{RemoteError, RemoteFileSystem, RemoteResult};
use crate::domain::value_objects::{Attributes, FileMode};

/// Probe output when the remote path is not a regular file
const MISSING: &str = "missing";

/// Remote file system over ssh
///
/// Every operation is one ssh invocation (two for a changed file: probe,
/// then upload).
#[derive(Debug, Clone)]
pub struct SshRemoteFs {
    /// SSH destination (user@host or host)
    destination: String,
}

/// What the host reported about an existing file
#[derive(Debug, Clone, PartialEq, Eq)]
struct RemoteState {
    digest: String,
    owner: String,
    group: String,
    mode: String,
}

impl RemoteState {
    /// Parse `<sha256 hex>\n<owner>:<group>:<octal mode>`, or `None` for "missing"
    fn parse(output: &str) -> RemoteResult<Option<Self>> {
        let mut lines = output.lines().map(str::trim).filter(|l| !l.is_empty());
        let first = lines.next().unwrap_or(MISSING);
        if first == MISSING {
            return Ok(None);
        }

        let digest = first
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        let stat = lines
            .next()
            .ok_or_else(|| RemoteError::Other(format!("unexpected probe output: {output}")))?;
        let mut fields = stat.splitn(3, ':');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(owner), Some(group), Some(mode)) => Ok(Some(Self {
                digest,
                owner: owner.to_string(),
                group: group.to_string(),
                mode: mode.to_string(),
            })),
            _ => Err(RemoteError::Other(format!(
                "unexpected stat output: {stat}"
            ))),
        }
    }

    /// `attrs` with every unset field taken from this file
    fn fill_unset(&self, attrs: &Attributes) -> Attributes {
        Attributes {
            owner: attrs.owner.clone().or_else(|| Some(self.owner.clone())),
            group: attrs.group.clone().or_else(|| Some(self.group.clone())),
            mode: attrs.mode.clone().or_else(|| {
                u32::from_str_radix(&self.mode, 8)
                    .ok()
                    .map(FileMode::from_bits)
            }),
        }
    }

    /// Whether every set field of `attrs` already holds on the host
    fn satisfies(&self, attrs: &Attributes) -> bool {
        attrs.owner.as_deref().is_none_or(|o| o == self.owner)
            && attrs.group.as_deref().is_none_or(|g| g == self.group)
            && attrs.mode.as_ref().is_none_or(|m| m.matches(&self.mode))
    }
}

impl SshRemoteFs {
    /// Create a new SshRemoteFs for the given SSH destination
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Get the SSH destination
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Run a command on the remote host via SSH
    fn run_command(&self, command: &str, input: Option<&[u8]>) -> RemoteResult<String> {
        trace!(destination = %self.destination, command, "ssh");

        let mut child = Command::new("ssh")
            .arg(&self.destination)
            .arg(command)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RemoteError::Connection(format!("failed to start ssh: {e}")))?;

        let written = match (input, child.stdin.take()) {
            (Some(bytes), Some(mut stdin)) => stdin.write_all(bytes),
            _ => Ok(()),
        };

        // Reap the child even if the write failed
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            // ssh itself exits 255 when it could not reach the host
            if output.status.code() == Some(255) {
                return Err(RemoteError::Connection(stderr.trim().to_string()));
            }
            return Err(RemoteError::CommandFailed {
                command: command.to_string(),
                stderr,
            });
        }

        written?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn probe(&self, quoted: &str) -> RemoteResult<Option<RemoteState>> {
        let script = format!(
            "if [ -f {p} ]; then sha256sum {p}; stat -c %U:%G:%a {p}; else echo {MISSING}; fi",
            p = quoted
        );
        RemoteState::parse(&self.run_command(&script, None)?)
    }
}

/// Quote a path for safe use in shell commands
fn quote_path(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', "'\\''"))
}

/// `chown`/`chgrp`/`chmod` for the set fields, in that order
fn attribute_commands(quoted: &str, attrs: &Attributes) -> Vec<String> {
    let mut commands = Vec::new();
    if let Some(owner) = &attrs.owner {
        commands.push(format!("chown {} {}", quote_path(Path::new(owner)), quoted));
    }
    if let Some(group) = &attrs.group {
        commands.push(format!("chgrp {} {}", quote_path(Path::new(group)), quoted));
    }
    if let Some(mode) = &attrs.mode {
        commands.push(format!("chmod {} {}", mode, quoted));
    }
    commands
}

fn content_digest(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}

impl RemoteFileSystem for SshRemoteFs {
    fn ensure_directory(&self, path: &Path, attrs: &Attributes) -> RemoteResult<()> {
        let p = quote_path(path);
        let mut commands = vec![format!("mkdir -p {}", p)];
        commands.extend(attribute_commands(&p, attrs));
        self.run_command(&commands.join(" && "), None)?;
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8], attrs: &Attributes) -> RemoteResult<bool> {
        let p = quote_path(path);
        let digest = content_digest(content);

        let state = self.probe(&p)?;
        let same_content = state.as_ref().is_some_and(|s| s.digest == digest);
        if let Some(state) = state.as_ref().filter(|_| same_content) {
            if state.satisfies(attrs) {
                debug!(path = %path.display(), "remote file up to date");
                return Ok(false);
            }
            let fixes = attribute_commands(&p, attrs);
            self.run_command(&fixes.join(" && "), None)?;
            return Ok(true);
        }

        // Upload to a sibling temp file, give it the final attributes, then
        // rename over the target. Unset fields keep what the old file had.
        let tmp = quote_path(&path.with_file_name(format!(
            ".{}.pantry-tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        )));
        self.run_command(&format!("cat > {}", tmp), Some(content))?;

        let target_attrs = match &state {
            Some(existing) => existing.fill_unset(attrs),
            None => attrs.clone(),
        };
        let mut commands = attribute_commands(&tmp, &target_attrs);
        commands.push(format!("mv -f {} {}", tmp, p));
        let script = format!(
            "{} || {{ rm -f {}; exit 1; }}",
            commands.join(" && "),
            tmp
        );
        self.run_command(&script, None)?;
        Ok(true)
    }

    fn delete_file(&self, path: &Path) -> RemoteResult<bool> {
        let p = quote_path(path);
        let script = format!(
            "if [ -e {p} ] || [ -L {p} ]; then rm -f {p} && echo 1; else echo 0; fi",
            p = p
        );
        let out = self.run_command(&script, None)?;
        Ok(out.trim() == "1")
    }
}
