//! Ownership and permission metadata
//!
//! `Attributes` is the (owner, group, mode) triple attached to every remote
//! path. Any field may be unset, meaning the remote side keeps what it has.

use std::fmt;

/// A permission string such as `644` or `2755`
///
/// Always normalized to at least three octal digits without a leading zero,
/// so `0644` and `644` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileMode(String);

/// Rejected permission string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMode(pub String);

impl fmt::Display for InvalidMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "permission '{}' must be 3 or 4 octal digits",
            self.0
        )
    }
}

impl std::error::Error for InvalidMode {}

impl FileMode {
    /// Parse a 3 or 4 digit octal permission string
    pub fn parse(raw: &str) -> Result<Self, InvalidMode> {
        let trimmed = raw.trim();
        let valid_len = trimmed.len() == 3 || trimmed.len() == 4;
        if !valid_len || !trimmed.chars().all(|c| ('0'..='7').contains(&c)) {
            return Err(InvalidMode(raw.to_string()));
        }
        let bits = u32::from_str_radix(trimmed, 8).map_err(|_| InvalidMode(raw.to_string()))?;
        Ok(Self::from_bits(bits))
    }

    /// Build from raw mode bits, keeping only permission and special bits
    pub fn from_bits(bits: u32) -> Self {
        Self(format!("{:03o}", bits & 0o7777))
    }

    pub fn bits(&self) -> u32 {
        u32::from_str_radix(&self.0, 8).unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a mode as reported by the host (`stat -c %a`)
    pub fn matches(&self, reported: &str) -> bool {
        u32::from_str_radix(reported.trim(), 8)
            .map(|bits| bits & 0o7777 == self.bits())
            .unwrap_or(false)
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved (owner, group, mode) for one path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub owner: Option<String>,
    pub group: Option<String>,
    pub mode: Option<FileMode>,
}

impl Attributes {
    /// All fields unset
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn new(
        owner: impl Into<String>,
        group: impl Into<String>,
        mode: Option<FileMode>,
    ) -> Self {
        Self {
            owner: Some(owner.into()),
            group: Some(group.into()),
            mode,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.owner.is_none() && self.group.is_none() && self.mode.is_none()
    }

    /// Fill in the mode only if it is unset
    pub fn with_mode_fallback(mut self, fallback: Option<FileMode>) -> Self {
        if self.mode.is_none() {
            self.mode = fallback;
        }
        self
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.owner.as_deref().unwrap_or("-"),
            self.group.as_deref().unwrap_or("-"),
            self.mode.as_ref().map(FileMode::as_str).unwrap_or("-")
        )
    }
}
