//! Ignore pattern value object
//!
//! A single regular expression from settings (`file_ignores`). Any package
//! entry whose path relative to the work root matches is skipped entirely,
//! the way editor backups like `nginx.conf~` never reach a host.

use regex::Regex;
use std::path::Path;

/// Compiled `file_ignores` pattern
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    matcher: Option<Regex>,
}

impl Default for IgnorePattern {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePattern {
    /// A pattern that matches nothing.
    pub fn empty() -> Self {
        Self { matcher: None }
    }

    /// Compile a pattern. An empty string matches nothing.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        if pattern.is_empty() {
            return Ok(Self::empty());
        }
        Ok(Self {
            matcher: Some(Regex::new(pattern)?),
        })
    }

    /// Check if an entry should be skipped.
    ///
    /// `rel_path` is relative to the work root; the search is unanchored and
    /// runs against the `/`-separated form.
    pub fn is_ignored(&self, rel_path: &Path) -> bool {
        let Some(matcher) = &self.matcher else {
            return false;
        };
        let candidate = rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        matcher.is_match(&candidate)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.matcher.as_ref().map(Regex::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pattern_matches_nothing() {
        let patterns = IgnorePattern::empty();
        assert!(!patterns.is_ignored(Path::new("anything~")));
        assert!(patterns.is_empty());
        assert!(IgnorePattern::new("").unwrap().is_empty());
    }

    #[test]
    fn editor_backup_pattern() {
        let patterns = IgnorePattern::new(".*~$").unwrap();
        assert!(patterns.is_ignored(Path::new("etc/nginx/nginx.conf~")));
        assert!(!patterns.is_ignored(Path::new("etc/nginx/nginx.conf")));
    }

    #[test]
    fn pattern_is_unanchored_over_relative_path() {
        let patterns = IgnorePattern::new(r"\.svn").unwrap();
        assert!(patterns.is_ignored(Path::new("etc/.svn")));
        assert!(patterns.is_ignored(Path::new("etc/.svn/entries")));
        assert!(!patterns.is_ignored(Path::new("etc/svn")));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(IgnorePattern::new("(unclosed").is_err());
    }

    #[test]
    fn as_str_round_trips_source() {
        let patterns = IgnorePattern::new(r"\.swp$").unwrap();
        assert_eq!(patterns.as_str(), Some(r"\.swp$"));
    }
}
