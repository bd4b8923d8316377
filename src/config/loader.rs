//! Settings loading
//!
//! Lookup order:
//! 1. Explicit `--settings` path
//! 2. `./pantry.toml`
//! 3. User config (`<config dir>/pantry/settings.toml`)
//! 4. Built-in defaults
//!
//! Environment variables (`PANTRY_*`) override whatever was loaded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{PantryError, PantryResult};

use super::types::Settings;
use super::ConfigWarning;

/// Project-local settings file name
pub const PROJECT_SETTINGS_FILE: &str = "pantry.toml";
/// Overrides `package_dir`
pub const ENV_PACKAGE_DIR: &str = "PANTRY_PACKAGE_DIR";
/// Overrides `file_ignores`
pub const ENV_FILE_IGNORES: &str = "PANTRY_FILE_IGNORES";

const SETTINGS_KEYS: &[&str] = &[
    "package_dir",
    "file_ignores",
    "template_suffix",
    "metadata_file",
    "delete_file",
    "inventory",
];

/// Load settings and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PantryResult<(Settings, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| PantryError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_with_warnings(path, &content, SETTINGS_KEYS).map_err(|message| PantryError::Config {
        file: path.to_path_buf(),
        message,
    })
}

/// Resolve settings through the lookup order, then apply environment
/// overrides and `~` expansion.
///
/// An explicit path that cannot be loaded is an error; the implicit
/// locations are only used if they exist.
pub fn load_settings(explicit: Option<&Path>) -> PantryResult<(Settings, Vec<ConfigWarning>)> {
    let (settings, warnings) = match explicit {
        Some(path) => load_with_warnings(path)?,
        None => match implicit_settings_path() {
            Some(path) => load_with_warnings(&path)?,
            None => (Settings::default(), Vec::new()),
        },
    };

    Ok((with_env_overrides(settings).expand_paths(), warnings))
}

fn implicit_settings_path() -> Option<PathBuf> {
    let project = PathBuf::from(PROJECT_SETTINGS_FILE);
    if project.is_file() {
        debug!(path = %project.display(), "using project settings");
        return Some(project);
    }

    let user = dirs::config_dir()?.join("pantry").join("settings.toml");
    if user.is_file() {
        debug!(path = %user.display(), "using user settings");
        return Some(user);
    }

    None
}

/// Apply environment variable overrides (PANTRY_* prefix)
pub fn with_env_overrides(mut settings: Settings) -> Settings {
    // PANTRY_PACKAGE_DIR
    if let Ok(dir) = std::env::var(ENV_PACKAGE_DIR) {
        if !dir.is_empty() {
            settings.package_dir = PathBuf::from(dir);
        }
    }

    // PANTRY_FILE_IGNORES (may be empty to disable ignoring)
    if let Ok(pattern) = std::env::var(ENV_FILE_IGNORES) {
        settings.file_ignores = pattern;
    }

    settings
}

/// Replace a leading `~` with the local user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };
    match (raw, dirs::home_dir()) {
        ("~", Some(home)) => home,
        (_, Some(home)) if raw.starts_with("~/") => home.join(&raw[2..]),
        _ => path.to_path_buf(),
    }
}

/// Deserialize TOML, reporting every key the target type did not consume.
pub(super) fn parse_with_warnings<T: DeserializeOwned>(
    path: &Path,
    content: &str,
    known_keys: &[&str],
) -> Result<(T, Vec<ConfigWarning>), String> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let value: T = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| e.to_string())?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key, known_keys),
                key: path_str,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((value, warnings))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &candidate in candidates {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_counts_edits() {
        assert_eq!(levenshtein("package_dir", "package_dir"), 0);
        assert_eq!(levenshtein("packge_dir", "package_dir"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn suggests_close_key_only() {
        assert_eq!(
            suggest_key("file_ignore", SETTINGS_KEYS),
            Some("file_ignores".to_string())
        );
        assert_eq!(suggest_key("colour", SETTINGS_KEYS), None);
    }

    #[test]
    fn line_numbers_are_one_based() {
        let content = "a = 1\nfile_ignore = 'x'\n";
        assert_eq!(find_line_number(content, "file_ignore"), Some(2));
        assert_eq!(find_line_number(content, "missing"), None);
    }

    #[test]
    fn tilde_expansion_only_touches_leading_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~/packages")), home.join("packages"));
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(
            expand_tilde(Path::new("/srv/~packages")),
            PathBuf::from("/srv/~packages")
        );
        assert_eq!(
            expand_tilde(Path::new("~other/packages")),
            PathBuf::from("~other/packages")
        );
    }
}
