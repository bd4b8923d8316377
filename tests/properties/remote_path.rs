//! Property tests for local-to-remote path mapping.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use pantry::domain::value_objects::{FileKind, IgnorePattern, RemotePath};

const SUFFIX: &str = ".tmplt";

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,15}")
        .unwrap()
        .prop_filter("no dot-only segments", |s| s != "." && s != "..")
}

fn relative_path() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(segment(), 1..=5)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a plain file maps to `/` + its path relative to the work root.
    #[test]
    fn property_plain_file_mirrors_relative_path(
        segments in relative_path()
            .prop_filter("not a template", |s| !s.last().unwrap().ends_with(SUFFIX))
    ) {
        let relative: PathBuf = segments.iter().collect();
        let work_root = Path::new("/packages/pkg");

        let remote = RemotePath::mirror(work_root, &work_root.join(&relative), SUFFIX).unwrap();

        let expected = Path::new("/").join(&relative);
        prop_assert_eq!(remote.as_path(), expected.as_path());
    }

    /// PROPERTY: a template maps to the same path with exactly one suffix removed.
    #[test]
    fn property_template_strips_one_suffix(
        segments in relative_path(),
        doubled in any::<bool>()
    ) {
        let mut segments = segments;
        let base = segments.pop().unwrap();
        let remote_name = if doubled { format!("{base}{SUFFIX}") } else { base };
        segments.push(format!("{remote_name}{SUFFIX}"));
        let relative: PathBuf = segments.iter().collect();

        let remote = RemotePath::for_file(&relative, FileKind::Template, SUFFIX);

        let local = Path::new("/").join(&relative);
        prop_assert_eq!(remote.as_path().file_name().unwrap().to_str().unwrap(), remote_name.as_str());
        prop_assert_eq!(remote.as_path().parent(), local.parent());
    }

    /// PROPERTY: classification never panics and only the suffix makes a template.
    #[test]
    fn property_classify_matches_suffix(name in ".{0,32}") {
        let kind = FileKind::classify(&name, SUFFIX);
        let expected = name.len() > SUFFIX.len() && name.ends_with(SUFFIX);
        prop_assert_eq!(kind == FileKind::Template, expected);
    }

    /// PROPERTY: an empty ignore pattern never ignores anything.
    #[test]
    fn property_empty_pattern_ignores_nothing(segments in relative_path()) {
        let relative: PathBuf = segments.iter().collect();
        prop_assert!(!IgnorePattern::empty().is_ignored(&relative));
        prop_assert!(!IgnorePattern::new("").unwrap().is_ignored(&relative));
    }

    /// PROPERTY: the backup-file pattern ignores exactly names ending in `~`.
    #[test]
    fn property_backup_pattern(segments in relative_path(), backup in any::<bool>()) {
        let mut segments = segments;
        if backup {
            segments.last_mut().unwrap().push('~');
        }
        let relative: PathBuf = segments.iter().collect();

        let pattern = IgnorePattern::new(".*~$").unwrap();

        prop_assert_eq!(pattern.is_ignored(&relative), backup);
    }
}
