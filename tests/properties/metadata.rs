//! Property tests for metadata override parsing and inheritance.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use pantry::domain::services::{parse_metadata, MetadataResolver};
use pantry::Attributes;

fn name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,11}").unwrap()
}

fn mode() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(proptest::string::string_regex("[0-7]{3,4}").unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(contents in "(?s).{0,256}") {
        let _ = parse_metadata(Path::new("fck_metadata.txt"), &contents);
    }

    /// PROPERTY: every well-formed line becomes exactly one entry.
    #[test]
    fn property_well_formed_lines_all_parse(
        lines in proptest::collection::vec((name(), name(), name(), mode()), 0..8)
    ) {
        let contents: String = lines
            .iter()
            .map(|(path, owner, group, mode)| match mode {
                Some(m) => format!("{path}:{owner}:{group}:{m}\n"),
                None => format!("{path}:{owner}:{group}\n"),
            })
            .collect();

        let entries = parse_metadata(Path::new("fck_metadata.txt"), &contents).unwrap();

        prop_assert_eq!(entries.len(), lines.len());
        for (entry, (_, owner, group, _)) in entries.iter().zip(&lines) {
            prop_assert_eq!(entry.attrs.owner.as_deref(), Some(owner.as_str()));
            prop_assert_eq!(entry.attrs.group.as_deref(), Some(group.as_str()));
        }
    }

    /// PROPERTY: a `.` override reaches every descendant without its own entry.
    #[test]
    fn property_directory_override_is_inherited(
        base in proptest::collection::vec(name(), 0..3),
        below in proptest::collection::vec(name(), 1..5),
        owner in name(),
    ) {
        let dir: PathBuf = base.iter().collect();
        let mut resolver = MetadataResolver::new();
        resolver
            .ingest(&dir, Path::new("fck_metadata.txt"), &format!(".:{owner}:{owner}\n"), &[])
            .unwrap();

        let descendant = below.iter().fold(dir.clone(), |p, s| p.join(s));

        prop_assert_eq!(resolver.resolve(&descendant), Attributes::new(owner.clone(), owner, None));
    }
}
