//! Property tests for mirror diff, push and pull.

use std::collections::BTreeMap;
use std::path::Path;

use proptest::prelude::*;

use contextmark::application::{MirrorScope, MirrorSync, TrackedSet};

/// Relative paths a tracked set can contain
fn tracked_path() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("CLAUDE.md".to_string()),
        "[a-c]{1,2}".prop_map(|name| format!(".claude/skills/{}.md", name)),
        "[a-c]{1,2}".prop_map(|name| format!(".claude/commands/{}.md", name)),
    ]
}

fn side() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map(tracked_path(), "[a-z\n]{0,12}", 0..6)
}

fn write_side(root: &Path, files: &BTreeMap<String, String>) {
    for (relative, content) in files {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

fn tracked(root: &Path) -> TrackedSet {
    TrackedSet {
        local_root: root.join("local"),
        library_root: root.join("library"),
        files: vec!["CLAUDE.md".to_string()],
        dirs: vec![".claude".to_string()],
        scope: MirrorScope::Project {
            name: "prop".to_string(),
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: swapping sides swaps localOnly and libraryOnly and keeps the rest.
    #[test]
    fn property_diff_is_symmetric(local in side(), library in side()) {
        let dir = tempfile::tempdir().unwrap();
        let set = tracked(dir.path());
        write_side(&set.local_root, &local);
        write_side(&set.library_root, &library);

        let sync = MirrorSync::new();
        let forward = sync.diff(&set).unwrap();
        let backward = sync.diff(&set.swapped()).unwrap();

        prop_assert_eq!(&forward.local_only, &backward.library_only);
        prop_assert_eq!(&forward.library_only, &backward.local_only);
        prop_assert_eq!(&forward.different, &backward.different);
        prop_assert_eq!(&forward.identical, &backward.identical);
        prop_assert_eq!(forward.has_diff, backward.has_diff);
    }

    /// PROPERTY: after a push, nothing that existed locally differs.
    #[test]
    fn property_push_then_diff_converges(local in side(), library in side()) {
        let dir = tempfile::tempdir().unwrap();
        let set = tracked(dir.path());
        write_side(&set.local_root, &local);
        write_side(&set.library_root, &library);

        let sync = MirrorSync::new();
        sync.push(&set).unwrap();
        let diff = sync.diff(&set).unwrap();

        for path in local.keys() {
            prop_assert!(diff.identical.contains(path), "{} not identical after push", path);
        }
        prop_assert!(diff.different.is_empty());
        prop_assert!(diff.local_only.is_empty());
    }

    /// PROPERTY: after a pull, every library file is mirrored locally.
    #[test]
    fn property_pull_then_diff_converges(local in side(), library in side()) {
        let dir = tempfile::tempdir().unwrap();
        let set = tracked(dir.path());
        write_side(&set.local_root, &local);
        write_side(&set.library_root, &library);
        std::fs::create_dir_all(&set.library_root).unwrap();

        let sync = MirrorSync::new();
        let result = sync.pull(&set).unwrap();
        prop_assert!(result.success);
        let diff = sync.diff(&set).unwrap();

        for path in library.keys() {
            prop_assert!(diff.identical.contains(path), "{} not identical after pull", path);
        }
        prop_assert!(diff.different.is_empty());
        prop_assert!(diff.library_only.is_empty());
    }
}
