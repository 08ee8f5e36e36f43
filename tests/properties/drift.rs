//! Property tests for drift classification.

use proptest::prelude::*;

use contextmark::domain::entities::BlockReference;
use contextmark::domain::ports::ContentStore;
use contextmark::domain::services::{compute_drift, DriftStatus};

use crate::common::TestLibrary;

/// What the ledger says about one reference relative to the library
#[derive(Debug, Clone, Copy)]
enum Recorded {
    Matching,
    Stale,
    Deleted,
}

fn recorded() -> impl Strategy<Value = Recorded> {
    prop_oneof![
        Just(Recorded::Matching),
        Just(Recorded::Stale),
        Just(Recorded::Deleted),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every reference lands in exactly the expected bucket, and a
    /// second computation with no library change gives the same answer.
    #[test]
    fn property_drift_classifies_each_reference_once(
        entries in proptest::collection::vec((recorded(), "[a-z]{1,12}"), 1..8),
    ) {
        let lib = TestLibrary::new();
        let store = lib.store();

        let mut references = Vec::new();
        for (i, (kind, body)) in entries.iter().enumerate() {
            let slug = format!("prop/block-{}", i);
            let hash = match kind {
                Recorded::Deleted => "00000000".to_string(),
                _ => {
                    lib.write_block(&slug, "1.0.0", body);
                    let current = store.load_block(&slug).unwrap().hash.to_string();
                    match kind {
                        Recorded::Stale => "stale000".to_string(),
                        _ => current,
                    }
                }
            };
            references.push(BlockReference {
                name: slug,
                version: "1.0.0".to_string(),
                hash,
            });
        }

        let first = compute_drift(&references, &store).unwrap();
        let second = compute_drift(&references, &store).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), references.len());

        for ((kind, _), status) in entries.iter().zip(&first) {
            let expected = match kind {
                Recorded::Matching => DriftStatus::Current,
                Recorded::Stale => DriftStatus::Outdated,
                Recorded::Deleted => DriftStatus::Missing,
            };
            prop_assert_eq!(status.status, expected);
        }
    }
}
