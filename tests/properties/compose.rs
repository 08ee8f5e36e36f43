//! Property tests for block resolution and rendering.

use proptest::prelude::*;

use contextmark::domain::services::{
    dedupe_preserving_order, render, resolve, BlockSource, RenderOptions,
};

use crate::common::TestLibrary;

fn slug() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a/one".to_string()),
        Just("a/two".to_string()),
        Just("b/one".to_string()),
        Just("b/three".to_string()),
        Just("c/gone".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: dedupe keeps the first occurrence of each item, in order.
    #[test]
    fn property_dedupe_preserves_first_occurrence(items in proptest::collection::vec(slug(), 0..16)) {
        let deduped = dedupe_preserving_order(&items);

        let mut expected: Vec<String> = Vec::new();
        for item in &items {
            if !expected.contains(item) {
                expected.push(item.clone());
            }
        }
        prop_assert_eq!(deduped, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 24,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: rendering the same resolution twice is byte-identical.
    #[test]
    fn property_render_is_idempotent(
        items in proptest::collection::vec(slug(), 0..10),
        include_global in any::<bool>(),
    ) {
        let lib = TestLibrary::new();
        lib.write_block("a/one", "1.0.0", "## A1");
        lib.write_block("a/two", "1.0.0", "## A2\n\ntext");
        lib.write_block("b/one", "2.0.0", "## B1");
        lib.write_block("b/three", "0.1.0", "## B3");
        let store = lib.store();
        let options = RenderOptions { include_global };

        lib.write_profile("prop", &items.iter().map(String::as_str).collect::<Vec<_>>());
        let set = resolve(&BlockSource::Profile("prop".into()), &store).unwrap();
        let first = render(&set, &store, options).unwrap();
        let second = render(&set, &store, options).unwrap();

        prop_assert_eq!(&first.content, &second.content);
        prop_assert_eq!(first.rendered.len() + first.missing.len(), set.slugs.len());
        prop_assert_eq!(set.slugs, dedupe_preserving_order(&items));
    }
}
