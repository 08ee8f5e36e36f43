//! Property tests for block fingerprints.

use proptest::prelude::*;

use contextmark::Fingerprint;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the same bytes always give the same fixed-width fingerprint.
    #[test]
    fn property_fingerprint_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let first = Fingerprint::of(&bytes);
        let second = Fingerprint::of(&bytes);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.as_str().len(), Fingerprint::WIDTH);
        prop_assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// PROPERTY: changing any single byte changes the fingerprint.
    #[test]
    fn property_single_byte_change_changes_fingerprint(
        bytes in proptest::collection::vec(any::<u8>(), 1..512),
        index in any::<prop::sample::Index>(),
        delta in 1u8..=255,
    ) {
        let mut edited = bytes.clone();
        let i = index.index(edited.len());
        edited[i] = edited[i].wrapping_add(delta);

        prop_assert_ne!(Fingerprint::of(&bytes), Fingerprint::of(&edited));
    }

    /// PROPERTY: CRLF and LF versions of the same text are distinct.
    #[test]
    fn property_line_endings_are_significant(lines in proptest::collection::vec("[a-z ]{1,20}", 2..8)) {
        let lf = lines.join("\n");
        let crlf = lines.join("\r\n");
        prop_assert_ne!(Fingerprint::of(lf.as_bytes()), Fingerprint::of(crlf.as_bytes()));
    }
}
