//! Property-based tests for placeholder stripping

use jssnippets_core::strip_placeholders;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Text without `$` passes through unchanged.
    #[test]
    fn text_without_dollar_is_unchanged(text in "[a-zA-Z0-9 (){};:.,\\n]{0,40}") {
        prop_assert_eq!(strip_placeholders(&text), text);
    }

    /// A labeled tab stop reduces to its label.
    #[test]
    fn labeled_tab_stop_becomes_label(n in 0u32..100, label in "[a-zA-Z_][a-zA-Z0-9_ ]{0,10}") {
        let template = format!("${{{n}:{label}}}");
        prop_assert_eq!(strip_placeholders(&template), label);
    }

    /// A bare tab stop disappears.
    #[test]
    fn bare_tab_stop_is_removed(before in "[a-z ]{0,10}", n in 0u32..1000, after in "[a-z ;]{0,10}") {
        let template = format!("{before}${n}{after}");
        prop_assert_eq!(strip_placeholders(&template), format!("{before}{after}"));
    }

    /// No `$` followed by a digit survives stripping.
    #[test]
    fn no_bare_tab_stop_survives(template in "[a-z0-9${}:]{0,30}") {
        let stripped = strip_placeholders(&template);
        let bytes = stripped.as_bytes();
        for window in bytes.windows(2) {
            prop_assert!(!(window[0] == b'$' && window[1].is_ascii_digit()), "left {:?}", stripped);
        }
    }
}
