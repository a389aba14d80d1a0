//! Property-based tests for palette command registration

use std::collections::HashSet;
use std::sync::Arc;

use jssnippets_core::{MemoryHost, PaletteRegistrar, SnippetInserter};
use proptest::prelude::*;

use super::arb_snippets;

fn registrar(host: &Arc<MemoryHost>) -> PaletteRegistrar {
    let inserter = SnippetInserter::new(host.clone(), host.clone(), 5000);
    PaletteRegistrar::new(host.clone(), inserter)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every snippet with a non-empty prefix and code yields exactly one command.
    #[test]
    fn one_command_per_usable_snippet(snippets in arb_snippets()) {
        let host = MemoryHost::new();
        let names = registrar(&host).register(&snippets);

        let usable = snippets.iter().filter(|s| s.is_usable()).count();
        prop_assert_eq!(names.len(), usable);
        prop_assert_eq!(host.command_names().len(), usable);
    }

    /// Names stay unique even when sanitized prefixes collide.
    #[test]
    fn command_names_are_unique(snippets in arb_snippets()) {
        let host = MemoryHost::new();
        let names = registrar(&host).register(&snippets);

        let unique: HashSet<&String> = names.iter().collect();
        prop_assert_eq!(unique.len(), names.len());
    }

    /// Duplicated prefixes still register one command each.
    #[test]
    fn duplicated_prefixes_register_separately(
        prefix in "[a-z.\\-]{1,6}",
        copies in 1usize..8
    ) {
        let host = MemoryHost::new();
        let snippets: Vec<_> = (0..copies)
            .map(|i| jssnippets_core::Snippet::new(prefix.clone(), format!("code{i}")))
            .collect();

        let names = registrar(&host).register(&snippets);
        prop_assert_eq!(names.len(), copies);
        prop_assert_eq!(host.command_names().len(), copies);
    }

    /// Each name encodes its snippet's position in the original list.
    #[test]
    fn names_end_with_original_index(snippets in arb_snippets()) {
        let host = MemoryHost::new();
        let names = registrar(&host).register(&snippets);

        for name in &names {
            let index: usize = name.rsplit('-').next().unwrap().parse().unwrap();
            prop_assert!(snippets[index].is_usable());
            prop_assert!(name.starts_with("snippet-"));
        }
    }

    /// Sanitized names only contain word characters besides the separators.
    #[test]
    fn names_contain_only_word_characters(snippets in arb_snippets()) {
        let host = MemoryHost::new();
        for name in registrar(&host).register(&snippets) {
            prop_assert!(name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        }
    }
}
