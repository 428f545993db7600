use super::*;

use proptest::prelude::*;
use std::collections::BTreeSet;

fn leaf_path_labels(tree: &SuffixTree) -> BTreeSet<Vec<u8>> {
    tree.nodes()
        .filter(|record| record.is_leaf)
        .map(|record| tree.path_label(record.id).to_vec())
        .collect()
}

fn brute_occurrences(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    (0..=text.len())
        .filter(|&i| text[i..].starts_with(pattern))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn naive_and_mccreight_agree(text in "[ab]{0,40}") {
        let naive = build_naive(&text).unwrap();
        let fast = build_mccreight(&text).unwrap();
        prop_assert_eq!(naive.validate(), Ok(()));
        prop_assert_eq!(fast.validate(), Ok(()));
        prop_assert_eq!(leaf_path_labels(&naive), leaf_path_labels(&fast));
        prop_assert_eq!(naive.node_count(), fast.node_count());
    }

    #[test]
    fn every_suffix_has_one_leaf(text in "[abc]{0,60}") {
        let tree = build_mccreight(&text).unwrap();
        let mut labels: Vec<usize> = tree.nodes().filter_map(|record| record.label).collect();
        labels.sort_unstable();
        prop_assert_eq!(labels, (0..=text.len()).collect::<Vec<_>>());
    }

    #[test]
    fn internal_nodes_branch(text in "[abcd]{0,60}") {
        let tree = build_mccreight(&text).unwrap();
        for record in tree.nodes() {
            let node = tree.node(record.id).unwrap();
            if record.is_leaf {
                prop_assert_eq!(node.children().count(), 0);
            } else if !node.is_root() {
                prop_assert!(node.children().count() >= 2);
            }
        }
    }

    #[test]
    fn suffix_links_drop_one_character(text in "[ab]{1,60}") {
        let tree = build_mccreight(&text).unwrap();
        for record in tree.nodes() {
            let node = tree.node(record.id).unwrap();
            if node.is_root() {
                continue;
            }
            if let Some(link) = node.suffix_link() {
                prop_assert_eq!(link.path_label(), &node.path_label()[1..]);
            }
        }
    }

    #[test]
    fn search_finds_every_occurrence(text in "[abc]{0,50}", pattern in "[abc]{0,4}") {
        let tree = build_mccreight(&text).unwrap();
        let mut found: Vec<usize> = tree.find_occurrences(&pattern).collect();
        found.sort_unstable();
        prop_assert_eq!(&found, &brute_occurrences(text.as_bytes(), pattern.as_bytes()));
        prop_assert_eq!(tree.contains(&pattern), !found.is_empty());
        prop_assert_eq!(tree.is_suffix(&pattern), text.ends_with(&pattern));
    }

    #[test]
    fn repeats_are_right_maximal(text in "[ab]{0,30}") {
        let tree = build_mccreight(&text).unwrap();
        let x = tree.text();
        for (repeat, (a, b)) in tree.repeats() {
            prop_assert!(!repeat.is_empty());
            prop_assert_ne!(a, b);
            prop_assert_eq!(&x[a..a + repeat.len()], repeat);
            prop_assert_eq!(&x[b..b + repeat.len()], repeat);
            prop_assert_ne!(x[a + repeat.len()], x[b + repeat.len()]);
        }
    }

    #[test]
    fn dna_tables_build_the_same_tree(text in "[ACGT]{0,60}") {
        let sparse = build_mccreight(&text).unwrap();
        let dense = SuffixTreeBuilder::new().alphabet(Alphabet::Dna).build(&text).unwrap();
        prop_assert_eq!(dense.validate(), Ok(()));
        prop_assert_eq!(leaf_path_labels(&sparse), leaf_path_labels(&dense));
        let mut found: Vec<usize> = dense.find_occurrences("ACG").collect();
        found.sort_unstable();
        prop_assert_eq!(found, brute_occurrences(text.as_bytes(), b"ACG"));
    }
}
