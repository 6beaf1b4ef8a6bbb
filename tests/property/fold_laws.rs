//! Line-fold set laws.

use exec_timeline::LineFoldSet;
use proptest::prelude::*;

proptest! {
    #[test]
    fn toggle_is_an_involution(initial in prop::collection::btree_set(1u32..200, 0..20), line in 1u32..200) {
        let mut folds: LineFoldSet = initial.iter().copied().collect();
        let before = folds.clone();
        folds.toggle(line);
        folds.toggle(line);
        prop_assert_eq!(folds, before);
    }

    #[test]
    fn folded_lines_are_sorted_and_unique(lines in prop::collection::vec(1u32..50, 0..40)) {
        let mut folds = LineFoldSet::new();
        for line in &lines {
            folds.fold(*line);
        }
        let listed = folds.folded_lines();
        prop_assert!(listed.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(lines.iter().all(|l| folds.is_folded(*l)));
    }
}
