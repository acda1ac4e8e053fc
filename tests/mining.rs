use std::collections::BTreeSet;
use std::io::Write;

use pate::item_sets::{
    Apriori, FileSource, InMemorySource, ItemSetMiner, Itemset, MinSupport,
};
use pate::{ErrorKind, MineError};
use proptest::prelude::*;
use tempfile::NamedTempFile;

fn write_dataset(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    file.write_all(text.as_bytes()).expect("write dataset");
    file
}

fn brute_force_support(transactions: &[Vec<usize>], itemset: &Itemset) -> usize {
    transactions
        .iter()
        .filter(|tx| itemset.items().iter().all(|item| tx.contains(item)))
        .count()
}

#[test]
fn file_walkthrough_emits_seven_itemsets() {
    let file = write_dataset("0 1\n1 2\n\n0 1 2\n");
    let mut apriori = Apriori::default();
    let found = apriori.mine(&FileSource::new(file.path()), 0.3).unwrap();

    assert_eq!(found.len(), 7);
    let top = found
        .iter()
        .find(|f| f.itemset == Itemset::new([0, 1, 2]))
        .expect("level 3 itemset");
    assert_eq!(top.count, 1);
    assert!((top.ratio - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn file_removed_between_runs_is_an_io_error() {
    let file = write_dataset("0 1\n");
    let source = FileSource::new(file.path());
    drop(file);
    let err = Apriori::default().run(&source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn config_error_names_value() {
    let err = MinSupport::new(1.5).unwrap_err();
    assert!(matches!(err, MineError::Config { .. }));
    assert!(err.to_string().contains("1.5"));
}

fn transactions() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0usize..6, 1..5), 1..12)
}

proptest! {
    #[test]
    fn counts_match_brute_force(txs in transactions(), minsup in 0.0f64..=1.0) {
        let source = InMemorySource::from_transactions(txs.clone());
        let mining = Apriori::new(MinSupport::new(minsup).unwrap()).run(&source).unwrap();
        for found in &mining.itemsets {
            prop_assert_eq!(found.count, brute_force_support(&txs, &found.itemset));
            prop_assert!(found.ratio >= minsup);
        }
    }

    #[test]
    fn support_is_anti_monotone(txs in transactions(), minsup in 0.0f64..=1.0) {
        let source = InMemorySource::from_transactions(txs.clone());
        let mining = Apriori::new(MinSupport::new(minsup).unwrap()).run(&source).unwrap();
        for big in &mining.itemsets {
            for small in &mining.itemsets {
                if small.itemset.is_subset_of(&big.itemset) {
                    prop_assert!(small.count >= big.count);
                }
            }
            // Every subset one item smaller was found frequent too.
            if big.itemset.len() > 1 {
                for &dropped in big.itemset.items() {
                    let subset = Itemset::new(
                        big.itemset.items().iter().copied().filter(|&i| i != dropped),
                    );
                    prop_assert!(mining.itemsets.iter().any(|f| f.itemset == subset));
                }
            }
        }
    }

    #[test]
    fn runs_are_deterministic_and_bounded(txs in transactions(), minsup in 0.0f64..=1.0) {
        let source = InMemorySource::from_transactions(txs);
        let apriori = Apriori::new(MinSupport::new(minsup).unwrap());
        let first = apriori.run(&source).unwrap();
        let second = apriori.run(&source).unwrap();

        let as_set = |m: &pate::item_sets::Mining| -> BTreeSet<(Itemset, usize)> {
            m.itemsets.iter().map(|f| (f.itemset.clone(), f.count)).collect()
        };
        prop_assert_eq!(as_set(&first), as_set(&second));
        prop_assert!(first.levels.len() <= first.stats.item_count);
        for (i, level) in first.levels.iter().enumerate() {
            prop_assert_eq!(level.level, i + 1);
        }
        for found in &first.itemsets {
            prop_assert!(found.itemset.items().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn boundary_ratio_is_frequent(hits in 1usize..8, misses in 0usize..8) {
        let mut txs = vec![vec![0usize]; hits];
        txs.extend(std::iter::repeat(vec![1usize]).take(misses));
        let total = hits + misses;
        let minsup = hits as f64 / total as f64;
        let mining = Apriori::new(MinSupport::new(minsup).unwrap())
            .run(&InMemorySource::from_transactions(txs))
            .unwrap();
        prop_assert!(mining.itemsets.iter().any(|f| f.itemset == Itemset::new([0])));
    }
}
