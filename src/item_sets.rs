mod apriori;
pub mod candidates;
pub mod counting;
pub mod dataset;

use std::fmt;

pub use apriori::{Apriori, LevelSummary, MinSupport, Mining};
pub use dataset::{DatasetStats, FileSource, InMemorySource, TransactionSource};

use crate::Result;

/// Item identifier, in `[0, item_count)` for a given dataset.
pub type Item = usize;

/// Largest item id a dataset may hold.
pub const MAX_ITEM: Item = i32::MAX as Item;

/// A set of items, kept sorted ascending without duplicates.
///
/// Equality and hashing are structural over the sorted sequence, so two
/// itemsets holding the same items are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset(Vec<Item>);

impl Itemset {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let mut items: Vec<Item> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Itemset(items)
    }

    pub fn singleton(item: Item) -> Self {
        Itemset(vec![item])
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: Item) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        self.0.iter().all(|&item| other.contains(item))
    }

    /// Copy of `self` with `item` inserted at its sorted position.
    pub fn with_item(&self, item: Item) -> Self {
        let mut items = Vec::with_capacity(self.0.len() + 1);
        items.extend_from_slice(&self.0);
        if let Err(at) = items.binary_search(&item) {
            items.insert(at, item);
        }
        Itemset(items)
    }
}

impl From<Vec<Item>> for Itemset {
    fn from(items: Vec<Item>) -> Self {
        Itemset::new(items)
    }
}

impl AsRef<Itemset> for Itemset {
    fn as_ref(&self) -> &Itemset {
        self
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

/// An itemset whose support met the threshold, with its support count and
/// ratio over all transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemSet {
    pub itemset: Itemset,
    pub count: usize,
    pub ratio: f64,
}

impl FrequentItemSet {
    pub fn new(itemset: Itemset, count: usize, transaction_count: usize) -> Self {
        let ratio = if transaction_count == 0 {
            0.0
        } else {
            count as f64 / transaction_count as f64
        };
        FrequentItemSet {
            itemset,
            count,
            ratio,
        }
    }
}

impl AsRef<Itemset> for FrequentItemSet {
    fn as_ref(&self) -> &Itemset {
        &self.itemset
    }
}

impl fmt::Display for FrequentItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} times = {:.4})",
            self.itemset, self.count, self.ratio
        )
    }
}

pub trait ItemSetMiner {
    fn mine<S: TransactionSource>(
        &mut self,
        dataset: &S,
        sup_min: f64,
    ) -> Result<Vec<FrequentItemSet>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn itemset_is_sorted_and_deduplicated() {
        let set = Itemset::new([3, 1, 2, 1]);
        assert_eq!(set.items(), &[1, 2, 3]);
        assert_eq!(set, Itemset::from(vec![2, 3, 1]));
    }

    #[test]
    fn with_item_keeps_order() {
        let set = Itemset::new([0, 4]).with_item(2);
        assert_eq!(set.items(), &[0, 2, 4]);
        assert_eq!(set.with_item(4), set);
    }

    #[test]
    fn subset_check() {
        let small = Itemset::new([1, 3]);
        let big = Itemset::new([0, 1, 2, 3]);
        assert!(small.is_subset_of(&big));
        assert!(!big.is_subset_of(&small));
        assert!(Itemset::new([]).is_subset_of(&small));
    }

    #[test]
    fn display_formats() {
        assert_eq!(Itemset::new([2, 0, 1]).to_string(), "[0, 1, 2]");
        let fis = FrequentItemSet::new(Itemset::new([0, 1]), 2, 3);
        assert_eq!(fis.to_string(), "[0, 1] (2 times = 0.6667)");
    }

    #[test]
    fn ratio_of_empty_dataset_is_zero() {
        assert_eq!(FrequentItemSet::new(Itemset::singleton(0), 0, 0).ratio, 0.0);
    }
}
