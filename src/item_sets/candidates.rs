//! Candidate generation.

use ahash::AHashSet;
use tracing::debug;

use super::{Item, Itemset};

/// One size-1 itemset per item, in increasing item order.
pub fn singletons(item_count: usize) -> Vec<Itemset> {
    (0..item_count).map(Itemset::singleton).collect()
}

/// Joins size-`k` itemsets into deduplicated size-`k + 1` candidates.
///
/// Every unordered pair `(x, y)` is compared. A pair sharing exactly `k - 1`
/// items, in any positions, yields `x` plus the one item of `y` missing from
/// `x`. Different pairs may yield the same candidate; it is kept once, at
/// the position of its first derivation.
pub fn join<T: AsRef<Itemset>>(prev: &[T]) -> Vec<Itemset> {
    let Some(first) = prev.first() else {
        return Vec::new();
    };
    let size = first.as_ref().len();
    debug!(
        size = size + 1,
        from = prev.len(),
        "creating candidate itemsets"
    );

    let mut seen = AHashSet::new();
    let mut next = Vec::new();
    let mut derived = 0usize;
    for (i, x) in prev.iter().enumerate() {
        let x = x.as_ref();
        for y in &prev[i + 1..] {
            let y = y.as_ref();
            debug_assert_eq!(x.len(), y.len());
            if let Some(extra) = single_difference(x, y) {
                derived += 1;
                let candidate = x.with_item(extra);
                if seen.insert(candidate.clone()) {
                    next.push(candidate);
                }
            }
        }
    }

    debug!(
        size = size + 1,
        derived,
        unique = next.len(),
        "created candidate itemsets"
    );
    next
}

/// The item of `y` absent from `x`, if there is exactly one.
fn single_difference(x: &Itemset, y: &Itemset) -> Option<Item> {
    let mut missing = y.items().iter().copied().filter(|&item| !x.contains(item));
    let extra = missing.next()?;
    missing.next().is_none().then_some(extra)
}
