//! Support counting: one full pass over the dataset per call.

use tracing::debug;

use super::dataset::{parse_transaction, DatasetStats, TransactionSource, Transactions};
use super::{Item, Itemset};
use crate::{MineError, Result};

/// Fixed-size bit vector marking which items a transaction holds.
/// Cleared in place between transactions.
#[derive(Debug, Clone)]
pub struct PresenceVector {
    blocks: Vec<u64>,
    len: usize,
}

impl PresenceVector {
    pub fn new(len: usize) -> Self {
        PresenceVector {
            blocks: vec![0; len.div_ceil(64)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn reset(&mut self) {
        self.blocks.fill(0);
    }

    #[inline]
    pub fn insert(&mut self, item: Item) {
        debug_assert!(item < self.len);
        self.blocks[item / 64] |= 1 << (item % 64);
    }

    #[inline]
    pub fn contains(&self, item: Item) -> bool {
        item < self.len && self.blocks[item / 64] & (1 << (item % 64)) != 0
    }

    #[inline]
    pub fn contains_all(&self, itemset: &Itemset) -> bool {
        itemset.items().iter().all(|&item| self.contains(item))
    }
}

/// Support count of each candidate, in candidate order.
///
/// Opens `source` afresh and reads `stats.transaction_count` transactions.
/// The reader is dropped before returning on every path.
pub fn count<S: TransactionSource>(
    candidates: &[Itemset],
    source: &S,
    stats: &DatasetStats,
) -> Result<Vec<usize>> {
    debug!(
        candidates = candidates.len(),
        size = candidates.first().map_or(0, Itemset::len),
        "counting candidate support"
    );

    let name = source.name();
    let reader = source.open().map_err(|e| MineError::io(&name, e))?;
    let mut transactions = Transactions::new(reader, name);

    let mut presence = PresenceVector::new(stats.item_count);
    let mut counts = vec![0usize; candidates.len()];
    for seen in 0..stats.transaction_count {
        let (line_no, line) = match transactions.next() {
            Some(transaction) => transaction?,
            None => {
                return Err(MineError::Truncated {
                    expected: stats.transaction_count,
                    found: seen,
                })
            }
        };

        presence.reset();
        for item in parse_transaction(&line, line_no) {
            let item = item?;
            if item >= stats.item_count {
                return Err(MineError::DatasetChanged {
                    line: line_no,
                    item,
                    item_count: stats.item_count,
                });
            }
            presence.insert(item);
        }

        for (count, candidate) in counts.iter_mut().zip(candidates) {
            if presence.contains_all(candidate) {
                *count += 1;
            }
        }
    }

    Ok(counts)
}
