use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::dataset::{self, DatasetStats, TransactionSource};
use super::{candidates, counting, FrequentItemSet, ItemSetMiner};
use crate::{MineError, Result};

/// Minimum support ratio, validated to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MinSupport(f64);

impl MinSupport {
    pub const DEFAULT: f64 = 0.01;

    pub fn new(minsup: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&minsup) {
            Ok(MinSupport(minsup))
        } else {
            Err(MineError::Config { minsup })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether `count` out of `transaction_count` reaches the threshold.
    /// The boundary is inclusive.
    pub fn admits(self, count: usize, transaction_count: usize) -> bool {
        transaction_count > 0 && count as f64 / transaction_count as f64 >= self.0
    }
}

impl Default for MinSupport {
    fn default() -> Self {
        MinSupport(Self::DEFAULT)
    }
}

/// What happened at one level of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    /// Itemset size at this level.
    pub level: usize,
    pub candidates: usize,
    pub frequent: usize,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct Mining {
    pub stats: DatasetStats,
    pub min_support: MinSupport,
    /// Frequent itemsets, level by level.
    pub itemsets: Vec<FrequentItemSet>,
    /// Levels that produced at least one frequent itemset.
    pub levels: Vec<LevelSummary>,
    pub elapsed: Duration,
}

impl Mining {
    pub fn frequent_count(&self) -> usize {
        self.itemsets.len()
    }
}

/// Level-wise Apriori miner.
///
/// Each level counts the live candidates with a full pass over the
/// dataset, keeps those meeting the minimum support and joins them into the
/// next level's candidates. The run ends when no candidate is frequent or
/// the join yields nothing, which happens after at most `item_count` levels.
#[derive(Debug, Clone, Default)]
pub struct Apriori {
    min_support: MinSupport,
}

impl Apriori {
    pub fn new(min_support: MinSupport) -> Self {
        Apriori { min_support }
    }

    pub fn min_support(&self) -> MinSupport {
        self.min_support
    }

    pub fn run<S: TransactionSource>(&self, dataset: &S) -> Result<Mining> {
        let start = Instant::now();
        let stats = dataset::scan(dataset)?;

        let mut itemsets = Vec::new();
        let mut levels = Vec::new();
        let mut active = candidates::singletons(stats.item_count);
        let mut level = 1;

        while !active.is_empty() {
            let counts = counting::count(&active, dataset, &stats)?;
            let candidate_count = active.len();
            let frequent: Vec<FrequentItemSet> = active
                .into_iter()
                .zip(counts)
                .filter(|&(_, count)| self.min_support.admits(count, stats.transaction_count))
                .map(|(itemset, count)| {
                    FrequentItemSet::new(itemset, count, stats.transaction_count)
                })
                .collect();

            if frequent.is_empty() {
                debug!(level, candidates = candidate_count, "no frequent itemsets");
                break;
            }

            info!(
                level,
                frequent = frequent.len(),
                minsup = self.min_support.value(),
                "found frequent itemsets"
            );
            levels.push(LevelSummary {
                level,
                candidates: candidate_count,
                frequent: frequent.len(),
            });

            active = candidates::join(&frequent);
            itemsets.extend(frequent);
            level += 1;
        }

        let elapsed = start.elapsed();
        info!(
            total = itemsets.len(),
            minsup = self.min_support.value(),
            ?elapsed,
            "mining finished"
        );

        Ok(Mining {
            stats,
            min_support: self.min_support,
            itemsets,
            levels,
            elapsed,
        })
    }
}

impl ItemSetMiner for Apriori {
    fn mine<S: TransactionSource>(
        &mut self,
        dataset: &S,
        sup_min: f64,
    ) -> Result<Vec<FrequentItemSet>> {
        self.min_support = MinSupport::new(sup_min)?;
        Ok(self.run(dataset)?.itemsets)
    }
}
