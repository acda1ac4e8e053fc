//! Pattern mining tools.
//!
//! [`item_sets`] holds the frequent itemset miners. The only miner today is
//! the level-wise [`item_sets::Apriori`].

pub mod error;
pub mod item_sets;

pub use error::{ErrorKind, MineError, Result};
