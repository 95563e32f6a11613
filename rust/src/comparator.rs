//! Comparison operators accepted by range search.

use std::fmt;
use std::str::FromStr;

use crate::error::BPlusTreeError;

/// Which side of the search key a range search collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `<=`
    LessOrEqual,
    /// `==`
    Equal,
    /// `>=`
    GreaterOrEqual,
}

impl Comparator {
    /// All comparators, in symbol order.
    pub const ALL: [Comparator; 3] = [
        Comparator::LessOrEqual,
        Comparator::Equal,
        Comparator::GreaterOrEqual,
    ];

    /// The textual symbol of this comparator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::LessOrEqual => "<=",
            Comparator::Equal => "==",
            Comparator::GreaterOrEqual => ">=",
        }
    }

    /// Returns true if `key` satisfies `key <op> target`.
    pub fn matches<K: Ord>(&self, key: &K, target: &K) -> bool {
        match self {
            Comparator::LessOrEqual => key <= target,
            Comparator::Equal => key == target,
            Comparator::GreaterOrEqual => key >= target,
        }
    }
}

impl FromStr for Comparator {
    type Err = BPlusTreeError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "<=" => Ok(Comparator::LessOrEqual),
            "==" => Ok(Comparator::Equal),
            ">=" => Ok(Comparator::GreaterOrEqual),
            other => Err(BPlusTreeError::unknown_comparator(other)),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
