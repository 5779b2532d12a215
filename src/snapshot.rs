//! Point-in-time view of a table's buckets, used for display and checks.

use crate::{Key, Value};
use core::fmt;

/// Contents of one bucket, in chain order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketSnapshot {
    pub index: usize,
    pub entries: Vec<(Key, Value)>,
}

/// Every bucket of a table, ordered by index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub buckets: Vec<BucketSnapshot>,
}

impl Snapshot {
    /// Total number of entries reachable from every chain.
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().map(|b| b.entries.len()).sum()
    }

    pub fn get(&self, key: Key) -> Option<Value> {
        self.buckets
            .iter()
            .flat_map(|b| b.entries.iter())
            .find(|&&(k, _)| k == key)
            .map(|&(_, v)| v)
    }

    /// All entries sorted by key; handy for comparing two runs.
    pub fn sorted_entries(&self) -> Vec<(Key, Value)> {
        let mut all: Vec<_> = self
            .buckets
            .iter()
            .flat_map(|b| b.entries.iter().copied())
            .collect();
        all.sort_unstable();
        all
    }
}

impl fmt::Display for BucketSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] -> ", self.index)?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({k},{v})")?;
        }
        Ok(())
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.buckets {
            writeln!(f, "{b}")?;
        }
        Ok(())
    }
}
