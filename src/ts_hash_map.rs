//! TsHashMap: fixed-capacity chained table with one lock per bucket.

use crate::chain::Chain;
use crate::error::TableError;
use crate::hash::{bucket_index, BuildBucketHasher};
use crate::snapshot::{BucketSnapshot, Snapshot};
use crate::{Key, Value};
use core::hash::BuildHasher;
use core::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::RwLock;

pub struct TsHashMap<S = BuildBucketHasher> {
    hasher: S,
    buckets: Box<[RwLock<Chain>]>, // length == capacity, never reallocated
    len: AtomicUsize,
}

impl TsHashMap {
    /// Create a table with `capacity` empty buckets.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_hasher(capacity, BuildBucketHasher)
    }
}

impl<S> TsHashMap<S>
where
    S: BuildHasher,
{
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity { capacity });
        }
        let buckets = core::iter::repeat_with(|| RwLock::new(Chain::new()))
            .take(capacity)
            .collect();
        log::debug!("created table with {capacity} buckets");
        Ok(Self {
            hasher,
            buckets,
            len: AtomicUsize::new(0),
        })
    }

    /// Bucket that holds (or would hold) `key`.
    pub fn bucket_index(&self, key: Key) -> usize {
        bucket_index(self.hasher.hash_one(key), self.buckets.len())
    }

    fn bucket(&self, key: Key) -> &RwLock<Chain> {
        &self.buckets[self.bucket_index(key)]
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ratio of entries to buckets. Under concurrent mutation this is a
    /// sample, not a value consistent with any later read.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    pub fn get(&self, key: Key) -> Option<Value> {
        self.bucket(key).read().get(key)
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Insert or overwrite. Returns the previous value, or `None` if `key`
    /// was new.
    pub fn put(&self, key: Key, value: Value) -> Option<Value> {
        let mut chain = self.bucket(key).write();
        let prev = chain.upsert(key, value);
        // Counted while the bucket is still locked: two racing puts of the
        // same new key cannot both see it as absent.
        if prev.is_none() {
            self.len.fetch_add(1, Ordering::AcqRel);
        }
        log::trace!("put {key} -> {value} (previous {prev:?})");
        prev
    }

    /// Remove `key`, returning its value if it was present.
    pub fn delete(&self, key: Key) -> Option<Value> {
        let mut chain = self.bucket(key).write();
        let removed = chain.remove(key);
        if removed.is_some() {
            self.len.fetch_sub(1, Ordering::AcqRel);
        }
        log::trace!("delete {key} (removed {removed:?})");
        removed
    }

    /// Copy out every bucket, holding each bucket's read lock while it is
    /// copied. Buckets are visited in index order, so under concurrent
    /// mutation the result is consistent per bucket only.
    pub fn snapshot(&self) -> Snapshot {
        let buckets = self
            .buckets
            .iter()
            .enumerate()
            .map(|(index, lock)| BucketSnapshot {
                index,
                entries: lock.read().iter().collect(),
            })
            .collect();
        Snapshot { buckets }
    }
}

impl<S> core::fmt::Debug for TsHashMap<S>
where
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TsHashMap")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("load_factor", &self.load_factor())
            .finish()
    }
}
