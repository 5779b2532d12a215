//! ts-hashmap: a thread-safe, fixed-capacity hash map from `i32` keys to
//! `i32` values, built on separate chaining with one lock per bucket.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a table that any number of OS threads can `put`, `get` and
//!   `delete` through a shared `&TsHashMap`, with no lost updates and no
//!   torn chains.
//! - Layers:
//!   - `Chain`: an owned singly linked list (`Option<Box<Entry>>` links).
//!     Removing a node drops exactly that node and relinks its neighbors.
//!   - `TsHashMap<S>`: a boxed slice of `parking_lot::RwLock<Chain>`, one
//!     per bucket, plus an atomic entry count and a `BuildHasher`.
//!   - `Snapshot`: a copied view of every bucket for display and checks.
//!   - `harness`: seeded worker threads that exercise one shared table.
//!
//! Constraints
//! - Capacity (bucket count) is fixed at construction and never changes.
//!   It is unrelated to the number of entries; the load factor may exceed 1.
//! - Bucket selection is `hash(key) % capacity`. The default hasher uses
//!   the key's unsigned bit pattern, so placement is identical across runs.
//! - A lookup touches exactly one bucket.
//! - Absence is `None`; every `i32` is a legal stored value.
//!
//! Locking discipline
//! - Each bucket's lock is created with the table and lives as long as it.
//! - `get` takes the bucket's read lock; `put` and `delete` take its write
//!   lock. Two operations on the same key always contend on the same lock,
//!   so per-key operations are linearizable.
//! - The entry count is adjusted inside the bucket's write critical
//!   section, right after the chain decides whether the key was new or
//!   present. Racing puts of one new key therefore count it once.
//! - Lock guards are RAII values; every return path releases them.
//! - `parking_lot` locks do not poison, so no operation can fail on lock
//!   acquisition.
//!
//! Notes and non-goals
//! - No resizing or rehashing.
//! - `load_factor` and `len` are instantaneous samples while writers are
//!   active.
//! - `snapshot` locks one bucket at a time; it is exact once writers have
//!   been joined.

pub mod chain;
pub mod error;
pub mod harness;
pub mod hash;
pub mod snapshot;
mod ts_hash_map;
mod ts_hash_map_proptest;

/// Key type stored by the table.
pub type Key = i32;
/// Value type stored by the table.
pub type Value = i32;

// Public surface
pub use error::TableError;
pub use hash::{BucketHasher, BuildBucketHasher};
pub use snapshot::{BucketSnapshot, Snapshot};
pub use ts_hash_map::TsHashMap;
