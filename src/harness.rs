//! Worker harness: drives one shared table from several seeded threads.
//!
//! Each worker owns a `StdRng` seeded with `seed + worker index`, so a run
//! is fully determined by its config. With one thread the final contents
//! are reproducible; with several, they depend on interleaving, but the
//! bookkeeping in [`Report::is_consistent`] must hold either way. With
//! `disjoint_keys`, [`run`] and the single-threaded [`run_serial`] end in
//! the same state.

use crate::error::TableError;
use crate::snapshot::Snapshot;
use crate::ts_hash_map::TsHashMap;
use crate::{Key, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Barrier;
use std::thread;

pub const DEFAULT_OPS_PER_THREAD: usize = 1000;
pub const DEFAULT_KEY_SPACE: u32 = 64;
pub const DEFAULT_SEED: u64 = 42;

pub const OPS_ENV: &str = "TS_HASHMAP_OPS";
pub const KEYS_ENV: &str = "TS_HASHMAP_KEYS";
pub const SEED_ENV: &str = "TS_HASHMAP_SEED";

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("<{name}> must be a positive integer, got {value:?}")]
    NotPositive { name: &'static str, value: String },
    #[error("{var} must be a positive integer, got {value:?}")]
    BadEnv { var: &'static str, value: String },
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("worker {0} panicked")]
    WorkerPanicked(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    pub threads: usize,
    pub capacity: usize,
    pub ops_per_thread: usize,
    /// Keys are drawn from `[0, key_space)`, or from worker `i`'s own
    /// `[i * key_space, (i + 1) * key_space)` when `disjoint_keys` is set.
    pub key_space: u32,
    pub seed: u64,
    /// Give each worker a private key range, so the final contents do not
    /// depend on how workers interleave.
    pub disjoint_keys: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            capacity: 16,
            ops_per_thread: DEFAULT_OPS_PER_THREAD,
            key_space: DEFAULT_KEY_SPACE,
            seed: DEFAULT_SEED,
            disjoint_keys: false,
        }
    }
}

fn parse_positive<T>(name: &'static str, raw: &str) -> Result<T, HarnessError>
where
    T: core::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(v) if v > T::default() => Ok(v),
        _ => Err(HarnessError::NotPositive {
            name,
            value: raw.to_string(),
        }),
    }
}

impl HarnessConfig {
    /// Build from positional `<num threads> <hashmap capacity>` (program
    /// name already stripped). Extra arguments are ignored; callers may warn.
    pub fn from_args<I, A>(args: I) -> Result<Self, HarnessError>
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        let mut it = args.into_iter();
        let threads = it.next().ok_or(HarnessError::MissingArgument("num threads"))?;
        let capacity = it
            .next()
            .ok_or(HarnessError::MissingArgument("hashmap capacity"))?;
        Ok(Self {
            threads: parse_positive("num threads", threads.as_ref())?,
            capacity: parse_positive("hashmap capacity", capacity.as_ref())?,
            ..Self::default()
        })
    }

    /// Apply overrides from `TS_HASHMAP_OPS`, `TS_HASHMAP_KEYS` and
    /// `TS_HASHMAP_SEED`, looked up through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, HarnessError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bad = |var: &'static str, value: String| HarnessError::BadEnv { var, value };
        if let Some(v) = lookup(OPS_ENV) {
            self.ops_per_thread = parse_positive("ops", &v).map_err(|_| bad(OPS_ENV, v))?;
        }
        if let Some(v) = lookup(KEYS_ENV) {
            self.key_space = parse_positive("keys", &v).map_err(|_| bad(KEYS_ENV, v))?;
        }
        if let Some(v) = lookup(SEED_ENV) {
            // Zero is a fine seed.
            self.seed = v.trim().parse().map_err(|_| bad(SEED_ENV, v))?;
        }
        Ok(self)
    }

    /// First key of worker `i`'s range.
    pub fn key_base(&self, i: usize) -> Key {
        if self.disjoint_keys {
            (i as Key).wrapping_mul(self.key_space as Key)
        } else {
            0
        }
    }

    fn worker_rng(&self, i: usize) -> StdRng {
        StdRng::seed_from_u64(self.seed.wrapping_add(i as u64))
    }
}

/// What one worker did, counted from the values the table returned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub puts: usize,
    /// Puts that added a new key.
    pub inserted: usize,
    pub gets: usize,
    pub hits: usize,
    pub deletes: usize,
    /// Deletes that removed a key.
    pub removed: usize,
}

impl WorkerStats {
    fn merge(mut self, other: &WorkerStats) -> Self {
        self.puts += other.puts;
        self.inserted += other.inserted;
        self.gets += other.gets;
        self.hits += other.hits;
        self.deletes += other.deletes;
        self.removed += other.removed;
        self
    }
}

#[derive(Debug)]
pub struct Report {
    pub workers: Vec<WorkerStats>,
    pub len: usize,
    pub load_factor: f64,
    pub snapshot: Snapshot,
}

impl Report {
    pub fn totals(&self) -> WorkerStats {
        self.workers
            .iter()
            .fold(WorkerStats::default(), |acc, w| acc.merge(w))
    }

    /// Net inserts equal the final size, and the size equals what the
    /// chains hold.
    pub fn is_consistent(&self) -> bool {
        let t = self.totals();
        t.inserted.checked_sub(t.removed) == Some(self.len)
            && self.snapshot.entry_count() == self.len
    }
}

/// One worker's operation stream over `[base, base + key_space)`:
/// 50% put, 30% get, 20% delete.
pub fn run_worker(
    map: &TsHashMap,
    rng: &mut StdRng,
    ops: usize,
    base: Key,
    key_space: u32,
) -> WorkerStats {
    let mut stats = WorkerStats::default();
    for _ in 0..ops {
        let key = base.wrapping_add(rng.gen_range(0..key_space) as Key);
        match rng.gen_range(0..10u8) {
            0..=4 => {
                let value: Value = rng.gen();
                stats.puts += 1;
                if map.put(key, value).is_none() {
                    stats.inserted += 1;
                }
            }
            5..=7 => {
                stats.gets += 1;
                if map.get(key).is_some() {
                    stats.hits += 1;
                }
            }
            _ => {
                stats.deletes += 1;
                if map.delete(key).is_some() {
                    stats.removed += 1;
                }
            }
        }
    }
    stats
}

/// Build one table, run `config.threads` workers against it, join them,
/// then read the final state.
pub fn run(config: &HarnessConfig) -> Result<Report, HarnessError> {
    let map = TsHashMap::new(config.capacity)?;
    let barrier = Barrier::new(config.threads);

    let workers = thread::scope(|s| {
        let handles: Vec<_> = (0..config.threads)
            .map(|i| {
                let (map, barrier) = (&map, &barrier);
                s.spawn(move || {
                    let mut rng = config.worker_rng(i);
                    barrier.wait();
                    log::debug!("worker {i} started");
                    let stats = run_worker(
                        map,
                        &mut rng,
                        config.ops_per_thread,
                        config.key_base(i),
                        config.key_space,
                    );
                    log::debug!("worker {i} finished: {stats:?}");
                    stats
                })
            })
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(i, h)| h.join().map_err(|_| HarnessError::WorkerPanicked(i)))
            .collect::<Result<Vec<_>, _>>()
    })?;

    Ok(finish(&map, workers))
}

/// Replay the same per-worker streams one after another on the calling
/// thread. With `disjoint_keys` the result matches [`run`] exactly.
pub fn run_serial(config: &HarnessConfig) -> Result<Report, HarnessError> {
    let map = TsHashMap::new(config.capacity)?;
    let workers = (0..config.threads)
        .map(|i| {
            let mut rng = config.worker_rng(i);
            run_worker(
                &map,
                &mut rng,
                config.ops_per_thread,
                config.key_base(i),
                config.key_space,
            )
        })
        .collect();
    Ok(finish(&map, workers))
}

fn finish(map: &TsHashMap, workers: Vec<WorkerStats>) -> Report {
    let report = Report {
        workers,
        len: map.len(),
        load_factor: map.load_factor(),
        snapshot: map.snapshot(),
    };
    if !report.is_consistent() {
        log::error!(
            "final state inconsistent: totals {:?}, len {}, chained entries {}",
            report.totals(),
            report.len,
            report.snapshot.entry_count()
        );
    }
    report
}
