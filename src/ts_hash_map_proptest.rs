#![cfg(test)]

// Property tests for TsHashMap kept inside the crate so they can drive the
// table with a custom hasher and inspect chains through snapshots.

use crate::ts_hash_map::TsHashMap;
use crate::{Key, Value};
use core::hash::{BuildHasher, Hasher};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug)]
enum Op {
    Put(Key, Value),
    Get(Key),
    Delete(Key),
    LoadFactor,
    Snapshot,
}

// Small key range so puts, updates and deletes keep hitting the same keys;
// values span the whole domain, extremes included.
prop_compose! {
    fn arb_ops()(ops in proptest::collection::vec(
        prop_oneof![
            3 => (-16i32..16, any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
            2 => (-16i32..16).prop_map(Op::Get),
            2 => (-16i32..16).prop_map(Op::Delete),
            1 => Just(Op::LoadFactor),
            1 => Just(Op::Snapshot),
        ], 1..200)) -> Vec<Op> { ops }
}

// State machine over TsHashMap against a std::collections::HashMap model.
fn run_state_machine<S: BuildHasher>(
    sut: TsHashMap<S>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, Value> = HashMap::new();
    for op in ops {
        match op {
            Op::Put(k, v) => {
                let before = sut.len();
                let prev = sut.put(k, v);
                prop_assert_eq!(prev, model.insert(k, v));
                let grew = usize::from(prev.is_none());
                prop_assert_eq!(sut.len(), before + grew, "size grows only for new keys");
            }
            Op::Get(k) => {
                prop_assert_eq!(sut.get(k), model.get(&k).copied());
                prop_assert_eq!(sut.contains_key(k), model.contains_key(&k));
            }
            Op::Delete(k) => {
                let before = sut.len();
                let removed = sut.delete(k);
                prop_assert_eq!(removed, model.remove(&k));
                let shrank = usize::from(removed.is_some());
                prop_assert_eq!(sut.len() + shrank, before, "size shrinks only on removal");
            }
            Op::LoadFactor => {
                let expected = model.len() as f64 / sut.capacity() as f64;
                prop_assert!((sut.load_factor() - expected).abs() < 1e-12);
            }
            Op::Snapshot => {
                let snap = sut.snapshot();
                prop_assert_eq!(snap.buckets.len(), sut.capacity());
                for (i, b) in snap.buckets.iter().enumerate() {
                    prop_assert_eq!(b.index, i);
                    for &(k, _) in &b.entries {
                        prop_assert_eq!(sut.bucket_index(k), i, "key in the wrong bucket");
                    }
                }
                let got: BTreeMap<Key, Value> = snap.sorted_entries().into_iter().collect();
                let want: BTreeMap<Key, Value> = model.iter().map(|(&k, &v)| (k, v)).collect();
                prop_assert_eq!(got, want);
            }
        }

        // Post-conditions after each op: the counter matches what the
        // chains actually hold.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.snapshot().entry_count(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_state_machine(capacity in 1usize..12, ops in arb_ops()) {
        run_state_machine(TsHashMap::new(capacity).unwrap(), ops)?;
    }
}

// Collision variant using a constant hasher: every key shares one chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(capacity in 1usize..6, ops in arb_ops()) {
        run_state_machine(TsHashMap::with_hasher(capacity, ConstBuildHasher).unwrap(), ops)?;
    }
}
