// Worker harness end-to-end checks.
//
// - Consistency: net inserts equal the final size for any thread count.
// - Determinism: a single-threaded run is fully reproducible from its seed.
// - Equivalence: with private key ranges per worker, threaded and serial
//   runs of the same seeds end in the same state.
use ts_hashmap::harness::{self, HarnessConfig};

fn config(threads: usize, capacity: usize, seed: u64) -> HarnessConfig {
    HarnessConfig {
        threads,
        capacity,
        ops_per_thread: 2_000,
        key_space: 128,
        seed,
        disjoint_keys: false,
    }
}

#[test]
fn single_thread_run_is_reproducible() {
    let a = harness::run(&config(1, 16, 9)).unwrap();
    let b = harness::run(&config(1, 16, 9)).unwrap();
    assert!(a.is_consistent());
    assert_eq!(a.snapshot, b.snapshot);
    assert_eq!(a.workers, b.workers);
    assert_eq!(a.len, b.len);
}

#[test]
fn multi_thread_runs_stay_consistent() {
    for threads in [2, 4, 8] {
        let r = harness::run(&config(threads, 8, 1)).unwrap();
        assert_eq!(r.workers.len(), threads);
        assert!(r.is_consistent(), "threads={threads}: {:?}", r.totals());
        assert_eq!(r.totals().puts + r.totals().gets + r.totals().deletes, threads * 2_000);
        assert!(r.len <= 128);
        assert_eq!(r.load_factor, r.len as f64 / 8.0);
    }
}

// Every surviving key was drawn from `[0, key_space)`.
#[test]
fn final_keys_within_key_space() {
    let r = harness::run(&config(4, 32, 123)).unwrap();
    for (k, _) in r.snapshot.sorted_entries() {
        assert!((0..128).contains(&k));
    }
}

#[test]
fn zero_capacity_rejected_before_workers_start() {
    let mut c = config(2, 1, 0);
    c.capacity = 0;
    let err = harness::run(&c).unwrap_err();
    assert!(err.to_string().contains("invalid capacity"));
}

// Test: threaded vs. serial replay of the same per-worker streams.
// Assumes: each worker touches only its own key range, so no two workers'
// operations can reorder relative to each other on any key.
// Verifies: identical final contents and identical per-worker stats.
#[test]
fn disjoint_keys_threaded_matches_serial() {
    for threads in [2, 4, 8] {
        let mut c = config(threads, 16, 77);
        c.disjoint_keys = true;
        let threaded = harness::run(&c).unwrap();
        let serial = harness::run_serial(&c).unwrap();
        assert!(threaded.is_consistent());
        assert!(serial.is_consistent());
        // Chains in a shared bucket may be ordered differently; contents may not.
        assert_eq!(
            threaded.snapshot.sorted_entries(),
            serial.snapshot.sorted_entries(),
            "threads={threads}"
        );
        assert_eq!(threaded.workers, serial.workers);
        assert_eq!(threaded.len, serial.len);

        for (k, _) in threaded.snapshot.sorted_entries() {
            assert!((0..threads as i32 * 128).contains(&k));
        }
    }
}

// Test: a one-worker config is the same run whether threaded or serial,
// even with the shared key range.
#[test]
fn single_worker_threaded_matches_serial() {
    let c = config(1, 8, 5);
    let threaded = harness::run(&c).unwrap();
    let serial = harness::run_serial(&c).unwrap();
    assert_eq!(threaded.snapshot, serial.snapshot);
    assert_eq!(threaded.workers, serial.workers);
}
