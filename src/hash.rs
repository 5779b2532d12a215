//! Key hashing and bucket selection.

use core::hash::{BuildHasher, Hasher};

/// Hasher that yields a key's unsigned bit pattern.
///
/// Integer keys need no mixing for separate chaining: `key as u32` reduced
/// modulo the bucket count spreads consecutive keys across consecutive
/// buckets, and the result is identical across runs and processes.
#[derive(Clone, Debug, Default)]
pub struct BucketHasher {
    state: u64,
}

impl Hasher for BucketHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    // Non-`i32` input: FNV-1a over the bytes, continuing from the current
    // state so successive writes all contribute.
    fn write(&mut self, bytes: &[u8]) {
        let mut h = self.state ^ 0xcbf2_9ce4_8422_2325;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(0x0000_0100_0000_01b3);
        }
        self.state = h;
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.state = u64::from(i as u32);
    }
}

/// Default `BuildHasher` for `TsHashMap`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildBucketHasher;

impl BuildHasher for BuildBucketHasher {
    type Hasher = BucketHasher;
    fn build_hasher(&self) -> Self::Hasher {
        BucketHasher::default()
    }
}

/// Reduce a hash to a bucket index in `[0, capacity)`.
#[inline]
pub fn bucket_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (hash % capacity as u64) as usize
}
