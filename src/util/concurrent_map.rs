//! Lock-striped map for concurrent accumulation.
//!
//! Keys are spread over a fixed number of shards by `key mod shard_count`.
//! Each shard has its own [`parking_lot::Mutex`], so writers touching
//! different shards never contend. The map is meant for a single
//! accumulate-then-read cycle: producers call [`ConcurrentMap::accumulate`]
//! and [`ConcurrentMap::erase`] concurrently, and [`ConcurrentMap::flatten`]
//! is called once they have all finished.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use parking_lot::Mutex;

use crate::error::{Result, XiphosError};
use crate::search::config::DEFAULT_SHARD_COUNT;

/// Keys that can be assigned to a shard.
pub trait ShardKey: Ord {
    /// Index of the shard owning this key, in `0..shard_count`.
    fn shard_index(&self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(
            impl ShardKey for $t {
                fn shard_index(&self, shard_count: usize) -> usize {
                    // Negative keys wrap; they still land in a fixed shard.
                    ((*self as u64) % shard_count as u64) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i32, i64, u32, u64, usize);

/// A map from keys to values split into independently locked shards.
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> Default for ConcurrentMap<K, V> {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SHARD_COUNT)
    }
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// Create a map with the default number of shards.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map with `shard_count` shards.
    pub fn with_shard_count(shard_count: usize) -> Result<Self> {
        if shard_count == 0 {
            return Err(XiphosError::invalid_argument(
                "concurrent map needs at least one shard",
            ));
        }
        Ok(Self::new_unchecked(shard_count))
    }

    pub(crate) fn new_unchecked(shard_count: usize) -> Self {
        debug_assert!(shard_count > 0);
        Self {
            shards: (0..shard_count)
                .map(|_| Mutex::new(BTreeMap::new()))
                .collect(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        &self.shards[key.shard_index(self.shards.len())]
    }

    /// Add `delta` to the value under `key`, inserting `delta` if absent.
    ///
    /// Holds only the owning shard's lock for the whole read-modify-write.
    pub fn accumulate(&self, key: K, delta: V)
    where
        V: AddAssign,
    {
        let mut shard = self.shard(&key).lock();
        match shard.get_mut(&key) {
            Some(value) => *value += delta,
            None => {
                shard.insert(key, delta);
            }
        }
    }

    /// Remove `key` if present, returning its value.
    pub fn erase(&self, key: &K) -> Option<V> {
        self.shard(key).lock().remove(key)
    }

    /// Current value under `key`.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().get(key).cloned()
    }

    /// Total number of entries, summed shard by shard.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Merge all shards into one ordinary map.
    ///
    /// Shards are locked one after another, so the result is only a
    /// consistent snapshot when no producer is running.
    pub fn flatten(&self) -> BTreeMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let shard = shard.lock();
            merged.extend(shard.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }

    /// Consume the map and merge its shards without locking.
    pub fn into_flattened(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.append(&mut shard.into_inner());
        }
        merged
    }
}
