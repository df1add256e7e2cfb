//! Separately chained hash table that doubles its bucket count on demand.
//!
//! # Layout
//!
//! ```text
//! buckets: [ Vec<(K, V)>, Vec<(K, V)>, ... ]   // len = bucket_count
//! bucket(k) = hash(k) % bucket_count
//! ```
//!
//! The table owns every entry; buckets are plain growable vectors.  After an
//! insertion pushes `len / bucket_count` above the configured maximum load
//! factor, the bucket count doubles and every entry is moved to the bucket
//! computed from the new count.
//!
//! Hashing goes through a [`BuildHasher`], `rustc_hash::FxBuildHasher` by
//! default.

use std::fmt;
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

/// Bucket count of a fresh or [`reset`](ExpandableMap::reset) table.
pub const INITIAL_BUCKETS: usize = 8;

/// Default maximum load factor (entries per bucket).
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.5;

/// Key → value map with amortised O(1) `associate` / `find`.
///
/// # Example
///
/// ```
/// use nav_spatial::ExpandableMap;
///
/// let mut m: ExpandableMap<&str, u32> = ExpandableMap::new();
/// m.associate("depot", 1);
/// m.associate("depot", 2); // overwrite, no duplicate
/// assert_eq!(m.find(&"depot"), Some(&2));
/// assert_eq!(m.len(), 1);
/// ```
pub struct ExpandableMap<K, V, S = FxBuildHasher> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    max_load_factor: f64,
    hasher: S,
}

impl<K: Hash + Eq, V> ExpandableMap<K, V, FxBuildHasher> {
    pub fn new() -> Self {
        Self::with_max_load_factor(DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Create a table that rehashes once `len / bucket_count` exceeds
    /// `max_load_factor`.  Non-positive or non-finite values fall back to
    /// [`DEFAULT_MAX_LOAD_FACTOR`].
    pub fn with_max_load_factor(max_load_factor: f64) -> Self {
        Self::with_max_load_factor_and_hasher(max_load_factor, FxBuildHasher)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ExpandableMap<K, V, S> {
    pub fn with_max_load_factor_and_hasher(max_load_factor: f64, hasher: S) -> Self {
        let max_load_factor = if max_load_factor.is_finite() && max_load_factor > 0.0 {
            max_load_factor
        } else {
            DEFAULT_MAX_LOAD_FACTOR
        };
        Self {
            buckets: empty_buckets(INITIAL_BUCKETS),
            len: 0,
            max_load_factor,
            hasher,
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert `key → value`, or overwrite the value of an equal key.
    ///
    /// Returns the previous value when the key was already present.  A new
    /// key may trigger a rehash.
    pub fn associate(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.find_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.insert_new(key, value);
        None
    }

    /// Return the value for `key`, inserting `make()` first if absent.
    ///
    /// Used to append to per-key collections without a second lookup on the
    /// hit path.
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        let b = self.bucket_of(&key);
        let found = self.buckets[b].iter().position(|(k, _)| *k == key);
        let (b, pos) = match found {
            Some(pos) => (b, pos),
            None => self.insert_new(key, make()),
        };
        &mut self.buckets[b][pos].1
    }

    /// Drop every entry and return to [`INITIAL_BUCKETS`] buckets.
    pub fn reset(&mut self) {
        self.buckets = empty_buckets(INITIAL_BUCKETS);
        self.len = 0;
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn find(&self, key: &K) -> Option<&V> {
        let b = self.bucket_of(key);
        self.buckets[b].iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let b = self.bucket_of(key);
        self.buckets[b].iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Iterate over all entries in bucket order (unspecified to callers).
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets.iter().flatten().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    #[inline]
    fn bucket_of(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Push a key known to be absent and return its `(bucket, position)`.
    ///
    /// The table grows before the push while the new entry would take the
    /// load factor past the maximum, so a small maximum may double several
    /// times in one insert.
    fn insert_new(&mut self, key: K, value: V) -> (usize, usize) {
        while (self.len + 1) as f64 / self.buckets.len() as f64 > self.max_load_factor {
            self.rehash();
        }
        let b = self.bucket_of(&key);
        self.buckets[b].push((key, value));
        self.len += 1;
        (b, self.buckets[b].len() - 1)
    }

    /// Double the bucket count and redistribute every entry exactly once.
    fn rehash(&mut self) {
        let new_count = self.buckets.len() * 2;
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_count));
        for (key, value) in old.into_iter().flatten() {
            let b = self.bucket_of(&key);
            self.buckets[b].push((key, value));
        }
    }
}

fn empty_buckets<K, V>(n: usize) -> Vec<Vec<(K, V)>> {
    (0..n).map(|_| Vec::new()).collect()
}

impl<K: Hash + Eq, V> Default for ExpandableMap<K, V, FxBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ExpandableMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().flatten().map(|(k, v)| (k, v)))
            .finish()
    }
}
