//! CountingHashTable: separately chained word -> count table with prime-sized,
//! load-factor driven resizing.

use crate::capacity::{next_valid_size, MAX_CAPACITY, MIN_CAPACITY};
use core::hash::{BuildHasher, BuildHasherDefault};
use slotmap::SlotMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use tracing::debug;

/// Grow once `unique / capacity` exceeds this after inserting a new key.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

/// Shrink once `unique / capacity` drops below this after a removal.
pub const MIN_LOAD_FACTOR: f64 = 0.30;

/// Count stored for a key the first time it is inserted.
const NEW_KEY_COUNT: u64 = 1;

/// Deterministic SipHash with fixed keys: equal words hash identically across
/// tables and runs.
pub type DefaultBuildHasher = BuildHasherDefault<DefaultHasher>;

slotmap::new_key_type! {
    /// Link to an entry in the table's arena; chains are threaded through these.
    struct EntryKey;
}

#[derive(Clone, Debug)]
struct Entry {
    key: String,
    count: u64,
    // Computed once on insert; rehashing only needs `hash % capacity`.
    hash: u64,
    next: Option<EntryKey>,
}

/// Hash table mapping words to occurrence counts.
///
/// Buckets hold the head of a singly linked chain; new keys are prepended to
/// their bucket's chain. Entries live in an arena owned by the table and the
/// links between them are generational arena keys, so unlinking and
/// rehashing never touch raw pointers.
///
/// After each insert of a new key the table grows to the next valid size at
/// or above twice its capacity if the load factor exceeds
/// [`MAX_LOAD_FACTOR`]; after each removal it shrinks to the next valid size
/// at or above half its capacity if the load factor falls below
/// [`MIN_LOAD_FACTOR`]. Capacities always come from
/// [`next_valid_size`](crate::next_valid_size).
pub struct CountingHashTable<S = DefaultBuildHasher> {
    hasher: S,
    heads: Vec<Option<EntryKey>>,
    entries: SlotMap<EntryKey, Entry>,
    total: u64,
}

impl CountingHashTable {
    /// Empty table with [`MIN_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Empty table sized to the smallest valid capacity `>= capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<S: BuildHasher + Default> Default for CountingHashTable<S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

/// Iterator over `(word, count)` pairs in arbitrary order.
pub struct Iter<'a> {
    it: slotmap::basic::Values<'a, EntryKey, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, u64);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (e.key.as_str(), e.count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<S: BuildHasher> CountingHashTable<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(MIN_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            heads: vec![None; next_valid_size(capacity)],
            entries: SlotMap::with_key(),
            total: 0,
        }
    }

    fn make_hash(&self, key: &str) -> u64 {
        self.hasher.hash_one(key)
    }

    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.heads.len() as u64) as usize
    }

    /// Walks one bucket's chain from head to tail.
    fn chain(&self, bucket: usize) -> impl Iterator<Item = (EntryKey, &Entry)> + '_ {
        let mut cur = self.heads[bucket];
        core::iter::from_fn(move || {
            let k = cur?;
            let e = &self.entries[k];
            cur = e.next;
            Some((k, e))
        })
    }

    fn find(&self, hash: u64, key: &str) -> Option<EntryKey> {
        self.chain(self.bucket_of(hash))
            .find(|(_, e)| e.hash == hash && e.key == key)
            .map(|(k, _)| k)
    }

    /// Counts one occurrence of `key` and returns its updated count.
    ///
    /// A key seen for the first time is stored with a count of 1 at the front
    /// of its bucket's chain, which may trigger growth. Any string is a valid
    /// key, including `""`.
    pub fn insert_or_increment(&mut self, key: &str) -> u64 {
        let hash = self.make_hash(key);
        let count = match self.find(hash, key) {
            Some(k) => {
                let e = &mut self.entries[k];
                e.count += 1;
                e.count
            }
            None => {
                let bucket = self.bucket_of(hash);
                let entry = Entry {
                    key: key.to_owned(),
                    count: NEW_KEY_COUNT,
                    hash,
                    next: self.heads[bucket],
                };
                self.heads[bucket] = Some(self.entries.insert(entry));
                if self.load_factor() > MAX_LOAD_FACTOR && self.capacity() < MAX_CAPACITY {
                    self.resize(self.capacity().saturating_mul(2));
                }
                NEW_KEY_COUNT
            }
        };
        self.total += 1;
        count
    }

    /// Removes `key` and returns the count it had, or `None` if it was absent.
    ///
    /// The total count drops by the entry's full count. Removing an absent
    /// key changes nothing. May trigger a shrink.
    pub fn remove(&mut self, key: &str) -> Option<u64> {
        let hash = self.make_hash(key);
        let bucket = self.bucket_of(hash);

        let mut prev = None;
        let mut found = None;
        for (k, e) in self.chain(bucket) {
            if e.hash == hash && e.key == key {
                found = Some(k);
                break;
            }
            prev = Some(k);
        }
        let removed = self.entries.remove(found?)?;

        // Unlink: either the bucket head or the predecessor skips over it.
        match prev {
            None => self.heads[bucket] = removed.next,
            Some(p) => self.entries[p].next = removed.next,
        }
        self.total -= removed.count;

        if self.load_factor() < MIN_LOAD_FACTOR && self.capacity() > MIN_CAPACITY {
            self.resize(self.capacity() / 2);
        }
        Some(removed.count)
    }

    /// Stored count for `key`, or 0 when absent.
    pub fn lookup(&self, key: &str) -> u64 {
        let hash = self.make_hash(key);
        self.find(hash, key)
            .map(|k| self.entries[k].count)
            .unwrap_or(0)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(self.make_hash(key), key).is_some()
    }

    /// Rebuilds every chain for a bucket array of `next_valid_size(requested)`.
    fn resize(&mut self, requested: usize) {
        let new_capacity = next_valid_size(requested);
        let old_heads = core::mem::replace(&mut self.heads, vec![None; new_capacity]);
        let old_capacity = old_heads.len();

        for head in old_heads {
            let mut cur = head;
            while let Some(k) = cur {
                let e = &mut self.entries[k];
                cur = e.next;
                let bucket = (e.hash % new_capacity as u64) as usize;
                e.next = self.heads[bucket];
                self.heads[bucket] = Some(k);
            }
        }

        debug!(
            from = old_capacity,
            to = new_capacity,
            unique = self.entries.len(),
            "rehashed word table"
        );
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.entries.values(),
        }
    }
}

impl<S> CountingHashTable<S> {
    /// `unique_count / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.entries.len() as f64 / self.heads.len() as f64
    }

    /// Number of distinct keys stored.
    pub fn unique_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of the counts of all stored keys.
    pub fn total_count(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.heads.len()
    }
}

impl<S: Clone> Clone for CountingHashTable<S> {
    fn clone(&self) -> Self {
        // Arena keys survive the clone, so the copied heads and links
        // address the copied entries.
        Self {
            hasher: self.hasher.clone(),
            heads: self.heads.clone(),
            entries: self.entries.clone(),
            total: self.total,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.entries.clear();
        self.heads.clear();
        self.hasher.clone_from(&source.hasher);
        self.heads.clone_from(&source.heads);
        self.entries.clone_from(&source.entries);
        self.total = source.total;
    }
}

impl<S: BuildHasher> fmt::Debug for CountingHashTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingHashTable")
            .field("capacity", &self.capacity())
            .field("unique", &self.unique_count())
            .field("total", &self.total)
            .field("entries", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, S: BuildHasher> Extend<&'a str> for CountingHashTable<S> {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for word in iter {
            self.insert_or_increment(word);
        }
    }
}

impl<'a, S: BuildHasher + Default> FromIterator<&'a str> for CountingHashTable<S> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

#[cfg(test)]
impl<S: BuildHasher> CountingHashTable<S> {
    /// Keys of one bucket, head first.
    pub(crate) fn chain_keys(&self, bucket: usize) -> Vec<&str> {
        self.chain(bucket).map(|(_, e)| e.key.as_str()).collect()
    }

    pub(crate) fn bucket_for(&self, key: &str) -> usize {
        self.bucket_of(self.make_hash(key))
    }

    /// Panics unless every arena entry sits in exactly one chain, in the
    /// bucket its hash maps to, and the counters agree with the entries.
    pub(crate) fn assert_structure(&self) {
        use std::collections::HashSet;

        assert!(crate::capacity::is_valid_size(self.capacity()));
        let mut seen = HashSet::new();
        for bucket in 0..self.heads.len() {
            for (k, e) in self.chain(bucket) {
                assert!(seen.insert(k), "entry linked twice: {:?}", e.key);
                assert_eq!(self.bucket_of(e.hash), bucket, "misplaced {:?}", e.key);
                assert_eq!(e.hash, self.make_hash(&e.key));
                assert!(e.count >= NEW_KEY_COUNT);
            }
        }
        assert_eq!(seen.len(), self.entries.len(), "unreachable entries");
        let sum: u64 = self.entries.values().map(|e| e.count).sum();
        assert_eq!(sum, self.total);
    }
}
