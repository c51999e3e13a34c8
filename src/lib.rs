//! word-counter: a self-resizing, separately chained hash table that maps
//! words to occurrence counts, plus the small text pipeline around it.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: count words with predictable, prime-sized bucket arrays and an
//!   eager rehash whenever the load factor leaves its band.
//! - Layers:
//!   - `capacity`: the fixed ascending sequence of permitted bucket counts
//!     and `next_valid_size`, the only way a capacity is chosen.
//!   - `CountingHashTable<S>`: bucket heads plus an arena of entries; each
//!     bucket is a singly linked chain threaded through arena keys.
//!   - `english`, `ingest`, `report`: cleaning, file ingestion and output
//!     formatting. They only use the table's public operations.
//!
//! Constraints
//! - Single-threaded: one owner, `&mut self` for every mutation, no locks.
//! - Keys are `String`, counts are `u64`; nothing else is stored.
//! - Every operation is total. Removing or looking up an absent word is a
//!   no-op / zero, and the empty string is a valid key.
//!
//! Resizing
//! - After inserting a new key, if `unique / capacity > 0.75` and the
//!   capacity is below the maximum, the table rehashes into
//!   `next_valid_size(2 * capacity)`.
//! - After a removal, if `unique / capacity < 0.30` and the capacity is above
//!   the minimum, it rehashes into `next_valid_size(capacity / 2)`.
//! - Rehashing is eager and completes inside the triggering call. Entries
//!   keep the hash computed at insert, so `S` is never invoked during a
//!   rehash; entries are relinked, not reallocated.
//!
//! Hashing
//! - The default `S` is SipHash with fixed keys, so the same word lands in
//!   the same bucket for every table of the same capacity. Any
//!   `BuildHasher` may be supplied; copies clone it.
//!
//! Copies
//! - `Clone` deep-copies the arena and bucket heads. Arena keys are preserved
//!   by the copy, so chains in the copy link only to the copy's entries.
//! - `clone_from` drops the destination's entries before copying.
//!
//! Notes and non-goals
//! - No concurrent access, no persistence, no generic key/value types.

pub mod capacity;
mod counting_hash_table;
mod counting_hash_table_proptest;
pub mod english;
pub mod ingest;
pub mod report;

// Public surface
pub use capacity::{next_valid_size, MAX_CAPACITY, MIN_CAPACITY};
pub use counting_hash_table::{
    CountingHashTable, DefaultBuildHasher, Iter, MAX_LOAD_FACTOR, MIN_LOAD_FACTOR,
};
pub use ingest::{ingest_file, ingest_reader, IngestError, IngestSummary};
