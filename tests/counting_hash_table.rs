// CountingHashTable integration suite.
//
// Each test documents the behavior being verified. The core invariants
// exercised:
// - Counting: lookup equals inserts since the last removal; absent is 0.
// - Bookkeeping: total is the sum of stored counts; unique is the number of
//   stored keys; removal subtracts a key's full count.
// - Sizing: capacity is always a valid size; growth follows the insert that
//   crosses 0.75, shrink follows the removal that crosses 0.30.
// - Copies: clone and clone_from yield fully independent tables.
use word_counter::capacity::is_valid_size;
use word_counter::{
    next_valid_size, CountingHashTable, MAX_LOAD_FACTOR, MIN_CAPACITY, MIN_LOAD_FACTOR,
};

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("word{i}")).collect()
}

// Test: two distinct keys, one inserted twice.
// Verifies: per-key counts and both aggregates.
#[test]
fn scenario_repeat_insert_counts() {
    let mut t = CountingHashTable::new();
    t.insert_or_increment("cat");
    t.insert_or_increment("dog");
    t.insert_or_increment("cat");
    assert_eq!(t.lookup("cat"), 2);
    assert_eq!(t.lookup("dog"), 1);
    assert_eq!(t.unique_count(), 2);
    assert_eq!(t.total_count(), 3);
}

// Test: ninth distinct key in a minimum-capacity table.
// Assumes: 8/11 <= 0.75 < 9/11.
// Verifies: capacity grows exactly on the ninth insert; nothing is lost.
#[test]
fn scenario_growth_on_ninth_distinct_key() {
    let mut t = CountingHashTable::new();
    assert_eq!(t.capacity(), MIN_CAPACITY);
    let ks = keys(9);
    for (i, k) in ks.iter().enumerate() {
        t.insert_or_increment(k);
        if i < 8 {
            assert_eq!(t.capacity(), MIN_CAPACITY);
        }
    }
    assert!(t.capacity() > MIN_CAPACITY);
    assert!(is_valid_size(t.capacity()));
    assert!(t.load_factor() <= MAX_LOAD_FACTOR);
    for k in &ks {
        assert_eq!(t.lookup(k), 1);
    }
}

// Test: five entries in a 13-bucket table, then four removals.
// Assumes: 5/13 and 4/13 are above 0.30, 3/13 is below.
// Verifies: the table shrinks to a smaller valid size right after the
// removal that crosses the threshold; the survivor keeps its count.
#[test]
fn scenario_shrink_after_removals() {
    let mut t = CountingHashTable::with_capacity(13);
    assert_eq!(t.capacity(), 13);
    let ks = keys(5);
    for k in &ks {
        t.insert_or_increment(k);
    }
    t.insert_or_increment(&ks[4]);
    t.insert_or_increment(&ks[4]);

    t.remove(&ks[0]);
    assert_eq!(t.capacity(), 13);
    t.remove(&ks[1]);
    assert_eq!(t.capacity(), next_valid_size(13 / 2));
    assert_eq!(t.capacity(), MIN_CAPACITY);
    t.remove(&ks[2]);
    t.remove(&ks[3]);

    assert!(t.load_factor() < MIN_LOAD_FACTOR);
    assert_eq!(t.capacity(), MIN_CAPACITY);
    assert_eq!(t.lookup(&ks[4]), 3);
    assert_eq!(t.unique_count(), 1);
    assert_eq!(t.total_count(), 3);
}

// Test: lookup on an empty table.
// Verifies: 0 is returned and nothing is created.
#[test]
fn scenario_lookup_missing_on_empty() {
    let t = CountingHashTable::new();
    assert_eq!(t.lookup("missing"), 0);
    assert_eq!(t.unique_count(), 0);
    assert_eq!(t.total_count(), 0);
    assert!(t.is_empty());
}

// Test: removing the same key twice.
// Verifies: the second removal is a no-op.
#[test]
fn remove_is_idempotent() {
    let mut t = CountingHashTable::new();
    t.extend(["a", "b", "b", "c"]);
    assert_eq!(t.remove("b"), Some(2));
    let after_once = (t.unique_count(), t.total_count(), t.capacity());
    assert_eq!(t.remove("b"), None);
    assert_eq!(after_once, (t.unique_count(), t.total_count(), t.capacity()));
    assert_eq!(t.lookup("a"), 1);
    assert_eq!(t.lookup("c"), 1);
}

// Test: a key removed and inserted again starts counting from 1.
#[test]
fn reinsert_after_remove_restarts_count() {
    let mut t = CountingHashTable::new();
    for _ in 0..4 {
        t.insert_or_increment("again");
    }
    t.remove("again");
    assert_eq!(t.insert_or_increment("again"), 1);
    assert_eq!(t.total_count(), 1);
}

// Test: sustained growth then full drain.
// Verifies: capacity walks up and back down through valid sizes only and
// ends at the minimum with an empty table.
#[test]
fn grow_then_drain_returns_to_minimum() {
    let mut t = CountingHashTable::new();
    let ks = keys(2_000);
    let mut capacities = vec![t.capacity()];
    for k in &ks {
        t.insert_or_increment(k);
        if capacities.last() != Some(&t.capacity()) {
            capacities.push(t.capacity());
        }
    }
    assert!(capacities.windows(2).all(|w| w[0] < w[1]));
    assert!(capacities.iter().all(|&c| is_valid_size(c)));
    // Each growth at least doubles the capacity.
    assert!(capacities.windows(2).all(|w| w[1] >= 2 * w[0]));

    for k in &ks {
        t.remove(k);
        assert!(is_valid_size(t.capacity()));
    }
    assert!(t.is_empty());
    assert_eq!(t.unique_count(), 0);
    assert_eq!(t.capacity(), MIN_CAPACITY);
}

// Test: requested capacities.
// Verifies: requests round up to the next valid size and a valid size is
// kept as is.
#[test]
fn with_capacity_uses_next_valid_size() {
    for req in [0, 1, 11, 12, 50, 1_000, 10_211] {
        let t = CountingHashTable::with_capacity(req);
        assert_eq!(t.capacity(), next_valid_size(req));
        assert!(t.capacity() >= req.max(MIN_CAPACITY));
    }
}

// Test: copy by clone, then mutate both sides.
// Verifies: neither table observes the other's mutations.
#[test]
fn clone_round_trip_is_independent() {
    let mut original = CountingHashTable::new();
    original.extend(keys(30).iter().map(String::as_str));
    original.insert_or_increment("word0");

    let mut copy = original.clone();
    assert_eq!(copy.capacity(), original.capacity());
    assert_eq!(copy.unique_count(), original.unique_count());
    assert_eq!(copy.total_count(), original.total_count());
    assert_eq!(copy.load_factor(), original.load_factor());

    for k in keys(25) {
        copy.remove(&k);
    }
    copy.insert_or_increment("copy-only");
    assert_eq!(original.unique_count(), 30);
    assert_eq!(original.total_count(), 31);
    assert_eq!(original.lookup("word0"), 2);
    assert_eq!(original.lookup("copy-only"), 0);

    original.insert_or_increment("original-only");
    assert_eq!(copy.lookup("original-only"), 0);
    assert_eq!(copy.unique_count(), 6);
}

// Test: copy by clone_from into a table with unrelated contents.
// Verifies: old contents are gone and the two tables are independent.
#[test]
fn clone_from_round_trip_is_independent() {
    let mut source = CountingHashTable::new();
    source.extend(["x", "y", "y"]);
    let mut dest = CountingHashTable::with_capacity(1_000);
    dest.extend(keys(100).iter().map(String::as_str));

    dest.clone_from(&source);
    assert_eq!(dest.capacity(), source.capacity());
    assert_eq!(dest.unique_count(), 2);
    assert_eq!(dest.total_count(), 3);
    assert_eq!(dest.lookup("word7"), 0);

    dest.remove("y");
    source.insert_or_increment("x");
    assert_eq!(source.lookup("y"), 2);
    assert_eq!(dest.lookup("x"), 1);
}

// Test: iteration matches lookups.
#[test]
fn iter_agrees_with_lookup() {
    let t: CountingHashTable = "to be or not to be".split(' ').collect();
    let mut pairs: Vec<(&str, u64)> = t.iter().collect();
    pairs.sort();
    assert_eq!(pairs, vec![("be", 2), ("not", 1), ("or", 1), ("to", 2)]);
    for (k, c) in pairs {
        assert_eq!(t.lookup(k), c);
    }
    assert_eq!(t.iter().map(|(_, c)| c).sum::<u64>(), t.total_count());
}
