#![cfg(test)]

// Property tests for CountingHashTable kept inside the crate so they can
// inspect chain structure after every step.

use crate::capacity::MIN_CAPACITY;
use crate::counting_hash_table::{CountingHashTable, MAX_LOAD_FACTOR, MIN_LOAD_FACTOR};
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations so shrinking moves toward earlier keys and shorter
// op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Remove(usize),
    Lookup(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=48).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let lookup_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => idx.clone().prop_map(OpI::Insert),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => prop_oneof![
                lookup_pool.prop_map(|s: String| s),
                "[a-z]{0,4}".prop_map(|s| s)
            ]
            .prop_map(OpI::Lookup),
        ];
        proptest::collection::vec(op, 1..300).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_against_model<S: BuildHasher>(
    sut: &CountingHashTable<S>,
    model: &HashMap<String, u64>,
) -> Result<(), TestCaseError> {
    sut.assert_structure();
    prop_assert_eq!(sut.unique_count(), model.len());
    prop_assert_eq!(sut.total_count(), model.values().sum::<u64>());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    for (k, &v) in model {
        prop_assert_eq!(sut.lookup(k), v);
    }
    Ok(())
}

// Property: State-machine equivalence against a HashMap<String, u64> model.
// Invariants exercised across random operation sequences:
// - `insert_or_increment` returns the model count after incrementing.
// - `remove` returns the full stored count and drops it from the total.
// - Every entry is linked exactly once, in the bucket its hash selects.
// - Load factor stays at or below the maximum; after a removal it is at or
//   above the minimum unless the table is already at minimum capacity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = CountingHashTable::new();
        let mut model: HashMap<String, u64> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i) => {
                    let k = &pool[i];
                    let expected = {
                        let c = model.entry(k.clone()).or_insert(0);
                        *c += 1;
                        *c
                    };
                    prop_assert_eq!(sut.insert_or_increment(k), expected);
                    prop_assert!(sut.load_factor() <= MAX_LOAD_FACTOR);
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(k));
                    prop_assert!(
                        sut.load_factor() >= MIN_LOAD_FACTOR || sut.capacity() == MIN_CAPACITY,
                        "load {} at capacity {}", sut.load_factor(), sut.capacity()
                    );
                }
                OpI::Lookup(k) => {
                    let before = (sut.unique_count(), sut.total_count(), sut.capacity());
                    prop_assert_eq!(sut.lookup(&k), model.get(&k).copied().unwrap_or(0));
                    prop_assert_eq!(before, (sut.unique_count(), sut.total_count(), sut.capacity()));
                }
            }
            check_against_model(&sut, &model)?;
        }
    }
}

// Property: a clone and its source evolve independently; each matches its
// own model and neither's structure is disturbed by the other's mutations.
proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]
    #[test]
    fn prop_clone_independence(
        (pool, ops) in arb_scenario(),
        split in 0usize..300,
        mutate_copy in any::<bool>(),
    ) {
        let mut a = CountingHashTable::new();
        let mut model_a: HashMap<String, u64> = HashMap::new();
        let split = split.min(ops.len());

        let apply = |t: &mut CountingHashTable, m: &mut HashMap<String, u64>, op: &OpI| match op {
            OpI::Insert(i) => {
                t.insert_or_increment(&pool[*i]);
                *m.entry(pool[*i].clone()).or_insert(0) += 1;
            }
            OpI::Remove(i) => {
                t.remove(&pool[*i]);
                m.remove(&pool[*i]);
            }
            OpI::Lookup(_) => {}
        };

        for op in &ops[..split] {
            apply(&mut a, &mut model_a, op);
        }
        let mut b = if mutate_copy {
            a.clone()
        } else {
            let mut b = CountingHashTable::with_capacity(97);
            b.insert_or_increment("stale");
            b.clone_from(&a);
            b
        };
        let mut model_b = model_a.clone();
        prop_assert_eq!(b.capacity(), a.capacity());

        for op in &ops[split..] {
            if mutate_copy {
                apply(&mut b, &mut model_b, op);
            } else {
                apply(&mut a, &mut model_a, op);
            }
        }
        check_against_model(&a, &model_a)?;
        check_against_model(&b, &model_b)?;
    }
}
