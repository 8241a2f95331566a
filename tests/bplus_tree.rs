use std::collections::HashSet;
use std::collections::hash_map::RandomState;

use bplus_index::{BPlusTree, BranchingRatio, Collection, HashKey, Key, Operation, TreeError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Values in a range narrow enough to produce plenty of duplicates.
fn value_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Add(i64),
    Insert(i64),
    Contains(i64),
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        3 => value_strategy().prop_map(TreeOp::Add),
        3 => value_strategy().prop_map(TreeOp::Insert),
        4 => value_strategy().prop_map(TreeOp::Contains),
    ]
}

// ─── Randomized comparison against HashSet ───────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both a tree and a HashSet
    /// and asserts identical results at every step.
    #[test]
    fn ops_match_hashset(
        t in 1usize..8,
        ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE),
    ) {
        let mut tree: BPlusTree<i64> = BPlusTree::with_branching_ratio(t).unwrap();
        let mut model: HashSet<i64> = HashSet::new();

        for op in &ops {
            match op {
                TreeOp::Add(v) => {
                    tree.add(*v);
                    model.insert(*v);
                }
                TreeOp::Insert(v) => {
                    prop_assert_eq!(tree.insert(*v), model.insert(*v), "insert({})", v);
                }
                TreeOp::Contains(v) => {
                    prop_assert_eq!(tree.contains(v), model.contains(v), "contains({})", v);
                }
            }
            prop_assert_eq!(tree.len(), model.len(), "len mismatch after {:?}", op);
        }
    }

    /// Every inserted value is found afterwards; every other value is not.
    #[test]
    fn contains_exactly_what_was_added(
        t in 1usize..8,
        values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE),
    ) {
        let mut tree = BPlusTree::with_branching_ratio(t).unwrap();
        tree.extend(values.iter().copied());
        let added: HashSet<i64> = values.iter().copied().collect();

        prop_assert_eq!(tree.len(), added.len());
        for v in -2_010i64..2_010 {
            prop_assert_eq!(tree.contains(&v), added.contains(&v), "contains({})", v);
        }
    }

    /// Re-adding present values never changes the count or loses anything.
    #[test]
    fn re_adding_is_a_no_op(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let mut tree: BPlusTree<i64> = values.iter().copied().collect();
        let len = tree.len();
        let height = tree.height();
        let nodes = tree.node_count();

        for v in &values {
            prop_assert!(!tree.insert(*v));
        }

        prop_assert_eq!(tree.len(), len);
        prop_assert_eq!(tree.height(), height);
        prop_assert_eq!(tree.node_count(), nodes);
        for v in &values {
            prop_assert!(tree.contains(v));
        }
    }

    /// Height grows only logarithmically: every split leaves at least `t - 1` keys per node.
    /// `t = 1` has no such floor; see `ratio_one_degenerates_under_descending_inserts`.
    #[test]
    fn height_stays_logarithmic(t in 2usize..8, n in 1usize..TEST_SIZE) {
        let mut tree = BPlusTree::with_branching_ratio(t).unwrap();
        tree.extend(0..n as i64);

        // Leaves hold at least t keys, internal nodes at least t children.
        let mut bound = 1;
        let mut reach = t;
        while reach < n {
            reach *= t;
            bound += 1;
        }
        prop_assert!(tree.height() <= bound + 1, "height {} for n = {}, t = {}", tree.height(), n, t);
    }
}

// ─── Concrete scenarios ──────────────────────────────────────────────────────

#[test]
fn sixth_ascending_key_grows_a_root() {
    let mut tree = BPlusTree::with_branching_ratio(3).unwrap();
    for i in 0..5 {
        tree.add(i);
    }
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.node_count(), 1);

    tree.add(5);

    // One leaf split: two leaves and a fresh root.
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.node_count(), 3);
    assert!((0..6).all(|k| tree.contains(&k)));
    assert!(!tree.contains(&6));

    // A seventh key lands in a half-full leaf without splitting again.
    tree.add(6);
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.node_count(), 3);
}

#[test]
fn zero_branching_ratio_is_rejected() {
    let result = BPlusTree::<i32>::with_branching_ratio(0);
    assert_eq!(result.err(), Some(TreeError::InvalidBranchingRatio(0)));
    assert_eq!(BranchingRatio::try_from(0), Err(TreeError::InvalidBranchingRatio(0)));
}

#[test]
fn ratio_six_keeps_five_elements_in_root_leaf() {
    let mut tree = BPlusTree::with_branching_ratio(6).unwrap();
    assert_eq!(tree.branching_ratio().get(), 6);
    for i in 0..5 {
        tree.add(i);
    }
    assert!((0..5).all(|i| tree.contains(&i)));
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn default_tree_uses_ratio_three() {
    let tree: BPlusTree<String, _> = BPlusTree::with_key_extractor(BranchingRatio::default(), |s: &String| s.len() as Key);
    assert_eq!(tree.branching_ratio(), BranchingRatio::DEFAULT);
    assert!(tree.is_empty());

    let tree: BPlusTree<u8> = BPlusTree::default();
    assert_eq!(tree.branching_ratio().get(), 3);
    assert_eq!(tree.height(), 1);
}

#[test]
fn large_sequential_and_reverse_loads() {
    for t in [2, 3, 16] {
        let mut ascending = BPlusTree::with_branching_ratio(t).unwrap();
        let mut descending = BPlusTree::with_branching_ratio(t).unwrap();
        ascending.extend(0..10_000i64);
        descending.extend((0..10_000i64).rev());

        for tree in [&ascending, &descending] {
            assert_eq!(tree.len(), 10_000);
            let missing: Vec<i64> = (0..10_000).filter(|k| !tree.contains(k)).collect();
            assert_eq!(missing, Vec::<i64>::new(), "t = {t}");
            assert!(!tree.contains(&-1));
            assert!(!tree.contains(&10_000));
        }
    }
}

#[test]
fn ratio_one_degenerates_under_descending_inserts() {
    for n in [1usize, 2, 3, 10, 60] {
        let mut tree = BPlusTree::with_branching_ratio(1).unwrap();
        tree.extend((0..n as i64).rev());

        assert_eq!(tree.len(), n);
        assert_eq!(tree.height(), n, "n = {n}");
        assert_eq!(tree.node_count(), n * (n + 1) / 2, "n = {n}");
        assert!((0..n as i64).all(|k| tree.contains(&k)));
        assert!(!tree.contains(&(n as i64)));
    }

    // Ascending input refills the right spine, so t = 1 stays shallow there.
    let mut ascending = BPlusTree::with_branching_ratio(1).unwrap();
    ascending.extend(0..1_000i64);
    assert!(ascending.height() <= 20, "height {}", ascending.height());
    assert!((0..1_000).all(|k| ascending.contains(&k)));
}

#[test]
fn get_returns_the_stored_element() {
    let mut tree = BPlusTree::with_key_extractor(BranchingRatio::new(2).unwrap(), |pair: &(i64, &str)| pair.0);
    for (id, name) in [(3, "c"), (1, "a"), (2, "b"), (5, "e"), (4, "d")] {
        tree.add((id, name));
    }
    // Same key, different payload: the first one stays.
    assert!(!tree.insert((2, "z")));

    assert_eq!(tree.get(&(2, "")), Some(&(2, "b")));
    assert_eq!(tree.get(&(6, "")), None);
}

#[test]
fn hash_keyed_strings() {
    let mut tree = BPlusTree::with_key_extractor(BranchingRatio::DEFAULT, HashKey::new(RandomState::new()));
    let words: Vec<String> = (0..500).map(|i| format!("word-{i}")).collect();
    for word in &words {
        tree.add(word.clone());
    }

    assert_eq!(tree.len(), 500);
    assert!(words.iter().all(|w| tree.contains(w)));
    assert!(!tree.contains(&"word-500".to_string()));
    assert_eq!(tree.get(&"word-42".to_string()).map(String::as_str), Some("word-42"));
}

#[test]
fn unsupported_operations_report_and_preserve() {
    let mut tree = BPlusTree::from([10, 20, 30]);

    assert_eq!(tree.remove(&10), Err(TreeError::Unsupported(Operation::Remove)));
    assert_eq!(tree.clear(), Err(TreeError::Unsupported(Operation::Clear)));
    let mut out = [0; 3];
    assert_eq!(tree.copy_to(&mut out, 0), Err(TreeError::Unsupported(Operation::CopyTo)));

    assert_eq!(tree.len(), 3);
    assert!(tree.contains(&10));
    assert_eq!(
        TreeError::Unsupported(Operation::Clear).to_string(),
        "`clear` is not supported by this tree"
    );
}

#[test]
fn generic_collection_callers() {
    fn count_new<C: Collection<char>>(collection: &mut C, text: &str) -> usize {
        let before = collection.len();
        for c in text.chars() {
            collection.add(c);
        }
        collection.len() - before
    }

    let mut tree = BPlusTree::new();
    assert_eq!(count_new(&mut tree, "hello"), 4);
    assert_eq!(count_new(&mut tree, "world"), 3);
    assert!(Collection::contains(&tree, &'w'));
    assert!(!Collection::is_read_only(&tree));
    assert!(Collection::clear(&mut tree).is_err());
}

#[test]
fn capacity_and_debug() {
    let tree: BPlusTree<i32> = BPlusTree::with_capacity(BranchingRatio::new(4).unwrap(), 64);
    assert!(tree.capacity() >= 64);
    assert_eq!(tree.branching_ratio().max_keys(), 8);

    let tree = BPlusTree::from([1u16, 2, 3]);
    assert_eq!(format!("{tree:?}"), "BPlusTree { len: 3, height: 1, branching_ratio: 3, .. }");
}
