use super::*;

use crate::stats::HISTOGRAM_BUCKETS;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

const CAPACITY: usize = 31;

/// 校验槽位与计数器一致：同一个键至多一个存活条目
fn validate_map(map: &DictMap) {
    let mut live = 0usize;
    let mut tombstones = 0usize;
    let mut keys = HashSet::new();
    for index in 0..map.capacity() {
        match map.slot(index).expect("index within capacity") {
            Slot::Occupied(entry) => {
                live += 1;
                assert!(
                    keys.insert(entry.key().as_bytes().to_vec()),
                    "duplicate live entry for {}",
                    entry.key()
                );
            }
            Slot::Tombstone => tombstones += 1,
            Slot::Empty => {}
        }
    }
    assert_eq!(live, map.len(), "live count must match len");
    assert_eq!(tombstones, map.tombstones(), "tombstone count must match");
}

#[derive(Clone, Debug)]
enum Op {
    Insert(String, String),
    Delete(String),
    Search(String),
}

fn key_strategy() -> impl Strategy<Value = String> + Clone {
    // 39 个小写键多于 31 个槽位，表满路径也能覆盖到
    "[a-cA-C]{1,3}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), "[a-z]{1,4}").prop_map(|(k, v)| Op::Insert(k, v)),
        25 => key.clone().prop_map(Op::Delete),
        25 => key.clone().prop_map(Op::Search),
    ];
    prop::collection::vec(op, 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreemap(ops in ops_strategy()) {
        let mut map = DictMap::new(DictMapConfig::with_capacity(CAPACITY)).unwrap();
        let mut model: BTreeMap<String, String> = BTreeMap::new();
        let mut user_probes = 0u64;

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let key = key.to_ascii_lowercase();
                    let expect_full = !model.contains_key(&key) && model.len() == CAPACITY;
                    match map.insert(&key, &value, Origin::Interactive) {
                        Ok(outcome) => {
                            prop_assert!(!expect_full);
                            prop_assert!(outcome.probes >= 1 && outcome.probes <= CAPACITY);
                            user_probes += outcome.probes as u64;
                            match model.get_mut(&key) {
                                Some(existing) => {
                                    prop_assert_eq!(outcome.kind, InsertKind::Merged);
                                    existing.push(';');
                                    existing.push_str(&value);
                                }
                                None => {
                                    prop_assert_eq!(outcome.kind, InsertKind::Placed);
                                    model.insert(key, value);
                                }
                            }
                        }
                        Err(DictError::TableFull { probes, .. }) => {
                            prop_assert!(expect_full);
                            prop_assert_eq!(probes, CAPACITY);
                            user_probes += probes as u64;
                        }
                        Err(err) => prop_assert!(false, "unexpected error {:?}", err),
                    }
                }
                Op::Delete(key) => {
                    let path = map.probe_path(&key);
                    let outcome = map.delete(&key).unwrap();
                    prop_assert_eq!(outcome.probes, path.len());
                    prop_assert!(outcome.probes >= 1 && outcome.probes <= CAPACITY);
                    user_probes += outcome.probes as u64;
                    prop_assert_eq!(outcome.deleted, model.remove(&key.to_ascii_lowercase()).is_some());
                    prop_assert!(map.get(&key).is_none());
                }
                Op::Search(key) => {
                    let path = map.probe_path(&key);
                    let outcome = map.search(&key).unwrap();
                    prop_assert_eq!(outcome.probes, path.len());
                    prop_assert!(outcome.probes >= 1 && outcome.probes <= CAPACITY);
                    user_probes += outcome.probes as u64;
                    let got = outcome.entry.map(|e| e.value().to_string_lossy().into_owned());
                    prop_assert_eq!(got.as_ref(), model.get(&key.to_ascii_lowercase()));
                }
            }

            prop_assert_eq!(map.len(), model.len());
        }

        validate_map(&map);
        prop_assert!(map.len() + map.tombstones() <= CAPACITY);

        let snap = map.stats();
        prop_assert_eq!(snap.user_probes, user_probes);
        prop_assert_eq!(snap.item_count, 0);
        prop_assert_eq!(snap.total_probes, 0);

        let mut got: Vec<(String, String)> = map
            .iter()
            .map(|e| (e.key().to_string_lossy().into_owned(), e.value().to_string_lossy().into_owned()))
            .collect();
        got.sort();
        let expected: Vec<(String, String)> = model.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_probe_sequence_visits_every_slot(key in "[ -~]{1,20}", capacity in prop::sample::select(vec![2usize, 3, 11, 31, 101, 20011])) {
        for algorithm in [HashAlgorithm::Multiplicative, HashAlgorithm::AHash, HashAlgorithm::XxHash] {
            let strategy = DoubleHashStrategy::new(capacity, algorithm);
            let start = strategy.probe_start(key.as_bytes());
            prop_assert!(start.home < capacity);
            prop_assert!(start.step >= 1 && start.step < capacity.max(2));

            let visited: HashSet<usize> = strategy.probe_sequence(key.as_bytes()).collect();
            prop_assert_eq!(visited.len(), capacity);
        }
    }

    #[test]
    fn prop_load_stats_sum_histogram(words in prop::collection::vec("[a-z]{1,6}", 0..=200)) {
        let mut map = DictMap::new(DictMapConfig::with_capacity(101)).unwrap();
        let mut placed = 0u64;
        let mut merged = 0u64;
        let mut not_hashed = 0u64;
        for word in &words {
            match map.insert(word, "t", Origin::Load) {
                Ok(outcome) if outcome.kind == InsertKind::Placed => placed += 1,
                Ok(_) => merged += 1,
                Err(DictError::TableFull { .. }) => not_hashed += 1,
                Err(err) => prop_assert!(false, "unexpected error {:?}", err),
            }
        }

        let snap = map.stats();
        prop_assert_eq!(snap.item_count, placed);
        prop_assert_eq!(snap.merged_count, merged);
        prop_assert_eq!(snap.not_hashed, not_hashed);
        prop_assert_eq!(snap.histogram.total(), placed + merged);
        // 直方图最后一档是截断档，只有未截断时加权和才等于总探测数
        if snap.max_probes < HISTOGRAM_BUCKETS - 1 {
            let weighted: u64 = snap.histogram.rows().map(|(p, c)| p as u64 * c).sum();
            prop_assert_eq!(weighted, snap.total_probes);
        }
        prop_assert_eq!(snap.user_ops, 0);
    }
}

#[test]
fn delete_then_reinsert_places_single_entry() {
    let mut map = DictMap::new(DictMapConfig::with_capacity(11)).unwrap();
    map.insert("cat", "gato", Origin::Load).unwrap();
    map.insert("dog", "perro", Origin::Load).unwrap();
    map.delete("cat").unwrap();
    map.insert("cat", "felino", Origin::Interactive).unwrap();
    map.insert("cat", "minino", Origin::Interactive).unwrap();

    validate_map(&map);
    assert_eq!(map.get("cat").unwrap().value().as_bytes(), b"felino;minino");
}
