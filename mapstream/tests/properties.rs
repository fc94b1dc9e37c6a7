//! Randomized checks of the pipeline laws over many seeded inputs.

use std::collections::{BTreeMap, HashMap, HashSet};

use mapstream::collectors::{to_map, to_map_merging, to_vec};
use mapstream::{MapStream, Pair, from_fn, of};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const ROUNDS: u64 = 64;

fn random_map(rng: &mut SmallRng) -> HashMap<u32, i64> {
    let len = rng.gen_range(0..40);
    (0..len)
        .map(|_| (rng.gen_range(0..100), rng.gen_range(-50..50)))
        .collect()
}

fn random_pairs(rng: &mut SmallRng) -> Vec<(u8, u8)> {
    let len = rng.gen_range(0..60);
    (0..len)
        .map(|_| (rng.gen_range(0..6), rng.gen_range(0..6)))
        .collect()
}

#[test]
fn test_to_map_reproduces_any_map() {
    let mut rng = SmallRng::seed_from_u64(0);
    for _ in 0..ROUNDS {
        let map = random_map(&mut rng);
        assert_eq!(map, of(&map).collect(to_map()).unwrap());
    }
}

#[test]
fn test_merge_applies_in_insertion_order() {
    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..ROUNDS {
        let map: BTreeMap<u32, i64> = random_map(&mut rng).into_iter().collect();
        let Some((&dup_key, &original)) = map.iter().next() else {
            continue;
        };
        let extra = rng.gen_range(-50..50);
        let items: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).chain([(dup_key, extra)]).collect();

        let out = from_fn(|| items.clone())
            .collect(to_map_merging(|v1: i64, v2: i64| v1 * 1000 + v2))
            .unwrap();
        assert_eq!(original * 1000 + extra, out[&dup_key]);
        assert_eq!(map.len(), out.len());
    }
}

#[test]
fn test_filter_keys_matches_filtered_subset() {
    let mut rng = SmallRng::seed_from_u64(2);
    for _ in 0..ROUNDS {
        let map = random_map(&mut rng);
        let modulus: u32 = rng.gen_range(1..5);
        let out = of(&map)
            .filter_keys(|k| k % modulus == 0)
            .collect(to_map())
            .unwrap();
        let expected: HashMap<_, _> = map
            .iter()
            .filter(|(k, _)| *k % modulus == 0)
            .map(|(k, v)| (*k, *v))
            .collect();
        assert_eq!(expected, out);

        let out = of(&map)
            .filter_values(|v| *v < 0)
            .collect(to_map())
            .unwrap();
        let expected: HashMap<_, _> = map
            .iter()
            .filter(|(_, v)| **v < 0)
            .map(|(k, v)| (*k, *v))
            .collect();
        assert_eq!(expected, out);
    }
}

#[test]
fn test_limit_yields_prefix() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..ROUNDS {
        let items = random_pairs(&mut rng);
        let n = rng.gen_range(0..80);
        let out = from_fn(|| items.clone()).limit(n).collect(to_vec()).unwrap();
        let expected: Vec<_> = items.iter().copied().take(n).map(Pair::from).collect();
        assert_eq!(n.min(items.len()), out.len());
        assert_eq!(expected, out);
    }
}

#[test]
fn test_skip_then_limit_is_a_window() {
    let mut rng = SmallRng::seed_from_u64(4);
    for _ in 0..ROUNDS {
        let items = random_pairs(&mut rng);
        let skip = rng.gen_range(0..70);
        let limit = rng.gen_range(0..70);
        let out = from_fn(|| items.clone())
            .skip(skip)
            .limit(limit)
            .collect(to_vec())
            .unwrap();
        let expected: Vec<_> = items
            .iter()
            .copied()
            .skip(skip)
            .take(limit)
            .map(Pair::from)
            .collect();
        assert_eq!(expected, out);
    }
}

#[test]
fn test_distinct_removes_exactly_repeats() {
    let mut rng = SmallRng::seed_from_u64(5);
    for _ in 0..ROUNDS {
        let items = random_pairs(&mut rng);
        let out = from_fn(|| items.clone())
            .distinct()
            .collect(to_vec())
            .unwrap();

        let mut seen = HashSet::new();
        let expected: Vec<_> = items
            .iter()
            .copied()
            .filter(|item| seen.insert(*item))
            .map(Pair::from)
            .collect();
        assert_eq!(expected, out);
    }
}

#[test]
fn test_distinct_keys_keeps_first_pair_per_key() {
    let mut rng = SmallRng::seed_from_u64(6);
    for _ in 0..ROUNDS {
        let items = random_pairs(&mut rng);
        let out = from_fn(|| items.clone())
            .distinct_keys()
            .collect(to_vec())
            .unwrap();

        let mut seen = HashSet::new();
        let expected: Vec<_> = items
            .iter()
            .copied()
            .filter(|(k, _)| seen.insert(*k))
            .map(Pair::from)
            .collect();
        assert_eq!(expected, out);
    }
}

#[test]
fn test_sort_is_stable() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..ROUNDS {
        let items = random_pairs(&mut rng);

        let out = from_fn(|| items.clone())
            .sorted_values()
            .collect(to_vec())
            .unwrap();
        let mut expected = items.clone();
        expected.sort_by_key(|(_, v)| *v);
        assert_eq!(
            expected.into_iter().map(Pair::from).collect::<Vec<_>>(),
            out
        );

        let out = from_fn(|| items.clone())
            .sorted_keys_by(|a, b| b.cmp(a))
            .collect(to_vec())
            .unwrap();
        let mut expected = items.clone();
        expected.sort_by(|(a, _), (b, _)| b.cmp(a));
        assert_eq!(
            expected.into_iter().map(Pair::from).collect::<Vec<_>>(),
            out
        );
    }
}

#[test]
fn test_count_matches_source_size() {
    let mut rng = SmallRng::seed_from_u64(8);
    for _ in 0..ROUNDS {
        let items = random_pairs(&mut rng);
        let stream = from_fn(|| items.clone());
        assert_eq!(items.len(), stream.count().unwrap());
        assert_eq!(
            items.iter().any(|(k, v)| k == v),
            stream.any_match(|k, v| k == v).unwrap()
        );
        assert_eq!(
            items.iter().all(|(k, _)| *k < 5),
            stream.all_match(|k, _v| *k < 5).unwrap()
        );
    }
}
