use std::collections::{BTreeMap, BTreeSet, HashSet};

use mapstream::collectors::{
    ListMultiMap, MultiValued, SetMultiMap, to_list_multimap, to_multimap, to_multimap_with,
    to_set_multimap, to_vec,
};
use mapstream::{Characteristics, MapStream, Pair, from_fn, from_multimap};

fn readings() -> ListMultiMap<&'static str, i32> {
    let mut map = ListMultiMap::new();
    map.put("key1", 1);
    map.put("key2", 2);
    map.put("key1", 3);
    map
}

#[test]
fn test_every_association_is_a_pair() {
    let map = readings();
    let mut out = from_multimap(&map).collect(to_vec()).unwrap();
    out.sort();
    assert_eq!(
        vec![Pair::new("key1", 1), Pair::new("key1", 3), Pair::new("key2", 2)],
        out
    );
    assert_eq!(3, from_multimap(&map).count().unwrap());
}

#[test]
fn test_multimap_round_trip() {
    let map = readings();
    assert_eq!(map, from_multimap(&map).collect(to_multimap()).unwrap());
    assert_eq!(map, from_multimap(&map).collect(to_list_multimap()).unwrap());
}

#[test]
fn test_list_multimap_keeps_repeats() {
    let out = from_fn(|| [("a", 1), ("a", 1), ("b", 2), ("a", 3)])
        .collect(to_list_multimap())
        .unwrap();
    assert_eq!(vec![1, 1, 3], out["a"]);
    assert_eq!(vec![2], out["b"]);
}

#[test]
fn test_set_multimap_drops_repeats() {
    let out: SetMultiMap<_, _> = from_fn(|| [("a", 1), ("a", 1), ("b", 2), ("a", 3)])
        .collect(to_set_multimap())
        .unwrap();
    assert_eq!(HashSet::from([1, 3]), out["a"]);
    assert_eq!(3, from_multimap(&out).count().unwrap());
}

#[test]
fn test_sorted_multimap_from_factory() {
    let out = from_fn(|| [(2, 'b'), (1, 'z'), (2, 'a'), (2, 'b')])
        .map_values(|c| c.to_ascii_uppercase())
        .collect(to_multimap_with(
            BTreeMap::<i32, BTreeSet<char>>::new,
            Characteristics::UNORDERED,
        ))
        .unwrap();
    assert_eq!(
        vec![Pair::new(1, 'Z'), Pair::new(2, 'A'), Pair::new(2, 'B')],
        from_multimap(&out).collect(to_vec()).unwrap()
    );
}

#[test]
fn test_multimap_source_reads_current_contents() {
    let mut map = readings();
    assert_eq!(3, from_multimap(&map).count().unwrap());
    map.put("key3", 4);
    let stream = from_multimap(&map).filter_values(|v| *v > 2);
    assert_eq!(2, stream.count().unwrap());
}
