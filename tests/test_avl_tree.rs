extern crate balanced_collections;
extern crate rand;

use balanced_collections::avl_tree::AvlMap;
use self::rand::Rng;

#[test]
fn test_random_insert_then_drain() {
    let mut rng = rand::thread_rng();
    let mut map = AvlMap::new();
    let mut expected = Vec::new();
    for _ in 0..100_000 {
        let key = rng.gen::<u32>();
        let val = rng.gen::<u32>();

        if !map.contains_key(&key) {
            map.insert(key, val);
            expected.push((key, val));
        }
    }

    expected.sort();
    assert_eq!(map.len(), expected.len());

    let actual = map.iter().collect::<Vec<_>>();
    for (index, pair) in expected.iter().enumerate() {
        assert_eq!(actual[index], (&pair.0, &pair.1));
        assert_eq!(map.get(&pair.0), Some(&pair.1));
    }

    // Remove every key in a shuffled order; each removal must succeed exactly once.
    let mut keys = expected.iter().map(|pair| pair.0).collect::<Vec<_>>();
    rng.shuffle(&mut keys);
    for key in &keys {
        assert!(map.remove(key).is_some());
        assert_eq!(map.remove(key), None);
    }
    assert!(map.is_empty());
}

#[test]
fn test_overwrite_round_trip() {
    let mut map = AvlMap::new();
    assert_eq!(map.insert(1, 10), None);
    assert_eq!(map.get(&1), Some(&10));
    assert_eq!(map.insert(1, 20), Some((1, 10)));
    assert_eq!(map.get(&1), Some(&20));
    assert_eq!(map.len(), 1);
}
