use std::collections::HashMap;
use std::hash::Hash;

use concurrent_map::ConcurrentMap;

/// Create a map pre-populated with "key_N" -> N for N in 0..count
pub fn setup_map(count: usize) -> ConcurrentMap<String, usize> {
    let map = ConcurrentMap::with_capacity(count);
    for i in 0..count {
        map.set(format!("key_{i}"), i);
    }
    map
}

/// Assert that a map holds exactly the expected entries
pub fn assert_map_eq<K, V>(map: &ConcurrentMap<K, V>, expected: &[(K, V)])
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: PartialEq + Clone + std::fmt::Debug,
{
    let expected: HashMap<K, V> = expected.iter().cloned().collect();
    assert_eq!(map.items(), expected);
}
