//! Fixed-capacity hash table with separate chaining.
//!
//! ```text
//!  buckets (Vec<Vec<Identifier>>)
//! ┌─────────┐
//! │ 0       │ -> []
//! │ 1       │ -> [a]
//! │ 2       │ -> [b, c, d]   c and d each counted as one collision
//! │ ...     │
//! └─────────┘
//! ```
//!
//! A collision is counted once per insert that lands in a bucket which is
//! already non-empty, not once per pair of colliding keys. Keys are never
//! removed and the table never grows.
use std::num::NonZeroUsize;

use crate::error::{Error, Result};
use crate::fold::{Identifier, fold_digits};

#[derive(Clone, Debug)]
pub struct ChainedHashTable {
    buckets: Vec<Vec<Identifier>>,
    capacity: NonZeroUsize,
    collisions: usize,
    len: usize,
}

impl ChainedHashTable {
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(Error::InvalidCapacity { capacity })?;
        tracing::debug!(capacity = capacity.get(), "allocating chained hash table");
        Ok(Self {
            buckets: vec![Vec::new(); capacity.get()],
            capacity,
            collisions: 0,
            len: 0,
        })
    }

    #[inline(always)]
    fn index_of(&self, key: &Identifier) -> usize {
        (fold_digits(key.as_bytes()) % self.capacity.get() as u64) as usize
    }

    /// Append `key` to its bucket and return the bucket index.
    pub fn insert(&mut self, key: Identifier) -> usize {
        let index = self.index_of(&key);
        let bucket = &mut self.buckets[index];
        if !bucket.is_empty() {
            self.collisions += 1;
        }
        bucket.push(key);
        self.len += 1;
        index
    }

    /// Empty every bucket and zero the collision counter. Bucket allocations
    /// are kept for the next round.
    pub fn reset(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.collisions = 0;
        self.len = 0;
        tracing::debug!(capacity = self.capacity.get(), "table reset");
    }

    pub fn contains(&self, key: &Identifier) -> bool {
        self.buckets[self.index_of(key)].contains(key)
    }

    /// Non-empty buckets in index order, keys in insertion order.
    pub fn snapshot(&self) -> impl Iterator<Item = (usize, &[Identifier])> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(i, bucket)| (i, bucket.as_slice()))
    }

    pub fn bucket(&self, index: usize) -> Option<&[Identifier]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn occupied_buckets(&self) -> usize {
        self.buckets.iter().filter(|b| !b.is_empty()).count()
    }

    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity.get() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fold::fold_hash;

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(matches!(
            ChainedHashTable::new(0),
            Err(Error::InvalidCapacity { capacity: 0 })
        ));
    }

    #[test]
    fn fresh_table_is_empty() {
        let table = ChainedHashTable::new(16).unwrap();
        assert_eq!(table.capacity(), 16);
        assert_eq!(table.collisions(), 0);
        assert!(table.is_empty());
        assert_eq!(table.snapshot().count(), 0);
        assert_eq!(table.longest_chain(), 0);
    }

    #[test]
    fn capacity_one_collides_on_every_insert_after_first() {
        let mut table = ChainedHashTable::new(1).unwrap();
        for key in [
            "000000000001",
            "000000000002",
            "123456789012",
            "999999999999",
            "314159265358",
        ] {
            assert_eq!(table.insert(id(key)), 0);
        }
        assert_eq!(table.collisions(), 4);
        assert_eq!(table.bucket(0).unwrap().len(), 5);
    }

    #[test]
    fn chain_preserves_insertion_order() {
        // Group sums 3, 7, 13, 23 -> buckets 3, 7, 3, 3 with capacity 10.
        let keys = [
            id("000000000003"),
            id("000000000007"),
            id("000100020010"),
            id("002000000003"),
        ];
        let mut table = ChainedHashTable::new(10).unwrap();
        let indices: Vec<usize> = keys.iter().map(|k| table.insert(*k)).collect();
        assert_eq!(indices, vec![3, 7, 3, 3]);
        assert_eq!(table.collisions(), 2);
        assert_eq!(table.bucket(3).unwrap(), &[keys[0], keys[2], keys[3]]);
        assert_eq!(table.bucket(7).unwrap(), &[keys[1]]);
    }

    #[test]
    fn duplicate_keys_count_as_collisions() {
        let mut table = ChainedHashTable::new(101).unwrap();
        let key = id("555555555555");
        for _ in 0..6 {
            table.insert(key);
        }
        assert_eq!(table.collisions(), 5);
        assert_eq!(table.len(), 6);
        assert_eq!(table.occupied_buckets(), 1);
    }

    #[test]
    fn reset_clears_everything_but_capacity() {
        let mut table = ChainedHashTable::new(3).unwrap();
        for i in 0..20u64 {
            table.insert(id(&format!("{i:012}")));
        }
        assert!(table.collisions() > 0);
        table.reset();
        assert_eq!(table.capacity(), 3);
        assert_eq!(table.collisions(), 0);
        assert_eq!(table.len(), 0);
        assert!((0..3).all(|i| table.bucket(i).unwrap().is_empty()));
    }

    #[test]
    fn snapshot_is_in_index_order() {
        let mut table = ChainedHashTable::new(10).unwrap();
        table.insert(id("000000000009"));
        table.insert(id("000000000001"));
        table.insert(id("000000000005"));
        let indices: Vec<usize> = table.snapshot().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1, 5, 9]);
    }

    #[test]
    fn keys_live_in_their_hash_bucket() {
        let mut table = ChainedHashTable::new(97).unwrap();
        for i in 0..500u64 {
            table.insert(id(&format!("{:012}", i * 7919)));
        }
        for (index, chain) in table.snapshot() {
            for key in chain {
                assert_eq!(fold_hash(key.as_str(), 97).unwrap(), index);
            }
        }
    }

    #[test]
    fn contains_finds_inserted_keys() {
        let mut table = ChainedHashTable::new(13).unwrap();
        table.insert(id("100020003000"));
        assert!(table.contains(&id("100020003000")));
        assert!(!table.contains(&id("100020003001")));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn identifiers(max: usize) -> impl Strategy<Value = Vec<Identifier>> {
        prop::collection::vec("[0-9]{12}", 0..max)
            .prop_map(|v| v.iter().map(|s| Identifier::new(s).unwrap()).collect())
    }

    proptest! {
        #[test]
        fn prop_collisions_match_occupied_inserts(
            capacity in 1usize..64,
            keys in identifiers(200),
        ) {
            let mut table = ChainedHashTable::new(capacity).unwrap();
            let mut expected = 0;
            for key in keys {
                let index = fold_digits(key.as_bytes()) as usize % capacity;
                if !table.bucket(index).unwrap().is_empty() {
                    expected += 1;
                }
                prop_assert_eq!(table.insert(key), index);
            }
            prop_assert_eq!(table.collisions(), expected);
            prop_assert_eq!(table.collisions(), table.len() - table.occupied_buckets());
        }

        #[test]
        fn prop_reset_forgets_history(
            capacity in 1usize..64,
            keys in identifiers(100),
        ) {
            let mut table = ChainedHashTable::new(capacity).unwrap();
            for key in keys {
                table.insert(key);
            }
            table.reset();
            prop_assert_eq!(table.collisions(), 0);
            prop_assert_eq!(table.snapshot().count(), 0);
        }
    }
}
