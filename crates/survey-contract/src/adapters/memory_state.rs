use crate::domain::ContractError;
use crate::ports::{RangeIter, WorldState};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

/// In-memory implementation of [`WorldState`] for tests and demos.
///
/// Keys are ordered lexicographically, so prefix-scoped range scans
/// behave the same way a real state database's would.
#[derive(Default)]
pub struct InMemoryWorldState {
    records: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryWorldState {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys currently stored, across all entity families.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WorldState for InMemoryWorldState {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ContractError> {
        let records = self
            .records
            .read()
            .map_err(|_| ContractError::Io("state lock poisoned".into()))?;
        Ok(records.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), ContractError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| ContractError::Io("state lock poisoned".into()))?;
        records.insert(key.to_owned(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), ContractError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| ContractError::Io("state lock poisoned".into()))?;
        records.remove(key);
        Ok(())
    }

    fn range(&self, start: &str, end: &str) -> Result<RangeIter, ContractError> {
        let records = self
            .records
            .read()
            .map_err(|_| ContractError::Io("state lock poisoned".into()))?;

        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_owned())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_owned())
        };

        // Snapshot under the read lock; the iterator itself holds no lock.
        let snapshot: Vec<(String, Vec<u8>)> = records
            .range::<String, _>((lower, upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Box::new(snapshot.into_iter()))
    }
}
