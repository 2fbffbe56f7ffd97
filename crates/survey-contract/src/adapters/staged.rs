//! Endorsement-time staging: execute against an overlay, commit later.
//!
//! A submitted transaction must leave the world state untouched unless
//! it reaches commitment. [`StagedState`] captures every put/delete as
//! an intent in a [`WriteSet`] while reading through to the base store,
//! so execution and commitment are separate steps.

use crate::domain::ContractError;
use crate::ports::{RangeIter, WorldState};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, Mutex};

/// Captured write intents: `Some(value)` is a put, `None` a delete.
#[derive(Debug, Clone, Default)]
pub struct WriteSet {
    writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl WriteSet {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Replay the captured writes onto `state`, in key order.
    pub fn apply(self, state: &dyn WorldState) -> Result<(), ContractError> {
        for (key, intent) in self.writes {
            match intent {
                Some(value) => state.put(&key, value)?,
                None => state.delete(&key)?,
            }
        }
        Ok(())
    }
}

/// A [`WorldState`] overlay that defers all writes into a [`WriteSet`].
pub struct StagedState {
    base: Arc<dyn WorldState>,
    staged: Mutex<BTreeMap<String, Option<Vec<u8>>>>,
}

impl StagedState {
    pub fn new(base: Arc<dyn WorldState>) -> Self {
        Self {
            base,
            staged: Mutex::new(BTreeMap::new()),
        }
    }

    /// Consume the overlay, yielding the captured writes.
    pub fn into_write_set(self) -> WriteSet {
        WriteSet {
            writes: self.staged.into_inner().unwrap_or_default(),
        }
    }
}

impl WorldState for StagedState {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ContractError> {
        let staged = self
            .staged
            .lock()
            .map_err(|_| ContractError::Io("staged lock poisoned".into()))?;
        match staged.get(key) {
            Some(intent) => Ok(intent.clone()),
            None => self.base.get(key),
        }
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), ContractError> {
        let mut staged = self
            .staged
            .lock()
            .map_err(|_| ContractError::Io("staged lock poisoned".into()))?;
        staged.insert(key.to_owned(), Some(value));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), ContractError> {
        let mut staged = self
            .staged
            .lock()
            .map_err(|_| ContractError::Io("staged lock poisoned".into()))?;
        staged.insert(key.to_owned(), None);
        Ok(())
    }

    fn range(&self, start: &str, end: &str) -> Result<RangeIter, ContractError> {
        // Merge the base snapshot with staged intents inside the bounds.
        let mut merged: BTreeMap<String, Vec<u8>> = self.base.range(start, end)?.collect();

        let staged = self
            .staged
            .lock()
            .map_err(|_| ContractError::Io("staged lock poisoned".into()))?;

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

        for (key, intent) in staged.range::<String, _>((lower, upper)) {
            match intent {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        Ok(Box::new(merged.into_iter()))
    }
}
