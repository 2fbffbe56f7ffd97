//! # Survey Contract
//!
//! One generic CRUD module serving every entity family. Each operation
//! is existence-checked: create rejects a present ID, read/update/delete
//! reject an absent one. Update is a full-record overwrite, never a
//! partial merge.
//!
//! ## Consistency
//!
//! `create` is check-then-put without a lock. When two submitters race
//! on the same ID, the surrounding ledger's per-key ordering decides the
//! winner; this module assumes that guarantee rather than reproducing it.

use crate::domain::{fixtures, ContractError, Record};
use crate::ports::WorldState;
use std::sync::Arc;
use tracing::{debug, info};

/// CRUD business logic over a [`WorldState`] store.
pub struct SurveyContract<S: WorldState> {
    state: Arc<S>,
}

impl<S: WorldState> Clone for SurveyContract<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: WorldState> SurveyContract<S> {
    pub fn new(state: Arc<S>) -> Self {
        Self { state }
    }

    /// True when a record of family `R` exists under `id`.
    pub fn exists<R: Record>(&self, id: &str) -> Result<bool, ContractError> {
        Ok(self.state.get(&R::state_key(id))?.is_some())
    }

    /// Store a new record; fails if the ID is already present.
    pub fn create<R: Record>(&self, record: R) -> Result<(), ContractError> {
        if self.exists::<R>(record.id())? {
            return Err(ContractError::AlreadyExists {
                entity: R::ENTITY,
                id: record.id().to_owned(),
            });
        }

        debug!(entity = R::ENTITY, id = record.id(), "creating record");
        self.put_record(&record)
    }

    /// Fetch and decode the record under `id`.
    pub fn read<R: Record>(&self, id: &str) -> Result<R, ContractError> {
        let key = R::state_key(id);
        let bytes = self.state.get(&key)?.ok_or_else(|| ContractError::NotFound {
            entity: R::ENTITY,
            id: id.to_owned(),
        })?;

        serde_json::from_slice(&bytes).map_err(|e| ContractError::Deserialization {
            key,
            reason: e.to_string(),
        })
    }

    /// Overwrite an existing record in full; fails if the ID is absent.
    pub fn update<R: Record>(&self, record: R) -> Result<(), ContractError> {
        if !self.exists::<R>(record.id())? {
            return Err(ContractError::NotFound {
                entity: R::ENTITY,
                id: record.id().to_owned(),
            });
        }

        debug!(entity = R::ENTITY, id = record.id(), "overwriting record");
        self.put_record(&record)
    }

    /// Remove the record under `id`; fails if the ID is absent.
    pub fn delete<R: Record>(&self, id: &str) -> Result<(), ContractError> {
        if !self.exists::<R>(id)? {
            return Err(ContractError::NotFound {
                entity: R::ENTITY,
                id: id.to_owned(),
            });
        }

        debug!(entity = R::ENTITY, id, "deleting record");
        self.state.delete(&R::state_key(id))
    }

    /// All records of family `R`, in key order.
    ///
    /// The scan is scoped to the family's key prefix, so records of
    /// other entity types sharing the keyspace are never returned.
    pub fn list_all<R: Record>(&self) -> Result<Vec<R>, ContractError> {
        let start = format!("{}:", R::KEY_PREFIX);
        // ';' is ':' + 1, so this bound closes exactly the prefix range.
        let end = format!("{};", R::KEY_PREFIX);

        self.state
            .range(&start, &end)?
            .map(|(key, bytes)| {
                serde_json::from_slice(&bytes).map_err(|e| ContractError::Deserialization {
                    key,
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    /// Seed the live testing poll fixtures: one poll, its questions,
    /// sample answers, and the first vote.
    ///
    /// Idempotent: rows already present are left untouched, so repeated
    /// invocation never overwrites live data.
    pub fn init_ledger(&self) -> Result<(), ContractError> {
        let mut seeded = 0usize;
        for poll in fixtures::polls() {
            seeded += self.seed(poll)? as usize;
        }
        for question in fixtures::questions() {
            seeded += self.seed(question)? as usize;
        }
        for answer in fixtures::answers() {
            seeded += self.seed(answer)? as usize;
        }
        for vote in fixtures::votes() {
            seeded += self.seed(vote)? as usize;
        }

        info!(seeded, "ledger fixtures initialized");
        Ok(())
    }

    fn seed<R: Record>(&self, record: R) -> Result<bool, ContractError> {
        if self.exists::<R>(record.id())? {
            return Ok(false);
        }
        self.put_record(&record)?;
        Ok(true)
    }

    fn put_record<R: Record>(&self, record: &R) -> Result<(), ContractError> {
        let key = record.key();
        let bytes = serde_json::to_vec(record).map_err(|e| ContractError::Serialization {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.state.put(&key, bytes)
    }
}
