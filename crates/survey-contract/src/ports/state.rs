use crate::domain::ContractError;

/// Ordered key/value sequence produced by a range scan.
///
/// Finite and restartable: calling [`WorldState::range`] again yields a
/// fresh scan over the current state.
pub type RangeIter = Box<dyn Iterator<Item = (String, Vec<u8>)> + Send>;

/// World-state abstraction: the sole persistence authority for records.
pub trait WorldState: Send + Sync {
    /// Fetch the value at `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ContractError>;

    /// Store `value` at `key`, overwriting any previous value.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), ContractError>;

    /// Remove `key`. Deleting an absent key succeeds; existence policy
    /// belongs to the contract layer, not the store.
    fn delete(&self, key: &str) -> Result<(), ContractError>;

    /// Ordered scan over `[start, end)`. Empty bounds mean an unbounded
    /// side; both empty is a full-keyspace scan.
    fn range(&self, start: &str, end: &str) -> Result<RangeIter, ContractError>;
}
