//! # Survey Entity Records
//!
//! The four record types stored in the world state, plus the [`Record`]
//! trait that ties each type to its key-prefix scope.
//!
//! ## Key convention
//!
//! Every record lives under `"<prefix>:<id>"`. The prefix keeps each
//! entity family in its own contiguous key range, so a range scan for
//! polls can never surface a question or a vote. Composite IDs such as
//! `"1-1"` (question 1 of poll 1) or `"1-1-1"` encode hierarchy by
//! convention only and are stored as opaque strings.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A typed record persisted in the world state.
///
/// IDs are immutable after creation. The wire format is flat JSON with
/// all fields required on write; unknown fields on read are tolerated.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Key-prefix scoping this entity family in the shared keyspace.
    const KEY_PREFIX: &'static str;

    /// Human-readable entity name, used in function names and errors.
    const ENTITY: &'static str;

    /// The record's unique ID.
    fn id(&self) -> &str;

    /// World-state key for an ID of this entity family.
    fn state_key(id: &str) -> String {
        format!("{}:{}", Self::KEY_PREFIX, id)
    }

    /// World-state key for this record.
    fn key(&self) -> String {
        Self::state_key(self.id())
    }
}

/// A survey poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Poll {
    /// Unique poll ID.
    #[serde(rename = "ID")]
    pub id: String,
    /// Poll title shown to participants.
    pub name: String,
    /// Researcher or institution running the poll.
    pub researcher: String,
    /// Free-text description of the research purpose.
    pub description: String,
    /// Lifecycle status, e.g. "Ongoing" or "Completed".
    pub status: String,
}

/// A question belonging to a poll.
///
/// The `"<poll>-<n>"` composite ID is a naming convention, not a
/// validated foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Question {
    /// Composite ID, e.g. `"1-1"`.
    #[serde(rename = "ID")]
    pub id: String,
    /// Question text.
    pub text: String,
}

/// An answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Answer {
    /// Composite ID, e.g. `"1-1-1"`.
    #[serde(rename = "ID")]
    pub id: String,
    /// Answer text (for rating questions, the chosen score).
    pub text: String,
}

/// A cast vote with anonymous demographics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vote {
    /// Composite ID, e.g. `"1-1"`.
    #[serde(rename = "ID")]
    pub id: String,
    /// Ledger receipt reference handed back to the voter.
    pub receipt_ref: String,
    /// Voter age bracket.
    pub age: String,
    /// Voter gender.
    pub gender: String,
    /// Voter occupation.
    pub occupation: String,
    /// Voter country of residence.
    pub country: String,
}

impl Record for Poll {
    const KEY_PREFIX: &'static str = "poll";
    const ENTITY: &'static str = "poll";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Question {
    const KEY_PREFIX: &'static str = "question";
    const ENTITY: &'static str = "question";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Answer {
    const KEY_PREFIX: &'static str = "answer";
    const ENTITY: &'static str = "answer";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Vote {
    const KEY_PREFIX: &'static str = "vote";
    const ENTITY: &'static str = "vote";

    fn id(&self) -> &str {
        &self.id
    }
}
