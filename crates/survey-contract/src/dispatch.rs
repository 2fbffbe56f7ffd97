//! # Function Router
//!
//! Maps the gateway-visible function catalog onto the generic contract.
//! One family of functions per entity type:
//!
//! | Function | Args | Returns |
//! |----------|------|---------|
//! | `InitLedger` | — | empty |
//! | `Create{Poll,Question,Answer,Vote}` | full field list | empty |
//! | `Read{...}` | id | record JSON |
//! | `Update{...}` | full field list | empty |
//! | `Delete{...}` | id | empty |
//! | `{...}Exists` | id | JSON bool |
//! | `GetAll{Polls,Questions,Answers,Votes}` | — | JSON array |

use crate::contract::SurveyContract;
use crate::domain::{Answer, ContractError, Poll, Question, Record, Vote};
use crate::ports::WorldState;
use std::sync::Arc;

/// Name-driven dispatch over [`SurveyContract`].
pub struct ContractRouter<S: WorldState> {
    contract: SurveyContract<S>,
}

impl<S: WorldState> ContractRouter<S> {
    pub fn new(state: Arc<S>) -> Self {
        Self {
            contract: SurveyContract::new(state),
        }
    }

    /// The contract behind this router.
    pub fn contract(&self) -> &SurveyContract<S> {
        &self.contract
    }

    /// Invoke `function` with positional string `args`, returning the
    /// response payload. Write functions return an empty payload.
    pub fn invoke(&self, function: &str, args: &[String]) -> Result<Vec<u8>, ContractError> {
        match function {
            "InitLedger" => {
                expect_args(function, args, 0)?;
                self.contract.init_ledger()?;
                Ok(Vec::new())
            }

            "CreatePoll" => self.write(function, args, 5, |a| self.contract.create(poll_from(a))),
            "UpdatePoll" => self.write(function, args, 5, |a| self.contract.update(poll_from(a))),
            "ReadPoll" => self.read::<Poll>(function, args),
            "DeletePoll" => self.delete::<Poll>(function, args),
            "PollExists" => self.exists::<Poll>(function, args),
            "GetAllPolls" => self.list::<Poll>(function, args),

            "CreateQuestion" => self.write(function, args, 2, |a| self.contract.create(question_from(a))),
            "UpdateQuestion" => self.write(function, args, 2, |a| self.contract.update(question_from(a))),
            "ReadQuestion" => self.read::<Question>(function, args),
            "DeleteQuestion" => self.delete::<Question>(function, args),
            "QuestionExists" => self.exists::<Question>(function, args),
            "GetAllQuestions" => self.list::<Question>(function, args),

            "CreateAnswer" => self.write(function, args, 2, |a| self.contract.create(answer_from(a))),
            "UpdateAnswer" => self.write(function, args, 2, |a| self.contract.update(answer_from(a))),
            "ReadAnswer" => self.read::<Answer>(function, args),
            "DeleteAnswer" => self.delete::<Answer>(function, args),
            "AnswerExists" => self.exists::<Answer>(function, args),
            "GetAllAnswers" => self.list::<Answer>(function, args),

            "CreateVote" => self.write(function, args, 6, |a| self.contract.create(vote_from(a))),
            "UpdateVote" => self.write(function, args, 6, |a| self.contract.update(vote_from(a))),
            "ReadVote" => self.read::<Vote>(function, args),
            "DeleteVote" => self.delete::<Vote>(function, args),
            "VoteExists" => self.exists::<Vote>(function, args),
            "GetAllVotes" => self.list::<Vote>(function, args),

            _ => Err(ContractError::UnknownFunction {
                name: function.to_owned(),
            }),
        }
    }

    fn write<F>(
        &self,
        function: &str,
        args: &[String],
        arity: usize,
        op: F,
    ) -> Result<Vec<u8>, ContractError>
    where
        F: FnOnce(&[String]) -> Result<(), ContractError>,
    {
        expect_args(function, args, arity)?;
        op(args)?;
        Ok(Vec::new())
    }

    fn read<R: Record>(&self, function: &str, args: &[String]) -> Result<Vec<u8>, ContractError> {
        expect_args(function, args, 1)?;
        let record = self.contract.read::<R>(&args[0])?;
        encode(&record)
    }

    fn delete<R: Record>(&self, function: &str, args: &[String]) -> Result<Vec<u8>, ContractError> {
        expect_args(function, args, 1)?;
        self.contract.delete::<R>(&args[0])?;
        Ok(Vec::new())
    }

    fn exists<R: Record>(&self, function: &str, args: &[String]) -> Result<Vec<u8>, ContractError> {
        expect_args(function, args, 1)?;
        let present = self.contract.exists::<R>(&args[0])?;
        encode(&present)
    }

    fn list<R: Record>(&self, function: &str, args: &[String]) -> Result<Vec<u8>, ContractError> {
        expect_args(function, args, 0)?;
        let records = self.contract.list_all::<R>()?;
        encode(&records)
    }
}

fn expect_args(function: &str, args: &[String], expected: usize) -> Result<(), ContractError> {
    if args.len() != expected {
        return Err(ContractError::InvalidArgument {
            function: function.to_owned(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    serde_json::to_vec(value).map_err(|e| ContractError::Serialization {
        key: String::new(),
        reason: e.to_string(),
    })
}

fn poll_from(args: &[String]) -> Poll {
    Poll {
        id: args[0].clone(),
        name: args[1].clone(),
        researcher: args[2].clone(),
        description: args[3].clone(),
        status: args[4].clone(),
    }
}

fn question_from(args: &[String]) -> Question {
    Question {
        id: args[0].clone(),
        text: args[1].clone(),
    }
}

fn answer_from(args: &[String]) -> Answer {
    Answer {
        id: args[0].clone(),
        text: args[1].clone(),
    }
}

fn vote_from(args: &[String]) -> Vote {
    Vote {
        id: args[0].clone(),
        receipt_ref: args[1].clone(),
        age: args[2].clone(),
        gender: args[3].clone(),
        occupation: args[4].clone(),
        country: args[5].clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryWorldState;

    fn router() -> ContractRouter<InMemoryWorldState> {
        ContractRouter::new(Arc::new(InMemoryWorldState::new()))
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_read_roundtrip_over_router() {
        let router = router();
        router
            .invoke(
                "CreatePoll",
                &args(&["2", "Test", "Hsin", "Test Poll to showcase CRUD functions", "Ongoing"]),
            )
            .unwrap();

        let payload = router.invoke("ReadPoll", &args(&["2"])).unwrap();
        let poll: Poll = serde_json::from_slice(&payload).unwrap();
        assert_eq!(poll.name, "Test");
        assert_eq!(poll.status, "Ongoing");
    }

    #[test]
    fn test_exists_returns_json_bool() {
        let router = router();
        assert_eq!(router.invoke("PollExists", &args(&["1"])).unwrap(), b"false");

        router.invoke("InitLedger", &[]).unwrap();
        assert_eq!(router.invoke("PollExists", &args(&["1"])).unwrap(), b"true");
    }

    #[test]
    fn test_get_all_polls_excludes_other_families() {
        let router = router();
        router.invoke("InitLedger", &[]).unwrap();

        let payload = router.invoke("GetAllPolls", &[]).unwrap();
        let polls: Vec<Poll> = serde_json::from_slice(&payload).unwrap();
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].id, "1");
    }

    #[test]
    fn test_unknown_function_is_rejected() {
        let err = router().invoke("TransferPoll", &[]).unwrap_err();
        assert!(matches!(err, ContractError::UnknownFunction { ref name } if name == "TransferPoll"));
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        let err = router().invoke("ReadPoll", &[]).unwrap_err();
        assert!(matches!(
            err,
            ContractError::InvalidArgument { expected: 1, got: 0, .. }
        ));
    }

    #[test]
    fn test_vote_family_roundtrip() {
        let router = router();
        router
            .invoke(
                "CreateVote",
                &args(&["2-1", "rcpt-9", "31", "Male", "Engineer", "Malaysia"]),
            )
            .unwrap();

        let payload = router.invoke("ReadVote", &args(&["2-1"])).unwrap();
        let vote: Vote = serde_json::from_slice(&payload).unwrap();
        assert_eq!(vote.receipt_ref, "rcpt-9");
        assert_eq!(vote.country, "Malaysia");
    }
}
