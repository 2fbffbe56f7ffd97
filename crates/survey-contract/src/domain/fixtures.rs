//! Fixture rows seeded by `InitLedger` for the live testing poll.

use super::{Answer, Poll, Question, Vote};

/// The live testing poll (ID "1").
pub fn polls() -> Vec<Poll> {
    vec![Poll {
        id: "1".into(),
        name: "Does blockchain increase participation in polls for academic research?".into(),
        researcher: "UTAR".into(),
        description: "Polling is used by sociologists for academic research. \n\
            However, the participation rate has decreased over the years due to lack of privacy, ease of use & accessibility. \n\
            From recent research, using blockchain technology addresses these aforementioned issues. \n\
            This survey gathers public opinion to test this hypothesis."
            .into(),
        status: "Ongoing".into(),
    }]
}

/// The live testing poll's question set.
pub fn questions() -> Vec<Question> {
    [
        ("1-1", "How likely are you to participate in polling research?"),
        ("1-2", "Rate the standard of privacy compared to other polling methods."),
        ("1-3", "Rate the ease of use compared to other polling methods."),
        ("1-4", "Rate the accessibilty compared to other polling methods."),
        ("1-5", "Do you prefer to use this blockchain app over other polling methods?"),
        ("1-6", "Does this application increase the likelyhood of you participating in polling research?"),
    ]
    .into_iter()
    .map(|(id, text)| Question {
        id: id.into(),
        text: text.into(),
    })
    .collect()
}

/// Sample answers for the live testing poll.
pub fn answers() -> Vec<Answer> {
    [
        ("1-1-1", "4"),
        ("1-2-1", "4"),
        ("1-3-1", "5"),
        ("1-4-1", "4"),
        ("1-5-1", "4"),
        ("1-6-1", "5"),
    ]
    .into_iter()
    .map(|(id, text)| Answer {
        id: id.into(),
        text: text.into(),
    })
    .collect()
}

/// The first recorded vote of the live testing poll.
pub fn votes() -> Vec<Vote> {
    vec![Vote {
        id: "1-1".into(),
        receipt_ref: String::new(),
        age: "23".into(),
        gender: "Female".into(),
        occupation: "Student".into(),
        country: "Malaysia".into(),
    }]
}
