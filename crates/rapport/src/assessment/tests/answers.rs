use super::common::*;
use crate::assessment::{parse_assignment, Answer, AnswerError, AnswerSet, CriterionKind};

#[test]
fn parses_cli_assignments() {
    assert_eq!(
        parse_assignment("communication=4"),
        Ok(("communication".to_string(), Answer::Rating(4)))
    );
    assert_eq!(
        parse_assignment(" birthdayGifts = yes "),
        Ok(("birthdayGifts".to_string(), Answer::Boolean(true)))
    );
    assert_eq!(
        parse_assignment("birthdayGifts=False"),
        Ok(("birthdayGifts".to_string(), Answer::Boolean(false)))
    );
}

#[test]
fn rejects_malformed_assignments() {
    assert_eq!(
        parse_assignment("communication"),
        Err(AnswerError::MalformedAssignment("communication".to_string()))
    );
    assert_eq!(
        parse_assignment("=4"),
        Err(AnswerError::MalformedAssignment("=4".to_string()))
    );
    assert_eq!(
        parse_assignment("trust=lots"),
        Err(AnswerError::InvalidValue("lots".to_string()))
    );
}

#[test]
fn json_null_means_unanswered() {
    let answers: AnswerSet =
        serde_json::from_str(r#"{"communication": 4, "trust": null, "birthdayGifts": false}"#)
            .expect("answers parse");

    assert_eq!(answers.len(), 2);
    assert_eq!(answers.get("communication"), Some(Answer::Rating(4)));
    assert_eq!(answers.get("trust"), None);
    assert_eq!(
        answers.get("birthdayGifts").map(Answer::kind),
        Some(CriterionKind::Boolean)
    );
}

#[test]
fn set_overwrites_and_returns_previous() {
    let mut answers = AnswerSet::new();
    assert_eq!(answers.set("trust", 2), None);
    assert_eq!(answers.set("trust", 5), Some(Answer::Rating(2)));
    assert_eq!(answers.get("trust"), Some(Answer::Rating(5)));
    assert_eq!(answers.len(), 1);
}

#[test]
fn flags_keys_outside_the_catalog() {
    let catalog = relationship_catalog();
    let mut answers = full_answers(3, 3, true);
    answers.set("humour", 5);

    assert_eq!(answers.unknown_keys(&catalog), vec!["humour"]);
    assert_eq!(
        answers.ensure_known(&catalog),
        Err(AnswerError::UnknownCriterion("humour".to_string()))
    );
    assert!(full_answers(1, 1, false).ensure_known(&catalog).is_ok());
}

#[test]
fn values_of_no_answer_type_are_left_unanswered() {
    let answers: AnswerSet = serde_json::from_str(
        r#"{"communication": "4", "trust": 4.5, "birthdayGifts": "yes", "compromise": 3}"#,
    )
    .expect("answers parse");

    assert_eq!(answers.len(), 1);
    assert_eq!(answers.get("compromise"), Some(Answer::Rating(3)));
    assert_eq!(answers.get("communication"), None);
}
