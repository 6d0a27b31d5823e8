use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::{
    AnswerSet, CriteriaCatalog, Criterion, RatingScale, ScoreEngine, ThresholdLadder,
};

pub(super) const TOLERANCE: f64 = 1e-9;

/// Communication and trust ratings on a 0-5 scale plus a light yes/no gift criterion.
pub(super) fn relationship_catalog() -> CriteriaCatalog {
    CriteriaCatalog::new(
        "relationship",
        vec![
            Criterion::rating("communication", "Communication", 1.3),
            Criterion::rating("trust", "Trust", 1.4),
            Criterion::boolean("birthdayGifts", "Birthday gifts", 0.3),
        ],
        RatingScale::new(0, 5),
        ThresholdLadder::canonical(),
    )
    .expect("valid catalog")
}

/// Same criteria, but ratings start at 1 so a zero is not an answer.
pub(super) fn strict_catalog() -> CriteriaCatalog {
    CriteriaCatalog::new(
        "strict",
        relationship_catalog().list().to_vec(),
        RatingScale::new(1, 5),
        ThresholdLadder::canonical(),
    )
    .expect("valid catalog")
}

pub(super) fn engine() -> ScoreEngine {
    ScoreEngine::new(relationship_catalog())
}

pub(super) fn shared_engine() -> Arc<ScoreEngine> {
    Arc::new(engine())
}

pub(super) fn full_answers(communication: i32, trust: i32, gifts: bool) -> AnswerSet {
    let mut answers = AnswerSet::new();
    answers.set("communication", communication);
    answers.set("trust", trust);
    answers.set("birthdayGifts", gifts);
    answers
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
