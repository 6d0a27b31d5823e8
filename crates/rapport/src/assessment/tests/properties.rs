use proptest::prelude::*;

use super::common::*;
use crate::assessment::{
    AnswerSet, CriteriaCatalog, Criterion, RatingScale, ScoreEngine, ThresholdLadder,
    SCORE_CEILING,
};

/// A criterion paired with its answer: `Some(rating)` for ratings, otherwise a yes/no.
type Row = (f64, Option<i32>, bool);

fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (0.05f64..3.0, prop::option::of(0i32..=5), any::<bool>()),
        1..10,
    )
}

fn fixture(rows: &[Row]) -> (ScoreEngine, AnswerSet) {
    let mut criteria = Vec::with_capacity(rows.len());
    let mut answers = AnswerSet::new();

    for (index, (weight, rating, yes)) in rows.iter().enumerate() {
        let key = format!("c{index}");
        match rating {
            Some(rating) => {
                criteria.push(Criterion::rating(&key, "rating", *weight));
                answers.set(key, *rating);
            }
            None => {
                criteria.push(Criterion::boolean(&key, "yes/no", *weight));
                answers.set(key, *yes);
            }
        }
    }

    let catalog = CriteriaCatalog::new(
        "generated",
        criteria,
        RatingScale::new(0, 5),
        ThresholdLadder::canonical(),
    )
    .expect("generated catalog is valid");
    (ScoreEngine::new(catalog), answers)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn complete_answers_score_within_scale(rows in rows()) {
        let (engine, answers) = fixture(&rows);

        prop_assert!(engine.is_complete(&answers));
        let score = engine.compute_score(&answers);
        prop_assert!((0.0..=SCORE_CEILING).contains(&score), "score {} out of range", score);
    }

    #[test]
    fn empty_answers_always_score_zero(rows in rows()) {
        let (engine, _) = fixture(&rows);

        prop_assert_eq!(engine.compute_score(&AnswerSet::new()), 0.0);
    }

    #[test]
    fn raising_one_rating_never_lowers_the_score(rows in rows(), pick in any::<prop::sample::Index>()) {
        let (engine, answers) = fixture(&rows);
        let index = pick.index(rows.len());
        let key = format!("c{index}");

        if let (_, Some(rating), _) = rows[index] {
            prop_assume!(rating < 5);
            let mut raised = answers.clone();
            raised.set(key, rating + 1);

            let before = engine.compute_score(&answers);
            let after = engine.compute_score(&raised);
            prop_assert!(after + TOLERANCE >= before, "{} dropped to {}", before, after);
        }
    }

    #[test]
    fn dropping_any_answer_breaks_completion(rows in rows(), pick in any::<prop::sample::Index>()) {
        let (engine, answers) = fixture(&rows);
        let removed = format!("c{}", pick.index(rows.len()));
        let partial: AnswerSet = answers
            .iter()
            .filter(|(key, _)| *key != removed)
            .collect();

        prop_assert!(!engine.is_complete(&partial));
        prop_assert_eq!(engine.missing(&partial), vec![removed]);
    }
}
