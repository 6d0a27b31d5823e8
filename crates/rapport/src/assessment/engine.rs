use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::answers::{Answer, AnswerSet};
use super::catalog::{Contribution, CriteriaCatalog, Criterion, SCORE_CEILING};
use super::interpretation::Band;

/// Score credited to a yes/no criterion answered `true`.
const BOOLEAN_YES_VALUE: f64 = 5.0;

/// Stateless evaluator applying a catalog to answer snapshots.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    catalog: Arc<CriteriaCatalog>,
}

impl ScoreEngine {
    pub fn new(catalog: CriteriaCatalog) -> Self {
        Self::shared(Arc::new(catalog))
    }

    pub fn shared(catalog: Arc<CriteriaCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CriteriaCatalog {
        &self.catalog
    }

    /// True iff every criterion has an answer of the right kind within the rating scale.
    pub fn is_complete(&self, answers: &AnswerSet) -> bool {
        self.catalog
            .list()
            .iter()
            .all(|criterion| self.answer_value(criterion, answers).is_some())
    }

    /// Keys still lacking a valid answer, in catalog order.
    pub fn missing(&self, answers: &AnswerSet) -> Vec<String> {
        self.catalog
            .list()
            .iter()
            .filter(|criterion| self.answer_value(criterion, answers).is_none())
            .map(|criterion| criterion.key.clone())
            .collect()
    }

    /// Weighted mean of the answered criteria plus any bonuses, clamped to 5.
    pub fn compute_score(&self, answers: &AnswerSet) -> f64 {
        self.tally(answers).score()
    }

    /// Band for `score` under this catalog's ladder.
    pub fn interpret(&self, score: f64) -> Band {
        self.catalog.ladder().interpret(score)
    }

    /// Displayable result. Refuses answer sets that are not complete.
    pub fn assess(&self, answers: &AnswerSet) -> Result<Assessment, PreconditionViolation> {
        let missing = self.missing(answers);
        if !missing.is_empty() {
            return Err(PreconditionViolation { missing });
        }
        Ok(self.preview(answers))
    }

    /// Same computation as [`ScoreEngine::assess`] without the completion gate.
    pub fn preview(&self, answers: &AnswerSet) -> Assessment {
        let tally = self.tally(answers);
        let score = tally.score();
        let display_score = round_for_display(score);
        let threshold = self.catalog.ladder().classify(display_score);
        let total = self.catalog.len();
        let answered = tally.components.len();

        Assessment {
            catalog: self.catalog.name().to_string(),
            score,
            display_score,
            band: threshold.band,
            interpretation: threshold.description.clone(),
            answered,
            total,
            complete: answered == total,
            components: tally.components,
        }
    }

    fn tally(&self, answers: &AnswerSet) -> Tally {
        let mut tally = Tally::default();

        for criterion in self.catalog.list() {
            let Some(value) = self.answer_value(criterion, answers) else {
                continue;
            };

            let points = match criterion.contribution {
                Contribution::Weighted => {
                    tally.weighted_sum += value * criterion.weight;
                    tally.weight_sum += criterion.weight;
                    value * criterion.weight
                }
                Contribution::Bonus if value > 0.0 => {
                    tally.bonus += criterion.weight;
                    criterion.weight
                }
                Contribution::Bonus => 0.0,
            };

            tally.components.push(ScoreComponent {
                key: criterion.key.clone(),
                contribution: criterion.contribution,
                value,
                weight: criterion.weight,
                points,
            });
        }

        tally
    }

    /// Answer normalized to the 0-5 scale, or `None` when missing or not valid for `criterion`.
    fn answer_value(&self, criterion: &Criterion, answers: &AnswerSet) -> Option<f64> {
        let answer = answers.get(&criterion.key)?;
        if answer.kind() != criterion.kind {
            return None;
        }
        match answer {
            Answer::Rating(rating) => self
                .catalog
                .scale()
                .contains(rating)
                .then(|| f64::from(rating)),
            Answer::Boolean(yes) => Some(if yes { BOOLEAN_YES_VALUE } else { 0.0 }),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    weighted_sum: f64,
    weight_sum: f64,
    bonus: f64,
    components: Vec<ScoreComponent>,
}

impl Tally {
    fn score(&self) -> f64 {
        let mean = if self.weight_sum > 0.0 {
            self.weighted_sum / self.weight_sum
        } else {
            0.0
        };
        (mean + self.bonus).min(SCORE_CEILING)
    }
}

/// Two decimals taken from the exact binary value, halves rounded away from zero.
fn round_for_display(score: f64) -> f64 {
    let exact = format!("{:.60}", score.abs());
    let Some((whole, fraction)) = exact.split_once('.') else {
        return score;
    };
    let (kept, rest) = fraction.split_at(2);
    let Ok(mut cents) = format!("{whole}{kept}").parse::<u64>() else {
        return score;
    };
    if rest.as_bytes().first().is_some_and(|digit| *digit >= b'5') {
        cents += 1;
    }
    (cents as f64 / 100.0).copysign(score)
}

/// Contribution of one answered criterion, kept for transparent breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub key: String,
    pub contribution: Contribution,
    /// Answer on the 0-5 scale.
    pub value: f64,
    pub weight: f64,
    /// `value * weight` for weighted criteria, the bonus granted otherwise.
    pub points: f64,
}

/// Score, band and breakdown for one answer snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub catalog: String,
    pub score: f64,
    /// Score rounded to two decimals; the band is read from this value.
    pub display_score: f64,
    pub band: Band,
    pub interpretation: String,
    pub answered: usize,
    pub total: usize,
    pub complete: bool,
    pub components: Vec<ScoreComponent>,
}

/// A result was requested before every criterion had a valid answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("assessment is incomplete; unanswered criteria: {}", .missing.join(", "))]
pub struct PreconditionViolation {
    pub missing: Vec<String>,
}
