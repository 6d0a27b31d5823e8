//! Weighted self-assessment scoring with completion gating.
//!
//! A [`CriteriaCatalog`] fixes the rubric, a [`ScoreEngine`] turns answer snapshots into a
//! 0-5 score and a [`Band`], and an [`AssessmentSession`] holds one form's answers while
//! making sure a result is only shown once every criterion is answered.

pub mod answers;
pub mod catalog;
pub mod engine;
pub mod interpretation;
pub mod presets;
pub mod router;
pub mod session;

#[cfg(test)]
mod tests;

pub use answers::{parse_assignment, Answer, AnswerError, AnswerSet};
pub use catalog::{
    CatalogDefinition, CatalogError, Contribution, CriteriaCatalog, Criterion, CriterionKind,
    RatingScale, SCORE_CEILING,
};
pub use engine::{Assessment, PreconditionViolation, ScoreComponent, ScoreEngine};
pub use interpretation::{interpret, Band, LadderError, Threshold, ThresholdLadder};
pub use presets::{CatalogPreset, UnknownPreset};
pub use router::{assessment_router, ScoreRequest};
pub use session::{AssessmentSession, SessionState};
