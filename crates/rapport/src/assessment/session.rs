use serde::Serialize;
use tracing::debug;

use super::answers::{Answer, AnswerError, AnswerSet};
use super::engine::{Assessment, PreconditionViolation, ScoreEngine};

/// Where a form session stands relative to completion gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Collecting,
    Scorable,
    Displayed,
}

impl SessionState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Collecting => "Collecting",
            Self::Scorable => "Scorable",
            Self::Displayed => "Displayed",
        }
    }
}

/// Answer set owned by a single form, with the result shown to the user if any.
///
/// Nothing is persisted; dismissing a result keeps the answers until [`AssessmentSession::clear`].
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    engine: ScoreEngine,
    answers: AnswerSet,
    displayed: Option<Assessment>,
}

impl AssessmentSession {
    pub fn new(engine: ScoreEngine) -> Self {
        Self {
            engine,
            answers: AnswerSet::new(),
            displayed: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.displayed.is_some() {
            SessionState::Displayed
        } else if self.engine.is_complete(&self.answers) {
            SessionState::Scorable
        } else {
            SessionState::Collecting
        }
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Overwrite one answer. Changing an answer hides any displayed result.
    pub fn record(
        &mut self,
        key: &str,
        answer: impl Into<Answer>,
    ) -> Result<Option<Answer>, AnswerError> {
        if self.engine.catalog().get(key).is_none() {
            return Err(AnswerError::UnknownCriterion(key.to_string()));
        }
        self.displayed = None;
        Ok(self.answers.set(key, answer))
    }

    /// Gate and show the result. Completion is re-checked on every request.
    pub fn request_result(&mut self) -> Result<&Assessment, PreconditionViolation> {
        match self.engine.assess(&self.answers) {
            Ok(assessment) => {
                let shown = self.displayed.insert(assessment);
                Ok(&*shown)
            }
            Err(violation) => {
                debug!(missing = ?violation.missing, "result requested before completion");
                Err(violation)
            }
        }
    }

    pub fn displayed(&self) -> Option<&Assessment> {
        self.displayed.as_ref()
    }

    /// Live score of whatever has been answered so far.
    pub fn preview(&self) -> Assessment {
        self.engine.preview(&self.answers)
    }

    pub fn dismiss(&mut self) {
        self.displayed = None;
    }

    pub fn clear(&mut self) {
        self.displayed = None;
        self.answers.clear();
    }
}
