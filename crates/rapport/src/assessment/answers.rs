use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::{CriteriaCatalog, CriterionKind};

/// A single collected answer. Absence from an [`AnswerSet`] means "not yet answered".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Boolean(bool),
    Rating(i32),
}

impl Answer {
    pub const fn kind(self) -> CriterionKind {
        match self {
            Self::Boolean(_) => CriterionKind::Boolean,
            Self::Rating(_) => CriterionKind::Rating,
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Answer {
    fn from(value: i32) -> Self {
        Self::Rating(value)
    }
}

impl FromStr for Answer {
    type Err = AnswerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" => return Ok(Self::Boolean(true)),
            "false" | "no" | "n" => return Ok(Self::Boolean(false)),
            _ => {}
        }

        value
            .parse::<i32>()
            .map(Self::Rating)
            .map_err(|_| AnswerError::InvalidValue(value.to_string()))
    }
}

/// Answers keyed by criterion, overwritten one key at a time while a form is filled in.
///
/// Deserializes from a JSON object. `null`, strings, fractions and other values that are
/// neither a boolean nor an integer leave the criterion unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the one it replaced.
    pub fn set(&mut self, key: impl Into<String>, answer: impl Into<Answer>) -> Option<Answer> {
        self.answers.insert(key.into(), answer.into())
    }

    pub fn get(&self, key: &str) -> Option<Answer> {
        self.answers.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Answer)> {
        self.answers
            .iter()
            .map(|(key, answer)| (key.as_str(), *answer))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Keys that do not name any criterion of `catalog`.
    pub fn unknown_keys<'a>(&'a self, catalog: &CriteriaCatalog) -> Vec<&'a str> {
        self.iter()
            .map(|(key, _)| key)
            .filter(|key| catalog.get(key).is_none())
            .collect()
    }

    /// Reject answers for keys the catalog does not define.
    pub fn ensure_known(&self, catalog: &CriteriaCatalog) -> Result<(), AnswerError> {
        match self.unknown_keys(catalog).first() {
            Some(key) => Err(AnswerError::UnknownCriterion((*key).to_string())),
            None => Ok(()),
        }
    }
}

impl<K, A> FromIterator<(K, A)> for AnswerSet
where
    K: Into<String>,
    A: Into<Answer>,
{
    fn from_iter<I: IntoIterator<Item = (K, A)>>(iter: I) -> Self {
        Self {
            answers: iter
                .into_iter()
                .map(|(key, answer)| (key.into(), answer.into()))
                .collect(),
        }
    }
}

/// Submitted value that is either a usable answer or something to treat as unanswered.
#[derive(Deserialize)]
#[serde(untagged)]
enum SubmittedAnswer {
    Usable(Answer),
    Unusable(IgnoredAny),
}

impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, SubmittedAnswer>::deserialize(deserializer)?;
        Ok(Self {
            answers: raw
                .into_iter()
                .filter_map(|(key, submitted)| match submitted {
                    SubmittedAnswer::Usable(answer) => Some((key, answer)),
                    SubmittedAnswer::Unusable(_) => None,
                })
                .collect(),
        })
    }
}

/// Parse a `key=value` assignment as typed on a command line.
pub fn parse_assignment(raw: &str) -> Result<(String, Answer), AnswerError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| AnswerError::MalformedAssignment(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AnswerError::MalformedAssignment(raw.to_string()));
    }
    Ok((key.to_string(), value.parse()?))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("no criterion named '{0}' in this assessment")]
    UnknownCriterion(String),
    #[error("expected key=value, got '{0}'")]
    MalformedAssignment(String),
    #[error("'{0}' is neither an integer rating nor yes/no")]
    InvalidValue(String),
}
