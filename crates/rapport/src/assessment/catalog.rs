use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::interpretation::ThresholdLadder;

/// Upper bound of the normalized score scale shared by every catalog.
pub const SCORE_CEILING: f64 = 5.0;

/// How a criterion is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    Rating,
    Boolean,
}

impl CriterionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Boolean => "yes/no",
        }
    }
}

/// Whether a criterion enters the weighted mean or adds a flat bonus on top of it.
///
/// For `Bonus` criteria the weight is the amount added per `true` answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contribution {
    #[default]
    Weighted,
    Bonus,
}

/// One weighted aspect of the assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub weight: f64,
    pub kind: CriterionKind,
    #[serde(default)]
    pub contribution: Contribution,
}

impl Criterion {
    pub fn rating(key: impl Into<String>, label: impl Into<String>, weight: f64) -> Self {
        Self::new(key, label, weight, CriterionKind::Rating, Contribution::Weighted)
    }

    pub fn boolean(key: impl Into<String>, label: impl Into<String>, weight: f64) -> Self {
        Self::new(key, label, weight, CriterionKind::Boolean, Contribution::Weighted)
    }

    /// Yes/no criterion adding `per_yes` to the score when answered `true`.
    pub fn bonus(key: impl Into<String>, label: impl Into<String>, per_yes: f64) -> Self {
        Self::new(key, label, per_yes, CriterionKind::Boolean, Contribution::Bonus)
    }

    fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        weight: f64,
        kind: CriterionKind,
        contribution: Contribution,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: String::new(),
            weight,
            kind,
            contribution,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub const fn is_bonus(&self) -> bool {
        matches!(self.contribution, Contribution::Bonus)
    }
}

/// Closed integer range accepted for rating criteria, with optional captions per step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingScale {
    pub min: i32,
    pub max: i32,
    /// Caption for each value from `min` to `max`, or empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captions: Vec<String>,
}

impl RatingScale {
    pub fn new(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            captions: Vec::new(),
        }
    }

    pub fn with_captions<I, S>(mut self, captions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.captions = captions.into_iter().map(Into::into).collect();
        self
    }

    pub fn contains(&self, value: i32) -> bool {
        self.values().contains(&value)
    }

    pub fn values(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    pub fn caption(&self, value: i32) -> Option<&str> {
        if !self.contains(value) {
            return None;
        }
        let offset = usize::try_from(value - self.min).ok()?;
        self.captions.get(offset).map(String::as_str)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let ceiling = SCORE_CEILING as i32;
        if self.min < 0 || self.min >= self.max || self.max > ceiling {
            return Err(CatalogError::InvalidScale {
                min: self.min,
                max: self.max,
            });
        }

        let span = (self.max - self.min + 1) as usize;
        if !self.captions.is_empty() && self.captions.len() != span {
            return Err(CatalogError::CaptionCount {
                expected: span,
                actual: self.captions.len(),
            });
        }

        Ok(())
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self::new(0, 5)
    }
}

/// Serialized form of a catalog, validated on the way in.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDefinition {
    pub name: String,
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub scale: RatingScale,
    #[serde(default)]
    pub ladder: ThresholdLadder,
}

/// Immutable, ordered rubric. Construction is the only place a catalog can fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDefinition")]
pub struct CriteriaCatalog {
    name: String,
    criteria: Vec<Criterion>,
    scale: RatingScale,
    ladder: ThresholdLadder,
}

impl CriteriaCatalog {
    pub fn new(
        name: impl Into<String>,
        criteria: Vec<Criterion>,
        scale: RatingScale,
        ladder: ThresholdLadder,
    ) -> Result<Self, CatalogError> {
        if criteria.is_empty() {
            return Err(CatalogError::Empty);
        }

        scale.validate()?;

        let mut seen = HashSet::with_capacity(criteria.len());
        for (position, criterion) in criteria.iter().enumerate() {
            if criterion.key.trim().is_empty() {
                return Err(CatalogError::EmptyKey { position });
            }
            if !seen.insert(criterion.key.as_str()) {
                return Err(CatalogError::DuplicateKey(criterion.key.clone()));
            }
            if !criterion.weight.is_finite() || criterion.weight <= 0.0 {
                return Err(CatalogError::InvalidWeight {
                    key: criterion.key.clone(),
                    weight: criterion.weight,
                });
            }
            if criterion.is_bonus() && criterion.kind != CriterionKind::Boolean {
                return Err(CatalogError::BonusRequiresBoolean(criterion.key.clone()));
            }
        }

        Ok(Self {
            name: name.into(),
            criteria,
            scale,
            ladder,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Criteria in presentation order.
    pub fn list(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn get(&self, key: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| criterion.key == key)
    }

    pub fn scale(&self) -> &RatingScale {
        &self.scale
    }

    pub fn ladder(&self) -> &ThresholdLadder {
        &self.ladder
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl TryFrom<CatalogDefinition> for CriteriaCatalog {
    type Error = CatalogError;

    fn try_from(definition: CatalogDefinition) -> Result<Self, Self::Error> {
        Self::new(
            definition.name,
            definition.criteria,
            definition.scale,
            definition.ladder,
        )
    }
}

/// Malformed catalog detected at construction time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog must define at least one criterion")]
    Empty,
    #[error("criterion at position {position} has an empty key")]
    EmptyKey { position: usize },
    #[error("duplicate criterion key '{0}'")]
    DuplicateKey(String),
    #[error("criterion '{key}' has weight {weight}; weights must be positive and finite")]
    InvalidWeight { key: String, weight: f64 },
    #[error("criterion '{0}' is a bonus but is not answered yes/no")]
    BonusRequiresBoolean(String),
    #[error("rating scale [{min}, {max}] must satisfy 0 <= min < max <= 5")]
    InvalidScale { min: i32, max: i32 },
    #[error("rating scale spans {expected} values but defines {actual} captions")]
    CaptionCount { expected: usize, actual: usize },
}
