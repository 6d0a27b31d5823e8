use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::SCORE_CEILING;

/// Qualitative reading of a score, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Critical,
    Fragile,
    Stable,
    Strong,
    Exceptional,
}

impl Band {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Critical,
            Self::Fragile,
            Self::Stable,
            Self::Strong,
            Self::Exceptional,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Fragile => "fragile",
            Self::Stable => "stable",
            Self::Strong => "strong",
            Self::Exceptional => "exceptional",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Critical => "Relationship in serious difficulty",
            Self::Fragile => "Fragile relationship that needs improvement",
            Self::Stable => "Stable relationship with room to grow",
            Self::Strong => "Solid and fulfilling relationship",
            Self::Exceptional => "Exceptional and harmonious relationship",
        }
    }

    /// Inclusive lower bound of the band in the canonical ladder.
    pub const fn canonical_floor(self) -> f64 {
        match self {
            Self::Critical => 0.0,
            Self::Fragile => 2.0,
            Self::Stable => 3.0,
            Self::Strong => 4.0,
            Self::Exceptional => 4.5,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical threshold ladder: half-open `[lower, upper)` bands, ties go up.
pub fn interpret(score: f64) -> Band {
    if score >= Band::Exceptional.canonical_floor() {
        Band::Exceptional
    } else if score >= Band::Strong.canonical_floor() {
        Band::Strong
    } else if score >= Band::Stable.canonical_floor() {
        Band::Stable
    } else if score >= Band::Fragile.canonical_floor() {
        Band::Fragile
    } else {
        Band::Critical
    }
}

/// One rung of a ladder: scores at or above `from` (and below the next rung) map to `band`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub band: Band,
    pub from: f64,
    pub description: String,
}

impl Threshold {
    pub fn new(band: Band, from: f64, description: impl Into<String>) -> Self {
        Self {
            band,
            from,
            description: description.into(),
        }
    }
}

/// Serialized form of a ladder, lowest band first.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LadderDefinition {
    pub steps: Vec<Threshold>,
}

/// Ordered threshold table mapping a score to a band.
///
/// The first rung always starts at `0.0`, rung floors strictly increase and stay
/// within the score scale, and bands appear in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LadderDefinition", into = "LadderDefinition")]
pub struct ThresholdLadder {
    floor: Threshold,
    rungs: Vec<Threshold>,
}

impl ThresholdLadder {
    pub fn new(steps: Vec<Threshold>) -> Result<Self, LadderError> {
        let mut steps = steps.into_iter();
        let floor = steps.next().ok_or(LadderError::Empty)?;
        if floor.from != 0.0 {
            return Err(LadderError::FloorNotZero(floor.from));
        }

        let mut previous = &floor;
        let rungs: Vec<Threshold> = steps.collect();
        for rung in &rungs {
            if !rung.from.is_finite() || rung.from > SCORE_CEILING {
                return Err(LadderError::OutOfRange {
                    band: rung.band,
                    from: rung.from,
                });
            }
            if rung.from <= previous.from || rung.band <= previous.band {
                return Err(LadderError::NotAscending {
                    band: rung.band,
                    from: rung.from,
                });
            }
            previous = rung;
        }

        Ok(Self { floor, rungs })
    }

    /// Ladder using the canonical floors and descriptions of every band.
    pub fn canonical() -> Self {
        Self::with_descriptions(Band::ordered().map(Band::description))
    }

    /// Canonical floors with custom wording, listed lowest band first.
    pub fn with_descriptions(descriptions: [&str; 5]) -> Self {
        let [critical, fragile, stable, strong, exceptional] = descriptions;
        let rung = |band: Band, description: &str| {
            Threshold::new(band, band.canonical_floor(), description)
        };
        Self {
            floor: rung(Band::Critical, critical),
            rungs: vec![
                rung(Band::Fragile, fragile),
                rung(Band::Stable, stable),
                rung(Band::Strong, strong),
                rung(Band::Exceptional, exceptional),
            ],
        }
    }

    pub fn classify(&self, score: f64) -> &Threshold {
        let mut matched = &self.floor;
        for rung in &self.rungs {
            if score >= rung.from {
                matched = rung;
            } else {
                break;
            }
        }
        matched
    }

    pub fn interpret(&self, score: f64) -> Band {
        self.classify(score).band
    }

    pub fn steps(&self) -> impl Iterator<Item = &Threshold> {
        std::iter::once(&self.floor).chain(self.rungs.iter())
    }
}

impl Default for ThresholdLadder {
    fn default() -> Self {
        Self::canonical()
    }
}

impl TryFrom<LadderDefinition> for ThresholdLadder {
    type Error = LadderError;

    fn try_from(definition: LadderDefinition) -> Result<Self, Self::Error> {
        Self::new(definition.steps)
    }
}

impl From<ThresholdLadder> for LadderDefinition {
    fn from(ladder: ThresholdLadder) -> Self {
        let mut steps = Vec::with_capacity(ladder.rungs.len() + 1);
        steps.push(ladder.floor);
        steps.extend(ladder.rungs);
        Self { steps }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LadderError {
    #[error("threshold ladder must define at least one band")]
    Empty,
    #[error("lowest threshold must start at 0.0, found {0}")]
    FloorNotZero(f64),
    #[error("threshold for {band} starts at {from}, outside the 0-5 score scale")]
    OutOfRange { band: Band, from: f64 },
    #[error("threshold for {band} at {from} does not ascend past the previous band")]
    NotAscending { band: Band, from: f64 },
}
