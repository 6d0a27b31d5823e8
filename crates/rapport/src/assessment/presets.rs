use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogError, CriteriaCatalog, Criterion, RatingScale};
use super::interpretation::ThresholdLadder;

const RATING_CAPTIONS: [&str; 5] = ["Very poor", "Poor", "Average", "Good", "Excellent"];

/// Built-in catalogs selectable through configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogPreset {
    #[default]
    Weighted,
    GiftBonus,
}

impl CatalogPreset {
    pub const fn ordered() -> [Self; 2] {
        [Self::Weighted, Self::GiftBonus]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::GiftBonus => "gift_bonus",
        }
    }

    pub fn build(self) -> Result<CriteriaCatalog, CatalogError> {
        match self {
            Self::Weighted => weighted(),
            Self::GiftBonus => gift_bonus(),
        }
    }
}

impl fmt::Display for CatalogPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CatalogPreset {
    type Err = UnknownPreset;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weighted" => Ok(Self::Weighted),
            "gift_bonus" | "bonus" => Ok(Self::GiftBonus),
            _ => Err(UnknownPreset(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown catalog preset '{0}' (expected weighted or gift_bonus)")]
pub struct UnknownPreset(pub String);

/// Seven criteria weighted by importance; gifts count for little, trust the most.
pub fn weighted() -> Result<CriteriaCatalog, CatalogError> {
    let criteria = vec![
        Criterion::rating("emotionalSupport", "Emotional support", 1.2)
            .with_description("Presence and empathy in difficult moments"),
        Criterion::rating("communication", "Communication", 1.3)
            .with_description("Active listening and expressing feelings"),
        Criterion::rating("mutualTrust", "Mutual trust", 1.4)
            .with_description("Feeling safe in the relationship"),
        Criterion::boolean("birthdayGifts", "Birthday gifts", 0.3)
            .with_description("Particular attention to birthdays"),
        Criterion::rating("responsibilitySharing", "Sharing responsibilities", 1.0)
            .with_description("Balance of chores and decisions"),
        Criterion::rating("compromise", "Ability to compromise", 1.1)
            .with_description("Looking for shared solutions"),
        Criterion::boolean("thoughtfulGifts", "Personalised gifts", 0.3)
            .with_description("Thoughtful gifts suited to the partner's tastes"),
    ];

    let ladder = ThresholdLadder::with_descriptions([
        "Relationship needing attention and dialogue",
        "Relationship with room for improvement",
        "Balanced and positive relationship",
        "Fulfilling relationship",
        "Exceptional relationship",
    ]);

    CriteriaCatalog::new(
        CatalogPreset::Weighted.key(),
        criteria,
        RatingScale::new(1, 5).with_captions(RATING_CAPTIONS),
        ladder,
    )
}

/// Six equally weighted ratings with half a point added per gift habit, capped at 5.
pub fn gift_bonus() -> Result<CriteriaCatalog, CatalogError> {
    let criteria = vec![
        Criterion::rating("emotionalSupport", "Emotional support", 1.0)
            .with_description("Being present and empathetic through hard times"),
        Criterion::rating("responsibilitySharing", "Sharing responsibilities", 1.0)
            .with_description("Fair split of tasks and decisions"),
        Criterion::rating("communication", "Communication", 1.0)
            .with_description("Openness, active listening and clear expression of feelings"),
        Criterion::rating("compromise", "Compromise and adjustment", 1.0)
            .with_description("Finding mutually satisfying solutions"),
        Criterion::rating("mutualTrust", "Mutual trust", 1.0)
            .with_description("Sense of security and reliability"),
        Criterion::rating("affection", "Showing affection", 1.0)
            .with_description("Physical and verbal expressions of love"),
        Criterion::bonus("birthdayGifts", "Birthday gifts", 0.5),
        Criterion::bonus("anniversaryGifts", "Anniversary gifts", 0.5),
        Criterion::bonus("spontaneousGifts", "Spontaneous gifts", 0.5),
        Criterion::bonus("thoughtfulGifts", "Thoughtful, personalised gifts", 0.5),
    ];

    CriteriaCatalog::new(
        CatalogPreset::GiftBonus.key(),
        criteria,
        RatingScale::new(1, 5).with_captions(RATING_CAPTIONS),
        ThresholdLadder::canonical(),
    )
}
