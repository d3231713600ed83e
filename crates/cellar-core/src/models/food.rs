//! Food profile for a single lineup request.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main protein of the dish.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Protein {
    Beef,
    Lamb,
    Pork,
    Chicken,
    Fish,
    Vegetarian,
    /// No food; pairing is skipped
    #[default]
    None,
}

impl Protein {
    /// Fat level a dish built on this protein usually has.
    pub fn default_fat(&self) -> Level {
        match self {
            Protein::Beef | Protein::Lamb | Protein::Pork => Level::High,
            Protein::Chicken => Level::Medium,
            Protein::Fish | Protein::Vegetarian | Protein::None => Level::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protein::Beef => "beef",
            Protein::Lamb => "lamb",
            Protein::Pork => "pork",
            Protein::Chicken => "chicken",
            Protein::Fish => "fish",
            Protein::Vegetarian => "vegetarian",
            Protein::None => "none",
        }
    }
}

impl FromStr for Protein {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beef" | "steak" => Ok(Protein::Beef),
            "lamb" => Ok(Protein::Lamb),
            "pork" => Ok(Protein::Pork),
            "chicken" | "poultry" => Ok(Protein::Chicken),
            "fish" | "seafood" => Ok(Protein::Fish),
            "vegetarian" | "veg" => Ok(Protein::Vegetarian),
            "none" => Ok(Protein::None),
            _ => Err(format!("Invalid protein: {s}")),
        }
    }
}

/// Three-step intensity used for fat, spice and smoke.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Level::Low),
            "medium" | "med" => Ok(Level::Medium),
            "high" => Ok(Level::High),
            _ => Err(format!("Invalid level: {s}")),
        }
    }
}

/// Sauce family of the dish.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Sauce {
    #[default]
    None,
    Tomato,
    Cream,
    RedWine,
    Citrus,
    Sweet,
}

impl Sauce {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sauce::None => "none",
            Sauce::Tomato => "tomato",
            Sauce::Cream => "cream",
            Sauce::RedWine => "red_wine",
            Sauce::Citrus => "citrus",
            Sauce::Sweet => "sweet",
        }
    }
}

impl FromStr for Sauce {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" => Ok(Sauce::None),
            "tomato" => Ok(Sauce::Tomato),
            "cream" | "butter" => Ok(Sauce::Cream),
            "red_wine" | "redwine" => Ok(Sauce::RedWine),
            "citrus" => Ok(Sauce::Citrus),
            "sweet" => Ok(Sauce::Sweet),
            _ => Err(format!("Invalid sauce: {s}")),
        }
    }
}

/// What is being served alongside the lineup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FoodProfile {
    pub protein: Protein,
    /// Fat level; defaults to the protein's typical fat when omitted
    #[serde(default)]
    pub fat: Option<Level>,
    #[serde(default)]
    pub sauce: Sauce,
    #[serde(default)]
    pub spice: Level,
    #[serde(default)]
    pub smoke: Level,
}

impl FoodProfile {
    /// Profile for a protein with no sauce, low spice and low smoke.
    pub fn new(protein: Protein) -> Self {
        Self {
            protein,
            ..Default::default()
        }
    }

    pub fn with_fat(mut self, fat: Level) -> Self {
        self.fat = Some(fat);
        self
    }

    pub fn with_sauce(mut self, sauce: Sauce) -> Self {
        self.sauce = sauce;
        self
    }

    pub fn with_spice(mut self, spice: Level) -> Self {
        self.spice = spice;
        self
    }

    pub fn with_smoke(mut self, smoke: Level) -> Self {
        self.smoke = smoke;
        self
    }

    /// Effective fat level.
    pub fn fat_level(&self) -> Level {
        self.fat.unwrap_or_else(|| self.protein.default_fat())
    }
}
