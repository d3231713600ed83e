//! Food pairing scoring driven by a tunable rule table.
//!
//! Each rule pairs a condition on the food with the wine traits it rewards.
//! The table is plain data so weights can be tuned from configuration
//! without touching the composer:
//!
//! ```toml
//! [[pairing.rules]]
//! when = { protein = "beef" }
//! high = ["tannin", "body"]
//! weight = 3.0
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::{CellarError, Result},
    models::{FoodProfile, Level, Protein, Sauce, WineProfile},
};

/// Upper bound of the pairing score.
pub const MAX_PAIRING_SCORE: u32 = 40;

/// A wine trait a rule can reward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Body,
    Tannin,
    Oak,
    Acidity,
    Sweetness,
}

impl Trait {
    fn value(self, profile: &WineProfile) -> f64 {
        match self {
            Trait::Body => profile.body,
            Trait::Tannin => profile.tannin,
            Trait::Oak => profile.oak,
            Trait::Acidity => profile.acidity,
            Trait::Sweetness => profile.sweetness,
        }
    }
}

/// Which end of the scale a rule rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefer {
    High,
    Low,
}

/// Condition on the food that activates a rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    Protein(Protein),
    FatAtLeast(Level),
    FatAtMost(Level),
    SpiceAtLeast(Level),
    SmokeAtLeast(Level),
    Sauce(Sauce),
}

impl RuleCondition {
    /// Whether the food satisfies this condition.
    pub fn matches(&self, food: &FoodProfile) -> bool {
        match *self {
            RuleCondition::Protein(protein) => food.protein == protein,
            RuleCondition::FatAtLeast(level) => food.fat_level() >= level,
            RuleCondition::FatAtMost(level) => food.fat_level() <= level,
            RuleCondition::SpiceAtLeast(level) => food.spice >= level,
            RuleCondition::SmokeAtLeast(level) => food.smoke >= level,
            RuleCondition::Sauce(sauce) => food.sauce == sauce,
        }
    }
}

/// One weighted pairing rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PairingRule {
    pub when: RuleCondition,
    /// Traits rewarded for being high
    #[serde(default)]
    pub high: Vec<Trait>,
    /// Traits rewarded for being low
    #[serde(default)]
    pub low: Vec<Trait>,
    pub weight: f64,
}

impl PairingRule {
    fn new(when: RuleCondition, weight: f64) -> Self {
        Self {
            when,
            high: Vec::new(),
            low: Vec::new(),
            weight,
        }
    }

    fn prefer(mut self, prefer: Prefer, traits: &[Trait]) -> Self {
        match prefer {
            Prefer::High => self.high.extend_from_slice(traits),
            Prefer::Low => self.low.extend_from_slice(traits),
        }
        self
    }

    /// How well the wine satisfies the rule, in [0, 1].
    ///
    /// Returns `None` for rules with no traits.
    fn fit(&self, profile: &WineProfile) -> Option<f64> {
        let highs = self.high.iter().map(|t| t.value(profile) / 10.0);
        let lows = self.low.iter().map(|t| 1.0 - t.value(profile) / 10.0);
        let terms: Vec<f64> = highs.chain(lows).collect();
        if terms.is_empty() {
            return None;
        }
        Some(terms.iter().sum::<f64>() / terms.len() as f64)
    }
}

/// The full rule table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PairingTable {
    pub rules: Vec<PairingRule>,
}

impl PairingTable {
    /// Rejects negative or non-finite weights.
    pub fn validate(&self) -> Result<()> {
        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.weight.is_finite() || rule.weight < 0.0 {
                return Err(CellarError::Configuration {
                    message: format!(
                        "pairing rule {index} has invalid weight {}",
                        rule.weight
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Default for PairingTable {
    fn default() -> Self {
        use Prefer::{High, Low};
        use RuleCondition as When;
        use Trait::*;

        let rules = vec![
            // Red meat wants grip and weight
            PairingRule::new(When::Protein(Protein::Beef), 3.0).prefer(High, &[Tannin, Body]),
            PairingRule::new(When::Protein(Protein::Lamb), 3.0)
                .prefer(High, &[Tannin, Body, Oak]),
            PairingRule::new(When::Protein(Protein::Pork), 2.0)
                .prefer(High, &[Body, Acidity]),
            PairingRule::new(When::Protein(Protein::Chicken), 2.0)
                .prefer(High, &[Acidity])
                .prefer(Low, &[Tannin]),
            // Delicate proteins want freshness and little tannin
            PairingRule::new(When::Protein(Protein::Fish), 3.0)
                .prefer(High, &[Acidity])
                .prefer(Low, &[Tannin, Oak]),
            PairingRule::new(When::Protein(Protein::Vegetarian), 2.0)
                .prefer(High, &[Acidity])
                .prefer(Low, &[Tannin]),
            PairingRule::new(When::FatAtLeast(Level::High), 2.0).prefer(High, &[Tannin, Body]),
            PairingRule::new(When::FatAtMost(Level::Low), 1.0)
                .prefer(High, &[Acidity])
                .prefer(Low, &[Body]),
            PairingRule::new(When::SpiceAtLeast(Level::Medium), 1.5)
                .prefer(High, &[Acidity])
                .prefer(Low, &[Tannin]),
            PairingRule::new(When::SpiceAtLeast(Level::High), 2.0)
                .prefer(High, &[Sweetness])
                .prefer(Low, &[Tannin, Oak]),
            PairingRule::new(When::SmokeAtLeast(Level::Medium), 1.5).prefer(High, &[Oak]),
            PairingRule::new(When::SmokeAtLeast(Level::High), 2.0).prefer(High, &[Oak, Body]),
            PairingRule::new(When::Sauce(Sauce::Tomato), 1.0).prefer(High, &[Acidity]),
            PairingRule::new(When::Sauce(Sauce::Cream), 1.0).prefer(High, &[Body, Oak]),
            PairingRule::new(When::Sauce(Sauce::RedWine), 1.0).prefer(High, &[Tannin, Body]),
            PairingRule::new(When::Sauce(Sauce::Citrus), 1.0).prefer(High, &[Acidity]),
            PairingRule::new(When::Sauce(Sauce::Sweet), 1.0).prefer(High, &[Sweetness]),
        ];
        Self { rules }
    }
}

/// Pairing score in `0..=MAX_PAIRING_SCORE`.
///
/// The score is the weight-averaged fit of every rule the food activates,
/// scaled to the score range. With no protein, pairing is skipped and the
/// score is 0.
pub fn pairing_score(profile: &WineProfile, food: &FoodProfile, table: &PairingTable) -> u32 {
    if food.protein == Protein::None {
        return 0;
    }

    let (weighted_fit, total_weight) = table
        .rules
        .iter()
        .filter(|rule| rule.weight > 0.0 && rule.when.matches(food))
        .filter_map(|rule| rule.fit(profile).map(|fit| (rule.weight * fit, rule.weight)))
        .fold((0.0, 0.0), |(acc_fit, acc_w), (fit, w)| (acc_fit + fit, acc_w + w));

    if total_weight <= 0.0 {
        return 0;
    }

    let score = (f64::from(MAX_PAIRING_SCORE) * weighted_fit / total_weight).round();
    (score.max(0.0) as u32).min(MAX_PAIRING_SCORE)
}
