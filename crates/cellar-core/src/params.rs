//! Parameter structures for cellar operations.
//!
//! These are shared by every interface (CLI, MCP) and carry no framework
//! derives beyond serde and an optional JSON schema. Interface layers wrap
//! or convert into them:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Plan writes take an optional `expected_version`. When it is set and the
//! stored plan has moved on, the write fails with
//! [`CellarError::Conflict`](crate::CellarError::Conflict) instead of
//! overwriting another client's progress.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    config::GroupSize,
    error::{CellarError, Result},
    models::{
        plan::MAX_RATING, FoodProfile, LineupSlot, PlanStatus, Readiness, SlotOutcome,
        WineColor, WineFilter, WineProfile,
    },
};

fn default_quantity() -> u32 {
    1
}

/// Parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters naming an owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Owner {
    /// Owner of the collection
    pub owner: String,
}

/// Parameters for a plan write that needs nothing but the plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanRef {
    /// ID of the evening plan
    pub plan_id: u64,
    /// Last version of the plan the caller saw
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// Parameters for adding a wine to the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddWine {
    /// Owner of the collection
    pub owner: String,
    /// Label name
    pub name: String,
    /// One of 'red', 'white', 'rose', 'sparkling'
    pub color: WineColor,
    pub vintage: Option<i32>,
    pub region: Option<String>,
    /// Style hint such as "oaked" or "late harvest"
    pub style: Option<String>,
    /// Alcohol by volume in percent
    pub abv: Option<f64>,
    /// Bottles on hand
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// One of 'READY', 'PEAK_SOON', 'HOLD', 'UNKNOWN'
    #[serde(default)]
    pub readiness: Readiness,
    /// Owner's rating on a 0–5 scale
    pub rating: Option<f32>,
    /// Known profile; estimated from the other fields when absent
    #[serde(default)]
    pub profile: Option<WineProfile>,
}

impl AddWine {
    /// Minimal wine: one bottle, readiness unknown.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, color: WineColor) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            color,
            vintage: None,
            region: None,
            style: None,
            abv: None,
            quantity: 1,
            readiness: Readiness::Unknown,
            rating: None,
            profile: None,
        }
    }

    /// Rejects blank names, out-of-range ratings and implausible ABV.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cellar_core::{models::WineColor, params::AddWine};
    ///
    /// let mut wine = AddWine::new("me", "Chablis", WineColor::White);
    /// assert!(wine.validate().is_ok());
    ///
    /// wine.rating = Some(6.0);
    /// assert!(wine.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        validate_owner(&self.owner)?;
        if self.name.trim().is_empty() {
            return Err(CellarError::invalid_input("name").with_reason("Name must not be empty"));
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        if let Some(abv) = self.abv {
            if !abv.is_finite() || !(0.0..=100.0).contains(&abv) {
                return Err(CellarError::invalid_input("abv")
                    .with_reason(format!("ABV {abv} must be a percentage between 0 and 100")));
            }
        }
        Ok(())
    }
}

/// Parameters for listing wines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListWines {
    /// Owner of the collection
    pub owner: String,
    /// Only wines of this color
    pub color: Option<WineColor>,
    /// Only wines rated at least this high
    pub min_rating: Option<f32>,
    /// Hide wines with no bottles left
    #[serde(default)]
    pub in_stock: bool,
}

impl ListWines {
    pub fn filter(&self) -> WineFilter {
        WineFilter {
            color: self.color,
            min_rating: self.min_rating,
        }
    }
}

/// Parameters for composing a lineup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ComposeLineup {
    /// Owner whose collection to draw from
    pub owner: String,
    /// 'small', 'medium' or 'large'; sets the number of pours
    #[serde(default)]
    pub group_size: GroupSize,
    /// Only wines of this color
    pub color: Option<WineColor>,
    /// Only wines rated at least this high
    pub min_rating: Option<f32>,
    /// Dish served with the lineup; pairing is skipped when absent
    pub food: Option<FoodProfile>,
    /// Seed for the tie-breaking jitter, for reproducible lineups
    pub seed: Option<u64>,
}

impl ComposeLineup {
    pub fn filter(&self) -> WineFilter {
        WineFilter {
            color: self.color,
            min_rating: self.min_rating,
        }
    }
}

/// Parameters for starting an evening plan from a composed lineup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StartPlan {
    /// Owner of the plan
    pub owner: String,
    /// Slots in serving order, positions 1..n
    pub lineup: Vec<LineupSlot>,
}

/// Parameters for moving the now-pouring cursor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveCursor {
    /// ID of the evening plan
    pub plan_id: u64,
    /// 0-based index of the pour to move to
    pub index: usize,
    /// Last version of the plan the caller saw
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// Parameters for replacing a plan's queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateQueue {
    /// ID of the evening plan
    pub plan_id: u64,
    /// New queue, positions 1..n
    pub queue: Vec<LineupSlot>,
    /// Last version of the plan the caller saw
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// Parameters for completing an evening plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CompletePlan {
    /// ID of the evening plan
    pub plan_id: u64,
    /// What happened to each slot; slots not listed were not opened
    #[serde(default)]
    pub outcomes: Vec<SlotOutcome>,
    /// Last version of the plan the caller saw
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// Parameters for listing evening plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {
    /// Owner of the plans
    pub owner: String,
    /// Only plans in this status ('active', 'completed', 'cancelled')
    pub status: Option<PlanStatus>,
}

/// Parameters for listing opening history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListOpenings {
    /// Owner of the collection
    pub owner: String,
    /// Only openings of this wine
    pub item_id: Option<u64>,
}

pub(crate) fn validate_owner(owner: &str) -> Result<()> {
    if owner.trim().is_empty() {
        return Err(CellarError::invalid_input("owner").with_reason("Owner must not be empty"));
    }
    Ok(())
}

pub(crate) fn validate_rating(rating: f32) -> Result<()> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(CellarError::invalid_input("rating")
            .with_reason(format!("Rating {rating} is outside 0–{MAX_RATING}")));
    }
    Ok(())
}
