//! Filter types for querying the collection and plans.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{PlanStatus, WineColor};

/// Hard filters applied before a wine can become a lineup candidate.
///
/// Wines with no bottles left are always excluded from candidate queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct WineFilter {
    /// Only wines of this color
    pub color: Option<WineColor>,

    /// Only wines the owner rated at least this high (0–5)
    pub min_rating: Option<f32>,
}

impl WineFilter {
    /// Filter restricted to a single color.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cellar_core::models::{WineColor, WineFilter};
    ///
    /// let filter = WineFilter::color(WineColor::Red);
    /// assert_eq!(filter.color, Some(WineColor::Red));
    /// assert!(filter.min_rating.is_none());
    /// ```
    pub fn color(color: WineColor) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }
}

/// Filter options for listing plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Owner whose plans to list
    pub owner: String,

    /// Only plans in this status; all statuses when `None`
    pub status: Option<PlanStatus>,
}
