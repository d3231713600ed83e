//! Status enumerations for evening plans and bottle readiness.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an evening plan.
///
/// `Completed` and `Cancelled` are terminal: a plan never re-enters
/// `Active` once it has left it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Plan is being stepped through
    #[default]
    Active,

    /// Plan finished and its openings were recorded
    Completed,

    /// Plan was abandoned or replaced by a newer plan
    Cancelled,
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PlanStatus::Active),
            "completed" => Ok(PlanStatus::Completed),
            "cancelled" | "canceled" => Ok(PlanStatus::Cancelled),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Active => "active",
            PlanStatus::Completed => "completed",
            PlanStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are allowed.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PlanStatus::Active)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cellar_core::models::PlanStatus;
    ///
    /// assert_eq!(PlanStatus::Active.with_icon(), "➤ Active");
    /// assert_eq!(PlanStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(PlanStatus::Cancelled.with_icon(), "✗ Cancelled");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            PlanStatus::Active => "➤ Active",
            PlanStatus::Completed => "✓ Completed",
            PlanStatus::Cancelled => "✗ Cancelled",
        }
    }
}

/// Drinking-window classification of a bottle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Readiness {
    /// Inside its optimal drinking window
    Ready,

    /// Approaching the window
    PeakSoon,

    /// Should keep aging
    Hold,

    /// Not yet analyzed
    #[default]
    Unknown,
}

impl FromStr for Readiness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "READY" => Ok(Readiness::Ready),
            "PEAK_SOON" | "PEAKSOON" => Ok(Readiness::PeakSoon),
            "HOLD" => Ok(Readiness::Hold),
            "UNKNOWN" | "" => Ok(Readiness::Unknown),
            _ => Err(format!("Invalid readiness: {s}")),
        }
    }
}

impl Readiness {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Readiness::Ready => "READY",
            Readiness::PeakSoon => "PEAK_SOON",
            Readiness::Hold => "HOLD",
            Readiness::Unknown => "UNKNOWN",
        }
    }
}
