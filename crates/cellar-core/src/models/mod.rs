//! Data models for the cellar, lineups and evening plans.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures separate from
//! presentation.
//!
//! # Examples
//!
//! ```rust
//! use cellar_core::models::{FoodProfile, Level, Protein, WineProfile};
//!
//! let food = FoodProfile::new(Protein::Beef).with_smoke(Level::High);
//! assert_eq!(food.fat_level(), Level::High);
//!
//! let profile = WineProfile::new(8.0, 7.0, 6.0, 5.0, 1.0, 7.0);
//! assert!(profile.power() > 6.0);
//! ```

pub mod filters;
pub mod food;
pub mod lineup;
pub mod opening;
pub mod plan;
pub mod profile;
pub mod status;
pub mod wine;


pub use filters::{PlanFilter, WineFilter};
pub use food::{FoodProfile, Level, Protein, Sauce};
pub use lineup::{serving_label, LineupSlot};
pub use opening::Opening;
pub use plan::{CompletionSummary, EveningPlan, ResolvedOpening, SlotOutcome};
pub use profile::WineProfile;
pub use status::{PlanStatus, Readiness};
pub use wine::{Wine, WineColor};
