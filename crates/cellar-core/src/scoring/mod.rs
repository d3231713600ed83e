//! Drink-now and food-pairing scores.
//!
//! Both scorers are pure and deterministic. Any variety in a lineup comes
//! from the composer's explicit jitter, never from here.

pub mod pairing;
pub mod readiness;

pub use pairing::{pairing_score, PairingRule, PairingTable, Prefer, RuleCondition, Trait, MAX_PAIRING_SCORE};
pub use readiness::{readiness_score, tier_score, MAX_DEPTH_BONUS, MIN_TIER_GAP};
