//! Readiness scoring.

use crate::models::{Readiness, Wine};

/// Cap on the ownership-depth bonus.
pub const MAX_DEPTH_BONUS: u32 = 25;

const DEPTH_BONUS_PER_BOTTLE: u32 = 5;

/// Smallest distance between two adjacent readiness tiers.
pub const MIN_TIER_GAP: u32 = 10;

/// Base score of a readiness tier.
pub fn tier_score(readiness: Readiness) -> u32 {
    match readiness {
        Readiness::Ready => 100,
        Readiness::PeakSoon => 50,
        Readiness::Hold => 10,
        Readiness::Unknown => 0,
    }
}

/// Drink-now score: readiness tier plus a bonus for owning several bottles.
///
/// Opening one of many bottles costs less than opening the last one.
pub fn readiness_score(wine: &Wine) -> u32 {
    let depth_bonus = wine
        .quantity
        .saturating_mul(DEPTH_BONUS_PER_BOTTLE)
        .min(MAX_DEPTH_BONUS);
    tier_score(wine.readiness) + depth_bonus
}
