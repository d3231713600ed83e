//! Lineup composition.
//!
//! Candidates are scored for readiness and food fit, the best N are kept,
//! and those are sequenced from lightest to most powerful. A single repair
//! pass then breaks up back-to-back heavy pours where one swap helps.

use log::debug;
use rand::Rng;

use crate::{
    config::EngineConfig,
    display::Lineup,
    estimator::estimate_profile,
    models::{lineup::relabel, FoodProfile, LineupSlot, Wine},
    scoring::{pairing_score, readiness_score},
};

/// A candidate that made the cut, with everything sequencing needs.
#[derive(Debug, Clone)]
struct Pick {
    item_id: u64,
    name: String,
    score: u32,
    power: f64,
    heavy: bool,
    locked: bool,
}

/// Composes serving lineups from a pool of candidate wines.
#[derive(Debug, Clone)]
pub struct LineupComposer<'a> {
    config: &'a EngineConfig,
}

impl<'a> LineupComposer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Builds a lineup of at most `count` pours.
    ///
    /// Candidates without bottles are ignored. A pool smaller than `count`
    /// gives a shorter lineup and an empty pool an empty one; neither is an
    /// error. Jitter is drawn from `rng` once per candidate, in input order,
    /// so a seeded RNG makes composition fully reproducible.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        candidates: &[Wine],
        count: usize,
        food: Option<&FoodProfile>,
        rng: &mut R,
    ) -> Lineup {
        let max_jitter = self.config.max_jitter;
        let heavy = self.config.heavy;

        let mut picks: Vec<Pick> = candidates
            .iter()
            .filter(|wine| wine.quantity > 0)
            .map(|wine| {
                let profile = estimate_profile(wine);
                let readiness = readiness_score(wine);
                let pairing = food
                    .map(|food| pairing_score(&profile, food, &self.config.pairing))
                    .unwrap_or(0);
                let jitter = if max_jitter == 0 {
                    0
                } else {
                    rng.gen_range(0..=max_jitter)
                };
                debug!(
                    "Scored wine {} ({}): readiness={readiness} pairing={pairing} jitter={jitter} power={:.2}",
                    wine.id,
                    wine.name,
                    profile.power()
                );
                Pick {
                    item_id: wine.id,
                    name: wine.name.clone(),
                    score: readiness + pairing + jitter,
                    power: profile.power(),
                    heavy: profile.is_heavy(heavy.tannin, heavy.oak),
                    locked: false,
                }
            })
            .collect();

        picks.sort_by(|a, b| b.score.cmp(&a.score).then(a.item_id.cmp(&b.item_id)));
        picks.truncate(count);

        picks.sort_by(|a, b| {
            a.power
                .total_cmp(&b.power)
                .then_with(|| a.item_id.cmp(&b.item_id))
        });

        let swaps = repair_heavy_runs(&mut picks);
        if swaps > 0 {
            debug!("Repair pass made {swaps} swap(s)");
        }

        let mut slots: Vec<LineupSlot> = picks
            .into_iter()
            .map(|pick| LineupSlot {
                position: 0,
                item_id: pick.item_id,
                name: pick.name,
                label: String::new(),
                locked: pick.locked,
            })
            .collect();
        relabel(&mut slots);

        Lineup(slots)
    }
}

/// Number of adjacent pairs where both pours are heavy.
fn heavy_adjacent_pairs(picks: &[Pick]) -> usize {
    picks.windows(2).filter(|w| w[0].heavy && w[1].heavy).count()
}

/// Single left-to-right pass over triples.
///
/// When two heavy pours sit together and the next one is not heavy, the
/// second and third trade places if neither is locked and the trade lowers
/// the heavy-adjacent count. A pool with no light pour in the right place is
/// left as it is. Returns the number of swaps.
fn repair_heavy_runs(picks: &mut [Pick]) -> usize {
    let mut swaps = 0;
    let mut i = 0;
    while i + 2 < picks.len() {
        let candidate = picks[i].heavy
            && picks[i + 1].heavy
            && !picks[i + 2].heavy
            && !picks[i + 1].locked
            && !picks[i + 2].locked;

        if candidate {
            let before = heavy_adjacent_pairs(picks);
            picks.swap(i + 1, i + 2);
            if heavy_adjacent_pairs(picks) < before {
                swaps += 1;
                // The heavy pour now sits at i + 2; resume from there
                i += 2;
                continue;
            }
            picks.swap(i + 1, i + 2);
        }
        i += 1;
    }
    swaps
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::models::{Level, Protein, Readiness, WineColor, WineProfile};

    fn wine(id: u64, readiness: Readiness, quantity: u32, profile: WineProfile) -> Wine {
        Wine {
            id,
            owner: "alice".to_string(),
            name: format!("Wine {id}"),
            color: WineColor::Red,
            vintage: None,
            region: None,
            style: None,
            abv: None,
            quantity,
            readiness,
            rating: None,
            profile: Some(profile),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn light(level: f64) -> WineProfile {
        WineProfile::new(level, 1.0, 1.0, 7.0, 1.0, level)
    }

    fn heavy(level: f64) -> WineProfile {
        WineProfile::new(level, 7.0, 7.0, 5.0, 1.0, level)
    }

    fn no_jitter() -> EngineConfig {
        EngineConfig {
            max_jitter: 0,
            ..Default::default()
        }
    }

    fn pick(item_id: u64, heavy: bool) -> Pick {
        Pick {
            item_id,
            name: String::new(),
            score: 0,
            power: item_id as f64,
            heavy,
            locked: false,
        }
    }

    fn ids(lineup: &Lineup) -> Vec<u64> {
        lineup.iter().map(|slot| slot.item_id).collect()
    }

    #[test]
    fn test_single_candidate_is_never_padded() {
        let config = no_jitter();
        let composer = LineupComposer::new(&config);
        let pool = vec![wine(1, Readiness::Ready, 3, light(5.0))];

        let lineup = composer.compose(&pool, 3, None, &mut StdRng::seed_from_u64(1));
        assert_eq!(lineup.len(), 1);
        assert_eq!(lineup[0].position, 1);
        assert_eq!(lineup[0].label, "Main");
    }

    #[test]
    fn test_empty_pool_gives_empty_lineup() {
        let config = EngineConfig::default();
        let composer = LineupComposer::new(&config);
        let lineup = composer.compose(&[], 4, None, &mut StdRng::seed_from_u64(1));
        assert!(lineup.is_empty());
    }

    #[test]
    fn test_out_of_stock_candidates_are_dropped() {
        let config = no_jitter();
        let composer = LineupComposer::new(&config);
        let pool = vec![
            wine(1, Readiness::Ready, 0, light(5.0)),
            wine(2, Readiness::Hold, 1, light(5.0)),
        ];
        let lineup = composer.compose(&pool, 3, None, &mut StdRng::seed_from_u64(1));
        assert_eq!(ids(&lineup), vec![2]);
    }

    #[test]
    fn test_beef_prefers_structured_wine_at_equal_readiness() {
        let config = EngineConfig::default();
        let composer = LineupComposer::new(&config);
        let food = FoodProfile::new(Protein::Beef).with_fat(Level::High);
        let pool = vec![
            wine(1, Readiness::Ready, 2, WineProfile::new(3.0, 2.0, 2.0, 6.0, 1.0, 5.0)),
            wine(2, Readiness::Ready, 2, WineProfile::new(9.0, 8.0, 5.0, 5.0, 1.0, 7.0)),
        ];

        // Full jitter on every seed; the pairing gap must still win
        for seed in 0..32 {
            let lineup = composer.compose(&pool, 1, Some(&food), &mut StdRng::seed_from_u64(seed));
            assert_eq!(ids(&lineup), vec![2], "seed {seed}");
        }
    }

    #[test]
    fn test_jitter_never_crosses_readiness_tiers() {
        let config = EngineConfig::default();
        let composer = LineupComposer::new(&config);
        let pool = vec![
            wine(1, Readiness::Hold, 1, light(5.0)),
            wine(2, Readiness::Unknown, 1, light(5.0)),
        ];
        for seed in 0..64 {
            let lineup = composer.compose(&pool, 1, None, &mut StdRng::seed_from_u64(seed));
            assert_eq!(ids(&lineup), vec![1], "seed {seed}");
        }
    }

    #[test]
    fn test_top_n_by_score_then_sequenced_by_power() {
        let config = no_jitter();
        let composer = LineupComposer::new(&config);
        let pool = vec![
            wine(1, Readiness::Ready, 1, light(8.0)),
            wine(2, Readiness::Ready, 1, light(2.0)),
            wine(3, Readiness::Unknown, 1, light(1.0)),
            wine(4, Readiness::PeakSoon, 1, light(5.0)),
        ];

        let lineup = composer.compose(&pool, 3, None, &mut StdRng::seed_from_u64(7));
        assert_eq!(ids(&lineup), vec![2, 4, 1]);
        assert_eq!(
            lineup.iter().map(|s| s.label.as_str()).collect::<Vec<_>>(),
            vec!["Warm-up", "Main", "Finale"]
        );
    }

    #[test]
    fn test_score_ties_break_by_id() {
        let config = no_jitter();
        let composer = LineupComposer::new(&config);
        let pool = vec![
            wine(9, Readiness::Ready, 1, light(5.0)),
            wine(3, Readiness::Ready, 1, light(5.0)),
            wine(5, Readiness::Ready, 1, light(5.0)),
        ];
        let lineup = composer.compose(&pool, 2, None, &mut StdRng::seed_from_u64(0));
        assert_eq!(ids(&lineup), vec![3, 5]);
    }

    #[test]
    fn test_same_seed_same_lineup() {
        let config = EngineConfig::default();
        let composer = LineupComposer::new(&config);
        let pool: Vec<_> = (1..=8)
            .map(|id| wine(id, Readiness::Ready, 1, light(id as f64)))
            .collect();

        let a = composer.compose(&pool, 5, None, &mut StdRng::seed_from_u64(42));
        let b = composer.compose(&pool, 5, None, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_repair_splits_heavy_pair() {
        let config = no_jitter();
        let composer = LineupComposer::new(&config);
        // Power order is heavy, heavy, light; one swap separates the heavies
        let pool = vec![
            wine(1, Readiness::Ready, 1, heavy(2.0)),
            wine(2, Readiness::Ready, 1, heavy(3.0)),
            wine(3, Readiness::Ready, 1, light(9.0)),
        ];
        let lineup = composer.compose(&pool, 3, None, &mut StdRng::seed_from_u64(0));
        assert_eq!(ids(&lineup), vec![1, 3, 2]);
    }

    #[test]
    fn test_all_heavy_pool_is_left_alone() {
        let mut picks: Vec<_> = (1..=4).map(|id| pick(id, true)).collect();
        assert_eq!(repair_heavy_runs(&mut picks), 0);
        assert_eq!(picks.iter().map(|p| p.item_id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_repair_skips_swap_that_does_not_help() {
        // H H L H: swapping would only move the heavy pair to the end
        let mut picks = vec![pick(1, true), pick(2, true), pick(3, false), pick(4, true)];
        assert_eq!(repair_heavy_runs(&mut picks), 0);
        assert_eq!(picks.iter().map(|p| p.item_id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_repair_respects_locks() {
        let mut picks = vec![pick(1, true), pick(2, true), pick(3, false)];
        picks[2].locked = true;
        assert_eq!(repair_heavy_runs(&mut picks), 0);
        assert_eq!(picks[2].item_id, 3);
    }

    #[test]
    fn test_repair_never_increases_heavy_pairs() {
        let patterns: Vec<Vec<bool>> = (0u32..64)
            .map(|bits| (0..6).map(|b| bits & (1 << b) != 0).collect())
            .collect();
        for pattern in patterns {
            let mut picks: Vec<_> = pattern
                .iter()
                .enumerate()
                .map(|(i, heavy)| pick(i as u64, *heavy))
                .collect();
            let before = heavy_adjacent_pairs(&picks);
            let swaps = repair_heavy_runs(&mut picks);
            let after = heavy_adjacent_pairs(&picks);
            assert!(after <= before, "{pattern:?}");
            if swaps > 0 {
                assert!(after < before, "{pattern:?}");
            }
        }
    }

    #[test]
    fn test_power_is_non_decreasing_without_heavies() {
        let config = EngineConfig::default();
        let composer = LineupComposer::new(&config);
        let pool: Vec<_> = (1..=7)
            .map(|id| wine(id, Readiness::Ready, 2, light(((id * 3) % 10) as f64)))
            .collect();

        let lineup = composer.compose(&pool, 5, None, &mut StdRng::seed_from_u64(3));
        let by_id = |id: u64| pool.iter().find(|w| w.id == id).unwrap();
        let powers: Vec<f64> = lineup
            .iter()
            .map(|slot| estimate_profile(by_id(slot.item_id)).power())
            .collect();
        assert_eq!(powers.len(), 5);
        assert!(powers.windows(2).all(|w| w[0] <= w[1]), "{powers:?}");
    }
}
