//! Evening plan model and its state transitions.
//!
//! Transitions here are pure: they validate and mutate an in-memory plan.
//! Persisting them atomically, with a version check, is the store's job
//! (see [`crate::db`]).

use std::collections::HashSet;

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{lineup::validate_positions, LineupSlot, PlanStatus};
use crate::error::{CellarError, Result};

/// Highest rating a guest can give an opened bottle.
pub const MAX_RATING: f32 = 5.0;

/// A lineup being worked through over an evening.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EveningPlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Owner of the plan; at most one active plan per owner
    pub owner: String,

    #[serde(default)]
    pub status: PlanStatus,

    /// Ordered pours; order is meaningful
    pub queue: Vec<LineupSlot>,

    /// 0-based index of the pour currently being served
    pub now_playing_index: usize,

    /// Bumped on every persisted change
    pub version: u64,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Total bottles opened, set on completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottles_opened: Option<u32>,

    /// Average rating across rated, opened slots, set on completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

/// What happened to one slot by the end of the evening.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SlotOutcome {
    /// 1-based position of the slot in the plan's queue
    pub position: u32,
    /// Whether the bottle was actually opened
    #[serde(default = "default_opened")]
    pub opened: bool,
    /// Bottles opened for this slot
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Rating on a 0–5 scale
    pub rating: Option<f32>,
    pub notes: Option<String>,
}

fn default_opened() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}

impl SlotOutcome {
    /// One bottle opened at `position`, unrated.
    pub fn opened(position: u32) -> Self {
        Self {
            position,
            opened: true,
            quantity: 1,
            rating: None,
            notes: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// An opened slot resolved against the plan's queue.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOpening {
    pub item_id: u64,
    pub quantity: u32,
    pub rating: Option<f32>,
    pub notes: Option<String>,
}

/// Validated completion payload, ready for the store to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSummary {
    pub openings: Vec<ResolvedOpening>,
    pub bottles_opened: u32,
    pub average_rating: Option<f64>,
}

impl EveningPlan {
    /// Fresh active plan seeded from a lineup, cursor on the first pour.
    ///
    /// The ID is assigned by the store; callers get it back from
    /// [`crate::Database::create_plan`].
    pub fn new(owner: impl Into<String>, queue: Vec<LineupSlot>, now: Timestamp) -> Result<Self> {
        if queue.is_empty() {
            return Err(CellarError::invalid_input("lineup")
                .with_reason("An evening plan needs at least one pour"));
        }
        validate_positions(&queue)?;

        Ok(Self {
            id: 0,
            owner: owner.into(),
            status: PlanStatus::Active,
            queue,
            now_playing_index: 0,
            version: 1,
            created_at: now,
            updated_at: now,
            completed_at: None,
            bottles_opened: None,
            average_rating: None,
        })
    }

    /// Slot under the cursor.
    pub fn now_playing(&self) -> Option<&LineupSlot> {
        self.queue.get(self.now_playing_index)
    }

    /// Version a write should be conditioned on.
    ///
    /// Fails with `Conflict` when the caller saw an older (or newer) version
    /// than the one just loaded.
    pub fn check_version(&self, expected: Option<u64>) -> Result<u64> {
        match expected {
            Some(expected) if expected != self.version => Err(CellarError::Conflict {
                plan_id: self.id,
                expected,
                actual: self.version,
            }),
            _ => Ok(self.version),
        }
    }

    pub(crate) fn ensure_active(&self) -> Result<()> {
        if self.status.is_terminal() {
            return Err(CellarError::InvalidTransition {
                plan_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Moves the cursor. Out-of-range targets are rejected, not clamped.
    pub fn move_to(&mut self, target: usize, now: Timestamp) -> Result<()> {
        self.ensure_active()?;
        if target >= self.queue.len() {
            return Err(CellarError::InvalidPosition {
                index: target,
                len: self.queue.len(),
            });
        }
        self.now_playing_index = target;
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the queue wholesale, keeping the cursor where it is.
    pub fn replace_queue(&mut self, queue: Vec<LineupSlot>, now: Timestamp) -> Result<()> {
        self.ensure_active()?;
        if self.now_playing_index >= queue.len() {
            return Err(CellarError::InvalidPosition {
                index: self.now_playing_index,
                len: queue.len(),
            });
        }
        validate_positions(&queue)?;
        self.queue = queue;
        self.updated_at = now;
        Ok(())
    }

    /// Validates outcomes against the queue and computes aggregate stats.
    ///
    /// Does not touch the plan; stock checks happen in the store where the
    /// quantities live.
    pub fn resolve_outcomes(&self, outcomes: &[SlotOutcome]) -> Result<CompletionSummary> {
        self.ensure_active()?;

        let mut seen = HashSet::new();
        let mut openings = Vec::new();
        for outcome in outcomes {
            if !seen.insert(outcome.position) {
                return Err(CellarError::invalid_input("outcomes").with_reason(format!(
                    "Position {} is listed more than once",
                    outcome.position
                )));
            }
            let slot = self
                .queue
                .iter()
                .find(|slot| slot.position == outcome.position)
                .ok_or(CellarError::InvalidPosition {
                    index: outcome.position as usize,
                    len: self.queue.len(),
                })?;

            if !outcome.opened {
                continue;
            }
            if outcome.quantity == 0 {
                return Err(CellarError::invalid_input("quantity").with_reason(format!(
                    "Opened slot {} must open at least one bottle",
                    outcome.position
                )));
            }
            if let Some(rating) = outcome.rating {
                if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
                    return Err(CellarError::invalid_input("rating")
                        .with_reason(format!("Rating {rating} is outside 0–{MAX_RATING}")));
                }
            }
            openings.push(ResolvedOpening {
                item_id: slot.item_id,
                quantity: outcome.quantity,
                rating: outcome.rating,
                notes: outcome.notes.clone(),
            });
        }

        let bottles_opened = openings
            .iter()
            .try_fold(0u32, |total, o| total.checked_add(o.quantity))
            .ok_or_else(|| {
                CellarError::invalid_input("quantity")
                    .with_reason("Total bottles opened is too large")
            })?;
        let ratings: Vec<f64> = openings
            .iter()
            .filter_map(|o| o.rating.map(f64::from))
            .collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        Ok(CompletionSummary {
            openings,
            bottles_opened,
            average_rating,
        })
    }

    /// Marks the plan completed with its aggregate stats.
    pub fn complete(&mut self, summary: &CompletionSummary, now: Timestamp) -> Result<()> {
        self.ensure_active()?;
        self.status = PlanStatus::Completed;
        self.bottles_opened = Some(summary.bottles_opened);
        self.average_rating = summary.average_rating;
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Marks the plan cancelled.
    pub fn cancel(&mut self, now: Timestamp) -> Result<()> {
        self.ensure_active()?;
        self.status = PlanStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lineup::relabel;

    fn queue(n: u64) -> Vec<LineupSlot> {
        let mut slots: Vec<_> = (1..=n)
            .map(|id| LineupSlot {
                position: 0,
                item_id: id * 10,
                name: format!("Wine {id}"),
                label: String::new(),
                locked: false,
            })
            .collect();
        relabel(&mut slots);
        slots
    }

    fn plan(n: u64) -> EveningPlan {
        let mut plan = EveningPlan::new("alice", queue(n), Timestamp::UNIX_EPOCH).unwrap();
        plan.id = 1;
        plan
    }

    #[test]
    fn test_new_plan_starts_at_first_pour() {
        let plan = plan(3);
        assert_eq!(plan.status, PlanStatus::Active);
        assert_eq!(plan.now_playing_index, 0);
        assert_eq!(plan.version, 1);
        assert_eq!(plan.now_playing().map(|s| s.item_id), Some(10));
    }

    #[test]
    fn test_new_plan_rejects_empty_lineup() {
        let err = EveningPlan::new("alice", vec![], Timestamp::UNIX_EPOCH).unwrap_err();
        assert!(matches!(err, CellarError::InvalidInput { .. }));
    }

    #[test]
    fn test_move_rejects_out_of_range() {
        let mut plan = plan(3);
        let err = plan.move_to(3, Timestamp::UNIX_EPOCH).unwrap_err();
        assert!(matches!(err, CellarError::InvalidPosition { index: 3, len: 3 }));
        assert_eq!(plan.now_playing_index, 0);

        plan.move_to(2, Timestamp::UNIX_EPOCH).unwrap();
        assert_eq!(plan.now_playing_index, 2);
    }

    #[test]
    fn test_replace_queue_keeps_cursor_valid() {
        let mut plan = plan(4);
        plan.move_to(3, Timestamp::UNIX_EPOCH).unwrap();

        let err = plan
            .replace_queue(queue(3), Timestamp::UNIX_EPOCH)
            .unwrap_err();
        assert!(matches!(err, CellarError::InvalidPosition { index: 3, len: 3 }));
        assert_eq!(plan.queue.len(), 4);

        plan.replace_queue(queue(5), Timestamp::UNIX_EPOCH).unwrap();
        assert_eq!(plan.queue.len(), 5);
        assert_eq!(plan.now_playing_index, 3);
    }

    #[test]
    fn test_resolve_outcomes_aggregates() {
        let plan = plan(3);
        let summary = plan
            .resolve_outcomes(&[
                SlotOutcome::opened(1).with_rating(4.0),
                SlotOutcome::opened(2).with_quantity(2),
                SlotOutcome::opened(3).with_rating(5.0).with_notes("stunning"),
            ])
            .unwrap();

        assert_eq!(summary.bottles_opened, 4);
        assert_eq!(summary.average_rating, Some(4.5));
        assert_eq!(summary.openings.len(), 3);
        assert_eq!(summary.openings[1].item_id, 20);
        assert_eq!(summary.openings[2].notes.as_deref(), Some("stunning"));
    }

    #[test]
    fn test_unopened_slots_are_skipped() {
        let plan = plan(2);
        let mut skipped = SlotOutcome::opened(2).with_rating(1.0);
        skipped.opened = false;

        let summary = plan
            .resolve_outcomes(&[SlotOutcome::opened(1), skipped])
            .unwrap();
        assert_eq!(summary.bottles_opened, 1);
        assert_eq!(summary.average_rating, None);
    }

    #[test]
    fn test_resolve_outcomes_validation() {
        let plan = plan(2);

        let err = plan.resolve_outcomes(&[SlotOutcome::opened(5)]).unwrap_err();
        assert!(matches!(err, CellarError::InvalidPosition { .. }));

        let err = plan
            .resolve_outcomes(&[SlotOutcome::opened(1), SlotOutcome::opened(1)])
            .unwrap_err();
        assert!(matches!(err, CellarError::InvalidInput { .. }));

        let err = plan
            .resolve_outcomes(&[SlotOutcome::opened(1).with_quantity(0)])
            .unwrap_err();
        assert!(matches!(err, CellarError::InvalidInput { .. }));

        let err = plan
            .resolve_outcomes(&[SlotOutcome::opened(1).with_rating(7.5)])
            .unwrap_err();
        assert!(matches!(err, CellarError::InvalidInput { .. }));
    }

    #[test]
    fn test_terminal_plans_reject_transitions() {
        let mut plan = plan(2);
        plan.cancel(Timestamp::UNIX_EPOCH).unwrap();

        assert!(matches!(
            plan.move_to(1, Timestamp::UNIX_EPOCH),
            Err(CellarError::InvalidTransition { .. })
        ));
        assert!(matches!(
            plan.cancel(Timestamp::UNIX_EPOCH),
            Err(CellarError::InvalidTransition { .. })
        ));
        assert!(matches!(
            plan.resolve_outcomes(&[]),
            Err(CellarError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_complete_sets_stats_once() {
        let mut plan = plan(2);
        let summary = plan
            .resolve_outcomes(&[SlotOutcome::opened(1).with_rating(3.0)])
            .unwrap();
        plan.complete(&summary, Timestamp::UNIX_EPOCH).unwrap();

        assert_eq!(plan.status, PlanStatus::Completed);
        assert_eq!(plan.bottles_opened, Some(1));
        assert_eq!(plan.average_rating, Some(3.0));
        assert!(plan.completed_at.is_some());
        assert!(plan.complete(&summary, Timestamp::UNIX_EPOCH).is_err());
    }

    #[test]
    fn test_oversized_outcome_quantities_are_rejected() {
        let plan = plan(2);
        let err = plan
            .resolve_outcomes(&[
                SlotOutcome::opened(1).with_quantity(u32::MAX),
                SlotOutcome::opened(2).with_quantity(u32::MAX),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            CellarError::InvalidInput { ref field, .. } if field == "quantity"
        ));
    }

    #[test]
    fn test_check_version() {
        let mut plan = plan(2);
        plan.version = 4;
        assert_eq!(plan.check_version(None).unwrap(), 4);
        assert_eq!(plan.check_version(Some(4)).unwrap(), 4);
        assert!(matches!(
            plan.check_version(Some(3)),
            Err(CellarError::Conflict {
                expected: 3,
                actual: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_outcome_defaults_when_deserialized() {
        let outcome: SlotOutcome = serde_json::from_str(r#"{"position":2}"#).unwrap();
        assert!(outcome.opened);
        assert_eq!(outcome.quantity, 1);
        assert_eq!(outcome.rating, None);
    }
}
