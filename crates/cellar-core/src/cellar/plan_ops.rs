//! Lineup and evening plan operations for the Cellar.

use jiff::Timestamp;
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use super::Cellar;
use crate::{
    composer::LineupComposer,
    db::Database,
    display::{Lineup, Openings, Plans},
    error::{CellarError, Result},
    models::{EveningPlan, LineupSlot, PlanFilter},
    params::{
        validate_owner, ComposeLineup, CompletePlan, Id, ListOpenings, ListPlans, MoveCursor,
        Owner, PlanRef, StartPlan, UpdateQueue,
    },
};

impl Cellar {
    /// Composes a lineup from the owner's in-stock wines.
    ///
    /// An empty result is not an error: it means nothing in the collection
    /// passes the filters yet.
    pub async fn compose_lineup(&self, params: &ComposeLineup) -> Result<Lineup> {
        validate_owner(&params.owner)?;
        let owner = params.owner.clone();
        let filter = params.filter();
        debug!("Composing lineup for {owner}: {params:?}");

        let candidates = self
            .with_db(move |db| db.list_available_wines(&owner, &filter))
            .await?;

        let count = self.config.lineup_sizes.for_group(params.group_size);
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let lineup = LineupComposer::new(&self.config).compose(
            &candidates,
            count,
            params.food.as_ref(),
            &mut rng,
        );

        debug!(
            "Composed {} pour(s) from {} candidate(s)",
            lineup.len(),
            candidates.len()
        );
        Ok(lineup)
    }

    /// Starts an evening plan from a lineup, cancelling any plan the owner
    /// already has running.
    ///
    /// # Errors
    ///
    /// Returns `CellarError::InvalidInput` if the lineup is empty
    /// Returns `CellarError::InvalidPosition` if positions do not run 1..n
    /// Returns `CellarError::WineNotFound` if a slot names a wine the owner
    /// does not have
    pub async fn start_plan(&self, params: &StartPlan) -> Result<EveningPlan> {
        validate_owner(&params.owner)?;
        let plan = EveningPlan::new(params.owner.clone(), params.lineup.clone(), Timestamp::now())?;

        let plan = self
            .with_db(move |db| {
                check_lineup_wines(db, &plan.owner, &plan.queue)?;
                db.create_plan(&plan)
            })
            .await?;

        info!(
            "Started plan {} for {} with {} pour(s)",
            plan.id,
            plan.owner,
            plan.queue.len()
        );
        Ok(plan)
    }

    /// Composes a lineup and starts a plan from it in one call.
    pub async fn plan_evening(&self, params: &ComposeLineup) -> Result<EveningPlan> {
        let lineup = self.compose_lineup(params).await?;
        if lineup.is_empty() {
            return Err(CellarError::invalid_input("lineup")
                .with_reason("Nothing qualifies yet; add wines or relax the filters"));
        }

        self.start_plan(&StartPlan {
            owner: params.owner.clone(),
            lineup: lineup.into_slots(),
        })
        .await
    }

    /// Returns the owner's active plan, if any.
    pub async fn get_active_plan(&self, params: &Owner) -> Result<Option<EveningPlan>> {
        validate_owner(&params.owner)?;
        let owner = params.owner.clone();
        self.with_db(move |db| db.load_active_plan(&owner)).await
    }

    /// Retrieves a plan by its ID, whatever its status.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<EveningPlan>> {
        let id = params.id;
        self.with_db(move |db| db.get_plan(id)).await
    }

    /// Lists the owner's plans, newest first.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Plans> {
        validate_owner(&params.owner)?;
        let filter = PlanFilter {
            owner: params.owner.clone(),
            status: params.status,
        };
        let plans = self.with_db(move |db| db.list_plans(&filter)).await?;
        Ok(Plans(plans))
    }

    /// Moves the now-pouring cursor to a 0-based index.
    pub async fn move_plan_cursor(&self, params: &MoveCursor) -> Result<EveningPlan> {
        let target = params.index;
        let plan = self
            .mutate_plan(params.plan_id, params.expected_version, move |plan, now| {
                plan.move_to(target, now)
            })
            .await?;

        info!("Plan {} now pouring #{}", plan.id, target + 1);
        Ok(plan)
    }

    /// Advances the cursor by one pour.
    ///
    /// # Errors
    ///
    /// Returns `CellarError::InvalidPosition` when already on the last pour
    pub async fn next_pour(&self, params: &PlanRef) -> Result<EveningPlan> {
        self.mutate_plan(params.plan_id, params.expected_version, |plan, now| {
            plan.move_to(plan.now_playing_index + 1, now)
        })
        .await
    }

    /// Steps the cursor back by one pour.
    pub async fn previous_pour(&self, params: &PlanRef) -> Result<EveningPlan> {
        self.mutate_plan(params.plan_id, params.expected_version, |plan, now| {
            plan.ensure_active()?;
            let target = plan
                .now_playing_index
                .checked_sub(1)
                .ok_or(CellarError::InvalidPosition {
                    index: 0,
                    len: plan.queue.len(),
                })?;
            plan.move_to(target, now)
        })
        .await
    }

    /// Replaces the queue of an active plan.
    ///
    /// The cursor keeps its index, so the new queue must be at least that
    /// long.
    pub async fn update_plan_queue(&self, params: &UpdateQueue) -> Result<EveningPlan> {
        let plan_id = params.plan_id;
        let expected = params.expected_version;
        let queue = params.queue.clone();

        let plan = self
            .with_db(move |db| {
                let mut plan = load_plan(db, plan_id)?;
                let version = plan.check_version(expected)?;
                plan.replace_queue(queue, Timestamp::now())?;
                check_lineup_wines(db, &plan.owner, &plan.queue)?;
                db.save_plan_state(&plan, version)
            })
            .await
            .inspect_err(|e| log_rejected(plan_id, e))?;

        info!("Plan {} queue now has {} pour(s)", plan.id, plan.queue.len());
        Ok(plan)
    }

    /// Completes an active plan: records openings, takes the bottles out of
    /// stock and stores the evening's stats, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns `CellarError::InsufficientQuantity` if stock ran short; the
    /// plan stays active and nothing is written
    /// Returns `CellarError::Conflict` if the plan moved on since the caller
    /// last saw it
    pub async fn complete_plan(&self, params: &CompletePlan) -> Result<EveningPlan> {
        let plan_id = params.plan_id;
        let expected = params.expected_version;
        let outcomes = params.outcomes.clone();

        self.with_db(move |db| {
            let mut plan = load_plan(db, plan_id)?;
            let version = plan.check_version(expected)?;
            let summary = plan.resolve_outcomes(&outcomes)?;
            plan.complete(&summary, Timestamp::now())?;
            db.complete_plan(&plan, &summary, version)
        })
        .await
        .inspect_err(|e| log_rejected(plan_id, e))
    }

    /// Cancels an active plan. Stock and history are left untouched.
    pub async fn cancel_plan(&self, params: &PlanRef) -> Result<()> {
        let plan = self
            .mutate_plan(params.plan_id, params.expected_version, |plan, now| {
                plan.cancel(now)
            })
            .await?;

        info!("Cancelled plan {}", plan.id);
        Ok(())
    }

    /// Lists the owner's opening history, newest first.
    pub async fn list_openings(&self, params: &ListOpenings) -> Result<Openings> {
        validate_owner(&params.owner)?;
        let owner = params.owner.clone();
        let item_id = params.item_id;

        let openings = self
            .with_db(move |db| db.list_openings(&owner, item_id))
            .await?;
        Ok(Openings(openings))
    }

    /// Loads a plan, checks the caller's version, applies `transition` and
    /// saves the result conditioned on that version.
    async fn mutate_plan<F>(
        &self,
        plan_id: u64,
        expected: Option<u64>,
        transition: F,
    ) -> Result<EveningPlan>
    where
        F: FnOnce(&mut EveningPlan, Timestamp) -> Result<()> + Send + 'static,
    {
        self.with_db(move |db| {
            let mut plan = load_plan(db, plan_id)?;
            let version = plan.check_version(expected)?;
            transition(&mut plan, Timestamp::now())?;
            db.save_plan_state(&plan, version)
        })
        .await
        .inspect_err(|e| log_rejected(plan_id, e))
    }
}

fn load_plan(db: &Database, plan_id: u64) -> Result<EveningPlan> {
    db.get_plan(plan_id)?
        .ok_or(CellarError::PlanNotFound { id: plan_id })
}

/// Every slot must name a wine in the owner's collection.
fn check_lineup_wines(db: &Database, owner: &str, slots: &[LineupSlot]) -> Result<()> {
    for slot in slots {
        match db.get_wine(slot.item_id)? {
            Some(wine) if wine.owner == owner => {}
            _ => return Err(CellarError::WineNotFound { id: slot.item_id }),
        }
    }
    Ok(())
}

fn log_rejected(plan_id: u64, error: &CellarError) {
    if matches!(error, CellarError::Conflict { .. }) {
        warn!("Write to plan {plan_id} rejected: {error}");
    } else {
        debug!("Write to plan {plan_id} rejected: {error}");
    }
}
