//! Evening plan persistence and opening history.
//!
//! Every plan write is conditional on the version the caller loaded; a write
//! that matches no row is reported as a conflict (or a missing plan), never
//! silently dropped.

use jiff::Timestamp;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql, TransactionBehavior};

use super::utils::{
    id_column, json_column, optional_timestamp_column, parsed_column, timestamp_column,
};
use crate::{
    error::{CellarError, Result, StoreResultExt},
    models::{CompletionSummary, EveningPlan, Opening, PlanFilter, PlanStatus, ResolvedOpening},
};

const PLAN_COLUMNS: &str = "id, owner, status, queue, now_playing_index, version, created_at, updated_at, completed_at, bottles_opened, average_rating";
const CANCEL_ACTIVE_PLANS_SQL: &str = "UPDATE evening_plans SET status = 'cancelled', version = version + 1, updated_at = ?1 WHERE owner = ?2 AND status = 'active'";
const INSERT_PLAN_SQL: &str = "INSERT INTO evening_plans (owner, status, queue, now_playing_index, version, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_PLAN_STATE_SQL: &str = "UPDATE evening_plans SET status = ?1, queue = ?2, now_playing_index = ?3, version = version + 1, updated_at = ?4, completed_at = ?5, bottles_opened = ?6, average_rating = ?7 WHERE id = ?8 AND version = ?9";
const SELECT_PLAN_VERSION_SQL: &str = "SELECT version FROM evening_plans WHERE id = ?1";
const INSERT_OPENING_SQL: &str = "INSERT INTO openings (item_id, plan_id, quantity, rating, notes, opened_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const DECREMENT_QUANTITY_SQL: &str = "UPDATE wines SET quantity = quantity - ?1, updated_at = ?2 WHERE id = ?3 AND quantity >= ?1";
const SELECT_QUANTITY_SQL: &str = "SELECT quantity FROM wines WHERE id = ?1";

impl super::Database {
    /// Helper function to construct an EveningPlan from a database row
    fn build_plan_from_row(row: &Row) -> rusqlite::Result<EveningPlan> {
        Ok(EveningPlan {
            id: id_column(row, 0)?,
            owner: row.get(1)?,
            status: parsed_column(row, 2)?,
            queue: json_column(row, 3)?,
            now_playing_index: row.get::<_, i64>(4)? as usize,
            version: row.get::<_, i64>(5)? as u64,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
            completed_at: optional_timestamp_column(row, 8)?,
            bottles_opened: row.get(9)?,
            average_rating: row.get(10)?,
        })
    }

    fn build_opening_from_row(row: &Row) -> rusqlite::Result<Opening> {
        Ok(Opening {
            id: id_column(row, 0)?,
            item_id: id_column(row, 1)?,
            plan_id: id_column(row, 2)?,
            quantity: row.get(3)?,
            rating: row.get::<_, Option<f64>>(4)?.map(|r| r as f32),
            notes: row.get(5)?,
            opened_at: timestamp_column(row, 6)?,
        })
    }

    /// Persists a new active plan, cancelling the owner's previous one.
    ///
    /// The cancel and the insert share one IMMEDIATE transaction, so two
    /// racing creations for the same owner serialize and the later one wins.
    pub fn create_plan(&mut self, plan: &EveningPlan) -> Result<EveningPlan> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .store_context("Failed to begin transaction")?;

        let now_str = plan.created_at.to_string();
        let queue = serde_json::to_string(&plan.queue)?;

        let cancelled = tx
            .execute(CANCEL_ACTIVE_PLANS_SQL, params![&now_str, plan.owner])
            .store_context("Failed to cancel previous active plan")?;

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                plan.owner,
                PlanStatus::Active.as_str(),
                queue,
                plan.now_playing_index as i64,
                plan.version as i64,
                &now_str,
                &now_str,
            ],
        )
        .store_context("Failed to insert evening plan")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().store_context("Failed to commit transaction")?;

        if cancelled > 0 {
            info!("Cancelled previous active plan for {} in favor of plan {id}", plan.owner);
        }

        Ok(EveningPlan {
            id,
            ..plan.clone()
        })
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, id: u64) -> Result<Option<EveningPlan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM evening_plans WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], Self::build_plan_from_row)
            .optional()
            .store_context("Failed to query evening plan")
    }

    /// Retrieves the owner's active plan, if any.
    pub fn load_active_plan(&self, owner: &str) -> Result<Option<EveningPlan>> {
        let sql = format!(
            "SELECT {PLAN_COLUMNS} FROM evening_plans WHERE owner = ?1 AND status = 'active'"
        );
        self.connection
            .query_row(&sql, params![owner], Self::build_plan_from_row)
            .optional()
            .store_context("Failed to query active plan")
    }

    /// Lists an owner's plans, newest first.
    pub fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<EveningPlan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM evening_plans WHERE owner = ?");
        let mut params_vec: Vec<Box<dyn ToSql>> = vec![Box::new(filter.owner.clone())];

        if let Some(status) = filter.status {
            query.push_str(" AND status = ?");
            params_vec.push(Box::new(status.as_str()));
        }
        query.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .store_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let plans = stmt
            .query_map(&params_refs[..], Self::build_plan_from_row)
            .store_context("Failed to query evening plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .store_context("Failed to read evening plan rows")?;

        Ok(plans)
    }

    /// Writes the plan's status, queue, cursor and stats if the stored
    /// version still equals `expected_version`.
    ///
    /// Returns the plan as stored, with its bumped version.
    ///
    /// # Errors
    ///
    /// Returns `CellarError::Conflict` if another write got there first
    /// Returns `CellarError::PlanNotFound` if the plan does not exist
    pub fn save_plan_state(
        &mut self,
        plan: &EveningPlan,
        expected_version: u64,
    ) -> Result<EveningPlan> {
        write_plan_state(&self.connection, plan, expected_version)?;
        Ok(EveningPlan {
            version: expected_version + 1,
            ..plan.clone()
        })
    }

    /// Applies a completed plan in one transaction.
    ///
    /// In order: history rows, stock decrements, then the version-checked
    /// status flip carrying the aggregate stats. Any failure rolls back every
    /// write, leaving stock, history and the plan exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns `CellarError::InsufficientQuantity` if a wine has fewer bottles
    /// than the outcome opens
    /// Returns `CellarError::Conflict` if the plan changed since it was loaded
    pub fn complete_plan(
        &mut self,
        plan: &EveningPlan,
        summary: &CompletionSummary,
        expected_version: u64,
    ) -> Result<EveningPlan> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .store_context("Failed to begin transaction")?;

        let applied = apply_completion(&tx, plan, summary, expected_version);
        if let Err(e) = applied {
            warn!("Rolling back completion of plan {}: {e}", plan.id);
            // Dropping the transaction rolls it back
            return Err(e);
        }

        tx.commit().store_context("Failed to commit transaction")?;

        info!(
            "Completed plan {}: {} bottle(s) opened",
            plan.id, summary.bottles_opened
        );

        Ok(EveningPlan {
            version: expected_version + 1,
            ..plan.clone()
        })
    }

    /// Lists an owner's opening history, newest first.
    pub fn list_openings(&self, owner: &str, item_id: Option<u64>) -> Result<Vec<Opening>> {
        let mut query = String::from(
            "SELECT o.id, o.item_id, o.plan_id, o.quantity, o.rating, o.notes, o.opened_at \
             FROM openings o JOIN wines w ON w.id = o.item_id WHERE w.owner = ?",
        );
        let mut params_vec: Vec<Box<dyn ToSql>> = vec![Box::new(owner.to_string())];

        if let Some(item_id) = item_id {
            query.push_str(" AND o.item_id = ?");
            params_vec.push(Box::new(item_id as i64));
        }
        query.push_str(" ORDER BY o.opened_at DESC, o.id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .store_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let openings = stmt
            .query_map(&params_refs[..], Self::build_opening_from_row)
            .store_context("Failed to query openings")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .store_context("Failed to read opening rows")?;

        Ok(openings)
    }
}

fn apply_completion(
    conn: &Connection,
    plan: &EveningPlan,
    summary: &CompletionSummary,
    expected_version: u64,
) -> Result<()> {
    let now = plan.completed_at.unwrap_or(plan.updated_at);

    for opening in &summary.openings {
        record_opening(conn, plan.id, opening, now)?;
    }
    for opening in &summary.openings {
        decrement_quantity(conn, opening.item_id, opening.quantity, now)?;
    }
    write_plan_state(conn, plan, expected_version)
}

fn record_opening(
    conn: &Connection,
    plan_id: u64,
    opening: &ResolvedOpening,
    opened_at: Timestamp,
) -> Result<()> {
    conn.execute(
        INSERT_OPENING_SQL,
        params![
            opening.item_id as i64,
            plan_id as i64,
            opening.quantity,
            opening.rating.map(f64::from),
            opening.notes,
            opened_at.to_string(),
        ],
    )
    .store_context("Failed to record opening")?;
    Ok(())
}

/// Takes `amount` bottles of a wine, failing rather than going negative.
fn decrement_quantity(conn: &Connection, item_id: u64, amount: u32, now: Timestamp) -> Result<()> {
    let updated = conn
        .execute(
            DECREMENT_QUANTITY_SQL,
            params![amount, now.to_string(), item_id as i64],
        )
        .store_context("Failed to decrement quantity")?;
    if updated > 0 {
        return Ok(());
    }

    let available: Option<u32> = conn
        .query_row(SELECT_QUANTITY_SQL, params![item_id as i64], |row| row.get(0))
        .optional()
        .store_context("Failed to read quantity")?;
    match available {
        Some(available) => Err(CellarError::InsufficientQuantity {
            item_id,
            requested: amount,
            available,
        }),
        None => Err(CellarError::WineNotFound { id: item_id }),
    }
}

fn write_plan_state(conn: &Connection, plan: &EveningPlan, expected_version: u64) -> Result<()> {
    let queue = serde_json::to_string(&plan.queue)?;
    let updated = conn
        .execute(
            UPDATE_PLAN_STATE_SQL,
            params![
                plan.status.as_str(),
                queue,
                plan.now_playing_index as i64,
                plan.updated_at.to_string(),
                plan.completed_at.map(|t| t.to_string()),
                plan.bottles_opened,
                plan.average_rating,
                plan.id as i64,
                expected_version as i64,
            ],
        )
        .store_context("Failed to update evening plan")?;
    if updated > 0 {
        return Ok(());
    }

    let actual: Option<i64> = conn
        .query_row(SELECT_PLAN_VERSION_SQL, params![plan.id as i64], |row| {
            row.get(0)
        })
        .optional()
        .store_context("Failed to read plan version")?;
    match actual {
        Some(actual) => {
            warn!(
                "Version conflict on plan {}: expected {expected_version}, found {actual}",
                plan.id
            );
            Err(CellarError::Conflict {
                plan_id: plan.id,
                expected: expected_version,
                actual: actual as u64,
            })
        }
        None => Err(CellarError::PlanNotFound { id: plan.id }),
    }
}
