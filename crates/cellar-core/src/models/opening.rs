//! Opening history record.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A bottle (or several) opened during a completed evening plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Opening {
    pub id: u64,
    /// Wine that was opened
    pub item_id: u64,
    /// Plan whose completion recorded the opening
    pub plan_id: u64,
    pub quantity: u32,
    pub rating: Option<f32>,
    pub notes: Option<String>,
    /// Timestamp when the opening was recorded (UTC)
    pub opened_at: Timestamp,
}
