//! Lineup slot model and serving labels.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CellarError, Result};

/// One pour in a lineup.
///
/// Slots serialize as plain records, in queue order, so a persisted queue
/// reloads field-for-field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct LineupSlot {
    /// 1-based serving position
    pub position: u32,
    /// ID of the wine poured in this slot
    pub item_id: u64,
    /// Wine name at the time the lineup was composed
    pub name: String,
    /// Serving label derived from the position
    pub label: String,
    /// Pinned by the user; never moved automatically
    #[serde(default)]
    pub locked: bool,
}

/// Label for a slot at `position` (1-based) in a lineup of `total` slots.
///
/// A single pour is the main event. Otherwise the first pour warms up, the
/// last one closes, and the pour just before the close is the main.
pub fn serving_label(position: usize, total: usize) -> &'static str {
    if total <= 1 {
        "Main"
    } else if position <= 1 {
        "Warm-up"
    } else if position >= total {
        if total >= 4 {
            "Grand Finale"
        } else {
            "Finale"
        }
    } else if position + 1 == total {
        "Main"
    } else {
        "Mid"
    }
}

/// Renumbers slots 1..n in their current order and relabels them.
pub fn relabel(slots: &mut [LineupSlot]) {
    let total = slots.len();
    for (index, slot) in slots.iter_mut().enumerate() {
        slot.position = (index + 1) as u32;
        slot.label = serving_label(index + 1, total).to_string();
    }
}

/// Checks that positions run 1..n with no gaps, in order.
pub fn validate_positions(slots: &[LineupSlot]) -> Result<()> {
    for (index, slot) in slots.iter().enumerate() {
        if slot.position as usize != index + 1 {
            return Err(CellarError::InvalidPosition {
                index: slot.position as usize,
                len: slots.len(),
            });
        }
    }
    Ok(())
}
