//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper owns its items and renders a friendly line when empty, so
//! callers never special-case an empty result.

use std::{fmt, ops::Index};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::datetime::LocalDateTime;
use crate::models::{EveningPlan, LineupSlot, Opening, Wine};

/// Shared read-only accessors for the collection newtypes.
macro_rules! collection_accessors {
    ($wrapper:ident, $item:ty) => {
        impl $wrapper {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

/// An ordered serving lineup.
///
/// An empty lineup is a normal outcome (nothing in the cellar qualified),
/// not an error.
///
/// # Examples
///
/// ```rust
/// use cellar_core::{display::Lineup, models::LineupSlot};
///
/// let lineup = Lineup(vec![LineupSlot {
///     position: 1,
///     item_id: 7,
///     name: "Riesling Kabinett".to_string(),
///     label: "Main".to_string(),
///     locked: false,
/// }]);
/// assert!(lineup.to_string().contains("Riesling Kabinett"));
///
/// assert_eq!(Lineup(vec![]).to_string(), "Nothing qualifies yet.\n");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct Lineup(pub Vec<LineupSlot>);

collection_accessors!(Lineup, LineupSlot);

impl Lineup {
    /// The slots, ready to seed an evening plan.
    pub fn into_slots(self) -> Vec<LineupSlot> {
        self.0
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Nothing qualifies yet.");
        }
        for slot in &self.0 {
            writeln!(f, "{slot}")?;
        }
        Ok(())
    }
}

/// Wines in the collection.
pub struct Wines(pub Vec<Wine>);

collection_accessors!(Wines, Wine);

impl fmt::Display for Wines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No wines found.");
        }
        for wine in &self.0 {
            write!(f, "{wine}")?;
        }
        Ok(())
    }
}

/// Evening plans, rendered one line each.
pub struct Plans(pub Vec<EveningPlan>);

collection_accessors!(Plans, EveningPlan);

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            writeln!(
                f,
                "- **Plan {}** ({}): {} pours, created {}",
                plan.id,
                plan.status.with_icon(),
                plan.queue.len(),
                LocalDateTime(&plan.created_at)
            )?;
        }
        Ok(())
    }
}

/// Opening history.
pub struct Openings(pub Vec<Opening>);

collection_accessors!(Openings, Opening);

impl fmt::Display for Openings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No openings recorded.");
        }
        for opening in &self.0 {
            write!(f, "{opening}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{PlanStatus, Readiness, WineColor};

    fn slot(position: u32, label: &str) -> LineupSlot {
        LineupSlot {
            position,
            item_id: u64::from(position) * 10,
            name: format!("Wine {position}"),
            label: label.to_string(),
            locked: false,
        }
    }

    fn ts() -> Timestamp {
        Timestamp::from_second(1640995200).unwrap() // 2022-01-01 00:00:00 UTC
    }

    #[test]
    fn test_lineup_display() {
        let lineup = Lineup(vec![slot(1, "Warm-up"), slot(2, "Finale")]);
        let output = lineup.to_string();
        assert!(output.contains("1. **Warm-up**: Wine 1"));
        assert!(output.contains("2. **Finale**: Wine 2"));
        assert_eq!(lineup.len(), 2);
        assert_eq!(lineup[1].item_id, 20);
    }

    #[test]
    fn test_lineup_serializes_as_plain_array() {
        let lineup = Lineup(vec![slot(1, "Main")]);
        let json = serde_json::to_string(&lineup).unwrap();
        assert!(json.starts_with("[{\"position\":1"));
        let back: Lineup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lineup);
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(Lineup::default().to_string(), "Nothing qualifies yet.\n");
        assert_eq!(Wines(vec![]).to_string(), "No wines found.\n");
        assert_eq!(Plans(vec![]).to_string(), "No plans found.\n");
        assert_eq!(Openings(vec![]).to_string(), "No openings recorded.\n");
    }

    #[test]
    fn test_wines_display() {
        let wine = Wine {
            id: 3,
            owner: "alice".to_string(),
            name: "Barolo Riserva".to_string(),
            color: WineColor::Red,
            vintage: Some(2016),
            region: Some("Piedmont".to_string()),
            style: None,
            abv: Some(14.5),
            quantity: 2,
            readiness: Readiness::PeakSoon,
            rating: None,
            profile: None,
            created_at: ts(),
            updated_at: ts(),
        };
        let output = Wines(vec![wine]).to_string();
        assert!(output.contains("## Barolo Riserva 2016 (ID: 3)"));
        assert!(output.contains("PEAK_SOON"));
    }

    #[test]
    fn test_plans_display() {
        let mut plan = EveningPlan::new("alice", vec![slot(1, "Main")], ts()).unwrap();
        plan.id = 4;
        plan.status = PlanStatus::Cancelled;
        let output = Plans(vec![plan]).to_string();
        assert!(output.contains("**Plan 4** (✗ Cancelled): 1 pours"));
    }
}
