//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create and
//! update operations with a headline followed by the resource itself.

use std::fmt;

use crate::models::{EveningPlan, Wine};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use cellar_core::{
///     display::CreateResult,
///     models::{EveningPlan, LineupSlot},
/// };
/// use jiff::Timestamp;
///
/// let slot = LineupSlot {
///     position: 1,
///     item_id: 3,
///     name: "Chablis".to_string(),
///     label: "Main".to_string(),
///     locked: false,
/// };
/// let mut plan = EveningPlan::new("alice", vec![slot], Timestamp::now()).unwrap();
/// plan.id = 1;
///
/// let result = CreateResult::new(plan);
/// assert!(result.to_string().contains("Started evening plan with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<EveningPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Started evening plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Wine> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added wine with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// The wrapper can list the specific changes made, giving clear feedback
/// about what moved.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<EveningPlan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated plan with ID: {}", self.resource.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{LineupSlot, Readiness, WineColor};

    #[test]
    fn test_update_result_lists_changes() {
        let slot = LineupSlot {
            position: 1,
            item_id: 3,
            name: "Chablis".to_string(),
            label: "Main".to_string(),
            locked: false,
        };
        let plan = EveningPlan::new("alice", vec![slot], Timestamp::UNIX_EPOCH).unwrap();

        let result = UpdateResult::with_changes(plan.clone(), vec!["Now pouring #1".to_string()]);
        let output = result.to_string();
        assert!(output.contains("Changes made:\n- Now pouring #1"));
        assert!(output.contains("# Evening plan"));

        let plain = UpdateResult::new(plan).to_string();
        assert!(!plain.contains("Changes made"));
    }

    #[test]
    fn test_create_result_for_wine() {
        let wine = Wine {
            id: 12,
            owner: "alice".to_string(),
            name: "Sancerre".to_string(),
            color: WineColor::White,
            vintage: None,
            region: None,
            style: None,
            abv: None,
            quantity: 1,
            readiness: Readiness::Ready,
            rating: Some(4.0),
            profile: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        let output = CreateResult::new(wine).to_string();
        assert!(output.starts_with("Added wine with ID: 12"));
        assert!(output.contains("## Sancerre NV (ID: 12)"));
        assert!(output.contains("- **Rating**: 4.0/5"));
    }
}
