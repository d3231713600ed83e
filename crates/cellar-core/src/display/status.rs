//! Confirmation messages for operations that return nothing to show.

use std::fmt;

/// One-line confirmation, such as for cancelling a plan.
pub struct OperationStatus {
    pub message: String,
}

impl OperationStatus {
    pub fn success(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Success: {}", self.message)
    }
}
