//! Change-notification vocabulary for the step model
//!
//! Subscribers receive one event per observable property mutation,
//! tagged by property name and carrying the new value.

use serde::{Deserialize, Serialize};

/// Notifications emitted when an observable property changes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "property", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// The draft text changed
    Text {
        /// New draft text value
        value: String,
    },

    /// The step list grew by one committed entry
    Steps {
        /// Full updated step sequence
        values: Vec<String>,
    },
}

impl std::fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeEvent::Text { value } => write!(f, "TEXT_CHANGED ({:?})", value),
            ChangeEvent::Steps { values } => {
                write!(f, "STEPS_CHANGED ({} entries)", values.len())
            }
        }
    }
}
