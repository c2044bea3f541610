//! The step model: draft text plus an append-only step list
//!
//! Mutations happen on ordinary synchronous call paths; every observable
//! change emits exactly one `ChangeEvent` on the broadcast channel.

use tokio::sync::broadcast;
use tracing::debug;

use crate::events::ChangeEvent;

/// Observable view model holding the draft text and committed steps
pub struct StepModel {
    /// Current draft input, cleared after each successful commit
    text: String,
    /// Committed entries, insertion order significant
    steps: Vec<String>,
    /// Channel for emitting change notifications
    event_tx: broadcast::Sender<ChangeEvent>,
}

impl StepModel {
    /// Create an empty model emitting on the given channel
    pub fn new(event_tx: broadcast::Sender<ChangeEvent>) -> Self {
        Self {
            text: String::new(),
            steps: Vec::new(),
            event_tx,
        }
    }

    /// Current draft text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Read-only view of the committed steps
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Set the draft text, notifying subscribers only on an actual change
    ///
    /// Equality is exact string comparison; setting the same value twice
    /// emits a single notification.
    pub fn set_text(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.text == value {
            return;
        }

        self.text = value;
        self.emit(ChangeEvent::Text {
            value: self.text.clone(),
        });
    }

    /// Commit the trimmed draft text as a new step
    ///
    /// Whitespace-only drafts are rejected without mutation or
    /// notification, so `steps` never holds an empty entry. A successful
    /// commit clears the draft (emitting the text notification) and then
    /// emits the steps notification with the updated sequence.
    pub fn on_add(&mut self) {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            debug!("ignoring empty draft");
            return;
        }

        self.steps.push(trimmed.to_string());
        self.set_text("");
        self.emit(ChangeEvent::Steps {
            values: self.steps.clone(),
        });
    }

    fn emit(&self, event: ChangeEvent) {
        debug!(%event, "emitting change notification");
        // Send only fails when no subscriber is listening
        let _ = self.event_tx.send(event);
    }
}
