//! Observable application state
//!
//! Holds the draft text and the committed step list, and notifies
//! broadcast subscribers when either property changes.

mod model;

pub use model::StepModel;
