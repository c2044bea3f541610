//! stepcast-daemon: step-capture view model with startup capability negotiation
//!
//! The daemon provides:
//! - An observable step model (draft text plus a committed step list)
//! - Change notifications broadcast to subscribers per mutated property
//! - A startup permission gate negotiating the record-audio and
//!   modify-audio-settings capabilities, strictly in that order
//!
//! The input surface is line-oriented stdin: each complete line becomes
//! the draft text and is committed as a step. Capability negotiation runs
//! as its own task and never blocks step capture; its outcome is logged
//! and observable by joining the spawned task.

mod config;
mod events;
mod lifecycle;
mod permissions;
mod state;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::events::ChangeEvent;
use crate::permissions::{AutoGrantAuthority, PermissionGate};
use crate::state::StepModel;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "stepcast-daemon starting"
    );

    // Load configuration
    let config = Config::load()?;
    info!(?config.capabilities, "configuration loaded");

    // Channel for broadcasting change notifications to subscribers
    let (event_tx, _event_rx) = broadcast::channel::<ChangeEvent>(64);

    // Create the observable model
    let mut model = StepModel::new(event_tx.clone());

    // Start capability negotiation; step capture proceeds regardless of
    // its outcome. The handle is kept so completion stays observable.
    let mut gate = PermissionGate::new(AutoGrantAuthority, config.capabilities.clone());
    let gate_task = tokio::spawn(async move { gate.run().await });

    // Subscribe to change notifications for logging
    let mut change_rx = event_tx.subscribe();

    info!("daemon initialized, entering main loop");

    // Main event loop
    tokio::select! {
        // Drive the model from stdin lines
        result = run_input_loop(&mut model) => {
            match result {
                Ok(()) => info!("input closed"),
                Err(e) => warn!(?e, "input loop error"),
            }
        }

        // Log change notifications as subscribers would see them
        _ = async {
            loop {
                match change_rx.recv().await {
                    Ok(event) => {
                        info!(%event, "change notification");
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "change notification receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
        } => {
            info!("change notification handler exited");
        }

        // Wait for shutdown signal
        result = lifecycle::wait_for_shutdown() => {
            result?;
            info!("shutdown signal received");
        }
    }

    // Cleanup
    info!("shutting down...");

    if gate_task.is_finished() {
        // Completed gates report Some on Done and None on Failed
        if let Ok(report) = gate_task.await {
            info!(?report, "capability negotiation result");
        }
    } else {
        // No cancellation is defined for an unresolved request; drop the
        // task rather than wait on a host that may never answer.
        warn!("capability negotiation still pending at shutdown");
        gate_task.abort();
    }

    info!(steps = model.steps().len(), "stepcast-daemon stopped");

    Ok(())
}

/// Feed stdin lines into the model, committing each as a step
async fn run_input_loop(model: &mut StepModel) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        model.set_text(line);
        model.on_add();
    }

    Ok(())
}
