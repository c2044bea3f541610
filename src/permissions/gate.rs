//! Startup permission gate
//!
//! Drives the two-step capability negotiation: record-audio first, then
//! modify-audio-settings only once the first request has settled. The
//! platform forbids issuing the second request before the first resolves,
//! so the steps are strictly sequential.

use tracing::{error, info};

use crate::config::{Capability, CapabilityMap};

use super::authority::PermissionAuthority;

/// The phases of the capability negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Negotiation has not started
    Idle,
    /// Waiting on the record-audio request
    RequestingRecord,
    /// Waiting on the modify-audio-settings request
    RequestingSettings,
    /// Both requests settled; outcomes recorded
    Done,
    /// A request failed at the mechanism level; no retry
    Failed,
}

impl Default for GateState {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateState::Idle => write!(f, "Idle"),
            GateState::RequestingRecord => write!(f, "RequestingRecord"),
            GateState::RequestingSettings => write!(f, "RequestingSettings"),
            GateState::Done => write!(f, "Done"),
            GateState::Failed => write!(f, "Failed"),
        }
    }
}

/// Granted/denied outcome of a completed negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionReport {
    /// Whether record-audio was granted
    pub record_audio: bool,
    /// Whether modify-audio-settings was granted
    pub modify_audio_settings: bool,
}

/// The gate that negotiates capabilities through a permission authority
pub struct PermissionGate<A> {
    authority: A,
    capabilities: CapabilityMap,
    state: GateState,
}

impl<A: PermissionAuthority> PermissionGate<A> {
    /// Create an idle gate for the given authority and identifier mapping
    pub fn new(authority: A, capabilities: CapabilityMap) -> Self {
        Self {
            authority,
            capabilities,
            state: GateState::Idle,
        }
    }

    /// Get the current negotiation phase
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Run the negotiation to a terminal state
    ///
    /// Returns `Some(report)` on `Done` and `None` on `Failed`. Mechanism
    /// faults are logged and absorbed here; they never propagate. A denial
    /// is an ordinary outcome, not a fault.
    pub async fn run(&mut self) -> Option<PermissionReport> {
        self.transition_to(GateState::RequestingRecord);
        let record_audio = match self.request(Capability::RecordAudio).await {
            Some(granted) => granted,
            None => return None,
        };

        self.transition_to(GateState::RequestingSettings);
        let modify_audio_settings = match self.request(Capability::ModifyAudioSettings).await {
            Some(granted) => granted,
            None => return None,
        };

        self.transition_to(GateState::Done);
        info!(
            record_audio,
            modify_audio_settings, "capability negotiation complete"
        );

        Some(PermissionReport {
            record_audio,
            modify_audio_settings,
        })
    }

    /// Issue one capability request, absorbing mechanism faults
    async fn request(&mut self, capability: Capability) -> Option<bool> {
        let identifier = self.capabilities.identifier(capability);
        let outcome = self.authority.request(identifier).await;
        match outcome {
            Ok(granted) => {
                info!(capability = %capability, granted, "capability request settled");
                Some(granted)
            }
            Err(e) => {
                error!(capability = %capability, error = %e, "capability request failed");
                self.transition_to(GateState::Failed);
                None
            }
        }
    }

    fn transition_to(&mut self, new_state: GateState) {
        info!(from = %self.state, to = %new_state, "gate transition");
        self.state = new_state;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::super::authority::AuthorityError;
    use super::*;

    /// Authority that replays a scripted sequence of outcomes and records
    /// the identifiers it was asked for
    struct ScriptedAuthority {
        outcomes: Mutex<Vec<Result<bool, AuthorityError>>>,
        requested: Mutex<Vec<String>>,
    }

    impl ScriptedAuthority {
        fn new(outcomes: Vec<Result<bool, AuthorityError>>) -> Self {
            let mut outcomes = outcomes;
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl PermissionAuthority for ScriptedAuthority {
        async fn request(&self, identifier: &str) -> Result<bool, AuthorityError> {
            self.requested.lock().unwrap().push(identifier.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .expect("unexpected extra request")
        }
    }

    fn create_gate(
        outcomes: Vec<Result<bool, AuthorityError>>,
    ) -> PermissionGate<ScriptedAuthority> {
        PermissionGate::new(ScriptedAuthority::new(outcomes), CapabilityMap::default())
    }

    #[test]
    fn test_initial_state() {
        let gate = create_gate(vec![]);
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[tokio::test]
    async fn test_both_granted_reaches_done() {
        let mut gate = create_gate(vec![Ok(true), Ok(true)]);

        let report = gate.run().await.unwrap();
        assert_eq!(gate.state(), GateState::Done);
        assert!(report.record_audio);
        assert!(report.modify_audio_settings);
    }

    #[tokio::test]
    async fn test_denial_is_not_failure() {
        let mut gate = create_gate(vec![Ok(true), Ok(false)]);

        let report = gate.run().await.unwrap();
        assert_eq!(gate.state(), GateState::Done);
        assert!(report.record_audio);
        assert!(!report.modify_audio_settings);
    }

    #[tokio::test]
    async fn test_record_fault_skips_settings_request() {
        let mut gate = create_gate(vec![Err(AuthorityError::BrokerUnavailable(
            "binder died".to_string(),
        ))]);

        assert!(gate.run().await.is_none());
        assert_eq!(gate.state(), GateState::Failed);

        let requested = gate.authority.requested.lock().unwrap();
        assert_eq!(*requested, ["android.permission.RECORD_AUDIO"]);
    }

    #[tokio::test]
    async fn test_settings_fault_is_terminal() {
        let mut gate = create_gate(vec![
            Ok(true),
            Err(AuthorityError::UnknownIdentifier(
                "android.permission.MODIFY_AUDIO_SETTINGS".to_string(),
            )),
        ]);

        assert!(gate.run().await.is_none());
        assert_eq!(gate.state(), GateState::Failed);
    }

    #[tokio::test]
    async fn test_requests_are_sequential_record_first() {
        let mut gate = create_gate(vec![Ok(false), Ok(true)]);

        gate.run().await.unwrap();

        let requested = gate.authority.requested.lock().unwrap();
        assert_eq!(
            *requested,
            [
                "android.permission.RECORD_AUDIO",
                "android.permission.MODIFY_AUDIO_SETTINGS",
            ]
        );
    }
}
