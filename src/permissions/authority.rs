//! Permission authority boundary
//!
//! The host platform's permission broker sits behind this trait; the gate
//! only ever sees a granted/denied outcome or a mechanism-level fault.

use std::future::Future;

use thiserror::Error;
use tracing::debug;

/// Mechanism-level faults from the host permission broker
///
/// A simple denial is not an error; these represent the request machinery
/// itself failing.
#[derive(Debug, Clone, Error)]
pub enum AuthorityError {
    /// The platform permission broker could not be reached
    #[error("permission broker unavailable: {0}")]
    BrokerUnavailable(String),

    /// The platform rejected the identifier as unknown
    #[error("unknown capability identifier: {0}")]
    UnknownIdentifier(String),
}

/// Host-platform permission broker interface
///
/// Implementations resolve an opaque platform identifier to a
/// granted/denied outcome, possibly after prompting the user.
pub trait PermissionAuthority: Send + Sync + 'static {
    /// Request the capability named by the platform identifier
    fn request(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<bool, AuthorityError>> + Send;
}

/// Authority for hosts without a permission broker: grants every request
pub struct AutoGrantAuthority;

impl PermissionAuthority for AutoGrantAuthority {
    async fn request(&self, identifier: &str) -> Result<bool, AuthorityError> {
        debug!(identifier, "no permission broker on this host, auto-granting");
        Ok(true)
    }
}
