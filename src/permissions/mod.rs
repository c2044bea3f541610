//! Audio capability negotiation
//!
//! Requests the record-audio and modify-audio-settings capabilities from
//! the host platform, strictly in that order, through an injected
//! permission authority.

mod authority;
mod gate;

pub use authority::{AuthorityError, AutoGrantAuthority, PermissionAuthority};
pub use gate::{GateState, PermissionGate, PermissionReport};
