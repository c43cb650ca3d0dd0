//! Tenant access error types.
//!
//! The three rejection kinds are deliberately distinct: callers map
//! `NotFound` to "no such resource", `Forbidden` to "exists but not
//! yours", and `Locked` to a specific "read-only demo" message.
//! Collapsing them would leak existence information inconsistently.

use sealbox_core::error::SealboxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TenantAccessError {
    /// No organization with the requested slug exists.
    #[error("organization with slug '{slug}' not found")]
    NotFound { slug: String },

    /// The organization exists but the caller holds no membership.
    #[error("user is not a member of organization '{slug}'")]
    Forbidden { slug: String },

    /// Mutation attempted against the reserved demo organization.
    #[error("the demo workspace is read-only")]
    Locked,

    /// Store and crypto failures, propagated unmodified for the
    /// top-level handler to translate.
    #[error(transparent)]
    Other(#[from] SealboxError),
}
