//! Sealbox Tenant — tenant resolution and the membership gate.
//!
//! This crate is the single chokepoint between "a slug in a URL and an
//! authenticated caller" and "an organization the caller may touch".
//! Every tenant-scoped operation (reading configuration, saving a
//! provider key, onboarding) goes through [`TenantGate`] first; there
//! is no other path to a tenant id.

pub mod error;
pub mod gate;
pub mod keys;
pub mod onboarding;
pub mod validate;

#[cfg(test)]
mod testing;

pub use error::TenantAccessError;
pub use gate::{TenantGate, assert_not_locked};
pub use keys::ProviderKeyService;
pub use onboarding::{OnboardingService, OnboardingUpdate};
pub use validate::KeyValidator;
