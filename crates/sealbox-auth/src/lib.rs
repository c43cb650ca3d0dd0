//! Sealbox Auth — password hashing and signup/signin orchestration.
//!
//! Signup provisions the full tenant triple (user, organization, OWNER
//! membership) in one flow. Session issuance is the host application's
//! concern; this crate only establishes and verifies identity.

pub mod config;
pub mod error;
pub mod password;
pub mod signup;

pub use config::AuthConfig;
pub use error::AuthError;
pub use signup::{SignupInput, SignupOutput, SignupService};
