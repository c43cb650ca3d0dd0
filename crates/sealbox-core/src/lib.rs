//! Sealbox Core — shared domain models, repository traits, and errors.
//!
//! Every other crate in the workspace depends on this one and nothing
//! else in the workspace, so the types here define the seams: storage
//! implementations satisfy the repository traits, and services consume
//! them without knowing the concrete store.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{SealboxError, SealboxResult};
