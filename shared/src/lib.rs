//! Shared types and models for Maghrib Companion
//!
//! This crate contains the domain types and pure calculations used by the
//! backend service and by any client consuming its API.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
