//! Types library for the rolling sentiment consumer
//!
//! Shared definitions used by the ingestion and aggregation layers.
//!
//! # Modules
//! - `ids`: Author identifiers
//! - `message`: Wire-level post records and validated observations
//! - `errors`: Error taxonomy

pub mod ids;
pub mod message;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::message::*;
    pub use crate::errors::*;
}
