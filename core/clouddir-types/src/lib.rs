//! Core type definitions for the Cloud Directory demo runner.
//!
//! This crate defines the plain data exchanged between the workflow and the
//! directory-service client:
//! - Resource identifiers (directory handles, schema ARNs, object paths)
//! - Schema facet references and typed attributes
//! - Directory and object descriptions returned by the service
//! - Latency samples and their summary
//!
//! None of these types talk to the network; the service owns all state.

mod directory;
mod ids;
mod latency;
mod schema;

pub use directory::{ConsistencyLevel, DirectoryState, DirectorySummary, ObjectInfo};
pub use ids::{DirectoryHandle, ObjectIdentifier, ObjectPath, SchemaArn};
pub use latency::{LatencySample, LatencySummary};
pub use schema::{AttributeKV, AttributeKey, AttributeValue, SchemaReference};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing wire values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown directory state: {0}")]
    InvalidState(String),

    #[error("unknown consistency level: {0}")]
    InvalidConsistency(String),
}
