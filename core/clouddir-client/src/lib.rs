//! Directory-service client for the Cloud Directory demo.
//!
//! - [`DirectoryClient`]: the async operations the workflow consumes
//! - [`AwsDirectoryClient`]: implementation on top of aws-sdk-clouddirectory
//! - [`ClientConfig`]: explicit profile/region/endpoint selection
//!
//! There is no retry or backoff at this layer; whatever the SDK applies by
//! default is all there is.

pub mod aws;
pub mod client;
pub mod config;
mod error;

pub use aws::AwsDirectoryClient;
pub use client::{CreateObjectRequest, DirectoryClient, ObjectAttributesQuery};
pub use config::ClientConfig;
pub use error::{DirectoryError, DirectoryResult};
