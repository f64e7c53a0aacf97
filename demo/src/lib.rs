//! Cloud Directory demo workflow.
//!
//! Exercises a managed directory service end to end:
//!
//! 1. **Discover**: first ENABLED directory, its details, the published
//!    schema and its facets, the schema applied to the directory
//! 2. **Build**: create `/US`, `/US/CA` and `/US/CA/SF` in dependency order
//! 3. **Sample**: read the leaf's metadata and attributes repeatedly, printing
//!    the round-trip time of each iteration
//! 4. **Close**: release the client on every exit path
//!
//! # Example
//!
//! ```no_run
//! use clouddir_client::{AwsDirectoryClient, ClientConfig};
//! use clouddir_demo::{DemoSettings, DirectoryDemoRunner};
//!
//! # async fn demo() -> clouddir_client::DirectoryResult<()> {
//! let config = ClientConfig::load(ClientConfig {
//!     region: Some("us-east-1".into()),
//!     ..Default::default()
//! })?;
//! let client = AwsDirectoryClient::connect(&config).await?;
//! let runner = DirectoryDemoRunner::new(client, DemoSettings::default());
//! let report = runner.run(&mut std::io::stdout()).await?;
//! println!("created {} objects", report.created.len());
//! # Ok(())
//! # }
//! ```

pub mod hierarchy;
mod runner;

pub use runner::{
    DEFAULT_ITERATIONS, DemoSettings, DirectoryDemoRunner, Discovery, RunReport, RunnerState,
};
