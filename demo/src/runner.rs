//! The demo workflow: discover, build the hierarchy, sample read latency,
//! close.
//!
//! Every remote call is awaited before the next one is issued. A failure at
//! any step skips the remaining steps; the client is still released exactly
//! once on the way out of [`DirectoryDemoRunner::run`].

use crate::hierarchy::{self, DEFAULT_LEAF_PATH, DIRECTORY_FACET};
use clouddir_client::{DirectoryClient, DirectoryError, DirectoryResult};
use clouddir_types::{
    AttributeValue, ConsistencyLevel, DirectoryState, DirectorySummary, LatencySample,
    LatencySummary, ObjectPath, SchemaArn,
};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Number of latency iterations in a default run.
pub const DEFAULT_ITERATIONS: usize = 10;

/// Where the runner is in its forward-only workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Connected,
    Discovered,
    HierarchyBuilt,
    Sampling,
    Closed,
}

impl fmt::Display for RunnerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunnerState::Connected => "connected",
            RunnerState::Discovered => "discovered",
            RunnerState::HierarchyBuilt => "hierarchy built",
            RunnerState::Sampling => "sampling",
            RunnerState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Tunables for one run.
#[derive(Debug, Clone)]
pub struct DemoSettings {
    /// Latency iterations performed by [`DirectoryDemoRunner::run`].
    pub iterations: usize,
    /// Object read on every iteration.
    pub leaf_path: ObjectPath,
    pub consistency: ConsistencyLevel,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            leaf_path: ObjectPath::new(DEFAULT_LEAF_PATH),
            consistency: ConsistencyLevel::Eventual,
        }
    }
}

/// What discovery resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub directory: DirectorySummary,
    pub published_schema: SchemaArn,
    pub facet_names: Vec<String>,
    /// Attributes of the `Directory` facet of the published schema.
    pub facet_attributes: Vec<String>,
    /// Schema every created object is bound to.
    pub applied_schema: SchemaArn,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub directory: DirectorySummary,
    pub applied_schema: SchemaArn,
    pub created: Vec<ObjectPath>,
    pub samples: Vec<LatencySample>,
    pub summary: Option<LatencySummary>,
}

impl RunReport {
    /// Writes the report as a single pretty-printed JSON document.
    pub fn write_json<W: Write>(&self, out: &mut W) -> DirectoryResult<()> {
        serde_json::to_writer_pretty(&mut *out, self).map_err(std::io::Error::from)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

/// Drives the demo workflow against one connected client.
pub struct DirectoryDemoRunner<C> {
    client: C,
    settings: DemoSettings,
    state: RunnerState,
    discovery: Option<Discovery>,
    created: Vec<ObjectPath>,
}

impl<C: DirectoryClient> DirectoryDemoRunner<C> {
    /// Takes ownership of an already connected client.
    pub fn new(client: C, settings: DemoSettings) -> Self {
        Self {
            client,
            settings,
            state: RunnerState::Connected,
            discovery: None,
            created: Vec::new(),
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn discovery(&self) -> Option<&Discovery> {
        self.discovery.as_ref()
    }

    pub fn settings(&self) -> &DemoSettings {
        &self.settings
    }

    /// Runs the whole workflow and always releases the client.
    ///
    /// Latency lines are written to `out` as they are measured, so whatever
    /// was printed before a failure stays printed.
    pub async fn run<W: Write>(mut self, out: &mut W) -> DirectoryResult<RunReport> {
        let outcome = self.run_steps(out).await;
        let closed = self.close().await;
        match (outcome, closed) {
            (Ok(report), Ok(())) => Ok(report),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!("Failed to close client after workflow error: {}", close_err);
                Err(e)
            }
        }
    }

    async fn run_steps<W: Write>(&mut self, out: &mut W) -> DirectoryResult<RunReport> {
        self.discover().await?;
        self.build_hierarchy().await?;
        let samples = self.sample_latency(self.settings.iterations, out).await?;

        let discovery = self.require_discovery()?;
        let summary = LatencySummary::from_samples(&samples);
        if let Some(summary) = &summary {
            info!(
                count = summary.count,
                min_secs = summary.min.as_secs_f64(),
                max_secs = summary.max.as_secs_f64(),
                mean_secs = summary.mean.as_secs_f64(),
                "Latency summary"
            );
        }
        Ok(RunReport {
            directory: discovery.directory.clone(),
            applied_schema: discovery.applied_schema.clone(),
            created: self.created.clone(),
            samples,
            summary,
        })
    }

    /// Resolves the directory and the schema objects will be bound to.
    ///
    /// Fails with `NotFound` as soon as an expected list comes back empty;
    /// nothing after that point is requested.
    pub async fn discover(&mut self) -> DirectoryResult<&Discovery> {
        self.expect_state(RunnerState::Connected, "discover")?;

        let listed = self
            .client
            .list_directories(DirectoryState::Enabled)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DirectoryError::NotFound("no ENABLED directories".to_string()))?;
        debug!("Listed directory {} ({})", listed.name, listed.handle);

        let directory = self.client.get_directory(&listed.handle).await?;
        info!(
            name = %directory.name,
            arn = %directory.handle,
            state = ?directory.state,
            created_at = ?directory.created_at,
            "Using directory"
        );

        let published_schema = self
            .client
            .list_published_schemas()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DirectoryError::NotFound("no published schemas".to_string()))?;

        let facet_names = self.client.list_facet_names(&published_schema).await?;
        let facet_attributes = self
            .client
            .list_facet_attributes(&published_schema, DIRECTORY_FACET)
            .await?;
        info!(
            schema = %published_schema,
            facets = ?facet_names,
            directory_facet_attributes = ?facet_attributes,
            "Published schema"
        );

        let applied_schema = self
            .client
            .list_applied_schemas(&directory.handle)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DirectoryError::NotFound(format!(
                    "no schemas applied to directory {}",
                    directory.handle
                ))
            })?;
        info!("Applied schema: {}", applied_schema);

        self.state = RunnerState::Discovered;
        Ok(&*self.discovery.insert(Discovery {
            directory,
            published_schema,
            facet_names,
            facet_attributes,
            applied_schema,
        }))
    }

    /// Creates `/US`, `/US/CA` and `/US/CA/SF`, each only after its parent.
    pub async fn build_hierarchy(&mut self) -> DirectoryResult<Vec<ObjectPath>> {
        self.expect_state(RunnerState::Discovered, "build_hierarchy")?;
        let discovery = self.require_discovery()?;
        let requests =
            hierarchy::hierarchy_requests(&discovery.directory.handle, &discovery.applied_schema);

        for request in &requests {
            let path = request.object_path();
            let id = self.client.create_object(request).await?;
            info!("Created {} ({})", path, id);
            self.created.push(path);
        }

        self.state = RunnerState::HierarchyBuilt;
        Ok(self.created.clone())
    }

    /// Reads the leaf `iterations` times, timing metadata + attribute reads.
    ///
    /// One line per iteration is written and flushed to `out` immediately.
    /// The first failing iteration ends the loop.
    pub async fn sample_latency<W: Write>(
        &mut self,
        iterations: usize,
        out: &mut W,
    ) -> DirectoryResult<Vec<LatencySample>> {
        self.expect_state(RunnerState::HierarchyBuilt, "sample_latency")?;
        self.state = RunnerState::Sampling;

        let discovery = self.require_discovery()?;
        let handle = discovery.directory.handle.clone();
        let consistency = self.settings.consistency;
        let leaf = self.settings.leaf_path.clone();
        let query = hierarchy::leaf_query(&handle, &discovery.applied_schema, &leaf, consistency);

        let mut samples = Vec::with_capacity(iterations);
        for iteration in 0..iterations {
            let start = Instant::now();
            let info = self
                .client
                .get_object_metadata(&handle, &leaf, consistency)
                .await?;
            let attributes = self.client.get_object_attributes(&query).await?;
            let sample = LatencySample::new(iteration, start.elapsed());

            writeln!(out, "{sample}")?;
            out.flush()?;

            let metric_address = attributes
                .iter()
                .find(|kv| kv.key.name == "MetricAddress")
                .map(|kv| &kv.value)
                .and_then(AttributeValue::as_string);
            debug!(
                iteration,
                object = ?info.identifier,
                metric_address = ?metric_address,
                "Retrieved metric"
            );
            samples.push(sample);
        }
        Ok(samples)
    }

    /// Releases the client. Only the first call reaches the client.
    pub async fn close(&mut self) -> DirectoryResult<()> {
        if self.state == RunnerState::Closed {
            return Ok(());
        }
        self.state = RunnerState::Closed;
        info!("Closing {} client", self.client.provider_name());
        self.client.close().await
    }

    fn expect_state(&self, expected: RunnerState, operation: &str) -> DirectoryResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(DirectoryError::Workflow(format!(
                "{operation} requires state '{expected}', runner is '{}'",
                self.state
            )))
        }
    }

    fn require_discovery(&self) -> DirectoryResult<&Discovery> {
        self.discovery
            .as_ref()
            .ok_or_else(|| DirectoryError::Workflow("discovery has not run".to_string()))
    }
}
