//! In-memory directory service used by the runner tests.

#![allow(dead_code)]

use async_trait::async_trait;
use clouddir_client::{
    CreateObjectRequest, DirectoryClient, DirectoryError, DirectoryResult, ObjectAttributesQuery,
};
use clouddir_types::{
    AttributeKV, ConsistencyLevel, DirectoryHandle, DirectoryState, DirectorySummary,
    ObjectIdentifier, ObjectInfo, ObjectPath, SchemaArn, SchemaReference,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One recorded client call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListDirectories(DirectoryState),
    GetDirectory(DirectoryHandle),
    ListPublishedSchemas,
    ListFacetNames(SchemaArn),
    ListFacetAttributes(SchemaArn, String),
    ListAppliedSchemas(DirectoryHandle),
    CreateObject(CreateObjectRequest),
    GetObjectMetadata(ObjectPath, ConsistencyLevel),
    GetObjectAttributes(ObjectAttributesQuery),
    Close,
}

#[derive(Default)]
struct Inner {
    directories: Vec<DirectorySummary>,
    published: Vec<SchemaArn>,
    applied: Vec<SchemaArn>,
    /// Existing objects by normalized path, with their facets and attributes.
    objects: HashMap<String, (Vec<SchemaReference>, Vec<AttributeKV>)>,
    calls: Vec<Call>,
    metadata_reads: usize,
    fail_metadata_read: Option<usize>,
    fail_close: bool,
    next_id: usize,
}

/// Mock client whose state is shared with the test through `Arc`.
#[derive(Clone)]
pub struct MockDirectory {
    inner: Arc<Mutex<Inner>>,
}

fn normalize(path: &ObjectPath) -> String {
    let trimmed = path.as_str().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

impl MockDirectory {
    /// Empty service: no directories, no schemas, only the root object.
    pub fn empty() -> Self {
        let mut inner = Inner::default();
        inner.objects.insert("/".to_string(), (Vec::new(), Vec::new()));
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// One ENABLED directory "Sales" (`arn:dir:1`) with schema `arn:schema:1`
    /// published and applied.
    pub fn sales() -> Self {
        Self::empty()
            .with_directory("Sales", "arn:dir:1")
            .with_published("arn:schema:1")
            .with_applied("arn:schema:1")
    }

    pub fn with_directory(self, name: &str, arn: &str) -> Self {
        self.inner.lock().unwrap().directories.push(DirectorySummary {
            handle: DirectoryHandle::new(arn),
            name: name.to_string(),
            state: Some(DirectoryState::Enabled),
            created_at: None,
        });
        self
    }

    pub fn with_disabled_directory(self, name: &str, arn: &str) -> Self {
        self.inner.lock().unwrap().directories.push(DirectorySummary {
            handle: DirectoryHandle::new(arn),
            name: name.to_string(),
            state: Some(DirectoryState::Disabled),
            created_at: None,
        });
        self
    }

    pub fn with_published(self, arn: &str) -> Self {
        self.inner.lock().unwrap().published.push(SchemaArn::new(arn));
        self
    }

    pub fn with_applied(self, arn: &str) -> Self {
        self.inner.lock().unwrap().applied.push(SchemaArn::new(arn));
        self
    }

    /// Pre-creates an object so a later create at that path collides.
    pub fn with_existing_object(self, path: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .objects
            .insert(normalize(&ObjectPath::new(path)), (Vec::new(), Vec::new()));
        self
    }

    /// Makes the `n`th metadata read (zero-based) fail with a transport error.
    pub fn failing_metadata_read(self, n: usize) -> Self {
        self.inner.lock().unwrap().fail_metadata_read = Some(n);
        self
    }

    pub fn failing_close(self) -> Self {
        self.inner.lock().unwrap().fail_close = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn create_requests(&self) -> Vec<CreateObjectRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateObject(req) => Some(req),
                _ => None,
            })
            .collect()
    }

    pub fn close_count(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Close).count()
    }

    pub fn has_object(&self, path: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .objects
            .contains_key(&normalize(&ObjectPath::new(path)))
    }

    fn record(&self, call: Call) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl DirectoryClient for MockDirectory {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn list_directories(
        &self,
        state: DirectoryState,
    ) -> DirectoryResult<Vec<DirectorySummary>> {
        self.record(Call::ListDirectories(state));
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .directories
            .iter()
            .filter(|d| d.state == Some(state))
            .cloned()
            .collect())
    }

    async fn get_directory(&self, directory: &DirectoryHandle) -> DirectoryResult<DirectorySummary> {
        self.record(Call::GetDirectory(directory.clone()));
        let inner = self.inner.lock().unwrap();
        inner
            .directories
            .iter()
            .find(|d| &d.handle == directory)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(directory.to_string()))
    }

    async fn list_published_schemas(&self) -> DirectoryResult<Vec<SchemaArn>> {
        self.record(Call::ListPublishedSchemas);
        Ok(self.inner.lock().unwrap().published.clone())
    }

    async fn list_facet_names(&self, schema: &SchemaArn) -> DirectoryResult<Vec<String>> {
        self.record(Call::ListFacetNames(schema.clone()));
        Ok(vec!["Directory".to_string(), "File".to_string()])
    }

    async fn list_facet_attributes(
        &self,
        schema: &SchemaArn,
        facet_name: &str,
    ) -> DirectoryResult<Vec<String>> {
        self.record(Call::ListFacetAttributes(schema.clone(), facet_name.to_string()));
        Ok(vec!["Name".to_string()])
    }

    async fn list_applied_schemas(
        &self,
        directory: &DirectoryHandle,
    ) -> DirectoryResult<Vec<SchemaArn>> {
        self.record(Call::ListAppliedSchemas(directory.clone()));
        Ok(self.inner.lock().unwrap().applied.clone())
    }

    async fn create_object(
        &self,
        request: &CreateObjectRequest,
    ) -> DirectoryResult<ObjectIdentifier> {
        self.record(Call::CreateObject(request.clone()));
        let mut inner = self.inner.lock().unwrap();
        if !inner.objects.contains_key(&normalize(&request.parent)) {
            return Err(DirectoryError::NotFound(format!("parent {}", request.parent)));
        }
        let path = normalize(&request.object_path());
        if inner.objects.contains_key(&path) {
            return Err(DirectoryError::Conflict(path));
        }
        inner.objects.insert(
            path,
            (request.schema_facets.clone(), request.attributes.clone()),
        );
        inner.next_id += 1;
        Ok(ObjectIdentifier::new(format!("obj-{}", inner.next_id)))
    }

    async fn get_object_metadata(
        &self,
        _directory: &DirectoryHandle,
        path: &ObjectPath,
        consistency: ConsistencyLevel,
    ) -> DirectoryResult<ObjectInfo> {
        self.record(Call::GetObjectMetadata(path.clone(), consistency));
        let mut inner = self.inner.lock().unwrap();
        let read = inner.metadata_reads;
        inner.metadata_reads += 1;
        if inner.fail_metadata_read == Some(read) {
            return Err(DirectoryError::Transport("connection reset".to_string()));
        }
        let (facets, _) = inner
            .objects
            .get(&normalize(path))
            .ok_or_else(|| DirectoryError::NotFound(path.to_string()))?;
        Ok(ObjectInfo {
            identifier: Some(ObjectIdentifier::new("obj-leaf")),
            facets: facets.clone(),
        })
    }

    async fn get_object_attributes(
        &self,
        query: &ObjectAttributesQuery,
    ) -> DirectoryResult<Vec<AttributeKV>> {
        self.record(Call::GetObjectAttributes(query.clone()));
        let inner = self.inner.lock().unwrap();
        let (_, attributes) = inner
            .objects
            .get(&normalize(&query.path))
            .ok_or_else(|| DirectoryError::NotFound(query.path.to_string()))?;
        Ok(attributes
            .iter()
            .filter(|kv| kv.key.facet == query.facet && query.attribute_names.contains(&kv.key.name))
            .cloned()
            .collect())
    }

    async fn close(&mut self) -> DirectoryResult<()> {
        self.record(Call::Close);
        if self.inner.lock().unwrap().fail_close {
            return Err(DirectoryError::Transport("close failed".to_string()));
        }
        Ok(())
    }
}
