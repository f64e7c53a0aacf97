//! Directory-service client abstraction.
//!
//! The workflow only ever talks to this trait, so it can run against the AWS
//! transport or an in-memory stand-in.

use crate::error::DirectoryResult;
use async_trait::async_trait;
use clouddir_types::{
    AttributeKV, ConsistencyLevel, DirectoryHandle, DirectoryState, DirectorySummary,
    ObjectIdentifier, ObjectInfo, ObjectPath, SchemaArn, SchemaReference,
};

/// Everything needed to create one object in a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateObjectRequest {
    pub directory: DirectoryHandle,
    /// Facets the new object is typed with.
    pub schema_facets: Vec<SchemaReference>,
    /// Complete initial attribute list; there are no partial updates.
    pub attributes: Vec<AttributeKV>,
    pub parent: ObjectPath,
    pub link_name: String,
}

impl CreateObjectRequest {
    /// Path the object will have once created.
    #[must_use]
    pub fn object_path(&self) -> ObjectPath {
        self.parent.child(&self.link_name)
    }
}

/// A scoped attribute read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectAttributesQuery {
    pub directory: DirectoryHandle,
    pub path: ObjectPath,
    pub consistency: ConsistencyLevel,
    pub facet: SchemaReference,
    pub attribute_names: Vec<String>,
}

/// Remote directory-service operations used by the demo workflow.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Returns the name of the backing transport.
    fn provider_name(&self) -> &'static str;

    /// Lists directories in the given state.
    async fn list_directories(&self, state: DirectoryState)
    -> DirectoryResult<Vec<DirectorySummary>>;

    /// Fetches one directory's details.
    async fn get_directory(&self, directory: &DirectoryHandle) -> DirectoryResult<DirectorySummary>;

    /// Lists ARNs of published schemas.
    async fn list_published_schemas(&self) -> DirectoryResult<Vec<SchemaArn>>;

    /// Lists facet names defined by a schema.
    async fn list_facet_names(&self, schema: &SchemaArn) -> DirectoryResult<Vec<String>>;

    /// Lists attribute names defined by one facet of a schema.
    async fn list_facet_attributes(
        &self,
        schema: &SchemaArn,
        facet_name: &str,
    ) -> DirectoryResult<Vec<String>>;

    /// Lists ARNs of schemas applied to a directory.
    async fn list_applied_schemas(&self, directory: &DirectoryHandle)
    -> DirectoryResult<Vec<SchemaArn>>;

    /// Creates an object and links it under `request.parent`.
    async fn create_object(&self, request: &CreateObjectRequest)
    -> DirectoryResult<ObjectIdentifier>;

    /// Reads object metadata (identifier and facets).
    async fn get_object_metadata(
        &self,
        directory: &DirectoryHandle,
        path: &ObjectPath,
        consistency: ConsistencyLevel,
    ) -> DirectoryResult<ObjectInfo>;

    /// Reads selected attributes of an object within one facet.
    async fn get_object_attributes(
        &self,
        query: &ObjectAttributesQuery,
    ) -> DirectoryResult<Vec<AttributeKV>>;

    /// Releases the underlying connection. Later calls fail with `Closed`.
    async fn close(&mut self) -> DirectoryResult<()>;
}
