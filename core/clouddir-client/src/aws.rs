//! AWS Cloud Directory transport.
//!
//! Uses the official aws-sdk-clouddirectory crate. Credentials come from the
//! SDK provider chain for the configured profile and are resolved eagerly in
//! [`AwsDirectoryClient::connect`] so that auth problems surface before the
//! workflow starts.

use crate::client::{CreateObjectRequest, DirectoryClient, ObjectAttributesQuery};
use crate::config::ClientConfig;
use crate::error::{DirectoryError, DirectoryResult};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_clouddirectory::error::DisplayErrorContext;
use aws_sdk_clouddirectory::types as sdk;
use aws_sdk_clouddirectory::Client;
use chrono::{DateTime, Utc};
use clouddir_types::{
    AttributeKV, AttributeKey, AttributeValue, ConsistencyLevel, DirectoryHandle, DirectoryState,
    DirectorySummary, ObjectIdentifier, ObjectInfo, ObjectPath, SchemaArn, SchemaReference,
};
use tracing::{debug, info};

/// Directory client backed by AWS Cloud Directory.
#[derive(Debug)]
pub struct AwsDirectoryClient {
    client: Option<Client>,
}

impl AwsDirectoryClient {
    /// Builds an SDK client from `config` and verifies credentials resolve.
    pub async fn connect(config: &ClientConfig) -> DirectoryResult<Self> {
        config.validate()?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(url) = &config.endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;

        let region = sdk_config
            .region()
            .map(ToString::to_string)
            .ok_or_else(|| DirectoryError::Connection("no region configured".to_string()))?;

        let provider = sdk_config.credentials_provider().ok_or_else(|| {
            DirectoryError::Connection("no credentials provider configured".to_string())
        })?;
        provider.provide_credentials().await.map_err(|e| {
            DirectoryError::Connection(format!(
                "failed to resolve credentials: {}",
                DisplayErrorContext(&e)
            ))
        })?;

        info!(
            region = %region,
            profile = ?config.profile,
            endpoint = ?config.endpoint_url,
            "Cloud Directory client initialized"
        );

        Ok(Self::from_client(Client::new(&sdk_config)))
    }

    /// Wraps an already configured SDK client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    fn client(&self) -> DirectoryResult<&Client> {
        self.client.as_ref().ok_or(DirectoryError::Closed)
    }
}

#[async_trait]
impl DirectoryClient for AwsDirectoryClient {
    fn provider_name(&self) -> &'static str {
        "AWS Cloud Directory"
    }

    async fn list_directories(
        &self,
        state: DirectoryState,
    ) -> DirectoryResult<Vec<DirectorySummary>> {
        let resp = self
            .client()?
            .list_directories()
            .state(to_sdk_state(state))
            .send()
            .await
            .map_err(|e| transport_error("ListDirectories", &e))?;

        Ok(resp.directories().iter().filter_map(from_sdk_directory).collect())
    }

    async fn get_directory(&self, directory: &DirectoryHandle) -> DirectoryResult<DirectorySummary> {
        let resp = self
            .client()?
            .get_directory()
            .directory_arn(directory.as_str())
            .send()
            .await
            .map_err(|e| transport_error("GetDirectory", &e))?;

        resp.directory()
            .and_then(from_sdk_directory)
            .ok_or_else(|| DirectoryError::NotFound(format!("directory {directory}")))
    }

    async fn list_published_schemas(&self) -> DirectoryResult<Vec<SchemaArn>> {
        let resp = self
            .client()?
            .list_published_schema_arns()
            .send()
            .await
            .map_err(|e| transport_error("ListPublishedSchemaArns", &e))?;

        Ok(resp.schema_arns().iter().map(SchemaArn::new).collect())
    }

    async fn list_facet_names(&self, schema: &SchemaArn) -> DirectoryResult<Vec<String>> {
        let resp = self
            .client()?
            .list_facet_names()
            .schema_arn(schema.as_str())
            .send()
            .await
            .map_err(|e| transport_error("ListFacetNames", &e))?;

        Ok(resp.facet_names().to_vec())
    }

    async fn list_facet_attributes(
        &self,
        schema: &SchemaArn,
        facet_name: &str,
    ) -> DirectoryResult<Vec<String>> {
        let resp = self
            .client()?
            .list_facet_attributes()
            .schema_arn(schema.as_str())
            .name(facet_name)
            .send()
            .await
            .map_err(|e| transport_error("ListFacetAttributes", &e))?;

        Ok(resp
            .attributes()
            .iter()
            .map(|attr| attr.name().to_string())
            .collect())
    }

    async fn list_applied_schemas(
        &self,
        directory: &DirectoryHandle,
    ) -> DirectoryResult<Vec<SchemaArn>> {
        let resp = self
            .client()?
            .list_applied_schema_arns()
            .directory_arn(directory.as_str())
            .send()
            .await
            .map_err(|e| transport_error("ListAppliedSchemaArns", &e))?;

        Ok(resp.schema_arns().iter().map(SchemaArn::new).collect())
    }

    async fn create_object(
        &self,
        request: &CreateObjectRequest,
    ) -> DirectoryResult<ObjectIdentifier> {
        let mut op = self
            .client()?
            .create_object()
            .directory_arn(request.directory.as_str())
            .parent_reference(object_reference(&request.parent))
            .link_name(&request.link_name);
        for facet in &request.schema_facets {
            op = op.schema_facets(to_sdk_facet(facet));
        }
        for attribute in &request.attributes {
            op = op.object_attribute_list(to_sdk_attribute(attribute)?);
        }

        let resp = op.send().await.map_err(|e| {
            if e
                .as_service_error()
                .is_some_and(|se| se.is_link_name_already_in_use_exception())
            {
                DirectoryError::Conflict(request.object_path().to_string())
            } else {
                transport_error("CreateObject", &e)
            }
        })?;

        let identifier = resp.object_identifier().ok_or_else(|| {
            DirectoryError::Transport("CreateObject returned no object identifier".to_string())
        })?;
        debug!(path = %request.object_path(), id = identifier, "Created object");
        Ok(ObjectIdentifier::new(identifier))
    }

    async fn get_object_metadata(
        &self,
        directory: &DirectoryHandle,
        path: &ObjectPath,
        consistency: ConsistencyLevel,
    ) -> DirectoryResult<ObjectInfo> {
        let resp = self
            .client()?
            .get_object_information()
            .directory_arn(directory.as_str())
            .object_reference(object_reference(path))
            .consistency_level(to_sdk_consistency(consistency))
            .send()
            .await
            .map_err(|e| {
                if e
                    .as_service_error()
                    .is_some_and(|se| se.is_resource_not_found_exception())
                {
                    DirectoryError::NotFound(format!("object {path}"))
                } else {
                    transport_error("GetObjectInformation", &e)
                }
            })?;

        Ok(ObjectInfo {
            identifier: resp.object_identifier().map(ObjectIdentifier::new),
            facets: resp.schema_facets().iter().filter_map(from_sdk_facet).collect(),
        })
    }

    async fn get_object_attributes(
        &self,
        query: &ObjectAttributesQuery,
    ) -> DirectoryResult<Vec<AttributeKV>> {
        let mut op = self
            .client()?
            .get_object_attributes()
            .directory_arn(query.directory.as_str())
            .object_reference(object_reference(&query.path))
            .consistency_level(to_sdk_consistency(query.consistency))
            .schema_facet(to_sdk_facet(&query.facet));
        for name in &query.attribute_names {
            op = op.attribute_names(name);
        }

        let resp = op.send().await.map_err(|e| {
            if e
                .as_service_error()
                .is_some_and(|se| se.is_resource_not_found_exception())
            {
                DirectoryError::NotFound(format!("object {}", query.path))
            } else {
                transport_error("GetObjectAttributes", &e)
            }
        })?;

        Ok(resp.attributes().iter().filter_map(from_sdk_attribute).collect())
    }

    async fn close(&mut self) -> DirectoryResult<()> {
        if self.client.take().is_some() {
            debug!("Cloud Directory client released");
        }
        Ok(())
    }
}

fn transport_error<E: std::error::Error>(operation: &str, err: &E) -> DirectoryError {
    DirectoryError::Transport(format!("{operation} failed: {}", DisplayErrorContext(err)))
}

fn object_reference(path: &ObjectPath) -> sdk::ObjectReference {
    sdk::ObjectReference::builder().selector(path.as_str()).build()
}

fn to_sdk_state(state: DirectoryState) -> sdk::DirectoryState {
    match state {
        DirectoryState::Enabled => sdk::DirectoryState::Enabled,
        DirectoryState::Disabled => sdk::DirectoryState::Disabled,
        DirectoryState::Deleted => sdk::DirectoryState::Deleted,
    }
}

fn to_sdk_consistency(level: ConsistencyLevel) -> sdk::ConsistencyLevel {
    match level {
        ConsistencyLevel::Eventual => sdk::ConsistencyLevel::Eventual,
        ConsistencyLevel::Serializable => sdk::ConsistencyLevel::Serializable,
    }
}

fn to_sdk_facet(facet: &SchemaReference) -> sdk::SchemaFacet {
    sdk::SchemaFacet::builder()
        .schema_arn(facet.schema_arn.as_str())
        .facet_name(&facet.facet_name)
        .build()
}

fn to_sdk_attribute(attribute: &AttributeKV) -> DirectoryResult<sdk::AttributeKeyAndValue> {
    let key = sdk::AttributeKey::builder()
        .schema_arn(attribute.key.facet.schema_arn.as_str())
        .facet_name(&attribute.key.facet.facet_name)
        .name(&attribute.key.name)
        .build()
        .map_err(|e| DirectoryError::InvalidRequest(e.to_string()))?;
    let value = match &attribute.value {
        AttributeValue::String(s) => sdk::TypedAttributeValue::StringValue(s.clone()),
        AttributeValue::Number(n) => sdk::TypedAttributeValue::NumberValue(n.clone()),
        AttributeValue::Boolean(b) => sdk::TypedAttributeValue::BooleanValue(*b),
    };
    Ok(sdk::AttributeKeyAndValue::builder()
        .key(key)
        .value(value)
        .build())
}

fn from_sdk_facet(facet: &sdk::SchemaFacet) -> Option<SchemaReference> {
    Some(SchemaReference::new(
        SchemaArn::new(facet.schema_arn()?),
        facet.facet_name()?,
    ))
}

fn from_sdk_attribute(attribute: &sdk::AttributeKeyAndValue) -> Option<AttributeKV> {
    let key = attribute.key()?;
    let value = match attribute.value()? {
        sdk::TypedAttributeValue::StringValue(s) => AttributeValue::String(s.clone()),
        sdk::TypedAttributeValue::NumberValue(n) => AttributeValue::Number(n.clone()),
        sdk::TypedAttributeValue::BooleanValue(b) => AttributeValue::Boolean(*b),
        other => {
            debug!(attribute = key.name(), value = ?other, "Skipping unsupported attribute type");
            return None;
        }
    };
    Some(AttributeKV {
        key: AttributeKey {
            facet: SchemaReference::new(SchemaArn::new(key.schema_arn()), key.facet_name()),
            name: key.name().to_string(),
        },
        value,
    })
}

fn from_sdk_directory(directory: &sdk::Directory) -> Option<DirectorySummary> {
    let handle = DirectoryHandle::new(directory.directory_arn()?);
    Some(DirectorySummary {
        handle,
        name: directory.name().unwrap_or_default().to_string(),
        state: directory.state().and_then(|s| s.as_str().parse().ok()),
        created_at: directory
            .creation_date_time()
            .and_then(|dt| DateTime::<Utc>::from_timestamp(dt.secs(), dt.subsec_nanos())),
    })
}
