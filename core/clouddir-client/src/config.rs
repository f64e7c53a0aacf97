//! Connection configuration.
//!
//! Credentials themselves are never read here; the AWS provider chain resolves
//! them for the selected profile.

use crate::error::{DirectoryError, DirectoryResult};
use std::env;

/// Explicit settings for connecting to the directory service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Named credentials profile. `None` uses the provider chain default.
    pub profile: Option<String>,
    /// Service region. `None` falls back to the profile's region.
    pub region: Option<String>,
    /// Endpoint override, e.g. for a local stand-in service.
    pub endpoint_url: Option<String>,
}

impl ClientConfig {
    /// Parse configuration from environment variables.
    ///
    /// Reads:
    /// - `AWS_PROFILE`: credentials profile
    /// - `AWS_REGION`, falling back to `AWS_DEFAULT_REGION`
    /// - `CLOUDDIR_ENDPOINT_URL`: endpoint override
    ///
    /// Empty values count as unset.
    pub fn from_env() -> DirectoryResult<Self> {
        Self::load(ClientConfig::default())
    }

    /// Environment values with `overrides` applied on top, validated once
    /// merged. A bad environment value that an override replaces is ignored.
    pub fn load(overrides: ClientConfig) -> DirectoryResult<Self> {
        let config = Self::read_env().merged_with(overrides);
        config.validate()?;
        Ok(config)
    }

    fn read_env() -> Self {
        Self {
            profile: non_empty_var("AWS_PROFILE"),
            region: non_empty_var("AWS_REGION").or_else(|| non_empty_var("AWS_DEFAULT_REGION")),
            endpoint_url: non_empty_var("CLOUDDIR_ENDPOINT_URL"),
        }
    }

    /// Checks values that can be rejected before touching the network.
    pub fn validate(&self) -> DirectoryResult<()> {
        if let Some(url) = &self.endpoint_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(DirectoryError::Config(format!(
                "endpoint URL must start with http:// or https://, got '{url}'"
            )));
        }
        if self.region.as_deref().is_some_and(|r| r.trim().is_empty()) {
            return Err(DirectoryError::Config("region must not be blank".to_string()));
        }
        Ok(())
    }

    /// Returns a copy with every `Some` field of `overrides` applied.
    #[must_use]
    pub fn merged_with(mut self, overrides: ClientConfig) -> Self {
        if overrides.profile.is_some() {
            self.profile = overrides.profile;
        }
        if overrides.region.is_some() {
            self.region = overrides.region;
        }
        if overrides.endpoint_url.is_some() {
            self.endpoint_url = overrides.endpoint_url;
        }
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}
