//! Directory and object descriptions returned by the service.

use crate::ids::{DirectoryHandle, ObjectIdentifier};
use crate::schema::SchemaReference;
use crate::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectoryState {
    Enabled,
    Disabled,
    Deleted,
}

impl DirectoryState {
    /// Wire name used by the service.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DirectoryState::Enabled => "ENABLED",
            DirectoryState::Disabled => "DISABLED",
            DirectoryState::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for DirectoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectoryState {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "ENABLED" => Ok(DirectoryState::Enabled),
            "DISABLED" => Ok(DirectoryState::Disabled),
            "DELETED" => Ok(DirectoryState::Deleted),
            other => Err(Error::InvalidState(other.to_string())),
        }
    }
}

/// Read consistency hint passed through to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    #[default]
    Eventual,
    Serializable,
}

impl ConsistencyLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConsistencyLevel::Eventual => "EVENTUAL",
            ConsistencyLevel::Serializable => "SERIALIZABLE",
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsistencyLevel {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "EVENTUAL" => Ok(ConsistencyLevel::Eventual),
            "SERIALIZABLE" => Ok(ConsistencyLevel::Serializable),
            other => Err(Error::InvalidConsistency(other.to_string())),
        }
    }
}

/// A directory as listed or fetched from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySummary {
    pub handle: DirectoryHandle,
    pub name: String,
    /// `None` when the service reports a state this crate does not know.
    pub state: Option<DirectoryState>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Metadata of a single object: its identifier and attached facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub identifier: Option<ObjectIdentifier>,
    pub facets: Vec<SchemaReference>,
}
