//! Postman API resource models.
//!
//! Only the fields the exporter reads are modelled; the full documents
//! (collections, environments, globals) stay as untyped JSON so they can be
//! written back out unchanged.

use serde::{Deserialize, Serialize};

/// Summary entry of `GET /workspaces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    /// Workspace id
    pub id: String,
    /// Display name
    pub name: String,
    /// Workspace visibility type (`personal`, `team`, ...)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Response envelope of `GET /workspaces`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkspacesEnvelope {
    /// Workspaces in API order
    #[serde(default)]
    pub workspaces: Vec<WorkspaceSummary>,
}

/// Collection entry listed inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Collection id
    pub id: String,
    /// Display name
    pub name: String,
    /// Owner-qualified id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// Environment entry listed inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSummary {
    /// Environment id
    pub id: String,
    /// Display name
    pub name: String,
    /// Owner-qualified id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// Body of `GET /workspaces/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceDetail {
    /// Workspace id
    pub id: String,
    /// Display name
    pub name: String,
    /// Collections in API order
    #[serde(default)]
    pub collections: Vec<CollectionSummary>,
    /// Environments in API order
    #[serde(default)]
    pub environments: Vec<EnvironmentSummary>,
}

/// Response envelope of `GET /workspaces/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEnvelope {
    /// The workspace
    pub workspace: WorkspaceDetail,
}
