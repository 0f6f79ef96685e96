//! Postman REST API client.
//!
//! Thin typed layer over a `RequestSender`: builds endpoint URLs, attaches
//! the API key, and decodes the envelopes the exporter relies on. Full
//! documents are returned as untyped JSON so they can be written verbatim.

use porter_domain::{
    Headers, WorkspaceDetail, WorkspaceEnvelope, WorkspaceSummary, WorkspacesEnvelope,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::PostmanConfig;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::RequestSender;

/// Header carrying the Postman API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Client for the Postman API endpoints used by the exporter.
pub struct PostmanApi<S: RequestSender> {
    sender: S,
    config: PostmanConfig,
}

impl<S: RequestSender> PostmanApi<S> {
    /// Creates a client that sends through `sender`.
    #[must_use]
    pub const fn new(sender: S, config: PostmanConfig) -> Self {
        Self { sender, config }
    }

    /// Returns the underlying request sender.
    #[must_use]
    pub const fn sender(&self) -> &S {
        &self.sender
    }

    /// Lists all workspaces visible to the API key, in API order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a
    /// workspace list.
    pub async fn get_workspaces(&self) -> ApplicationResult<Vec<WorkspaceSummary>> {
        let envelope: WorkspacesEnvelope = self.get_typed("workspaces").await?;
        Ok(envelope.workspaces)
    }

    /// Fetches one workspace, including its collection and environment lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a workspace.
    pub async fn get_workspace(&self, id: &str) -> ApplicationResult<WorkspaceDetail> {
        let envelope: WorkspaceEnvelope = self.get_typed(&format!("workspaces/{id}")).await?;
        Ok(envelope.workspace)
    }

    /// Fetches a full collection document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn get_collection(&self, id: &str) -> ApplicationResult<Value> {
        self.get_document(&format!("collections/{id}")).await
    }

    /// Fetches a full environment document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn get_environment(&self, id: &str) -> ApplicationResult<Value> {
        self.get_document(&format!("environments/{id}")).await
    }

    /// Fetches the global variables of a workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn get_global_variables(&self, workspace_id: &str) -> ApplicationResult<Value> {
        self.get_document(&format!("workspaces/{workspace_id}/global-variables"))
            .await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_url())
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(API_KEY_HEADER.to_string(), self.config.api_key().to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    async fn get_document(&self, path: &str) -> ApplicationResult<Value> {
        let url = self.endpoint(path);
        let response = self.sender.get(&url, self.headers()).await?;
        debug!(url = %url, elapsed = ?response.duration, "fetched document");
        response
            .into_json()
            .map_err(|e| ApplicationError::UnexpectedResponse {
                url,
                message: e.to_string(),
            })
    }

    async fn get_typed<T: DeserializeOwned>(&self, path: &str) -> ApplicationResult<T> {
        let document = self.get_document(path).await?;
        serde_json::from_value(document).map_err(|e| ApplicationError::UnexpectedResponse {
            url: self.endpoint(path),
            message: e.to_string(),
        })
    }
}
