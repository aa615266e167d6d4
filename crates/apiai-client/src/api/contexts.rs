//! Contexts API.
//!
//! Contexts are scoped to a session; every endpoint takes a `sessionId`
//! query parameter.

use crate::client::ApiAiClient;
use crate::error::Result;
use crate::types::{Context, StatusResponse};

/// Session selector sent as a query parameter.
#[derive(Debug, serde::Serialize)]
struct SessionQuery<'a> {
    #[serde(rename = "sessionId")]
    session_id: &'a str,
}

/// Contexts API client.
pub struct ContextsApi {
    client: ApiAiClient,
}

impl ContextsApi {
    pub(crate) fn new(client: ApiAiClient) -> Self {
        Self { client }
    }

    /// List all contexts active in a session.
    pub async fn list(&self, session_id: &str) -> Result<Vec<Context>> {
        self.client
            .get_with_query("contexts", &SessionQuery { session_id })
            .await
    }

    /// Get a context by name.
    pub async fn get(&self, session_id: &str, name: &str) -> Result<Context> {
        self.client
            .get_with_query(&format!("contexts/{}", name), &SessionQuery { session_id })
            .await
    }

    /// Add contexts to a session.
    pub async fn create(&self, session_id: &str, contexts: &[Context]) -> Result<StatusResponse> {
        self.client
            .post_with_query("contexts", contexts, &SessionQuery { session_id })
            .await
    }

    /// Delete all contexts from a session.
    pub async fn delete_all(&self, session_id: &str) -> Result<StatusResponse> {
        self.client
            .delete_with_query("contexts", &SessionQuery { session_id })
            .await
    }

    /// Delete a context by name.
    pub async fn delete(&self, session_id: &str, name: &str) -> Result<StatusResponse> {
        self.client
            .delete_with_query(&format!("contexts/{}", name), &SessionQuery { session_id })
            .await
    }
}
