//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use url::Url;

use crate::api::{ContextsApi, EntitiesApi, QueryApi};
use crate::error::{Error, ErrorBody, Result};

/// Base URL of the api.ai v1 API.
pub const DEFAULT_BASE_URL: &str = "https://api.api.ai/v1/";

/// Default protocol version date sent as the `v` query parameter.
///
/// See <https://docs.api.ai/docs/versioning>.
pub const DEFAULT_API_VERSION: &str = "20150910";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// api.ai API client.
///
/// Provides typed access to the query, context, and entity endpoints.
///
/// # Example
///
/// ```no_run
/// use apiai_client::{ApiAiClient, QueryRequest};
///
/// # async fn example() -> apiai_client::Result<()> {
/// let client = ApiAiClient::builder()
///     .access_token("secret")
///     .build()?;
///
/// let request = QueryRequest::text("what is the weather").with_session("session-1");
/// let response = client.query().text(request).await?;
/// println!("{}", response.result.fulfillment.speech);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiAiClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests.
    pub(crate) base_url: Url,
    /// Protocol version date for the `v` query parameter.
    pub(crate) api_version: String,
    /// Request timeout.
    pub(crate) timeout: Duration,
}

impl ApiAiClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the given access token with default settings.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::builder().access_token(access_token).build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get the protocol version date.
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the query API.
    pub fn query(&self) -> QueryApi {
        QueryApi::new(self.clone())
    }

    /// Access the contexts API.
    pub fn contexts(&self) -> ContextsApi {
        ContextsApi::new(self.clone())
    }

    /// Access the entities API.
    pub fn entities(&self) -> EntitiesApi {
        EntitiesApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path, with the `v` version parameter appended.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        let mut url = self.inner.base_url.join(path)?;
        url.query_pairs_mut()
            .append_pair("v", &self.inner.api_version);
        Ok(url)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        tracing::debug!(%url, "GET");
        let response = self
            .inner
            .http
            .get(url)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%url, "GET");
        let response = self
            .inner
            .http
            .get(url)
            .query(query)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST");
        let response = self
            .inner
            .http
            .post(url)
            .json(body)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body and query parameters.
    pub(crate) async fn post_with_query<T, B, Q>(&self, path: &str, body: &B, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST");
        let response = self
            .inner
            .http
            .post(url)
            .query(query)
            .json(body)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a POST request with a multipart body (voice uploads).
    pub(crate) async fn post_multipart<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T> {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST (multipart)");
        let response = self
            .inner
            .http
            .post(url)
            .multipart(form)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a PUT request with a JSON body.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%url, "PUT");
        let response = self
            .inner
            .http
            .put(url)
            .json(body)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        tracing::debug!(%url, "DELETE");
        let response = self
            .inner
            .http
            .delete(url)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a DELETE request with query parameters.
    pub(crate) async fn delete_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%url, "DELETE");
        let response = self
            .inner
            .http
            .delete(url)
            .query(query)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make a DELETE request with a JSON body.
    pub(crate) async fn delete_with_body<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        tracing::debug!(%url, "DELETE");
        let response = self
            .inner
            .http
            .delete(url)
            .json(body)
            .timeout(self.inner.timeout)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status().is_success() {
            let body = response.text().await?;
            tracing::trace!(%body, "response body");
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();

        // Try to parse the service's status block
        match response.json::<ErrorBody>().await {
            Ok(body) => {
                let message = body
                    .status
                    .error_details
                    .unwrap_or_else(|| format!("HTTP {}", status));
                if status == 404 {
                    Error::NotFound(message)
                } else if status == 401 {
                    Error::Auth(message)
                } else {
                    Error::Api {
                        status,
                        error_type: body.status.error_type,
                        message,
                    }
                }
            }
            Err(_) => Error::Api {
                status,
                error_type: "unknown".to_string(),
                message: format!("HTTP {}", status),
            },
        }
    }
}

/// Builder for creating an ApiAiClient.
#[derive(Debug)]
pub struct ClientBuilder {
    access_token: Option<String>,
    base_url: String,
    api_version: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the client access token (required).
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Override the base URL (for testing or private deployments).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the protocol version date.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiAiClient> {
        let token = self
            .access_token
            .ok_or_else(|| Error::Config("access_token is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&self.base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::Config("Invalid access token".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        // Build HTTP client
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("apiai-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(ApiAiClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                api_version: self.api_version,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
