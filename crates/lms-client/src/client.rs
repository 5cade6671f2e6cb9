//! HTTP client for the library management API
//!
//! This module wraps reqwest with the fixed base host, timeout handling,
//! and default headers, and normalizes every reply into status plus parsed
//! JSON. Non-2xx statuses are NOT turned into errors here: the login and
//! dashboard flows need the status and the body together to classify a
//! reply, so [`ApiError`] is reserved for transport and decode failures.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default production host. Preserved exactly; the app's installed base
/// points here.
pub const DEFAULT_SERVICE_URL: &str = "https://lms-ozcq.onrender.com";

/// Error for a request that never produced a usable JSON reply
///
/// `status` is 0 when the request failed before any HTTP response arrived
/// (connect failure, timeout), and carries the real HTTP status when the
/// response body could not be read or decoded as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API error {status}: {code} - {message}")]
pub struct ApiError {
    /// HTTP status code, 0 if the exchange never completed
    status: u16,
    /// Error code (e.g., "NetworkError", "InvalidJson")
    code: String,
    /// Human-readable error message
    message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { status, code: code.into(), message: message.into() }
    }

    /// Get the HTTP status code (0 for pure transport failures)
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if the request failed without reaching the server
    pub fn is_network_error(&self) -> bool {
        self.status == 0
    }
}

/// HTTP method for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
}

impl HttpMethod {
    /// Method name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A request to an API endpoint
///
/// Built with the constructor for the method plus chained builder calls,
/// then handed to [`ApiClient::execute`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Endpoint path (e.g., "/api/dashboard")
    pub path: String,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (for POST)
    pub body: Option<Vec<u8>>,
    /// Encoding type (e.g., "application/json")
    pub encoding: Option<String>,
}

impl ApiRequest {
    /// Create a new GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            params: HashMap::new(),
            headers: HashMap::new(),
            body: None,
            encoding: None,
        }
    }

    /// Create a new POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            params: HashMap::new(),
            headers: HashMap::new(),
            body: None,
            encoding: Some("application/json".to_string()),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Attach a bearer token as the Authorization header
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    /// Set the request body from JSON
    pub fn json_body<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        self.body = Some(body);
        self.encoding = Some("application/json".to_string());
        Ok(self)
    }
}

/// A parsed API response
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response data
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Create a new response
    pub fn new(status: u16, headers: HashMap<String, String>, data: T) -> Self {
        Self { status, headers, data }
    }

    /// Get a header value
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.get(key)
    }

    /// Check if the response is successful (2xx status)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base service URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Shelfmark/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new config with a custom base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

/// HTTP client for the library management API
///
/// # Examples
/// ```rust,no_run
/// use lms_client::client::{ApiClient, ApiClientConfig, ApiRequest};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ApiClient::new(ApiClientConfig::default());
///
///     let request = ApiRequest::get("/api/dashboard").bearer("token");
///     let response = client.execute::<serde_json::Value>(request).await?;
///     println!("status: {}", response.status);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client
    client: reqwest::Client,
    /// Configuration
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ApiClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Execute a request and parse the body as JSON
    ///
    /// Returns the response for every HTTP status, including 4xx/5xx, as
    /// long as the body decodes as JSON. Fails only when the request cannot
    /// be sent, the body cannot be read, or the body is not JSON.
    pub async fn execute<T>(&self, request: ApiRequest) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url, request.path);
        debug!("{} {}", request.method.as_str(), url);

        let mut req = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (key, value) in &request.params {
            req = req.query(&[(key, value)]);
        }

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = &request.body {
            if let Some(encoding) = &request.encoding {
                req = req.header("Content-Type", encoding);
            }
            req = req.body(body.clone());
        }

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::new(0, "NetworkError", format!("Request failed: {}", e)))?;

        self.parse_response(response).await
    }

    /// Parse a reqwest response into an ApiResponse
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(key.to_string(), value_str.to_string());
            }
        }

        let body = response.text().await.map_err(|e| {
            ApiError::new(0, "NetworkError", format!("Failed to read response: {}", e))
        })?;

        let data: T = serde_json::from_str(&body).map_err(|e| {
            ApiError::new(status, "InvalidJson", format!("Failed to parse JSON: {}", e))
        })?;

        Ok(ApiResponse::new(status, headers, data))
    }

    /// Get the client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
