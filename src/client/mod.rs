pub mod config;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use config::ClientConfig;

pub const MIME_JSON: &str = "application/json";

/// Decides whether a response status code counts as success. Only successful
/// responses have their body decoded.
pub type SuccessStatus = Arc<dyn Fn(u16) -> bool + Send + Sync>;

/// JSON over HTTP client.
///
/// Every request carries the same set of default headers (by default only
/// `Content-Type: application/json`) and is bounded by the timeout given at
/// construction. Clones share the underlying connection pool, so build one
/// client and reuse it.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    headers: HeaderMap,
    is_success_status: SuccessStatus,
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("response status code {code}, url {url}")]
    Status { code: u16, url: String },

    #[error("Server returned invalid json: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Encode request body as json: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid header: {0}")]
    Header(String),
}

impl ApiClient {
    /// Idle connections kept per host.
    const MAX_IDLE_PER_HOST: usize = 1024;

    pub fn new(timeout: Duration) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(Self::MAX_IDLE_PER_HOST)
            .build()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MIME_JSON));

        Ok(Self {
            client,
            headers,
            is_success_status: Arc::new(|code: u16| code == 200),
        })
    }

    pub fn from_config(cfg: &ClientConfig) -> Result<Self, RequestError> {
        let success_status = cfg.success_status.clone();
        Self::new(Duration::from_millis(cfg.timeout_ms))?
            .with_headers(&cfg.headers)
            .map(|client| client.with_success_status(move |code| success_status.contains(&code)))
    }

    /// Replaces the default headers. Headers not listed here are no longer
    /// sent, including `Content-Type`.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let (name, value) = (name.as_ref(), value.as_ref());
            let header_name = match HeaderName::from_bytes(name.as_bytes()) {
                Ok(header_name) => header_name,
                Err(_) => return Err(RequestError::Header(format!("invalid name '{name}'"))),
            };
            let header_value = match HeaderValue::from_str(value) {
                Ok(header_value) => header_value,
                Err(_) => {
                    return Err(RequestError::Header(format!(
                        "invalid value for '{name}'"
                    )))
                }
            };
            map.insert(header_name, header_value);
        }
        self.headers = map;
        Ok(self)
    }

    /// Replaces the success status predicate, e.g. to accept `201 Created`.
    pub fn with_success_status<F>(mut self, is_success_status: F) -> Self
    where
        F: Fn(u16) -> bool + Send + Sync + 'static,
    {
        self.is_success_status = Arc::new(is_success_status);
        self
    }

    /// Sends a GET request and decodes the JSON response body into `T`.
    pub async fn get_json<T>(&self, url: &str) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        self.do_request(Method::GET, url, None).await
    }

    /// Sends `body` as JSON in a POST request and decodes the JSON response
    /// body into `T`.
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let data = serde_json::to_vec(body).map_err(RequestError::Encode)?;
        self.do_request(Method::POST, url, Some(data)).await
    }

    async fn do_request<T>(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        debug!("Request {method} {url}");
        let mut req = self
            .client
            .request(method, url)
            .headers(self.headers.clone());
        if let Some(body) = body {
            req = req.body(body);
        }

        let resp = req.send().await?;
        let code = resp.status().as_u16();
        if !(self.is_success_status)(code) {
            // Read the rest of the body so the connection can be reused.
            let _ = resp.bytes().await;
            debug!("Request {url} failed with status {code}");
            return Err(RequestError::Status {
                code,
                url: url.to_string(),
            });
        }

        let data = resp.bytes().await?;
        debug!("Request {url} done, status {code}, data_size: {}", data.len());
        serde_json::from_slice(&data).map_err(RequestError::Json)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
