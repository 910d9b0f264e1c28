//! # HTTP Client
//!
//! One shared [`ApiClient`] in front of the REST backend. Every service goes
//! through it.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Pipeline                                │
//! │                                                                         │
//! │  service ──► ApiClient::send(method, path, query, body)                │
//! │                 │                                                       │
//! │                 │ 1. base_url + path, empty query values dropped        │
//! │                 │ 2. Authorization: Bearer <token> (when signed in)     │
//! │                 │ 3. 10 s timeout                                       │
//! │                 ▼                                                       │
//! │              backend                                                    │
//! │                 │                                                       │
//! │      ┌──────────┼───────────────┬──────────────────┬────────────────┐  │
//! │      ▼          ▼               ▼                  ▼                ▼  │
//! │     2xx        401          403/404/500          other         no reply │
//! │   decode T   invalidate     log only          log message      Network  │
//! │              session,                                          Timeout  │
//! │              → /signin                                                  │
//! │                                                                         │
//! │  Nothing is retried. Every failure is returned as a ClientError.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::{Method, StatusCode};
use retail_core::forms::ImageUpload;
use retail_core::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::navigation::{redirect_to_signin, Navigator};
use crate::session::SessionContext;

/// Query parameters, already stripped of empty values.
pub type Query<'a> = Vec<(&'a str, String)>;

/// Drops `None` and empty-string values, keeping order.
pub fn build_query<'a, I>(params: I) -> Query<'a>
where
    I: IntoIterator<Item = (&'a str, Option<String>)>,
{
    params
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(v) if !v.is_empty() => Some((key, v)),
            _ => None,
        })
        .collect()
}

/// URL-encoded form of a query, e.g. `page=0&size=10`.
pub fn query_string(query: &[(&str, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
        .finish()
}

/// Shape of the backend's error bodies. Only `message` is used.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

enum Body {
    Empty,
    Json(serde_json::Value),
    File(ImageUpload),
}

impl Body {
    /// Short form for debug logs. File contents are never logged.
    fn describe(&self) -> String {
        match self {
            Body::Empty => String::new(),
            Body::Json(json) => json.to_string(),
            Body::File(file) => format!("<{} {} bytes>", file.file_name, file.bytes.len()),
        }
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Shared REST client. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
    debug: bool,
    session: SessionContext,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(ApiClient {
            http,
            base_url: config.api_base_url(),
            timeout_secs: config.api.timeout_secs,
            debug: config.debug(),
            session,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Absolute URL of an API path such as `/products/12`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // -------------------------------------------------------------------------
    // Verbs
    // -------------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        self.send(Method::GET, path, query, Body::Empty).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let json = serde_json::to_value(body)?;
        self.send(Method::POST, path, &[], Body::Json(json)).await
    }

    /// POST without a body; parameters travel in the query string.
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        self.send(Method::POST, path, query, Body::Empty).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(Method::PUT, path, &[], Body::Empty).await
    }

    /// `DELETE`. Use `T = ()` for endpoints that answer with an empty body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(Method::DELETE, path, &[], Body::Empty).await
    }

    /// Multipart upload with the file in the `file` field.
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, file: ImageUpload) -> ClientResult<T> {
        self.send(Method::POST, path, &[], Body::File(file)).await
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Body,
    ) -> ClientResult<T> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }

        if self.debug {
            debug!(method = %method, url = %url, ?query, body = %body.describe(), "API request");
        }

        request = match body {
            Body::Empty => request,
            Body::Json(json) => request.json(&json),
            Body::File(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.mime)
                    .map_err(|e| {
                        ClientError::Validation(ValidationError::InvalidFormat {
                            field: "file".to_string(),
                            reason: e.to_string(),
                        })
                    })?;
                request.multipart(reqwest::multipart::Form::new().part("file", part))
            }
        };

        let response = request.send().await.map_err(|e| self.transport_error(&method, &url, e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&method, &url, e))?;

        if self.debug {
            debug!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&bytes),
                "API response"
            );
        }

        if !status.is_success() {
            return Err(self.status_error(status, &bytes).await);
        }

        let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(payload).map_err(|e| {
            error!(method = %method, url = %url, error = %e, "Failed to decode API response");
            ClientError::Decode(e.to_string())
        })
    }

    fn transport_error(&self, method: &Method, url: &str, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            error!(method = %method, url = %url, timeout_secs = self.timeout_secs, "Request timed out");
            ClientError::Timeout(self.timeout_secs)
        } else {
            error!(method = %method, url = %url, error = %err, "Network error: unable to connect to server");
            ClientError::Network(err.to_string())
        }
    }

    async fn status_error(&self, status: StatusCode, body: &[u8]) -> ClientError {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);

        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Unauthorized response, clearing session");
                self.session.invalidate().await;
                redirect_to_signin(self.navigator.as_ref());
                return ClientError::Unauthorized { message };
            }
            StatusCode::FORBIDDEN => error!("Access denied: insufficient permissions"),
            StatusCode::NOT_FOUND => error!("Resource not found"),
            StatusCode::INTERNAL_SERVER_ERROR => error!("Internal server error"),
            other => error!(
                status = other.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "API error"
            ),
        }

        ClientError::Http {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NoopNavigator;

    #[test]
    fn test_build_query_skips_empty_values() {
        let query = build_query([
            ("q", Some("sữa".to_string())),
            ("categoryId", None),
            ("searchTerm", Some(String::new())),
            ("page", Some("0".to_string())),
        ]);
        assert_eq!(query, vec![("q", "sữa".to_string()), ("page", "0".to_string())]);
        assert_eq!(query_string(&query), "q=s%E1%BB%AFa&page=0");
    }

    #[test]
    fn test_url_joining() {
        let mut config = ClientConfig::default();
        config.api.base_url = Some("http://localhost:8081/api/".into());
        let client =
            ApiClient::new(&config, SessionContext::in_memory(), Arc::new(NoopNavigator)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8081/api");
        assert_eq!(client.url("/products/5"), "http://localhost:8081/api/products/5");
        assert_eq!(client.url("categories/tree"), "http://localhost:8081/api/categories/tree");
    }
}
