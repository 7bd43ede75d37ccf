//! HTTP client for the Freshdesk v2 REST API.
//!
//! This module provides the `FreshdeskClient` struct. Resource operations
//! live in the submodules (`tickets`, `contacts`, `companies`, `groups`,
//! `custom_objects`); all of them go through the executor defined here.
//!
//! # Request execution
//!
//! Every operation declares the status codes it accepts. A response with any
//! other status becomes [`FreshdeskError::Api`] carrying the raw body; a
//! failed send becomes [`FreshdeskError::Transport`]. Nothing is retried.
//!
//! # Security
//!
//! The Authorization header is built once at construction and marked
//! sensitive so it is never printed by `Debug` output.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, LINK};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::FreshdeskError;
use crate::rate_limit::TokenBucket;

mod companies;
mod contacts;
mod custom_objects;
mod groups;
mod tickets;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const OK: &[StatusCode] = &[StatusCode::OK];
const CREATED: &[StatusCode] = &[StatusCode::CREATED];
const OK_OR_CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
const NO_CONTENT: &[StatusCode] = &[StatusCode::NO_CONTENT];

/// HTTP client for the Freshdesk API.
///
/// Holds the base URL, the pre-computed Basic auth header and the shared
/// rate limiter. Cloning is cheap and clones share the limiter, so one
/// budget applies to every clone of a client while separately constructed
/// clients stay independent.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = FreshdeskClient::new(&config)?;
///
/// let ticket = client.get_ticket(42).await?;
/// let contact = client.find_contact_by_email("jane@example.com").await?;
/// ```
#[derive(Clone)]
pub struct FreshdeskClient {
    /// The underlying HTTP client, carrying the Authorization header.
    http: Client,

    /// Base URL of the helpdesk without the `/api/v2` suffix.
    base_url: String,

    /// Limiter consulted by the company ticket listing.
    limiter: Arc<TokenBucket>,
}

impl std::fmt::Debug for FreshdeskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshdeskClient")
            .field("base_url", &self.base_url)
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}

impl FreshdeskClient {
    /// Creates a new client from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL, credentials and request budget
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if the credentials cannot form a
    /// header value, or `FreshdeskError::HttpClient` if the HTTP client fails
    /// to initialize.
    pub fn new(config: &Config) -> Result<Self, FreshdeskError> {
        Self::with_timeout(config, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    fn with_timeout(config: &Config, timeout: Duration) -> Result<Self, FreshdeskError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            Self::basic_auth_value(&config.user, config.password())?,
        );

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(FreshdeskError::HttpClient)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            limiter: Arc::new(TokenBucket::per_minute(config.max_requests_per_minute)),
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn basic_auth_value(user: &str, password: &str) -> Result<HeaderValue, FreshdeskError> {
        let encoded = STANDARD.encode(format!("{}:{}", user, password));
        let mut value = HeaderValue::from_str(&format!("Basic {}", encoded)).map_err(|_| {
            FreshdeskError::invalid_config("credentials cannot be sent as a header value")
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Tests connectivity to the helpdesk.
    ///
    /// Fetches a single ticket to verify the server is reachable and the
    /// credentials are accepted.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::ConnectionTest` with a hint about the likely
    /// cause.
    pub async fn test_connection(&self) -> Result<(), FreshdeskError> {
        tracing::debug!("Testing connection to Freshdesk");

        let result = self
            .get::<Vec<serde_json::Value>>("/api/v2/tickets?per_page=1&page=1")
            .await;

        match result {
            Ok(_) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Err(FreshdeskError::Api { status, .. })
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                Err(FreshdeskError::connection_test(
                    "Authentication failed - verify FRESHDESK_USER and FRESHDESK_PASSWORD",
                ))
            }
            Err(FreshdeskError::Transport(e)) if e.is_timeout() => {
                Err(FreshdeskError::connection_test(format!(
                    "Connection timed out after {}s - verify FRESHDESK_BASE_URL is correct and the server is reachable",
                    DEFAULT_TIMEOUT_SECS
                )))
            }
            Err(FreshdeskError::Transport(e)) => Err(FreshdeskError::connection_test(format!(
                "HTTP error: {} - verify FRESHDESK_BASE_URL is correct",
                e
            ))),
            Err(e) => Err(FreshdeskError::connection_test(e.to_string())),
        }
    }

    /// Sends a raw body with one extra header via PUT.
    ///
    /// Escape hatch for endpoints without a typed operation. The body is
    /// sent as-is and the response body is returned undecoded.
    ///
    /// # Arguments
    ///
    /// * `header` - Extra header as `(name, value)`, e.g. a content type
    /// * `body` - Raw request body
    /// * `path` - Path relative to the base URL, including `/api/v2`
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Api` unless the server answers 200.
    pub async fn put_custom_data(
        &self,
        header: (&str, &str),
        body: impl Into<String>,
        path: &str,
    ) -> Result<(String, StatusCode), FreshdeskError> {
        let (name, value) = header;
        let request = self
            .request_builder(Method::PUT, path)
            .header(name, value)
            .body(body.into());

        let response = self.send(request, &Method::PUT, path, OK).await?;
        let status = response.status();
        let body = response.text().await.map_err(FreshdeskError::Transport)?;

        Ok((body, status))
    }

    fn request_builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends a request and checks its status against `expected`.
    ///
    /// On an unexpected status the body is read and returned verbatim inside
    /// `FreshdeskError::Api`.
    async fn send(
        &self,
        request: RequestBuilder,
        method: &Method,
        path: &str,
        expected: &[StatusCode],
    ) -> Result<Response, FreshdeskError> {
        tracing::debug!(
            method = %method,
            path = %path,
            "Making Freshdesk API request"
        );

        let response = request.send().await.map_err(FreshdeskError::Transport)?;
        let status = response.status();

        if !expected.contains(&status) {
            let body = response.text().await.map_err(FreshdeskError::Transport)?;
            tracing::debug!(status = %status, path = %path, "Unexpected status from Freshdesk");
            return Err(FreshdeskError::api(status, body));
        }

        Ok(response)
    }

    /// Reads and decodes a JSON response body.
    async fn decode<T>(response: Response) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
    {
        let body = response.text().await.map_err(FreshdeskError::Transport)?;

        tracing::trace!(body = %body, "Freshdesk API response");

        Ok(serde_json::from_str(&body)?)
    }

    /// Executes one JSON request and decodes the response.
    async fn execute<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expected: &[StatusCode],
    ) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.request_builder(method.clone(), path);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = self.send(request, &method, path, expected).await?;
        Self::decode(response).await
    }

    async fn get<T>(&self, path: &str) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
    {
        self.execute::<T, ()>(Method::GET, path, None, OK).await
    }

    async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        expected: &[StatusCode],
    ) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, Some(body), expected).await
    }

    async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, FreshdeskError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, Some(body), OK).await
    }

    /// Issues a DELETE expecting 204; the empty body is not decoded.
    async fn delete(&self, path: &str) -> Result<(), FreshdeskError> {
        let request = self.request_builder(Method::DELETE, path);
        self.send(request, &Method::DELETE, path, NO_CONTENT).await?;
        Ok(())
    }

    /// Fetches every page of a list endpoint by following `Link` headers.
    ///
    /// Records are concatenated in server order. The loop stops when a page
    /// has no `Link` header or the header points at another resource. Any
    /// failed page aborts the whole listing.
    async fn get_all_pages<T>(&self, endpoint: &str) -> Result<Vec<T>, FreshdeskError>
    where
        T: DeserializeOwned,
    {
        let mut all = Vec::new();
        let mut page_suffix = String::new();

        loop {
            let path = format!("{}{}", endpoint, page_suffix);
            let request = self.request_builder(Method::GET, &path);
            let response = self.send(request, &Method::GET, &path, OK).await?;

            let link = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            let page: Vec<T> = Self::decode(response).await?;
            tracing::debug!(endpoint = %endpoint, records = page.len(), "Fetched page");
            all.extend(page);

            match link.as_deref().and_then(|l| next_page_suffix(l, endpoint)) {
                Some(next) => page_suffix = next,
                None => break,
            }
        }

        Ok(all)
    }
}

/// Extracts the next page's query string from a `Link` header.
///
/// `<https://acme.freshdesk.com/api/v2/contacts?page=2>; rel="next"` yields
/// `?page=2` for the `/api/v2/contacts` endpoint. Only the entry with
/// `rel="next"` is considered. Returns `None` when there is no such entry,
/// its URL path is not `endpoint`, or the header is malformed.
pub(crate) fn next_page_suffix(link: &str, endpoint: &str) -> Option<String> {
    let target = link.split(',').find_map(|entry| {
        let (target, params) = entry.trim().strip_prefix('<')?.split_once('>')?;
        params
            .split(';')
            .any(is_rel_next)
            .then_some(target)
    })?;

    let (url_path, query) = target.split_once('?')?;
    if !url_path.ends_with(endpoint) {
        return None;
    }
    Some(format!("?{}", query))
}

fn is_rel_next(param: &str) -> bool {
    match param.trim().split_once('=') {
        Some((name, value)) if name.trim().eq_ignore_ascii_case("rel") => value
            .trim()
            .trim_matches('"')
            .split_whitespace()
            .any(|rel| rel.eq_ignore_ascii_case("next")),
        _ => false,
    }
}

#[cfg(test)]
impl FreshdeskClient {
    /// Builds a client pointed at a mock server with `user:pass` credentials.
    pub(crate) fn for_tests(base_url: &str) -> Self {
        let config = Config::new(base_url, "user", "pass", 600).unwrap();
        Self::new(&config).unwrap()
    }

    /// Like [`FreshdeskClient::for_tests`] with a shorter request timeout.
    pub(crate) fn for_tests_with_timeout(base_url: &str, timeout: Duration) -> Self {
        let config = Config::new(base_url, "user", "pass", 600).unwrap();
        Self::with_timeout(&config, timeout).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_next_page_suffix() {
        assert_eq!(
            next_page_suffix(
                r#"<https://acme.freshdesk.com/api/v2/contacts?page=2>; rel="next""#,
                "/api/v2/contacts"
            ),
            Some("?page=2".to_string())
        );
        assert_eq!(
            next_page_suffix(
                r#"<https://acme.freshdesk.com/api/v2/contacts?per_page=100&page=3>; rel="next""#,
                "/api/v2/contacts"
            )
            .as_deref(),
            Some("?per_page=100&page=3")
        );
    }

    #[test]
    fn test_next_page_suffix_rejects_foreign_or_malformed_links() {
        assert_eq!(
            next_page_suffix(
                r#"<https://acme.freshdesk.com/api/v2/companies?page=2>; rel="next""#,
                "/api/v2/contacts"
            ),
            None
        );
        assert_eq!(
            next_page_suffix("<https://acme.freshdesk.com/api/v2/contacts>", "/api/v2/contacts"),
            None
        );
        assert_eq!(
            next_page_suffix("https://acme.freshdesk.com/api/v2/contacts?page=2", "/api/v2/contacts"),
            None
        );
        assert_eq!(
            next_page_suffix(
                r#"<https://acme.freshdesk.com/api/v2/contacts_archive?page=2>; rel="next""#,
                "/api/v2/contacts"
            ),
            None
        );
    }

    #[test]
    fn test_next_page_suffix_follows_only_rel_next() {
        assert_eq!(
            next_page_suffix(
                r#"<https://acme.freshdesk.com/api/v2/contacts?page=1>; rel="prev", <https://acme.freshdesk.com/api/v2/contacts?page=3>; rel="next""#,
                "/api/v2/contacts"
            )
            .as_deref(),
            Some("?page=3")
        );
        assert_eq!(
            next_page_suffix(
                r#"<https://acme.freshdesk.com/api/v2/contacts?page=1>; rel="prev""#,
                "/api/v2/contacts"
            ),
            None
        );
        assert_eq!(
            next_page_suffix(
                r#"<https://acme.freshdesk.com/api/v2/contacts?page=9>; rel="last""#,
                "/api/v2/contacts"
            ),
            None
        );
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = FreshdeskClient::for_tests("https://acme.freshdesk.com");
        let debug = format!("{:?}", client);
        assert!(debug.contains("acme.freshdesk.com"));
        assert!(!debug.contains("dXNlcjpwYXNz"));
    }

    #[tokio::test]
    async fn test_requests_carry_basic_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/tickets"))
            .and(header("Authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        assert!(client.test_connection().await.is_ok());
    }

    #[tokio::test]
    async fn test_unexpected_status_keeps_body_verbatim() {
        let mock_server = MockServer::start().await;
        let body = r#"{"description":"Validation failed","errors":[{"field":"x","code":"missing_field"}]}"#;

        Mock::given(method("GET"))
            .and(path("/api/v2/tickets/1"))
            .respond_with(ResponseTemplate::new(400).set_body_string(body))
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let err = client.get_ticket(1).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.message(), Some(body));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Port 1 is reserved and nothing listens there.
        let client = FreshdeskClient::for_tests("http://127.0.0.1:1");
        let err = client.get_ticket(1).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_connection_maps_auth_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/tickets"))
            .and(query_param("per_page", "1"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"code":"invalid_credentials"}"#))
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let err = client.test_connection().await.unwrap_err();

        assert!(matches!(err, FreshdeskError::ConnectionTest { .. }));
        assert!(err.to_string().contains("Authentication failed"));
    }

    #[tokio::test]
    async fn test_put_custom_data_returns_raw_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/v2/settings/helpdesk"))
            .and(header("X-Custom", "yes"))
            .and(body_string("primary_language=en"))
            .respond_with(ResponseTemplate::new(200).set_body_string("saved"))
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let (body, status) = client
            .put_custom_data(("X-Custom", "yes"), "primary_language=en", "/api/v2/settings/helpdesk")
            .await
            .unwrap();

        assert_eq!(body, "saved");
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_put_custom_data_rejects_non_200() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(202).set_body_string("queued"))
            .mount(&mock_server)
            .await;

        let client = FreshdeskClient::for_tests(&mock_server.uri());
        let err = client
            .put_custom_data(("Content-Type", "text/plain"), "x", "/api/v2/anything")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::ACCEPTED));
        assert_eq!(err.message(), Some("queued"));
    }
}
