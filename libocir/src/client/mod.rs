//! HTTP client for the OCI Artifacts API.
//!
//! This module provides a thin blocking client built on reqwest for the
//! container registry endpoints of the Artifacts service. List operations
//! follow `opc-next-page` pagination to the end; nothing is retried.

use crate::auth::Credentials;
use crate::config::Config;
use crate::error::{OcirError, Result};
use crate::model::{CompartmentId, Image, ImageId, Repository, RepositoryId};
use crate::registry::RegistryApi;
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, RETRY_AFTER};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;


/// Response header carrying the token of the next page.
const NEXT_PAGE_HEADER: &str = "opc-next-page";

/// Collection envelope returned by the list endpoints.
#[derive(Debug, Deserialize)]
struct Collection<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libocir::client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_timeout(60)
///     .with_max_idle_per_host(4);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// Maximum idle connections per host (default: 10)
    pub max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_idle_per_host: 10,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the maximum idle connections per host.
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }
}

/// Blocking client for the container endpoints of the Artifacts API.
#[derive(Debug, Clone)]
pub struct ArtifactsClient {
    /// The underlying HTTP client
    http_client: HttpClient,
    /// API base URL, e.g. `https://artifacts.eu-frankfurt-1.oci.oraclecloud.com/20160918`
    base_url: String,
    /// Credentials sent with every request
    credentials: Credentials,
    /// Timeout used for error messages
    timeout_seconds: u64,
}

impl ArtifactsClient {
    /// Creates a new client for the given API base URL with default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libocir::{ArtifactsClient, Credentials};
    ///
    /// let client = ArtifactsClient::new(
    ///     "artifacts.eu-frankfurt-1.oci.oraclecloud.com/20160918",
    ///     Credentials::bearer("token"),
    /// )
    /// .unwrap();
    /// assert!(client.base_url().starts_with("https://"));
    /// ```
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        Self::with_config(base_url, credentials, ClientConfig::default())
    }

    /// Creates a new client with custom configuration.
    pub fn with_config(
        base_url: &str,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        let normalized_url = Self::normalize_url(base_url)?;

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| OcirError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            base_url: normalized_url,
            credentials,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Creates a client from a loaded profile.
    ///
    /// Fails with a configuration error when the profile lacks a registry
    /// location or credentials.
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let credentials = config.credentials()?;
        let client_config = ClientConfig::new().with_timeout(config.network.timeout);

        Self::with_config(&endpoint, credentials, client_config)
    }

    /// Normalizes a base URL by ensuring it has a scheme and removing trailing slashes.
    fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();

        if url.is_empty() {
            return Err(OcirError::validation("Registry endpoint cannot be empty"));
        }

        let url = if !url.starts_with("http://") && !url.starts_with("https://") {
            format!("https://{}", url)
        } else {
            url.to_string()
        };

        Ok(url.trim_end_matches('/').to_string())
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches every page of a collection endpoint.
    fn fetch_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        let mut all_items = Vec::new();
        let mut page: Option<String> = None;

        loop {
            let mut request = self.http_client.get(&url).query(query);
            if let Some(token) = &page {
                request = request.query(&[("page", token.as_str())]);
            }

            tracing::trace!(url = %url, page = ?page, "listing {}", what);
            let response = self.send(request)?;

            // Extract the next page token before consuming the response
            let next_page = Self::extract_next_page(response.headers());

            let response = Self::check_response_status(response)?;
            let collection: Collection<T> = response.json().map_err(|e| {
                OcirError::validation_with_source(format!("Failed to parse {} response", what), e)
            })?;
            all_items.extend(collection.items);

            match next_page {
                Some(token) if page.as_deref() == Some(token.as_str()) => {
                    return Err(OcirError::validation(format!(
                        "Registry returned the same page token '{}' twice while listing {}",
                        token, what
                    )));
                }
                Some(token) => page = Some(token),
                None => break,
            }
        }

        Ok(all_items)
    }

    /// Sends a request with the Authorization header attached.
    fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .header(AUTHORIZATION, self.credentials.to_header_value())
            .send()
            .map_err(|e| self.translate_reqwest_error(e))
    }

    fn extract_next_page(headers: &HeaderMap) -> Option<String> {
        headers
            .get(NEXT_PAGE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Parses a `Retry-After` header given in seconds.
    fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
        headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    /// Translates a reqwest error into an OcirError.
    fn translate_reqwest_error(&self, error: reqwest::Error) -> OcirError {
        if error.is_timeout() {
            OcirError::network(format!(
                "Request to {} timed out after {} seconds",
                self.base_url, self.timeout_seconds
            ))
        } else if error.is_connect() {
            OcirError::network_with_source(
                format!("Failed to connect to registry at {}", self.base_url),
                error,
            )
        } else {
            OcirError::network_with_source(
                format!("Network error communicating with {}", self.base_url),
                error,
            )
        }
    }

    /// Checks the HTTP response status and translates errors to OcirError.
    fn check_response_status(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let retry_after = Self::parse_retry_after(response.headers());
        let error_body = response
            .text()
            .unwrap_or_else(|_| String::from("(unable to read response body)"));

        match status {
            StatusCode::UNAUTHORIZED => Err(OcirError::authentication(
                format!("Not authenticated for {}: {}", url, error_body),
                Some(401),
            )),
            StatusCode::FORBIDDEN => Err(OcirError::authentication(
                format!("Access forbidden for {}: {}", url, error_body),
                Some(403),
            )),
            StatusCode::NOT_FOUND => Err(OcirError::not_found("endpoint", url)),
            StatusCode::TOO_MANY_REQUESTS => Err(OcirError::rate_limit(
                format!("Rate limit exceeded for {}", url),
                retry_after,
            )),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => Err(OcirError::server(
                format!("Server error from {}: {}", url, error_body),
                status.as_u16(),
            )),
            _ => Err(OcirError::network(format!(
                "HTTP {} from {}: {}",
                status.as_u16(),
                url,
                error_body
            ))),
        }
    }
}

impl RegistryApi for ArtifactsClient {
    fn list_repositories(
        &self,
        compartment_id: &CompartmentId,
        display_name: Option<&str>,
    ) -> Result<Vec<Repository>> {
        let mut query = vec![("compartmentId", compartment_id.as_str())];
        if let Some(name) = display_name {
            query.push(("displayName", name));
        }

        self.fetch_all("/container/repositories", &query, "repositories")
    }

    fn get_repository(&self, repository_id: &RepositoryId) -> Result<Repository> {
        let url = format!("{}/container/repositories/{}", self.base_url, repository_id);
        let response = self.send(self.http_client.get(&url))?;

        let response = Self::check_response_status(response).map_err(|e| {
            if e.is_not_found() {
                OcirError::not_found("repository", repository_id.as_str())
            } else {
                e
            }
        })?;

        response.json().map_err(|e| {
            OcirError::validation_with_source("Failed to parse repository response", e)
        })
    }

    fn list_images(
        &self,
        repository_id: &RepositoryId,
        compartment_id: &CompartmentId,
    ) -> Result<Vec<Image>> {
        let query = [
            ("compartmentId", compartment_id.as_str()),
            ("repositoryId", repository_id.as_str()),
            ("sortBy", "TIMECREATED"),
            ("sortOrder", "DESC"),
        ];

        self.fetch_all("/container/images", &query, "images")
    }

    fn delete_image(&self, image_id: &ImageId) -> Result<()> {
        let url = format!("{}/container/images/{}", self.base_url, image_id);
        let response = self.send(self.http_client.delete(&url))?;

        Self::check_response_status(response).map_err(|e| {
            if e.is_not_found() {
                OcirError::not_found("image", image_id.as_str())
            } else {
                e
            }
        })?;

        Ok(())
    }
}
