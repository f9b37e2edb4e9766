//! SubRow API client and the request pipeline shared by every resource.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;

/// Path prefix shared by every SubRow API resource.
const API_PREFIX: &str = "api/v1";

/// SubRow API client.
///
/// Holds no per-call state; a single instance may be shared across tasks
/// and cloned freely. Callers own deadlines (e.g. `tokio::time::timeout`)
/// beyond the configured request timeout.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

/// Description of one API call: the resource-relative path plus any query
/// parameters. Built per call, discarded after dispatch. The expected
/// result shape is the type parameter of the verb methods.
pub(crate) struct ClientRequest {
    path: String,
    query_params: BTreeMap<&'static str, String>,
}

impl ClientRequest {
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query_params: BTreeMap::new(),
        }
    }

    pub(crate) fn with_query(mut self, query_params: BTreeMap<&'static str, String>) -> Self {
        self.query_params = query_params;
        self
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }
}

/// Explicit per-field conversion of a list-filter input into query-string
/// pairs. Implementations emit a pair only for fields that carry a value;
/// numbers and booleans are rendered in plain decimal form. Keys are
/// byte-ordered so the encoded query string is deterministic.
pub(crate) trait QueryParams {
    fn query_params(&self) -> BTreeMap<&'static str, String>;
}

/// SubRow API error envelope.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    status: u16,
    error: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error_details: Option<serde_json::Value>,
}

impl Client {
    /// Create a new SubRow client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - SubRow API URL (e.g., `"https://api.subrow.dev"`)
    /// * `api_key` - SubRow API key
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_options(base_url, api_key, ClientOptions::default())
    }

    /// Create a new SubRow client with custom options.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    #[must_use]
    pub fn with_options(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from the `SUBROW_API_URL` and `SUBROW_API_KEY`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if either variable is unset or
    /// empty.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = required_env("SUBROW_API_URL")?;
        let api_key = required_env("SUBROW_API_KEY")?;
        Ok(Self::new(base_url, api_key))
    }

    /// Issue a read. Query parameters are appended to the resource-relative
    /// path. An empty response body is a decode failure: every GET endpoint
    /// returns a payload.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        request: &ClientRequest,
    ) -> Result<T, Error> {
        let body = self.send(Method::GET, request, None).await?;
        decode(&request.path, &body)
    }

    /// Issue a create/action call. The body, when present, is serialized as
    /// the JSON payload. An empty 2xx response yields `Ok(None)`: actions
    /// such as voiding complete asynchronously server-side and may return
    /// nothing.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        request: &ClientRequest,
        body: Option<&B>,
    ) -> Result<Option<T>, Error> {
        let payload = body.map(serde_json::to_value).transpose()?;
        let body = self.send(Method::POST, request, payload).await?;
        if body.is_empty() {
            return Ok(None);
        }
        decode(&request.path, &body).map(Some)
    }

    /// Issue an action call with no payload. Same empty-body tolerance as
    /// [`Client::post`] (download, payment retry, payment URL).
    pub(crate) async fn post_without_body<T: DeserializeOwned>(
        &self,
        request: &ClientRequest,
    ) -> Result<Option<T>, Error> {
        let body = self.send(Method::POST, request, None).await?;
        if body.is_empty() {
            return Ok(None);
        }
        decode(&request.path, &body).map(Some)
    }

    /// Issue an update/transition call. Same empty-body tolerance as
    /// [`Client::post`] for actions like finalize and refresh.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        request: &ClientRequest,
        body: Option<&B>,
    ) -> Result<Option<T>, Error> {
        let payload = body.map(serde_json::to_value).transpose()?;
        let body = self.send(Method::PUT, request, payload).await?;
        if body.is_empty() {
            return Ok(None);
        }
        decode(&request.path, &body).map(Some)
    }

    /// Perform the HTTP exchange and return the raw response body.
    async fn send(
        &self,
        method: Method,
        request: &ClientRequest,
        body: Option<serde_json::Value>,
    ) -> Result<String, Error> {
        let url = format!("{}/{}/{}", self.base_url, API_PREFIX, request.path);

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header("Authorization", format!("Bearer {}", self.api_key));

        if !request.query_params.is_empty() {
            builder = builder.query(&request.query_params);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(
                %method,
                path = %request.path,
                status = status.as_u16(),
                "SubRow API call failed"
            );
            return Err(self.api_error(response).await);
        }

        tracing::debug!(
            %method,
            path = %request.path,
            status = status.as_u16(),
            "SubRow API call succeeded"
        );

        Ok(response.text().await?)
    }

    /// Convert a non-2xx response into a typed API error.
    async fn api_error(&self, response: reqwest::Response) -> Error {
        let status = response.status();

        // Try to parse the error envelope
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let error = if let Some(details) = &api_error.error_details {
                    format!("{} - details: {details}", api_error.error)
                } else {
                    api_error.error
                };
                Error::Api {
                    status: api_error.status,
                    error,
                    code: api_error.code,
                }
            }
            Err(_) => Error::Api {
                status: status.as_u16(),
                error: format!("HTTP {status}"),
                code: None,
            },
        }
    }
}

/// Decode a response body into the result shape declared by the caller.
///
/// Malformed JSON is a serialization failure; well-formed JSON that does
/// not match `T` is an internal contract violation.
fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, Error> {
    let raw: serde_json::Value = serde_json::from_str(body)?;
    serde_json::from_value(raw).map_err(|source| Error::UnexpectedResponseType {
        path: path.to_string(),
        source,
    })
}

fn required_env(name: &str) -> Result<String, Error> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Configuration(format!("{name} is not set"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Envelope {
        message: String,
    }

    #[test]
    fn client_creation() {
        let client = Client::new("https://api.subrow.dev", "test-api-key");
        assert_eq!(client.base_url, "https://api.subrow.dev");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = Client::new("https://api.subrow.dev/", "test-api-key");
        assert_eq!(client.base_url, "https://api.subrow.dev");
    }

    #[test]
    fn client_options() {
        let options = ClientOptions {
            timeout_seconds: 5,
        };
        let client = Client::with_options("https://api.subrow.dev", "key", options);
        assert_eq!(client.base_url, "https://api.subrow.dev");
    }

    #[test]
    fn from_env_requires_both_variables() {
        std::env::remove_var("SUBROW_API_URL");
        std::env::remove_var("SUBROW_API_KEY");
        assert!(matches!(
            Client::from_env(),
            Err(Error::Configuration(_))
        ));

        std::env::set_var("SUBROW_API_URL", "https://api.subrow.dev");
        assert!(matches!(
            Client::from_env(),
            Err(Error::Configuration(_))
        ));

        std::env::set_var("SUBROW_API_KEY", "test-api-key");
        let client = Client::from_env().unwrap();
        assert_eq!(client.base_url, "https://api.subrow.dev");

        std::env::remove_var("SUBROW_API_URL");
        std::env::remove_var("SUBROW_API_KEY");
    }

    #[test]
    fn decode_reports_shape_mismatch_distinctly() {
        let err = decode::<Envelope>("health", r#"{"unexpected": 1}"#).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponseType { ref path, .. } if path == "health"));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn decode_reports_malformed_json_as_serialization() {
        let err = decode::<Envelope>("health", "not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn decode_accepts_matching_shape() {
        let envelope: Envelope = decode("health", r#"{"message": "ok"}"#).unwrap();
        assert_eq!(envelope.message, "ok");
    }
}
