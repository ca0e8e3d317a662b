//! Authenticated HTTP client for the upstream Calendly API.

use reqwest::header::HeaderValue;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::FetchError;

/// A client for the upstream REST API, bound to a single bearer credential.
///
/// One client is constructed per inbound request and dropped when the
/// request completes. Every call is a single attempt: no retries, no
/// caching, no timeout override beyond the transport default.
#[derive(Debug, Clone)]
pub struct CalendlyClient {
    base: Url,
    auth: HeaderValue,
    http: reqwest::Client,
}

impl CalendlyClient {
    /// Construct a client from a base URL and a bearer token.
    ///
    /// The authorization header value is derived once here and attached to
    /// every outgoing request. A token that cannot form a valid header
    /// value degrades to the empty credential, which the upstream rejects.
    pub fn new(base: Url, token: &str) -> Self {
        let mut auth = HeaderValue::try_from(format!("Bearer {token}"))
            .unwrap_or_else(|_| HeaderValue::from_static("Bearer"));
        auth.set_sensitive(true);

        CalendlyClient {
            base,
            auth,
            http: reqwest::Client::new(),
        }
    }

    /// GET `path` with `params` as the query string and parse the JSON body.
    pub async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, FetchError> {
        let url = self.url_for(path)?;
        tracing::debug!("making upstream request: GET {}", url);
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.auth.clone())
            .query(params)
            .send()
            .await
            .map_err(FetchError::transport)?;

        Self::json_body(Self::check_status(response).await?).await
    }

    /// POST `payload` as a JSON body to `path` and parse the JSON body.
    pub async fn post<B>(&self, path: &str, payload: &B) -> Result<Value, FetchError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path)?;
        tracing::debug!("making upstream request: POST {}", url);
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.auth.clone())
            .json(payload)
            .send()
            .await
            .map_err(FetchError::transport)?;

        Self::json_body(Self::check_status(response).await?).await
    }

    /// DELETE the resource at `path`. The response body, if any, is
    /// discarded; callers translate success into their own result shape.
    pub async fn delete(&self, path: &str) -> Result<(), FetchError> {
        let url = self.url_for(path)?;
        tracing::debug!("making upstream request: DELETE {}", url);
        let response = self
            .http
            .delete(url)
            .header(AUTHORIZATION, self.auth.clone())
            .send()
            .await
            .map_err(FetchError::transport)?;

        Self::check_status(response).await.map(|_| ())
    }

    // Resource paths are relative to the base URL. The nested-relation
    // resolvers pass the parent's absolute canonical URI, which joins to
    // itself.
    fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|err| FetchError::MalformedRequest {
                reason: err.to_string(),
            })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(FetchError::Upstream {
            status: status.as_u16(),
            body: response.json::<Value>().await.ok(),
        })
    }

    async fn json_body(response: reqwest::Response) -> Result<Value, FetchError> {
        response
            .json()
            .await
            .map_err(|err| FetchError::MalformedResponse {
                reason: err.to_string(),
            })
    }
}

/// Builder for the query parameters forwarded to upstream list endpoints.
///
/// Absent arguments are omitted entirely rather than serialized as empty
/// values.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<T: ToString>(mut self, name: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.0.push((name, value.to_string()));
        }
        self
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }
}
