//! Per-request context construction.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use url::Url;

use crate::client::CalendlyClient;

/// The per-request bundle of dependencies available to every resolver.
///
/// One context is built for every inbound request, even from the same
/// caller, and dropped when the request completes. Two requests never
/// share a client, so one caller's credential can never bleed into
/// another caller's upstream calls.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The upstream client bound to the caller's credential.
    pub calendly: CalendlyClient,
}

impl RequestContext {
    pub fn new(upstream: Url, token: &str) -> Self {
        RequestContext {
            calendly: CalendlyClient::new(upstream, token),
        }
    }

    /// Build a fresh context from the inbound request headers.
    pub fn from_headers(headers: &HeaderMap, upstream: &Url) -> Self {
        RequestContext::new(upstream.clone(), bearer_token(headers))
    }
}

/// Extract the caller's bearer token from the authorization header.
///
/// A literal `"Bearer "` prefix is stripped; any other value is used raw.
/// An absent or non-UTF-8 header yields the empty credential, which the
/// upstream rejects on its side.
fn bearer_token(headers: &HeaderMap) -> &str {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    raw.strip_prefix("Bearer ").unwrap_or(raw)
}
