//! Error taxonomy and the client-facing error envelope.
//!
//! Note that [`FetchError`] values are not returned to clients directly;
//! they are rewritten into a GraphQL error whose only extension is
//! `errorDetails`. Upstream status codes and raw upstream error shapes
//! never leave the gateway.

use async_graphql::ErrorExtensions;
use serde_json::Value;
use thiserror::Error;

/// Error types for upstream calls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The upstream API returned a non-2xx status.
    #[error("upstream request failed with status {status}")]
    Upstream {
        /// The upstream HTTP status code.
        status: u16,

        /// The upstream error payload, when it parsed as JSON.
        body: Option<Value>,
    },

    /// The upstream call could not complete.
    #[error("upstream request could not complete: {reason}")]
    Transport {
        /// The reason the call failed.
        reason: String,
    },

    /// The request could not be constructed.
    #[error("upstream request was malformed: {reason}")]
    MalformedRequest {
        /// The reason request construction failed.
        reason: String,
    },

    /// The upstream response body could not be parsed.
    #[error("upstream response was malformed: {reason}")]
    MalformedResponse {
        /// The reason parsing failed.
        reason: String,
    },
}

impl FetchError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        FetchError::Transport {
            reason: err.to_string(),
        }
    }

    /// Convert the fetch error to the client-facing error envelope.
    ///
    /// An upstream error payload contributes its `message` and `details`
    /// fields; every other variant falls back to the error's own display
    /// string and an empty details list. An empty upstream message or a
    /// `details` value that is not an array falls back the same way, so
    /// the envelope message is never empty and `errorDetails` is never
    /// null.
    pub fn to_graphql_error(&self) -> async_graphql::Error {
        let (message, details) = match self {
            FetchError::Upstream {
                body: Some(body), ..
            } => (
                body.get("message")
                    .and_then(Value::as_str)
                    .filter(|message| !message.is_empty())
                    .map(str::to_owned),
                body.get("details").filter(|details| details.is_array()).cloned(),
            ),
            _ => (None, None),
        };

        let message = message.unwrap_or_else(|| self.to_string());
        let details = async_graphql::Value::from_json(details.unwrap_or_else(|| Value::Array(Vec::new())))
            .unwrap_or_else(|_| async_graphql::Value::List(Vec::new()));

        async_graphql::Error::new(message).extend_with(|_, ext| ext.set("errorDetails", details))
    }
}

impl ErrorExtensions for FetchError {
    fn extend(&self) -> async_graphql::Error {
        self.to_graphql_error()
    }
}

/// Rewrite every error in an execution result into the envelope shape.
///
/// Errors produced by resolvers already carry their `errorDetails`
/// extension; anything else (engine-side validation errors included) gets
/// an empty details list. Running this twice yields the same response.
pub fn normalize_response(mut response: async_graphql::Response) -> async_graphql::Response {
    for error in &mut response.errors {
        let extensions = error.extensions.get_or_insert_with(Default::default);
        if extensions.get("errorDetails").is_none() {
            extensions.set("errorDetails", async_graphql::Value::List(Vec::new()));
        }
    }
    response
}
