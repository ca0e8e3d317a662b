//! GraphQL gateway in front of the Calendly REST API.
//!
//! Each field on the schema translates into one authenticated call against
//! the upstream API. The gateway holds no state between requests: every
//! inbound request gets its own [`context::RequestContext`] carrying a
//! [`client::CalendlyClient`] bound to the caller's bearer token, and every
//! failure is normalized into a single client-facing error envelope before
//! it is serialized.

pub mod client;
pub mod context;
pub mod error;
pub mod graphql;
pub mod paths;
pub mod server;

pub use client::CalendlyClient;
pub use context::RequestContext;
pub use error::normalize_response;
pub use error::FetchError;
pub use server::build_schema;
pub use server::GatewaySchema;
