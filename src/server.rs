//! Schema construction and the HTTP surface.

use async_graphql::http::GraphiQLSource;
use async_graphql::EmptySubscription;
use async_graphql::Schema;
use async_graphql_axum::GraphQLRequest;
use async_graphql_axum::GraphQLResponse;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use url::Url;

use crate::context::RequestContext;
use crate::error::normalize_response;
use crate::graphql::Mutation;
use crate::graphql::Query;

pub type GatewaySchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the gateway schema. Introspection is always enabled.
pub fn build_schema() -> GatewaySchema {
    Schema::build(Query, Mutation, EmptySubscription).finish()
}

#[derive(Clone)]
pub struct GatewayState {
    pub schema: GatewaySchema,
    pub upstream: Url,
}

/// The axum application: GraphQL on POST `/`, GraphiQL on GET `/`.
pub fn app(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(graphiql).post(graphql_handler))
        .with_state(state)
}

async fn graphql_handler(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let context = RequestContext::from_headers(&headers, &state.upstream);
    let response = state.schema.execute(req.into_inner().data(context)).await;
    normalize_response(response).into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}
