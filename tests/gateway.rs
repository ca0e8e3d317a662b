//! End-to-end tests: GraphQL operations executed against the gateway schema
//! with a mock upstream standing in for the Calendly API.

use async_graphql::Request;
use calendly_gateway::build_schema;
use calendly_gateway::normalize_response;
use calendly_gateway::RequestContext;
use serde_json::json;
use serde_json::Value;
use url::Url;
use wiremock::matchers::body_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

async fn execute_as(server: &MockServer, token: &str, operation: &str) -> async_graphql::Response {
    let schema = build_schema();
    let upstream = Url::parse(&server.uri()).expect("mock server uri");
    let context = RequestContext::new(upstream, token);
    normalize_response(schema.execute(Request::new(operation).data(context)).await)
}

async fn execute(server: &MockServer, operation: &str) -> async_graphql::Response {
    execute_as(server, "test-token", operation).await
}

fn data(response: &async_graphql::Response) -> Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.clone().into_json().expect("data is json")
}

fn error_details(response: &async_graphql::Response) -> Value {
    response.errors[0]
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("errorDetails"))
        .cloned()
        .expect("errorDetails extension present")
        .into_json()
        .expect("errorDetails is json")
}

#[tokio::test]
async fn scheduled_events_forwards_filters_and_returns_the_array_unmodified() {
    let server = MockServer::start().await;
    let upstream_body = json!([
        {"uri": "https://api.calendly.com/scheduled_events/abc", "name": "Demo"},
        {"uri": "https://api.calendly.com/scheduled_events/ghi", "name": "Retro"},
    ]);
    Mock::given(method("GET"))
        .and(path("/scheduled_events"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&upstream_body))
        .expect(1)
        .mount(&server)
        .await;

    let response = execute(&server, "{ scheduledEvents(count: 10) }").await;
    assert_eq!(data(&response), json!({ "scheduledEvents": upstream_body }));

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("count=10"));
}

#[tokio::test]
async fn path_identifiers_never_reach_the_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scheduled_events/abc/invitees/def"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "x@example.com"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = execute(
        &server,
        r#"{ scheduledEventInvitee(event_uuid: "abc", invitee_uuid: "def") }"#,
    )
    .await;
    assert_eq!(
        data(&response),
        json!({ "scheduledEventInvitee": {"email": "x@example.com"} })
    );

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests[0].url.path(), "/scheduled_events/abc/invitees/def");
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn list_arguments_forward_without_the_path_identifier() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/o1/invitations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    execute(
        &server,
        r#"{ organizationInvitations(organization_uuid: "o1", count: 5) }"#,
    )
    .await;

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests[0].url.query(), Some("count=5"));
}

#[tokio::test]
async fn create_scheduling_link_posts_the_exact_input_body() {
    let server = MockServer::start().await;
    let created = json!({
        "booking_url": "https://calendly.com/s/link",
        "owner": "X",
        "owner_type": "EventType",
    });
    Mock::given(method("POST"))
        .and(path("/scheduling_links"))
        .and(body_json(json!({
            "max_event_count": 1,
            "owner": "X",
            "owner_type": "EventType",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .expect(1)
        .mount(&server)
        .await;

    let response = execute(
        &server,
        r#"mutation {
            createSchedulingLink(input: {max_event_count: 1, owner: "X", owner_type: "EventType"})
        }"#,
    )
    .await;

    assert_eq!(data(&response), json!({ "createSchedulingLink": created }));
}

#[tokio::test]
async fn create_webhook_subscription_aliases_the_scheduling_links_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scheduling_links"))
        .and(body_json(json!({
            "max_event_count": 1,
            "owner": "X",
            "owner_type": "EventType",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"owner": "X"})))
        .expect(2)
        .mount(&server)
        .await;

    for mutation in [
        r#"mutation { createSchedulingLink(input: {max_event_count: 1, owner: "X", owner_type: "EventType"}) }"#,
        r#"mutation { createWebhookSubscription(input: {max_event_count: 1, owner: "X", owner_type: "EventType"}) }"#,
    ] {
        let response = execute(&server, mutation).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
    }
}

#[tokio::test]
async fn create_organization_invitation_posts_to_the_organization_resource() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/organizations/o1"))
        .and(body_json(json!({"email": "new@example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"status": "pending"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = execute(
        &server,
        r#"mutation {
            createOrganizationInvitation(organization_uuid: "o1", input: {email: "new@example.com"})
        }"#,
    )
    .await;

    assert_eq!(
        data(&response),
        json!({ "createOrganizationInvitation": {"status": "pending"} })
    );
}

#[tokio::test]
async fn request_invitee_data_deletion_posts_the_email_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/data_compliance/deletion/invitees"))
        .and(body_json(json!({"emails": ["gone@example.com"]})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"emails": ["gone@example.com"]})))
        .expect(1)
        .mount(&server)
        .await;

    let response = execute(
        &server,
        r#"mutation { requestInviteeDataDeletion(emails: ["gone@example.com"]) }"#,
    )
    .await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
}

#[tokio::test]
async fn successful_delete_yields_exactly_true() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/webhook_subscriptions/w1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = execute(
        &server,
        r#"mutation { deleteWebhookSubscription(webhook_subscription_uuid: "w1") }"#,
    )
    .await;
    assert_eq!(
        data(&response),
        json!({ "deleteWebhookSubscription": true })
    );
}

#[tokio::test]
async fn failing_delete_propagates_as_an_error_never_as_false() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/organization_memberships/m1"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Permission denied"})),
        )
        .mount(&server)
        .await;

    let response = execute(
        &server,
        r#"mutation { removeUserFromOrganization(organization_membership_uuid: "m1") }"#,
    )
    .await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "Permission denied");
    assert_eq!(
        response.data.clone().into_json().expect("data is json"),
        Value::Null
    );
}

#[tokio::test]
async fn revoke_invitation_deletes_the_identified_resource() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/organizations/o1/invitations/i1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = execute(
        &server,
        r#"mutation { revokeOrganizationInvitation(organization_uuid: "o1", invitation_uuid: "i1") }"#,
    )
    .await;
    assert_eq!(
        data(&response),
        json!({ "revokeOrganizationInvitation": true })
    );
}

#[tokio::test]
async fn upstream_error_payloads_become_the_client_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not found",
            "details": [{"parameter": "uuid", "message": "invalid"}],
        })))
        .mount(&server)
        .await;

    let response = execute(&server, r#"{ user(uuid: "nope") }"#).await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "Not found");
    assert_eq!(
        error_details(&response),
        json!([{"parameter": "uuid", "message": "invalid"}])
    );
}

#[tokio::test]
async fn unparseable_error_bodies_fall_back_to_the_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let response = execute(&server, "{ usersMe }").await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(
        response.errors[0].message,
        "upstream request failed with status 500"
    );
    assert_eq!(error_details(&response), json!([]));
}

#[tokio::test]
async fn engine_errors_also_get_the_envelope_shape() {
    let server = MockServer::start().await;

    let response = execute(&server, "{ noSuchField }").await;

    assert!(!response.errors.is_empty());
    assert_eq!(error_details(&response), json!([]));
}

#[tokio::test]
async fn repeated_fields_issue_independent_upstream_calls() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "jane"})))
        .expect(2)
        .mount(&server)
        .await;

    execute(&server, "{ usersMe }").await;
    execute(&server, "{ usersMe }").await;

    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn each_request_carries_its_own_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer token-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "a"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer token-b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "b"})))
        .expect(1)
        .mount(&server)
        .await;

    let first = execute_as(&server, "token-a", "{ usersMe }").await;
    let second = execute_as(&server, "token-b", "{ usersMe }").await;

    assert_eq!(data(&first), json!({ "usersMe": {"name": "a"} }));
    assert_eq!(data(&second), json!({ "usersMe": {"name": "b"} }));
}

#[tokio::test]
async fn nested_invitees_resolve_from_the_parent_canonical_uri() {
    let server = MockServer::start().await;
    let event_uri = format!("{}/scheduled_events/abc", server.uri());
    Mock::given(method("GET"))
        .and(path("/scheduled_events/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uri": event_uri,
            "name": "Demo",
            "status": "active",
        })))
        .expect(1)
        .mount(&server)
        .await;
    let invitees = json!([{"email": "x@example.com"}]);
    Mock::given(method("GET"))
        .and(path("/scheduled_events/abc/invitees"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&invitees))
        .expect(1)
        .mount(&server)
        .await;

    let response = execute(
        &server,
        r#"{ scheduledEvent(uuid: "abc") { uri name invitees(count: 5) } }"#,
    )
    .await;

    assert_eq!(
        data(&response),
        json!({
            "scheduledEvent": {
                "uri": event_uri,
                "name": "Demo",
                "invitees": invitees,
            }
        })
    );
}
