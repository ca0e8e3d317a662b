//! The resolver dispatch table.
//!
//! Every schema field is a method here, taking the field's arguments and
//! the request context and performing exactly one upstream call. Resolvers
//! are self-contained: none of them assumes another resolver has run, and
//! the only shared state is the per-request [`RequestContext`].
//!
//! Identifiers that belong in the resource path are separate arguments and
//! flow only through [`paths`]; the remaining arguments are forwarded as
//! query parameters (reads) or as the request body (writes).

use async_graphql::Context;
use async_graphql::ErrorExtensions;
use async_graphql::InputObject;
use async_graphql::Json;
use async_graphql::Object;
use async_graphql::Result;
use async_graphql::ID;
use serde::Serialize;
use serde_json::json;
use serde_json::Value;

use crate::client::CalendlyClient;
use crate::client::QueryParams;
use crate::context::RequestContext;
use crate::error::FetchError;
use crate::paths;

fn calendly<'ctx>(ctx: &Context<'ctx>) -> Result<&'ctx CalendlyClient> {
    Ok(&ctx.data::<RequestContext>()?.calendly)
}

/*
  type Query {
    usersMe: Json
    user(uuid: ID!): Json
    eventType(uuid: ID!): Json
    eventTypes(...): Json
    organizationInvitation(organization_uuid: ID!, invitation_uuid: ID!): Json
    organizationInvitations(organization_uuid: ID!, ...): Json
    organizationMembership(uuid: ID!): Json
    organizationMemberships(...): Json
    scheduledEvent(uuid: ID!): ScheduledEvent
    scheduledEvents(...): Json
    scheduledEventInvitee(event_uuid: ID!, invitee_uuid: ID!): Json
    scheduledEventInvitees(event_uuid: ID!, ...): Json
    webhookSubscription(uuid: ID!): Json
    webhookSubscriptions(...): Json
  }
*/
pub struct Query;

#[Object(rename_args = "snake_case")]
impl Query {
    /// The user associated with the calling credential.
    async fn users_me(&self, ctx: &Context<'_>) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .get(&paths::users_me(), &[])
                .await
                .map_err(|e| e.extend())?,
        ))
    }

    async fn user(&self, ctx: &Context<'_>, uuid: ID) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .get(&paths::user(&uuid), &[])
                .await
                .map_err(|e| e.extend())?,
        ))
    }

    async fn event_type(&self, ctx: &Context<'_>, uuid: ID) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .get(&paths::event_type(&uuid), &[])
                .await
                .map_err(|e| e.extend())?,
        ))
    }

    async fn event_types(
        &self,
        ctx: &Context<'_>,
        active: Option<bool>,
        count: Option<i32>,
        organization: Option<String>,
        page_token: Option<String>,
        sort: Option<String>,
        user: Option<String>,
    ) -> Result<Json<Value>> {
        let params = QueryParams::new()
            .set("active", active)
            .set("count", count)
            .set("organization", organization)
            .set("page_token", page_token)
            .set("sort", sort)
            .set("user", user);
        Ok(Json(
            calendly(ctx)?
                .get(&paths::event_types(), params.as_slice())
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn organization_invitation(
        &self,
        ctx: &Context<'_>,
        organization_uuid: ID,
        invitation_uuid: ID,
    ) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .get(
                    &paths::organization_invitation(&organization_uuid, &invitation_uuid),
                    &[],
                )
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn organization_invitations(
        &self,
        ctx: &Context<'_>,
        organization_uuid: ID,
        count: Option<i32>,
        email: Option<String>,
        page_token: Option<String>,
        sort: Option<String>,
        status: Option<String>,
    ) -> Result<Json<Value>> {
        let params = QueryParams::new()
            .set("count", count)
            .set("email", email)
            .set("page_token", page_token)
            .set("sort", sort)
            .set("status", status);
        Ok(Json(
            calendly(ctx)?
                .get(
                    &paths::organization_invitations(&organization_uuid),
                    params.as_slice(),
                )
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn organization_membership(&self, ctx: &Context<'_>, uuid: ID) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .get(&paths::organization_membership(&uuid), &[])
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn organization_memberships(
        &self,
        ctx: &Context<'_>,
        count: Option<i32>,
        email: Option<String>,
        organization: Option<String>,
        page_token: Option<String>,
        user: Option<String>,
    ) -> Result<Json<Value>> {
        let params = QueryParams::new()
            .set("count", count)
            .set("email", email)
            .set("organization", organization)
            .set("page_token", page_token)
            .set("user", user);
        Ok(Json(
            calendly(ctx)?
                .get(&paths::organization_memberships(), params.as_slice())
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn scheduled_event(&self, ctx: &Context<'_>, uuid: ID) -> Result<ScheduledEvent> {
        let payload = calendly(ctx)?.get(&paths::scheduled_event(&uuid), &[]).await.map_err(|e| e.extend())?;
        Ok(ScheduledEvent::new(payload))
    }

    async fn scheduled_events(
        &self,
        ctx: &Context<'_>,
        count: Option<i32>,
        invitee_email: Option<String>,
        max_start_time: Option<String>,
        min_start_time: Option<String>,
        organization: Option<String>,
        page_token: Option<String>,
        sort: Option<String>,
        status: Option<String>,
        user: Option<String>,
    ) -> Result<Json<Value>> {
        let params = QueryParams::new()
            .set("count", count)
            .set("invitee_email", invitee_email)
            .set("max_start_time", max_start_time)
            .set("min_start_time", min_start_time)
            .set("organization", organization)
            .set("page_token", page_token)
            .set("sort", sort)
            .set("status", status)
            .set("user", user);
        Ok(Json(
            calendly(ctx)?
                .get(&paths::scheduled_events(), params.as_slice())
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn scheduled_event_invitee(
        &self,
        ctx: &Context<'_>,
        event_uuid: ID,
        invitee_uuid: ID,
    ) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .get(
                    &paths::scheduled_event_invitee(&event_uuid, &invitee_uuid),
                    &[],
                )
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn scheduled_event_invitees(
        &self,
        ctx: &Context<'_>,
        event_uuid: ID,
        count: Option<i32>,
        email: Option<String>,
        page_token: Option<String>,
        sort: Option<String>,
        status: Option<String>,
    ) -> Result<Json<Value>> {
        let params = QueryParams::new()
            .set("count", count)
            .set("email", email)
            .set("page_token", page_token)
            .set("sort", sort)
            .set("status", status);
        Ok(Json(
            calendly(ctx)?
                .get(
                    &paths::scheduled_event_invitees(&event_uuid),
                    params.as_slice(),
                )
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn webhook_subscription(&self, ctx: &Context<'_>, uuid: ID) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .get(&paths::webhook_subscription(&uuid), &[])
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn webhook_subscriptions(
        &self,
        ctx: &Context<'_>,
        count: Option<i32>,
        organization: Option<String>,
        page_token: Option<String>,
        scope: Option<String>,
        sort: Option<String>,
        user: Option<String>,
    ) -> Result<Json<Value>> {
        let params = QueryParams::new()
            .set("count", count)
            .set("organization", organization)
            .set("page_token", page_token)
            .set("scope", scope)
            .set("sort", sort)
            .set("user", user);
        Ok(Json(
            calendly(ctx)?
                .get(&paths::webhook_subscriptions(), params.as_slice())
                .await.map_err(|e| e.extend())?,
        ))
    }
}

/*
  type Mutation {
    requestInviteeDataDeletion(emails: [String!]!): Json
    createWebhookSubscription(input: SchedulingLinkInput!): Json
    createOrganizationInvitation(organization_uuid: ID!, input: OrganizationInvitationInput!): Json
    createSchedulingLink(input: SchedulingLinkInput!): Json
    deleteWebhookSubscription(webhook_subscription_uuid: ID!): Boolean!
    removeUserFromOrganization(organization_membership_uuid: ID!): Boolean!
    revokeOrganizationInvitation(organization_uuid: ID!, invitation_uuid: ID!): Boolean!
  }
*/
pub struct Mutation;

#[Object(rename_args = "snake_case")]
impl Mutation {
    async fn request_invitee_data_deletion(
        &self,
        ctx: &Context<'_>,
        emails: Vec<String>,
    ) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .post(&paths::invitee_data_deletions(), &json!({ "emails": emails }))
                .await.map_err(|e| e.extend())?,
        ))
    }

    /// Historical alias of `createSchedulingLink`; both names target the
    /// scheduling-links collection with the same payload shape.
    async fn create_webhook_subscription(
        &self,
        ctx: &Context<'_>,
        input: SchedulingLinkInput,
    ) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .post(&paths::scheduling_links(), &input)
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn create_organization_invitation(
        &self,
        ctx: &Context<'_>,
        organization_uuid: ID,
        input: OrganizationInvitationInput,
    ) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .post(&paths::organization(&organization_uuid), &input)
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn create_scheduling_link(
        &self,
        ctx: &Context<'_>,
        input: SchedulingLinkInput,
    ) -> Result<Json<Value>> {
        Ok(Json(
            calendly(ctx)?
                .post(&paths::scheduling_links(), &input)
                .await.map_err(|e| e.extend())?,
        ))
    }

    async fn delete_webhook_subscription(
        &self,
        ctx: &Context<'_>,
        webhook_subscription_uuid: ID,
    ) -> Result<bool> {
        calendly(ctx)?
            .delete(&paths::webhook_subscription(&webhook_subscription_uuid))
            .await.map_err(|e| e.extend())?;
        Ok(true)
    }

    async fn remove_user_from_organization(
        &self,
        ctx: &Context<'_>,
        organization_membership_uuid: ID,
    ) -> Result<bool> {
        calendly(ctx)?
            .delete(&paths::organization_membership(&organization_membership_uuid))
            .await.map_err(|e| e.extend())?;
        Ok(true)
    }

    async fn revoke_organization_invitation(
        &self,
        ctx: &Context<'_>,
        organization_uuid: ID,
        invitation_uuid: ID,
    ) -> Result<bool> {
        calendly(ctx)?
            .delete(&paths::organization_invitation(
                &organization_uuid,
                &invitation_uuid,
            ))
            .await.map_err(|e| e.extend())?;
        Ok(true)
    }
}

/*
  type ScheduledEvent {
    uri: String
    name: String
    status: String
    start_time: String
    end_time: String
    event_type: String
    created_at: String
    updated_at: String
    location: Json
    invitees(...): Json
  }
*/
/// A scheduled event, held as the raw upstream representation so the
/// payload passes through unshaped while still carrying the canonical URI
/// its nested relations hang off.
pub struct ScheduledEvent {
    payload: Value,
}

impl ScheduledEvent {
    pub(crate) fn new(payload: Value) -> Self {
        ScheduledEvent { payload }
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.payload.get(name).and_then(Value::as_str)
    }
}

#[Object(rename_fields = "snake_case", rename_args = "snake_case")]
impl ScheduledEvent {
    /// Canonical reference to this event on the upstream API.
    async fn uri(&self) -> Option<&str> {
        self.str_field("uri")
    }

    async fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    async fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    async fn start_time(&self) -> Option<&str> {
        self.str_field("start_time")
    }

    async fn end_time(&self) -> Option<&str> {
        self.str_field("end_time")
    }

    async fn event_type(&self) -> Option<&str> {
        self.str_field("event_type")
    }

    async fn created_at(&self) -> Option<&str> {
        self.str_field("created_at")
    }

    async fn updated_at(&self) -> Option<&str> {
        self.str_field("updated_at")
    }

    async fn location(&self) -> Option<Json<Value>> {
        self.payload.get("location").cloned().map(Json)
    }

    /// Invitees of this event, resolved lazily by appending to the event's
    /// own canonical URI.
    async fn invitees(
        &self,
        ctx: &Context<'_>,
        count: Option<i32>,
        email: Option<String>,
        page_token: Option<String>,
        sort: Option<String>,
        status: Option<String>,
    ) -> Result<Json<Value>> {
        let uri = self
            .str_field("uri")
            .ok_or_else(|| {
                FetchError::MalformedResponse {
                    reason: "scheduled event payload has no canonical uri".to_string(),
                }
                .extend()
            })?;
        let params = QueryParams::new()
            .set("count", count)
            .set("email", email)
            .set("page_token", page_token)
            .set("sort", sort)
            .set("status", status);
        Ok(Json(
            calendly(ctx)?
                .get(&paths::invitees_of(uri), params.as_slice())
                .await.map_err(|e| e.extend())?,
        ))
    }
}

/// Payload for `createSchedulingLink` and its `createWebhookSubscription`
/// alias.
#[derive(Debug, InputObject, Serialize)]
#[graphql(rename_fields = "snake_case")]
pub struct SchedulingLinkInput {
    pub max_event_count: i64,
    pub owner: String,
    pub owner_type: String,
}

/// Payload for `createOrganizationInvitation`.
#[derive(Debug, InputObject, Serialize)]
#[graphql(rename_fields = "snake_case")]
pub struct OrganizationInvitationInput {
    pub email: String,
}
