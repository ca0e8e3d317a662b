//! Typed builders for upstream resource paths.
//!
//! Every upstream path the gateway touches is produced here. Keeping the
//! identifier interpolation in one place guarantees that an identifier
//! embedded in a path segment is never also forwarded as a query or body
//! parameter.

pub fn users_me() -> String {
    "/users/me".to_string()
}

pub fn user(uuid: &str) -> String {
    format!("/users/{uuid}")
}

pub fn event_type(uuid: &str) -> String {
    format!("/event_types/{uuid}")
}

pub fn event_types() -> String {
    "/event_types".to_string()
}

pub fn organization(uuid: &str) -> String {
    format!("/organizations/{uuid}")
}

pub fn organization_invitation(organization_uuid: &str, invitation_uuid: &str) -> String {
    format!("/organizations/{organization_uuid}/invitations/{invitation_uuid}")
}

pub fn organization_invitations(organization_uuid: &str) -> String {
    format!("/organizations/{organization_uuid}/invitations")
}

pub fn organization_membership(uuid: &str) -> String {
    format!("/organization_memberships/{uuid}")
}

pub fn organization_memberships() -> String {
    "/organization_memberships".to_string()
}

pub fn scheduled_event(uuid: &str) -> String {
    format!("/scheduled_events/{uuid}")
}

pub fn scheduled_events() -> String {
    "/scheduled_events".to_string()
}

pub fn scheduled_event_invitee(event_uuid: &str, invitee_uuid: &str) -> String {
    format!("/scheduled_events/{event_uuid}/invitees/{invitee_uuid}")
}

pub fn scheduled_event_invitees(event_uuid: &str) -> String {
    format!("/scheduled_events/{event_uuid}/invitees")
}

/// Invitee collection of a scheduled event, addressed from the parent's
/// canonical URI rather than from a root argument.
pub fn invitees_of(event_uri: &str) -> String {
    format!("{event_uri}/invitees")
}

pub fn webhook_subscription(uuid: &str) -> String {
    format!("/webhook_subscriptions/{uuid}")
}

pub fn webhook_subscriptions() -> String {
    "/webhook_subscriptions".to_string()
}

pub fn scheduling_links() -> String {
    "/scheduling_links".to_string()
}

pub fn invitee_data_deletions() -> String {
    "/data_compliance/deletion/invitees".to_string()
}
