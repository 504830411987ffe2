//! Request context supplied by upstream middleware.

use serde::{Deserialize, Serialize};

/// Authenticated user identity, as decoded by the auth layer.
///
/// Data fields only — no verification logic lives here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// Per-request context carried into every mutating service call.
///
/// The transport supplies the requester address and user-agent; the auth
/// middleware supplies the identity. All fields are required — a mutation
/// without attribution is not accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestContext {
    pub ip_address: String,
    pub user_agent: String,
    pub user: AuthUser,
}
