//! Data-transfer records returned by the service.
//!
//! These carry no behavior; pass them (or your own types) as decode targets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A real-time update subscription owned by an app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub counts: Counts,
    #[serde(default)]
    pub has_unread: bool,
    pub id: i64,
    #[serde(default)]
    pub owner: Option<User>,
    #[serde(default)]
    pub readers: Acl,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub writers: Acl,
    #[serde(default)]
    pub you_can_edit: bool,
    #[serde(default)]
    pub you_subscribed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    #[serde(default)]
    pub messages: i64,
}

/// Reader or writer permissions on a subscription
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    #[serde(default)]
    pub any_user: bool,
    #[serde(default)]
    pub immutable: bool,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub user_ids: Vec<String>,
    #[serde(default)]
    pub you: bool,
}

/// Minimal user record; fields not modelled here are kept in `extra`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
