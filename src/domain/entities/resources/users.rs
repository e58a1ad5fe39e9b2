use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{impl_activatable, impl_resource};
use crate::domain::entities::ResourceId;

/// Backend user account (distinct from the signed-in [`crate::domain::SessionUser`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: ResourceId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub role: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Server-side login session of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: ResourceId,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub user: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(User, "users", "users");
impl_resource!(Role, "users", "roles");
impl_resource!(Permission, "users", "permissions");
impl_resource!(UserSession, "users", "sessions");

impl_activatable!(User, Role, UserSession);
