use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{impl_activatable, impl_resource};
use crate::domain::entities::{AcceptsMultipart, ResourceId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitType {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A field visit to an outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: ResourceId,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub outlet: Option<ResourceId>,
    #[serde(default)]
    pub user: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Visit {
    pub const STATUS_PLANNED: &'static str = "planned";
    pub const STATUS_COMPLETED: &'static str = "completed";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: ResourceId,
    #[serde(default)]
    pub visit: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Photo or file captured during a visit; uploaded as multipart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitMedia {
    pub id: ResourceId,
    #[serde(default)]
    pub visit: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: ResourceId,
    #[serde(default)]
    pub visit: Option<ResourceId>,
    #[serde(default)]
    pub outlet: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(VisitType, "visits", "visit-types");
impl_resource!(Visit, "visits", "visits");
impl_resource!(Observation, "visits", "observations");
impl_resource!(VisitMedia, "visits", "visit-media");
impl_resource!(Sale, "visits", "sales");

impl_activatable!(VisitType);

impl AcceptsMultipart for VisitMedia {}
