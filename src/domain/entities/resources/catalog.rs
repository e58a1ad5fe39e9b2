use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{impl_activatable, impl_resource};
use crate::domain::entities::ResourceId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Product category; `parent` is `None` for root categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub parent: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub brand: Option<ResourceId>,
    #[serde(default)]
    pub category: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Equipment preinstalled at an outlet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preinstall {
    pub id: ResourceId,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(Brand, "catalog", "brands");
impl_resource!(Category, "catalog", "categories");
impl_resource!(Product, "catalog", "products");
impl_resource!(Preinstall, "catalog", "preinstalls");

impl_activatable!(Brand, Category, Product, Preinstall);
