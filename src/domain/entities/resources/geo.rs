use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::impl_resource;
use crate::domain::entities::ResourceId;

/// Top-level market grouping countries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMarket {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub global_market: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sales channel within a district (not a transport channel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoChannel {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub district: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Point of sale visited by field staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub channel: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl_resource!(GlobalMarket, "geo", "globalmarkets");
impl_resource!(Country, "geo", "countries");
impl_resource!(Region, "geo", "regions");
impl_resource!(City, "geo", "cities");
impl_resource!(District, "geo", "districts");
impl_resource!(GeoChannel, "geo", "channels");
impl_resource!(Outlet, "geo", "outlets");
