use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{impl_activatable, impl_resource};
use crate::domain::entities::ResourceId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub dashboard_type: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ResourceId,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Report {
    pub const STATUS_PENDING: &'static str = "pending";
    pub const STATUS_COMPLETED: &'static str = "completed";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTemplate {
    pub id: ResourceId,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub id: ResourceId,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub applies_to: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastModel {
    pub id: ResourceId,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ForecastModel {
    pub const STATUS_ACTIVE: &'static str = "active";
}

impl_resource!(Dashboard, "analytics", "dashboards");
impl_resource!(Report, "analytics", "reports");
impl_resource!(ReportTemplate, "analytics", "report-templates");
impl_resource!(FilterPreset, "analytics", "filter-presets");
impl_resource!(ForecastModel, "analytics", "forecast-models");

impl_activatable!(Dashboard, ReportTemplate);
