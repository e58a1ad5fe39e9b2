//! Analytics views.

use std::sync::Arc;

use super::ResourceStore;
use crate::application::pipeline::RequestPipeline;
use crate::domain::entities::resources::{
    Dashboard, FilterPreset, ForecastModel, Report, ReportTemplate,
};

pub struct AnalyticsStores {
    pub dashboards: ResourceStore<Dashboard>,
    pub reports: ResourceStore<Report>,
    pub report_templates: ResourceStore<ReportTemplate>,
    pub filter_presets: ResourceStore<FilterPreset>,
    pub forecast_models: ResourceStore<ForecastModel>,
}

impl AnalyticsStores {
    #[must_use]
    pub fn new(pipeline: &Arc<RequestPipeline>, api_version: &str) -> Self {
        Self {
            dashboards: ResourceStore::new(Arc::clone(pipeline), api_version),
            reports: ResourceStore::new(Arc::clone(pipeline), api_version),
            report_templates: ResourceStore::new(Arc::clone(pipeline), api_version),
            filter_presets: ResourceStore::new(Arc::clone(pipeline), api_version),
            forecast_models: ResourceStore::new(Arc::clone(pipeline), api_version),
        }
    }
}

impl ResourceStore<Dashboard> {
    #[must_use]
    pub fn public(&self) -> Vec<Dashboard> {
        self.filter(|d| d.is_public)
    }

    #[must_use]
    pub fn by_type(&self, dashboard_type: &str) -> Vec<Dashboard> {
        self.filter(|d| d.dashboard_type.as_deref() == Some(dashboard_type))
    }

    #[must_use]
    pub fn by_level(&self, level: &str) -> Vec<Dashboard> {
        self.filter(|d| d.level.as_deref() == Some(level))
    }
}

impl ResourceStore<Report> {
    #[must_use]
    pub fn by_status(&self, status: &str) -> Vec<Report> {
        self.filter(|r| r.status == status)
    }

    #[must_use]
    pub fn pending(&self) -> Vec<Report> {
        self.by_status(Report::STATUS_PENDING)
    }

    #[must_use]
    pub fn completed(&self) -> Vec<Report> {
        self.by_status(Report::STATUS_COMPLETED)
    }
}

impl ResourceStore<ReportTemplate> {
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<ReportTemplate> {
        self.filter(|t| t.category.as_deref() == Some(category))
    }
}

impl ResourceStore<FilterPreset> {
    #[must_use]
    pub fn public(&self) -> Vec<FilterPreset> {
        self.filter(|p| p.is_public)
    }

    #[must_use]
    pub fn applying_to(&self, target: &str) -> Vec<FilterPreset> {
        self.filter(|p| p.applies_to.as_deref() == Some(target))
    }
}

impl ResourceStore<ForecastModel> {
    /// Models whose status is `active`; forecast models carry no `is_active` flag.
    #[must_use]
    pub fn active_models(&self) -> Vec<ForecastModel> {
        self.filter(|m| m.status == ForecastModel::STATUS_ACTIVE)
    }
}
