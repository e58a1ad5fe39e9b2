//! Field visit views.

use std::sync::Arc;

use super::ResourceStore;
use crate::application::pipeline::RequestPipeline;
use crate::domain::entities::ResourceId;
use crate::domain::entities::resources::{Observation, Sale, Visit, VisitMedia, VisitType};

pub struct VisitStores {
    pub visit_types: ResourceStore<VisitType>,
    pub visits: ResourceStore<Visit>,
    pub observations: ResourceStore<Observation>,
    pub media: ResourceStore<VisitMedia>,
    pub sales: ResourceStore<Sale>,
}

impl VisitStores {
    #[must_use]
    pub fn new(pipeline: &Arc<RequestPipeline>, api_version: &str) -> Self {
        Self {
            visit_types: ResourceStore::new(Arc::clone(pipeline), api_version),
            visits: ResourceStore::new(Arc::clone(pipeline), api_version),
            observations: ResourceStore::new(Arc::clone(pipeline), api_version),
            media: ResourceStore::new(Arc::clone(pipeline), api_version),
            sales: ResourceStore::new(Arc::clone(pipeline), api_version),
        }
    }
}

impl ResourceStore<Visit> {
    #[must_use]
    pub fn by_status(&self, status: &str) -> Vec<Visit> {
        self.filter(|v| v.status == status)
    }

    #[must_use]
    pub fn planned(&self) -> Vec<Visit> {
        self.by_status(Visit::STATUS_PLANNED)
    }

    #[must_use]
    pub fn completed(&self) -> Vec<Visit> {
        self.by_status(Visit::STATUS_COMPLETED)
    }

    #[must_use]
    pub fn by_outlet(&self, outlet: &ResourceId) -> Vec<Visit> {
        self.filter(|v| v.outlet.as_ref() == Some(outlet))
    }

    #[must_use]
    pub fn by_user(&self, user: &ResourceId) -> Vec<Visit> {
        self.filter(|v| v.user.as_ref() == Some(user))
    }
}

impl ResourceStore<Observation> {
    #[must_use]
    pub fn by_visit(&self, visit: &ResourceId) -> Vec<Observation> {
        self.filter(|o| o.visit.as_ref() == Some(visit))
    }
}

impl ResourceStore<VisitMedia> {
    #[must_use]
    pub fn by_visit(&self, visit: &ResourceId) -> Vec<VisitMedia> {
        self.filter(|m| m.visit.as_ref() == Some(visit))
    }
}

impl ResourceStore<Sale> {
    #[must_use]
    pub fn by_visit(&self, visit: &ResourceId) -> Vec<Sale> {
        self.filter(|s| s.visit.as_ref() == Some(visit))
    }

    #[must_use]
    pub fn by_outlet(&self, outlet: &ResourceId) -> Vec<Sale> {
        self.filter(|s| s.outlet.as_ref() == Some(outlet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stores::ListQuery;
    use crate::application::stores::test_support::{ok, pipeline_answering};
    use serde_json::json;

    #[tokio::test]
    async fn test_visits_by_status() {
        let pipeline = pipeline_answering(vec![ok(json!([
            {"id": 1, "status": "planned", "outlet": 5, "user": 2},
            {"id": 2, "status": "completed", "outlet": 5, "user": 3},
            {"id": 3, "status": "planned", "outlet": 6, "user": 2}
        ]))]);
        let stores = VisitStores::new(&pipeline, "v1");
        stores.visits.fetch_list(&ListQuery::new()).await.unwrap();

        assert_eq!(stores.visits.planned().len(), 2);
        assert_eq!(stores.visits.completed().len(), 1);
        assert_eq!(stores.visits.by_outlet(&ResourceId::Int(5)).len(), 2);
        assert_eq!(stores.visits.by_user(&ResourceId::Int(3)).len(), 1);
        assert!(stores.visits.by_status("cancelled").is_empty());
    }

    #[tokio::test]
    async fn test_sales_by_visit() {
        let pipeline = pipeline_answering(vec![ok(json!([
            {"id": 1, "visit": 1, "outlet": 5},
            {"id": 2, "visit": 2, "outlet": 5}
        ]))]);
        let stores = VisitStores::new(&pipeline, "v1");
        stores.sales.fetch_list(&ListQuery::new()).await.unwrap();

        assert_eq!(stores.sales.by_visit(&ResourceId::Int(2)).len(), 1);
        assert_eq!(stores.sales.by_outlet(&ResourceId::Int(5)).len(), 2);
    }
}
