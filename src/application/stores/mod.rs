//! Cached resource stores, one per backend collection.

mod analytics;
mod catalog;
mod geography;
mod resource_store;
mod users;
mod visits;

use std::sync::Arc;

pub use analytics::AnalyticsStores;
pub use catalog::CatalogStores;
pub use geography::GeographyStores;
pub use resource_store::{ListQuery, PageMeta, ResourceState, ResourceStore};
pub use users::UserStores;
pub use visits::VisitStores;

use crate::application::pipeline::RequestPipeline;

/// Every typed store, grouped by backend module.
pub struct ResourceStores {
    pub geography: GeographyStores,
    pub catalog: CatalogStores,
    pub visits: VisitStores,
    pub users: UserStores,
    pub analytics: AnalyticsStores,
}

impl ResourceStores {
    /// Creates empty stores sharing one pipeline.
    #[must_use]
    pub fn new(pipeline: &Arc<RequestPipeline>, api_version: &str) -> Self {
        Self {
            geography: GeographyStores::new(pipeline, api_version),
            catalog: CatalogStores::new(pipeline, api_version),
            visits: VisitStores::new(pipeline, api_version),
            users: UserStores::new(pipeline, api_version),
            analytics: AnalyticsStores::new(pipeline, api_version),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::application::pipeline::RequestPipeline;
    use crate::application::session::CredentialStore;
    use crate::domain::errors::ApiError;
    use crate::domain::ports::{ApiResponse, HttpTransport};
    use crate::domain::ports::mocks::{
        MockAuthPort, MockNavigationPort, MockTokenStorage, MockTransport,
    };

    pub fn ok(body: serde_json::Value) -> Result<ApiResponse, ApiError> {
        Ok(ApiResponse::json_body(200, &body))
    }

    /// Pipeline over a logged-out session.
    pub fn pipeline_over(transport: Arc<dyn HttpTransport>) -> Arc<RequestPipeline> {
        let session = Arc::new(CredentialStore::new(
            Arc::new(MockAuthPort::new(true)),
            Arc::new(MockTokenStorage::new()),
        ));
        Arc::new(RequestPipeline::new(
            transport,
            session,
            Arc::new(MockNavigationPort::new()),
        ))
    }

    pub fn pipeline_answering(responses: Vec<Result<ApiResponse, ApiError>>) -> Arc<RequestPipeline> {
        pipeline_over(Arc::new(MockTransport::scripted(responses)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ResourceId;
    use crate::domain::entities::resources::User;
    use crate::domain::ports::mocks::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_stores_share_pipeline_and_version() {
        let transport = Arc::new(MockTransport::scripted(vec![
            test_support::ok(json!([{"id": 1, "username": "ops", "is_active": true, "role": 2}])),
            test_support::ok(json!([])),
        ]));
        let pipeline = test_support::pipeline_over(transport.clone());
        let stores = ResourceStores::new(&pipeline, "v2");

        stores.users.users.fetch_list(&ListQuery::new()).await.unwrap();
        stores.catalog.brands.fetch_list(&ListQuery::new()).await.unwrap();

        let paths: Vec<_> = transport.sent().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/api/v2/users/users/", "/api/v2/catalog/brands/"]);
        let by_role: Vec<User> = stores.users.users.by_role(&ResourceId::Int(2));
        assert_eq!(by_role.len(), 1);
        assert!(stores.catalog.brands.items().is_empty());
    }
}
