//! User administration views.

use std::sync::Arc;

use super::ResourceStore;
use crate::application::pipeline::RequestPipeline;
use crate::domain::entities::ResourceId;
use crate::domain::entities::resources::{Permission, Role, User, UserSession};

pub struct UserStores {
    pub users: ResourceStore<User>,
    pub roles: ResourceStore<Role>,
    pub permissions: ResourceStore<Permission>,
    pub sessions: ResourceStore<UserSession>,
}

impl UserStores {
    #[must_use]
    pub fn new(pipeline: &Arc<RequestPipeline>, api_version: &str) -> Self {
        Self {
            users: ResourceStore::new(Arc::clone(pipeline), api_version),
            roles: ResourceStore::new(Arc::clone(pipeline), api_version),
            permissions: ResourceStore::new(Arc::clone(pipeline), api_version),
            sessions: ResourceStore::new(Arc::clone(pipeline), api_version),
        }
    }
}

impl ResourceStore<User> {
    #[must_use]
    pub fn by_role(&self, role: &ResourceId) -> Vec<User> {
        self.filter(|u| u.role.as_ref() == Some(role))
    }
}

impl ResourceStore<UserSession> {
    #[must_use]
    pub fn by_user(&self, user: &ResourceId) -> Vec<UserSession> {
        self.filter(|s| s.user.as_ref() == Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::stores::ListQuery;
    use crate::application::stores::test_support::{ok, pipeline_answering};
    use serde_json::json;

    #[tokio::test]
    async fn test_users_by_role_and_active() {
        let pipeline = pipeline_answering(vec![ok(json!([
            {"id": 1, "username": "anna", "role": 2, "is_active": true},
            {"id": 2, "username": "boris", "role": 3, "is_active": true},
            {"id": 3, "username": "chen", "role": 2, "is_active": false}
        ]))]);
        let users = UserStores::new(&pipeline, "v1");
        users.users.fetch_list(&ListQuery::new()).await.unwrap();

        let managers: Vec<_> = users
            .users
            .by_role(&ResourceId::Int(2))
            .into_iter()
            .map(|u| u.username)
            .collect();
        let active: Vec<_> = users.users.active().into_iter().map(|u| u.username).collect();

        assert_eq!(managers, vec!["anna", "chen"]);
        assert_eq!(active, vec!["anna", "boris"]);
    }
}
