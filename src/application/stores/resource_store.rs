//! Generic cached CRUD store over one resource collection.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::pipeline::RequestPipeline;
use crate::domain::entities::{AcceptsMultipart, Activatable, Endpoint, Resource, ResourceId, ResourceKind};
use crate::domain::errors::ApiError;
use crate::domain::ports::{ApiRequest, ApiResponse, Method, MultipartForm};

/// Pagination metadata of the last list envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Cached state of one resource collection.
#[derive(Debug, Clone)]
pub struct ResourceState<R> {
    /// Last fetched collection, in server order.
    pub items: Vec<R>,
    /// Last record fetched by id.
    pub current: Option<R>,
    /// True only while an action is in flight.
    pub loading: bool,
    /// Message of the last failed action; cleared when an action starts.
    pub error: Option<String>,
    /// Pagination metadata when the last list was paginated.
    pub page: Option<PageMeta>,
}

impl<R> Default for ResourceState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            loading: false,
            error: None,
            page: None,
        }
    }
}

/// Filter parameters for a list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: Vec<(String, String)>,
}

impl ListQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Returns the parameters in insertion order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ListQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Clears `loading` when dropped, whichever way the action ends.
struct LoadingGuard<'a, R> {
    state: &'a RwLock<ResourceState<R>>,
}

impl<R> Drop for LoadingGuard<'_, R> {
    fn drop(&mut self) {
        self.state.write().loading = false;
    }
}

/// Local cache of one collection, kept in sync with the server by its actions.
///
/// Every action clears `error`, holds `loading` for its duration, records a
/// display message on failure and returns the failure to the caller.
/// Concurrent actions on one store share the `loading` and `error` slots; the
/// last writer wins.
pub struct ResourceStore<R: Resource> {
    pipeline: Arc<RequestPipeline>,
    endpoint: Endpoint,
    state: RwLock<ResourceState<R>>,
}

impl<R: ResourceKind> ResourceStore<R> {
    /// Creates a store at the resource's own endpoint.
    #[must_use]
    pub fn new(pipeline: Arc<RequestPipeline>, api_version: &str) -> Self {
        Self::at(pipeline, R::endpoint(api_version))
    }
}

impl<R: Resource> ResourceStore<R> {
    /// Creates a store at an explicit endpoint.
    #[must_use]
    pub fn at(pipeline: Arc<RequestPipeline>, endpoint: Endpoint) -> Self {
        Self {
            pipeline,
            endpoint,
            state: RwLock::new(ResourceState::default()),
        }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Fetches the collection and replaces the local items with it.
    ///
    /// # Errors
    /// Returns the pipeline or decode failure.
    pub async fn fetch_list(&self, query: &ListQuery) -> Result<Vec<R>, ApiError> {
        let _loading = self.begin();
        let request =
            ApiRequest::get(self.endpoint.collection_path()).with_query(query.params().to_vec());

        let result = match self.pipeline.execute(request).await {
            Ok(response) => unwrap_list::<R>(&response),
            Err(e) => Err(e),
        };
        let (items, page) = self.settle("fetch_list", result)?;

        {
            let mut state = self.state.write();
            state.items.clone_from(&items);
            state.page = page;
        }
        debug!(endpoint = %self.endpoint, count = items.len(), "Fetched collection");
        Ok(items)
    }

    /// Fetches one record and stores it as `current`.
    ///
    /// # Errors
    /// Returns the pipeline or decode failure.
    pub async fn fetch_one(&self, id: &ResourceId) -> Result<R, ApiError> {
        let _loading = self.begin();
        let request = ApiRequest::get(self.endpoint.item_path(id));

        let result = self.pipeline.execute_json::<R>(request).await;
        let record = self.settle("fetch_one", result)?;

        self.state.write().current = Some(record.clone());
        debug!(endpoint = %self.endpoint, %id, "Fetched record");
        Ok(record)
    }

    /// Creates a record and appends the server's copy to the local items.
    ///
    /// # Errors
    /// Returns the encode, pipeline or decode failure.
    pub async fn create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<R, ApiError> {
        let _loading = self.begin();

        let result = match ApiRequest::new(Method::Post, self.endpoint.collection_path())
            .with_json(payload)
        {
            Ok(request) => self.pipeline.execute_json::<R>(request).await,
            Err(e) => Err(e),
        };
        let record = self.settle("create", result)?;

        self.append(record.clone());
        Ok(record)
    }

    /// Replaces a record with PUT.
    ///
    /// The local item with the same id is replaced in place. When no local item
    /// matches, the returned record is not added to the local items.
    ///
    /// # Errors
    /// Returns the encode, pipeline or decode failure.
    pub async fn update<P: Serialize + ?Sized>(
        &self,
        id: &ResourceId,
        payload: &P,
    ) -> Result<R, ApiError> {
        self.write_json(Method::Put, id, payload).await
    }

    /// Partially updates a record with PATCH; local bookkeeping as [`Self::update`].
    ///
    /// # Errors
    /// Returns the encode, pipeline or decode failure.
    pub async fn patch<P: Serialize + ?Sized>(
        &self,
        id: &ResourceId,
        payload: &P,
    ) -> Result<R, ApiError> {
        self.write_json(Method::Patch, id, payload).await
    }

    /// Deletes a record and removes it from the local items.
    ///
    /// # Errors
    /// Returns the pipeline failure.
    pub async fn delete(&self, id: &ResourceId) -> Result<(), ApiError> {
        let _loading = self.begin();
        let request = ApiRequest::delete(self.endpoint.item_path(id));

        let result = self.pipeline.execute(request).await.map(|_| ());
        self.settle("delete", result)?;

        self.state.write().items.retain(|item| item.id() != id);
        debug!(endpoint = %self.endpoint, %id, "Deleted record");
        Ok(())
    }

    /// Returns a copy of the cached items.
    #[must_use]
    pub fn items(&self) -> Vec<R> {
        self.state.read().items.clone()
    }

    #[must_use]
    pub fn current(&self) -> Option<R> {
        self.state.read().current.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    #[must_use]
    pub fn page(&self) -> Option<PageMeta> {
        self.state.read().page.clone()
    }

    /// Returns a copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> ResourceState<R> {
        self.state.read().clone()
    }

    /// Looks up a cached item by id.
    #[must_use]
    pub fn find(&self, id: &ResourceId) -> Option<R> {
        self.state
            .read()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    /// Returns cached items matching `predicate`, in order.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        self.state
            .read()
            .items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    async fn write_json<P: Serialize + ?Sized>(
        &self,
        method: Method,
        id: &ResourceId,
        payload: &P,
    ) -> Result<R, ApiError> {
        let _loading = self.begin();

        let result = match ApiRequest::new(method, self.endpoint.item_path(id)).with_json(payload) {
            Ok(request) => self.pipeline.execute_json::<R>(request).await,
            Err(e) => Err(e),
        };
        let record = self.settle("update", result)?;

        self.replace(id, record.clone());
        Ok(record)
    }

    fn begin(&self) -> LoadingGuard<'_, R> {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        LoadingGuard { state: &self.state }
    }

    fn settle<T>(&self, action: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
        result.map_err(|e| {
            warn!(endpoint = %self.endpoint, action, error = %e, "Resource action failed");
            self.state.write().error = Some(e.user_message());
            e
        })
    }

    fn append(&self, record: R) {
        debug!(endpoint = %self.endpoint, id = %record.id(), "Created record");
        self.state.write().items.push(record);
    }

    fn replace(&self, id: &ResourceId, record: R) {
        let mut state = self.state.write();
        if let Some(slot) = state.items.iter_mut().find(|item| item.id() == id) {
            *slot = record;
            debug!(endpoint = %self.endpoint, %id, "Updated record");
        } else {
            debug!(endpoint = %self.endpoint, %id, "Updated record not cached locally");
        }
    }
}

impl<R: AcceptsMultipart> ResourceStore<R> {
    /// Creates a record from a multipart form.
    ///
    /// # Errors
    /// Returns the pipeline or decode failure.
    pub async fn create_multipart(&self, form: MultipartForm) -> Result<R, ApiError> {
        let _loading = self.begin();
        let request =
            ApiRequest::new(Method::Post, self.endpoint.collection_path()).with_multipart(form);

        let result = self.pipeline.execute_json::<R>(request).await;
        let record = self.settle("create", result)?;

        self.append(record.clone());
        Ok(record)
    }

    /// Replaces a record from a multipart form; local bookkeeping as [`Self::update`].
    ///
    /// # Errors
    /// Returns the pipeline or decode failure.
    pub async fn update_multipart(
        &self,
        id: &ResourceId,
        form: MultipartForm,
    ) -> Result<R, ApiError> {
        let _loading = self.begin();
        let request = ApiRequest::new(Method::Put, self.endpoint.item_path(id)).with_multipart(form);

        let result = self.pipeline.execute_json::<R>(request).await;
        let record = self.settle("update", result)?;

        self.replace(id, record.clone());
        Ok(record)
    }
}

impl<R: Resource + Activatable> ResourceStore<R> {
    /// Returns cached items whose `is_active` flag is set.
    #[must_use]
    pub fn active(&self) -> Vec<R> {
        self.filter(|item| item.is_active())
    }
}

/// Reads `{results: [...]}` or a bare array.
fn unwrap_list<R: DeserializeOwned>(
    response: &ApiResponse,
) -> Result<(Vec<R>, Option<PageMeta>), ApiError> {
    let body: Value = response.json()?;

    let (items, page) = match body {
        Value::Object(mut envelope) if envelope.contains_key("results") => {
            let items = envelope.remove("results").unwrap_or(Value::Null);
            let page = serde_json::from_value::<PageMeta>(Value::Object(envelope)).ok();
            (items, page)
        }
        other => (other, None),
    };

    let items = serde_json::from_value(items).map_err(|e| ApiError::decode(e.to_string()))?;
    Ok((items, page))
}
