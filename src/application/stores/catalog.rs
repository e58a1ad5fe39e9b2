//! Product catalogue views.

use std::sync::Arc;

use super::ResourceStore;
use crate::application::pipeline::RequestPipeline;
use crate::domain::entities::ResourceId;
use crate::domain::entities::resources::{Brand, Category, Preinstall, Product};

pub struct CatalogStores {
    pub brands: ResourceStore<Brand>,
    pub categories: ResourceStore<Category>,
    pub products: ResourceStore<Product>,
    pub preinstalls: ResourceStore<Preinstall>,
}

impl CatalogStores {
    #[must_use]
    pub fn new(pipeline: &Arc<RequestPipeline>, api_version: &str) -> Self {
        Self {
            brands: ResourceStore::new(Arc::clone(pipeline), api_version),
            categories: ResourceStore::new(Arc::clone(pipeline), api_version),
            products: ResourceStore::new(Arc::clone(pipeline), api_version),
            preinstalls: ResourceStore::new(Arc::clone(pipeline), api_version),
        }
    }
}

impl ResourceStore<Category> {
    /// Categories without a parent.
    #[must_use]
    pub fn roots(&self) -> Vec<Category> {
        self.filter(|c| c.parent.is_none())
    }
}

impl ResourceStore<Product> {
    #[must_use]
    pub fn by_brand(&self, brand: &ResourceId) -> Vec<Product> {
        self.filter(|p| p.brand.as_ref() == Some(brand))
    }

    #[must_use]
    pub fn by_category(&self, category: &ResourceId) -> Vec<Product> {
        self.filter(|p| p.category.as_ref() == Some(category))
    }
}
