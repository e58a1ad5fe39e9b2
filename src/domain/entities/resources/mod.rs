//! Typed records for every backend resource collection.
//!
//! Each record names only the fields the client filters on; everything else the
//! server sends is kept in `extra` so a record survives a round trip untouched.

mod analytics;
mod catalog;
mod geo;
mod users;
mod visits;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Resource, ResourceId};

pub use analytics::{Dashboard, FilterPreset, ForecastModel, Report, ReportTemplate};
pub use catalog::{Brand, Category, Preinstall, Product};
pub use geo::{City, Country, District, GeoChannel, GlobalMarket, Outlet, Region};
pub use users::{Permission, Role, User, UserSession};
pub use visits::{Observation, Sale, Visit, VisitMedia, VisitType};

/// Implements [`Resource`] and [`super::ResourceKind`] for a record with an `id` field.
macro_rules! impl_resource {
    ($ty:ty, $module:literal, $collection:literal) => {
        impl $crate::domain::entities::Resource for $ty {
            fn id(&self) -> &$crate::domain::entities::ResourceId {
                &self.id
            }
        }

        impl $crate::domain::entities::ResourceKind for $ty {
            const MODULE: &'static str = $module;
            const COLLECTION: &'static str = $collection;
        }
    };
}

/// Implements [`super::Activatable`] for a record with an `is_active` field.
macro_rules! impl_activatable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::domain::entities::Activatable for $ty {
                fn is_active(&self) -> bool {
                    self.is_active
                }
            }
        )+
    };
}

pub(crate) use impl_activatable;
pub(crate) use impl_resource;

/// Untyped record for collections addressed at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record identity.
    pub id: ResourceId,
    /// All other fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Resource for Record {
    fn id(&self) -> &ResourceId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Activatable, ResourceKind};
    use serde_json::json;

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let raw = json!({"id": 3, "name": "Acme", "is_active": true, "logo": "acme.png"});

        let brand: Brand = serde_json::from_value(raw.clone()).unwrap();

        assert!(brand.is_active());
        assert_eq!(serde_json::to_value(&brand).unwrap(), raw);
    }

    #[test]
    fn test_record_keeps_all_fields() {
        let record: Record = serde_json::from_value(json!({"id": "x", "a": 1})).unwrap();

        assert_eq!(record.id(), &ResourceId::Text("x".to_string()));
        assert_eq!(record.fields.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_resource_kind_endpoints() {
        assert_eq!(
            VisitMedia::endpoint("v1").collection_path(),
            "/api/v1/visits/visit-media/"
        );
        assert_eq!(
            GlobalMarket::endpoint("v2").collection_path(),
            "/api/v2/geo/globalmarkets/"
        );
    }
}
