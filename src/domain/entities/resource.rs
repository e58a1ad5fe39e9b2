//! Resource identity and the endpoint a resource collection lives at.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Opaque server-assigned record identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Integer primary key.
    Int(i64),
    /// String key such as a UUID or slug.
    Text(String),
}

impl ResourceId {
    /// Parses user input, preferring an integer id.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        value
            .parse::<i64>()
            .map_or_else(|_| Self::Text(value.to_string()), Self::Int)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Location of a resource collection: `/api/{version}/{module}/{collection}/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    version: String,
    module: String,
    collection: String,
}

impl Endpoint {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        module: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            module: module.into(),
            collection: collection.into(),
        }
    }

    /// Parses a `module/collection` reference such as `visits/visit-types`.
    #[must_use]
    pub fn parse(version: &str, reference: &str) -> Option<Self> {
        let mut parts = reference.trim_matches('/').split('/');
        let module = parts.next().filter(|s| !s.is_empty())?;
        let collection = parts.next().filter(|s| !s.is_empty())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(version, module, collection))
    }

    /// Returns the module segment.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the collection segment.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the collection path.
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!(
            "/api/{}/{}/{}/",
            self.version, self.module, self.collection
        )
    }

    /// Returns the detail path for one record.
    #[must_use]
    pub fn item_path(&self, id: &ResourceId) -> String {
        format!("{}{id}/", self.collection_path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.module, self.collection)
    }
}

/// A server-managed record identified by [`ResourceId`].
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Returns the record identity.
    fn id(&self) -> &ResourceId;
}

/// A resource with a fixed collection on the backend.
pub trait ResourceKind: Resource {
    /// Backend module, e.g. `geo`.
    const MODULE: &'static str;
    /// Collection within the module, e.g. `countries`.
    const COLLECTION: &'static str;

    /// Returns the endpoint for the given API version.
    #[must_use]
    fn endpoint(version: &str) -> Endpoint {
        Endpoint::new(version, Self::MODULE, Self::COLLECTION)
    }
}

/// Resources carrying an `is_active` flag.
pub trait Activatable {
    /// Returns whether the record is active.
    fn is_active(&self) -> bool;
}

/// Resources whose create/update endpoints accept `multipart/form-data`.
pub trait AcceptsMultipart: Resource {}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("42", ResourceId::Int(42) ; "integer")]
    #[test_case(" 7 ", ResourceId::Int(7) ; "trimmed integer")]
    #[test_case("a1b2", ResourceId::Text("a1b2".to_string()) ; "text")]
    fn test_parse_resource_id(input: &str, expected: ResourceId) {
        assert_eq!(ResourceId::parse(input), expected);
    }

    #[test]
    fn test_resource_id_deserializes_both_shapes() {
        let int: ResourceId = serde_json::from_str("5").unwrap();
        let text: ResourceId = serde_json::from_str("\"abc\"").unwrap();

        assert_eq!(int, ResourceId::Int(5));
        assert_eq!(text, ResourceId::Text("abc".to_string()));
    }

    #[test]
    fn test_endpoint_paths() {
        let endpoint = Endpoint::new("v1", "visits", "visit-types");

        assert_eq!(endpoint.collection_path(), "/api/v1/visits/visit-types/");
        assert_eq!(
            endpoint.item_path(&ResourceId::Int(3)),
            "/api/v1/visits/visit-types/3/"
        );
    }

    #[test_case("geo/countries", true ; "module and collection")]
    #[test_case("/geo/countries/", true ; "surrounding slashes")]
    #[test_case("geo", false ; "module only")]
    #[test_case("geo/countries/1", false ; "too many segments")]
    fn test_endpoint_parse(reference: &str, valid: bool) {
        assert_eq!(Endpoint::parse("v1", reference).is_some(), valid);
    }
}
