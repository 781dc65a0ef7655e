use serde_json::Value;

use super::ManifestError;
use crate::cloud::{Fields, Product};

/// Top-level object of a decoded manifest.
#[derive(Debug, Clone)]
pub struct RawDocument {
    root: Fields,
}

impl RawDocument {
    /// The `updated` stamp, empty when missing.
    pub fn updated(&self) -> &str {
        self.root
            .get("updated")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Products keyed by product id, sorted by key.
    pub fn products(&self) -> impl Iterator<Item = (&str, Product<'_>)> {
        self.root
            .get("products")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|products| products.iter())
            .map(|(id, value)| (id.as_str(), Product::new(value)))
    }

    pub fn has_products(&self) -> bool {
        self.root
            .get("products")
            .and_then(Value::as_object)
            .is_some_and(|products| !products.is_empty())
    }
}

/// Decode manifest bytes, rejecting anything that is not a JSON object.
pub fn parse(bytes: &[u8]) -> Result<RawDocument, ManifestError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| ManifestError::Parse(err.to_string()))?;

    match value {
        Value::Object(root) => Ok(RawDocument { root }),
        _ => Err(ManifestError::InvalidFormat),
    }
}
