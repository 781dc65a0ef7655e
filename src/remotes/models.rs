use serde::{Deserialize, Serialize};

/// A Simplestreams mirror the catalog can be resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    pub(crate) name: String,
    /// Location of the manifest document.
    pub(crate) url: String,
    /// Base URL the manifest's relative paths are resolved against.
    pub(crate) host: String,
}

impl Remote {
    // Borrowing getters (no clones).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}
