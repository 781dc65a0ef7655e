//! Resolve Simplestreams cloud-image manifests into an indexed catalog.

pub mod cloud;
pub mod helpers;
pub mod remotes;
pub mod settings;
pub mod simplestreams;
pub mod source;

pub use cloud::{Catalog, ImageRecord};
pub use simplestreams::{ExtractionPolicy, ManifestError, resolve, resolve_with_policy};
