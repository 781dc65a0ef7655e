mod catalog;
mod image;
mod item;
mod product;
mod version;

pub use catalog::Catalog;
pub use image::ImageRecord;
pub use item::Item;
pub use product::Product;
pub use version::Version;

use serde_json::{Map, Value};

/// JSON object as exposed by the parser.
pub(crate) type Fields = Map<String, Value>;

// The manifest is loosely typed: a field of the wrong type reads as absent.

fn str_field<'a>(fields: Option<&'a Fields>, key: &str) -> Option<&'a str> {
    fields?.get(key)?.as_str()
}

fn object_field<'a>(fields: Option<&'a Fields>, key: &str) -> Option<&'a Fields> {
    fields?.get(key)?.as_object()
}
