use serde_json::Value;

use super::{Fields, Item, object_field};

/// Borrowed view over one publication of a product.
#[derive(Debug, Clone, Copy)]
pub struct Version<'a> {
    fields: Option<&'a Fields>,
}

impl<'a> Version<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    pub fn has_items(&self) -> bool {
        object_field(self.fields, "items").is_some_and(|items| !items.is_empty())
    }

    /// Item published under `name` (e.g. `disk1.img`), empty when missing.
    pub fn item(&self, name: &str) -> Item<'a> {
        Item::new(object_field(self.fields, "items").and_then(|items| items.get(name)))
    }
}
