use serde_json::Value;

use super::{Fields, Version, object_field, str_field};

/// Borrowed view over one entry of the manifest's `products` object.
#[derive(Debug, Clone, Copy)]
pub struct Product<'a> {
    fields: Option<&'a Fields>,
}

impl<'a> Product<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    /// Architecture in manifest vocabulary
    /// eg. amd64
    pub fn arch(&self) -> &'a str {
        str_field(self.fields, "arch").unwrap_or_default()
    }

    /// OS
    /// eg. ubuntu
    pub fn os(&self) -> Option<&'a str> {
        str_field(self.fields, "os").filter(|os| !os.is_empty())
    }

    /// Comma separated `aliases` field, split. Empty segments and repeats are
    /// dropped; first occurrence keeps its place.
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = Vec::new();
        for alias in str_field(self.fields, "aliases").unwrap_or_default().split(',') {
            let alias = alias.trim();
            if !alias.is_empty() && !aliases.iter().any(|seen| seen == alias) {
                aliases.push(alias.to_string());
            }
        }
        aliases
    }

    /// eg. bionic
    pub fn release(&self) -> &'a str {
        str_field(self.fields, "release").unwrap_or_default()
    }

    /// eg. 18.04 LTS
    pub fn release_title(&self) -> &'a str {
        str_field(self.fields, "release_title").unwrap_or_default()
    }

    pub fn supported(&self) -> bool {
        self.fields
            .and_then(|fields| fields.get("supported"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Versions keyed by their version id, sorted by key.
    pub fn versions(&self) -> impl Iterator<Item = (&'a str, Version<'a>)> + use<'a> {
        object_field(self.fields, "versions")
            .into_iter()
            .flat_map(|versions| versions.iter())
            .map(|(id, value)| (id.as_str(), Version::new(value)))
    }

    pub fn has_versions(&self) -> bool {
        object_field(self.fields, "versions").is_some_and(|versions| !versions.is_empty())
    }
}
