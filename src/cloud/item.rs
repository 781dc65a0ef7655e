use serde_json::Value;

use super::{Fields, str_field};

/// Borrowed view over a downloadable file of a version.
#[derive(Debug, Clone, Copy)]
pub struct Item<'a> {
    fields: Option<&'a Fields>,
}

impl<'a> Item<'a> {
    pub fn new(value: Option<&'a Value>) -> Self {
        Self {
            fields: value.and_then(Value::as_object),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.is_some_and(|fields| fields.contains_key(key))
    }

    pub fn text(&self, key: &str) -> &'a str {
        str_field(self.fields, key).unwrap_or_default()
    }

    /// Relative path on the mirror.
    pub fn path(&self) -> &'a str {
        self.text("path")
    }

    pub fn sha256(&self) -> &'a str {
        self.text("sha256")
    }

    /// Declared size in bytes, `-1` when absent or not a whole number.
    pub fn size(&self) -> i64 {
        let Some(value) = self.fields.and_then(|fields| fields.get("size")) else {
            return -1;
        };

        if let Some(size) = value.as_i64() {
            return size;
        }

        match value.as_f64() {
            Some(size) if size.fract() == 0.0 && size.abs() < i64::MAX as f64 => size as i64,
            _ => -1,
        }
    }
}
