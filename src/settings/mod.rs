use std::collections::HashMap;

/// Setting that selects the hypervisor backend.
pub const DRIVER_KEY: &str = "local.driver";

/// Backend used when nothing else has been configured.
pub const DEFAULT_DRIVER: &str = "qemu";

/// Read side of the settings store.
///
/// The store serializes its own reads and writes; callers treat each `get` as
/// atomic.
pub trait Settings: Send + Sync {
    /// Current value for `key`, or [`SettingsError::Unrecognized`] when no such
    /// setting is registered.
    fn get(&self, key: &str) -> Result<String, SettingsError>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unrecognized setting: {0}")]
    Unrecognized(String),
}

/// Immutable, in-memory settings seeded with the registered defaults.
#[derive(Debug, Clone)]
pub struct StaticSettings {
    values: HashMap<String, String>,
}

impl StaticSettings {
    /// Settings holding only the defaults.
    pub fn new() -> Self {
        let values = [(DRIVER_KEY, DEFAULT_DRIVER)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self { values }
    }

    /// Settings with no registered keys at all.
    pub fn empty() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Override a registered setting.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Result<Self, SettingsError> {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                Ok(self)
            }
            None => Err(SettingsError::Unrecognized(key.to_string())),
        }
    }
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings for StaticSettings {
    fn get(&self, key: &str) -> Result<String, SettingsError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| SettingsError::Unrecognized(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_DRIVER, DRIVER_KEY, Settings, SettingsError, StaticSettings};

    #[test]
    fn defaults_include_driver() {
        let settings = StaticSettings::new();
        assert_eq!(settings.get(DRIVER_KEY).unwrap(), DEFAULT_DRIVER);
    }

    #[test]
    fn override_replaces_registered_value() {
        let settings = StaticSettings::new().with(DRIVER_KEY, "lxd").unwrap();
        assert_eq!(settings.get(DRIVER_KEY).unwrap(), "lxd");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let settings = StaticSettings::new();
        assert_eq!(
            settings.get("local.nope"),
            Err(SettingsError::Unrecognized("local.nope".to_string()))
        );
        assert!(StaticSettings::new().with("client.nope", "x").is_err());
    }

    #[test]
    fn empty_settings_recognize_nothing() {
        assert!(StaticSettings::empty().get(DRIVER_KEY).is_err());
    }
}
