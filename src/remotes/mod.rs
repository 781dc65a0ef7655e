mod models;

use std::{fs, path::Path};

pub use models::Remote;

/// Configured remotes, in file order.
#[derive(Debug, Clone, Default)]
pub struct Remotes {
    remotes: Vec<Remote>,
}

impl Remotes {
    /// Load from a JSON file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RemotesError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Load from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, RemotesError> {
        let remotes: Vec<Remote> = serde_json::from_str(json)?;

        let mut names: Vec<&str> = remotes.iter().map(Remote::name).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(RemotesError::Duplicate(pair[0].to_string()));
        }

        Ok(Self { remotes })
    }

    pub fn all(&self) -> &[Remote] {
        &self.remotes
    }

    /// Find by name without cloning.
    pub fn by_name(&self, name: &str) -> Option<&Remote> {
        self.remotes.iter().find(|r| r.name() == name)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RemotesError {
    #[error("duplicate remote: {0}")]
    Duplicate(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
