use serde::{Deserialize, Serialize};

/// A roster entry. Identity is the case-insensitive name; there is no
/// rename operation, so the name never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub name: String,
    /// Optional photo reference, read once and held for the session.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo: Option<PhotoSource>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), photo: None }
    }

    pub fn with_photo(name: impl Into<String>, photo: PhotoSource) -> Self {
        Self { name: name.into(), photo: Some(photo) }
    }
}

/// Where a player photo comes from: raw uploaded bytes or a URL reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PhotoSource {
    Url(String),
    Bytes(Vec<u8>),
}

/// A playbook entry. Like `Player`, the case-insensitive name is the sole
/// identity key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Play {
    pub name: String,
}

impl Play {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
