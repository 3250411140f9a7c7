use std::fmt;

/// Key of an object inside a blob-store bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err("object key must not be empty".to_string());
        }
        if key.starts_with('/') {
            return Err(format!("object key must not start with '/': {}", key));
        }
        Ok(Self(key))
    }

    /// Wraps a key built from a known-good template, such as the archive
    /// key stems.
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
