use crate::error::StorageError;
use std::fmt;

/// File extension of every stored value.
pub(crate) const VALUE_SUFFIX: &str = "json";

/// Upper bound for a key, keeps file names well below common filesystem limits.
const MAX_KEY_LEN: usize = 128;

/// A validated storage key.
///
/// Keys map one-to-one onto file names inside the storage root, so they are restricted to
/// `[A-Za-z0-9_.-]`, must not start with a dot, and cannot be empty. Anything that could
/// name a directory or escape the root is rejected before touching the disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn file_name(&self) -> String {
        format!("{}.{VALUE_SUFFIX}", self.0)
    }
}

impl TryFrom<&str> for StorageKey {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        if value.is_empty() {
            return Err(StorageError::InvalidKey {
                message: "EMPTY".into(),
                context: Some("Key cannot be empty".into()),
            });
        }

        if value.len() > MAX_KEY_LEN {
            return Err(StorageError::InvalidKey {
                message: format!("{} bytes", value.len()).into(),
                context: Some("Key is too long".into()),
            });
        }

        if value.starts_with('.') {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Key cannot start with a dot".into()),
            });
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
            return Err(StorageError::InvalidKey {
                message: value.to_owned().into(),
                context: Some("Key contains illegal characters".into()),
            });
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for StorageKey {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert_eq!(StorageKey::try_from("box_draft_app_v1").unwrap().as_str(), "box_draft_app_v1");
        assert_eq!(StorageKey::try_from("a.b-c").unwrap().file_name(), "a.b-c.json");

        assert!(StorageKey::try_from("").is_err());
        assert!(StorageKey::try_from("../etc/passwd").is_err());
        assert!(StorageKey::try_from("nested/key").is_err());
        assert!(StorageKey::try_from(".hidden").is_err());
        assert!(StorageKey::try_from("x".repeat(129)).is_err());
    }
}
