use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid store config: {0}")]
    InvalidConfig(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid update: {0}")]
    InvalidUpdate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Could not decode document: {0}")]
    Decode(String),
}

/// The two failure categories callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Internal,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::Decode(_) => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl Serialize for StoreError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_share_the_not_found_kind() {
        assert_eq!(
            StoreError::NotFound("x".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StoreError::Decode("bad".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StoreError::InvalidUpdate("empty".to_string()).kind(),
            ErrorKind::Internal
        );
        assert_eq!(
            StoreError::Database(rusqlite::Error::InvalidQuery).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn serializes_as_display_string() {
        let err = StoreError::NotFound("no file matches filter".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Not found: no file matches filter\"");
    }
}
