use loadout_storage::StorageError;
use thiserror::Error;

use crate::identity::AuthError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(#[from] AuthError),

    #[error("record not found: {0}")]
    RecordNotFound(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(StorageError),

    /// The stored record exists but cannot be read or written back as is.
    /// Retrying will not help.
    #[error("corrupt record: {0}")]
    CorruptRecord(StorageError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Sqlite(_) | StorageError::Unavailable(_) => Self::StoreUnavailable(err),
            StorageError::Serialization(_) | StorageError::ConstraintViolation(_) => {
                Self::CorruptRecord(err)
            }
        }
    }
}

impl EngineError {
    /// Stable machine-readable code for response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::RecordNotFound(_) => "record_not_found",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::CorruptRecord(_) => "corrupt_record",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::AuthenticationFailed(_) => 401,
            Self::RecordNotFound(_) => 404,
            Self::StoreUnavailable(_) => 503,
            Self::CorruptRecord(_) => 500,
            Self::InvalidRequest(_) => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_split_by_kind() {
        let cases = [
            (StorageError::Unavailable("down".into()), 503, "store_unavailable"),
            (StorageError::Serialization("bad msgpack".into()), 500, "corrupt_record"),
            (StorageError::ConstraintViolation("key".into()), 500, "corrupt_record"),
        ];
        for (storage, status, code) in cases {
            let err = EngineError::from(storage);
            assert_eq!(err.status(), status, "{err}");
            assert_eq!(err.code(), code);
        }
    }
}
