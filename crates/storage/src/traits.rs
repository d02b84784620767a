use loadout_core::{RawFieldMap, UserId};

use crate::error::StorageError;

/// Key-value home of player field maps, keyed by user id.
///
/// Implementations serialize their own access; callers get last-write-wins
/// across concurrent read-modify-write sequences for the same user.
pub trait RecordStore: Send + Sync {
    fn get(&self, user_id: &UserId) -> Result<Option<RawFieldMap>, StorageError>;

    /// Overwrites whatever is stored for `user_id`.
    fn put(&self, user_id: &UserId, record: &RawFieldMap) -> Result<(), StorageError>;

    /// Stores `record` only if nothing exists yet. Returns whether it was written.
    fn insert_new(&self, user_id: &UserId, record: &RawFieldMap) -> Result<bool, StorageError>;

    fn record_count(&self) -> Result<u64, StorageError>;
}

/// Rejects a field map whose key entry names a different user.
pub(crate) fn check_key(user_id: &UserId, record: &RawFieldMap) -> Result<(), StorageError> {
    match record.key() {
        Some(key) if key != user_id.as_str() => Err(StorageError::ConstraintViolation(format!(
            "record key {key} does not match {user_id}"
        ))),
        _ => Ok(()),
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Box<S> {
    fn get(&self, user_id: &UserId) -> Result<Option<RawFieldMap>, StorageError> {
        (**self).get(user_id)
    }

    fn put(&self, user_id: &UserId, record: &RawFieldMap) -> Result<(), StorageError> {
        (**self).put(user_id, record)
    }

    fn insert_new(&self, user_id: &UserId, record: &RawFieldMap) -> Result<bool, StorageError> {
        (**self).insert_new(user_id, record)
    }

    fn record_count(&self) -> Result<u64, StorageError> {
        (**self).record_count()
    }
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn get(&self, user_id: &UserId) -> Result<Option<RawFieldMap>, StorageError> {
        (**self).get(user_id)
    }

    fn put(&self, user_id: &UserId, record: &RawFieldMap) -> Result<(), StorageError> {
        (**self).put(user_id, record)
    }

    fn insert_new(&self, user_id: &UserId, record: &RawFieldMap) -> Result<bool, StorageError> {
        (**self).insert_new(user_id, record)
    }

    fn record_count(&self) -> Result<u64, StorageError> {
        (**self).record_count()
    }
}
