use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use loadout_core::{RawFieldMap, UserId};

use crate::error::StorageError;
use crate::traits::{RecordStore, check_key};

/// In-process store for tests and local runs. Can be switched offline to
/// exercise the unavailable path.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<BTreeMap<UserId, RawFieldMap>>,
    offline: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn records(&self) -> Result<MutexGuard<'_, BTreeMap<UserId, RawFieldMap>>, StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store is offline".into()));
        }
        self.records
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, user_id: &UserId) -> Result<Option<RawFieldMap>, StorageError> {
        Ok(self.records()?.get(user_id).cloned())
    }

    fn put(&self, user_id: &UserId, record: &RawFieldMap) -> Result<(), StorageError> {
        check_key(user_id, record)?;
        self.records()?.insert(user_id.clone(), record.clone());
        Ok(())
    }

    fn insert_new(&self, user_id: &UserId, record: &RawFieldMap) -> Result<bool, StorageError> {
        check_key(user_id, record)?;
        let mut records = self.records()?;
        if records.contains_key(user_id) {
            return Ok(false);
        }
        records.insert(user_id.clone(), record.clone());
        Ok(true)
    }

    fn record_count(&self) -> Result<u64, StorageError> {
        Ok(self.records()?.len() as u64)
    }
}
