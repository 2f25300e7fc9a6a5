//! Read-only transaction ledger

use std::sync::Arc;

use crate::shared::types::TransactionRecord;

/// Immutable, ordered sequence of ledger records.
///
/// Cloning shares the same backing slice; records are only ever handed out
/// by shared reference.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[TransactionRecord]>,
}

impl RecordStore {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    /// Look up a record by id
    pub fn get(&self, id: u32) -> Option<&TransactionRecord> {
        self.records.iter().find(|tx| tx.id == id)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<TransactionRecord>> for RecordStore {
    fn from(records: Vec<TransactionRecord>) -> Self {
        Self::new(records)
    }
}
