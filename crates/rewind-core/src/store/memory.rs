//! In-memory document store.
//!
//! Each document's log lives behind its own mutex, so appends to the same
//! document serialize while appends to different documents proceed in
//! parallel. The outer registry lock is only held long enough to look up
//! the document cell.

use super::{DocumentStore, StoreError};
use crate::action::Action;
use crate::model::DocumentId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::debug;

struct DocumentCell {
    owner: String,
    actions: Mutex<Vec<Action>>,
}

/// Process-local store, the default for tests and single-process embedding.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<DocumentId, Arc<DocumentCell>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, id: &DocumentId) -> Result<Arc<DocumentCell>, StoreError> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::DocumentNotFound(id.clone()))
    }
}

impl DocumentStore for MemoryStore {
    fn create_document(&self, owner: &str, seed: Action) -> Result<DocumentId, StoreError> {
        let id = DocumentId::mint();
        let cell = Arc::new(DocumentCell {
            owner: owner.to_string(),
            actions: Mutex::new(vec![seed]),
        });
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), cell);
        debug!(document = %id, owner, "created document");
        Ok(id)
    }

    fn append(&self, id: &DocumentId, action: Action) -> Result<usize, StoreError> {
        let cell = self.cell(id)?;
        let mut actions = cell.actions.lock().unwrap_or_else(PoisonError::into_inner);
        actions.push(action);
        Ok(actions.len())
    }

    fn read(&self, id: &DocumentId) -> Result<Vec<Action>, StoreError> {
        let cell = self.cell(id)?;
        let actions = cell.actions.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(actions.clone())
    }

    fn owner(&self, id: &DocumentId) -> Result<String, StoreError> {
        Ok(self.cell(id)?.owner.clone())
    }
}
