//! Document store: session-held user records mirrored to a persistent slot

use serde::{Deserialize, Serialize};

use super::record::DocumentRecord;
use super::storage::{SlotError, StorageSlot};

/// Reserved slot key for the user document collection
pub const STORE_KEY: &str = "papershelf-documents";

/// Serialized shape of the persisted collection
#[derive(Serialize, Deserialize)]
struct PersistedCollection {
    documents: Vec<DocumentRecord>,
}

/// Authoritative list of user-uploaded records for the session.
///
/// Every mutation writes the full collection back to the slot. A rejected
/// write (quota) leaves the in-memory collection as the source of truth for
/// the rest of the session; the error is surfaced to the caller once.
pub struct DocumentStore<S: StorageSlot> {
    slot: S,
    records: Vec<DocumentRecord>,
}

impl<S: StorageSlot> DocumentStore<S> {
    /// Load the persisted collection, starting empty on absence or corruption
    pub fn load(slot: S) -> Self {
        let records = match slot.get(STORE_KEY) {
            Some(raw) => match serde_json::from_str::<PersistedCollection>(&raw) {
                Ok(collection) => {
                    // System-provided records are never persisted; drop any
                    // that an older or tampered slot may contain.
                    let mut documents = collection.documents;
                    documents.retain(|r| !r.is_system());
                    documents
                }
                Err(e) => {
                    tracing::warn!("Discarding unparsable document collection: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        tracing::info!("Loaded {} stored documents", records.len());
        Self { slot, records }
    }

    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&DocumentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Append a batch of new records in order, then persist
    pub fn append_batch(&mut self, batch: Vec<DocumentRecord>) -> Result<(), SlotError> {
        if batch.is_empty() {
            return Ok(());
        }
        self.records.extend(batch);
        self.save()
    }

    /// Remove a record by id; a no-op for unknown ids
    pub fn remove(&mut self, id: &str) -> Result<(), SlotError> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Ok(());
        }
        self.save()
    }

    fn save(&mut self) -> Result<(), SlotError> {
        let payload = serde_json::to_string(&PersistedCollection {
            documents: self.records.clone(),
        })?;
        self.slot.set(STORE_KEY, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Category;
    use crate::core::storage::MemorySlot;

    fn sample(name: &str) -> DocumentRecord {
        DocumentRecord::new_upload(name, Category::PastPapers, b"content")
    }

    #[test]
    fn test_starts_empty_without_slot_data() {
        let store = DocumentStore::load(MemorySlot::new());
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_starts_empty_on_corrupt_slot_data() {
        let mut slot = MemorySlot::new();
        slot.seed(STORE_KEY, "{not json at all");
        let store = DocumentStore::load(slot);
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_round_trip_reproduces_identical_records() {
        let mut slot = MemorySlot::new();
        let originals;
        {
            let mut store = DocumentStore::load(MemorySlot::new());
            store
                .append_batch(vec![sample("a.pdf"), sample("b.docx")])
                .unwrap();
            originals = store.records().to_vec();
            slot.seed(STORE_KEY, store.slot.raw(STORE_KEY).unwrap());
        }
        // Identical set after a simulated restart: same ids, names,
        // categories, dates, and encoded content
        let restored = DocumentStore::load(slot);
        assert_eq!(restored.records(), originals.as_slice());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = DocumentStore::load(MemorySlot::new());
        store.append_batch(vec![sample("1.pdf")]).unwrap();
        store
            .append_batch(vec![sample("2.pdf"), sample("3.pdf")])
            .unwrap();
        let names: Vec<_> = store.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["1.pdf", "2.pdf", "3.pdf"]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = DocumentStore::load(MemorySlot::new());
        store.append_batch(vec![sample("a.pdf")]).unwrap();
        store.remove("no-such-id").unwrap();
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn test_remove_deletes_and_persists() {
        let mut store = DocumentStore::load(MemorySlot::new());
        store
            .append_batch(vec![sample("a.pdf"), sample("b.pdf")])
            .unwrap();
        let id = store.records()[0].id.clone();
        store.remove(&id).unwrap();
        assert_eq!(store.records().len(), 1);
        assert!(store.get(&id).is_none());
        assert!(!store.slot.raw(STORE_KEY).unwrap().contains("a.pdf"));
    }

    #[test]
    fn test_quota_error_keeps_memory_authoritative() {
        let mut store = DocumentStore::load(MemorySlot::with_quota(16));
        let err = store.append_batch(vec![sample("big.pdf")]).unwrap_err();
        assert!(matches!(err, SlotError::QuotaExceeded { .. }));
        // In-memory collection still holds the record
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn test_load_discards_persisted_system_records() {
        let catalog = crate::core::catalog::default_catalog();
        let payload = serde_json::to_string(&PersistedCollection {
            documents: vec![catalog[0].clone(), sample("mine.pdf")],
        })
        .unwrap();
        let mut slot = MemorySlot::new();
        slot.seed(STORE_KEY, &payload);
        let store = DocumentStore::load(slot);
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].name, "mine.pdf");
    }
}
