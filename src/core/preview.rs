//! Preview pipeline
//!
//! Owns at most one live blob reference at a time. Every selection change
//! revokes the previous reference before generating the next one, and
//! teardown revokes whatever is left.

use super::blob::{BlobHandle, BlobRefService};
use super::record::{decode_data_uri, DocumentContent, DocumentRecord};
use super::render;

/// What the viewer should show for the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// Nothing selected
    Idle,
    /// A reference is live for the selected record
    Ready { record_id: String },
    /// Selected record's format has no inline preview (Word/Excel)
    NotPreviewable { record_id: String },
    /// Stored content could not be decoded; viewer falls back gracefully
    Unavailable { record_id: String },
}

pub struct PreviewPipeline<B: BlobRefService> {
    blobs: B,
    handle: Option<BlobHandle>,
    state: PreviewState,
}

impl<B: BlobRefService> PreviewPipeline<B> {
    pub fn new(blobs: B) -> Self {
        Self {
            blobs,
            handle: None,
            state: PreviewState::Idle,
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// Live reference for the current selection, if any
    pub fn handle(&self) -> Option<&BlobHandle> {
        self.handle.as_ref()
    }

    /// Reference service access for leak assertions
    #[cfg(test)]
    pub fn blob_service(&self) -> &B {
        &self.blobs
    }

    /// React to a selection change. `None` deselects.
    pub fn select(&mut self, record: Option<&DocumentRecord>) {
        // Revoke before generating, so rapid re-selection never leaks
        self.revoke_current();

        let record = match record {
            Some(record) => record,
            None => {
                self.state = PreviewState::Idle;
                return;
            }
        };

        if !record.is_previewable() {
            self.state = PreviewState::NotPreviewable {
                record_id: record.id.clone(),
            };
            return;
        }

        let bytes = match &record.content {
            DocumentContent::Catalog { raw_text } => render::render(&record.name, raw_text),
            DocumentContent::User { encoded } => match decode_data_uri(encoded) {
                Ok((_, bytes)) => bytes,
                Err(e) => {
                    tracing::debug!("Preview decode failed for {}: {}", record.id, e);
                    self.state = PreviewState::Unavailable {
                        record_id: record.id.clone(),
                    };
                    return;
                }
            },
        };

        match self.blobs.create_reference(&bytes, "application/pdf") {
            Ok(handle) => {
                self.handle = Some(handle);
                self.state = PreviewState::Ready {
                    record_id: record.id.clone(),
                };
            }
            Err(e) => {
                tracing::warn!("Failed to create preview reference: {}", e);
                self.state = PreviewState::Unavailable {
                    record_id: record.id.clone(),
                };
            }
        }
    }

    fn revoke_current(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.blobs.revoke(handle);
        }
    }
}

impl<B: BlobRefService> Drop for PreviewPipeline<B> {
    fn drop(&mut self) {
        self.revoke_current();
    }
}
