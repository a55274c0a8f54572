//! Main application state and UI coordination

use eframe::egui;

use crate::core::blob::{BlobRefService, TempFileBlobs};
use crate::core::catalog::default_catalog;
use crate::core::preview::PreviewPipeline;
use crate::core::record::{decode_data_uri, Category, DocumentContent, DocumentRecord};
use crate::core::render;
use crate::core::storage::{FileSlot, SlotError, StorageSlot, QUOTA_BYTES};
use crate::core::store::DocumentStore;
use crate::core::upload::Uploader;
use crate::ui::{library::LibraryPanel, viewer::ViewerPanel};

/// Main application state, generic over the injected storage slot and blob
/// reference service so session behavior is testable without a window.
pub struct PapershelfApp<S: StorageSlot = FileSlot, B: BlobRefService = TempFileBlobs> {
    /// User-uploaded records, persisted across sessions
    pub store: DocumentStore<S>,
    /// System-provided example documents, regenerated each session
    pub catalog: Vec<DocumentRecord>,
    /// Preview pipeline holding the live blob reference, if any
    pub preview: PreviewPipeline<B>,
    /// Currently active category tab
    pub active_category: Category,
    /// Selected record id, if any
    pub selected_id: Option<String>,
    /// Record awaiting delete confirmation
    pub pending_delete: Option<String>,
    /// One-line warning banner; a newer message replaces the older one
    pub banner: Option<String>,
    uploader: Option<Uploader>,
}

impl PapershelfApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let slot = FileSlot::open_default().unwrap_or_else(|e| {
            tracing::warn!("Falling back to temp-dir storage: {}", e);
            FileSlot::new(std::env::temp_dir().join("papershelf"), QUOTA_BYTES)
        });

        let uploader = match Uploader::new() {
            Ok(uploader) => Some(uploader),
            Err(e) => {
                tracing::error!("Upload runtime unavailable: {}", e);
                None
            }
        };

        Self {
            store: DocumentStore::load(slot),
            catalog: default_catalog(),
            preview: PreviewPipeline::new(TempFileBlobs::new()),
            active_category: Category::PastPapers,
            selected_id: None,
            pending_delete: None,
            banner: None,
            uploader,
        }
    }
}

impl<S: StorageSlot, B: BlobRefService> PapershelfApp<S, B> {
    /// Build an app around injected parts (no file picker, no upload runtime)
    #[cfg(test)]
    pub fn with_parts(store: DocumentStore<S>, preview: PreviewPipeline<B>) -> Self {
        Self {
            store,
            catalog: default_catalog(),
            preview,
            active_category: Category::PastPapers,
            selected_id: None,
            pending_delete: None,
            banner: None,
            uploader: None,
        }
    }

    /// Look up a record by id across the catalog and the store
    pub fn find_record(&self, id: &str) -> Option<&DocumentRecord> {
        self.catalog
            .iter()
            .find(|r| r.id == id)
            .or_else(|| self.store.get(id))
    }

    /// Change the current selection; `None` deselects
    pub fn select(&mut self, id: Option<String>) {
        let record = id
            .as_deref()
            .and_then(|id| self.find_record(id))
            .cloned();
        self.preview.select(record.as_ref());
        self.selected_id = record.map(|r| r.id);
    }

    /// Open the multi-file picker and ingest the chosen files
    pub fn upload_documents(&mut self) {
        let paths = rfd::FileDialog::new()
            .add_filter("Documents", &["pdf", "doc", "docx", "xls", "xlsx"])
            .pick_files();
        if let Some(paths) = paths {
            self.ingest_files(&paths);
        }
    }

    fn ingest_files(&mut self, paths: &[std::path::PathBuf]) {
        let Some(uploader) = &self.uploader else {
            self.banner = Some("Error processing files.".to_string());
            return;
        };

        let batch = match uploader.process(paths, self.active_category) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!("Upload batch failed: {}", e);
                self.banner = Some("Error processing files.".to_string());
                return;
            }
        };

        if batch.is_empty_with_no_warning() {
            self.banner = Some(
                "No valid files selected. Allowed formats: PDF, DOC, DOCX, XLS, XLSX \
                 (max 5 MB each)."
                    .to_string(),
            );
            return;
        }
        if batch.oversize_skipped > 0 {
            self.banner = Some("Some files exceed the 5 MB limit and were skipped.".to_string());
        }
        if let Err(e) = self.store.append_batch(batch.records) {
            self.report_save_error(e);
        }
    }

    /// Ask for confirmation before deleting a user record
    pub fn request_delete(&mut self, id: String) {
        self.pending_delete = Some(id);
    }

    fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        if self.selected_id.as_deref() == Some(&id) {
            self.select(None);
        }
        if let Err(e) = self.store.remove(&id) {
            self.report_save_error(e);
        }
    }

    fn report_save_error(&mut self, e: SlotError) {
        match e {
            SlotError::QuotaExceeded { .. } => {
                tracing::warn!("Document slot quota exceeded");
                self.banner = Some(
                    "Storage full: changes will not survive a restart.".to_string(),
                );
            }
            SlotError::Serialize(e) => {
                tracing::error!("Failed to serialize documents: {}", e);
                self.banner = Some("Could not save documents to disk.".to_string());
            }
            SlotError::Io(e) => {
                tracing::error!("Failed to persist documents: {}", e);
                self.banner = Some("Could not save documents to disk.".to_string());
            }
        }
    }

    /// Save a record's content wherever the user picks
    pub fn download_record(&mut self, id: &str) {
        let Some(record) = self.find_record(id).cloned() else {
            return;
        };
        let bytes = match &record.content {
            DocumentContent::User { encoded } => match decode_data_uri(encoded) {
                Ok((_, bytes)) => bytes,
                Err(e) => {
                    tracing::warn!("Download decode failed for {}: {}", record.id, e);
                    self.banner = Some("This document's content could not be read.".to_string());
                    return;
                }
            },
            DocumentContent::Catalog { raw_text } => render::render(&record.name, raw_text),
        };

        let suggested = if record.is_system() {
            format!("{}.pdf", record.name)
        } else {
            record.name.clone()
        };
        let Some(target) = rfd::FileDialog::new().set_file_name(suggested).save_file() else {
            return;
        };
        if let Err(e) = std::fs::write(&target, bytes) {
            tracing::error!("Failed to write {}: {}", target.display(), e);
            self.banner = Some("Could not save the file.".to_string());
        }
    }

    /// Hand the live preview reference to the host's native viewer
    pub fn open_preview(&mut self) {
        let Some(handle) = self.preview.handle() else {
            return;
        };
        if let Err(e) = open::that(handle.uri()) {
            tracing::error!("Failed to open viewer: {}", e);
            self.banner = Some("Could not open the system viewer.".to_string());
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Upload Documents...").clicked() {
                        self.upload_documents();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }

    /// Render the dismissible one-line warning banner
    fn render_banner(&mut self, ctx: &egui::Context) {
        let Some(message) = self.banner.clone() else {
            return;
        };
        egui::TopBottomPanel::top("banner").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(0xd0, 0xa0, 0x20), message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        self.banner = None;
                    }
                });
            });
        });
    }

    /// Render the delete confirmation prompt
    fn render_delete_prompt(&mut self, ctx: &egui::Context) {
        let Some(id) = self.pending_delete.clone() else {
            return;
        };
        let name = self
            .find_record(&id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| id.clone());

        egui::Window::new("Delete document")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Delete \"{}\"? This cannot be undone.", name));
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.pending_delete = None;
                    }
                    if ui.button("Delete").clicked() {
                        self.confirm_delete();
                    }
                });
            });
    }
}

impl eframe::App for PapershelfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_menu_bar(ctx);
        self.render_banner(ctx);
        self.render_delete_prompt(ctx);

        egui::SidePanel::left("library")
            .resizable(true)
            .default_width(320.0)
            .min_width(220.0)
            .show(ctx, |ui| {
                LibraryPanel::show(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ViewerPanel::show(ui, self);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::blob::MemoryBlobs;
    use crate::core::preview::PreviewState;
    use crate::core::storage::MemorySlot;

    fn app_with_upload(name: &str) -> (PapershelfApp<MemorySlot, MemoryBlobs>, String) {
        let mut store = DocumentStore::load(MemorySlot::new());
        store
            .append_batch(vec![DocumentRecord::new_upload(
                name,
                Category::PastPapers,
                b"%PDF-1.4 body",
            )])
            .unwrap();
        let id = store.records()[0].id.clone();
        let app = PapershelfApp::with_parts(store, PreviewPipeline::new(MemoryBlobs::new()));
        (app, id)
    }

    #[test]
    fn test_deleting_selected_record_clears_viewer() {
        let (mut app, id) = app_with_upload("mine.pdf");
        app.select(Some(id.clone()));
        assert_eq!(app.preview.blob_service().live_count(), 1);

        app.request_delete(id.clone());
        app.confirm_delete();

        assert!(app.store.get(&id).is_none());
        assert_eq!(app.selected_id, None);
        assert_eq!(app.preview.state(), &PreviewState::Idle);
        assert_eq!(app.preview.blob_service().live_count(), 0);
    }

    #[test]
    fn test_deleting_unselected_record_keeps_selection() {
        let (mut app, id) = app_with_upload("mine.pdf");
        let paper_id = app.catalog[0].id.clone();
        app.select(Some(paper_id.clone()));

        app.request_delete(id.clone());
        app.confirm_delete();

        assert!(app.store.get(&id).is_none());
        assert_eq!(app.selected_id.as_deref(), Some(paper_id.as_str()));
        assert_eq!(app.preview.blob_service().live_count(), 1);
    }

    #[test]
    fn test_cancelling_delete_changes_nothing() {
        let (mut app, id) = app_with_upload("mine.pdf");
        app.select(Some(id.clone()));
        app.request_delete(id.clone());
        app.pending_delete = None;

        assert!(app.store.get(&id).is_some());
        assert_eq!(app.selected_id.as_deref(), Some(id.as_str()));
    }
}
