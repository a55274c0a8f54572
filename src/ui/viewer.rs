//! Viewer pane for the selected document

use eframe::egui;

use crate::app::PapershelfApp;
use crate::core::blob::BlobRefService;
use crate::core::preview::PreviewState;
use crate::core::storage::StorageSlot;

/// Viewer pane
pub struct ViewerPanel;

impl ViewerPanel {
    /// Show the viewer pane
    pub fn show<S: StorageSlot, B: BlobRefService>(ui: &mut egui::Ui, app: &mut PapershelfApp<S, B>) {
        match app.preview.state().clone() {
            PreviewState::Idle => Self::show_empty(ui),
            PreviewState::Ready { record_id } => Self::show_ready(ui, app, &record_id),
            PreviewState::NotPreviewable { record_id } => {
                Self::show_fallback(ui, app, &record_id, "Preview is not available for this format.")
            }
            PreviewState::Unavailable { record_id } => {
                Self::show_fallback(ui, app, &record_id, "Preview is not available.")
            }
        }
    }

    fn show_header<S: StorageSlot, B: BlobRefService>(ui: &mut egui::Ui, app: &PapershelfApp<S, B>, record_id: &str) {
        if let Some(record) = app.find_record(record_id) {
            ui.heading(&record.name);
            ui.weak(format!(
                "{} \u{00B7} {} \u{00B7} {}",
                record.upload_date, record.size_label, record.mime_type
            ));
            ui.separator();
        }
    }

    fn show_ready<S: StorageSlot, B: BlobRefService>(ui: &mut egui::Ui, app: &mut PapershelfApp<S, B>, record_id: &str) {
        Self::show_header(ui, app, record_id);
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Open preview").clicked() {
                app.open_preview();
            }
            if ui.button("Download").clicked() {
                let id = record_id.to_string();
                app.download_record(&id);
            }
        });
    }

    fn show_fallback<S: StorageSlot, B: BlobRefService>(
        ui: &mut egui::Ui,
        app: &mut PapershelfApp<S, B>,
        record_id: &str,
        message: &str,
    ) {
        Self::show_header(ui, app, record_id);
        ui.add_space(8.0);
        ui.label(message);
        ui.label("Download the document to view it.");
        if ui.button("Download").clicked() {
            let id = record_id.to_string();
            app.download_record(&id);
        }
    }

    /// Show empty state
    fn show_empty(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label("No document selected");
            ui.label("Pick a document from the library to preview it");
        });
    }
}
