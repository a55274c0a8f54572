//! Library panel: category tabs, record list, and upload control

use eframe::egui;

use crate::app::PapershelfApp;
use crate::core::blob::BlobRefService;
use crate::core::record::Category;
use crate::core::storage::StorageSlot;

/// Lightweight row snapshot so list rendering does not borrow the app
struct Row {
    id: String,
    name: String,
    upload_date: String,
    size_label: String,
    is_system: bool,
}

/// Library panel
pub struct LibraryPanel;

impl LibraryPanel {
    /// Show the library panel
    pub fn show<S: StorageSlot, B: BlobRefService>(ui: &mut egui::Ui, app: &mut PapershelfApp<S, B>) {
        ui.vertical(|ui| {
            Self::show_tabs(ui, app);
            ui.separator();

            let label = format!("Upload to {}", app.active_category.label());
            if ui.button(label).clicked() {
                app.upload_documents();
            }
            ui.separator();

            let rows = Self::collect_rows(app);
            egui::ScrollArea::vertical()
                .id_salt("library_scroll")
                .show(ui, |ui| {
                    if rows.is_empty() {
                        ui.label("No documents in this category yet");
                        return;
                    }
                    for row in &rows {
                        Self::show_row(ui, app, row);
                    }
                });
        });
    }

    fn show_tabs<S: StorageSlot, B: BlobRefService>(ui: &mut egui::Ui, app: &mut PapershelfApp<S, B>) {
        ui.horizontal(|ui| {
            for category in [Category::PastPapers, Category::Textbooks] {
                let active = app.active_category == category;
                if ui.selectable_label(active, category.label()).clicked() {
                    app.active_category = category;
                }
            }
        });
    }

    /// Catalog entries first, then user records, both filtered by category
    fn collect_rows<S: StorageSlot, B: BlobRefService>(app: &PapershelfApp<S, B>) -> Vec<Row> {
        app.catalog
            .iter()
            .chain(app.store.records())
            .filter(|r| r.category == app.active_category)
            .map(|r| Row {
                id: r.id.clone(),
                name: r.name.clone(),
                upload_date: r.upload_date.clone(),
                size_label: r.size_label.clone(),
                is_system: r.is_system(),
            })
            .collect()
    }

    fn show_row<S: StorageSlot, B: BlobRefService>(ui: &mut egui::Ui, app: &mut PapershelfApp<S, B>, row: &Row) {
        let selected = app.selected_id.as_deref() == Some(&row.id);
        ui.horizontal(|ui| {
            let label = format!("\u{1F4C4} {}", row.name);
            if ui.selectable_label(selected, label).clicked() {
                app.select(Some(row.id.clone()));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // No delete action for system-provided records
                if !row.is_system && ui.button("\u{1F5D1}").on_hover_text("Delete").clicked() {
                    app.request_delete(row.id.clone());
                }
                if ui.button("\u{2B07}").on_hover_text("Download").clicked() {
                    app.download_record(&row.id);
                }
            });
        });
        ui.horizontal(|ui| {
            ui.add_space(20.0);
            ui.weak(format!("{} \u{00B7} {}", row.upload_date, row.size_label));
        });
    }
}
