//! Upload pipeline: validate, read, and encode user-selected files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::record::{Category, DocumentRecord};

/// Per-file size ceiling (5 MiB)
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted file extensions, matched case-insensitively
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx"];

/// Result of processing one batch of selected files
#[derive(Debug)]
pub struct UploadBatch {
    /// Accepted records, in original selection order
    pub records: Vec<DocumentRecord>,
    /// Files skipped for exceeding the size ceiling
    pub oversize_skipped: usize,
}

impl UploadBatch {
    /// True when nothing was accepted and no size warning applies
    pub fn is_empty_with_no_warning(&self) -> bool {
        self.records.is_empty() && self.oversize_skipped == 0
    }
}

enum ReadResult {
    Record(Box<DocumentRecord>),
    Oversize,
    Failed,
}

/// Reads and encodes selected files on a multi-thread runtime.
/// Reads race independently; the batch completes when all have settled.
pub struct Uploader {
    runtime: tokio::runtime::Runtime,
}

impl Uploader {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start upload runtime")?;
        Ok(Self { runtime })
    }

    /// Validate and ingest a batch of files for the given category.
    ///
    /// Files with a disallowed extension are silently dropped. Oversize files
    /// are dropped and counted. A failed read skips that file without
    /// aborting the rest. Results keep the original selection order.
    pub fn process(&self, paths: &[PathBuf], category: Category) -> Result<UploadBatch> {
        let mut settled: Vec<(usize, ReadResult)> = self.runtime.block_on(async {
            let mut set = tokio::task::JoinSet::new();
            for (index, path) in paths.iter().enumerate() {
                let name = display_name(path);
                if !has_allowed_extension(&name) {
                    tracing::debug!("Skipping {} (extension not allowed)", name);
                    continue;
                }
                let path = path.clone();
                set.spawn(async move { (index, read_one(&path, &name, category).await) });
            }

            let mut settled = Vec::new();
            while let Some(joined) = set.join_next().await {
                settled.push(joined.context("Upload task panicked")?);
            }
            Ok::<_, anyhow::Error>(settled)
        })?;

        // Completion order is arbitrary; restore selection order
        settled.sort_by_key(|(index, _)| *index);

        let mut batch = UploadBatch {
            records: Vec::new(),
            oversize_skipped: 0,
        };
        for (_, result) in settled {
            match result {
                ReadResult::Record(record) => batch.records.push(*record),
                ReadResult::Oversize => batch.oversize_skipped += 1,
                ReadResult::Failed => {}
            }
        }
        tracing::info!(
            "Upload batch: {} accepted, {} oversize",
            batch.records.len(),
            batch.oversize_skipped
        );
        Ok(batch)
    }
}

async fn read_one(path: &Path, name: &str, category: Category) -> ReadResult {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!("Failed to stat {}: {}", path.display(), e);
            return ReadResult::Failed;
        }
    };
    if metadata.len() > MAX_FILE_BYTES {
        return ReadResult::Oversize;
    }
    match tokio::fs::read(path).await {
        Ok(bytes) => ReadResult::Record(Box::new(DocumentRecord::new_upload(
            name, category, &bytes,
        ))),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            ReadResult::Failed
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn has_allowed_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, vec![0x42u8; len]).unwrap();
        path
    }

    #[test]
    fn test_mixed_batch_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_file(dir.path(), "report.pdf", 2 * 1024 * 1024),
            write_file(dir.path(), "notes.exe", 1024 * 1024),
            write_file(dir.path(), "sheet.xlsx", 6 * 1024 * 1024),
        ];
        let batch = Uploader::new()
            .unwrap()
            .process(&paths, Category::Textbooks)
            .unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].name, "report.pdf");
        assert_eq!(batch.records[0].category, Category::Textbooks);
        assert_eq!(batch.oversize_skipped, 1);
        assert!(!batch.is_empty_with_no_warning());
    }

    #[test]
    fn test_results_keep_selection_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = (0..8)
            .map(|i| write_file(dir.path(), &format!("doc-{}.pdf", i), 64 + i))
            .collect();
        let batch = Uploader::new()
            .unwrap()
            .process(&paths, Category::PastPapers)
            .unwrap();
        let names: Vec<_> = batch.records.iter().map(|r| r.name.as_str()).collect();
        let expected: Vec<_> = (0..8).map(|i| format!("doc-{}.pdf", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_disallowed_extension_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![write_file(dir.path(), "malware.exe", 128)];
        let batch = Uploader::new()
            .unwrap()
            .process(&paths, Category::PastPapers)
            .unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.oversize_skipped, 0);
        assert!(batch.is_empty_with_no_warning());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![write_file(dir.path(), "LOUD.PDF", 128)];
        let batch = Uploader::new()
            .unwrap()
            .process(&paths, Category::PastPapers)
            .unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].mime_type, "application/pdf");
    }

    #[test]
    fn test_one_failed_read_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            dir.path().join("vanished.pdf"),
            write_file(dir.path(), "real.pdf", 128),
        ];
        let batch = Uploader::new()
            .unwrap()
            .process(&paths, Category::Textbooks)
            .unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].name, "real.pdf");
    }

    #[test]
    fn test_exactly_at_ceiling_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![write_file(dir.path(), "max.pdf", MAX_FILE_BYTES as usize)];
        let batch = Uploader::new()
            .unwrap()
            .process(&paths, Category::PastPapers)
            .unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.oversize_skipped, 0);
    }
}
