//! Document records for the library

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Category a document is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    PastPapers,
    Textbooks,
}

impl Category {
    /// Display label for the category tab
    pub fn label(&self) -> &'static str {
        match self {
            Category::PastPapers => "Past Papers",
            Category::Textbooks => "Textbooks",
        }
    }
}

/// Where a record's content comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentContent {
    /// User upload: the full file body as a data URI (mime + base64 payload)
    User { encoded: String },
    /// System-provided catalog entry: plain text, rendered to a document on demand
    Catalog { raw_text: String },
}

/// A single document in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Human-readable date, or the literal "System" for catalog entries
    pub upload_date: String,
    pub size_label: String,
    pub mime_type: String,
    pub content: DocumentContent,
}

impl DocumentRecord {
    /// Create a record for a freshly uploaded file
    pub fn new_upload(name: &str, category: Category, bytes: &[u8]) -> Self {
        let mime = mime_for_name(name);
        Self {
            id: new_upload_id(),
            name: name.to_string(),
            category,
            upload_date: chrono::Local::now().format("%-d %b %Y").to_string(),
            size_label: format_size(bytes.len() as u64),
            mime_type: mime.to_string(),
            content: DocumentContent::User {
                encoded: encode_data_uri(mime, bytes),
            },
        }
    }

    /// Whether this record came from the built-in catalog
    pub fn is_system(&self) -> bool {
        matches!(self.content, DocumentContent::Catalog { .. })
    }

    /// Whether the viewer can preview this record inline
    pub fn is_previewable(&self) -> bool {
        match &self.content {
            DocumentContent::Catalog { .. } => true,
            DocumentContent::User { .. } => {
                self.mime_type == "application/pdf"
                    || self.name.to_lowercase().ends_with(".pdf")
            }
        }
    }
}

/// Generate an id for a user upload: millisecond timestamp plus random suffix.
/// Never collides with the catalog's `default-<n>` namespace.
pub fn new_upload_id() -> String {
    format!(
        "{}-{:04x}",
        chrono::Utc::now().timestamp_millis(),
        rand::random::<u16>()
    )
}

/// Best-effort MIME type from the filename extension
pub fn mime_for_name(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

/// Human-readable size string
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Encode raw bytes as a self-describing data URI
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode a data URI back into its MIME type and raw bytes
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = match uri.strip_prefix("data:") {
        Some(rest) => rest,
        None => bail!("not a data URI"),
    };
    let (mime, payload) = rest
        .split_once(";base64,")
        .context("data URI missing base64 payload")?;
    let bytes = STANDARD
        .decode(payload)
        .context("invalid base64 payload")?;
    Ok((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_name() {
        assert_eq!(mime_for_name("report.pdf"), "application/pdf");
        assert_eq!(mime_for_name("REPORT.PDF"), "application/pdf");
        assert_eq!(mime_for_name("notes.doc"), "application/msword");
        assert_eq!(mime_for_name("mystery.bin"), "application/octet-stream");
        assert_eq!(mime_for_name("noextension"), "application/octet-stream");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_data_uri_round_trip() {
        let bytes = b"%PDF-1.4 fake content";
        let uri = encode_data_uri("application/pdf", bytes);
        assert!(uri.starts_with("data:application/pdf;base64,"));
        let (mime, decoded) = decode_data_uri(&uri).unwrap();
        assert_eq!(mime, "application/pdf");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_data_uri("application/pdf").is_err());
        assert!(decode_data_uri("data:application/pdf;base64,!!!not base64!!!").is_err());
    }

    #[test]
    fn test_new_upload_fields() {
        let record = DocumentRecord::new_upload("sheet.xlsx", Category::Textbooks, b"abc");
        assert_eq!(record.category, Category::Textbooks);
        assert_eq!(record.name, "sheet.xlsx");
        assert_eq!(record.size_label, "3 B");
        assert!(!record.is_system());
        assert!(!record.is_previewable());
        assert!(!record.id.starts_with("default-"));
    }
}
