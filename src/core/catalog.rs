//! Built-in example documents
//!
//! The catalog is regenerated from static data every session. Entries are
//! never persisted and never mutated; their content stays as raw text until
//! the preview pipeline renders it on selection.

use super::record::{Category, DocumentContent, DocumentRecord};

/// Size column placeholder for catalog entries
const CATALOG_SIZE_LABEL: &str = "--";

/// Static (title, text) source for the catalog
const ENTRIES: &[(&str, &str)] = &[
    (
        "2023 Paper 1",
        "MATHEMATICS — PAPER 1\n\
         Time allowed: 2 hours\n\n\
         Answer ALL questions. Show your working.\n\n\
         1. Solve for x: 3x + 7 = 22.\n\
         2. Factorise fully: x^2 - 5x + 6.\n\
         3. A rectangle has perimeter 36 cm and length twice its width.\n   \
         Find its area.\n\
         4. Differentiate y = 4x^3 - 2x + 1 with respect to x.\n\
         5. The probability of rain on any day is 0.3. Find the probability\n   \
         of rain on exactly two of three consecutive days.\n",
    ),
    (
        "2023 Paper 2",
        "MATHEMATICS — PAPER 2\n\
         Time allowed: 2 hours 30 minutes\n\n\
         Section A: answer all questions. Section B: answer any three.\n\n\
         1. Prove that the sum of the first n odd numbers is n^2.\n\
         2. Sketch the graph of y = sin(2x) for 0 <= x <= 2*pi.\n\
         3. Find the equation of the tangent to y = x^2 - 3x at x = 2.\n\
         4. A bag contains 5 red and 3 blue counters. Two are drawn without\n   \
         replacement. Find the probability both are red.\n",
    ),
    (
        "2022 Paper 1",
        "MATHEMATICS — PAPER 1 (2022)\n\
         Time allowed: 2 hours\n\n\
         1. Evaluate 2^10 - 3^6.\n\
         2. Simplify (x^2 - 9) / (x + 3).\n\
         3. The nth term of a sequence is 3n - 1. Find the sum of the first\n   \
         20 terms.\n\
         4. Solve the simultaneous equations: 2x + y = 7 and x - y = 2.\n",
    ),
    (
        "2022 Paper 2",
        "MATHEMATICS — PAPER 2 (2022)\n\
         Time allowed: 2 hours 30 minutes\n\n\
         1. Express 0.727272... as a fraction in its lowest terms.\n\
         2. Find the area enclosed between y = x^2 and y = 2x.\n\
         3. A fair die is rolled twice. Find the probability the sum of the\n   \
         two scores is at least 10.\n\
         4. Show that the line y = 2x + 1 does not intersect the circle\n   \
         x^2 + y^2 = 0.1.\n",
    ),
];

/// Materialize the catalog. Pure and idempotent: repeated calls produce
/// byte-identical records, ids included.
pub fn default_catalog() -> Vec<DocumentRecord> {
    ENTRIES
        .iter()
        .enumerate()
        .map(|(i, (title, text))| DocumentRecord {
            id: format!("default-{}", i),
            name: title.to_string(),
            category: Category::PastPapers,
            upload_date: "System".to_string(),
            size_label: CATALOG_SIZE_LABEL.to_string(),
            mime_type: "application/pdf".to_string(),
            content: DocumentContent::Catalog {
                raw_text: text.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_deterministic() {
        assert_eq!(default_catalog(), default_catalog());
    }

    #[test]
    fn test_catalog_ids_and_flags() {
        let catalog = default_catalog();
        assert!(!catalog.is_empty());
        for (i, record) in catalog.iter().enumerate() {
            assert_eq!(record.id, format!("default-{}", i));
            assert_eq!(record.category, Category::PastPapers);
            assert_eq!(record.upload_date, "System");
            assert!(record.is_system());
            assert!(record.is_previewable());
        }
    }

    #[test]
    fn test_catalog_contains_named_paper() {
        assert!(default_catalog().iter().any(|r| r.name == "2023 Paper 1"));
    }
}
