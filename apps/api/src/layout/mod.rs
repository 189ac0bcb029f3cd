// Document formatter: generated text → classified blocks → paginated PDF → temp file.
// CPU-bound; callers on the async runtime run it inside tokio::task::spawn_blocking.

pub mod blocks;
pub mod builder;
pub mod font_metrics;
pub mod page;
pub mod pdf;

use std::io::Write;
use std::path::Path;

use tempfile::TempPath;
use thiserror::Error;
use tracing::debug;

pub use blocks::DocumentBlock;
pub use builder::{DocumentBuilder, LaidOutPage};
pub use page::PageConfig;

/// Fixed header at the top of the first page.
pub const DOCUMENT_HEADER: &str = "Resume";

const TEMP_PREFIX: &str = "resume-";
const TEMP_SUFFIX: &str = ".pdf";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("PDF serialization failed: {0}")]
    Serialize(String),

    #[error("temporary file write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A fully rendered resume: the blocks it was built from, their page layout,
/// and the serialized PDF.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub blocks: Vec<DocumentBlock>,
    pub pages: Vec<LaidOutPage>,
    pub bytes: Vec<u8>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Formats generated resume text into a paginated PDF.
///
/// Empty text (after asterisks are stripped) yields a header-only document.
pub fn format(raw_text: &str, config: &PageConfig) -> Result<RenderedDocument, WriteError> {
    let blocks = blocks::parse_blocks(raw_text);
    let pages = DocumentBuilder::new(config.clone())
        .header(DOCUMENT_HEADER)
        .blocks(&blocks)
        .layout();
    let bytes = pdf::render_pdf(&pages, config, DOCUMENT_HEADER)?;

    debug!(
        blocks = blocks.len(),
        pages = pages.len(),
        bytes = bytes.len(),
        "Formatted resume document"
    );

    Ok(RenderedDocument {
        blocks,
        pages,
        bytes,
    })
}

/// Writes the document to a uniquely named `.pdf` temp file in `dir`
/// (the system temp directory when `None`).
///
/// The file is removed when the returned `TempPath` is dropped.
pub fn materialize(
    document: &RenderedDocument,
    dir: Option<&Path>,
) -> Result<TempPath, WriteError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
    let mut file = match dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    file.write_all(&document.bytes)?;
    file.flush()?;
    Ok(file.into_temp_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::pdf::extract_page_texts;

    #[test]
    fn test_empty_text_renders_header_only() {
        let doc = format("", &PageConfig::default()).unwrap();
        assert!(doc.blocks.is_empty());
        assert_eq!(doc.page_count(), 1);
        assert_eq!(extract_page_texts(&doc.bytes), vec![vec!["Resume".to_string()]]);
    }

    #[test]
    fn test_asterisks_only_is_empty() {
        let doc = format("** *** *", &PageConfig::default()).unwrap();
        assert!(doc.blocks.is_empty());
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_education_example_end_to_end() {
        let raw = "**Education**\nBS Computer Science: State University, 2024";
        let doc = format(raw, &PageConfig::default()).unwrap();
        assert_eq!(
            doc.blocks,
            vec![
                DocumentBlock::Title("Education".to_string()),
                DocumentBlock::Body("BS Computer Science: State University, 2024".to_string()),
            ]
        );
        assert_eq!(
            extract_page_texts(&doc.bytes),
            vec![vec![
                "Resume".to_string(),
                "Education".to_string(),
                "BS Computer Science: State University, 2024".to_string(),
            ]]
        );
    }

    #[test]
    fn test_format_twice_is_byte_identical() {
        let raw = "**Jane Doe**\nEmail: jane@example.com\n**Skills**\nRust: 5 years";
        let a = format(raw, &PageConfig::default()).unwrap();
        let b = format(raw, &PageConfig::default()).unwrap();
        assert_eq!(a.blocks, b.blocks);
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_long_generation_paginates() {
        let raw: String = (0..20)
            .map(|i| format!("**Section {i}**\nDetail {i}: some text\nMore: lines\n"))
            .collect();
        let doc = format(&raw, &PageConfig::default()).unwrap();
        assert_eq!(doc.blocks.len(), 40);
        assert!(doc.page_count() > 1);
        let texts = extract_page_texts(&doc.bytes);
        assert_eq!(texts.len(), doc.page_count());
        assert_eq!(texts[0][0], "Resume");
    }

    #[test]
    fn test_materialize_writes_unique_pdf_files() {
        let dir = tempfile::tempdir().unwrap();
        let doc = format("**Skills**\nRust: yes", &PageConfig::default()).unwrap();

        let first = materialize(&doc, Some(dir.path())).unwrap();
        let second = materialize(&doc, Some(dir.path())).unwrap();

        assert_ne!(first.to_path_buf(), second.to_path_buf());
        for path in [&first, &second] {
            assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
            assert!(path.starts_with(dir.path()));
            assert_eq!(std::fs::read(path).unwrap(), doc.bytes);
        }
    }

    #[test]
    fn test_materialized_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let doc = format("", &PageConfig::default()).unwrap();
        let path = materialize(&doc, Some(dir.path())).unwrap();
        let owned = path.to_path_buf();
        assert!(owned.exists());
        drop(path);
        assert!(!owned.exists());
    }

    #[test]
    fn test_materialize_into_missing_dir_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let doc = format("", &PageConfig::default()).unwrap();
        let err = materialize(&doc, Some(&missing)).unwrap_err();
        assert!(matches!(err, WriteError::Io(_)));
    }
}
