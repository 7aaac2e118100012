//! Document text extraction — the upstream collaborator that turns an
//! uploaded PDF or DOCX into plain text.
//!
//! PDF goes through `pdf-extract`. DOCX is a ZIP archive: the text lives in
//! `word/document.xml`, so we read that entry and collect the XML text
//! events, emitting a newline per paragraph. Both paths are blocking and run
//! under `spawn_blocking`.

use std::io::Read;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// The declared type of an uploaded document. Parsed from the file extension
/// at the HTTP boundary; undeclared types are rejected there and never reach
/// this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Pdf,
    Docx,
}

impl DocumentType {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentType::Pdf),
            "docx" => Some(DocumentType::Docx),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("text extraction failed: {0}")]
pub struct DocumentError(String);

impl DocumentError {
    fn new(message: impl Into<String>) -> Self {
        DocumentError(message.into())
    }
}

/// Extracts the plain text of a staged document.
pub async fn extract_text(path: &Path, doc_type: DocumentType) -> Result<String, DocumentError> {
    let path: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || match doc_type {
        DocumentType::Pdf => extract_pdf(&path),
        DocumentType::Docx => extract_docx(&path),
    })
    .await
    .map_err(|e| DocumentError::new(format!("extraction task failed: {e}")))?
}

fn extract_pdf(path: &Path) -> Result<String, DocumentError> {
    pdf_extract::extract_text(path).map_err(|e| DocumentError::new(format!("could not read PDF: {e}")))
}

fn extract_docx(path: &Path) -> Result<String, DocumentError> {
    let file = std::fs::File::open(path)
        .map_err(|e| DocumentError::new(format!("could not open DOCX: {e}")))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| DocumentError::new(format!("could not open DOCX as ZIP: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| DocumentError::new(format!("DOCX has no document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::new(format!("could not read document.xml: {e}")))?;

    collect_document_text(&xml)
}

/// Walks document.xml and concatenates its text runs, one line per
/// paragraph (`w:p`), a newline per explicit break (`w:br`).
fn collect_document_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let run = t
                    .unescape()
                    .map_err(|e| DocumentError::new(format!("malformed document.xml: {e}")))?;
                text.push_str(&run);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:br" => text.push('\n'),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(DocumentError::new(format!("malformed document.xml: {e}")));
            }
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_extension_accepts_pdf_and_docx_case_insensitively() {
        assert_eq!(DocumentType::from_extension("pdf"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_extension("PDF"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_extension("docx"), Some(DocumentType::Docx));
        assert_eq!(DocumentType::from_extension("DocX"), Some(DocumentType::Docx));
    }

    #[test]
    fn test_from_extension_rejects_everything_else() {
        for extension in ["doc", "txt", "rtf", "png", ""] {
            assert_eq!(DocumentType::from_extension(extension), None, "{extension}");
        }
    }

    fn write_docx(path: &Path, document_xml: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    #[tokio::test]
    async fn test_docx_paragraphs_come_out_one_per_line() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
                <w:p><w:r><w:t>Software Engineer, Acme Corp</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        write_docx(&path, xml);

        let text = extract_text(&path, DocumentType::Docx).await.unwrap();
        assert!(text.contains("Jane Doe\n"));
        assert!(text.contains("Software Engineer, Acme Corp\n"));
    }

    #[tokio::test]
    async fn test_docx_entities_are_unescaped() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body><w:p><w:r><w:t>R&amp;D Lead</w:t></w:r></w:p></w:body>
        </w:document>"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        write_docx(&path, xml);

        let text = extract_text(&path, DocumentType::Docx).await.unwrap();
        assert!(text.contains("R&D Lead"));
    }

    #[tokio::test]
    async fn test_non_zip_bytes_fail_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let error = extract_text(&path, DocumentType::Docx).await.unwrap_err();
        assert!(error.to_string().contains("text extraction failed"));
    }
}
