pub mod chunker;
mod pdf;
pub mod preprocess;
mod txt;

use std::path::Path;

use precis_core::{Document, SourceFormat};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read a document from disk, dispatching on the file extension.
///
/// `.pdf` goes through the PDF extractor; every other file is decoded as
/// UTF-8 with invalid sequences replaced.
pub fn read_document(path: &Path) -> Result<Document, ExtractionError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    extract_bytes(&bytes, &filename)
}

/// Extract text from in-memory file bytes, using `filename` to pick the format.
pub fn extract_bytes(bytes: &[u8], filename: &str) -> Result<Document, ExtractionError> {
    let format = SourceFormat::from_path(Path::new(filename));

    let text = match format {
        SourceFormat::Pdf => pdf::extract_pdf(bytes)?,
        SourceFormat::Text => txt::extract_txt(bytes),
    };

    info!(
        "Read '{}' (type={}): {} words",
        filename,
        format.as_str(),
        precis_core::word_count(&text)
    );

    Ok(Document {
        filename: filename.to_string(),
        format,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_text_file_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Chapter One\n\nIt was a dark night.").unwrap();

        let doc = read_document(file.path()).unwrap();
        assert_eq!(doc.format, SourceFormat::Text);
        assert_eq!(doc.text, "Chapter One\n\nIt was a dark night.");
        assert_eq!(doc.word_count(), 7);
    }

    #[test]
    fn unknown_extension_is_read_as_text() {
        let doc = extract_bytes(b"plain words", "upload.docx").unwrap();
        assert_eq!(doc.format, SourceFormat::Text);
        assert_eq!(doc.text, "plain words");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_document(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ExtractionError::Io { .. }));
    }

    #[test]
    fn corrupt_pdf_is_pdf_error() {
        let err = extract_bytes(b"this is not a pdf", "broken.pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::PdfError(_)));
    }
}
