use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use super::ExtractionError;

/// Extract PDF text page by page, joining pages in order with a newline after each.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed font tables instead of erroring.
    let text = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|_| ExtractionError::PdfError("extractor panicked on malformed PDF".to_string()))?
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    // pdf-extract returns all text as one string with pages separated by form feeds.
    let pages: Vec<&str> = text
        .split('\x0C')
        .filter(|page| !page.trim().is_empty())
        .collect();

    if pages.is_empty() {
        warn!("PDF contains no extractable text (scanned or image-only?)");
        return Ok(String::new());
    }

    Ok(join_pages(&pages))
}

fn join_pages(pages: &[&str]) -> String {
    let mut out = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        out.push_str(page);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_joined_in_order() {
        assert_eq!(join_pages(&["first page", "second page"]), "first page\nsecond page\n");
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(extract_pdf(b"%PDF-garbage").is_err());
    }
}
