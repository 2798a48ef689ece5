//! Document loading: turns uploaded or on-disk résumés into plain text.

use std::path::Path;

use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// The only extension accepted for uploaded résumés.
pub const ALLOWED_UPLOAD_EXTENSION: &str = "pdf";

/// Returns true when `filename` carries the accepted upload extension.
pub fn is_allowed_upload(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ALLOWED_UPLOAD_EXTENSION))
}

/// Extracts the text layer of a PDF held in memory.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::InvalidInput(format!("Could not read PDF: {e}")))
}

/// Runs [`extract_pdf_text`] on the blocking pool. A panic inside the PDF
/// parser surfaces as `Internal` instead of taking down the request task.
pub async fn extract_uploaded_pdf(bytes: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
}

/// Loads example text from a PDF (by extension) or a plain text file, trimmed.
pub fn load_example_text(path: &Path) -> Result<String, AppError> {
    let text = if path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    {
        extract_pdf_text(&std::fs::read(path)?)?
    } else {
        std::fs::read_to_string(path)?
    };

    let text = text.trim().to_string();
    info!(
        "Loaded {} characters of example text from {}",
        text.chars().count(),
        path.display()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_only_pdf_uploads_allowed() {
        assert!(is_allowed_upload("resume.pdf"));
        assert!(is_allowed_upload("Resume.PDF"));
        assert!(!is_allowed_upload("resume.docx"));
        assert!(!is_allowed_upload("resume"));
        assert!(!is_allowed_upload("pdf"));
    }

    #[test]
    fn test_load_plain_text_example_is_trimmed() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "\n  Engineered cross-functional tooling.  \n").unwrap();
        let text = load_example_text(file.path()).unwrap();
        assert_eq!(text, "Engineered cross-functional tooling.");
    }

    #[test]
    fn test_garbage_pdf_is_invalid_input() {
        let err = extract_pdf_text(b"not a pdf").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_uploaded_garbage_is_invalid_input() {
        let err = extract_uploaded_pdf(Bytes::from_static(b"not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_example_file_is_storage_error() {
        let err = load_example_text(Path::new("/nonexistent/examples.txt")).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
