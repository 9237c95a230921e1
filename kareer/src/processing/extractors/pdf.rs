use crate::error::{KareerError, Result};

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn extract(bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| KareerError::Processing(format!("PDF parse error: {e}")))
    }
}
