use crate::error::{KareerError, Result};

use super::extractors::{DocxExtractor, PdfExtractor};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFileKind {
    Pdf,
    Docx,
}

impl ResumeFileKind {
    /// Work out what an uploaded file is, in order of trust: the
    /// declared content type, then byte sniffing, then the filename
    /// extension.
    pub fn detect(
        bytes: &[u8],
        content_type: Option<&str>,
        filename: Option<&str>,
    ) -> Result<Self> {
        if let Some(ct) = content_type {
            let ct = ct.split(';').next().unwrap_or(ct).trim();
            match ct {
                PDF_MIME => return Ok(Self::Pdf),
                DOCX_MIME => return Ok(Self::Docx),
                // An unhelpful generic type falls through to sniffing.
                "application/octet-stream" | "" => {}
                other => {
                    return Err(KareerError::UnsupportedFormat(other.to_string()));
                }
            }
        }

        if let Some(kind) = infer::get(bytes) {
            match kind.mime_type() {
                PDF_MIME => return Ok(Self::Pdf),
                DOCX_MIME => return Ok(Self::Docx),
                _ => {}
            }
        }

        if let Some(name) = filename {
            let lower = name.to_lowercase();
            if lower.ends_with(".pdf") {
                return Ok(Self::Pdf);
            }
            if lower.ends_with(".docx") {
                return Ok(Self::Docx);
            }
        }

        Err(KareerError::UnsupportedFormat(
            filename.unwrap_or("unknown").to_string(),
        ))
    }
}

/// Extract plain text from an uploaded resume file.
pub fn extract_resume_text(
    bytes: &[u8],
    content_type: Option<&str>,
    filename: Option<&str>,
) -> Result<String> {
    let kind = ResumeFileKind::detect(bytes, content_type, filename)?;
    let text = match kind {
        ResumeFileKind::Pdf => PdfExtractor::extract(bytes)?,
        ResumeFileKind::Docx => DocxExtractor::extract(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(KareerError::Processing(
            "No text could be extracted from the file".to_string(),
        ));
    }

    Ok(text)
}
