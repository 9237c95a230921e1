mod docx;
mod pdf;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
