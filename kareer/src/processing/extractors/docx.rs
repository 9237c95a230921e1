use crate::error::{KareerError, Result};

pub struct DocxExtractor;

impl DocxExtractor {
    /// Pull the visible text out of a DOCX resume: paragraph runs plus
    /// table cells (resumes frequently lay skills out in tables).
    pub fn extract(bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| KareerError::Processing(format!("DOCX parse error: {e}")))?;

        let mut text = String::new();

        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    let para_text = Self::paragraph_text(paragraph);
                    if !para_text.trim().is_empty() {
                        if !text.is_empty() {
                            text.push('\n');
                        }
                        text.push_str(&para_text);
                    }
                }
                docx_rs::DocumentChild::Table(table) => {
                    let table_text = Self::table_text(table);
                    if !table_text.is_empty() {
                        if !text.is_empty() {
                            text.push('\n');
                        }
                        text.push_str(&table_text);
                    }
                }
                _ => {}
            }
        }

        Ok(text)
    }

    fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
        let mut content = String::new();
        for para_child in &paragraph.children {
            if let docx_rs::ParagraphChild::Run(run) = para_child {
                for run_child in &run.children {
                    if let docx_rs::RunChild::Text(text) = run_child {
                        content.push_str(&text.text);
                    }
                }
            }
        }
        content
    }

    fn table_text(table: &docx_rs::Table) -> String {
        let mut lines: Vec<String> = Vec::new();

        for table_child in &table.rows {
            let docx_rs::TableChild::TableRow(row) = table_child;
            let mut cells: Vec<String> = Vec::new();
            for row_child in &row.cells {
                let docx_rs::TableRowChild::TableCell(cell) = row_child;
                let mut cell_text = String::new();
                for cell_child in &cell.children {
                    if let docx_rs::TableCellContent::Paragraph(para) = cell_child {
                        let para_text = Self::paragraph_text(para);
                        if !cell_text.is_empty() {
                            cell_text.push(' ');
                        }
                        cell_text.push_str(&para_text);
                    }
                }
                let cell_text = cell_text.trim().to_string();
                if !cell_text.is_empty() {
                    cells.push(cell_text);
                }
            }
            if !cells.is_empty() {
                lines.push(cells.join(" | "));
            }
        }

        lines.join("\n")
    }
}
