//! PDF reader wrapper for PDFium
//!
//! Reads a result-sheet PDF into per-page text with line boundaries that
//! follow the document's visual layout. Result sheets are tables, so the
//! reader clusters characters into lines by Y coordinate and inserts
//! spaces at horizontal gaps, which keeps each table row on one text line
//! regardless of how the PDF's internal text runs are ordered.

use crate::error::{Error, Result};
use pdfium_render::prelude::*;
use std::path::Path;

/// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::UnreadableDocument {
            reason: format!("failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Result-sheet PDF reader
pub struct SheetReader {
    page_count: u32,
    page_texts: Vec<String>,
}

impl SheetReader {
    /// Open a result sheet from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::SheetNotFound {
                path: path.display().to_string(),
            });
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Open a result sheet from raw PDF bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(Error::UnreadableDocument {
                reason: "not a PDF file".to_string(),
            });
        }

        let pdfium = create_pdfium()?;

        let document = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| Error::UnreadableDocument {
                reason: format!("PDFium could not load document: {}", e),
            })?;

        let page_count = document.pages().len() as u32;
        let page_texts = Self::extract_all_page_texts(&document)?;

        Ok(Self {
            page_count,
            page_texts,
        })
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Text of one page (0-indexed), if in range
    pub fn page_text(&self, index: usize) -> Option<&str> {
        self.page_texts.get(index).map(String::as_str)
    }

    /// All page texts joined into one document, page order preserved
    pub fn full_text(&self) -> String {
        self.page_texts.join("\n")
    }

    fn extract_all_page_texts(document: &PdfDocument) -> Result<Vec<String>> {
        let pages = document.pages();
        let page_len = pages.len() as usize;
        let mut texts = Vec::with_capacity(page_len);

        for index in 0..pages.len() {
            let page = pages.get(index).map_err(|e| Error::UnreadableDocument {
                reason: format!("failed to get page {}: {}", index + 1, e),
            })?;

            texts.push(Self::extract_page_text_with_layout(&page)?);
        }

        Ok(texts)
    }

    /// Extract text from a page with Y-coordinate based line grouping
    fn extract_page_text_with_layout(page: &PdfPage) -> Result<String> {
        let text_obj = match page.text() {
            Ok(t) => t,
            Err(_) => return Ok(String::new()),
        };

        // Collect all characters with their positions
        let mut chars_with_pos: Vec<(char, f32, f32)> = Vec::new();

        for segment in text_obj.segments().iter() {
            if let Ok(chars) = segment.chars() {
                for char_result in chars.iter() {
                    if let Some(c) = char_result.unicode_char() {
                        if let Ok(bounds) = char_result.loose_bounds() {
                            let x = bounds.left().value;
                            let y = bounds.top().value;
                            chars_with_pos.push((c, x, y));
                        }
                    }
                }
            }
        }

        if chars_with_pos.is_empty() {
            return Ok(String::new());
        }

        // ~5 points of tolerance covers vertical jitter within a table row
        const Y_TOLERANCE: f32 = 5.0;

        // Sort by Y descending (top to bottom in PDF coordinates), then X ascending
        chars_with_pos.sort_by(|a, b| {
            let y_cmp = b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal);
            if y_cmp == std::cmp::Ordering::Equal {
                a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal)
            } else {
                y_cmp
            }
        });

        // Group into lines by Y-coordinate proximity
        let mut lines: Vec<Vec<(char, f32)>> = Vec::new();
        let mut current_line: Vec<(char, f32)> = Vec::new();
        let mut current_y: Option<f32> = None;

        for (c, x, y) in chars_with_pos {
            match current_y {
                Some(cur_y) if (cur_y - y).abs() <= Y_TOLERANCE => {
                    current_line.push((c, x));
                }
                _ => {
                    if !current_line.is_empty() {
                        lines.push(current_line);
                    }
                    current_line = vec![(c, x)];
                    current_y = Some(y);
                }
            }
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }

        // Sort each line by X and insert spaces at horizontal gaps so table
        // columns stay whitespace-separated
        const SPACE_THRESHOLD: f32 = 10.0;

        let mut result = String::new();
        for mut line in lines {
            line.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

            let mut prev_x: Option<f32> = None;
            for (c, x) in line {
                if let Some(px) = prev_x {
                    if x - px > SPACE_THRESHOLD && c != ' ' {
                        result.push(' ');
                    }
                }
                result.push(c);
                prev_x = Some(x);
            }
            result.push('\n');
        }

        Ok(result.trim_end().to_string())
    }
}
