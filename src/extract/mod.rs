//! Result-sheet record extraction
//!
//! Turns a raw result-sheet PDF into `(index number, grade)` records.
//! The reader handles the PDF layer (PDFium, layout-preserving text);
//! the sheet parser is a pure function over the extracted text.

mod reader;
mod sheet;

pub use reader::SheetReader;
pub use sheet::{
    parse_result_sheet, parse_sheet_document, parse_sheet_text, Extraction, ExtractorConfig,
    GradeRecord, TaggedExtraction,
};
