// PDF serialization of laid-out documents (lopdf).

pub mod encoding;
pub mod writer;

use thiserror::Error;

pub use writer::write_pdf;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Character {ch:?} on page {page}, line {line} cannot be encoded in WinAnsi")]
    Unencodable { ch: char, page: usize, line: usize },

    #[error("Failed to encode content stream: {0}")]
    Encode(String),

    #[error("Failed to save PDF: {0}")]
    Save(String),
}
