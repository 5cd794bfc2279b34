// Text layout: page geometry, line breaking, and pagination.
// Pure and synchronous; handlers call it from inside tokio::task::spawn_blocking.
#![allow(dead_code)]

pub mod engine;
pub mod geometry;
pub mod wrap;

use thiserror::Error;

pub use engine::{layout, layout_with, Document, Page};
pub use geometry::{PageGeometry, DEFAULT_WRAP_WIDTH};
pub use wrap::{FixedWidth, LineBreaker, WordWrap, WrapStrategy};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
}
