// Contract assembly: field validation, versioned template rendering, and the
// generation pipeline behind the PDF and preview endpoints.

pub mod fields;
pub mod handlers;
pub mod service;
pub mod template;
