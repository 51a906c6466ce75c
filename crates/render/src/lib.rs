//! Read-only presentation of an invoice snapshot.
//!
//! The on-screen preview and the PDF export share one set of formatting
//! rules ([`format`]) and one set of rendered strings ([`Preview`]), so every
//! number and date printed is identical in both outputs.

pub mod error;
pub mod format;
pub mod pdf;
pub mod preview;

pub use error::RenderError;
pub use pdf::{RenderedPdf, pdf_file_name, render_pdf};
pub use preview::{PartyBlock, Preview, PreviewRow};
