//! Command-line driver: replays a script of form events into an invoice
//! session, prints the preview and writes the PDF.

pub mod config;
pub mod replay;

pub use config::Config;
pub use replay::{Replay, replay};
