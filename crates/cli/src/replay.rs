//! Replaying recorded form events.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use tracing::{info, warn};

use factura_core::DomainError;
use factura_invoicing::{Capabilities, FormEvent, Invoice, InvoiceSession};

/// Outcome of a replay: the final snapshot plus every rejected event.
#[derive(Debug, Clone)]
pub struct Replay {
    pub invoice: Invoice,
    pub applied: usize,
    /// Position in the script and reason, for each event that was refused.
    pub rejected: Vec<(usize, DomainError)>,
}

/// Parse a JSON array of form events.
pub fn parse_script(text: &str) -> anyhow::Result<Vec<FormEvent>> {
    serde_json::from_str(text).context("script must be a JSON array of form events")
}

pub fn load_script(path: &Path) -> anyhow::Result<Vec<FormEvent>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&text)
}

/// Feed every event to a fresh session. Rejected events are skipped, the
/// same way the form ignores input it cannot apply.
pub fn replay(capabilities: Capabilities, today: NaiveDate, events: Vec<FormEvent>) -> Replay {
    let mut session = InvoiceSession::new(capabilities, today);
    let mut applied = 0;
    let mut rejected = Vec::new();

    for (position, event) in events.into_iter().enumerate() {
        match session.dispatch_event(event) {
            Ok(_) => applied += 1,
            Err(err) => {
                warn!(position, error = %err, "skipping form event");
                rejected.push((position, err));
            }
        }
    }

    info!(applied, rejected = rejected.len(), "script replayed");
    Replay {
        invoice: session.into_invoice(),
        applied,
        rejected,
    }
}

/// Where the PDF goes: the download name with path separators neutralised.
pub fn output_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(file_name.replace(['/', '\\'], "-"))
}
