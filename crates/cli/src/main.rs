use std::path::PathBuf;

use anyhow::{Context, bail};

use factura_cli::{Config, replay};
use factura_render::{Preview, render_pdf};

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment alone is enough.
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    factura_observability::init(config.log_format);

    let Some(script) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: factura <script.json>");
    };

    let events = replay::load_script(&script)?;
    let outcome = replay(config.capabilities, config.today, events);

    println!("{}", Preview::from_invoice(&outcome.invoice));

    let pdf = render_pdf(&outcome.invoice)?;
    let path = replay::output_path(&config.output_dir, &pdf.file_name);
    std::fs::write(&path, &pdf.bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = pdf.bytes.len(), "pdf written");

    Ok(())
}
