//! Recap export - writes the rendered recap document to a file.

use crate::{
    core::report::{MonthlyRecap, render_recap},
    errors::Result,
};
use std::path::Path;
use tracing::info;

/// Renders `recap` and writes it to `path`, replacing any existing file.
///
/// # Errors
/// Returns an error if the file cannot be written. The export is not retried.
pub fn export_recap<P: AsRef<Path>>(path: P, recap: &MonthlyRecap, currency: &str) -> Result<()> {
    let path_ref = path.as_ref();
    std::fs::write(path_ref, render_recap(recap, currency))?;
    info!("Exported recap for {} to {}", recap.month, path_ref.display());
    Ok(())
}
