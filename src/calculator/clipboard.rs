//! Copying the display text to the system clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::info;

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to copy to clipboard")?;

    info!(len = text.len(), "copied display text to clipboard");
    Ok(())
}
