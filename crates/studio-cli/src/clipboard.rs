//! Copy to the system clipboard through the terminal (OSC 52).

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Escape sequence asking the terminal to place `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub fn copy(text: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}
