pub mod config;
pub mod detect;
pub mod info;
pub mod run;
pub mod stabilize;

use anyhow::{bail, Result};

/// Parse a `#RRGGBB` or `RRGGBB` hex color.
pub fn parse_rgb(s: &str) -> Result<[u8; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        bail!("expected a 6-digit hex color, got {s:?}");
    }
    let r = u8::from_str_radix(&hex[0..2], 16)?;
    let g = u8::from_str_radix(&hex[2..4], 16)?;
    let b = u8::from_str_radix(&hex[4..6], 16)?;
    Ok([r, g, b])
}
