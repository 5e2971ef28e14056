//! Engine preset files
//!
//! A preset (`.eng`) is a flat JSON object holding one engine configuration.
//! Saved presets use the canonical field names; older presets written with
//! short keys (`bore`, `redline`, `use_vvl`, ...) and string-typed numbers
//! load just the same.
//!
//! Loading only reads the record. Validation happens when the returned
//! [`RawEngineConfig`] is normalized.

use crate::config::{EngineConfiguration, RawEngineConfig};
use crate::error::SimResult;
use std::fs;
use std::path::Path;

/// File extension of preset files
pub const PRESET_EXTENSION: &str = "eng";

/// Decode preset bytes, falling back to Latin-1 for non UTF-8 files
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        // ISO-8859-1 is a direct byte-to-codepoint mapping
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// Parse preset content
pub fn parse_preset(content: &str) -> SimResult<RawEngineConfig> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    RawEngineConfig::from_json_str(content)
}

/// Load a preset file into a raw record
pub fn load_preset<P: AsRef<Path>>(path: P) -> SimResult<RawEngineConfig> {
    let path = path.as_ref();
    let raw = parse_preset(&decode(fs::read(path)?))?;
    tracing::debug!("Loaded {} fields from preset {}", raw.len(), path.display());
    Ok(raw)
}

/// Render a configuration as preset content
pub fn render_preset(config: &EngineConfiguration) -> SimResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Save a configuration as a preset file
pub fn save_preset<P: AsRef<Path>>(path: P, config: &EngineConfiguration) -> SimResult<()> {
    let path = path.as_ref();
    let mut content = render_preset(config)?;
    content.push('\n');
    fs::write(path, content)?;
    tracing::debug!("Saved preset {}", path.display());
    Ok(())
}
