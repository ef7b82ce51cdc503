//! Emit the accepted URL list as a small CommonJS module.
//!
//! The downstream audit harness `require()`s the generated file, so the
//! `exports.urls = [...]` shape is part of the boundary contract.

use anyhow::{Context, Result};
use std::path::Path;

pub fn write_url_module(path: &Path, urls: &[String]) -> Result<()> {
    let json = serde_json::to_string_pretty(urls)?;
    let content = format!("exports.urls = {json};\n");
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
