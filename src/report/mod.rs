pub mod json;
pub mod md;
pub mod validate;

use crate::error::{MinerError, Result};
use crate::types::gem::GemsDocument;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(document: &GemsDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::to_json(document).map_err(MinerError::Json),
        OutputFormat::Md => Ok(md::to_markdown(document)),
    }
}

pub fn write_document(path: &Path, document: &GemsDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json::to_json(document)?)?;
    Ok(())
}

pub fn read_document(path: &Path) -> Result<GemsDocument> {
    if !path.exists() {
        return Err(MinerError::PathNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
