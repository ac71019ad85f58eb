use anyhow::{Context, Result, bail};
use confinames_core::Workbook;
use std::fs;
use std::path::Path;

pub(crate) fn load(path: &Path) -> Result<Workbook> {
    let text = fs::read_to_string(path).with_context(|| {
        format!(
            "Could not read document {}, create one with `confinames init`",
            path.display()
        )
    })?;
    let workbook: Workbook = serde_json::from_str(&text)
        .with_context(|| format!("Document {} is not a valid workbook", path.display()))?;
    workbook
        .validate()
        .with_context(|| format!("Document {} has an unsupported layout", path.display()))?;
    Ok(workbook)
}

pub(crate) fn save(path: &Path, workbook: &Workbook) -> Result<()> {
    let text = serde_json::to_string_pretty(workbook)?;
    fs::write(path, text).with_context(|| format!("Could not write document {}", path.display()))?;
    log::debug!("Saved document to {}", path.display());
    Ok(())
}

pub(crate) fn ensure_absent(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Document {} already exists, pass --force to overwrite it",
            path.display()
        );
    }
    Ok(())
}

/// One word per line, blank lines and `#` comments skipped.
pub(crate) fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

pub(crate) fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read word list {}", path.display()))?;
    let words = parse_word_list(&text);
    log::info!("Read {} words from {}", words.len(), path.display());
    Ok(words)
}
