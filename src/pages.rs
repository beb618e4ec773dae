//! `empdoc pages`: list the manifest, the way the viewer's sidebar shows it.

use anyhow::{Context, Result};
use colored::Colorize;
use empdoc::nav::filter_pages;
use empdoc::{Manifest, NavState};
use std::path::Path;

use crate::config::EmpdocConfig;

pub fn load_manifest(root: &Path, config: &EmpdocConfig) -> Result<Manifest> {
    let path = config.manifest_path(root);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Manifest::from_json(&raw).with_context(|| format!("Failed to load {}", path.display()))
}

pub fn list_pages(
    root: &Path,
    config: &EmpdocConfig,
    search: Option<&str>,
    hash: Option<&str>,
) -> Result<()> {
    let manifest = load_manifest(root, config)?;
    let state = NavState::initial(&manifest, hash);
    let pages = filter_pages(&manifest.pages, search.unwrap_or_default());

    if pages.is_empty() {
        println!("  {}", "No pages match.".dimmed());
        return Ok(());
    }

    for page in pages {
        let active = state.current.as_deref() == Some(page.path.as_str());
        let marker = if active {
            format!("{}", "*".green().bold())
        } else {
            " ".to_string()
        };
        println!("{marker} {}  {}", page.title, page.path.dimmed());
    }

    Ok(())
}
