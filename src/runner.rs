//! `empdoc runner`: explain files picked from the `.em` index.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use empdoc::{FileIndex, IndexEntry, Prediction};
use std::path::Path;

use crate::ReportFormat;
use crate::config::EmpdocConfig;

/// Group name that disables filtering.
pub const ALL_GROUPS: &str = "all";

pub struct RunnerOpts {
    pub group: Option<String>,
    pub file: Option<String>,
    pub all: bool,
    pub format: ReportFormat,
}

pub fn run(root: &Path, config: &EmpdocConfig, opts: &RunnerOpts) -> Result<()> {
    let index_path = config.index_path(root);
    let raw = std::fs::read_to_string(&index_path)
        .with_context(|| format!("Failed to read {}", index_path.display()))?;
    let index = FileIndex::from_json(&raw)
        .with_context(|| format!("Failed to load {}", index_path.display()))?;

    let group = opts.group.as_deref().unwrap_or(&config.default_group);
    let entries = index.in_group(group_filter(group));
    if entries.is_empty() {
        bail!("No .em files in group '{group}'");
    }
    log::debug!("group '{group}': {} file(s)", entries.len());

    if opts.all {
        return run_all(root, &entries, opts.format);
    }

    let entry = select(&index, &entries, opts.file.as_deref(), group)?;
    let prediction = predict_entry(root, entry)?;
    println!("{}", format_report(&prediction, opts.format)?);
    Ok(())
}

/// `all` means no filter.
pub fn group_filter(group: &str) -> Option<&str> {
    (group != ALL_GROUPS).then_some(group)
}

fn select<'a>(
    index: &FileIndex,
    entries: &[&'a IndexEntry],
    file: Option<&str>,
    group: &str,
) -> Result<&'a IndexEntry> {
    match file {
        Some(path) => match entries.iter().find(|e| e.path == path) {
            Some(entry) => Ok(*entry),
            None => bail!("'{path}' is not in group '{group}'"),
        },
        None => index
            .default_selection(entries)
            .context("No file to select"),
    }
}

fn predict_entry(root: &Path, entry: &IndexEntry) -> Result<Prediction> {
    let path = root.join(&entry.path);
    let src = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(empdoc::predict(&src, Some(entry.path.as_str())))
}

fn run_all(root: &Path, entries: &[&IndexEntry], format: ReportFormat) -> Result<()> {
    let predictions = entries
        .iter()
        .map(|e| predict_entry(root, e))
        .collect::<Result<Vec<_>>>()?;

    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&predictions)?),
        ReportFormat::Html => {
            for prediction in &predictions {
                println!("{}", empdoc::prediction_to_html(prediction));
            }
        }
        ReportFormat::Terminal => {
            for prediction in &predictions {
                println!("{}", summary_line(prediction));
            }
            println!(
                "{} {} file(s)",
                "Explained".green().bold(),
                predictions.len()
            );
        }
    }
    Ok(())
}

/// One-line digest: path, feature and hint counts, and the fail marker.
pub fn summary_line(pred: &Prediction) -> String {
    let path = pred.file_path.as_deref().unwrap_or("(pasted)");
    let fail = if pred.is_fail {
        format!(" {}", "expected fail".red())
    } else {
        String::new()
    };
    format!(
        "{path}  {}{fail}",
        format!(
            "{} features, {} hints",
            pred.features.len(),
            pred.hints.len()
        )
        .dimmed()
    )
}

pub fn format_report(pred: &Prediction, format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Terminal => empdoc::prediction_to_terminal(pred),
        ReportFormat::Html => empdoc::prediction_to_html(pred),
        ReportFormat::Json => serde_json::to_string_pretty(pred)?,
    })
}
