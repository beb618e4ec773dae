//! `empdoc build`: render every manifest page into a static site.
//!
//! The output is a single `index.html`: one `<section id=PATH>` per page, in
//! manifest order, so the viewer's `#PATH` links resolve without a server.
//! `manifest.json` is copied alongside.

use anyhow::{Context, Result};
use colored::Colorize;
use empdoc::nav::{filter_pages, nav_html};
use empdoc::{Manifest, NavState, PageConfig, PageEntry, escape_html, page_html};
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::config::EmpdocConfig;
use crate::pages::load_manifest;

pub struct BuildOpts {
    pub out_dir: PathBuf,
    pub title: Option<String>,
    pub quiet: bool,
}

pub fn handle_build(root: &Path, config: &EmpdocConfig, opts: &BuildOpts) -> Result<()> {
    let docs_dir = config.docs_path(root);
    let manifest = load_manifest(root, config)?;

    let mut body = String::new();
    let mut warnings = 0;
    for page in &manifest.pages {
        let (section, ok) = render_section(&docs_dir, page);
        if !ok {
            warnings += 1;
        }
        body.push_str(&section);
    }

    let state = NavState::initial(&manifest, None);
    let nav = nav_html(&filter_pages(&manifest.pages, ""), state.current.as_deref());

    let page_config = PageConfig {
        title: opts.title.clone().or_else(|| home_title(&manifest)),
        ..Default::default()
    };
    let html = page_html(&page_config, &nav, &body);

    let out_path = &opts.out_dir;
    std::fs::create_dir_all(out_path)
        .with_context(|| format!("Failed to create '{}'", out_path.display()))?;

    let index_path = out_path.join("index.html");
    std::fs::write(&index_path, &html)
        .with_context(|| format!("Failed to write '{}'", index_path.display()))?;

    let manifest_src = config.manifest_path(root);
    let manifest_dest = out_path.join("manifest.json");
    std::fs::copy(&manifest_src, &manifest_dest)
        .with_context(|| format!("Failed to copy manifest to '{}'", manifest_dest.display()))?;

    if !opts.quiet {
        let note = if warnings > 0 {
            format!(" {}", format!("{warnings} page(s) failed to load").yellow())
        } else {
            String::new()
        };
        println!(
            "{} {} ({} pages){note}",
            "Built".green().bold(),
            index_path.display(),
            manifest.pages.len(),
        );
    }

    Ok(())
}

/// Render one page as a section. A page that cannot be read becomes a
/// "Failed to load" notice and `false` is returned.
fn render_section(docs_dir: &Path, page: &PageEntry) -> (String, bool) {
    let file = docs_dir.join(&page.path);
    let (inner, ok) = match std::fs::read_to_string(&file) {
        Ok(content) => {
            let result = empdoc::parse(&content);
            for diag in &result.diagnostics {
                let line_info = match diag.span {
                    Some(span) => format!("{}:{}", file.display(), span.start_line),
                    None => file.display().to_string(),
                };
                eprintln!("{}: {}", line_info, diag.message.yellow());
            }
            (result.doc.to_html(), true)
        }
        Err(e) => {
            log::warn!("failed to read {}: {e}", file.display());
            (
                format!("<p>Failed to load <code>{}</code></p>", escape_html(&page.path)),
                false,
            )
        }
    };
    let section = format!(
        "<section id=\"{}\">{inner}</section>",
        escape_html(&page.path)
    );
    (section, ok)
}

fn home_title(manifest: &Manifest) -> Option<String> {
    let home = manifest.home_path();
    manifest
        .pages
        .iter()
        .find(|p| p.path == home)
        .map(|p| p.title.clone())
}

/// Watch the docs directory and rebuild on each change.
///
/// Debounces rapid events (e.g. editors that write in stages) with a 200ms window.
/// Ctrl+C exits cleanly.
pub fn watch_and_rebuild(root: &Path, config: &EmpdocConfig, opts: &BuildOpts) -> Result<()> {
    let docs_dir = config.docs_path(root);
    let watch_dir = std::fs::canonicalize(&docs_dir)
        .with_context(|| format!("Cannot resolve path '{}'", docs_dir.display()))?;
    let out_dir = std::fs::canonicalize(&opts.out_dir).unwrap_or_else(|_| opts.out_dir.clone());

    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        docs_dir.display()
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&watch_dir, RecursiveMode::Recursive)?;

    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                let relevant = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                // Ignore our own writes when the output lives inside the docs dir
                let outside_out = event.paths.iter().any(|p| !p.starts_with(&out_dir));

                if relevant && outside_out && last_rebuild.elapsed() > debounce {
                    // Small delay to let the editor finish writing
                    std::thread::sleep(Duration::from_millis(50));
                    log::debug!("rebuilding after {:?}", event.paths);

                    match handle_build(root, config, opts) {
                        Ok(()) => {
                            last_rebuild = Instant::now();
                        }
                        Err(e) => {
                            eprintln!("{} {:#}", "Build error:".red().bold(), e);
                        }
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
