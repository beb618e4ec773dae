//! `empdoc index`: regenerate the `.em` file index the runner reads.

use anyhow::{Context, Result};
use colored::Colorize;
use empdoc::{FileIndex, IndexEntry};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::config::EmpdocConfig;

/// Walk `root` for `.em` files, skipping hidden directories and `skip_dir`.
///
/// Entries come out sorted by path; the default is the first file under
/// `tests/`, else the first file found.
pub fn scan(root: &Path, skip_dir: &Path) -> Result<FileIndex> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && e.path() != skip_dir);

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.path().extension().is_none_or(|ext| ext != "em") {
            continue;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        log::trace!("indexed {rel}");
        files.push(IndexEntry::new(rel));
    }

    let default_path = files
        .iter()
        .find(|f| f.group == "tests")
        .or_else(|| files.first())
        .map(|f| f.path.clone());

    Ok(FileIndex {
        files,
        default_path,
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

pub fn write_index(root: &Path, config: &EmpdocConfig, out: &Path, quiet: bool) -> Result<()> {
    let index = scan(root, &config.out_path(root))?;
    let json = serde_json::to_string_pretty(&index)?;

    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(out, json + "\n")
        .with_context(|| format!("Failed to write {}", out.display()))?;

    if !quiet {
        println!(
            "{} {} ({} files)",
            "Indexed".green().bold(),
            out.display(),
            index.files.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_repo(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("empdoc-index-test").join(name);
        let _ = fs::remove_dir_all(&dir);
        for sub in ["examples", "tests", ".git", "dist", "tools"] {
            fs::create_dir_all(dir.join(sub)).unwrap();
        }
        fs::write(dir.join("examples/hello.em"), "fn main() {}").unwrap();
        fs::write(dir.join("tests/b.em"), "").unwrap();
        fs::write(dir.join("tests/a_fail.em"), "").unwrap();
        fs::write(dir.join("tests/notes.md"), "").unwrap();
        fs::write(dir.join(".git/hook.em"), "").unwrap();
        fs::write(dir.join("dist/copy.em"), "").unwrap();
        fs::write(dir.join("tools/gen.em"), "").unwrap();
        dir
    }

    #[test]
    fn scan_sorts_groups_and_skips() {
        let root = temp_repo("scan");
        let index = scan(&root, &root.join("dist")).unwrap();

        let paths: Vec<_> = index.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["examples/hello.em", "tests/a_fail.em", "tests/b.em", "tools/gen.em"]
        );
        assert_eq!(index.files[3].group, "misc");
        assert_eq!(index.default_path.as_deref(), Some("tests/a_fail.em"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn default_falls_back_to_first_file() {
        let root = temp_repo("fallback");
        fs::remove_dir_all(root.join("tests")).unwrap();
        let index = scan(&root, &root.join("dist")).unwrap();
        assert_eq!(index.default_path.as_deref(), Some("examples/hello.em"));

        let _ = fs::remove_dir_all(&root);
    }
}
