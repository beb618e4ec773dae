//! File index of `.em` sources (`docs/em_index.json`).
//!
//! Group filtering here takes an `Option`: `None` means "no filter". Mapping a
//! user-facing sentinel such as `all` onto `None` is the caller's job.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Top-level directories that get their own group. Everything else is `misc`.
pub const GROUPS: [&str; 4] = ["tests", "examples", "stdlib", "emp_mods"];

pub const MISC_GROUP: &str = "misc";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileIndex {
    #[serde(default)]
    pub files: Vec<IndexEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub path: String,
    pub group: String,
}

impl IndexEntry {
    /// Build an entry for a repo-relative, `/`-separated path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let group = Self::group_for(&path).to_string();
        Self { path, group }
    }

    /// Classify a path by its first component.
    pub fn group_for(path: &str) -> &'static str {
        let first = path.split('/').next().unwrap_or_default();
        GROUPS
            .iter()
            .find(|g| **g == first)
            .copied()
            .unwrap_or(MISC_GROUP)
    }
}

impl FileIndex {
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw).map_err(Error::InvalidIndex)
    }

    /// Entries in `group`, in index order. `None` selects every entry.
    pub fn in_group(&self, group: Option<&str>) -> Vec<&IndexEntry> {
        self.files
            .iter()
            .filter(|f| group.is_none_or(|g| f.group == g))
            .collect()
    }

    /// The entry a picker should preselect among `entries`: the index's
    /// default path if it is listed, otherwise the first entry.
    pub fn default_selection<'a>(&self, entries: &[&'a IndexEntry]) -> Option<&'a IndexEntry> {
        self.default_path
            .as_deref()
            .and_then(|want| entries.iter().find(|e| e.path == want).copied())
            .or_else(|| entries.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index() -> FileIndex {
        FileIndex {
            files: vec![
                IndexEntry::new("tests/a.em"),
                IndexEntry::new("examples/hello.em"),
                IndexEntry::new("tests/b_fail.em"),
                IndexEntry::new("tools/gen.em"),
            ],
            default_path: Some("tests/b_fail.em".into()),
        }
    }

    #[test]
    fn groups_by_first_component() {
        assert_eq!(IndexEntry::group_for("stdlib/io.em"), "stdlib");
        assert_eq!(IndexEntry::group_for("emp_mods/x/y.em"), "emp_mods");
        assert_eq!(IndexEntry::group_for("top.em"), "misc");
        assert_eq!(IndexEntry::group_for("tools/gen.em"), "misc");
    }

    #[test]
    fn no_filter_returns_everything() {
        assert_eq!(index().in_group(None).len(), 4);
    }

    #[test]
    fn filter_keeps_index_order() {
        let idx = index();
        let paths: Vec<_> = idx
            .in_group(Some("tests"))
            .iter()
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(paths, vec!["tests/a.em", "tests/b_fail.em"]);
    }

    #[test]
    fn default_selection_prefers_listed_default() {
        let idx = index();
        let tests = idx.in_group(Some("tests"));
        assert_eq!(
            idx.default_selection(&tests).map(|e| e.path.as_str()),
            Some("tests/b_fail.em")
        );

        let examples = idx.in_group(Some("examples"));
        assert_eq!(
            idx.default_selection(&examples).map(|e| e.path.as_str()),
            Some("examples/hello.em")
        );

        let stdlib = idx.in_group(Some("stdlib"));
        assert_eq!(idx.default_selection(&stdlib), None);
    }

    #[test]
    fn parses_camel_case_json() {
        let idx = FileIndex::from_json(
            r#"{"files":[{"path":"tests/a.em","group":"tests"}],"defaultPath":"tests/a.em"}"#,
        )
        .unwrap();
        assert_eq!(idx.default_path.as_deref(), Some("tests/a.em"));
        assert!(matches!(FileIndex::from_json(r#"{"files": 3}"#), Err(Error::InvalidIndex(_))));
    }
}
