//! Docs-site manifest and navigation.
//!
//! The viewer keeps track of the page currently on screen. That state is owned
//! by the caller as a [`NavState`] and passed in explicitly; nothing in this
//! module is global.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::escape::escape_html;

/// Page used when neither the hash nor the manifest names one.
pub const FALLBACK_HOME: &str = "README.md";

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `docs/manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub pages: Vec<PageEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
}

/// One documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub path: String,
    pub title: String,
}

impl Manifest {
    /// Parse a manifest. A manifest without pages is rejected.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let manifest: Manifest = serde_json::from_str(raw).map_err(Error::InvalidManifest)?;
        if manifest.pages.is_empty() {
            return Err(Error::EmptyManifest);
        }
        Ok(manifest)
    }

    /// The declared home page, or `README.md`.
    pub fn home_path(&self) -> &str {
        self.home.as_deref().unwrap_or(FALLBACK_HOME)
    }

    pub fn is_known(&self, path: &str) -> bool {
        self.pages.iter().any(|p| p.path == path)
    }

    /// Page to show when no known page was requested: `home` if declared,
    /// otherwise the first page.
    fn landing_path(&self) -> Option<&str> {
        self.home
            .as_deref()
            .or_else(|| self.pages.first().map(|p| p.path.as_str()))
    }
}

/// Pages whose title contains `query`, case-insensitively, in manifest order.
///
/// A blank query matches every page.
pub fn filter_pages<'a>(pages: &'a [PageEntry], query: &str) -> Vec<&'a PageEntry> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return pages.iter().collect();
    }
    pages
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&q))
        .collect()
}

/// Percent-encode a page path for use in a `#hash` link.
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, URI_COMPONENT).to_string()
}

/// Turn a location hash (with or without the leading `#`) back into a page
/// path. Returns `None` for an empty hash.
pub fn decode_hash(hash: &str) -> Option<String> {
    let raw = hash.strip_prefix('#').unwrap_or(hash);
    if raw.is_empty() {
        return None;
    }
    Some(percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// The page currently displayed by a viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub current: Option<String>,
}

impl NavState {
    /// State for a viewer opened at `hash`.
    ///
    /// A known hash target wins; otherwise the manifest's home page, then its
    /// first page.
    pub fn initial(manifest: &Manifest, hash: Option<&str>) -> Self {
        let requested = hash
            .and_then(decode_hash)
            .unwrap_or_else(|| manifest.home_path().to_string());
        let current = if manifest.is_known(&requested) {
            Some(requested)
        } else {
            manifest.landing_path().map(String::from)
        };
        log::debug!("initial page: {current:?}");
        Self { current }
    }

    /// Follow a hash change. Unknown targets are ignored and leave the current
    /// page untouched; a known target becomes current and is returned.
    pub fn on_hash_change(&mut self, manifest: &Manifest, hash: Option<&str>) -> Option<&str> {
        let requested = hash
            .and_then(decode_hash)
            .unwrap_or_else(|| manifest.home_path().to_string());
        if !manifest.is_known(&requested) {
            log::debug!("ignoring unknown page {requested:?}");
            return None;
        }
        self.current = Some(requested);
        self.current.as_deref()
    }
}

/// Render navigation links, marking `active` with `class="active"`.
pub fn nav_html(pages: &[&PageEntry], active: Option<&str>) -> String {
    pages
        .iter()
        .map(|p| {
            let class = if active == Some(p.path.as_str()) {
                r#" class="active""#
            } else {
                ""
            };
            format!(
                r##"<a href="#{}" data-path="{}"{class}>{}</a>"##,
                escape_html(&encode_path(&p.path)),
                escape_html(&p.path),
                escape_html(&p.title)
            )
        })
        .collect()
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
