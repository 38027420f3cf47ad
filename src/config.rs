//! Run configuration.
//!
//! All options come from the command line and are resolved once, before any
//! file is processed. Conversion runs share one `RenderConfig` read-only;
//! nothing here mutates after argument parsing.

use std::path::PathBuf;

/// Options for one invocation, consumed by the conversion pipeline.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Include the author/publish-date paragraph in each entry.
    pub write_author: bool,
    /// Insert a horizontal rule before the entry body.
    pub hr_before: bool,
    /// Append a horizontal rule after the entry body.
    pub hr_after: bool,
    /// Entries per output file. 0 means one file for the whole feed,
    /// 1 (the default) means one file per entry.
    pub per_file: usize,
    /// Anchor text for the original-post link. No anchor when `None`.
    pub link_text: Option<String>,
    /// Stylesheet filename referenced from each page head.
    pub stylesheet: String,
    /// Destination directory for generated pages and assets.
    pub output_dir: PathBuf,
    /// Literal prefix an entry's `published` field must start with to be
    /// rendered at all.
    pub time_filter: Option<String>,
}

impl RenderConfig {
    /// Whether entries are grouped into shared files. Grouping switches the
    /// page title to the feed-level title and wraps entries in a
    /// collapsible list.
    pub fn batching(&self) -> bool {
        self.per_file != 1
    }

    /// Whether output filenames carry the `_NNNN` index suffix. Only a
    /// whole-feed file (`per_file == 0`) goes without one, since it is the
    /// only case that cannot produce a second file.
    pub fn indexed_files(&self) -> bool {
        self.per_file >= 1
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            write_author: false,
            hr_before: false,
            hr_after: false,
            per_file: 1,
            link_text: None,
            stylesheet: "style.css".to_string(),
            output_dir: PathBuf::from("."),
            time_filter: None,
        }
    }
}
