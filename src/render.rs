//! HTML page rendering and the output-file lifecycle.
//!
//! ## Page Shapes
//!
//! - **Standalone** (`-n 1`, the default): one entry per file, titled by
//!   the entry, body written directly under `<body>`.
//! - **Batched** (`-n 0` or `-n ≥ 2`): several entries per file, titled by
//!   the feed, each entry a collapsible header/body pair inside a
//!   `<ul class="entries">` container toggled by the inline script.
//!
//! ## HTML Generation
//!
//! Balanced fragments (head contents, entry articles) are built with
//! [maud](https://maud.lambda.xyz/). Feed-derived text goes through
//! [`PreEscaped`]: the parser already decoded entities, and entry content
//! is trusted rich markup that must reach the page byte-exact. Only the
//! unbalanced page wrapper (`<html><head>…</head><body>` and its closing
//! counterpart) is written as raw constants, because a page stays open
//! across entries while a batch fills up.
//!
//! ## File Lifecycle
//!
//! [`PageWriter`] owns the single open output handle of a conversion run.
//! Files open lazily on the first entry that needs one and close at batch
//! boundaries via [`PageWriter::close`]; the `Drop` impl closes best-effort
//! so an aborted parse still leaves trailing tags on disk.

use crate::config::RenderConfig;
use crate::entry::{Entry, normalize_timestamp};
use maud::{Markup, PreEscaped, html};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Inline collapse-toggle script embedded into every page head. Binds
/// through jquery.js, which is copied next to the pages.
const COLLAPSE_JS: &str = include_str!("../static/collapse.js");

const PAGE_OPEN: &str = "<!DOCTYPE html><html><head>";
const HEAD_CLOSE_BODY_OPEN: &str = "</head><body>";
const LIST_OPEN: &str = "<ul class=\"entries\">";
const LIST_CLOSE: &str = "</ul>";
const PAGE_CLOSE: &str = "</body></html>";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("can not write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes rendered entries into output files, enforcing the batching
/// policy: at most one file open at a time, `per_file` entries per file,
/// monotonically increasing filename indices.
pub struct PageWriter {
    config: RenderConfig,
    /// Input basename the output filenames derive from.
    base: String,
    out: Option<BufWriter<File>>,
    /// Path of the currently (or most recently) open file, for errors.
    path: PathBuf,
    /// Entries written into the currently open file.
    written: usize,
    file_index: u32,
    pages: usize,
    total_written: usize,
}

impl PageWriter {
    pub fn new(base: String, config: RenderConfig) -> Self {
        Self {
            config,
            base,
            out: None,
            path: PathBuf::new(),
            written: 0,
            file_index: 0,
            pages: 0,
            total_written: 0,
        }
    }

    /// Output files successfully opened so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Entries written across all files of this run.
    pub fn entries_written(&self) -> usize {
        self.total_written
    }

    /// Render one completed entry, applying the time filter and the file
    /// lifecycle rules. Returns `Ok(false)` when the entry was filtered
    /// out (no output, no file side effects).
    ///
    /// On an I/O error the current handle is discarded so the next entry
    /// starts over with a fresh file; the caller reports and keeps parsing.
    pub fn write_entry(&mut self, entry: &Entry, feed_title: &str) -> Result<bool, RenderError> {
        if let Some(prefix) = &self.config.time_filter {
            if !entry.published.starts_with(prefix.as_str()) {
                return Ok(false);
            }
        }

        if self.out.is_none() {
            self.open_page(entry, feed_title)?;
        }

        let fragment = if self.config.batching() {
            collapsible_entry(entry, &self.config)
        } else {
            standalone_entry(entry, &self.config)
        };
        self.write(fragment.into_string().as_bytes())?;

        self.written += 1;
        self.total_written += 1;
        if self.config.per_file > 0 && self.written >= self.config.per_file {
            self.close()?;
        }
        Ok(true)
    }

    /// Close the open file, if any: trailing tags, flush, release the
    /// handle, reset the per-file counter. Idempotent.
    pub fn close(&mut self) -> Result<(), RenderError> {
        if self.out.is_none() {
            return Ok(());
        }
        self.written = 0;
        if self.config.batching() {
            self.write(LIST_CLOSE.as_bytes())?;
        }
        self.write(PAGE_CLOSE.as_bytes())?;
        match self.out.take() {
            Some(mut out) => out.flush().map_err(|source| RenderError::Io {
                path: self.path.clone(),
                source,
            }),
            None => Ok(()),
        }
    }

    fn open_page(&mut self, entry: &Entry, feed_title: &str) -> Result<(), RenderError> {
        let path = self.config.output_dir.join(self.file_name());
        let file = File::create(&path).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        self.path = path;
        self.out = Some(BufWriter::new(file));
        // a fresh file always starts an empty batch, even after an
        // abandoned handle
        self.written = 0;
        self.file_index += 1;
        self.pages += 1;

        let title = if self.config.batching() {
            match &self.config.time_filter {
                Some(prefix) => format!("{feed_title} - {prefix}"),
                None => feed_title.to_string(),
            }
        } else {
            entry.title.clone()
        };

        self.write(PAGE_OPEN.as_bytes())?;
        self.write(page_head(&title, &self.config.stylesheet).into_string().as_bytes())?;
        self.write(HEAD_CLOSE_BODY_OPEN.as_bytes())?;
        if self.config.batching() {
            self.write(LIST_OPEN.as_bytes())?;
        }
        Ok(())
    }

    /// `<base>[_<timeprefix>][_<NNNN>].html`, index zero-padded to 4.
    fn file_name(&self) -> String {
        let mut name = self.base.clone();
        if let Some(prefix) = &self.config.time_filter {
            name.push('_');
            name.push_str(prefix);
        }
        if self.config.indexed_files() {
            name.push_str(&format!("_{:04}", self.file_index));
        }
        name.push_str(".html");
        name
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), RenderError> {
        if let Some(out) = self.out.as_mut() {
            if let Err(source) = out.write_all(bytes) {
                // A handle that failed once stays broken; drop it and let
                // the next entry reopen at the next index.
                self.out = None;
                return Err(RenderError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        }
        Ok(())
    }
}

impl Drop for PageWriter {
    fn drop(&mut self) {
        // Trailing tags must land even when the parse aborts; the error has
        // nowhere to go from here.
        let _ = self.close();
    }
}

// ============================================================================
// Fragments
// ============================================================================

/// Contents of `<head>`: charset meta, stylesheet link, jquery.js
/// reference, inline collapse script, page title.
fn page_head(title: &str, stylesheet: &str) -> Markup {
    html! {
        meta content="text/html; charset=UTF-8" http-equiv="content-type";
        link rel="stylesheet" type="text/css" href=(stylesheet) media="all";
        script src="jquery.js" {}
        script { (PreEscaped(COLLAPSE_JS)) }
        title { (PreEscaped(title)) }
    }
}

/// Entry interior shared by both page shapes: optional byline, optional
/// rules, body (content over summary), optional original-post anchor.
fn entry_article(entry: &Entry, config: &RenderConfig) -> Markup {
    html! {
        @if config.write_author {
            p.byline {
                (PreEscaped(&entry.author))
                @if !entry.author.is_empty() { " @ " }
                (PreEscaped(normalize_timestamp(&entry.published)))
            }
        }
        @if config.hr_before { hr; }
        (PreEscaped(entry.body()))
        @if config.hr_after { hr; }
        @if let Some(text) = &config.link_text {
            @if !entry.link.is_empty() {
                a href=(PreEscaped(&entry.link)) { (PreEscaped(text)) }
            }
        }
    }
}

fn standalone_entry(entry: &Entry, config: &RenderConfig) -> Markup {
    html! {
        h1 { (PreEscaped(&entry.title)) }
        (entry_article(entry, config))
    }
}

/// Batched shape: clickable header + body pair, toggled client-side.
fn collapsible_entry(entry: &Entry, config: &RenderConfig) -> Markup {
    html! {
        li.entry {
            h2.entry-header { (PreEscaped(&entry.title)) }
            div.entry-body { (entry_article(entry, config)) }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
