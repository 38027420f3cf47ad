//! Streaming XML-to-HTML transduction.
//!
//! One conversion run turns one feed-archive XML file into its HTML pages.
//! The document is never materialized as a tree: quick-xml's pull reader
//! hands over start-tag, end-tag and character-data events in document
//! order, and [`Transducer`] folds them into rendered pages incrementally.
//!
//! ## Marker Stack
//!
//! Element context is tracked with an explicit stack of [`Marker`]s, one
//! per open element. `stack.len()` is the nesting depth and `stack.last()`
//! is the context character data belongs to, so "at most one field
//! collects text at a time" holds by construction instead of by flag
//! discipline. Elements opened inside a collecting field inherit its
//! marker — rich `<content type="xhtml">` payloads keep feeding `content`
//! across their own child tags, without the depth aliasing a bare counter
//! would invite (a `<name>` nested inside `<summary>` stays summary text).
//!
//! ## Error Locality
//!
//! Malformed XML aborts the document with a line number; output-file
//! errors abandon the entry in flight and let the parse continue, so a
//! later entry can still succeed. Neither touches other input files of
//! the same run.

use crate::config::RenderConfig;
use crate::entry::{Entry, Field};
use crate::render::PageWriter;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("can not open file {path}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{message} at line {line}")]
    Xml { message: String, line: usize },
}

/// Per-file totals reported back to the CLI.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// `<entry>` elements completed during the parse.
    pub entries_seen: usize,
    /// Entries rendered into a page.
    pub entries_written: usize,
    /// Entries rejected by the time-prefix filter.
    pub entries_filtered: usize,
    /// Entries lost to output I/O errors.
    pub entries_dropped: usize,
    /// Output files produced.
    pub pages: usize,
}

/// Convert one feed-archive XML file into HTML pages under the configured
/// output directory.
pub fn convert(input: &Path, config: &RenderConfig) -> Result<ConvertSummary, ConvertError> {
    let bytes = fs::read(input).map_err(|source| ConvertError::Input {
        path: input.to_path_buf(),
        source,
    })?;
    let base = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "feed".to_string());

    let writer = PageWriter::new(base, config.clone());
    let mut transducer = Transducer::new(writer);
    let mut reader = Reader::from_reader(bytes.as_slice());
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => transducer
                .start(&e, &reader)
                .map_err(|err| xml_error(&bytes, reader.buffer_position(), err))?,
            Ok(Event::Empty(e)) => {
                // A self-closing element is an immediately matched pair.
                transducer
                    .start(&e, &reader)
                    .map_err(|err| xml_error(&bytes, reader.buffer_position(), err))?;
                transducer.end();
            }
            Ok(Event::End(_)) => transducer.end(),
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| xml_error(&bytes, reader.buffer_position(), err))?;
                transducer.text(&text);
            }
            Ok(Event::CData(e)) => {
                transducer.text(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, processing instructions, doctypes.
            Ok(_) => {}
            Err(err) => return Err(xml_error(&bytes, reader.error_position(), err)),
        }
        buf.clear();
    }

    Ok(transducer.finish())
}

/// Map a byte offset reported by quick-xml to a 1-based line number.
fn xml_error(bytes: &[u8], offset: u64, err: impl Display) -> ConvertError {
    let end = usize::try_from(offset)
        .unwrap_or(bytes.len())
        .min(bytes.len());
    let line = 1 + bytes[..end].iter().filter(|&&b| b == b'\n').count();
    ConvertError::Xml {
        message: err.to_string(),
        line,
    }
}

/// What one open element means to the transduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    /// The feed root element.
    Feed,
    /// The feed's own `<title>`, outside any entry.
    FeedTitle,
    /// An `<entry>`; closing it renders the live [`Entry`].
    Entry,
    /// An element whose character data feeds an entry field.
    Field(Field),
    /// Anything the transduction ignores.
    Other,
}

/// The streaming state machine: consumes parser events, maintains the
/// marker stack and the live entry, renders on entry completion.
struct Transducer {
    stack: Vec<Marker>,
    entry: Option<Entry>,
    feed_title: String,
    writer: PageWriter,
    seen: usize,
    filtered: usize,
    dropped: usize,
}

impl Transducer {
    fn new(writer: PageWriter) -> Self {
        Self {
            stack: Vec::new(),
            entry: None,
            feed_title: String::new(),
            writer,
            seen: 0,
            filtered: 0,
            dropped: 0,
        }
    }

    /// Classify a start tag by (depth, name) and push its marker.
    fn start(
        &mut self,
        e: &BytesStart<'_>,
        reader: &Reader<&[u8]>,
    ) -> Result<(), quick_xml::Error> {
        let marker = match self.stack.last() {
            // Descendants of a collecting element keep feeding the same
            // field; nested markup in rich content stays in context.
            Some(Marker::Field(field)) => Marker::Field(*field),
            Some(Marker::FeedTitle) => Marker::FeedTitle,
            _ => match (self.stack.len(), e.name().as_ref()) {
                (0, _) => Marker::Feed,
                (1, b"title") => Marker::FeedTitle,
                (1, b"entry") => {
                    // A fresh <entry> discards any incomplete predecessor.
                    self.entry = Some(Entry::default());
                    Marker::Entry
                }
                (2, name) if self.entry.is_some() => match name {
                    b"published" => Marker::Field(Field::Published),
                    b"title" => Marker::Field(Field::Title),
                    b"summary" => Marker::Field(Field::Summary),
                    b"content" => Marker::Field(Field::Content),
                    b"link" => {
                        self.capture_link(e, reader)?;
                        Marker::Other
                    }
                    _ => Marker::Other,
                },
                (3, b"name") if self.entry.is_some() => Marker::Field(Field::Author),
                _ => Marker::Other,
            },
        };
        self.stack.push(marker);
        Ok(())
    }

    /// Route character data by the top marker alone.
    fn text(&mut self, text: &str) {
        match self.stack.last() {
            Some(Marker::FeedTitle) => self.feed_title.push_str(text),
            Some(Marker::Field(field)) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.push(*field, text);
                }
            }
            _ => {}
        }
    }

    /// Pop the top marker; `</entry>` consumes and renders the live entry.
    fn end(&mut self) {
        if let Some(Marker::Entry) = self.stack.pop() {
            self.seen += 1;
            if let Some(entry) = self.entry.take() {
                match self.writer.write_entry(&entry, &self.feed_title) {
                    Ok(true) => {}
                    Ok(false) => self.filtered += 1,
                    Err(err) => {
                        // Reported and abandoned; the parse carries on and a
                        // later entry may open a fresh file.
                        self.dropped += 1;
                        eprintln!("{err}");
                    }
                }
            }
        }
    }

    /// `<link>` carries its value in the `href` attribute — no character
    /// data. The scan is order-independent; a repeated `href` overwrites,
    /// so the last occurrence wins.
    fn capture_link(
        &mut self,
        e: &BytesStart<'_>,
        reader: &Reader<&[u8]>,
    ) -> Result<(), quick_xml::Error> {
        let Some(entry) = self.entry.as_mut() else {
            return Ok(());
        };
        for attr in e.attributes().with_checks(false) {
            let attr = attr?;
            if attr.key.as_ref() == b"href" {
                entry.link = attr
                    .decode_and_unescape_value(reader.decoder())?
                    .into_owned();
            }
        }
        Ok(())
    }

    /// Close the writer and fold the counters into a summary.
    fn finish(mut self) -> ConvertSummary {
        if let Err(err) = self.writer.close() {
            eprintln!("{err}");
        }
        ConvertSummary {
            entries_seen: self.seen,
            entries_written: self.writer.entries_written(),
            entries_filtered: self.filtered,
            entries_dropped: self.dropped,
            pages: self.writer.pages(),
        }
    }
}
