//! # feedpage
//!
//! Convert Atom-style feed-archive XML into static HTML pages, one or more
//! entries per file, with optional author/date bylines, horizontal rules,
//! original-post links, and bundled stylesheet/script assets.
//!
//! # Architecture: One Streaming Pass
//!
//! Each input file is converted in a single pass with no document tree:
//!
//! ```text
//! bytes → quick-xml pull reader → Transducer (marker stack) → PageWriter
//! ```
//!
//! The transducer classifies every start tag by (depth, name), accumulates
//! the live entry's fields from character data, and hands each completed
//! entry to the page writer, which owns the output-file lifecycle: lazy
//! open, batch-boundary close, guaranteed trailing tags. Memory use is one
//! entry plus one file handle, independent of feed size.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`convert`] | The streaming core — parser event loop and transduction state machine |
//! | [`entry`] | Per-entry field accumulation and timestamp display normalization |
//! | [`render`] | Maud page fragments and the batching [`render::PageWriter`] |
//! | [`assets`] | Stylesheet/`jquery.js` install into the output directory |
//! | [`config`] | [`config::RenderConfig`] — the read-only per-run options |
//! | [`output`] | CLI summary formatting — pure functions plus print wrappers |
//!
//! # Design Decisions
//!
//! ## Explicit Markers Over Depth Flags
//!
//! Nested-element context is a stack of per-level markers, not a depth
//! counter with boolean flags. Character data is routed by the top marker
//! alone, which makes the "one collecting field at a time" invariant
//! structural and keeps same-named elements at different positions (an
//! entry's `<title>` vs. the feed's) from aliasing each other.
//!
//! ## Byte-Exact Pass-Through
//!
//! Feed text reaches the page exactly as the parser decoded it — no HTML
//! escaping, no whitespace cleanup. Rich feed content is entity-escaped
//! markup in the XML and is supposed to come out the other side as real
//! markup, so rendering goes through Maud's `PreEscaped` throughout.
//!
//! ## Guaranteed Page Closure
//!
//! Exactly one output file is open at a time, and it is closed with its
//! trailing tags on every path — batch boundary, end of input, or parse
//! abort — via an explicit `close()` plus a best-effort `Drop`. A crash
//! mid-feed costs the unfinished entry, never a malformed earlier page.

pub mod assets;
pub mod config;
pub mod convert;
pub mod entry;
pub mod output;
pub mod render;
