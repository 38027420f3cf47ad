//! Per-entry field accumulation.
//!
//! One [`Entry`] is live at a time during a parse. Its text fields fill up
//! incrementally from character-data events — the parser may hand the same
//! logical text in several chunks — and the whole record is consumed by the
//! render step when the closing `</entry>` tag arrives.
//!
//! Text is kept byte-exact: no escaping, no whitespace normalization. Feed
//! content frequently carries real markup (entity-escaped in the XML), and
//! it must survive into the generated pages untouched.

/// The elements inside `<entry>` whose character data is collected.
///
/// `Author` is fed by the `<name>` child of the entry's author wrapper;
/// the other four are direct children of `<entry>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Author,
    Published,
    Title,
    Summary,
    Content,
}

/// One syndication-feed item, accumulated during the parse and rendered to
/// one logical HTML article.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Entry {
    pub author: String,
    pub published: String,
    /// Set once from the `href` attribute of `<link>`, not from character
    /// data. Last `href` wins if the attribute repeats.
    pub link: String,
    pub title: String,
    pub summary: String,
    pub content: String,
}

impl Entry {
    /// Append a chunk of character data to the given field.
    pub fn push(&mut self, field: Field, text: &str) {
        let slot = match field {
            Field::Author => &mut self.author,
            Field::Published => &mut self.published,
            Field::Title => &mut self.title,
            Field::Summary => &mut self.summary,
            Field::Content => &mut self.content,
        };
        slot.push_str(text);
    }

    /// The text rendered as the article body: rich `content` when present,
    /// `summary` otherwise. Empty when the entry carries neither.
    pub fn body(&self) -> &str {
        if self.content.is_empty() {
            &self.summary
        } else {
            &self.content
        }
    }
}

/// Replace the `T` and `Z` separators of an ISO-8601-like timestamp with
/// spaces for display. Idempotent — already-normalized text passes through
/// unchanged.
pub fn normalize_timestamp(published: &str) -> String {
    published.replace(['T', 'Z'], " ")
}
