//! Post body decoding, slicing and markup counting
//!
//! Stored post pages carry the blog's header and footer around the actual
//! entry. The body is the slice between the `[l]` permalink anchor and the
//! closing boilerplate, located on the newline-collapsed raw markup.

use scraper::Html;

/// End of the permalink anchor; the body starts right after it
pub const OPEN_MARKER: &str = "[l]</a>";

/// Start of the closing boilerplate; the body ends right before it
pub const CLOSE_MARKER: &str = "</ul><p><div";

/// Substring marking an in-post update
const UPDATE_MARKER: &str = "<b>Update";

/// Closing tags counted as quoted content
const QUOTE_MARKERS: [&str; 3] = ["</blockquote>", "</pre>", "</q>"];

/// Closing tag counted as a table
const TABLE_MARKER: &str = "</table>";

/// Outcome of the two-stage post body decode
///
/// Strict UTF-8 is tried first; bodies that predate the blog's UTF-8 era
/// fall back to Latin-1. A body that decodes to nothing (an empty file left
/// by a failed download) is `Failed` and excludes the post from the
/// dataset.
#[derive(Debug)]
pub enum DecodedBody {
    /// Body decoded as strict UTF-8 (primary strategy)
    Utf8(String),
    /// Body re-decoded as Latin-1 after strict UTF-8 failed
    Latin1(String),
    /// Nothing usable to parse
    Failed,
}

impl DecodedBody {
    /// The decoded text, if any
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Utf8(text) | Self::Latin1(text) => Some(text),
            Self::Failed => None,
        }
    }
}

/// Decodes a stored post body
pub fn decode_body(raw: &[u8]) -> DecodedBody {
    let decoded = match std::str::from_utf8(raw) {
        Ok(text) => DecodedBody::Utf8(text.to_string()),
        Err(_) => DecodedBody::Latin1(raw.iter().map(|&b| b as char).collect()),
    };

    let blank = match &decoded {
        DecodedBody::Utf8(text) | DecodedBody::Latin1(text) => text.trim().is_empty(),
        DecodedBody::Failed => true,
    };

    if blank {
        DecodedBody::Failed
    } else {
        decoded
    }
}

/// Slices the post body out of the newline-collapsed page markup
///
/// Returns the content after the first opening marker, cut before the first
/// subsequent closing marker. A missing closing marker yields the remainder
/// of the document; a missing opening marker yields None (the page has no
/// recognizable body).
pub fn body_slice(content: &str) -> Option<&str> {
    let (_, after) = content.split_once(OPEN_MARKER)?;
    match after.find(CLOSE_MARKER) {
        Some(end) => Some(&after[..end]),
        None => Some(after),
    }
}

/// Update, quote and table counts over the unstripped body slice
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarkupCounts {
    pub updates: u32,
    pub quotes: u32,
    pub tables: u32,
}

/// Counts the fixed markers in the unstripped body slice
pub fn count_markup(slice: &str) -> MarkupCounts {
    let quotes = QUOTE_MARKERS
        .iter()
        .map(|marker| slice.matches(marker).count())
        .sum::<usize>();

    MarkupCounts {
        updates: slice.matches(UPDATE_MARKER).count() as u32,
        quotes: quotes as u32,
        tables: slice.matches(TABLE_MARKER).count() as u32,
    }
}

/// Strips all markup from the body slice, keeping only text content
pub fn strip_markup(slice: &str) -> String {
    let fragment = Html::parse_fragment(slice);
    let text: String = fragment.root_element().text().collect();
    text.trim().to_string()
}
