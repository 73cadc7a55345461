//! HTML feature extraction
//!
//! Turns each stored post page into one structured record: plain text,
//! update/quote/table counts and link/media lists. Extraction is
//! best-effort per post; the worst case for a single page is a warning and
//! a missing record, never an aborted batch.

mod body;
mod media;

pub use body::{
    body_slice, count_markup, decode_body, strip_markup, DecodedBody, MarkupCounts, CLOSE_MARKER,
    OPEN_MARKER,
};
pub use media::{extract_media, MediaLists};

use crate::store::ContentStore;
use crate::Result;
use chrono::{DateTime, Local};

/// One archived post, reduced to its structural and textual features
#[derive(Debug, Clone)]
pub struct PostRecord {
    /// Post identifier (the store key)
    pub name: String,

    /// Creation timestamp. Taken from the stored file's modification time
    /// as a stand-in for the unrecoverable publish time.
    pub created: DateTime<Local>,

    /// Post body with all markup stripped
    pub text: String,

    /// Number of in-post updates
    pub updates: u32,

    /// Number of quote blocks
    pub quotes: u32,

    /// Number of tables
    pub tables: u32,

    /// All link targets, in document order
    pub links: Vec<String>,

    /// All image sources, in document order
    pub images: Vec<String>,

    /// All video sources, in document order
    pub videos: Vec<String>,

    /// All audio sources, in document order
    pub audios: Vec<String>,
}

impl PostRecord {
    /// Text length in characters
    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }

    /// A blank post has no images, no videos, no quotes and no links
    pub fn is_blank(&self) -> bool {
        self.images.is_empty()
            && self.videos.is_empty()
            && self.quotes == 0
            && self.links.is_empty()
    }

    fn empty(name: &str, created: DateTime<Local>) -> Self {
        Self {
            name: name.to_string(),
            created,
            text: String::new(),
            updates: 0,
            quotes: 0,
            tables: 0,
            links: Vec::new(),
            images: Vec::new(),
            videos: Vec::new(),
            audios: Vec::new(),
        }
    }
}

/// Extracts one record from a stored post page
///
/// Returns None when the body cannot be decoded at all (the post is
/// excluded from the dataset). A page without the permalink marker yields
/// an empty record: the post stays in the dataset, with no text and no
/// features.
pub fn extract_record(name: &str, created: DateTime<Local>, raw: &[u8]) -> Option<PostRecord> {
    let content = match decode_body(raw).into_text() {
        Some(content) => content,
        None => {
            tracing::warn!("{}: body not decodable, excluding post", name);
            return None;
        }
    };

    // The body is located on a single line
    let content = content.replace('\n', "");

    let slice = match body_slice(&content) {
        Some(slice) => slice,
        None => {
            tracing::warn!("{}: permalink marker not found, emitting empty record", name);
            return Some(PostRecord::empty(name, created));
        }
    };

    let counts = count_markup(slice);
    let media = extract_media(slice);

    Some(PostRecord {
        name: name.to_string(),
        created,
        text: strip_markup(slice),
        updates: counts.updates,
        quotes: counts.quotes,
        tables: counts.tables,
        links: media.links,
        images: media.images,
        videos: media.videos,
        audios: media.audios,
    })
}

/// Extracts records from every post in the store
pub fn extract_records(store: &ContentStore) -> Result<Vec<PostRecord>> {
    let mut records = Vec::new();
    let mut excluded = 0usize;

    for key in store.keys()? {
        let raw = store.read(&key)?;
        let created = store.modified(&key)?;
        match extract_record(&key, created, &raw) {
            Some(record) => records.push(record),
            None => excluded += 1,
        }
    }

    tracing::info!(
        "Extracted {} post records ({} excluded)",
        records.len(),
        excluded
    );

    Ok(records)
}
