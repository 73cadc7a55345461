//! Link and media extraction from post bodies

use scraper::{Html, Selector};

/// Links and media sources found in one post body, in document order
#[derive(Debug, Default, Clone)]
pub struct MediaLists {
    /// All anchor hrefs
    pub links: Vec<String>,
    /// All image sources
    pub images: Vec<String>,
    /// All video sources (`object > embed` and `video > source`)
    pub videos: Vec<String>,
    /// All audio sources (`audio > source`)
    pub audios: Vec<String>,
}

/// Parses the body slice as an HTML fragment and pulls out links and media
pub fn extract_media(slice: &str) -> MediaLists {
    let fragment = Html::parse_fragment(slice);

    let mut videos = collect_attr(&fragment, "object > embed[src]", "src");
    videos.extend(collect_attr(&fragment, "video > source[src]", "src"));

    MediaLists {
        links: collect_attr(&fragment, "a[href]", "href"),
        images: collect_attr(&fragment, "img[src]", "src"),
        videos,
        audios: collect_attr(&fragment, "audio > source[src]", "src"),
    }
}

/// Collects one attribute over all matches of a selector, in document order
fn collect_attr(fragment: &Html, selector: &str, attr: &str) -> Vec<String> {
    let mut values = Vec::new();

    if let Ok(selector) = Selector::parse(selector) {
        for element in fragment.select(&selector) {
            if let Some(value) = element.value().attr(attr) {
                values.push(value.to_string());
            }
        }
    }

    values
}
