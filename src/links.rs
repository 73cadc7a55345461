//! Link classification helpers
//!
//! Post links are classified as they appear in the markup, without resolving
//! them against a base URL: internal vs external (host match against the
//! blog's own domain), internal reference (a link carrying a post-identifier
//! parameter), protocol class (web vs non-web), target domain and filetype.

use std::collections::HashMap;
use url::Url;

/// Query parameter marking a link to an individual post
const POST_PARAM: &str = "ts=";

/// Hard bound on internal reference chain traversal depth
pub const MAX_CHAIN_DEPTH: usize = 64;

/// Scheme / host / path / query split of a raw href
///
/// Absolute URLs go through the `url` crate; relative references (including
/// protocol-relative `//host/...` and bare `?query` forms) are split
/// manually with an empty scheme, so that a plain `?ts=abc` href keeps an
/// empty host and path the way the classification rules expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitUrl {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub query: String,
}

impl SplitUrl {
    /// Splits a raw href into its parts; never fails
    pub fn parse(link: &str) -> Self {
        match Url::parse(link) {
            Ok(url) => Self {
                scheme: url.scheme().to_string(),
                host: url.host_str().unwrap_or("").to_string(),
                path: url.path().to_string(),
                query: url.query().unwrap_or("").to_string(),
            },
            Err(_) => Self::parse_relative(link),
        }
    }

    fn parse_relative(link: &str) -> Self {
        // Fragments never take part in classification
        let link = link.split('#').next().unwrap_or("");

        let (host, rest) = if let Some(stripped) = link.strip_prefix("//") {
            let end = stripped
                .find(|c| c == '/' || c == '?')
                .unwrap_or(stripped.len());
            (normalize_authority(&stripped[..end]), &stripped[end..])
        } else {
            (String::new(), link)
        };

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path.to_string(), query.to_string()),
            None => (rest.to_string(), String::new()),
        };

        Self {
            scheme: String::new(),
            host,
            path,
            query,
        }
    }
}

/// Drops userinfo and port from an authority component and lowercases it
fn normalize_authority(authority: &str) -> String {
    let host = authority
        .rsplit('@')
        .next()
        .unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    host.to_lowercase()
}

/// Returns true if the link points back at the blog itself
///
/// A link is internal when its host equals the blog domain, or when it has
/// no host and an empty or `/` path (the blog's own relative hrefs).
pub fn is_internal_link(link: &str, blog_domain: &str) -> bool {
    let parts = SplitUrl::parse(link);
    if parts.host.eq_ignore_ascii_case(blog_domain) {
        return true;
    }
    parts.host.is_empty() && (parts.path.is_empty() || parts.path == "/")
}

/// Returns true if the link is an internal link referencing a specific post
pub fn is_internal_reference(link: &str, blog_domain: &str) -> bool {
    is_internal_link(link, blog_domain) && link.contains(POST_PARAM)
}

/// Extracts the post identifier carried by a link
///
/// Takes the segment after the last `ts=` occurrence and cuts it at the
/// next parameter separator. Returns None for links without the parameter.
pub fn post_param(link: &str) -> Option<String> {
    let start = link.rfind(POST_PARAM)? + POST_PARAM.len();
    let rest = &link[start..];
    Some(rest.split('&').next().unwrap_or(rest).to_string())
}

/// Returns true if the link uses the given protocol
///
/// With `explicit` set to false, scheme-less links (like protocol-relative
/// `//www.heise.de` hrefs) match any protocol.
pub fn is_prot(link: &str, prot: &str, explicit: bool) -> bool {
    let scheme = SplitUrl::parse(link).scheme;
    if !explicit && scheme.is_empty() {
        return true;
    }
    scheme == prot
}

/// Returns true if the link is neither http, https nor scheme-less
pub fn is_non_web(link: &str) -> bool {
    let scheme = SplitUrl::parse(link).scheme;
    !scheme.is_empty() && scheme != "http" && scheme != "https"
}

/// Adds the missing `www.` to a host that has no subdomain
pub fn normalize_domain(host: &str) -> String {
    if host.matches('.').count() == 1 {
        format!("www.{}", host)
    } else {
        host.to_string()
    }
}

/// Counts links in `links` whose host matches `domain`
///
/// Both sides are `www.`-normalized and compared case-insensitively.
pub fn count_domain(links: &[String], domain: &str) -> usize {
    let wanted = normalize_domain(domain).to_lowercase();
    links
        .iter()
        .filter(|link| {
            let host = normalize_domain(&SplitUrl::parse(link).host);
            host.to_lowercase() == wanted
        })
        .count()
}

/// Counts internal links in `links`
pub fn count_internal_links(links: &[String], blog_domain: &str) -> usize {
    links
        .iter()
        .filter(|link| is_internal_link(link, blog_domain))
        .count()
}

/// Counts internal post references in `links`
pub fn count_internal_references(links: &[String], blog_domain: &str) -> usize {
    links
        .iter()
        .filter(|link| is_internal_reference(link, blog_domain))
        .count()
}

/// Counts external links in `links`
pub fn count_external_links(links: &[String], blog_domain: &str) -> usize {
    links
        .iter()
        .filter(|link| !is_internal_link(link, blog_domain))
        .count()
}

/// Counts links with a non-web protocol
pub fn count_non_web(links: &[String]) -> usize {
    links.iter().filter(|link| is_non_web(link)).count()
}

/// Counts links using the given protocol
///
/// With `only_external` set, internal links are excluded from the count.
pub fn count_prot(links: &[String], prot: &str, only_external: bool, blog_domain: &str) -> usize {
    links
        .iter()
        .filter(|link| !(only_external && is_internal_link(link, blog_domain)))
        .filter(|link| is_prot(link, prot, true))
        .count()
}

/// Extracts the filetype of a link from its path
///
/// Takes the final dot-delimited segment of the lowercased path, only when
/// the path contains a dot and the segment is shorter than 8 characters (a
/// heuristic to exclude query-like suffixes that are not extensions).
pub fn filetype_of(link: &str) -> Option<String> {
    let path = SplitUrl::parse(link).path.to_lowercase();
    let (_, ext) = path.rsplit_once('.')?;
    if ext.chars().count() < 8 {
        Some(ext.to_string())
    } else {
        None
    }
}

/// Length of the longest chain of internal references starting at `start`
///
/// Walks the reference graph depth-first with an explicit frame stack and a
/// per-path visited history, so reference cycles terminate and pathological
/// graphs cannot blow the call stack. Paths longer than [`MAX_CHAIN_DEPTH`]
/// are cut off.
pub fn reference_chain_depth(
    links_by_post: &HashMap<String, Vec<String>>,
    start: &str,
    blog_domain: &str,
) -> usize {
    // (post id, index of the next link to consider)
    let mut stack: Vec<(String, usize)> = vec![(start.to_string(), 0)];
    // Ancestors of the post on top of the stack, in path order
    let mut hist: Vec<String> = Vec::new();
    let mut max_depth = 0;

    while let Some((id, next)) = stack.last().cloned() {
        max_depth = max_depth.max(stack.len() - 1);

        let links = links_by_post
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or_default();

        let mut candidate = None;
        let mut i = next;
        while i < links.len() {
            let link = &links[i];
            i += 1;
            if !is_internal_reference(link, blog_domain) {
                continue;
            }
            let Some(target) = post_param(link) else {
                continue;
            };
            if hist.iter().any(|seen| *seen == target) {
                continue;
            }
            candidate = Some(target);
            break;
        }

        if let Some(top) = stack.last_mut() {
            top.1 = i;
        }

        match candidate {
            Some(target) if stack.len() <= MAX_CHAIN_DEPTH => {
                hist.push(id);
                stack.push((target, 0));
            }
            _ => {
                stack.pop();
                if !stack.is_empty() {
                    hist.pop();
                }
            }
        }
    }

    max_depth
}
