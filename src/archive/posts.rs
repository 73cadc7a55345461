//! Post crawler
//!
//! Turns the post references discovered on index pages into bare post
//! identifiers and fetches each missing post page into the post store.

use crate::archive::fetcher::{fetch_into_store, FetchTally};
use crate::config::Config;
use crate::store::ContentStore;
use crate::Result;
use reqwest::Client;
use std::collections::BTreeSet;

/// Length of the fixed `?ts=` prefix carried by every post reference
const POST_REF_PREFIX_LEN: usize = 4;

/// Strips the reference prefix to obtain the bare post identifier
///
/// References shorter than the prefix (or with nothing after it) carry no
/// identifier and are discarded.
pub fn post_key(href: &str) -> Option<&str> {
    href.get(POST_REF_PREFIX_LEN..).filter(|key| !key.is_empty())
}

/// Fetches every referenced post that is not yet in the store
///
/// References are collapsed into a set first: a post referenced by several
/// index pages exists once. Fetch order follows the set's ordering, which
/// is not part of the contract.
pub async fn fetch_posts(
    client: &Client,
    config: &Config,
    store: &ContentStore,
    refs: &[String],
) -> Result<FetchTally> {
    let keys: BTreeSet<&str> = refs.iter().filter_map(|href| post_key(href)).collect();
    let mut tally = FetchTally::default();

    for key in keys {
        let url = format!("{}{}", config.blog.post_url, key);
        let outcome = fetch_into_store(client, &url, store, key).await?;
        tally.record(&outcome);
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_key_strips_prefix() {
        assert_eq!(post_key("?ts=b4e14cbf"), Some("b4e14cbf"));
    }

    #[test]
    fn test_post_key_too_short() {
        assert_eq!(post_key("?ts="), None);
        assert_eq!(post_key("?ts"), None);
        assert_eq!(post_key(""), None);
    }
}
