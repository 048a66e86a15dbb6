//! Markdown image link extraction for content served by this host.
//!
//! When a post is edited, images it embeds from our own media path have to be
//! pointed at a different path segment. These functions find those links and
//! compute the rewritten URLs; they never touch the body text itself.

use crate::models::ImageLinkRecord;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// `![label](http(s)://rest)`: captures the label, the full URL, and the URL
/// without its scheme.
fn image_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\((https?://([^)\s]+))\)").unwrap())
}

/// All local image links in `body`, in document order, with their URLs
/// rewritten. Duplicate labels are kept.
///
/// A link is local when its URL, minus the scheme, starts with
/// `{hostname}/{path}/`. The rewrite replaces the first occurrence of `path`
/// in the URL with `replaced_path`.
pub fn image_link_records(
    body: &str,
    hostname: &str,
    path: &str,
    replaced_path: &str,
) -> Vec<ImageLinkRecord> {
    let prefix = format!("{}/{}/", hostname, path);

    image_link_re()
        .captures_iter(body)
        .filter(|caps| caps[3].starts_with(&prefix))
        .map(|caps| ImageLinkRecord {
            label: caps[1].to_string(),
            url: caps[2].replacen(path, replaced_path, 1),
        })
        .collect()
}

/// Map of label to rewritten URL for every local image link in `body`.
///
/// When two links share a label the later one wins.
pub fn extract_image_links(
    body: &str,
    hostname: &str,
    path: &str,
    replaced_path: &str,
) -> BTreeMap<String, String> {
    image_link_records(body, hostname, path, replaced_path)
        .into_iter()
        .map(|record| (record.label, record.url))
        .collect()
}
