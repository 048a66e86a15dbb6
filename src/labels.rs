//! Option label computation for the user selector.

use crate::models::AuthorEntry;
use regex::Regex;
use std::sync::OnceLock;

/// Shown when an author carries no usable name fields.
pub const NO_NAME: &str = "NO NAME";

fn scheme_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https+://").unwrap())
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.is_empty())
}

/// Shorten a uid for display: the first ten characters after the first
/// `https://` is dropped, an ellipsis, then the last five characters of the
/// full uid.
pub fn abbreviate_uid(uid: &str) -> String {
    let stripped = scheme_re().replace(uid, "");
    let head: String = stripped.chars().take(10).collect();

    let total = uid.chars().count();
    let tail: String = uid.chars().skip(total.saturating_sub(5)).collect();

    format!("{}...{}", head, tail)
}

/// Human name for an author: display name, else first + last name, else
/// [`NO_NAME`].
pub fn author_name(entry: &AuthorEntry) -> String {
    if let Some(name) = non_empty(&entry.display_name) {
        return name.to_string();
    }

    let joined = format!(
        "{}{}",
        non_empty(&entry.first_name).unwrap_or(""),
        non_empty(&entry.last_name).unwrap_or("")
    );
    if !joined.is_empty() {
        return joined;
    }

    NO_NAME.to_string()
}

/// Label for a `/author` entry, or `None` if the entry has no uid.
pub fn author_label(entry: &AuthorEntry) -> Option<String> {
    let uid = non_empty(&entry.uid)?;
    Some(format!("{} [{}]", author_name(entry), abbreviate_uid(uid)))
}

/// Label once a profile lookup has produced a display name.
pub fn resolved_label(display_name: &str, uid: &str) -> String {
    format!("{} ({})", display_name, uid)
}
