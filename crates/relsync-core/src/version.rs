//! Tracker version naming from release tags.

use regex::Regex;
use std::sync::LazyLock;

/// One `<major>.<minor>.<patch>` triple of ASCII digits with an optional
/// single non-digit marker in front (`v1.2.3`).
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^0-9]?[0-9]+\.[0-9]+\.[0-9]+").expect("version pattern is valid")
});

/// Derive the tracker version name from a release tag.
///
/// The first match in `tag` is used verbatim, marker included. With a
/// `prefix` the result is `"<prefix> <match>"`. Returns `None` when the tag
/// has no version triple.
#[must_use]
pub fn derive_version_name(tag: &str, prefix: Option<&str>) -> Option<String> {
    let matched = VERSION_PATTERN.find(tag)?.as_str();

    Some(match prefix {
        Some(prefix) => format!("{prefix} {matched}"),
        None => matched.to_string(),
    })
}
