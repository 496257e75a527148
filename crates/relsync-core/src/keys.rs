//! Issue-key discovery in release notes and the change requests they link.

use crate::error::{CoreError, Result};
use crate::tracker::{ChangeRequestRef, ChangeRequestSource};
use regex::Regex;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Matcher for `<PREFIX>-<digits>` issue keys of one project.
///
/// The prefix must start at a word boundary; the digit run is ASCII only and
/// may be followed by anything (`ABC-12_fix` yields `ABC-12`).
#[derive(Debug, Clone)]
pub struct KeyPattern {
    regex: Regex,
}

impl KeyPattern {
    /// Build the matcher for a project prefix such as `ABC`.
    ///
    /// # Errors
    /// Returns `CoreError::EmptyPrefix` for a blank prefix.
    pub fn new(prefix: &str) -> Result<Self> {
        if prefix.trim().is_empty() {
            return Err(CoreError::EmptyPrefix);
        }

        let regex = Regex::new(&format!(r"\b{}-[0-9]+", regex::escape(prefix))).map_err(|source| {
            CoreError::InvalidPrefix {
                prefix: prefix.to_string(),
                source,
            }
        })?;
        Ok(Self { regex })
    }

    /// Add every key found in `text` to `keys`.
    pub fn collect_into(&self, text: &str, keys: &mut BTreeSet<String>) {
        keys.extend(self.regex.find_iter(text).map(|m| m.as_str().to_string()));
    }

    /// Every key found in `text`, deduplicated and sorted.
    #[must_use]
    pub fn find_all(&self, text: &str) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        self.collect_into(text, &mut keys);
        keys
    }
}

/// Collect the issue keys referenced by `text`, directly or through the
/// change requests it links.
///
/// Change requests are fetched one at a time in order of appearance. A change
/// request that cannot be fetched is skipped with a warning. The result is
/// sorted ascending with duplicates removed.
pub async fn extract_issue_keys<S>(text: &str, pattern: &KeyPattern, source: &S) -> Vec<String>
where
    S: ChangeRequestSource + ?Sized,
{
    let mut keys = pattern.find_all(text);

    for (url, reference) in ChangeRequestRef::find_all(text) {
        let Some(reference) = reference else {
            warn!(url = %url, "Could not parse change request URL, skipping");
            continue;
        };

        let Some(change_request) = source.fetch_change_request(&reference).await else {
            warn!(url = %url, "Could not fetch change request, skipping");
            continue;
        };

        let before = keys.len();
        pattern.collect_into(&change_request.title, &mut keys);
        pattern.collect_into(&change_request.body, &mut keys);
        debug!(change_request = %reference, new_keys = keys.len() - before, "Scanned change request");
    }

    keys.into_iter().collect()
}
