//! Derived views over the entry collection: search and tag listing.

use crate::entry::Entry;

/// Filter entries by search term and selected tags.
///
/// The term matches case-insensitively against title or content; an
/// empty term matches everything. The tag filter passes when the entry
/// carries any of the selected tags; an empty selection matches
/// everything. Both filters must pass.
pub fn filter_entries<'a>(
    entries: &'a [Entry],
    search_term: &str,
    selected_tags: &[String],
) -> Vec<&'a Entry> {
    let needle = search_term.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            let matches_search = needle.is_empty()
                || entry.title.to_lowercase().contains(&needle)
                || entry.content.to_lowercase().contains(&needle);
            let matches_tags = selected_tags.is_empty()
                || selected_tags.iter().any(|tag| entry.tags.contains(tag));
            matches_search && matches_tags
        })
        .collect()
}

/// All unique tags across entries, first-seen order.
pub fn all_tags(entries: &[Entry]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut tags = Vec::new();
    for entry in entries {
        for tag in &entry.tags {
            if seen.insert(tag.clone()) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}
