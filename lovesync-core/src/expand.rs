use std::borrow::Cow;
use std::collections::HashSet;

use crate::models::{FeedItem, ItemId};

/// Number of characters shown for a collapsed letter.
pub const PREVIEW_LENGTH: usize = 150;
pub const TRUNCATION_MARKER: &str = "...";

/// Which items of a collection are shown in full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedSet {
    expanded: HashSet<ItemId>,
}

impl ExpandedSet {
    pub fn toggle(&mut self, id: &ItemId) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
    }

    pub fn is_expanded(&self, id: &ItemId) -> bool {
        self.expanded.contains(id)
    }

    /// Text to render for `item` given its expanded state.
    pub fn display<'a>(&self, item: &'a FeedItem) -> Cow<'a, str> {
        if self.is_expanded(&item.id) {
            Cow::Borrowed(&item.content)
        } else {
            preview(&item.content)
        }
    }
}

/// Whether `content` is long enough to offer "Read More".
pub fn needs_toggle(content: &str) -> bool {
    content.chars().count() > PREVIEW_LENGTH
}

/// First [`PREVIEW_LENGTH`] characters plus the marker, or the whole text when short.
pub fn preview(content: &str) -> Cow<'_, str> {
    match content.char_indices().nth(PREVIEW_LENGTH) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &content[..cut], TRUNCATION_MARKER)),
        None => Cow::Borrowed(content),
    }
}
