use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{Details, FeedItem, Flag, ItemId};

/// Ordered collection of feed items owned by a single view.
///
/// Every action returns a new collection and leaves `self` untouched, so a view
/// can compare before/after values to detect changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<FeedItem>,
}

impl Collection {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeedItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&FeedItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    /// Prepends a freshly created item (most recent first).
    pub fn create(
        &self,
        content: impl Into<String>,
        author: impl Into<String>,
        details: Details,
        now: DateTime<Utc>,
    ) -> Self {
        let created_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        self.create_with_timestamp(content, author, details, now, created_at)
    }

    /// Like [`Collection::create`] but with an explicit `created_at` string,
    /// for views that store bare dates.
    pub fn create_with_timestamp(
        &self,
        content: impl Into<String>,
        author: impl Into<String>,
        details: Details,
        now: DateTime<Utc>,
        created_at: String,
    ) -> Self {
        let item = FeedItem {
            id: self.next_id(now),
            author: author.into(),
            content: content.into(),
            created_at,
            read: false,
            hearted: false,
            hearts_count: 0,
            loved: false,
            details,
        };
        info!(id = %item.id, "feed item created");

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.push(item);
        items.extend(self.items.iter().cloned());
        Self { items }
    }

    /// Flips `flag` on the item with `id`. Unknown ids leave the collection as is.
    ///
    /// `Hearted` also moves `hearts_count` by one. The count is clamped at zero,
    /// so un-hearting an item stored as hearted with no hearts keeps it at 0.
    pub fn toggle_flag(&self, id: &ItemId, flag: Flag) -> Self {
        self.update(id, |item| match flag {
            Flag::Read => item.read = !item.read,
            Flag::Loved => item.loved = !item.loved,
            Flag::Hearted => {
                item.hearted = !item.hearted;
                item.hearts_count = if item.hearted {
                    item.hearts_count.saturating_add(1)
                } else {
                    item.hearts_count.saturating_sub(1)
                };
            }
        })
    }

    pub fn mark_read(&self, id: &ItemId) -> Self {
        self.update(id, |item| item.read = true)
    }

    pub fn mark_all_read(&self) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| FeedItem {
                read: true,
                ..item.clone()
            })
            .collect();
        Self { items }
    }

    /// Lazily yields the items matching `predicate`, in collection order.
    pub fn filter<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a FeedItem> + 'a
    where
        P: FnMut(&FeedItem) -> bool + 'a,
    {
        self.items.iter().filter(move |item| predicate(*item))
    }

    /// Stable sort by creation time, newest first. Unparseable timestamps go last.
    pub fn sort_by_date_desc(&self) -> Self {
        Self {
            items: sort_by_date_desc(self.items.iter().cloned()),
        }
    }

    fn update(&self, id: &ItemId, mut apply: impl FnMut(&mut FeedItem)) -> Self {
        if self.get(id).is_none() {
            debug!(%id, "no feed item with this id, ignoring");
            return self.clone();
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                let mut item = item.clone();
                if &item.id == id {
                    apply(&mut item);
                }
                item
            })
            .collect();
        Self { items }
    }

    fn next_id(&self, now: DateTime<Utc>) -> ItemId {
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = ItemId::from_millis(millis);
            if self.get(&candidate).is_none() {
                return candidate;
            }
            millis += 1;
        }
    }
}

/// Stable newest-first ordering over any sequence of items.
pub fn sort_by_date_desc<I>(items: I) -> Vec<FeedItem>
where
    I: IntoIterator<Item = FeedItem>,
{
    let mut keyed: Vec<(Option<DateTime<Utc>>, FeedItem)> = items
        .into_iter()
        .map(|item| (item.timestamp(), item))
        .collect();
    // Vec::sort_by is stable: equal keys keep their relative order.
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, item)| item).collect()
}
