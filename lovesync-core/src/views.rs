//! State owned by each page. Handlers that change an item hand it back so the
//! caller can pass it to the repository.

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::{debug, info};

use crate::collection::{sort_by_date_desc, Collection};
use crate::compose::Composer;
use crate::error::GeoError;
use crate::expand::ExpandedSet;
use crate::listening::{duration_minutes, ListeningTimer};
use crate::models::{CheckinPrompt, Details, FeedItem, Flag, ItemId, MediaKind, Position};
use crate::seed::DAILY_PROMPTS;

pub const DEFAULT_LOCATION_STATUS: &str = "Shared my location ❤️";
pub const CURRENT_LOCATION_ADDRESS: &str = "Your current location";

fn changed(items: &Collection, id: &ItemId) -> Option<FeedItem> {
    items.get(id).cloned()
}

#[derive(Debug, Clone, Default)]
pub struct AffirmationsFeed {
    items: Collection,
    pub composer: Composer,
}

impl AffirmationsFeed {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items: Collection::new(items),
            composer: Composer::Idle,
        }
    }

    pub fn items(&self) -> &Collection {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.unread_count()
    }

    pub fn start_compose(&mut self) {
        self.composer.start();
    }

    pub fn cancel_compose(&mut self) {
        self.composer.cancel();
    }

    pub fn submit(&mut self, author: &str, now: DateTime<Utc>) -> Option<FeedItem> {
        let (content, ()) = self.composer.submit()?;
        self.items = self.items.create(content, author, Details::Affirmation, now);
        self.items.iter().next().cloned()
    }

    pub fn toggle_heart(&mut self, id: &ItemId) -> Option<FeedItem> {
        self.items = self.items.toggle_flag(id, Flag::Hearted);
        changed(&self.items, id)
    }

    /// Marks an unread affirmation as read when its card is opened.
    pub fn open(&mut self, id: &ItemId) -> Option<FeedItem> {
        if self.items.get(id)?.read {
            return None;
        }
        self.items = self.items.mark_read(id);
        changed(&self.items, id)
    }

    /// Returns the items that were unread.
    pub fn mark_all_read(&mut self) -> Vec<FeedItem> {
        let previously_unread: Vec<ItemId> = self
            .items
            .filter(|item| !item.read)
            .map(|item| item.id.clone())
            .collect();
        self.items = self.items.mark_all_read();
        previously_unread
            .iter()
            .filter_map(|id| changed(&self.items, id))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoveLetters {
    items: Collection,
    pub composer: Composer,
    expanded: ExpandedSet,
}

impl LoveLetters {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items: Collection::new(items),
            ..Default::default()
        }
    }

    pub fn items(&self) -> &Collection {
        &self.items
    }

    pub fn submit(&mut self, from: &str, to: &str, now: DateTime<Utc>) -> Option<FeedItem> {
        let (content, ()) = self.composer.submit()?;
        let details = Details::Letter {
            to: to.to_owned(),
            attachments: Vec::new(),
        };
        self.items = self.items.create(content, from, details, now);
        self.items.iter().next().cloned()
    }

    pub fn open(&mut self, id: &ItemId) -> Option<FeedItem> {
        if self.items.get(id)?.read {
            return None;
        }
        self.items = self.items.mark_read(id);
        changed(&self.items, id)
    }

    pub fn toggle_expanded(&mut self, id: &ItemId) {
        self.expanded.toggle(id);
    }

    pub fn is_expanded(&self, id: &ItemId) -> bool {
        self.expanded.is_expanded(id)
    }

    pub fn display<'a>(&self, item: &'a FeedItem) -> Cow<'a, str> {
        self.expanded.display(item)
    }
}

/// Extra fields of the "add memory" form. The composer draft holds the media path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDraft {
    pub caption: String,
    pub location: String,
}

#[derive(Debug, Clone, Default)]
pub struct MemoriesGallery {
    items: Collection,
    loved_only: bool,
    selected: Option<ItemId>,
    pub composer: Composer<MemoryDraft>,
}

impl MemoriesGallery {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items: Collection::new(items),
            ..Default::default()
        }
    }

    pub fn items(&self) -> &Collection {
        &self.items
    }

    pub fn loved_only(&self) -> bool {
        self.loved_only
    }

    pub fn toggle_loved_only(&mut self) {
        self.loved_only = !self.loved_only;
    }

    /// Gallery order: optional loved filter, then newest first.
    pub fn visible(&self) -> Vec<FeedItem> {
        let loved_only = self.loved_only;
        sort_by_date_desc(self.items.filter(move |m| !loved_only || m.loved).cloned())
    }

    pub fn toggle_love(&mut self, id: &ItemId) -> Option<FeedItem> {
        self.items = self.items.toggle_flag(id, Flag::Loved);
        changed(&self.items, id)
    }

    pub fn select(&mut self, id: &ItemId) {
        if self.items.get(id).is_some() {
            self.selected = Some(id.clone());
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// The memory shown in the lightbox, with its current flags.
    pub fn selected(&self) -> Option<&FeedItem> {
        self.selected.as_ref().and_then(|id| self.items.get(id))
    }

    pub fn submit(&mut self, author: &str, now: DateTime<Utc>) -> Option<FeedItem> {
        let (path, draft) = self.composer.submit()?;
        let path = path.trim().to_owned();
        let location = draft.location.trim();
        let details = Details::Memory {
            media: media_kind_for(&path),
            url: path,
            thumbnail: None,
            location: (!location.is_empty()).then(|| location.to_owned()),
        };
        let created_at = now.date_naive().format("%Y-%m-%d").to_string();
        self.items = self
            .items
            .create_with_timestamp(draft.caption.trim(), author, details, now, created_at);
        self.items.iter().next().cloned()
    }
}

pub fn media_kind_for(path: &str) -> MediaKind {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" | "mov" | "webm" | "mkv" | "avi" => MediaKind::Video,
        _ => MediaKind::Photo,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckinMode {
    #[default]
    Checkin,
    Listening,
}

#[derive(Debug, Clone, Default)]
pub struct DailyCheckins {
    pub mode: CheckinMode,
    checkins: Collection,
    sessions: Collection,
    pub responder: Composer<CheckinPrompt>,
    timer: ListeningTimer,
    /// Summary form opened when a session ends; carries the elapsed seconds.
    pub summary: Composer<u64>,
}

/// Prompts rotate with the day of the month.
pub fn prompt_for_day(date: NaiveDate) -> &'static CheckinPrompt {
    &DAILY_PROMPTS[date.day() as usize % DAILY_PROMPTS.len()]
}

impl DailyCheckins {
    pub fn new(checkins: Vec<FeedItem>, sessions: Vec<FeedItem>) -> Self {
        Self {
            checkins: Collection::new(checkins),
            sessions: Collection::new(sessions),
            ..Default::default()
        }
    }

    pub fn checkins(&self) -> &Collection {
        &self.checkins
    }

    pub fn sessions(&self) -> &Collection {
        &self.sessions
    }

    pub fn timer(&self) -> &ListeningTimer {
        &self.timer
    }

    pub fn respond(&mut self, prompt: &CheckinPrompt) {
        self.responder.start_with(prompt.clone());
    }

    pub fn submit_response(&mut self, author: &str, now: DateTime<Utc>) -> Option<FeedItem> {
        let (response, prompt) = self.responder.submit()?;
        let details = Details::Checkin {
            prompt_id: prompt.id.to_owned(),
            prompt: prompt.prompt.to_owned(),
        };
        let date = now.date_naive().format("%Y-%m-%d").to_string();
        self.checkins = self
            .checkins
            .create_with_timestamp(response, author, details, now, date);
        self.checkins.iter().next().cloned()
    }

    pub fn start_listening(&mut self) {
        self.summary.cancel();
        self.timer.start();
        info!("listening session started");
    }

    pub fn tick(&mut self, seconds: u64) {
        self.timer.tick(seconds);
    }

    /// Stops the timer and opens the summary form.
    pub fn end_listening(&mut self) {
        if !self.timer.is_listening() {
            return;
        }
        let elapsed = self.timer.stop();
        debug!(elapsed, "listening session ended");
        self.summary.start_with(elapsed);
    }

    pub fn submit_summary(&mut self, speaker: &str, now: DateTime<Utc>) -> Option<FeedItem> {
        let (summary, elapsed) = self.summary.submit()?;
        let details = Details::Listening {
            duration_minutes: duration_minutes(elapsed),
        };
        let date = now.date_naive().format("%Y-%m-%d").to_string();
        self.sessions = self
            .sessions
            .create_with_timestamp(summary, speaker, details, now, date);
        self.sessions.iter().next().cloned()
    }
}

/// Ticket of one location lookup. Numbers are unique for the whole process, so
/// a remounted view never matches a result requested by the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareRequest(u64);

static NEXT_SHARE_REQUEST: AtomicU64 = AtomicU64::new(1);

impl ShareRequest {
    fn next() -> Self {
        Self(NEXT_SHARE_REQUEST.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationSharing {
    items: Collection,
    pub status_draft: String,
    pending: Option<ShareRequest>,
}

impl LocationSharing {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items: Collection::new(items),
            ..Default::default()
        }
    }

    pub fn items(&self) -> &Collection {
        &self.items
    }

    pub fn is_sharing(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a lookup and returns its ticket. `None` while one is already in flight.
    pub fn begin_share(&mut self) -> Option<ShareRequest> {
        if self.pending.is_some() {
            return None;
        }
        let request = ShareRequest::next();
        self.pending = Some(request);
        Some(request)
    }

    /// Applies the geolocation answer for `request`. Answers to any other
    /// request are ignored; failures only clear the pending lookup.
    pub fn complete_share(
        &mut self,
        request: ShareRequest,
        result: Result<Position, GeoError>,
        author: &str,
        now: DateTime<Utc>,
    ) -> Option<FeedItem> {
        if self.pending != Some(request) {
            debug!(?request, "location result for another request, ignoring");
            return None;
        }
        self.pending = None;
        let position = match result {
            Ok(position) => position,
            Err(e) => {
                debug!(error = %e, "location share failed");
                return None;
            }
        };
        let status = if self.status_draft.is_empty() {
            DEFAULT_LOCATION_STATUS.to_owned()
        } else {
            std::mem::take(&mut self.status_draft)
        };
        let details = Details::Location {
            latitude: position.latitude,
            longitude: position.longitude,
            address: CURRENT_LOCATION_ADDRESS.to_owned(),
        };
        self.items = self.items.create(status, author, details, now);
        self.items.iter().next().cloned()
    }
}
