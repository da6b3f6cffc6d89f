use std::fmt;
use std::str::FromStr;

use tracing::{info, warn};

use crate::models::{FeedItem, ViewKind};
use crate::store::Repository;
use crate::views::{AffirmationsFeed, DailyCheckins, LocationSharing, LoveLetters, MemoriesGallery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Memories,
    Letters,
    Checkins,
    Affirmations,
    Location,
    Settings,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Memories,
        Page::Letters,
        Page::Checkins,
        Page::Affirmations,
        Page::Location,
        Page::Settings,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Memories => "memories",
            Page::Letters => "letters",
            Page::Checkins => "checkins",
            Page::Affirmations => "affirmations",
            Page::Location => "location",
            Page::Settings => "settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Memories => "Memories",
            Page::Letters => "Letters",
            Page::Checkins => "Check-ins",
            Page::Affirmations => "Love Feed",
            Page::Location => "Location",
            Page::Settings => "Settings",
        }
    }

    /// Like `FromStr`, but unknown keys land on the home page.
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown page key `{}`", self.0)
    }
}

impl std::error::Error for UnknownPage {}

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.key() == s)
            .ok_or_else(|| UnknownPage(s.to_owned()))
    }
}

/// The signed-in couple. Handed to the router instead of a global flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_name: String,
    pub partner_name: String,
}

impl Session {
    /// Both names are required (after trimming).
    pub fn new(user_name: &str, partner_name: &str) -> Option<Self> {
        let user_name = user_name.trim();
        let partner_name = partner_name.trim();
        if user_name.is_empty() || partner_name.is_empty() {
            return None;
        }
        Some(Self {
            user_name: user_name.to_owned(),
            partner_name: partner_name.to_owned(),
        })
    }
}

/// The single view currently mounted, with the state it owns.
#[derive(Debug, Clone)]
pub enum MountedView {
    Home,
    Memories(MemoriesGallery),
    Letters(LoveLetters),
    Checkins(DailyCheckins),
    Affirmations(AffirmationsFeed),
    Location(LocationSharing),
    Settings,
}

impl MountedView {
    /// Builds a fresh view for `page`, loading its collections from `repo`.
    pub async fn load<R: Repository>(page: Page, repo: &R) -> Self {
        match page {
            Page::Home => MountedView::Home,
            Page::Settings => MountedView::Settings,
            Page::Memories => {
                MountedView::Memories(MemoriesGallery::new(load_or_empty(repo, ViewKind::Memories).await))
            }
            Page::Letters => {
                MountedView::Letters(LoveLetters::new(load_or_empty(repo, ViewKind::Letters).await))
            }
            Page::Affirmations => MountedView::Affirmations(AffirmationsFeed::new(
                load_or_empty(repo, ViewKind::Affirmations).await,
            )),
            Page::Location => {
                MountedView::Location(LocationSharing::new(load_or_empty(repo, ViewKind::Locations).await))
            }
            Page::Checkins => MountedView::Checkins(DailyCheckins::new(
                load_or_empty(repo, ViewKind::Checkins).await,
                load_or_empty(repo, ViewKind::ListeningSessions).await,
            )),
        }
    }

    pub fn page(&self) -> Page {
        match self {
            MountedView::Home => Page::Home,
            MountedView::Memories(_) => Page::Memories,
            MountedView::Letters(_) => Page::Letters,
            MountedView::Checkins(_) => Page::Checkins,
            MountedView::Affirmations(_) => Page::Affirmations,
            MountedView::Location(_) => Page::Location,
            MountedView::Settings => Page::Settings,
        }
    }
}

async fn load_or_empty<R: Repository>(repo: &R, kind: ViewKind) -> Vec<FeedItem> {
    match repo.load_all(kind).await {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, kind = kind.key(), "failed to load collection");
            Vec::new()
        }
    }
}

/// Mounts one page at a time. Leaving a page drops everything it owned.
#[derive(Debug)]
pub struct Router {
    session: Session,
    view: MountedView,
}

impl Router {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            view: MountedView::Home,
        }
    }

    pub fn current(&self) -> Page {
        self.view.page()
    }

    pub fn view(&self) -> &MountedView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MountedView {
        &mut self.view
    }

    pub fn parts_mut(&mut self) -> (&Session, &mut MountedView) {
        (&self.session, &mut self.view)
    }

    /// Mounts a fresh view for `page`. Staying on the same page keeps its state.
    pub async fn navigate<R: Repository>(&mut self, page: Page, repo: &R) {
        if page == self.current() {
            return;
        }
        info!(from = %self.current(), to = %page, "navigating");
        self.view = MountedView::load(page, repo).await;
    }
}
