use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a feed item, unique within the collection that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Identifier derived from a creation instant (milliseconds since the epoch).
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which view a collection belongs to. Also the key the repository stores it under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Affirmations,
    Letters,
    Checkins,
    ListeningSessions,
    Locations,
    Memories,
}

impl ViewKind {
    pub const ALL: [ViewKind; 6] = [
        ViewKind::Affirmations,
        ViewKind::Letters,
        ViewKind::Checkins,
        ViewKind::ListeningSessions,
        ViewKind::Locations,
        ViewKind::Memories,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ViewKind::Affirmations => "affirmations",
            ViewKind::Letters => "letters",
            ViewKind::Checkins => "checkins",
            ViewKind::ListeningSessions => "listening_sessions",
            ViewKind::Locations => "locations",
            ViewKind::Memories => "memories",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Voice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

/// Payload specific to the view an item lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Details {
    Affirmation,
    Letter {
        to: String,
        #[serde(default)]
        attachments: Vec<Attachment>,
    },
    Checkin {
        prompt_id: String,
        prompt: String,
    },
    Listening {
        duration_minutes: u32,
    },
    Location {
        latitude: f64,
        longitude: f64,
        address: String,
    },
    Memory {
        media: MediaKind,
        url: String,
        #[serde(default)]
        thumbnail: Option<String>,
        #[serde(default)]
        location: Option<String>,
    },
}

/// A unit of user content: affirmation, letter, check-in response, listening
/// session, location ping or memory.
///
/// `content` holds the text the view shows first: the letter body, the
/// affirmation, the check-in answer, the session summary, the location status
/// or the memory caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: ItemId,
    pub author: String,
    pub content: String,
    /// ISO-8601 timestamp, or a bare `YYYY-MM-DD` date for check-ins.
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub hearted: bool,
    #[serde(default)]
    pub hearts_count: u32,
    #[serde(default)]
    pub loved: bool,
    pub details: Details,
}

impl FeedItem {
    /// Parsed creation instant. Accepts RFC 3339 and bare dates (midnight UTC).
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }
}

/// Toggleable boolean flags of a [`FeedItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Read,
    Hearted,
    Loved,
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Feelings,
    Gratitude,
    Dreams,
    Memories,
}

impl PromptCategory {
    pub fn label(self) -> &'static str {
        match self {
            PromptCategory::Feelings => "feelings",
            PromptCategory::Gratitude => "gratitude",
            PromptCategory::Dreams => "dreams",
            PromptCategory::Memories => "memories",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinPrompt {
    pub id: &'static str,
    pub prompt: &'static str,
    pub category: PromptCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}
