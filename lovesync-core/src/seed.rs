//! Sample content shown until a real backend exists.

use crate::models::{
    Attachment, AttachmentKind, CheckinPrompt, Details, FeedItem, ItemId, MediaKind,
    PromptCategory, ViewKind,
};

pub const DAILY_PROMPTS: &[CheckinPrompt] = &[
    CheckinPrompt { id: "1", prompt: "I feel most loved when you...", category: PromptCategory::Feelings },
    CheckinPrompt { id: "2", prompt: "I'm grateful for you because...", category: PromptCategory::Gratitude },
    CheckinPrompt { id: "3", prompt: "My dream for us this week is...", category: PromptCategory::Dreams },
    CheckinPrompt { id: "4", prompt: "My favorite memory of us lately is...", category: PromptCategory::Memories },
    CheckinPrompt { id: "5", prompt: "I feel most connected to you when...", category: PromptCategory::Feelings },
];

pub fn items_for(kind: ViewKind) -> Vec<FeedItem> {
    match kind {
        ViewKind::Affirmations => affirmations(),
        ViewKind::Letters => letters(),
        ViewKind::Checkins => checkins(),
        ViewKind::ListeningSessions => listening_sessions(),
        ViewKind::Locations => locations(),
        ViewKind::Memories => memories(),
    }
}

fn item(id: &str, author: &str, content: &str, created_at: &str, details: Details) -> FeedItem {
    FeedItem {
        id: ItemId::new(id),
        author: author.to_owned(),
        content: content.to_owned(),
        created_at: created_at.to_owned(),
        read: true,
        hearted: false,
        hearts_count: 0,
        loved: false,
        details,
    }
}

fn affirmations() -> Vec<FeedItem> {
    vec![
        FeedItem {
            hearted: true,
            hearts_count: 1,
            ..item(
                "1",
                "Sarah",
                "Alex, your smile lights up my entire world. Thank you for being the most amazing partner I could ever ask for. I love how you always make me laugh, even on my hardest days. ❤️",
                "2024-01-20T10:30:00Z",
                Details::Affirmation,
            )
        },
        FeedItem {
            hearted: true,
            hearts_count: 1,
            ..item(
                "2",
                "Alex",
                "Sarah, I'm so grateful for your endless patience and kindness. You make me want to be a better person every single day. I love you more than words can express.",
                "2024-01-19T18:45:00Z",
                Details::Affirmation,
            )
        },
        FeedItem {
            read: false,
            ..item(
                "3",
                "Sarah",
                "Just wanted to remind you how proud I am of everything you've accomplished. Your determination inspires me daily. 💕",
                "2024-01-18T14:20:00Z",
                Details::Affirmation,
            )
        },
    ]
}

fn letters() -> Vec<FeedItem> {
    vec![
        item(
            "1",
            "Sarah",
            "My dearest Alex, I woke up this morning thinking about our conversation last night. Your laugh still echoes in my mind, and I can't help but smile...",
            "2024-01-20T14:30:00Z",
            Details::Letter {
                to: "Alex".to_owned(),
                attachments: vec![Attachment {
                    kind: AttachmentKind::Image,
                    url: "/sunrise.jpg".to_owned(),
                    name: "Our sunrise".to_owned(),
                }],
            },
        ),
        item(
            "2",
            "Alex",
            "Sarah, my love, every day with you feels like a beautiful dream. I wanted to tell you how much yesterday meant to me...",
            "2024-01-19T20:15:00Z",
            Details::Letter {
                to: "Sarah".to_owned(),
                attachments: vec![Attachment {
                    kind: AttachmentKind::Voice,
                    url: "/voice-note.mp3".to_owned(),
                    name: "Voice message".to_owned(),
                }],
            },
        ),
    ]
}

fn checkins() -> Vec<FeedItem> {
    vec![item(
        "1",
        "Sarah",
        "...hold my hand while we're walking and tell me about your day. Those little moments mean everything to me.",
        "2024-01-20",
        Details::Checkin {
            prompt_id: "1".to_owned(),
            prompt: "I feel most loved when you...".to_owned(),
        },
    )]
}

fn listening_sessions() -> Vec<FeedItem> {
    vec![item(
        "1",
        "Alex",
        "Talked about feeling stressed at work and appreciating Sarah's support. Wants to plan a weekend getaway together.",
        "2024-01-19",
        Details::Listening { duration_minutes: 15 },
    )]
}

fn locations() -> Vec<FeedItem> {
    vec![item(
        "1",
        "Sarah",
        "Walking in the park 🌳",
        "2024-01-20T14:30:00Z",
        Details::Location {
            latitude: 40.7829,
            longitude: -73.9654,
            address: "Central Park, NYC".to_owned(),
        },
    )]
}

fn memories() -> Vec<FeedItem> {
    vec![
        FeedItem {
            loved: true,
            ..item(
                "1",
                "Sarah",
                "Our first walk together ❤️",
                "2024-01-15",
                Details::Memory {
                    media: MediaKind::Photo,
                    url: "/placeholder-photo.jpg".to_owned(),
                    thumbnail: None,
                    location: Some("Central Park, NYC".to_owned()),
                },
            )
        },
        item(
            "2",
            "Alex",
            "Cooking dinner together",
            "2024-01-20",
            Details::Memory {
                media: MediaKind::Video,
                url: "/placeholder-video.mp4".to_owned(),
                thumbnail: Some("/placeholder-video-thumb.jpg".to_owned()),
                location: Some("Home".to_owned()),
            },
        ),
    ]
}
