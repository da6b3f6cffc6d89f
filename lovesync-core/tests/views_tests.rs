use chrono::{NaiveDate, TimeZone, Utc};
use lovesync_core::error::GeoError;
use lovesync_core::expand::{needs_toggle, preview, PREVIEW_LENGTH};
use lovesync_core::listening::duration_minutes;
use lovesync_core::models::MediaKind;
use lovesync_core::seed::{self, DAILY_PROMPTS};
use lovesync_core::views::{
    media_kind_for, prompt_for_day, AffirmationsFeed, DailyCheckins, LocationSharing, LoveLetters,
    MemoriesGallery, DEFAULT_LOCATION_STATUS,
};
use lovesync_core::{Composer, Details, ItemId, ListeningTimer, Position, ViewKind};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, 14, 18, 30, 0).unwrap()
}

#[test]
fn composer_only_submits_non_blank_drafts() {
    let mut composer: Composer = Composer::default();
    assert!(composer.submit().is_none());

    composer.start();
    *composer.draft_mut().unwrap() = "   ".into();
    assert!(!composer.can_submit());
    assert!(composer.submit().is_none());
    assert!(composer.is_composing());

    *composer.draft_mut().unwrap() = "  hi  ".into();
    assert_eq!(composer.submit(), Some(("  hi  ".to_string(), ())));
    assert!(!composer.is_composing());
}

#[test]
fn composer_cancel_discards_draft() {
    let mut composer: Composer = Composer::default();
    composer.start();
    composer.draft_mut().unwrap().push_str("draft");
    composer.cancel();
    assert_eq!(composer.draft(), None);
    composer.start();
    assert_eq!(composer.draft(), Some(""));
}

#[test]
fn whitespace_letter_is_not_sent() {
    let mut letters = LoveLetters::new(seed::items_for(ViewKind::Letters));
    let before = letters.items().len();

    letters.composer.start();
    *letters.composer.draft_mut().unwrap() = "   ".into();
    assert!(letters.submit("You", "Partner", now()).is_none());
    assert_eq!(letters.items().len(), before);
    assert!(letters.composer.is_composing());
}

#[test]
fn sent_letter_goes_first_and_closes_form() {
    let mut letters = LoveLetters::new(seed::items_for(ViewKind::Letters));
    letters.composer.start();
    *letters.composer.draft_mut().unwrap() = "Dear you".into();

    let sent = letters.submit("Alex", "Sarah", now()).unwrap();
    assert_eq!(letters.items().as_slice()[0], sent);
    assert_eq!(sent.author, "Alex");
    assert!(matches!(&sent.details, Details::Letter { to, attachments } if to == "Sarah" && attachments.is_empty()));
    assert!(!letters.composer.is_composing());
}

#[test]
fn opening_an_unread_letter_marks_it_read_once() {
    let mut letters = LoveLetters::new(seed::items_for(ViewKind::Letters));
    assert!(letters.open(&ItemId::new("1")).is_none());

    letters.composer.start();
    *letters.composer.draft_mut().unwrap() = "Thinking of you".into();
    let sent = letters.submit("Alex", "Sarah", now()).unwrap();
    assert!(!sent.read);

    let opened = letters.open(&sent.id).unwrap();
    assert!(opened.read);
    assert_eq!(letters.items().unread_count(), 0);
    assert!(letters.open(&sent.id).is_none());
}

#[test]
fn long_letter_expands_and_collapses() {
    let body: String = "x".repeat(200);
    let mut letters = LoveLetters::default();
    letters.composer.start();
    *letters.composer.draft_mut().unwrap() = body.clone();
    let letter = letters.submit("You", "Partner", now()).unwrap();

    let collapsed = letters.display(&letter).into_owned();
    assert_eq!(collapsed, format!("{}...", &body[..PREVIEW_LENGTH]));

    letters.toggle_expanded(&letter.id);
    assert!(letters.is_expanded(&letter.id));
    assert_eq!(letters.display(&letter).chars().count(), 200);

    letters.toggle_expanded(&letter.id);
    assert_eq!(letters.display(&letter).chars().count(), PREVIEW_LENGTH + 3);
}

#[test]
fn preview_counts_characters_not_bytes() {
    let short = "❤".repeat(PREVIEW_LENGTH);
    assert!(!needs_toggle(&short));
    assert_eq!(preview(&short), short.as_str());

    let long = "❤".repeat(PREVIEW_LENGTH + 1);
    assert!(needs_toggle(&long));
    assert_eq!(preview(&long), format!("{}...", "❤".repeat(PREVIEW_LENGTH)));
}

#[test]
fn affirmations_unread_scenario() {
    let mut feed = AffirmationsFeed::new(seed::items_for(ViewKind::Affirmations));
    assert_eq!(feed.items().len(), 3);
    assert_eq!(feed.unread_count(), 1);

    let changed = feed.mark_all_read();
    assert_eq!(changed.len(), 1);
    assert_eq!(feed.unread_count(), 0);

    feed.start_compose();
    *feed.composer.draft_mut().unwrap() = "You are wonderful".into();
    let created = feed.submit("You", now()).unwrap();
    assert_eq!(feed.unread_count(), 1);
    assert!(!created.read);

    assert!(feed.open(&created.id).is_some());
    assert_eq!(feed.unread_count(), 0);
    assert!(feed.open(&created.id).is_none());
}

#[test]
fn hearting_an_affirmation_returns_the_updated_item() {
    let mut feed = AffirmationsFeed::new(seed::items_for(ViewKind::Affirmations));
    let id = ItemId::new("3");
    let updated = feed.toggle_heart(&id).unwrap();
    assert!(updated.hearted);
    assert_eq!(updated.hearts_count, 1);
    assert!(feed.toggle_heart(&ItemId::new("nope")).is_none());
}

#[test]
fn memories_are_filtered_then_sorted() {
    let mut gallery = MemoriesGallery::new(seed::items_for(ViewKind::Memories));
    let order: Vec<String> = gallery.visible().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(order, vec!["2", "1"]);

    gallery.toggle_loved_only();
    let loved: Vec<String> = gallery.visible().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(loved, vec!["1"]);

    gallery.toggle_love(&ItemId::new("2"));
    gallery.toggle_love(&ItemId::new("1"));
    let loved: Vec<String> = gallery.visible().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(loved, vec!["2"]);
}

#[test]
fn lightbox_follows_flag_changes() {
    let mut gallery = MemoriesGallery::new(seed::items_for(ViewKind::Memories));
    gallery.select(&ItemId::new("2"));
    assert!(!gallery.selected().unwrap().loved);
    gallery.toggle_love(&ItemId::new("2"));
    assert!(gallery.selected().unwrap().loved);
    gallery.close();
    assert!(gallery.selected().is_none());

    gallery.select(&ItemId::new("missing"));
    assert!(gallery.selected().is_none());
}

#[test]
fn adding_a_memory_uses_path_caption_and_location() {
    let mut gallery = MemoriesGallery::default();
    gallery.composer.start_with(Default::default());
    {
        let (path, draft) = gallery.composer.fields_mut().unwrap();
        *path = "beach.MP4".into();
        draft.caption = " Sunset swim ".into();
        draft.location = "  ".into();
    }
    let memory = gallery.submit("You", now()).unwrap();
    assert_eq!(memory.content, "Sunset swim");
    assert_eq!(memory.created_at, "2024-02-14");
    match memory.details {
        Details::Memory { media, url, location, .. } => {
            assert_eq!(media, MediaKind::Video);
            assert_eq!(url, "beach.MP4");
            assert_eq!(location, None);
        }
        other => panic!("unexpected details {other:?}"),
    }
    assert_eq!(media_kind_for("/photos/us.jpg"), MediaKind::Photo);
}

#[test]
fn todays_prompt_rotates_with_day_of_month() {
    let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    assert_eq!(prompt_for_day(day(20)).id, DAILY_PROMPTS[0].id);
    assert_eq!(prompt_for_day(day(3)).id, DAILY_PROMPTS[3].id);
}

#[test]
fn checkin_response_is_stored_with_its_prompt_and_date() {
    let mut checkins = DailyCheckins::new(
        seed::items_for(ViewKind::Checkins),
        seed::items_for(ViewKind::ListeningSessions),
    );
    let prompt = prompt_for_day(now().date_naive());
    checkins.respond(prompt);
    *checkins.responder.draft_mut().unwrap() = "...you listen".into();

    let saved = checkins.submit_response("You", now()).unwrap();
    assert_eq!(saved.created_at, "2024-02-14");
    assert!(matches!(&saved.details, Details::Checkin { prompt_id, .. } if prompt_id == prompt.id));
    assert_eq!(checkins.checkins().len(), 2);
    assert!(!checkins.responder.is_composing());
}

#[test]
fn listening_timer_counts_only_while_listening() {
    let mut timer = ListeningTimer::default();
    timer.tick(5);
    assert_eq!(timer.elapsed_secs(), 0);

    timer.start();
    timer.tick(61);
    timer.tick(4);
    assert_eq!(timer.display(), "1:05");
    assert_eq!(timer.stop(), 65);
    timer.tick(10);
    assert_eq!(timer.elapsed_secs(), 65);

    timer.start();
    assert_eq!(timer.elapsed_secs(), 0);
    assert_eq!(duration_minutes(65), 2);
    assert_eq!(duration_minutes(0), 0);
}

#[test]
fn ending_a_session_records_a_summary() {
    let mut checkins = DailyCheckins::default();
    checkins.end_listening();
    assert!(!checkins.summary.is_composing());

    checkins.start_listening();
    checkins.tick(600);
    checkins.end_listening();
    assert!(!checkins.timer().is_listening());
    assert!(checkins.summary.is_composing());

    *checkins.summary.draft_mut().unwrap() = "Talked about the trip".into();
    let session = checkins.submit_summary("Partner", now()).unwrap();
    assert_eq!(session.details, Details::Listening { duration_minutes: 10 });
    assert_eq!(checkins.sessions().len(), 1);
}

#[test]
fn location_share_success_prepends_and_clears_status() {
    let mut location = LocationSharing::new(seed::items_for(ViewKind::Locations));
    let request = location.begin_share().unwrap();
    assert!(location.begin_share().is_none());

    let position = Position { latitude: 48.85, longitude: 2.35 };
    let shared = location.complete_share(request, Ok(position), "You", now()).unwrap();
    assert!(!location.is_sharing());
    assert_eq!(shared.content, DEFAULT_LOCATION_STATUS);
    assert_eq!(location.items().as_slice()[0], shared);

    location.status_draft = "At the café".into();
    let request = location.begin_share().unwrap();
    let shared = location
        .complete_share(request, Ok(position), "You", now() + chrono::Duration::seconds(1))
        .unwrap();
    assert_eq!(shared.content, "At the café");
    assert!(location.status_draft.is_empty());
}

#[test]
fn location_share_failure_reverts_silently() {
    let mut location = LocationSharing::new(seed::items_for(ViewKind::Locations));
    location.status_draft = "keep me".into();
    let request = location.begin_share().unwrap();

    assert!(location
        .complete_share(request, Err(GeoError::Unavailable), "You", now())
        .is_none());
    assert!(!location.is_sharing());
    assert_eq!(location.items().len(), 1);
    assert_eq!(location.status_draft, "keep me");
}

#[test]
fn result_of_an_earlier_view_does_not_complete_the_current_share() {
    let position = Position { latitude: 48.85, longitude: 2.35 };

    // first visit: lookup issued, then the page is left
    let stale = {
        let mut first_visit = LocationSharing::new(seed::items_for(ViewKind::Locations));
        first_visit.begin_share().unwrap()
    };

    // second visit: a fresh view starts its own lookup
    let mut location = LocationSharing::new(seed::items_for(ViewKind::Locations));
    let current = location.begin_share().unwrap();
    assert_ne!(stale, current);

    assert!(location
        .complete_share(stale, Ok(position), "You", now())
        .is_none());
    assert!(location
        .complete_share(stale, Err(GeoError::Unavailable), "You", now())
        .is_none());
    assert!(location.is_sharing());
    assert_eq!(location.items().len(), 1);

    let shared = location
        .complete_share(current, Ok(position), "You", now())
        .unwrap();
    assert_eq!(location.items().as_slice()[0], shared);
    assert!(!location.is_sharing());

    // a late duplicate for a finished request changes nothing
    assert!(location
        .complete_share(current, Ok(position), "You", now())
        .is_none());
    assert_eq!(location.items().len(), 2);
}
