use lovesync_core::{MockRepository, MountedView, Page, Router, Session};

fn session() -> Session {
    Session::new("Alex", "Sarah").unwrap()
}

#[test]
fn page_keys_round_trip_and_unknown_falls_back_home() {
    for page in Page::ALL {
        assert_eq!(page.key().parse::<Page>().unwrap(), page);
    }
    assert!("inbox".parse::<Page>().is_err());
    assert_eq!(Page::from_key("inbox"), Page::Home);
    assert_eq!(Page::from_key("checkins"), Page::Checkins);
}

#[test]
fn session_requires_both_names() {
    assert!(Session::new("  ", "Sarah").is_none());
    assert!(Session::new("Alex", "").is_none());
    assert_eq!(session().user_name, "Alex");
}

#[tokio::test]
async fn navigate_mounts_a_fresh_view() {
    let repo = MockRepository::seeded();
    let mut router = Router::new(session());
    assert_eq!(router.current(), Page::Home);

    router.navigate(Page::Affirmations, &repo).await;
    match router.view() {
        MountedView::Affirmations(feed) => assert_eq!(feed.items().len(), 3),
        other => panic!("expected affirmations, got {:?}", other.page()),
    }

    router.navigate(Page::Checkins, &repo).await;
    match router.view() {
        MountedView::Checkins(checkins) => {
            assert_eq!(checkins.checkins().len(), 1);
            assert_eq!(checkins.sessions().len(), 1);
        }
        other => panic!("expected check-ins, got {:?}", other.page()),
    }
}

#[tokio::test]
async fn leaving_a_page_resets_its_compose_state() {
    let repo = MockRepository::seeded();
    let mut router = Router::new(session());
    router.navigate(Page::Letters, &repo).await;

    if let MountedView::Letters(letters) = router.view_mut() {
        letters.composer.start();
        letters.composer.draft_mut().unwrap().push_str("unsent");
    }

    // same page: state kept
    router.navigate(Page::Letters, &repo).await;
    assert!(matches!(router.view(), MountedView::Letters(l) if l.composer.is_composing()));

    router.navigate(Page::Home, &repo).await;
    router.navigate(Page::Letters, &repo).await;
    assert!(matches!(router.view(), MountedView::Letters(l) if !l.composer.is_composing()));
}
