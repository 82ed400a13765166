//! Integration tests: feed selection, ordering, annotation and search
//!
//! Runs against a real PostgreSQL instance via testcontainers.
//! Run manually: cargo test --test feed_assembly_test -- --ignored

mod common;

use common::{create_user, post_story, settle, setup_test_db};
use story_service::services::{FeedService, ToggleKind, ToggleService};

#[tokio::test]
#[ignore]
async fn test_home_feed_excludes_viewer_stories() {
    let pool = setup_test_db().await.unwrap();
    let feeds = FeedService::new(pool.clone());

    let viewer = create_user(&pool, "viewer").await;
    let other = create_user(&pool, "other").await;

    post_story(&pool, viewer, "Mine", "my own story", None).await;
    settle().await;
    let s1 = post_story(&pool, other, "Theirs One", "first", None).await;
    settle().await;
    let s2 = post_story(&pool, other, "Theirs Two", "second", None).await;

    let home = feeds.home_feed(Some(viewer)).await.unwrap();
    assert!(home.iter().all(|s| s.author_id != viewer));
    // Newest first
    assert_eq!(
        home.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![s2, s1]
    );

    // An anonymous viewer has nothing to exclude
    let anon = feeds.home_feed(None).await.unwrap();
    assert_eq!(anon.len(), 3);
    assert!(anon.iter().all(|s| !s.liked && !s.bookmarked && !s.own));
}

#[tokio::test]
#[ignore]
async fn test_following_feed_selects_followed_authors() {
    let pool = setup_test_db().await.unwrap();
    let feeds = FeedService::new(pool.clone());
    let toggles = ToggleService::new(pool.clone());

    let viewer = create_user(&pool, "viewer").await;
    let followed = create_user(&pool, "followed").await;
    let ignored = create_user(&pool, "ignored").await;

    toggles
        .toggle(ToggleKind::Follow, viewer, followed)
        .await
        .unwrap();

    let s1 = post_story(&pool, followed, "First", "one", None).await;
    settle().await;
    post_story(&pool, ignored, "Noise", "nope", None).await;
    settle().await;
    let s2 = post_story(&pool, followed, "Second", "two", None).await;

    let feed = feeds.following_feed(viewer).await.unwrap();
    assert_eq!(feed.iter().map(|s| s.id).collect::<Vec<_>>(), vec![s2, s1]);
    assert!(feed.iter().all(|s| s.author_id == followed));

    // Unfollow empties the feed
    toggles
        .toggle(ToggleKind::Follow, viewer, followed)
        .await
        .unwrap();
    assert!(feeds.following_feed(viewer).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_scenario_three_users() {
    let pool = setup_test_db().await.unwrap();
    let feeds = FeedService::new(pool.clone());
    let toggles = ToggleService::new(pool.clone());

    let a = create_user(&pool, "alice").await;
    let b = create_user(&pool, "bruno").await;
    let c = create_user(&pool, "chiyo").await;

    toggles.toggle(ToggleKind::Follow, b, a).await.unwrap();

    let s1 = post_story(&pool, a, "Alps Trip", "three passes in two days", None).await;
    settle().await;
    let s2 = post_story(&pool, c, "Tokyo Eats", "ramen crawl", None).await;

    let following = feeds.following_feed(b).await.unwrap();
    assert_eq!(following.iter().map(|s| s.id).collect::<Vec<_>>(), vec![s1]);

    // B authored nothing, so the home feed carries both, newest first
    let home = feeds.home_feed(Some(b)).await.unwrap();
    assert_eq!(home.iter().map(|s| s.id).collect::<Vec<_>>(), vec![s2, s1]);

    let results = feeds.search(Some(b), "alps").await.unwrap();
    assert_eq!(
        results.stories.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![s1]
    );
    assert!(results.users.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_search_matches_users_and_stories() {
    let pool = setup_test_db().await.unwrap();
    let feeds = FeedService::new(pool.clone());

    let zed = create_user(&pool, "zalpine").await;
    let ann = create_user(&pool, "alpinist").await;
    post_story(&pool, zed, "Winter", "snowed in at the alpage", None).await;
    settle().await;
    post_story(&pool, ann, "Coast", "no mountains here", Some("Lisbon")).await;

    let results = feeds.search(None, "alp").await.unwrap();

    // Users sorted by username ascending
    assert_eq!(
        results
            .users
            .iter()
            .map(|u| u.username.as_str())
            .collect::<Vec<_>>(),
        vec!["alpinist", "zalpine"]
    );
    // Story matched on body, case-insensitively
    assert_eq!(results.stories.len(), 1);
    assert_eq!(results.stories[0].title, "Winter");

    // Location matches count too
    let results = feeds.search(None, "lisbon").await.unwrap();
    assert_eq!(results.stories.len(), 1);
    assert_eq!(results.stories[0].title, "Coast");
}

#[tokio::test]
#[ignore]
async fn test_search_empty_query_returns_nothing() {
    let pool = setup_test_db().await.unwrap();
    let feeds = FeedService::new(pool.clone());

    let u = create_user(&pool, "quiet").await;
    post_story(&pool, u, "Alps Trip", "three passes", None).await;

    for query in ["", "   ", "\t"] {
        let results = feeds.search(None, query).await.unwrap();
        assert!(results.users.is_empty());
        assert!(results.stories.is_empty());
    }

    // LIKE wildcards in the query are matched literally, not expanded
    let results = feeds.search(None, "%").await.unwrap();
    assert!(results.stories.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_bookmarked_and_liked_feeds() {
    let pool = setup_test_db().await.unwrap();
    let feeds = FeedService::new(pool.clone());
    let toggles = ToggleService::new(pool.clone());

    let author = create_user(&pool, "author").await;
    let viewer = create_user(&pool, "collector").await;

    let s1 = post_story(&pool, author, "One", "first", None).await;
    settle().await;
    let s2 = post_story(&pool, author, "Two", "second", None).await;
    settle().await;
    let s3 = post_story(&pool, author, "Three", "third", None).await;

    toggles.toggle(ToggleKind::Bookmark, viewer, s1).await.unwrap();
    toggles.toggle(ToggleKind::Bookmark, viewer, s3).await.unwrap();
    toggles.toggle(ToggleKind::Like, viewer, s2).await.unwrap();

    let bookmarked = feeds.bookmarked_feed(viewer).await.unwrap();
    assert_eq!(
        bookmarked.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![s3, s1]
    );
    assert!(bookmarked.iter().all(|s| s.bookmarked));

    let liked = feeds.liked_feed(viewer).await.unwrap();
    assert_eq!(liked.iter().map(|s| s.id).collect::<Vec<_>>(), vec![s2]);
    assert!(liked[0].liked);
    assert_eq!(liked[0].like_count, 1);
}

#[tokio::test]
#[ignore]
async fn test_profile_counts_and_follow_flag() {
    let pool = setup_test_db().await.unwrap();
    let feeds = FeedService::new(pool.clone());
    let toggles = ToggleService::new(pool.clone());

    let target = create_user(&pool, "target").await;
    let fan = create_user(&pool, "fan").await;
    let passerby = create_user(&pool, "passerby").await;

    toggles.toggle(ToggleKind::Follow, fan, target).await.unwrap();
    toggles.toggle(ToggleKind::Follow, target, passerby).await.unwrap();

    let s1 = post_story(&pool, target, "Alps Trip", "three passes", None).await;

    let profile = feeds.profile(target, Some(fan)).await.unwrap();
    assert_eq!(profile.user.username, "target");
    assert_eq!(profile.follower_count, 1);
    assert_eq!(profile.following_count, 1);
    assert!(profile.viewer_follows);
    assert_eq!(profile.stories.iter().map(|s| s.id).collect::<Vec<_>>(), vec![s1]);

    // The owner's own profile never reports viewer_follows
    let own = feeds.profile(target, Some(target)).await.unwrap();
    assert!(!own.viewer_follows);
    assert!(own.stories[0].own);

    // Anonymous viewers get counts but no flag
    let anon = feeds.profile(target, None).await.unwrap();
    assert!(!anon.viewer_follows);
    assert!(!anon.stories[0].own);
}

#[tokio::test]
#[ignore]
async fn test_feed_annotation_reflects_toggles() {
    let pool = setup_test_db().await.unwrap();
    let feeds = FeedService::new(pool.clone());
    let toggles = ToggleService::new(pool.clone());

    let author = create_user(&pool, "author").await;
    let viewer = create_user(&pool, "viewer").await;
    let story = post_story(&pool, author, "Alps Trip", "three passes", None).await;

    toggles.toggle(ToggleKind::Like, viewer, story).await.unwrap();

    // A feed assembled after the toggle in the same flow observes it
    let home = feeds.home_feed(Some(viewer)).await.unwrap();
    assert_eq!(home.len(), 1);
    assert!(home[0].liked);
    assert!(!home[0].bookmarked);
    assert!(!home[0].own);
    assert_eq!(home[0].like_count, 1);

    toggles.toggle(ToggleKind::Like, viewer, story).await.unwrap();

    let home = feeds.home_feed(Some(viewer)).await.unwrap();
    assert!(!home[0].liked);
    assert_eq!(home[0].like_count, 0);
}
