/*!
 * End-to-end tests: publish, translate, evict and render
 */

use std::sync::Arc;
use std::time::Duration;

use statusfeed::feed::{Clock, FeedColor, FeedOptions, ManualClock, RevealState, TextSurface};
use statusfeed::providers::mock::MockBackend;
use statusfeed::translation::{TRANSLATION_FAILED, TranslatorOptions};
use statusfeed::{Config, Controller, FeedMessage};
use crate::common::FeedHarness;

#[tokio::test]
async fn test_publish_beyondCapacity_shouldKeepMostRecentThree() {
    let harness = FeedHarness::new(MockBackend::working());

    for i in 0..10 {
        harness.feed.publish(&format!("event {}", i), false).await;
        assert!(harness.feed.len() <= 3);
    }

    let firsts: Vec<String> = harness.feed.entries().iter()
        .map(|entry| entry.lines().next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(firsts, vec!["event 7", "event 8", "event 9"]);
}

#[tokio::test]
async fn test_publish_helloThenImportantWorld_shouldAppearInOrder() {
    let harness = FeedHarness::new(MockBackend::working());

    harness.feed.publish("Hello", false).await;
    harness.feed.publish("World", true).await;

    let entries = harness.feed.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text(), "Hello\n[译: [TRANSLATED] Hello]");
    assert_eq!(entries[1].text(), "World\n[译: [TRANSLATED] World]");
    assert!(!entries[0].is_important());
    assert!(entries[1].is_important());

    // "World" starts revealing only once "Hello" is complete
    let mut surface = TextSurface::new();
    for now in [0, 10_000, 20_000] {
        harness.clock.set(now);
        surface.reset();
        harness.renderer.render(&harness.feed, &mut surface);
    }

    let calls = surface.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0].color, FeedColor::Default);
    assert_eq!(calls[2].color, FeedColor::Important);
    assert_eq!(calls[2].content, "World");
}

#[tokio::test]
async fn test_publish_withFailingBackend_shouldShowSentinel() {
    let harness = FeedHarness::new(MockBackend::failing_translation());

    harness.feed.publish("X", false).await;

    let entries = harness.feed.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text(), format!("X\n[译: {}]", TRANSLATION_FAILED));
}

#[tokio::test]
async fn test_publish_withTotalOutage_shouldKeepFeedOperable() {
    let harness = FeedHarness::new(MockBackend::failing_token());

    for i in 0..5 {
        harness.feed.publish(&format!("msg {}", i), i % 2 == 0).await;
    }

    assert_eq!(harness.feed.len(), 3);
    let mut surface = TextSurface::new();
    let stats = harness.renderer.render(&harness.feed, &mut surface);
    assert_eq!(stats.drawn_entries, 1);
}

#[tokio::test]
async fn test_publish_sameTextConcurrently_shouldShareTranslationButKeepEntries() {
    let harness = FeedHarness::new(MockBackend::slow(20));

    tokio::join!(
        harness.feed.publish("Beacon", false),
        harness.feed.publish("Beacon", true),
    );

    let entries = harness.feed.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text(), entries[1].text());
    assert_ne!(entries[0].is_important(), entries[1].is_important());
    assert_eq!(harness.backend.translate_calls(), 1);
}

#[tokio::test]
async fn test_publish_concurrently_shouldInsertInResolutionOrder() {
    let harness = FeedHarness::new(MockBackend::slow(30));

    // Warm the cache so "fast" resolves without suspending
    harness.feed.translator().translate("fast").await;
    harness.feed.clear();

    tokio::join!(
        harness.feed.publish("slow", false),
        harness.feed.publish("fast", false),
    );

    let entries = harness.feed.entries();
    assert!(entries[0].text().starts_with("fast\n"));
    assert!(entries[1].text().starts_with("slow\n"));
}

#[tokio::test]
async fn test_clear_midAnimation_shouldResetFeed() {
    let harness = FeedHarness::new(MockBackend::working());
    harness.feed.publish("first", false).await;

    let mut surface = TextSurface::new();
    harness.renderer.render(&harness.feed, &mut surface);
    harness.clock.advance(40);
    harness.renderer.render(&harness.feed, &mut surface);

    harness.feed.clear();
    surface.reset();
    let stats = harness.renderer.render(&harness.feed, &mut surface);
    assert_eq!(stats.drawn_entries, 0);
    assert!(surface.calls().is_empty());

    harness.feed.publish("second", false).await;
    let entries = harness.feed.entries();
    assert_eq!(entries[0].state(harness.clock.now_millis()), RevealState::Pending);
    assert!(entries[0].timer().triggered_at().is_none());
}

#[tokio::test]
async fn test_clear_duringPendingTranslation_shouldStillAppendLateEntry() {
    let harness = FeedHarness::new(MockBackend::slow(30));
    harness.feed.push_entry(statusfeed::FeedEntry::new("old", false, 0.08));

    tokio::join!(
        harness.feed.publish("late", false),
        async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            harness.feed.clear();
        },
    );

    let entries = harness.feed.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text(), "late\n[译: [TRANSLATED] late]");
    assert_eq!(harness.backend.translate_calls(), 1);
}

#[tokio::test]
async fn test_clear_shouldNotDropTranslationCache() {
    let harness = FeedHarness::new(MockBackend::working());
    harness.feed.publish("cached", false).await;
    harness.feed.clear();
    harness.feed.publish("cached", false).await;

    assert_eq!(harness.backend.translate_calls(), 1);
}

#[tokio::test]
async fn test_render_shouldDiscloseEntriesOneAfterAnother() {
    let harness = FeedHarness::new(MockBackend::working());
    harness.feed.publish("one", false).await;
    harness.feed.publish("two", false).await;
    harness.feed.publish("three", false).await;

    let mut surface = TextSurface::new();
    let mut drawn = Vec::new();
    for _ in 0..20 {
        surface.reset();
        drawn.push(harness.renderer.render(&harness.feed, &mut surface).drawn_entries);
        harness.clock.advance(100);
    }

    assert!(drawn.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(drawn.first(), Some(&1));
    assert_eq!(drawn.last(), Some(&3));
}

#[tokio::test]
async fn test_customOptions_shouldChangeLabelAndCapacity() {
    let feed_options = FeedOptions {
        capacity: 2,
        translated_label: "translated".to_string(),
        ..Default::default()
    };
    let translator_options = TranslatorOptions {
        failure_text: "translation failed".to_string(),
        ..Default::default()
    };
    let harness = FeedHarness::with_options(MockBackend::failing_token(), translator_options, feed_options);

    for message in ["a", "b", "c"] {
        harness.feed.publish(message, false).await;
    }

    let entries = harness.feed.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].text(), "c\n[translated: translation failed]");
}

#[tokio::test]
async fn test_controller_publishAll_shouldRenderEveryMessage() {
    let clock = Arc::new(ManualClock::new(0));
    let controller = Controller::with_backend(Config::default(), Arc::new(MockBackend::working()), clock.clone()).unwrap();

    controller
        .publish_all(&[FeedMessage::new("alpha", false), FeedMessage::new("beta", true)])
        .await;

    let mut surface = TextSurface::new();
    for _ in 0..3 {
        controller.render_frame(&mut surface);
        clock.advance(5_000);
    }
    let stats = controller.render_frame(&mut surface);

    assert!(stats.all_complete);
    assert!(surface.to_text().contains("alpha"));
    assert!(surface.to_text().contains("!beta"));
}
