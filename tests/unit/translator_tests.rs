/*!
 * Tests for translation memoization
 */

use std::sync::Arc;
use futures::future::join_all;

use statusfeed::providers::mock::MockBackend;
use statusfeed::translation::{TRANSLATION_FAILED, Translator, TranslatorOptions};

fn translator(backend: &MockBackend) -> Translator {
    Translator::with_backend(Arc::new(backend.clone()))
}

#[tokio::test]
async fn test_translate_withManyConcurrentCallers_shouldIssueOneRoundTrip() {
    let backend = MockBackend::slow(30);
    let translator = translator(&backend);

    let results = join_all((0..8).map(|_| translator.translate("Signal detected"))).await;

    assert!(results.iter().all(|result| result == "[TRANSLATED] Signal detected"));
    assert_eq!(backend.token_calls(), 1);
    assert_eq!(backend.translate_calls(), 1);

    let stats = translator.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 7);
    assert_eq!(stats.pending, 0);
}

#[tokio::test]
async fn test_translate_withDistinctTexts_shouldTranslateEach() {
    let backend = MockBackend::working();
    let translator = translator(&backend);

    translator.translate("a").await;
    translator.translate("b").await;
    translator.translate("a").await;

    assert_eq!(backend.translate_calls(), 2);
    assert_eq!(translator.cache_stats().entries, 2);
}

#[tokio::test]
async fn test_translate_acrossSpawnedTasks_shouldShareCache() {
    let backend = MockBackend::slow(20);
    let translator = Arc::new(translator(&backend));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let translator = translator.clone();
            tokio::spawn(async move { translator.translate("shared").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), "[TRANSLATED] shared");
    }
    assert_eq!(backend.translate_calls(), 1);
}

#[tokio::test]
async fn test_translate_withTranslationFailure_shouldReturnSentinelWithoutPanicking() {
    let backend = MockBackend::failing_translation();
    let translator = translator(&backend);

    assert_eq!(translator.translate("X").await, TRANSLATION_FAILED);
    assert_eq!(backend.token_calls(), 1);
    assert_eq!(backend.translate_calls(), 1);
}

#[tokio::test]
async fn test_translate_withConcurrentFailure_shouldShareSentinelAndAllowRetry() {
    let failing = MockBackend::failing_token().with_delay(10);
    let translator = Translator::with_backend(Arc::new(failing.clone()));

    let (a, b) = tokio::join!(translator.translate("X"), translator.translate("X"));
    assert_eq!(a, TRANSLATION_FAILED);
    assert_eq!(b, TRANSLATION_FAILED);
    assert_eq!(failing.token_calls(), 1);

    translator.translate("X").await;
    assert_eq!(failing.token_calls(), 2);
}

#[tokio::test]
async fn test_translate_withCachedFailures_shouldKeepSentinel() {
    let backend = MockBackend::failing_token();
    let options = TranslatorOptions { cache_failures: true, ..Default::default() };
    let translator = Translator::new(Arc::new(backend.clone()), options);

    translator.translate("X").await;
    translator.translate("X").await;

    assert_eq!(backend.token_calls(), 1);
    assert_eq!(translator.cached("X").as_deref(), Some(TRANSLATION_FAILED));
}

#[tokio::test]
async fn test_cached_beforeAnyRequest_shouldBeNone() {
    let backend = MockBackend::working();
    let translator = translator(&backend);
    assert!(translator.cached("never asked").is_none());
}

#[test]
fn test_translate_fromSynchronousCaller_shouldCompleteOnBlockOn() {
    let backend = MockBackend::working();
    let translator = translator(&backend);

    let result = tokio_test::block_on(async { translator.translate("Docked").await });

    assert_eq!(result, MockBackend::expected_translation("Docked"));
    assert_eq!(translator.cached("Docked"), Some(result));
}
