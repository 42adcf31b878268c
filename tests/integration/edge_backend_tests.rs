/*!
 * HTTP backend tests against a local mock server
 */

use std::sync::Arc;
use mockito::{Matcher, Mock, Server, ServerGuard};

use statusfeed::errors::ProviderError;
use statusfeed::providers::TranslationBackend;
use statusfeed::providers::edge::EdgeTranslator;
use statusfeed::translation::{TRANSLATION_FAILED, Translator};

const TOKEN: &str = "stub-token";

fn client(server: &ServerGuard) -> EdgeTranslator {
    EdgeTranslator::new(
        format!("{}/auth", server.url()),
        format!("{}/translate", server.url()),
        "en",
        "zh-Hans",
        5,
    )
}

async fn mock_token(server: &mut ServerGuard, hits: usize) -> Mock {
    server.mock("GET", "/auth")
        .with_status(200)
        .with_body(TOKEN)
        .expect(hits)
        .create_async()
        .await
}

async fn mock_translation(server: &mut ServerGuard, hits: usize) -> Mock {
    server.mock("POST", Matcher::Regex(r"^/translate".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api-version".into(), "3.0".into()),
            Matcher::UrlEncoded("from".into(), "en".into()),
            Matcher::UrlEncoded("to".into(), "zh-Hans".into()),
        ]))
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .match_header("content-type", Matcher::Regex("^application/json".to_string()))
        .match_body(Matcher::Exact(r#"[{"text":"Hello"}]"#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(r#"[{"translations":[{"text":"你好","to":"zh-Hans"}]}]"#)
        .expect(hits)
        .create_async()
        .await
}

#[tokio::test]
async fn test_edge_withHealthyServer_shouldSendTokenAndJsonBody() {
    let mut server = Server::new_async().await;
    let token_mock = mock_token(&mut server, 1).await;
    let translate_mock = mock_translation(&mut server, 1).await;
    let backend = client(&server);

    let token = backend.fetch_token().await.unwrap();
    assert_eq!(token, TOKEN);

    let translated = backend.translate(&token, "Hello").await.unwrap();
    assert_eq!(translated, "你好");

    token_mock.assert_async().await;
    translate_mock.assert_async().await;
}

#[tokio::test]
async fn test_edge_withTokenEndpointDown_shouldReturnTokenFailure() {
    let mut server = Server::new_async().await;
    let _token_mock = server.mock("GET", "/auth").with_status(500).create_async().await;

    let error = client(&server).fetch_token().await.unwrap_err();
    assert!(matches!(error, ProviderError::AuthenticationError(_)));
    assert!(error.is_token_failure());
}

#[tokio::test]
async fn test_edge_withTranslateEndpointDown_shouldReturnApiError() {
    let mut server = Server::new_async().await;
    let _translate_mock = server.mock("POST", Matcher::Regex(r"^/translate".to_string()))
        .with_status(500)
        .with_body(r#"{"error":"boom"}"#)
        .create_async()
        .await;

    let result = client(&server).translate(TOKEN, "Hello").await;
    assert!(matches!(result, Err(ProviderError::ApiError { status_code: 500, ref message }) if message.contains("boom")));
}

#[tokio::test]
async fn test_edge_withMalformedBody_shouldReturnParseError() {
    let mut server = Server::new_async().await;
    let _translate_mock = server.mock("POST", Matcher::Regex(r"^/translate".to_string()))
        .with_status(200)
        .with_body(r#"{"unexpected":true}"#)
        .create_async()
        .await;

    let result = client(&server).translate(TOKEN, "Hello").await;
    assert!(matches!(result, Err(ProviderError::ParseError(_))));
}

#[tokio::test]
async fn test_edge_withUnreachableTokenEndpoint_shouldReturnTokenFailure() {
    let backend = EdgeTranslator::new("http://127.0.0.1:9/auth", "http://127.0.0.1:9/translate", "en", "zh-Hans", 2);

    let error = backend.fetch_token().await.unwrap_err();
    assert!(matches!(error, ProviderError::AuthenticationError(ref message) if message.contains("token endpoint")));
    assert!(error.is_token_failure());
}

#[tokio::test]
async fn test_edge_withUnreachableTranslateEndpoint_shouldReturnConnectionError() {
    let backend = EdgeTranslator::new("http://127.0.0.1:9/auth", "http://127.0.0.1:9/translate", "en", "zh-Hans", 2);

    let error = backend.translate(TOKEN, "Hello").await.unwrap_err();
    assert!(matches!(error, ProviderError::ConnectionError(_)));
    assert!(!error.is_token_failure());
}

#[tokio::test]
async fn test_translator_overEdge_shouldHitNetworkOncePerText() {
    let mut server = Server::new_async().await;
    let token_mock = mock_token(&mut server, 1).await;
    let translate_mock = mock_translation(&mut server, 1).await;
    let translator = Translator::with_backend(Arc::new(client(&server)));

    assert_eq!(translator.translate("Hello").await, "你好");
    assert_eq!(translator.translate("Hello").await, "你好");

    token_mock.assert_async().await;
    translate_mock.assert_async().await;
}

#[tokio::test]
async fn test_translator_overFailingEdge_shouldReturnSentinel() {
    let mut server = Server::new_async().await;
    let token_mock = server.mock("GET", "/auth").with_status(500).expect(1).create_async().await;
    // no translate request after a failed token fetch
    let translate_mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;
    let translator = Translator::with_backend(Arc::new(client(&server)));

    assert_eq!(translator.translate("Hello").await, TRANSLATION_FAILED);

    token_mock.assert_async().await;
    translate_mock.assert_async().await;
}
