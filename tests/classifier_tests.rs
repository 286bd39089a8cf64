use mockito::{Matcher, Server};
use mood_journal::ai::{advise, ClassificationClient, Classifier};
use mood_journal::ops::AnalysisPipeline;
use mood_journal::{AppError, Sentiment};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const API_KEY: &str = "hf_test_key";

fn client_for(server: &Server, api_key: Option<&str>) -> ClassificationClient {
    ClassificationClient::new(
        format!("{}/classify", server.url()),
        api_key.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_no_credential_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/classify")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, None);
    assert!(!client.has_credential());
    assert_eq!(client.classify("harika bir gün").await, Sentiment::Neutral);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_credential_counts_as_missing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/classify")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, Some("   "));
    assert!(!client.has_credential());
    assert_eq!(client.classify("metin").await, Sentiment::Neutral);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_carries_bearer_and_inputs() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/classify")
        .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
        .match_body(Matcher::Json(json!({ "inputs": "harika bir gün geçirdim" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"label":"positive","score":0.95}]"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server, Some(API_KEY));
    let sentiment = client.try_classify("harika bir gün geçirdim").await.unwrap();

    assert_eq!(sentiment, Sentiment::Positive);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_positive_entry_gets_positive_advisory() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/classify")
        .with_status(200)
        .with_body(r#"[{"label":"positive","score":0.95}]"#)
        .create_async()
        .await;

    let pipeline = AnalysisPipeline::new(Arc::new(client_for(&server, Some(API_KEY))));
    let result = pipeline.analyze("harika bir gün geçirdim").await;

    let expected = advise(Sentiment::Positive);
    assert_eq!(result.sentiment, Sentiment::Positive);
    assert_eq!(result.summary, expected.summary);
    assert_eq!(result.advice, expected.advice);
}

#[tokio::test]
async fn test_low_confidence_negative_is_neutral() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/classify")
        .with_status(200)
        .with_body(r#"[{"label":"negative","score":0.4}]"#)
        .create_async()
        .await;

    let client = client_for(&server, Some(API_KEY));
    assert_eq!(client.classify("bilmiyorum").await, Sentiment::Neutral);
}

#[tokio::test]
async fn test_confident_or_unscored_negative_is_negative() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/classify")
        .match_body(Matcher::Json(json!({ "inputs": "scored" })))
        .with_status(200)
        .with_body(r#"[{"label":"Negative","score":0.8}]"#)
        .create_async()
        .await;
    server
        .mock("POST", "/classify")
        .match_body(Matcher::Json(json!({ "inputs": "unscored" })))
        .with_status(200)
        .with_body(r#"[{"label":"LABEL_0"}]"#)
        .create_async()
        .await;

    let client = client_for(&server, Some(API_KEY));
    assert_eq!(client.classify("scored").await, Sentiment::Negative);
    assert_eq!(client.classify("unscored").await, Sentiment::Negative);
}

#[tokio::test]
async fn test_nested_response_uses_first_record() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/classify")
        .with_status(200)
        .with_body(
            r#"[[{"label":"neutral","score":0.2},{"label":"positive","score":0.7}]]"#,
        )
        .create_async()
        .await;

    let client = client_for(&server, Some(API_KEY));
    assert_eq!(client.classify("metin").await, Sentiment::Neutral);
}

#[tokio::test]
async fn test_unexpected_shape_is_neutral() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/classify")
        .with_status(200)
        .with_body(r#"{"error":"model loading"}"#)
        .create_async()
        .await;

    let client = client_for(&server, Some(API_KEY));
    assert_eq!(
        client.try_classify("metin").await.unwrap(),
        Sentiment::Neutral
    );
}

#[tokio::test]
async fn test_server_error_is_reported_and_degrades() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/classify")
        .with_status(500)
        .with_body("internal error")
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server, Some(API_KEY));
    let err = client.try_classify("metin").await.unwrap_err();
    assert!(matches!(err, AppError::AI(_)));
    assert!(err.to_string().contains("500"));

    assert_eq!(client.classify("metin").await, Sentiment::Neutral);
}

#[tokio::test]
async fn test_non_json_body_degrades() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/classify")
        .with_status(200)
        .with_body("<html>busy</html>")
        .create_async()
        .await;

    let client = client_for(&server, Some(API_KEY));
    assert!(client.try_classify("metin").await.is_err());
    assert_eq!(client.classify("metin").await, Sentiment::Neutral);
}

#[tokio::test]
async fn test_unreachable_endpoint_analyzes_as_neutral() {
    let client = ClassificationClient::new(
        "http://127.0.0.1:1/classify",
        Some(API_KEY.to_string()),
        Duration::from_secs(2),
    )
    .unwrap();

    let pipeline = AnalysisPipeline::new(Arc::new(client));
    let result = pipeline.analyze("metin").await;

    let expected = advise(Sentiment::Neutral);
    assert_eq!(result.sentiment, Sentiment::Neutral);
    assert_eq!(result.summary, expected.summary);
    assert_eq!(result.advice, expected.advice);
}
