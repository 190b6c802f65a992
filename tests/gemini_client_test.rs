use httpmock::prelude::*;
use profit_optimizer::core::ProductExtractor;
use profit_optimizer::domain::inventory::{Category, InventoryItem};
use profit_optimizer::{GeminiClient, GeminiConfig, OptimizerError};

const PRIMARY_PATH: &str = "/v1beta/models/gemini-1.5-flash-latest:generateContent";
const FALLBACK_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn client(server: &MockServer) -> GeminiClient {
    let mut config = GeminiConfig::new("test-key");
    config.endpoint = server.base_url();
    GeminiClient::new(config)
}

fn reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [{ "text": text }] } }
        ]
    })
}

#[tokio::test]
async fn test_extract_product_strips_code_fences() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(PRIMARY_PATH)
            .query_param("key", "test-key")
            .body_contains("nil panjabi 20 pcs 900tk");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(reply(
                "```json\n{\"name\": \"Blue Panjabi\", \"price\": 900, \"quantity\": 20, \"color\": \"Blue\", \"category\": \"clothing\"}\n```",
            ));
    });

    let draft = client(&server)
        .extract_product("  nil panjabi\n 20 pcs   900tk ")
        .await
        .unwrap()
        .unwrap();

    api_mock.assert();
    assert_eq!(draft.name.as_deref(), Some("Blue Panjabi"));
    assert_eq!(draft.quantity, Some(20.0));

    let item = InventoryItem::from_draft(&draft);
    assert_eq!(item.buying_price, 900.0);
    assert_eq!(item.category, Category::Clothing);
}

#[tokio::test]
async fn test_unknown_model_falls_back() {
    let server = MockServer::start();
    let primary = server.mock(|when, then| {
        when.method(POST).path(PRIMARY_PATH);
        then.status(404).body("model not found");
    });
    let fallback = server.mock(|when, then| {
        when.method(POST).path(FALLBACK_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(reply("{\"name\": \"Kettle\", \"price\": \"1,250 tk\"}"));
    });

    let draft = client(&server)
        .extract_product("kettle 1250 taka")
        .await
        .unwrap()
        .unwrap();

    primary.assert();
    fallback.assert();
    assert_eq!(draft.name.as_deref(), Some("Kettle"));
    assert_eq!(draft.price, Some(1250.0));
}

#[tokio::test]
async fn test_bad_request_is_reported() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(PRIMARY_PATH);
        then.status(400).body("API key not valid");
    });

    let err = client(&server)
        .extract_product("pen 10 tk")
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(err, OptimizerError::AiResponseError { status: 400, .. }));
    assert!(err.recovery_suggestion().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_forbidden_does_not_fall_back() {
    let server = MockServer::start();
    let primary = server.mock(|when, then| {
        when.method(POST).path(PRIMARY_PATH);
        then.status(403).body("permission denied");
    });
    let fallback = server.mock(|when, then| {
        when.method(POST).path(FALLBACK_PATH);
        then.status(200).json_body(reply("{}"));
    });

    let err = client(&server)
        .extract_product("pen 10 tk")
        .await
        .unwrap_err();

    primary.assert();
    assert_eq!(fallback.hits(), 0);
    assert!(matches!(err, OptimizerError::AiResponseError { status: 403, .. }));
}

#[tokio::test]
async fn test_unparseable_reply_is_none() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(PRIMARY_PATH);
        then.status(200)
            .json_body(reply("Sorry, I could not find a product in that message."));
    });

    let draft = client(&server).extract_product("hello").await.unwrap();
    assert!(draft.is_none());
}

#[tokio::test]
async fn test_empty_message_skips_request() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(reply("{}"));
    });

    let c = client(&server);
    assert!(c.extract_product(" \n\t ").await.unwrap().is_none());
    assert!(c.extract_products("").await.unwrap().is_empty());
    assert_eq!(api_mock.hits(), 0);
}

#[tokio::test]
async fn test_extract_products_slices_array() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path(PRIMARY_PATH);
        then.status(200).json_body(reply(
            "Here are the products:\n```json\n[{\"name\": \"Pen\", \"price\": 10, \"quantity\": 100},\n {\"name\": \"Notebook\", \"price\": 60, \"quantity\": 20, \"category\": \"Stationery\"}]\n```",
        ));
    });

    let drafts = client(&server)
        .extract_products("pen 100 ta 10tk, khata 20 ta 60tk")
        .await
        .unwrap();

    assert_eq!(drafts.len(), 2);
    let items: Vec<InventoryItem> = drafts.iter().map(InventoryItem::from_draft).collect();
    assert_eq!(items[1].category, Category::Stationery);
    assert_eq!(items[0].stock_value(), 1000.0);
}
