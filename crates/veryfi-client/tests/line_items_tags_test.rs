//! Contract tests for document line items and tags.

use serde_json::json;
use veryfi_client::line_items::LineItemError;
use veryfi_client::{
    AddLineItem, LineItemFields, UpdateLineItem, VeryfiClient, VeryfiConfig, VeryfiError,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> VeryfiClient {
    VeryfiClient::new(VeryfiConfig::local_mock(&mock_server.uri()).unwrap()).unwrap()
}

// ── Line items ───────────────────────────────────────────────────────

#[tokio::test]
async fn add_line_item_posts_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v8/partner/documents/10/line-items/"))
        .and(body_json(json!({
            "order": 2,
            "description": "Espresso",
            "total": 3.5,
            "quantity": 1.0,
            "sku": "ESP-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":555}"#))
        .expect(1)
        .mount(&server)
        .await;

    let item = AddLineItem::new(2, "Espresso", 3.5).with_fields(LineItemFields {
        quantity: Some(1.0),
        sku: Some("ESP-1".into()),
        ..Default::default()
    });
    let body = test_client(&server).line_items().add(10, &item).await.unwrap();
    assert_eq!(body, r#"{"id":555}"#);
}

#[tokio::test]
async fn invalid_line_item_is_rejected_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .line_items()
        .add(10, &AddLineItem::new(1, "", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        VeryfiError::LineItem(LineItemError::BlankDescription)
    ));
}

#[tokio::test]
async fn update_line_item_puts_changed_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v8/partner/documents/10/line-items/555/"))
        .and(body_json(json!({"description": "Double espresso", "price": 4.0})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":555}"#))
        .expect(1)
        .mount(&server)
        .await;

    let changes = UpdateLineItem {
        description: Some("Double espresso".into()),
        fields: LineItemFields {
            price: Some(4.0),
            ..Default::default()
        },
        ..Default::default()
    };
    test_client(&server)
        .line_items()
        .update(10, 555, &changes)
        .await
        .unwrap();
}

#[tokio::test]
async fn empty_line_item_update_is_rejected() {
    let server = MockServer::start().await;
    let err = test_client(&server)
        .line_items()
        .update(10, 555, &UpdateLineItem::new())
        .await
        .unwrap_err();
    assert!(matches!(err, VeryfiError::LineItem(LineItemError::Empty)));
}

#[tokio::test]
async fn list_get_and_delete_line_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v8/partner/documents/10/line-items/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"line_items":[]}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v8/partner/documents/10/line-items/555/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":555}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v8/partner/documents/10/line-items/555/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v8/partner/documents/10/line-items/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let line_items = test_client(&server).line_items();
    assert!(line_items.list(10).await.unwrap().contains("line_items"));
    assert_eq!(line_items.get(10, 555).await.unwrap(), r#"{"id":555}"#);
    line_items.delete(10, 555).await.unwrap();
    line_items.delete_all(10).await.unwrap();
}

// ── Tags ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_single_tag_puts_name() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v8/partner/documents/10/tags/"))
        .and(body_json(json!({"name": "travel"})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1,"name":"travel"}"#))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server).tags().add(10, " travel ").await.unwrap();
}

#[tokio::test]
async fn add_many_and_replace_tags() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v8/partner/documents/10/tags/"))
        .and(body_json(json!({"tags": ["a", "b"]})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v8/partner/documents/10/"))
        .and(body_json(json!({"tags": ["c"]})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let tags = test_client(&server).tags();
    tags.add_many(10, &["a".into(), "b".into()]).await.unwrap();
    tags.replace(10, &["c".into()]).await.unwrap();
}

#[tokio::test]
async fn list_and_delete_tags() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v8/partner/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"tags":[]}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v8/partner/documents/10/tags/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let tags = test_client(&server).tags();
    assert!(tags.list_all().await.unwrap().contains("tags"));
    tags.delete(10, 3).await.unwrap();
}

#[tokio::test]
async fn blank_tag_is_rejected() {
    let server = MockServer::start().await;
    let err = test_client(&server).tags().add(10, "  ").await.unwrap_err();
    assert!(matches!(err, VeryfiError::InvalidRequest(_)));
}
