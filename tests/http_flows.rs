use anyhow::Result;
use chatwork_sdk::{Client, Error};
use http::StatusCode;
use serde_json::json;
use tokio::task;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

const TOKEN: &str = "apiapi";

fn client_for(server: &MockServer) -> Result<Client> {
    // fresh client per test case; no shared fixture
    Ok(Client::builder(TOKEN).base_url(server.uri()).build()?)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invoke_get_returns_decoded_json_for_valid_url() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/url_valid"))
        .and(header("x-chatworktoken", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key1": "value1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let resp = task::spawn_blocking(move || client.invoke("GET", "url_valid", &[], &[], None))
        .await??;

    assert_eq!(resp.status, StatusCode::OK);
    let value: serde_json::Value = resp.json()?;
    assert_eq!(value, json!({"key1": "value1"}));

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invoke_get_propagates_api_error_for_invalid_url() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/url_invalid"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"status": "null"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let err = task::spawn_blocking(move || client.invoke("GET", "url_invalid", &[], &[], None))
        .await?
        .expect_err("expected HTTP error");

    match err {
        Error::Api(failure) => {
            assert_eq!(failure.status, StatusCode::NOT_FOUND);
            assert!(failure.body.contains("null"));
            assert!(failure.url.path().ends_with("/url_invalid"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_rooms_decodes_typed_rooms() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rooms"))
        .and(header("x-chatworktoken", TOKEN))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"room_id": 1, "name": "My Chat", "type": "my"},
            {"room_id": 2, "name": "Alice", "type": "direct", "unread_num": 3},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let rooms = task::spawn_blocking(move || client.rooms().list()).await??;

    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[1].room_id, 2);
    assert_eq!(rooms[1].unread_num, 3);

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn room_info_hits_room_scoped_endpoint() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rooms/123"))
        .and(header("x-chatworktoken", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "room_id": 123,
            "name": "Ops",
            "type": "group",
            "description": "ops room",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let info = task::spawn_blocking(move || client.rooms().info(123)).await??;

    assert_eq!(info.room.room_id, 123);
    assert_eq!(info.description.as_deref(), Some("ops room"));

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn messages_no_content_yields_empty_vec() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rooms/9/messages"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let messages = task::spawn_blocking(move || client.rooms().messages(9, false)).await??;

    assert!(messages.is_empty());

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn messages_force_sends_query_param() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rooms/9/messages"))
        .and(query_param("force", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "message_id": "5",
                "account": {"account_id": 42, "name": "Alice"},
                "body": "hello",
                "send_time": 1700000000,
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let messages = task::spawn_blocking(move || client.rooms().messages(9, true)).await??;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message_id, "5");
    assert_eq!(messages[0].account.account_id, 42);

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn post_message_sends_form_encoded_body() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rooms/9/messages"))
        .and(header("x-chatworktoken", TOKEN))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("self_unread=0"))
        .and(body_string_contains("body=hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message_id": "1234"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let posted =
        task::spawn_blocking(move || client.rooms().post_message(9, "hello", false)).await??;

    assert_eq!(posted.message_id, "1234");

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn post_message_self_unread_sends_one() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rooms/9/messages"))
        .and(body_string_contains("self_unread=1"))
        .and(body_string_contains("body=hi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message_id": "5678"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let posted =
        task::spawn_blocking(move || client.rooms().post_message(9, "hi", true)).await??;

    assert_eq!(posted.message_id, "5678");

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn api_error_carries_exact_status_and_body() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rooms/404"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let err = task::spawn_blocking(move || client.rooms().info(404))
        .await?
        .expect_err("expected HTTP error");

    assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
    match err {
        Error::Api(failure) => assert_eq!(&*failure.body, "slow down"),
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn get_without_query_has_no_question_mark() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    task::spawn_blocking(move || client.rooms().list()).await??;

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());

    server.verify().await;
    Ok(())
}
