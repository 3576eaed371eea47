//! End-to-end credential rotation against a mock Abicart server

use abicart_client::NO_QUERY;
use abicart_integration_tests::client_for;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn authorization_of(request: &wiremock::Request) -> String {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("<missing>")
        .to_string()
}

#[tokio::test]
async fn test_first_request_carries_empty_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), true);
    client.get("items", NO_QUERY).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(authorization_of(&requests[0]), "");
}

#[tokio::test]
async fn test_post_rotation_used_by_next_get() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/items"))
        .respond_with(ResponseTemplate::new(201).insert_header("Authorization", "tok-2"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/items/1"))
        .and(header("authorization", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), true);

    let created = client.post("items", &json!({"name": "Tea"})).await.unwrap();
    assert!(created.is_success());
    assert_eq!(client.authorization(), "tok-2");

    let item = client.get("items/1", NO_QUERY).await.unwrap();
    assert_eq!(item.document(), Some(&json!({"id": 1})));
}

#[tokio::test]
async fn test_chain_of_rotations() {
    let server = MockServer::start().await;
    for (seen, issued) in [("", "tok-1"), ("tok-1", "tok-2"), ("tok-2", "tok-3")] {
        let mut mock = Mock::given(method("GET"));
        if !seen.is_empty() {
            mock = mock.and(header("authorization", seen));
        }
        mock.respond_with(
            ResponseTemplate::new(200)
                .insert_header("Authorization", issued)
                .set_body_json(json!({"seen": seen})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    }

    let client = client_for(&server.uri(), true);
    for _ in 0..3 {
        client.get("session", NO_QUERY).await.unwrap();
    }

    let sent: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(authorization_of)
        .collect();
    assert_eq!(sent, vec!["", "tok-1", "tok-2"]);
    assert_eq!(client.authorization(), "tok-3");
}

#[tokio::test]
async fn test_response_without_header_keeps_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), true);
    client.set_authorization("tok-keep");

    assert!(client.get("items/999", NO_QUERY).await.unwrap().is_absent());
    assert!(client.get("items/998", NO_QUERY).await.unwrap().is_absent());

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| authorization_of(r) == "tok-keep"));
    assert_eq!(client.authorization(), "tok-keep");
}

#[tokio::test]
async fn test_parse_failure_still_rotates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Authorization", "tok-after-html")
                .set_body_string("<html>maintenance</html>"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), true);
    let result = client.get("items", NO_QUERY).await;

    assert!(matches!(result, Err(abicart_client::ClientError::Parse(_))));
    assert_eq!(client.authorization(), "tok-after-html");
}
