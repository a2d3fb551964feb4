use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use wiremock::matchers::{any, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use firi_api_client::auth::{
    AuthQuery, FixedClock, HEADER_ACCESS_KEY, HEADER_CLIENT_ID, HEADER_SIGNATURE, Payload,
    StaticCredentials, sign,
};
use firi_api_client::error::FiriError;
use firi_api_client::rest::{Endpoint, FiriRestClient};
use firi_api_client::types::Direction;

const TIMESTAMP: i64 = 1_700_000_000;
// hex(HMAC-SHA256("test_secret", {"timestamp":"1700000000","validity":"2000"}))
const SIGNATURE: &str = "a7fb74f2f4f335c8c94de7275b46b0ff00bca5f73b3ecaba13ed1de1b7836d62";

fn build_client(server: &MockServer) -> FiriRestClient {
    let credentials =
        Arc::new(StaticCredentials::new("test_key", "test_secret", "test_client").unwrap());
    FiriRestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .clock(Arc::new(FixedClock(TIMESTAMP)))
        .build()
        .unwrap()
}

async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

#[tokio::test]
async fn test_get_server_time_is_unauthenticated() {
    let server = MockServer::start().await;

    let response = serde_json::json!({"time": 1_700_000_123});
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let time = client.get_server_time().await.unwrap();
    assert_eq!(time["time"], 1_700_000_123);

    let request = single_request(&server).await;
    assert!(!request.headers.contains_key(HEADER_ACCESS_KEY));
    assert!(!request.headers.contains_key(HEADER_SIGNATURE));
    assert!(!request.headers.contains_key(HEADER_CLIENT_ID));
    assert_eq!(request.url.query(), None);
}

#[tokio::test]
async fn test_get_transactions_is_signed() {
    let server = MockServer::start().await;

    let response = serde_json::json!([
        {"id": "1", "amount": "0.5", "currency": "BTC", "type": "Match"}
    ]);
    Mock::given(method("GET"))
        .and(path("/v2/history/transactions"))
        .and(query_param("direction", "end"))
        .and(query_param("count", "10"))
        .and(query_param("timestamp", "1700000000"))
        .and(query_param("validity", "2000"))
        .and(header(HEADER_ACCESS_KEY, "test_key"))
        .and(header(HEADER_CLIENT_ID, "test_client"))
        .and(header(HEADER_SIGNATURE, SIGNATURE))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let transactions = client.get_transactions(Direction::End, 10).await.unwrap();
    assert_eq!(transactions[0]["currency"], "BTC");
}

#[tokio::test]
async fn test_query_params_resign_to_header_signature() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    // Real wall clock: the check must not depend on a known timestamp.
    let credentials =
        Arc::new(StaticCredentials::new("test_key", "test_secret", "test_client").unwrap());
    let client = FiriRestClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .validity(60)
        .build()
        .unwrap();
    client.get_orders(3, None).await.unwrap();

    let request = single_request(&server).await;
    let find = |key: &str| {
        request
            .url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .unwrap()
    };
    let query = AuthQuery {
        timestamp: find("timestamp"),
        validity: find("validity"),
    };
    assert_eq!(query.validity, "60");

    let resigned = sign("test_secret", &query.into_payload()).unwrap();
    let sent = request.headers.get(HEADER_SIGNATURE).unwrap();
    assert_eq!(resigned, sent.to_str().unwrap());
}

#[tokio::test]
async fn test_get_orders_query_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/history/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.get_orders(10, Some("buy")).await.unwrap();
    client.get_orders(10, None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].url.query(),
        Some("type=buy&count=10&timestamp=1700000000&validity=2000")
    );
    assert_eq!(
        requests[1].url.query(),
        Some("count=10&timestamp=1700000000&validity=2000")
    );
}

#[tokio::test]
async fn test_get_transactions_by_year_and_month() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/history/transactions/3/2023"))
        .and(query_param("direction", "start"))
        .and(header(HEADER_SIGNATURE, SIGNATURE))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let response = serde_json::json!([{"id": "7"}]);
    Mock::given(method("GET"))
        .and(path("/v2/history/transactions/2021"))
        .and(query_param("direction", "end"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let month = client
        .get_transactions_by_year_month(3, 2023, Direction::Start)
        .await
        .unwrap();
    assert!(month.as_array().unwrap().is_empty());

    let year = client
        .get_transactions_by_year(2021, Direction::End)
        .await
        .unwrap();
    assert_eq!(year[0]["id"], "7");
}

#[tokio::test]
async fn test_invalid_dates_send_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    for (month, year) in [(0, 2022), (13, 2022), (5, 2017)] {
        let err = client
            .get_transactions_by_year_month(month, year, Direction::End)
            .await
            .unwrap_err();
        assert!(matches!(err, FiriError::InvalidArgument(_)));
    }

    let err = client
        .get_transactions_by_year(2016, Direction::End)
        .await
        .unwrap_err();
    assert!(matches!(err, FiriError::InvalidArgument(_)));

    let err = client
        .request(Method::PUT, &Endpoint::new("time"), false, None)
        .await
        .unwrap_err();
    assert!(matches!(err, FiriError::UnsupportedMethod(_)));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;

    let response = r#"{"name":"ApiKeyNotFound"}"#;
    Mock::given(method("GET"))
        .and(path("/v2/history/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_string(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_orders(10, None).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    match err {
        FiriError::Http { body, url, .. } => {
            assert!(body.contains("ApiKeyNotFound"));
            let query = "count=10&timestamp=1700000000&validity=2000";
            assert!(url.ends_with(&format!("/v2/history/orders?{query}")));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_response() {
    let server = MockServer::start().await;

    let response = "<html>maintenance</html>";
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_server_time().await.unwrap_err();
    match err {
        FiriError::MalformedResponse { message, .. } => assert!(message.contains("maintenance")),
        other => panic!("expected MalformedResponse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_failure() {
    let client = FiriRestClient::builder()
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let err = client.get_server_time().await.unwrap_err();
    assert!(matches!(err, FiriError::Transport { .. }));
    assert_eq!(err.to_error_body()["error"], "API request failed");
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"time": 1}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = FiriRestClient::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.get_server_time().await.unwrap_err();
    assert!(matches!(err, FiriError::Timeout { .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_post_body_is_signed_payload() {
    let server = MockServer::start().await;
    let expected_body = r#"{"market":"BTCNOK","timestamp":"1700000000","validity":"2000"}"#;
    let response = serde_json::json!({"id": 42});

    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(body_string(expected_body))
        .and(header("content-type", "application/json"))
        .and(header(
            HEADER_SIGNATURE,
            "3e6da7b34145b6e70862b24944cc79e46d1b97fb31726cc6d6458a37ce86213c",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let extra = Payload::from([("market".to_string(), "BTCNOK".into())]);
    let created = client
        .request(Method::POST, &Endpoint::new("v2/orders"), true, Some(&extra))
        .await
        .unwrap();
    assert_eq!(created["id"], 42);
}

#[tokio::test]
async fn test_get_extra_data_is_sent_in_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let extra = Payload::from([("market".to_string(), "BTCNOK".into())]);
    client
        .request(Method::GET, &Endpoint::new("v2/orders"), true, Some(&extra))
        .await
        .unwrap();

    let request = single_request(&server).await;
    assert_eq!(
        request.url.query(),
        Some("market=BTCNOK&timestamp=1700000000&validity=2000")
    );

    // Every signed field must be recoverable from the query string alone.
    let payload: Payload = request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned().into()))
        .collect();
    let resigned = sign("test_secret", &payload).unwrap();
    let sent = request.headers.get(HEADER_SIGNATURE).unwrap();
    assert_eq!(resigned, sent.to_str().unwrap());
    assert_eq!(
        resigned,
        "3e6da7b34145b6e70862b24944cc79e46d1b97fb31726cc6d6458a37ce86213c"
    );
}

#[tokio::test]
async fn test_unsendable_get_extra_data_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let endpoint = Endpoint::new("v2/orders");
    for extra in [
        Payload::from([("count".to_string(), 10.into())]),
        Payload::from([("timestamp".to_string(), "1".into())]),
    ] {
        let err = client
            .request(Method::GET, &endpoint, true, Some(&extra))
            .await
            .unwrap_err();
        assert!(matches!(err, FiriError::InvalidArgument(_)));
    }
}
