use pollster_client::ReqwestClient;
use pollster_runner::{Control, FetchError, PollOptions, PollState, Poller};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::timeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POLL_DELAY: Duration = Duration::from_millis(50);
const WAIT_LIMIT: Duration = Duration::from_secs(10);

#[tokio::test]
async fn test_polls_until_resource_is_finished() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/build"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "pending" })))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/build"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "finished" })))
        .mount(&server)
        .await;

    let poller = Poller::spawn(
        format!("{}/build", server.uri()),
        |build: Value| {
            if build["status"] == "finished" {
                Control::Stop
            } else {
                Control::Continue
            }
        },
        PollOptions::new().delay(POLL_DELAY),
        Arc::new(ReqwestClient::new()),
    )
    .unwrap();

    let summary = timeout(WAIT_LIMIT, poller.wait())
        .await
        .expect("poller should stop");

    assert_eq!(summary.state, PollState::Stopped);
    assert_eq!(summary.attempts, 3);
    assert!(!summary.last_failed);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_server_error_reaches_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);

    let poller = Poller::spawn(
        format!("{}/ping", server.uri()),
        |_| Control::Continue,
        PollOptions::new()
            .delay(POLL_DELAY)
            .on_error(move |err| sink.lock().unwrap().push(err.clone())),
        Arc::new(ReqwestClient::new()),
    )
    .unwrap();

    let summary = timeout(WAIT_LIMIT, poller.wait())
        .await
        .expect("poller should stop");

    assert_eq!(summary.attempts, 1);
    assert!(summary.last_failed);
    assert_eq!(*errors.lock().unwrap(), vec![FetchError::status(500, "boom")]);
}
