use std::time::Duration;

use harvester_engine::{FailureKind, FetchResult, Fetcher, HarvestSettings, ReqwestFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_with(settings: HarvestSettings) -> ReqwestFetcher {
    ReqwestFetcher::new(&settings).expect("client builds")
}

#[tokio::test]
async fn fetch_returns_decoded_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Fireball"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>火球术</html>".as_bytes(), "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = fetcher_with(HarvestSettings::default());
    let result = fetcher.fetch(&format!("{}/Fireball", server.uri())).await;

    assert_eq!(result, FetchResult::success("<html>火球术</html>"));
}

#[tokio::test]
async fn non_success_status_is_an_empty_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let fetcher = fetcher_with(HarvestSettings::default());
    let url = format!("{}/missing", server.uri());

    assert_eq!(fetcher.fetch(&url).await, FetchResult::failed());
    let err = fetcher.try_fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = HarvestSettings {
        request_timeout: Duration::from_millis(50),
        ..HarvestSettings::default()
    };
    let fetcher = fetcher_with(settings);
    let url = format!("{}/slow", server.uri());

    let err = fetcher.try_fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert!(!fetcher.fetch(&url).await.ok);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = HarvestSettings {
        max_body_bytes: 10,
        ..HarvestSettings::default()
    };
    let fetcher = fetcher_with(settings);

    let err = fetcher
        .try_fetch(&format!("{}/large", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn malformed_url_is_a_failure_not_a_panic() {
    let fetcher = fetcher_with(HarvestSettings::default());
    let err = fetcher.try_fetch("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
    assert_eq!(fetcher.fetch("not a url").await, FetchResult::failed());
}

#[tokio::test]
async fn connection_refused_is_a_network_failure() {
    // Nothing listens on the discard port.
    let fetcher = fetcher_with(HarvestSettings {
        connect_timeout: Duration::from_millis(500),
        ..HarvestSettings::default()
    });
    let err = fetcher.try_fetch("http://127.0.0.1:9/").await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}
