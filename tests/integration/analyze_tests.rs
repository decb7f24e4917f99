//! Integration tests for the analyzer
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! analysis pipeline end-to-end.

use page_analyzer::analyzer::{LinkChecker, HTML5_WITH_DOCTYPE, UNKNOWN_NO_DOCTYPE};
use page_analyzer::{AnalysisError, Analyzer, Config};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

/// Same server, addressed by a host name that differs from the page's
fn as_localhost(uri: &str) -> String {
    uri.replace("127.0.0.1", "localhost")
}

fn analyzer() -> Analyzer {
    Analyzer::new(&Config::default()).expect("Failed to create analyzer")
}

#[tokio::test]
async fn test_full_analysis() {
    let page_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let other_url = as_localhost(&other_server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(format!(
            r##"<!DOCTYPE html>
            <html><head><title>  Home  </title></head><body>
            <h1>Welcome</h1><h2>One</h2><h2>Two</h2><h3>Three</h3>
            <a href="/ok">ok</a>
            <a href="/ok?ref=nav#top">ok again</a>
            <a href="/broken">broken</a>
            <a href="/no-head">no head</a>
            <a href="{}/external">external</a>
            <a href="mailto:team@example.com">mail</a>
            <a href="javascript:void(0)">js</a>
            <a href="#main">skip</a>
            <form action="/login"><input type="password" name="pw"></form>
            </body></html>"##,
            other_url
        )))
        .mount(&page_server)
        .await;

    Mock::given(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&page_server)
        .await;

    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&page_server)
        .await;

    // HEAD rejected, GET fine: still reachable
    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&page_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&page_server)
        .await;

    Mock::given(path("/external"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&other_server)
        .await;

    let result = analyzer()
        .analyze(&format!("{}/", page_server.uri()), &CancellationToken::new())
        .await
        .expect("Analysis failed");

    assert_eq!(result.html_version, HTML5_WITH_DOCTYPE);
    assert_eq!(result.title, "Home");
    assert_eq!(result.headings.get("h1"), Some(1));
    assert_eq!(result.headings.get("h2"), Some(2));
    assert_eq!(result.headings.get("h3"), Some(1));
    assert_eq!(result.headings.get("h4"), Some(0));
    assert_eq!(result.links.internal, 3);
    assert_eq!(result.links.external, 1);
    assert_eq!(result.links.total, 4);
    assert_eq!(result.inaccessible, 1);
    assert!(result.has_login_form);
}

#[tokio::test]
async fn test_page_without_links_or_doctype() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(html_response(
            "<html><body><p>No links here</p></body></html>".to_string(),
        ))
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(
            &format!("  {}/plain  ", mock_server.uri()),
            &CancellationToken::new(),
        )
        .await
        .expect("Analysis failed");

    assert_eq!(result.html_version, UNKNOWN_NO_DOCTYPE);
    assert_eq!(result.title, "");
    assert_eq!(result.headings.total(), 0);
    assert_eq!(result.links.total, 0);
    assert_eq!(result.inaccessible, 0);
    assert!(!result.has_login_form);
}

#[tokio::test]
async fn test_not_found_carries_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("  page not found \n"))
        .mount(&mock_server)
        .await;

    let err = analyzer()
        .analyze(
            &format!("{}/missing", mock_server.uri()),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.response_status(), 404);
    match err {
        AnalysisError::HttpStatus { message, .. } => assert_eq!(message, "page not found"),
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_body_truncated_to_one_kib() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("x".repeat(5000)))
        .mount(&mock_server)
        .await;

    let err = analyzer()
        .analyze(&mock_server.uri(), &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        AnalysisError::HttpStatus {
            status, message, ..
        } => {
            assert_eq!(status, 503);
            assert_eq!(message.len(), 1024);
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirect_target_is_link_base() {
    let mock_server = MockServer::start().await;
    let landing_url = format!("{}/landing", as_localhost(&mock_server.uri()));

    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", landing_url.as_str()))
        .mount(&mock_server)
        .await;

    // Relative links resolve against the post-redirect host ("localhost"),
    // so the absolute 127.0.0.1 link counts as external
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(html_response(format!(
            r#"<title>Landing</title><a href="/inside">in</a><a href="{}/outside">out</a>"#,
            mock_server.uri()
        )))
        .mount(&mock_server)
        .await;

    Mock::given(path("/inside"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(path("/outside"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(
            &format!("{}/start", mock_server.uri()),
            &CancellationToken::new(),
        )
        .await
        .expect("Analysis failed");

    assert_eq!(result.title, "Landing");
    assert_eq!(result.links.internal, 1);
    assert_eq!(result.links.external, 1);
    assert_eq!(result.inaccessible, 0);
}

#[tokio::test]
async fn test_redirect_cap_exceeded() {
    let mock_server = MockServer::start().await;

    for hop in 0..8 {
        let location = format!("/hop/{}", hop + 1);
        Mock::given(method("GET"))
            .and(path(format!("/hop/{}", hop)))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", location.as_str()))
            .mount(&mock_server)
            .await;
    }

    let err = analyzer()
        .analyze(
            &format!("{}/hop/0", mock_server.uri()),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Fetch { .. }));
    assert_eq!(err.status_code(), None);
    assert_eq!(err.response_status(), 502);
}

/// Mounts `/{prefix}/0` .. `/{prefix}/{hops}` where every step but the last
/// redirects to the next and the last serves a page
async fn mount_redirect_chain(server: &MockServer, prefix: &str, hops: usize) {
    for hop in 0..hops {
        let location = format!("/{}/{}", prefix, hop + 1);
        Mock::given(method("GET"))
            .and(path(format!("/{}/{}", prefix, hop)))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", location.as_str()))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(format!("/{}/{}", prefix, hops)))
        .respond_with(html_response(
            "<!DOCTYPE html><title>End of chain</title>".to_string(),
        ))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_four_redirects_followed_fifth_rejected() {
    let mock_server = MockServer::start().await;
    mount_redirect_chain(&mock_server, "four", 4).await;
    mount_redirect_chain(&mock_server, "five", 5).await;

    let analyzer = analyzer();
    let cancel = CancellationToken::new();

    let result = analyzer
        .analyze(&format!("{}/four/0", mock_server.uri()), &cancel)
        .await
        .expect("four redirects should be followed");
    assert_eq!(result.title, "End of chain");

    let err = analyzer
        .analyze(&format!("{}/five/0", mock_server.uri()), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Fetch { .. }));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_missing_scheme_defaults_to_https() {
    let mock_server = MockServer::start().await;
    let host_and_port = mock_server.uri().trim_start_matches("http://").to_string();

    // The mock server only speaks plain HTTP, so the TLS handshake fails
    let err = analyzer()
        .analyze(&host_and_port, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Fetch { ref url, .. } if url.starts_with("https://")));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_cancellation_stops_slow_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            html_response("<title>slow</title>".to_string()).set_delay(Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        canceller.cancel();
    });

    let started = Instant::now();
    let err = analyzer()
        .analyze(&mock_server.uri(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Fetch { .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_checker_counts_failing_server() {
    let ok_server = MockServer::start().await;
    let bad_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&ok_server)
        .await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&bad_server)
        .await;

    let links = vec![
        Url::parse(&ok_server.uri()).unwrap(),
        Url::parse(&bad_server.uri()).unwrap(),
    ];

    let checker = LinkChecker::new(reqwest::Client::new(), 5);
    let count = checker
        .count_inaccessible(&links, &CancellationToken::new())
        .await;

    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_checker_respects_concurrency_cap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&mock_server)
        .await;

    let links: Vec<Url> = (0..6)
        .map(|i| Url::parse(&format!("{}/slow/{}", mock_server.uri(), i)).unwrap())
        .collect();

    let checker = LinkChecker::new(reqwest::Client::new(), 2);
    let started = Instant::now();
    let count = checker
        .count_inaccessible(&links, &CancellationToken::new())
        .await;

    // Six 300ms probes, two at a time: at least three rounds
    assert_eq!(count, 0);
    assert!(started.elapsed() >= Duration::from_millis(900));
}

#[tokio::test]
async fn test_unreachable_links_counted() {
    let mock_server = MockServer::start().await;

    // Port 9 on loopback refuses connections
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<a href="http://127.0.0.1:9/gone">gone</a><a href="http://127.0.0.1:9/also-gone">gone</a>"#
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&mock_server.uri(), &CancellationToken::new())
        .await
        .expect("Analysis failed");

    assert_eq!(result.links.total, 2);
    assert_eq!(result.links.internal, 2);
    assert_eq!(result.inaccessible, 2);
    assert!(result.inaccessible <= result.links.total);
}
