use axum::http::StatusCode;
use indoc::formatdoc;
use integration_tests::{MockBackend, TemperatureMock, TestServer, capture_logs, captured_logs, unreachable_url};
use rmcp::model::ErrorCode;
use serde_json::json;

async fn server_for(backend: &MockBackend) -> TestServer {
    TestServer::start(&formatdoc! {r#"
        [backend]
        url = "{}"
        api_key = "test-key"
    "#, backend.url()})
    .await
}

#[tokio::test]
async fn forwards_backend_body_verbatim() {
    let backend = TemperatureMock::new().spawn().await;
    let server = server_for(&backend).await;

    let text = server
        .call_tool_text("get_temperature", json!({ "location": "Chapel Hill" }))
        .await;

    insta::assert_snapshot!(text, @r#"Temperature for Chapel Hill: {"location":"Chapel Hill","temperature":18.25}"#);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].params["location"], "Chapel Hill");
    assert_eq!(requests[0].params["units"], "metric");
    assert_eq!(requests[0].params["appid"], "test-key");
}

#[tokio::test]
async fn non_json_body_is_not_parsed() {
    let backend = TemperatureMock::new().with_body("about 64 degrees, give or take").spawn().await;
    let server = server_for(&backend).await;

    let text = server
        .call_tool_text("get_temperature", json!({ "location": "Durham" }))
        .await;

    insta::assert_snapshot!(text, @"Temperature for Durham: about 64 degrees, give or take");
}

#[tokio::test]
async fn result_is_a_single_text_item() {
    let backend = TemperatureMock::new().spawn().await;
    let server = server_for(&backend).await;

    let result = server
        .call_tool("get_temperature", json!({ "location": "Chapel Hill" }))
        .await;

    assert_eq!(result.content.len(), 1);
    assert_ne!(result.is_error, Some(true));

    let content = serde_json::to_value(&result.content[0]).unwrap();
    assert_eq!(content["type"], json!("text"));
}

#[tokio::test]
async fn unit_is_normalized_before_forwarding() {
    let backend = TemperatureMock::new().spawn().await;
    let server = server_for(&backend).await;

    let cases = [
        (json!({ "location": "Oslo" }), "metric"),
        (json!({ "location": "Oslo", "unit": "" }), "metric"),
        (json!({ "location": "Oslo", "unit": "CELSIUS" }), "metric"),
        (json!({ "location": "Oslo", "unit": "c" }), "metric"),
        (json!({ "location": "Oslo", "unit": "F" }), "imperial"),
        (json!({ "location": "Oslo", "unit": "Fahrenheit" }), "imperial"),
        (json!({ "location": "Oslo", "unit": "imperial" }), "imperial"),
        (json!({ "location": "Oslo", "unit": "kelvin" }), "metric"),
        (json!({ "location": "Oslo", "unit": 451 }), "metric"),
    ];

    for (arguments, _) in &cases {
        server.call_tool("get_temperature", arguments.clone()).await;
    }

    let units: Vec<String> = backend
        .requests()
        .into_iter()
        .map(|request| request.params["units"].clone())
        .collect();

    let expected: Vec<&str> = cases.iter().map(|(_, unit)| *unit).collect();
    assert_eq!(units, expected);
}

#[tokio::test]
async fn location_is_percent_encoded() {
    let backend = TemperatureMock::new().spawn().await;
    let server = server_for(&backend).await;

    server
        .call_tool("get_temperature", json!({ "location": "New York" }))
        .await;

    let requests = backend.requests();
    insta::assert_snapshot!(requests[0].raw_query, @"location=New+York&units=metric&appid=test-key");
    assert_eq!(requests[0].params["location"], "New York");
}

#[tokio::test]
async fn missing_api_key_sends_empty_appid() {
    let backend = TemperatureMock::new().spawn().await;

    let server = TestServer::start(&formatdoc! {r#"
        [backend]
        url = "{}"
        api_key_env = "MERCURY_TEST_KEY_THAT_IS_NEVER_SET"
    "#, backend.url()})
    .await;

    server
        .call_tool("get_temperature", json!({ "location": "Oslo", "unit": "f" }))
        .await;

    let requests = backend.requests();
    insta::assert_snapshot!(requests[0].raw_query, @"location=Oslo&units=imperial&appid=");
}

#[tokio::test]
async fn invalid_location_never_reaches_backend() {
    let backend = TemperatureMock::new().spawn().await;
    let server = server_for(&backend).await;

    for arguments in [
        json!({}),
        json!({ "location": "" }),
        json!({ "location": 42 }),
        json!({ "location": { "city": "Oslo" } }),
        json!({ "unit": "celsius" }),
    ] {
        let error = server.call_tool_expect_error("get_temperature", arguments).await;

        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(error.message, "location must be a non-empty string");
    }

    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn backend_error_status_fails_without_body() {
    let backend = TemperatureMock::new()
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .with_body("stack trace nobody should see")
        .spawn()
        .await;

    let server = server_for(&backend).await;

    let error = server
        .call_tool_expect_error("get_temperature", json!({ "location": "Oslo" }))
        .await;

    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    insta::assert_snapshot!(error.message, @"temperature service returned status: 500 Internal Server Error");
    assert!(error.data.is_none());
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn non_200_success_status_is_still_an_error() {
    let backend = TemperatureMock::new()
        .with_status(StatusCode::NO_CONTENT)
        .with_body("")
        .spawn()
        .await;

    let server = server_for(&backend).await;

    let error = server
        .call_tool_expect_error("get_temperature", json!({ "location": "Oslo" }))
        .await;

    insta::assert_snapshot!(error.message, @"temperature service returned status: 204 No Content");
}

#[tokio::test]
async fn unauthorized_backend_is_reported() {
    let backend = TemperatureMock::new()
        .with_status(StatusCode::UNAUTHORIZED)
        .with_body(r#"{"message":"invalid appid"}"#)
        .spawn()
        .await;

    let server = server_for(&backend).await;

    let error = server
        .call_tool_expect_error("get_temperature", json!({ "location": "Oslo" }))
        .await;

    insta::assert_snapshot!(error.message, @"temperature service returned status: 401 Unauthorized");
}

#[tokio::test]
async fn unreachable_backend_is_reported() {
    let url = unreachable_url().await;

    let server = TestServer::start(&formatdoc! {r#"
        [backend]
        url = "{url}"
    "#})
    .await;

    let error = server
        .call_tool_expect_error("get_temperature", json!({ "location": "Oslo" }))
        .await;

    assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    assert!(
        error.message.starts_with("failed to query temperature service: "),
        "{}",
        error.message
    );
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let backend = TemperatureMock::new().with_body("21").spawn().await;
    let server = server_for(&backend).await;

    let locations = ["Oslo", "Lima", "Perth", "Quito", "Nuuk"];

    let texts = futures_util::future::join_all(
        locations
            .iter()
            .map(|location| server.call_tool_text("get_temperature", json!({ "location": location }))),
    )
    .await;

    for (location, text) in locations.iter().zip(texts) {
        assert_eq!(text, format!("Temperature for {location}: 21"));
    }

    assert_eq!(backend.requests().len(), locations.len());
}

#[tokio::test]
async fn invocation_logs_never_contain_the_api_key() {
    capture_logs();

    let backend = TemperatureMock::new().spawn().await;

    let server = TestServer::start(&formatdoc! {r#"
        [backend]
        url = "{}"
        api_key = "logged-secret-key"
    "#, backend.url()})
    .await;

    server
        .call_tool("get_temperature", json!({ "location": "Loggington", "unit": "F" }))
        .await;

    let lines = captured_logs();

    assert!(
        lines
            .iter()
            .any(|line| line.contains("received arguments") && line.contains(r#""location":"Loggington""#)),
        "{lines:#?}"
    );

    let url = format!("{}?location=Loggington&units=imperial&appid=***", backend.url());
    assert!(
        lines.iter().any(|line| line == &format!("INFO Requesting URL: {url}")),
        "{lines:#?}"
    );

    assert!(
        lines.iter().any(|line| line == "INFO HTTP response status: 200 OK"),
        "{lines:#?}"
    );

    assert!(
        lines
            .iter()
            .any(|line| line == "DEBUG Using the API key from the configuration file"),
        "{lines:#?}"
    );

    assert!(lines.iter().all(|line| !line.contains("logged-secret-key")), "{lines:#?}");
    assert_eq!(backend.requests()[0].params["appid"], "logged-secret-key");
}
