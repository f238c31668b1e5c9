use axum::http::StatusCode;
use common::environment::TestEnvironment;
use serde_json::json;
use toolkit::config::ToolkitConfig;
use toolkit::JsonResponse;

mod common;

#[tokio::test]
async fn strict_json_round_trip() {
    let test_env = TestEnvironment::build(None);

    let resp = test_env
        .server
        .post("/json")
        .json(&json!({ "message": "hello", "data": { "n": 1 } }))
        .await;
    resp.assert_status(StatusCode::ACCEPTED);

    let body = resp.json::<JsonResponse>();
    assert!(!body.error);
    assert_eq!(body.message, "received");
    assert_eq!(body.data.unwrap(), json!({ "message": "hello", "data": { "n": 1 } }));
}

#[tokio::test]
async fn strict_json_errors_use_the_envelope() {
    let test_env = TestEnvironment::build(None);

    let cases = [
        (r#"{"message": 99}"#, "incorrect JSON type for field \"message\""),
        (r#"{"message":}"#, "badly formed JSON: at character 12"),
        (r#"{"message": "a"#, "badly formed JSON at some point within"),
        (r#"{"message": "a", "alpha": 1}"#, "unknown key \"alpha\""),
        (r#"{"mesage": "a"}"#, "unknown key \"mesage\""),
        ("{}", "error unmarshalling JSON request body"),
        (r#"{"message": "a"}{"message": "b"}"#, "must only contain one JSON value"),
        ("", "request body cannot be empty"),
    ];

    for (input, expected) in cases {
        let resp = test_env.server.post("/json").text(input).await;
        resp.assert_status(StatusCode::BAD_REQUEST);

        let body = resp.json::<JsonResponse>();
        assert!(body.error, "input: {input}");
        assert!(
            body.message.contains(expected),
            "input: {input}, message: {}",
            body.message
        );
        assert!(body.data.is_none());
    }
}

#[tokio::test]
async fn unknown_fields_can_be_allowed() {
    let test_env = TestEnvironment::build(Some(ToolkitConfig {
        allow_unknown_json_fields: true,
        ..Default::default()
    }));

    let resp = test_env
        .server
        .post("/json")
        .json(&json!({ "message": "a", "alpha": 1 }))
        .await;
    resp.assert_status(StatusCode::ACCEPTED);
}

#[tokio::test]
async fn oversized_json_is_rejected() {
    let test_env = TestEnvironment::build(Some(ToolkitConfig {
        max_json_bytes: 16,
        ..Default::default()
    }));

    let resp = test_env
        .server
        .post("/json")
        .json(&json!({ "message": "this is far more than sixteen bytes" }))
        .await;
    resp.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        resp.json::<JsonResponse>().message,
        "maximum allowed request body size is 16 bytes"
    );
}

#[tokio::test]
async fn error_json_envelope() {
    let tools = toolkit::Toolkit::default();

    let resp = tools.error_json("something broke", None).unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&bytes).unwrap(),
        json!({ "error": true, "message": "something broke" })
    );

    let resp = tools
        .error_json("teapot", Some(StatusCode::IM_A_TEAPOT))
        .unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn slug_route() {
    let test_env = TestEnvironment::build(None);

    let resp = test_env
        .server
        .post("/slug")
        .json(&json!({ "text": "Hello Γειά σου Κόσμε World" }))
        .await;
    resp.assert_status_ok();
    assert_eq!(
        resp.json::<JsonResponse<String>>().data.unwrap(),
        "hello-world"
    );

    let resp = test_env
        .server
        .post("/slug")
        .json(&json!({ "text": "Γειά σου Κόσμε" }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.json::<JsonResponse>().message,
        "after replacing characters, slug length is zero"
    );
}

#[tokio::test]
async fn random_route() {
    let test_env = TestEnvironment::build(None);

    let resp = test_env.server.get("/random/10").await;
    resp.assert_status_ok();
    assert_eq!(
        resp.json::<JsonResponse<String>>().data.unwrap().len(),
        10
    );

    let resp = test_env.server.get("/random/100000").await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let resp = test_env.server.get("/random/ten").await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert!(resp.json::<JsonResponse>().error);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let test_env = TestEnvironment::build(None);

    let resp = test_env.server.get("/nowhere").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert!(resp.json::<JsonResponse>().error);
}
