// src/tests/router_tests/api_tests.rs
use crate::errors::ServerError;
use crate::router::{handle, serve};
use crate::tests::utils::{body_string, get, header, post_json, sample_visits, FakeJobber, TestApp};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[test]
fn visits_require_a_session() {
    let app = TestApp::new();
    let resp = serve(get("/api/visits?startDate=a&endDate=b", None), &app.state);
    assert_eq!(resp.status(), 401);
    assert!(app.calls().is_empty());
}

#[test]
fn visits_require_both_dates() {
    let app = TestApp::new();
    let token = app.sign_in();

    let resp = serve(get("/api/visits?startDate=2025-06-08", Some(&token)), &app.state);
    assert_eq!(resp.status(), 400);
    assert_eq!(body_string(resp), r#"{"error":"startDate and endDate are required"}"#);
}

#[test]
fn visits_relay_upstream_json() {
    let app = TestApp::new();
    let token = app.sign_in();

    let resp = handle(
        get("/api/visits?startDate=2025-06-08&endDate=2025-06-13", Some(&token)),
        &app.state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(body, sample_visits());
    assert_eq!(app.calls(), vec!["visits access-abc 2025-06-08 2025-06-13"]);
}

#[test]
fn upstream_failure_is_generic_500() {
    let app = TestApp::with_jobber(FakeJobber::new(None, None));
    let token = app.sign_in();

    let resp = serve(
        get("/api/visits?startDate=2025-06-08&endDate=2025-06-13", Some(&token)),
        &app.state,
    );
    assert_eq!(resp.status(), 500);
    assert_eq!(body_string(resp), r#"{"error":"Failed to fetch visits"}"#);
}

#[test]
fn quicklist_renders_plaintext() {
    let app = TestApp::new();
    let req = post_json(
        "/api/quicklist",
        &json!({
            "data": sample_visits(),
            "settings": { "showTime": true },
            "rangeStart": "2025-06-08",
            "rangeEnd": "2025-06-13",
            "format": "plaintext",
        }),
    );

    let resp = handle(req, &app.state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(header(&resp, "Content-Type"), "text/plain; charset=utf-8");
    assert_eq!(
        body_string(resp),
        concat!(
            "Sun 6/8 - Fri 6/13, 2 Jobs\n\n",
            "------------------------------\n\n",
            "=Smith -SW- 4 Oak Ave - W2 - Unknown\n\n",
            "Jones -NE- 12 Elm St - W1 9:00-11:30 - Ana\n\n",
        )
    );
}

#[test]
fn quicklist_applies_filters_in_markdown() {
    let app = TestApp::new();
    let req = post_json(
        "/api/quicklist",
        &json!({
            "data": sample_visits(),
            "settings": { "annual": "excludeUnconfirmed", "showValue": true, "showSalesperson": false },
            "rangeStart": "2025-06-08T00:00:00-07:00",
            "rangeEnd": "2025-06-13T23:59:59-07:00",
            "format": "markdown",
        }),
    );

    let body = body_string(handle(req, &app.state).unwrap());
    assert_eq!(
        body,
        concat!(
            "# **Sun 6/8 &ndash; Fri 6/13** **`1 Jobs`** **`$250`**\n\n",
            "[**Jones**](https://secure.getjobber.com/work_orders/2?appointment_id=2) -NE- ",
            "[12 Elm St](https://www.google.com/maps/place/12+Elm+St+Spokane,WA) - W1 `$250`\n\n",
        )
    );
}

#[test]
fn quicklist_treats_missing_data_as_empty() {
    let app = TestApp::new();
    let range = json!({ "rangeStart": "2025-06-08", "rangeEnd": "2025-06-13", "format": "plaintext" });
    let mut with_null = range.clone();
    with_null["data"] = Value::Null;

    for payload in [with_null, range] {
        let resp = handle(post_json("/api/quicklist", &payload), &app.state).unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(
            body_string(resp),
            "Sun 6/8 - Fri 6/13, 0 Jobs\n\n------------------------------\n\n"
        );
    }
}

#[test]
fn quicklist_rejects_unknown_settings_values() {
    let app = TestApp::new();
    let req = post_json(
        "/api/quicklist",
        &json!({ "data": sample_visits(), "settings": { "sortBy": "random" } }),
    );
    assert!(matches!(handle(req, &app.state), Err(ServerError::BadRequest(_))));
}

#[test]
fn quicklist_rejects_bad_range() {
    let app = TestApp::new();
    let req = post_json(
        "/api/quicklist",
        &json!({ "data": sample_visits(), "rangeStart": "next week" }),
    );
    let resp = serve(req, &app.state);
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("rangeStart"));
}

#[test]
fn salespeople_are_listed_from_all_visits() {
    let app = TestApp::new();
    let resp = handle(post_json("/api/salespeople", &sample_visits()), &app.state).unwrap();
    assert_eq!(body_string(resp), r#"["Ana"]"#);
}

#[test]
fn salespeople_of_null_or_empty_envelope_is_empty() {
    let app = TestApp::new();
    for payload in [Value::Null, json!({}), json!({ "data": { "visits": null } })] {
        let resp = handle(post_json("/api/salespeople", &payload), &app.state).unwrap();
        assert_eq!(body_string(resp), "[]");
    }
}

#[test]
fn salespeople_reject_malformed_json() {
    let app = TestApp::new();
    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri("/api/salespeople")
        .body(astra::Body::from("{not json"))
        .unwrap();
    let resp = serve(req, &app.state);
    assert_eq!(resp.status(), 400);
}
