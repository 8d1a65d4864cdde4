// src/tests/router_tests/page_tests.rs
use crate::errors::ServerError;
use crate::router::{handle, serve};
use crate::tests::utils::{body_string, get, FakeJobber, TestApp};

#[test]
fn home_without_session_offers_sign_in() {
    let app = TestApp::new();

    let resp = handle(get("/", None), &app.state).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Sign in with Jobber"));
    assert!(body.contains(r#"href="/auth/jobber""#));
    assert!(app.calls().is_empty());
}

#[test]
fn home_with_session_lists_visits() {
    let app = TestApp::new();
    let token = app.sign_in();

    let uri = "/?submitted=1&start=2025-06-08&end=2025-06-13&format=plaintext&showSalesperson=on";
    let resp = handle(get(uri, Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<pre"));
    assert!(body.contains("=Smith -SW- 4 Oak Ave - W2 - Unknown"));
    assert!(body.contains("Jones -NE- 12 Elm St - W1 - Ana"));
    // range header is off once the form is submitted without it
    assert!(!body.contains("2 Jobs"));
    assert!(body.contains(r#"name="selectedSalespeople" value="Ana""#));
    assert_eq!(
        app.calls(),
        vec!["visits access-abc 2025-06-08T00:00:00-07:00 2025-06-13T23:59:59-07:00"]
    );
}

#[test]
fn home_defaults_to_the_coming_work_week() {
    let app = TestApp::new();
    let token = app.sign_in();

    let body = body_string(handle(get("/", Some(&token)), &app.state).unwrap());
    assert!(body.contains("2 Jobs"));
    assert!(body.contains(r#"name="start""#));
    assert_eq!(app.calls().len(), 1);
}

#[test]
fn home_shows_upstream_failure_inline() {
    let app = TestApp::with_jobber(FakeJobber::new(None, None));
    let token = app.sign_in();

    let resp = handle(get("/", Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Failed to fetch visits"));
    assert!(body.contains("0 Jobs"));
}

#[test]
fn unknown_routes_are_not_found() {
    let app = TestApp::new();

    assert!(matches!(
        handle(get("/admin", None), &app.state),
        Err(ServerError::NotFound)
    ));

    let resp = serve(get("/nope", None), &app.state);
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Error 404"));
}
