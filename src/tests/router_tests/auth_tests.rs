// src/tests/router_tests/auth_tests.rs
use crate::errors::ServerError;
use crate::router::{handle, serve};
use crate::tests::utils::{body_string, get, header, FakeJobber, TestApp, sample_visits};
use std::collections::HashMap;
use url::Url;

fn issued_state(app: &TestApp) -> String {
    let resp = handle(get("/auth/jobber", None), &app.state).expect("Failed to handle request");
    let location = Url::parse(&header(&resp, "Location")).unwrap();
    let q: HashMap<_, _> = location.query_pairs().into_owned().collect();
    q["state"].clone()
}

#[test]
fn sign_in_redirects_to_jobber_with_state() {
    let app = TestApp::new();

    let resp = handle(get("/auth/jobber", None), &app.state).expect("Failed to handle request");
    assert_eq!(resp.status(), 302);

    let location = header(&resp, "Location");
    assert!(location.starts_with("https://api.getjobber.com/api/oauth/authorize?"));
    assert!(location.contains("client_id=client-123"));
    assert!(location.contains("response_type=code"));
    assert!(location.contains("state="));

    let stored: i64 = app
        .state
        .db
        .with_conn(|conn| {
            conn.query_row("select count(*) from oauth_states where used_at is null", [], |r| r.get(0))
                .map_err(|e| ServerError::DbError(format!("query oauth_states failed: {e}")))
        })
        .unwrap();
    assert_eq!(stored, 1);
}

#[test]
fn callback_without_code_is_bad_request() {
    let app = TestApp::new();
    let err = handle(get("/auth/jobber/callback?state=x", None), &app.state).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(msg) if msg == "Authorization code not provided"));
}

#[test]
fn callback_with_forged_state_never_exchanges() {
    let app = TestApp::new();
    issued_state(&app);

    let err = handle(get("/auth/jobber/callback?code=abc&state=forged", None), &app.state).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert!(app.calls().is_empty());
}

#[test]
fn callback_signs_in_and_state_is_single_use() {
    let app = TestApp::new();
    let state = issued_state(&app);
    let uri = format!("/auth/jobber/callback?code=abc&state={state}");

    let resp = handle(get(&uri, None), &app.state).expect("Failed to handle request");
    assert_eq!(resp.status(), 302);
    assert_eq!(header(&resp, "Location"), "/");

    let cookie = header(&resp, "Set-Cookie");
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(!cookie.contains("Secure"));
    assert_eq!(app.calls(), vec!["exchange abc"]);

    let token = cookie
        .trim_start_matches("session=")
        .split(';')
        .next()
        .unwrap()
        .to_string();
    let resp = handle(get("/api/authenticated", Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(resp), r#"{"authenticated":true}"#);

    // replaying the same state fails
    assert!(handle(get(&uri, None), &app.state).is_err());
}

#[test]
fn failed_code_exchange_is_a_server_error() {
    let app = TestApp::with_jobber(FakeJobber::new(Some(sample_visits()), None));
    let state = issued_state(&app);

    let resp = serve(get(&format!("/auth/jobber/callback?code=abc&state={state}"), None), &app.state);
    assert_eq!(resp.status(), 500);
    assert!(body_string(resp).contains("Authentication failed"));
}

#[test]
fn authenticated_without_session_is_401_json() {
    let app = TestApp::new();
    let resp = serve(get("/api/authenticated", None), &app.state);
    assert_eq!(resp.status(), 401);
    assert_eq!(header(&resp, "Content-Type"), "application/json");
    assert_eq!(body_string(resp), r#"{"error":"Not authenticated"}"#);
}

#[test]
fn logout_revokes_session_and_clears_cookie() {
    let app = TestApp::new();
    let token = app.sign_in();

    let resp = handle(get("/auth/logout", Some(&token)), &app.state).unwrap();
    assert_eq!(resp.status(), 302);
    assert!(header(&resp, "Set-Cookie").contains("Max-Age=0"));

    let resp = serve(get("/api/authenticated", Some(&token)), &app.state);
    assert_eq!(resp.status(), 401);
}
