// src/tests/utils.rs
use crate::auth::sessions::create_session;
use crate::auth::token::now_unix;
use crate::config::fixtures::test_config;
use crate::db::connection::init_db;
use crate::jobber::{JobberApi, JobberError, TokenGrant};
use crate::state::AppState;
use astra::{Body, Response};
use http::{Method, Request};
use serde_json::{json, Value};
use std::io::Read;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Stand-in for the Jobber API; records the calls it receives.
pub struct FakeJobber {
    pub visits: Option<Value>,
    pub grant: Option<TokenGrant>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeJobber {
    pub fn new(visits: Option<Value>, grant: Option<TokenGrant>) -> Self {
        Self {
            visits,
            grant,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl JobberApi for FakeJobber {
    fn fetch_visits(&self, access_token: &str, start: &str, end: &str) -> Result<Value, JobberError> {
        self.record(format!("visits {access_token} {start} {end}"));
        self.visits.clone().ok_or(JobberError::Api {
            status: 502,
            body: "bad gateway".into(),
        })
    }

    fn exchange_code(&self, code: &str) -> Result<TokenGrant, JobberError> {
        self.record(format!("exchange {code}"));
        self.grant.clone().ok_or(JobberError::Api {
            status: 400,
            body: "invalid_grant".into(),
        })
    }

    fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, JobberError> {
        self.record(format!("refresh {refresh_token}"));
        self.grant.clone().ok_or(JobberError::Network("refused".into()))
    }
}

struct SharedFake(Arc<FakeJobber>);

impl JobberApi for SharedFake {
    fn fetch_visits(&self, access_token: &str, start: &str, end: &str) -> Result<Value, JobberError> {
        self.0.fetch_visits(access_token, start, end)
    }

    fn exchange_code(&self, code: &str) -> Result<TokenGrant, JobberError> {
        self.0.exchange_code(code)
    }

    fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, JobberError> {
        self.0.refresh(refresh_token)
    }
}

/// App state over a fresh SQLite file; keep the TempDir alive for the test.
pub struct TestApp {
    pub state: AppState,
    pub fake: Arc<FakeJobber>,
    _dir: TempDir,
}

impl TestApp {
    pub fn with_jobber(jobber: FakeJobber) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quicklist_test.sqlite3");
        let config = test_config(&path.to_string_lossy());
        let fake = Arc::new(jobber);
        let state = AppState::new(config, Box::new(SharedFake(Arc::clone(&fake))));
        init_db(&state.db, "sql/schema.sql")
            .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
        Self {
            state,
            fake,
            _dir: dir,
        }
    }

    pub fn new() -> Self {
        Self::with_jobber(FakeJobber::new(Some(sample_visits()), Some(sample_grant())))
    }

    /// Seed a signed-in session and return its cookie token.
    pub fn sign_in(&self) -> String {
        self.state
            .db
            .with_conn(|conn| create_session(conn, &sample_grant(), now_unix()))
            .unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.fake.calls.lock().unwrap().clone()
    }
}

pub fn sample_grant() -> TokenGrant {
    TokenGrant {
        access_token: "access-abc".into(),
        refresh_token: Some("refresh-xyz".into()),
        expires_in: Some(3600),
    }
}

pub fn sample_visits() -> Value {
    json!({
        "data": { "visits": { "edges": [
            { "node": {
                "id": "Z2lkOi8vSm9iYmVyL1Zpc2l0LzI=",
                "title": "Jones -NE- 12 Elm St - W1",
                "startAt": "2025-06-10T16:00:00Z",
                "endAt": "2025-06-10T18:30:00Z",
                "job": {
                    "jobberWebUri": "https://secure.getjobber.com/work_orders/2",
                    "total": 250.0,
                    "salesperson": { "name": { "first": "Ana", "last": "Smith" } },
                    "jobType": "ONE_OFF"
                }
            }},
            { "node": {
                "id": "Z2lkOi8vSm9iYmVyL1Zpc2l0LzE=",
                "title": "=Smith -SW- 4 Oak Ave - W2",
                "startAt": "2025-06-09T07:00:00Z",
                "endAt": "2025-06-10T06:59:00Z",
                "job": {
                    "jobberWebUri": "https://secure.getjobber.com/work_orders/1",
                    "total": null,
                    "salesperson": null,
                    "jobType": "RECURRING"
                }
            }}
        ]}}
    })
}

pub fn get(uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = session {
        builder = builder.header("Cookie", format!("session={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn header(resp: &Response, name: &str) -> String {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
