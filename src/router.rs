use astra::{Request, Response};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use serde_json::json;
use std::io::Read;

use crate::auth::{self, oauth, sessions, ActiveSession};
use crate::domain::range::{default_week, parse_bound};
use crate::domain::{extract_salespeople, Dialect, FilterSettings, VisitsResponse};
use crate::errors::ServerError;
use crate::query::{query_param, PageQuery};
use crate::responses::{
    error_response, html_response, json_response, redirect, redirect_with_cookie, text_response,
    ResultResp,
};
use crate::state::AppState;
use crate::templates::pages::{login_page, quicklist_page, QuickListVm};

const MAX_BODY_BYTES: u64 = 8 * 1024 * 1024;

/// Entry point for the server loop: never fails, errors become responses.
pub fn serve(req: Request, state: &AppState) -> Response {
    let wants_json = req.uri().path().starts_with("/api/");
    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => error_response(err, wants_json),
    }
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => quicklist_home(&req, state),

        ("GET", "/auth/jobber") => start_oauth(state),
        ("GET", "/auth/jobber/callback") => oauth_callback(&req, state),
        ("GET", "/auth/logout") => logout(&req, state),

        ("GET", "/api/authenticated") => match current_session(&req, state)? {
            Some(_) => json_response(200, &json!({ "authenticated": true })),
            None => Err(not_authenticated()),
        },
        ("GET", "/api/visits") => api_visits(&req, state),
        ("POST", "/api/quicklist") => api_quicklist(req, state),
        ("POST", "/api/salespeople") => api_salespeople(req),

        _ => Err(ServerError::NotFound),
    }
}

fn not_authenticated() -> ServerError {
    ServerError::Unauthorized("Not authenticated".into())
}

fn current_session(req: &Request, state: &AppState) -> Result<Option<ActiveSession>, ServerError> {
    match auth::session_token(req) {
        Some(token) => {
            sessions::resolve_session(&state.db, state.jobber.as_ref(), &token, auth::token::now_unix())
        }
        None => Ok(None),
    }
}

fn start_oauth(state: &AppState) -> ResultResp {
    let now = auth::token::now_unix();
    let oauth_state = state.db.with_conn(|conn| oauth::issue_state(conn, now))?;
    let url = oauth::authorize_url(&state.config.oauth, &oauth_state)?;
    tracing::info!("redirecting to Jobber authorization");
    redirect(&url)
}

fn oauth_callback(req: &Request, state: &AppState) -> ResultResp {
    let query = req.uri().query();
    let Some(code) = query_param(query, "code").filter(|c| !c.is_empty()) else {
        return Err(ServerError::BadRequest("Authorization code not provided".into()));
    };

    let now = auth::token::now_unix();
    let oauth_state = query_param(query, "state").unwrap_or_default();
    if !state.db.with_conn(|conn| oauth::consume_state(conn, &oauth_state, now))? {
        tracing::warn!("rejected OAuth callback with unknown or expired state");
        return Err(ServerError::BadRequest("Invalid or expired state".into()));
    }

    let grant = state.jobber.exchange_code(&code).map_err(|e| {
        tracing::error!(error = %e, "authorization code exchange failed");
        ServerError::Upstream("Authentication failed".into())
    })?;

    let token = state
        .db
        .with_conn(|conn| sessions::create_session(conn, &grant, now))?;
    tracing::info!("signed in with Jobber");

    redirect_with_cookie("/", &auth::session_cookie(&token, state.config.secure_cookies))
}

fn logout(req: &Request, state: &AppState) -> ResultResp {
    if let Some(token) = auth::session_token(req) {
        let now = auth::token::now_unix();
        state.db.with_conn(|conn| sessions::end_session(conn, &token, now))?;
    }
    redirect_with_cookie("/", &auth::clear_session_cookie(state.config.secure_cookies))
}

fn api_visits(req: &Request, state: &AppState) -> ResultResp {
    let session = current_session(req, state)?.ok_or_else(not_authenticated)?;

    let query = req.uri().query();
    let (Some(start), Some(end)) = (
        query_param(query, "startDate").filter(|s| !s.is_empty()),
        query_param(query, "endDate").filter(|s| !s.is_empty()),
    ) else {
        return Err(ServerError::BadRequest("startDate and endDate are required".into()));
    };

    let visits = fetch_visits(state, &session, &start, &end)?;
    json_response(200, &visits)
}

fn fetch_visits(
    state: &AppState,
    session: &ActiveSession,
    start: &str,
    end: &str,
) -> Result<serde_json::Value, ServerError> {
    tracing::debug!(session = session.id, start, end, "fetching visits");
    state
        .jobber
        .fetch_visits(&session.access_token, start, end)
        .map_err(|e| {
            tracing::error!(error = %e, start, end, "error fetching visits");
            ServerError::Upstream("Failed to fetch visits".into())
        })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuickListRequest {
    #[serde(default)]
    data: Option<VisitsResponse>,
    #[serde(default)]
    settings: FilterSettings,
    #[serde(default)]
    range_start: Option<String>,
    #[serde(default)]
    range_end: Option<String>,
    #[serde(default)]
    format: Dialect,
    #[serde(default)]
    filter_text: String,
}

fn api_quicklist(req: Request, state: &AppState) -> ResultResp {
    let body: QuickListRequest = read_json(req)?;
    let tz = state.config.timezone;
    let range_start = parse_range_bound("rangeStart", body.range_start.as_deref(), tz, false)?;
    let range_end = parse_range_bound("rangeEnd", body.range_end.as_deref(), tz, true)?;

    let data = body.data.unwrap_or_default();
    let text = state.formatter.format_visits(
        &data,
        &body.settings,
        range_start,
        range_end,
        body.format,
        &body.filter_text,
    );
    text_response(text)
}

fn api_salespeople(req: Request) -> ResultResp {
    let data: VisitsResponse = read_json::<Option<VisitsResponse>>(req)?.unwrap_or_default();
    json_response(200, &extract_salespeople(&data))
}

fn parse_range_bound(
    name: &str,
    raw: Option<&str>,
    tz: chrono_tz::Tz,
    is_end: bool,
) -> Result<Option<DateTime<FixedOffset>>, ServerError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(None),
        Some(r) => parse_bound(r, tz, is_end)
            .map(Some)
            .ok_or_else(|| ServerError::BadRequest(format!("invalid {name}: {r}"))),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(req: Request) -> Result<T, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read body: {e}")))?;
    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("request body too large".into()));
    }
    serde_json::from_slice(&buf).map_err(|e| ServerError::BadRequest(format!("invalid JSON body: {e}")))
}

fn quicklist_home(req: &Request, state: &AppState) -> ResultResp {
    let Some(session) = current_session(req, state)? else {
        return html_response(login_page());
    };

    let page = PageQuery::parse(req.uri().query())?;
    let tz = state.config.timezone;
    let (default_start, default_end) = default_week(Utc::now().with_timezone(&tz));
    let start = parse_range_bound("start", page.start.as_deref(), tz, false)?.unwrap_or(default_start);
    let end = parse_range_bound("end", page.end.as_deref(), tz, true)?.unwrap_or(default_end);

    let fetched = fetch_visits(state, &session, &start.to_rfc3339(), &end.to_rfc3339()).and_then(|v| {
        serde_json::from_value::<VisitsResponse>(v).map_err(|e| {
            tracing::error!(error = %e, "unexpected visits payload");
            ServerError::Upstream("Failed to fetch visits".into())
        })
    });

    let (data, error) = match fetched {
        Ok(data) => (data, None),
        Err(err) => (VisitsResponse::default(), Some(err.public_message())),
    };

    let output = state.formatter.format_visits(
        &data,
        &page.settings,
        Some(start),
        Some(end),
        page.dialect,
        &page.filter_text,
    );
    let salespeople = extract_salespeople(&data);
    let start_field = start.with_timezone(&tz).format("%Y-%m-%d").to_string();
    let end_field = end.with_timezone(&tz).format("%Y-%m-%d").to_string();

    html_response(quicklist_page(&QuickListVm {
        settings: &page.settings,
        dialect: page.dialect,
        filter_text: &page.filter_text,
        start: &start_field,
        end: &end_field,
        salespeople: &salespeople,
        output: &output,
        error: error.as_deref(),
    }))
}
