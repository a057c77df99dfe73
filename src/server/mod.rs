//! HTTP server for the JSON API
//!
//! A blocking `tiny_http` accept loop dispatching on `(method, path)`.
//! Handlers return `AppResult<Reply>`; error kinds map 1:1 to HTTP status
//! codes and every error body is `{"error": "..."}`.

pub mod handlers;
pub mod types;

use std::io::Read;

use anyhow::{Context, Result};
use serde_json::json;
use tiny_http::{Response, Server};
use tracing::{error, info, warn};

use crate::auth::AuthService;
use crate::checklist::ChecklistEngine;
use crate::config::Config;
use crate::domain::{AppError, AppResult, UserId};
use crate::leaderboard::LeaderboardQuery;
use crate::progression::ProgressionEngine;
use crate::quiz::QuizGrader;
use crate::store::Store;

const MAX_BODY_BYTES: usize = 1024 * 1024; // 1 MiB

/// Status code plus JSON body.
pub type Reply = (u16, serde_json::Value);

/// Everything a handler needs; cheap to clone, all parts share one `Store`.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub auth: AuthService,
    pub progression: ProgressionEngine,
    pub checklist: ChecklistEngine,
    pub grader: QuizGrader,
    pub leaderboard: LeaderboardQuery,
}

impl AppState {
    pub fn new(store: Store, email_domain: String) -> Self {
        let progression = ProgressionEngine::new(store.clone());
        Self {
            auth: AuthService::new(store.clone(), email_domain),
            checklist: ChecklistEngine::new(store.clone(), progression.clone()),
            grader: QuizGrader::new(store.clone(), progression.clone()),
            leaderboard: LeaderboardQuery::new(store.clone()),
            progression,
            store,
        }
    }

    /// Resolve the bearer token; Unauthorized when missing or invalid.
    pub fn require_user(&self, auth_header: Option<&str>) -> AppResult<UserId> {
        self.auth.authenticate(auth_header)
    }
}

/// Open the store and run the server until the process exits.
pub fn serve(config: Config) -> Result<()> {
    let db_path = config.database_path();
    let store = Store::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    let state = AppState::new(store, config.auth.email_domain.clone());

    let bind_addr = format!("{}:{}", config.server.bind, config.server.port);
    let server = Server::http(&bind_addr)
        .map_err(|e| anyhow::anyhow!("Failed to bind {bind_addr}: {e}"))?;
    info!("listening on http://{bind_addr}");

    for mut request in server.incoming_requests() {
        let method = request.method().to_string();
        let url = request.url().to_string();
        let path = url.split('?').next().unwrap_or(url.as_str()).to_string();
        let query = url.split_once('?').map(|(_, q)| q.to_string()).unwrap_or_default();

        let auth_header = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Authorization"))
            .map(|h| h.value.as_str().to_string());

        let body = match read_request_body(&mut request) {
            Ok(body) => body,
            Err(reply) => {
                respond(request, reply);
                continue;
            }
        };

        let reply = match route(&state, &method, &path, &query, auth_header.as_deref(), &body) {
            Ok(reply) => reply,
            Err(err) => {
                if matches!(err, AppError::Storage(_)) {
                    error!("{method} {path}: {err}");
                } else {
                    warn!("{method} {path}: {err}");
                }
                (err.status_code(), json!({ "error": err.to_string() }))
            }
        };
        respond(request, reply);
    }

    Ok(())
}

/// Dispatch one request. Split out of the accept loop so tests can call it
/// without a socket.
pub fn route(
    state: &AppState,
    method: &str,
    path: &str,
    query: &str,
    auth_header: Option<&str>,
    body: &str,
) -> AppResult<Reply> {
    match (method, path) {
        ("GET", "/api/ping") => Ok((
            200,
            json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }),
        )),

        ("POST", "/api/auth/register") => handlers::auth::register(state, body),
        ("POST", "/api/auth/login") => handlers::auth::login(state, body),
        ("POST", "/api/auth/password-strength") => handlers::auth::password_strength(body),
        ("GET", "/api/auth/me") => handlers::auth::me(state, auth_header),
        ("PATCH", "/api/auth/me") => handlers::auth::update_me(state, auth_header, body),

        ("GET", "/api/sets") => handlers::sets::list(state, auth_header, query),
        ("POST", "/api/sets") => handlers::sets::create(state, auth_header, body),

        ("GET", "/api/leaderboard") => handlers::leaderboard::get(state, auth_header, query),

        ("GET", "/api/xp/events") => handlers::xp::history(state, auth_header),
        ("POST", "/api/xp/events") => handlers::xp::post_event(state, auth_header, body),

        ("GET", "/api/checklist") => handlers::checklist::get(state, auth_header, query),
        ("POST", p) if p.starts_with("/api/checklist/") && p.ends_with("/complete") => {
            let task_id = parse_id(
                p.trim_start_matches("/api/checklist/").trim_end_matches("/complete"),
            )?;
            handlers::checklist::complete(state, auth_header, task_id, query)
        }

        (_, p) if p.starts_with("/api/sets/") => {
            route_set_scoped(state, method, p, query, auth_header, body)
        }

        _ => Err(AppError::not_found("not found")),
    }
}

/// Routes nested under `/api/sets/{setId}/...`.
fn route_set_scoped(
    state: &AppState,
    method: &str,
    path: &str,
    query: &str,
    auth_header: Option<&str>,
    body: &str,
) -> AppResult<Reply> {
    let rest = path.trim_start_matches("/api/sets/");
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        ("GET", [set_id]) => handlers::sets::get(state, parse_id(set_id)?),
        ("PATCH", [set_id]) => handlers::sets::update(state, auth_header, parse_id(set_id)?, body),
        ("DELETE", [set_id]) => handlers::sets::delete(state, auth_header, parse_id(set_id)?),

        ("GET", [set_id, "flashcards"]) => handlers::cards::list(state, parse_id(set_id)?),
        ("POST", [set_id, "flashcards"]) => {
            handlers::cards::create(state, auth_header, parse_id(set_id)?, body)
        }
        ("PATCH", [set_id, "flashcards", card_id]) => {
            handlers::cards::update(state, auth_header, parse_id(set_id)?, parse_id(card_id)?, body)
        }
        ("DELETE", [set_id, "flashcards", card_id]) => {
            handlers::cards::delete(state, auth_header, parse_id(set_id)?, parse_id(card_id)?)
        }

        ("GET", [set_id, "questions"]) => handlers::questions::list(state, parse_id(set_id)?),
        ("POST", [set_id, "questions"]) => {
            handlers::questions::create(state, auth_header, parse_id(set_id)?, body)
        }
        ("PATCH", [set_id, "questions", question_id]) => handlers::questions::update(
            state,
            auth_header,
            parse_id(set_id)?,
            parse_id(question_id)?,
            body,
        ),
        ("DELETE", [set_id, "questions", question_id]) => handlers::questions::delete(
            state,
            auth_header,
            parse_id(set_id)?,
            parse_id(question_id)?,
        ),

        ("POST", [set_id, "attempts"]) => {
            handlers::attempts::submit(state, auth_header, parse_id(set_id)?, body)
        }
        ("GET", [set_id, "attempts"]) => {
            handlers::attempts::list(state, auth_header, parse_id(set_id)?)
        }
        ("POST", [set_id, "review"]) => {
            handlers::attempts::review(state, auth_header, parse_id(set_id)?, body, query)
        }

        _ => Err(AppError::not_found("not found")),
    }
}

fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::invalid(format!("invalid id: {raw}")))
}

/// Pull one query parameter out of a raw query string. Values are not
/// percent-decoded; the parameters this API accepts (dates, numbers) never
/// need it.
pub fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}

/// Parse a JSON request body into a DTO.
pub fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| AppError::invalid(format!("malformed payload: {e}")))
}

fn read_request_body(request: &mut tiny_http::Request) -> Result<String, Reply> {
    let mut body = String::new();
    let mut reader = request.as_reader().take((MAX_BODY_BYTES + 1) as u64);
    if let Err(e) = reader.read_to_string(&mut body) {
        error!("failed to read request body: {e}");
        return Err((400, json!({ "error": "bad_request" })));
    }
    if body.len() > MAX_BODY_BYTES {
        return Err((413, json!({ "error": "payload_too_large" })));
    }
    Ok(body)
}

fn respond(request: tiny_http::Request, (status, value): Reply) {
    let body = serde_json::to_string(&value).unwrap_or_else(|_| "{\"error\":\"serialize\"}".to_string());
    let response = Response::from_string(body)
        .with_status_code(status)
        .with_header(json_content_type());
    let _ = request.respond(response);
}

fn json_content_type() -> tiny_http::Header {
    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap()
}
