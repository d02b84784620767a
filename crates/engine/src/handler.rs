//! JSON request envelope in the shape a serverless runtime hands over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use loadout_core::RawFieldMap;
use loadout_storage::RecordStore;

use crate::error::EngineError;
use crate::identity::IdentityResolver;
use crate::{MatchRequest, PlayerStats, StatsService, UpgradeRequest};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Request {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Header lookup ignoring name case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn json_body<T: serde::de::DeserializeOwned>(&self) -> Result<T, EngineError> {
        let body = self.body.as_deref().unwrap_or_default();
        serde_json::from_str(body).map_err(|e| EngineError::InvalidRequest(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    fn ok(stats: &PlayerStats) -> Self {
        let body = stats
            .to_raw()
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect::<serde_json::Map<_, _>>();
        Self {
            status: 200,
            body: Value::Object(body),
        }
    }

    fn error(status: u16, code: &str, message: String) -> Self {
        Self {
            status,
            body: json!({ "error": { "code": code, "message": message } }),
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        self.body.get("error")?.get("code")?.as_str()
    }
}

impl From<EngineError> for Response {
    fn from(err: EngineError) -> Self {
        Self::error(err.status(), err.code(), err.to_string())
    }
}

impl<R: IdentityResolver, S: RecordStore> StatsService<R, S> {
    /// Routes one request and renders the outcome. Never fails; every error
    /// becomes a status and an error body.
    pub fn handle(&self, request: &Request) -> Response {
        let span = tracing::info_span!(
            "request",
            id = %Uuid::now_v7(),
            method = %request.method,
            path = %request.path
        );
        let _enter = span.enter();

        let auth = request.header("authorization");
        let result = match (request.method.to_ascii_uppercase().as_str(), request.path.as_str()) {
            ("GET", "/stats") => self.get_stats(auth),
            ("POST", "/stats") => self.create_stats(auth),
            ("PUT", "/stats") => request
                .body
                .as_deref()
                .ok_or_else(|| EngineError::InvalidRequest("missing body".into()))
                .and_then(|b| {
                    RawFieldMap::from_json(b).map_err(|e| EngineError::InvalidRequest(e.to_string()))
                })
                .and_then(|body| self.save_stats(auth, &body)),
            ("POST", "/stats/upgrade") => request
                .json_body::<UpgradeRequest>()
                .and_then(|req| self.upgrade(auth, &req)),
            ("POST", "/stats/match") => request
                .json_body::<MatchRequest>()
                .and_then(|req| self.record_match(auth, req.outcome)),
            (method, path) => {
                tracing::debug!("no route");
                return Response::error(
                    404,
                    "route_not_found",
                    format!("no route for {method} {path}"),
                );
            }
        };

        match result {
            Ok(stats) => Response::ok(&stats),
            Err(err) => {
                tracing::info!(code = err.code(), error = %err, "request failed");
                err.into()
            }
        }
    }
}
