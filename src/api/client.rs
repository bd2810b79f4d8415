use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::config;
use crate::models::Role;
use crate::session::{Session, SessionStore};

/// Read endpoints are role-scoped; write endpoints share the common
/// `/api` routes.
pub(crate) fn role_prefix(role: Role) -> &'static str {
    match role {
        Role::Admin => "/api/admin",
        Role::Nurse => "/api/nurse",
        Role::Doctor => "/api",
    }
}

/// Shared blocking HTTP client for the clinic backend.
///
/// Reads the bearer token from the session store on every call, so a
/// logout takes effect immediately without rebuilding gateways.
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
    session: Arc<SessionStore>,
}

/// List endpoints sometimes wrap the array in a `data` field and
/// sometimes return it bare. Accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(items) => items,
        }
    }
}

/// Request body for `POST /api/login`.
#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<SessionStore>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(config::REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
        }
    }

    /// Client against the configured backend (`KLINIKA_API_URL` or the
    /// local default).
    pub fn from_config(session: Arc<SessionStore>) -> Self {
        Self::new(&config::api_base_url(), session)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ── Authentication ──────────────────────────────────────

    /// `POST /api/login`. Empty fields are rejected before any HTTP call;
    /// a rejected credential maps to `ApiError::Auth`. The caller stores
    /// the returned session via `SessionStore::set`.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".into(),
            ));
        }

        let url = format!("{}/api/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .map_err(transport_error)?;

        let response = check_status("/api/login", response)?;
        let session: Session = response
            .json()
            .map_err(|e| ApiError::ResponseParsing(e.to_string()))?;
        tracing::info!(user = %session.user.name, role = %session.user.role, "Login succeeded");
        Ok(session)
    }

    // ── Resource plumbing ───────────────────────────────────

    /// GET a list endpoint. When no credential is present the call is
    /// skipped and an empty list returned — screens render "nothing" for
    /// an unauthenticated session instead of erroring.
    pub(crate) fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let Some(token) = self.session.token() else {
            tracing::warn!(path, "Skipping fetch: no session credential");
            return Ok(Vec::new());
        };

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .map_err(transport_error)?;
        let response = check_status(path, response)?;

        let envelope: ListEnvelope<T> = response
            .json()
            .map_err(|e| ApiError::ResponseParsing(e.to_string()))?;
        Ok(envelope.into_vec())
    }

    /// POST a create payload; returns the server-assigned entity.
    pub(crate) fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let token = self.session.token().ok_or(ApiError::Auth)?;
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .map_err(transport_error)?;
        let response = check_status(path, response)?;
        response
            .json()
            .map_err(|e| ApiError::ResponseParsing(e.to_string()))
    }

    /// PUT an update payload; returns the entity as the server persisted
    /// it. Callers replace their cached copy with this, never a local
    /// guess.
    pub(crate) fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let token = self.session.token().ok_or(ApiError::Auth)?;
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .map_err(transport_error)?;
        let response = check_status(path, response)?;
        response
            .json()
            .map_err(|e| ApiError::ResponseParsing(e.to_string()))
    }

    pub(crate) fn delete(&self, path: &str) -> Result<(), ApiError> {
        let token = self.session.token().ok_or(ApiError::Auth)?;
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .delete(&url)
            .bearer_auth(token)
            .send()
            .map_err(transport_error)?;
        check_status(path, response)?;
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network(format!(
            "Request timed out after {}s",
            config::REQUEST_TIMEOUT.as_secs()
        ))
    } else if e.is_connect() {
        ApiError::Network("Cannot reach the clinic backend".into())
    } else {
        ApiError::Network(e.to_string())
    }
}

fn check_status(
    path: &str,
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status.as_u16() {
        401 | 403 => Err(ApiError::Auth),
        404 => Err(ApiError::NotFound(path.to_string())),
        s if (400..500).contains(&s) => {
            let body = response.text().unwrap_or_default();
            Err(ApiError::Validation(format!("status {s}: {body}")))
        }
        s => Err(ApiError::Server(s)),
    }
}
