//! HTTP client implementation - talks to a remote apps gateway over REST

use crate::api::rest::dto::{AppDto, CreateAppRequest, UpdateAppRequest};
use crate::api::rest::error::Problem;
use crate::contract::{App, AppPatch, AppsApi, AppsError, FieldErrors, NewApp};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Environment variable holding the gateway base URL
pub const BASE_URL_ENV: &str = "DIFY_ADMIN_API_BASE_URL";

/// Local development gateway
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/dify";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `AppsApi` backed by the REST gateway
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a client for the gateway mounted at `base_url`
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid base URL '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("base URL '{base_url}' cannot carry a path");
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    /// Create a client from `DIFY_ADMIN_API_BASE_URL`, falling back to the local gateway
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        tracing::debug!(%base_url, "Using apps gateway");
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send a request and decode either the body or a problem response
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        id: Option<&str>,
    ) -> Result<T, AppsError> {
        let response = request.send().await.map_err(|e| AppsError::Network {
            message: e.to_string(),
        })?;
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(|e| AppsError::Network {
                message: format!("unreadable response body: {e}"),
            });
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(error_from_body(status, &body, id))
    }

    async fn send_app(&self, request: RequestBuilder, id: Option<&str>) -> Result<App, AppsError> {
        let dto: AppDto = self.send(request, id).await?;
        App::try_from(dto).map_err(AppsError::internal)
    }
}

/// Error body thrown by a plain backend: `{ statusCode, message, error }`,
/// where `message` may be one string or a list of them
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawErrorBody {
    #[serde(default)]
    message: Option<RawMessage>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMessage {
    One(String),
    Many(Vec<String>),
}

impl RawErrorBody {
    fn messages(&self) -> Vec<String> {
        match &self.message {
            Some(RawMessage::One(m)) => vec![m.clone()],
            Some(RawMessage::Many(ms)) => ms.clone(),
            None => self.error.iter().cloned().collect(),
        }
    }
}

/// Decode a failed response: a problem document first, then a raw error body
fn error_from_body(status: StatusCode, body: &[u8], id: Option<&str>) -> AppsError {
    if let Ok(problem) = serde_json::from_slice::<Problem>(body) {
        return problem_to_error(problem, id);
    }
    let raw = serde_json::from_slice::<RawErrorBody>(body).unwrap_or_default();
    raw_to_error(status, raw.messages(), id)
}

fn problem_to_error(problem: Problem, id: Option<&str>) -> AppsError {
    // The gateway does not echo the identifier; restore the one we sent.
    match (AppsError::from(problem), id) {
        (AppsError::BadFormat { .. }, Some(id)) => AppsError::BadFormat { id: id.to_string() },
        (AppsError::NotFound { .. }, Some(id)) => AppsError::not_found(id),
        (err, _) => err,
    }
}

/// Map a bare status code plus its messages onto the domain taxonomy
fn raw_to_error(status: StatusCode, messages: Vec<String>, id: Option<&str>) -> AppsError {
    let detail = if messages.is_empty() {
        format!("gateway responded with {status}")
    } else {
        messages.join("; ")
    };
    match (status, id) {
        (StatusCode::BAD_REQUEST, Some(id)) if detail.to_ascii_lowercase().contains("uuid") => {
            AppsError::BadFormat { id: id.to_string() }
        }
        (StatusCode::BAD_REQUEST, _) => {
            let mut errors = FieldErrors::new();
            if messages.is_empty() {
                errors.add("request", detail);
            }
            for message in messages {
                errors.add(field_of(&message), message);
            }
            AppsError::Validation { errors }
        }
        (StatusCode::NOT_FOUND, id) => AppsError::not_found(id.unwrap_or_default()),
        (StatusCode::CONFLICT, _) => AppsError::Conflict { reason: detail },
        _ => AppsError::Internal { message: detail },
    }
}

/// Raw validation messages lead with the field name ("name should not be
/// empty"); anything else is filed under `request`
fn field_of(message: &str) -> &'static str {
    const FIELDS: [&str; 14] = [
        "tenant_id",
        "name",
        "mode",
        "icon",
        "icon_background",
        "app_model_config_id",
        "status",
        "enable_site",
        "enable_api",
        "api_rpm",
        "api_rph",
        "is_demo",
        "is_public",
        "is_universal",
    ];
    let first = message.split_whitespace().next().unwrap_or_default();
    FIELDS.into_iter().find(|f| *f == first).unwrap_or("request")
}

#[async_trait]
impl AppsApi for HttpClient {
    async fn create_app(&self, input: NewApp) -> Result<App, AppsError> {
        let body = CreateAppRequest::from(input);
        let request = self.http.post(self.endpoint(&["apps"])).json(&body);
        self.send_app(request, None).await
    }

    async fn list_apps(&self) -> Result<Vec<App>, AppsError> {
        let request = self.http.get(self.endpoint(&["apps"]));
        let dtos: Vec<AppDto> = self.send(request, None).await?;
        dtos.into_iter()
            .map(|dto| App::try_from(dto).map_err(AppsError::internal))
            .collect()
    }

    async fn get_app(&self, id: &str) -> Result<App, AppsError> {
        let request = self.http.get(self.endpoint(&["app", id]));
        self.send_app(request, Some(id)).await
    }

    async fn update_app(&self, id: &str, patch: AppPatch) -> Result<App, AppsError> {
        let body = UpdateAppRequest::from(patch);
        let request = self.http.patch(self.endpoint(&["app", id])).json(&body);
        self.send_app(request, Some(id)).await
    }

    async fn delete_app(&self, id: &str) -> Result<App, AppsError> {
        let request = self.http.delete(self.endpoint(&["app", id]));
        self.send_app(request, Some(id)).await
    }

    async fn toggle_app_status(&self, id: &str) -> Result<App, AppsError> {
        let request = self.http.post(self.endpoint(&["app", id, "toggle"]));
        self.send_app(request, Some(id)).await
    }
}
