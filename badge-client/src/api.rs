//! API gateway client
//!
//! Thin transport over the badge REST API. Every call except
//! `authenticate` and `fetch_public_profile` goes through
//! [`SessionView::attach`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use shared::client::{LoginRequest, LoginResponse};
use shared::models::{EmployeePublicProfile, EmployeeSummary};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionView;
use crate::types::{BadgeRender, BadgeSide};

/// Typed operations of the badge API
#[async_trait]
pub trait BadgeApi: Send + Sync {
    /// `POST /auth/login`
    async fn authenticate(&self, username: &str, password: &str) -> ClientResult<LoginResponse>;

    /// `GET /employees/list`, in server order
    async fn list_employees(&self) -> ClientResult<Vec<EmployeeSummary>>;

    /// `GET /employees/{id}/id-card/{side}`
    async fn fetch_badge(&self, employee_id: &str, side: BadgeSide) -> ClientResult<BadgeRender>;

    /// `GET /public/employees/{id}`, unauthenticated
    async fn fetch_public_profile(&self, employee_id: &str) -> ClientResult<EmployeePublicProfile>;
}

/// reqwest-backed [`BadgeApi`]
#[derive(Debug, Clone)]
pub struct NetworkBadgeApi {
    client: Client,
    base_url: Url,
    session: SessionView,
}

impl NetworkBadgeApi {
    pub fn new(config: &ClientConfig, session: SessionView) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            ClientError::Config(format!("invalid base url {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "not a base url: {}",
                config.base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    ///
    /// `.` and `..` are dropped by URL normalization; callers pass ids
    /// through [`employee_segment`] first.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, text));
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = self.send(request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Malformed(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl BadgeApi for NetworkBadgeApi {
    async fn authenticate(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.client.post(self.url(&["auth", "login"])).json(&body);
        self.json(request).await
    }

    async fn list_employees(&self) -> ClientResult<Vec<EmployeeSummary>> {
        let request = self
            .session
            .attach(self.client.get(self.url(&["employees", "list"])));
        self.json(request).await
    }

    async fn fetch_badge(&self, employee_id: &str, side: BadgeSide) -> ClientResult<BadgeRender> {
        let id = employee_segment(employee_id)?;
        let url = self.url(&["employees", id, "id-card", side.as_path_segment()]);
        let request = self.session.attach(self.client.get(url));
        let markup = self
            .send(request)
            .await?
            .text()
            .await
            .map_err(|e| ClientError::Malformed(e.to_string()))?;

        Ok(BadgeRender {
            employee_id: employee_id.to_string(),
            side,
            markup,
        })
    }

    async fn fetch_public_profile(&self, employee_id: &str) -> ClientResult<EmployeePublicProfile> {
        let id = employee_segment(employee_id)?;
        let request = self.client.get(self.url(&["public", "employees", id]));
        self.json(request).await
    }
}

/// An employee id usable as a single path segment.
///
/// Empty, `.` and `..` cannot name an employee and would address another
/// endpoint once normalized.
fn employee_segment(employee_id: &str) -> ClientResult<&str> {
    match employee_id {
        "" | "." | ".." => Err(ClientError::NotFound(format!(
            "invalid employee id {:?}",
            employee_id
        ))),
        id => Ok(id),
    }
}
