use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::UserId,
    error::RequestError,
    protocol::{AuthSession, ClientListEntry, ClientRecord, Credentials, ProjectRecord},
};
use tracing::{debug, warn};
use url::Url;

pub mod alert;
pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod navigation;
pub mod session;

pub use alert::{Alert, AlertKind, AlertSink, AlertSlot};
pub use controller::{
    registration::RegistrationController, sign_in::SignInController, MountOutcome, ScreenContext,
    SubmitOutcome,
};
pub use navigation::{Navigator, Route};
pub use session::{FileSessionStore, InMemorySessionStore, SessionStore};

/// Remote calls the screens depend on.
#[async_trait]
pub trait FreelaApi: Send + Sync {
    async fn fetch_clients(
        &self,
        token: &str,
        user_id: UserId,
    ) -> Result<Vec<ClientListEntry>, RequestError>;
    async fn create_project(
        &self,
        project: &ProjectRecord,
        token: &str,
        user_id: UserId,
    ) -> Result<(), RequestError>;
    async fn create_client(
        &self,
        client: &ClientRecord,
        token: &str,
        user_id: UserId,
    ) -> Result<(), RequestError>;
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, RequestError>;
}

pub struct HttpApiClient {
    http: Client,
    base_url: Url,
}

impl HttpApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RequestError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RequestError::transport(format!("api url {} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl FreelaApi for HttpApiClient {
    async fn fetch_clients(
        &self,
        token: &str,
        user_id: UserId,
    ) -> Result<Vec<ClientListEntry>, RequestError> {
        let url = self.endpoint(&["clients", &user_id.to_string()])?;
        debug!(%url, "fetching client list");
        send_json(self.http.get(url).bearer_auth(token)).await
    }

    async fn create_project(
        &self,
        project: &ProjectRecord,
        token: &str,
        user_id: UserId,
    ) -> Result<(), RequestError> {
        let url = self.endpoint(&["projects", &user_id.to_string()])?;
        debug!(%url, title = %project.title, "creating project");
        send_unit(self.http.post(url).bearer_auth(token).json(project)).await
    }

    async fn create_client(
        &self,
        client: &ClientRecord,
        token: &str,
        user_id: UserId,
    ) -> Result<(), RequestError> {
        let url = self.endpoint(&["clients", &user_id.to_string()])?;
        debug!(%url, name = %client.name, "creating client");
        send_unit(self.http.post(url).bearer_auth(token).json(client)).await
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, RequestError> {
        let url = self.endpoint(&["sign-in"])?;
        debug!(%url, email = %credentials.email, "signing in");
        send_json(self.http.post(url).json(credentials)).await
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, RequestError> {
    let response = send(request).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| RequestError::decode(format!("unexpected response body: {e}")))
}

async fn send_unit(request: RequestBuilder) -> Result<(), RequestError> {
    send(request).await.map(|_| ())
}

async fn send(request: RequestBuilder) -> Result<Response, RequestError> {
    let response = request
        .send()
        .await
        .map_err(|e| RequestError::transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "api request failed");
    Err(RequestError::from_status(status.as_u16(), server_message(&body)))
}

/// Pulls the human-readable part out of an error body.
fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(text)) => Some(text),
        Ok(Value::Object(fields)) => ["message", "error"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(str::to_owned)
            .or_else(|| Some(trimmed.to_string())),
        _ => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
