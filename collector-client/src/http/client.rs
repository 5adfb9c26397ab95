//! HTTP collector implementation.
//!
//! This module provides the concrete implementation of `CollectorApi` over
//! the collector's REST contract using reqwest.

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use crate::config::CollectorConfig;
use crate::errors::CollectorError;
use crate::interfaces::CollectorApi;
use crate::types::{
    CreatedResource, LoginResponse, SignUpRequest, StartResponse, StartTarget, VersionResponse,
};
use trace_soak_shared::types::Statement;

/// Collector client over HTTP.
///
/// # Example
///
/// ```ignore
/// use collector_client::{CollectorConfig, HttpCollector};
///
/// let collector = HttpCollector::new(CollectorConfig::new("http://localhost:3000"))?;
/// let version = collector.create_version(&token, &game_id).await?;
/// ```
pub struct HttpCollector {
    client: ReqwestClient,
    config: CollectorConfig,
}

impl HttpCollector {
    /// Create a new collector client for the configured base URL.
    pub fn new(config: CollectorConfig) -> Result<Self, CollectorError> {
        let client = ReqwestClient::builder().timeout(config.timeout).build()?;

        info!(base_url = %config.base_url, "Created collector client");

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Send a request and fail on any non-200 response, carrying the response
    /// body in the error.
    async fn send(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<Response, CollectorError> {
        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(CollectorError::rejected(endpoint, status.as_u16(), body));
        }
        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(
        endpoint: &str,
        response: Response,
    ) -> Result<T, CollectorError> {
        response
            .json::<T>()
            .await
            .map_err(|e| CollectorError::malformed(endpoint, e.to_string()))
    }
}

#[async_trait]
impl CollectorApi for HttpCollector {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), CollectorError> {
        debug!(username = %request.username, role = %request.role, "Signing up");
        self.send(
            "signup",
            self.client.post(self.url("api/signup")).json(request),
        )
        .await?;
        Ok(())
    }

    async fn log_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, CollectorError> {
        debug!(username = %username, "Logging in");
        let response = self
            .send(
                "login",
                self.client
                    .post(self.url("api/login"))
                    .json(&json!({ "username": username, "password": password })),
            )
            .await?;
        Self::parse("login", response).await
    }

    async fn create_game(
        &self,
        auth: &str,
        title: &str,
    ) -> Result<CreatedResource, CollectorError> {
        debug!(title = %title, "Creating game");
        let response = self
            .send(
                "games",
                self.client
                    .post(self.url("api/proxy/gleaner/games"))
                    .header("Authorization", auth)
                    .json(&json!({ "title": title })),
            )
            .await?;
        Self::parse("games", response).await
    }

    async fn publish_game(&self, auth: &str, game_id: &str) -> Result<(), CollectorError> {
        debug!(game_id = %game_id, "Marking game public");
        self.send(
            "games",
            self.client
                .put(self.url(&format!("api/proxy/gleaner/games/{}", game_id)))
                .header("Authorization", auth)
                .json(&json!({ "public": true })),
        )
        .await?;
        Ok(())
    }

    async fn create_version(
        &self,
        auth: &str,
        game_id: &str,
    ) -> Result<VersionResponse, CollectorError> {
        debug!(game_id = %game_id, "Creating game version");
        let response = self
            .send(
                "versions",
                self.client
                    .post(self.url(&format!("api/proxy/gleaner/games/{}/versions", game_id)))
                    .header("Authorization", auth)
                    .json(&json!({})),
            )
            .await?;
        Self::parse("versions", response).await
    }

    async fn create_class(
        &self,
        auth: &str,
        game_id: &str,
        version_id: &str,
        name: &str,
    ) -> Result<CreatedResource, CollectorError> {
        debug!(game_id = %game_id, version_id = %version_id, "Creating class");
        let response = self
            .send(
                "classes",
                self.client
                    .post(self.url(&format!(
                        "api/proxy/gleaner/games/{}/versions/{}/classes",
                        game_id, version_id
                    )))
                    .header("Authorization", auth)
                    .json(&json!({ "name": name })),
            )
            .await?;
        Self::parse("classes", response).await
    }

    async fn create_session(
        &self,
        auth: &str,
        game_id: &str,
        version_id: &str,
        class_id: &str,
        name: &str,
    ) -> Result<CreatedResource, CollectorError> {
        debug!(class_id = %class_id, "Creating session");
        let response = self
            .send(
                "sessions",
                self.client
                    .post(self.url(&format!(
                        "api/proxy/gleaner/games/{}/versions/{}/classes/{}/sessions",
                        game_id, version_id, class_id
                    )))
                    .header("Authorization", auth)
                    .json(&json!({ "name": name })),
            )
            .await?;
        Self::parse("sessions", response).await
    }

    async fn create_activity(
        &self,
        auth: &str,
        name: &str,
        game_id: &str,
        version_id: &str,
        class_id: &str,
    ) -> Result<CreatedResource, CollectorError> {
        debug!(class_id = %class_id, "Creating activity");
        let response = self
            .send(
                "activities",
                self.client
                    .post(self.url("api/proxy/gleaner/activities"))
                    .header("Authorization", auth)
                    .json(&json!({
                        "name": name,
                        "gameId": game_id,
                        "versionId": version_id,
                        "classId": class_id,
                    })),
            )
            .await?;
        Self::parse("activities", response).await
    }

    async fn allow_anonymous(
        &self,
        auth: &str,
        target: StartTarget,
        id: &str,
    ) -> Result<(), CollectorError> {
        debug!(resource = target.path_segment(), id = %id, "Allowing anonymous participation");
        self.send(
            target.path_segment(),
            self.client
                .put(self.url(&format!(
                    "api/proxy/gleaner/{}/{}",
                    target.path_segment(),
                    id
                )))
                .header("Authorization", auth)
                .json(&json!({ "allowAnonymous": true })),
        )
        .await?;
        Ok(())
    }

    async fn start_event(
        &self,
        auth: &str,
        target: StartTarget,
        id: &str,
    ) -> Result<(), CollectorError> {
        debug!(resource = target.path_segment(), id = %id, "Starting");
        self.send(
            "event/start",
            self.client
                .post(self.url(&format!(
                    "api/proxy/gleaner/{}/{}/event/start",
                    target.path_segment(),
                    id
                )))
                .header("Authorization", auth)
                .json(&json!({})),
        )
        .await?;
        Ok(())
    }

    async fn collector_start(&self, tracking_code: &str) -> Result<StartResponse, CollectorError> {
        debug!(tracking_code = %tracking_code, "Starting collection");
        let response = self
            .send(
                "start",
                self.client.post(self.url(&format!(
                    "api/proxy/gleaner/collector/start/{}",
                    tracking_code
                ))),
            )
            .await?;
        Self::parse("start", response).await
    }

    async fn collector_track(
        &self,
        auth_token: &str,
        statements: &[Statement],
    ) -> Result<(), CollectorError> {
        debug!(count = statements.len(), "Tracking statements");
        self.send(
            "track",
            self.client
                .post(self.url("api/proxy/gleaner/collector/track"))
                .header("Authorization", auth_token)
                .json(&statements),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let collector = HttpCollector::new(CollectorConfig::new("http://localhost:3000")).unwrap();
        assert_eq!(
            collector.url("api/signup"),
            "http://localhost:3000/api/signup"
        );
    }
}
