//! Collector API trait definition.
//!
//! This module defines the abstract interface for the collector service,
//! allowing the live HTTP client and the in-memory mock to be swapped behind
//! `Arc<dyn CollectorApi>`.

use async_trait::async_trait;

use crate::errors::CollectorError;
use crate::types::{
    CreatedResource, LoginResponse, SignUpRequest, StartResponse, StartTarget, VersionResponse,
};
use trace_soak_shared::types::Statement;

/// Abstracts the statement collector service.
///
/// Bootstrap endpoints (account and resource creation) take a bearer token in
/// `auth`; the two collector endpoints follow their own scheme: `start` is
/// unauthenticated and `track` sends the session token verbatim in the
/// `Authorization` header.
///
/// All methods treat any non-200 response as an error; no call is retried.
#[async_trait]
pub trait CollectorApi: Send + Sync {
    /// Register a new account.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), CollectorError>;

    /// Authenticate an account, yielding the login token.
    async fn log_in(&self, username: &str, password: &str)
        -> Result<LoginResponse, CollectorError>;

    /// Create a game owned by the authenticated developer.
    async fn create_game(&self, auth: &str, title: &str)
        -> Result<CreatedResource, CollectorError>;

    /// Mark a game as publicly visible.
    async fn publish_game(&self, auth: &str, game_id: &str) -> Result<(), CollectorError>;

    /// Create a version of a game; the response carries the tracking code
    /// other clients use to address the session.
    async fn create_version(
        &self,
        auth: &str,
        game_id: &str,
    ) -> Result<VersionResponse, CollectorError>;

    /// Create a class under a game version.
    async fn create_class(
        &self,
        auth: &str,
        game_id: &str,
        version_id: &str,
        name: &str,
    ) -> Result<CreatedResource, CollectorError>;

    /// Create a session under a class (class+session protocol variant).
    async fn create_session(
        &self,
        auth: &str,
        game_id: &str,
        version_id: &str,
        class_id: &str,
        name: &str,
    ) -> Result<CreatedResource, CollectorError>;

    /// Create an activity referencing a game, version, and class
    /// (class+activity protocol variant).
    async fn create_activity(
        &self,
        auth: &str,
        name: &str,
        game_id: &str,
        version_id: &str,
        class_id: &str,
    ) -> Result<CreatedResource, CollectorError>;

    /// Enable anonymous participation on a session or activity.
    async fn allow_anonymous(
        &self,
        auth: &str,
        target: StartTarget,
        id: &str,
    ) -> Result<(), CollectorError>;

    /// Start a session or activity. Required before the collector accepts
    /// tracked statements against its tracking code.
    async fn start_event(
        &self,
        auth: &str,
        target: StartTarget,
        id: &str,
    ) -> Result<(), CollectorError>;

    /// Open a collection session for a tracking code, yielding the auth token
    /// used for subsequent track calls. Unauthenticated.
    async fn collector_start(&self, tracking_code: &str) -> Result<StartResponse, CollectorError>;

    /// Submit an ordered array of statements under a session token.
    async fn collector_track(
        &self,
        auth_token: &str,
        statements: &[Statement],
    ) -> Result<(), CollectorError>;
}
