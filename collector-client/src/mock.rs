//! Mock collector for testing and local development.
//!
//! The `MockCollector` answers the whole `CollectorApi` surface from memory,
//! records every call, and can be told to reject individual endpoints, so
//! tests can drive the full bootstrap/delivery flow without a collector
//! service.
//!
//! # Example
//!
//! ```ignore
//! use collector_client::{CollectorApi, MockCollector};
//!
//! let collector = MockCollector::new();
//! collector.reject(endpoints::START);
//!
//! let result = collector.collector_start("code-1").await;
//! assert!(result.is_err());
//! assert_eq!(collector.start_call_count(), 1);
//! ```

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::CollectorError;
use crate::interfaces::CollectorApi;
use crate::types::{
    CreatedResource, LoginResponse, LoginUser, SignUpRequest, StartResponse, StartTarget,
    VersionResponse,
};
use trace_soak_shared::types::{Actor, Statement};

/// Endpoint names accepted by [`MockCollector::reject`].
pub mod endpoints {
    pub const SIGNUP: &str = "signup";
    pub const LOGIN: &str = "login";
    pub const GAMES: &str = "games";
    pub const VERSIONS: &str = "versions";
    pub const CLASSES: &str = "classes";
    pub const SESSIONS: &str = "sessions";
    pub const ACTIVITIES: &str = "activities";
    pub const EVENT_START: &str = "event/start";
    pub const START: &str = "start";
    pub const TRACK: &str = "track";
}

#[derive(Default)]
struct MockState {
    rejections: HashSet<String>,
    /// When set, start calls beyond this count are rejected.
    accept_starts: Option<usize>,
    start_actor: Option<Actor>,
    sign_ups: Vec<SignUpRequest>,
    log_ins: Vec<String>,
    games: Vec<String>,
    versions: Vec<String>,
    classes: Vec<String>,
    sessions: Vec<String>,
    activities: Vec<String>,
    anonymous_allowed: Vec<(StartTarget, String)>,
    started: Vec<(StartTarget, String)>,
    start_calls: Vec<String>,
    tracked: Vec<(String, Vec<Statement>)>,
}

/// In-memory collector that records calls and issues deterministic
/// identifiers (`game-1`, `version-1`, `code-1`, `token-1`, ...).
#[derive(Default)]
pub struct MockCollector {
    state: Mutex<MockState>,
}

impl MockCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject all subsequent calls to the named endpoint with a 400.
    pub fn reject(&self, endpoint: &str) {
        self.state
            .lock()
            .unwrap()
            .rejections
            .insert(endpoint.to_string());
    }

    /// Accept only the first `count` start calls; later ones are rejected.
    pub fn accept_starts(&self, count: usize) {
        self.state.lock().unwrap().accept_starts = Some(count);
    }

    /// Canonical actor returned from start calls.
    pub fn set_start_actor(&self, actor: Actor) {
        self.state.lock().unwrap().start_actor = Some(actor);
    }

    pub fn sign_up_count(&self) -> usize {
        self.state.lock().unwrap().sign_ups.len()
    }

    pub fn log_in_count(&self) -> usize {
        self.state.lock().unwrap().log_ins.len()
    }

    pub fn start_call_count(&self) -> usize {
        self.state.lock().unwrap().start_calls.len()
    }

    pub fn track_call_count(&self) -> usize {
        self.state.lock().unwrap().tracked.len()
    }

    /// Tracking codes passed to start calls, in call order.
    pub fn start_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().start_calls.clone()
    }

    /// Every track call as (auth token, statements), in call order.
    pub fn tracked(&self) -> Vec<(String, Vec<Statement>)> {
        self.state.lock().unwrap().tracked.clone()
    }

    /// All tracked statements flattened, in delivery order.
    pub fn delivered_statements(&self) -> Vec<Statement> {
        self.state
            .lock()
            .unwrap()
            .tracked
            .iter()
            .flat_map(|(_, statements)| statements.clone())
            .collect()
    }

    /// Sign-up requests in call order.
    pub fn sign_ups(&self) -> Vec<SignUpRequest> {
        self.state.lock().unwrap().sign_ups.clone()
    }

    /// Sessions/activities that received an event/start call, in call order.
    pub fn started(&self) -> Vec<(StartTarget, String)> {
        self.state.lock().unwrap().started.clone()
    }

    /// Sessions/activities switched to anonymous participation.
    pub fn anonymous_allowed(&self) -> Vec<(StartTarget, String)> {
        self.state.lock().unwrap().anonymous_allowed.clone()
    }

    fn check(state: &MockState, endpoint: &str) -> Result<(), CollectorError> {
        if state.rejections.contains(endpoint) {
            return Err(CollectorError::rejected(endpoint, 400, "rejected by mock"));
        }
        Ok(())
    }
}

#[async_trait]
impl CollectorApi for MockCollector {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<(), CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, endpoints::SIGNUP)?;
        state.sign_ups.push(request.clone());
        Ok(())
    }

    async fn log_in(
        &self,
        username: &str,
        _password: &str,
    ) -> Result<LoginResponse, CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, endpoints::LOGIN)?;
        state.log_ins.push(username.to_string());
        Ok(LoginResponse {
            user: LoginUser {
                token: format!("login-token-{}", state.log_ins.len()),
            },
        })
    }

    async fn create_game(
        &self,
        _auth: &str,
        _title: &str,
    ) -> Result<CreatedResource, CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, endpoints::GAMES)?;
        let id = format!("game-{}", state.games.len() + 1);
        state.games.push(id.clone());
        Ok(CreatedResource { id })
    }

    async fn publish_game(&self, _auth: &str, _game_id: &str) -> Result<(), CollectorError> {
        let state = self.state.lock().unwrap();
        Self::check(&state, endpoints::GAMES)?;
        Ok(())
    }

    async fn create_version(
        &self,
        _auth: &str,
        _game_id: &str,
    ) -> Result<VersionResponse, CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, endpoints::VERSIONS)?;
        let n = state.versions.len() + 1;
        let id = format!("version-{}", n);
        state.versions.push(id.clone());
        Ok(VersionResponse {
            id,
            tracking_code: format!("code-{}", n),
        })
    }

    async fn create_class(
        &self,
        _auth: &str,
        _game_id: &str,
        _version_id: &str,
        _name: &str,
    ) -> Result<CreatedResource, CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, endpoints::CLASSES)?;
        let id = format!("class-{}", state.classes.len() + 1);
        state.classes.push(id.clone());
        Ok(CreatedResource { id })
    }

    async fn create_session(
        &self,
        _auth: &str,
        _game_id: &str,
        _version_id: &str,
        _class_id: &str,
        _name: &str,
    ) -> Result<CreatedResource, CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, endpoints::SESSIONS)?;
        let id = format!("session-{}", state.sessions.len() + 1);
        state.sessions.push(id.clone());
        Ok(CreatedResource { id })
    }

    async fn create_activity(
        &self,
        _auth: &str,
        _name: &str,
        _game_id: &str,
        _version_id: &str,
        _class_id: &str,
    ) -> Result<CreatedResource, CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, endpoints::ACTIVITIES)?;
        let id = format!("activity-{}", state.activities.len() + 1);
        state.activities.push(id.clone());
        Ok(CreatedResource { id })
    }

    async fn allow_anonymous(
        &self,
        _auth: &str,
        target: StartTarget,
        id: &str,
    ) -> Result<(), CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, target.path_segment())?;
        state.anonymous_allowed.push((target, id.to_string()));
        Ok(())
    }

    async fn start_event(
        &self,
        _auth: &str,
        target: StartTarget,
        id: &str,
    ) -> Result<(), CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, endpoints::EVENT_START)?;
        state.started.push((target, id.to_string()));
        Ok(())
    }

    async fn collector_start(&self, tracking_code: &str) -> Result<StartResponse, CollectorError> {
        let mut state = self.state.lock().unwrap();
        state.start_calls.push(tracking_code.to_string());
        Self::check(&state, endpoints::START)?;
        if let Some(limit) = state.accept_starts {
            if state.start_calls.len() > limit {
                return Err(CollectorError::rejected(
                    endpoints::START,
                    400,
                    "rejected by mock",
                ));
            }
        }
        Ok(StartResponse {
            auth_token: format!("token-{}", state.start_calls.len()),
            actor: state.start_actor.clone(),
        })
    }

    async fn collector_track(
        &self,
        auth_token: &str,
        statements: &[Statement],
    ) -> Result<(), CollectorError> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state, endpoints::TRACK)?;
        state
            .tracked
            .push((auth_token.to_string(), statements.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_issues_sequential_tokens() {
        let collector = MockCollector::new();

        let first = collector.collector_start("code-1").await.unwrap();
        let second = collector.collector_start("code-1").await.unwrap();

        assert_eq!(first.auth_token, "token-1");
        assert_eq!(second.auth_token, "token-2");
        assert_eq!(collector.start_call_count(), 2);
    }

    #[tokio::test]
    async fn test_rejected_endpoint() {
        let collector = MockCollector::new();
        collector.reject(endpoints::SIGNUP);

        let request = SignUpRequest {
            username: "tempdev1".to_string(),
            password: "dev".to_string(),
            email: "tempdev1@email.com".to_string(),
            role: "developer".to_string(),
            prefix: "gleaner".to_string(),
        };
        let result = collector.sign_up(&request).await;

        assert!(matches!(
            result,
            Err(CollectorError::Rejected { status: 400, .. })
        ));
        assert_eq!(collector.sign_up_count(), 0);
    }

    #[tokio::test]
    async fn test_accept_starts_limit() {
        let collector = MockCollector::new();
        collector.accept_starts(1);

        assert!(collector.collector_start("code-1").await.is_ok());
        assert!(collector.collector_start("code-1").await.is_err());
        // Rejected attempts still count as calls.
        assert_eq!(collector.start_call_count(), 2);
    }

    #[tokio::test]
    async fn test_track_records_statements_in_order() {
        let collector = MockCollector::new();
        let statements = vec![Statement::default(), Statement::default()];

        collector.collector_track("token-1", &statements).await.unwrap();

        let tracked = collector.tracked();
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0].0, "token-1");
        assert_eq!(tracked[0].1.len(), 2);
    }
}
