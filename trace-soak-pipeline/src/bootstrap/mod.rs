//! Session bootstrapper.
//!
//! Performs the one-time account and resource creation sequence a tracking
//! context requires: developer sign-up/log-in, game + version creation (the
//! version carries the tracking code), teacher sign-up/log-in, class and
//! session/activity creation, and the explicit start event. Each step depends
//! on the previous result; any failure aborts the bootstrap. Resources
//! already created on the collector are left behind, the service owns them.

use std::sync::Arc;

use tracing::info;

use crate::errors::BootstrapError;
use collector_client::{CollectorApi, SignUpRequest, StartTarget};
use trace_soak_shared::types::{Credentials, TrackingContext};

const GAME_TITLE: &str = "Test Game";
const CLASS_NAME: &str = "Test Class";
const SESSION_NAME: &str = "Test Session";
const ACTIVITY_NAME: &str = "Test Activity";

/// Which resource shape the collector deployment expects under a class.
///
/// Older deployments track against a session, newer ones against an
/// activity; both end with an anonymous-participation update and a start
/// event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolVariant {
    #[default]
    ClassSession,
    ClassActivity,
}

/// Builds the tracking context against a collector.
pub struct Bootstrapper {
    collector: Arc<dyn CollectorApi>,
    developer: Credentials,
    teacher: Credentials,
    variant: ProtocolVariant,
}

impl Bootstrapper {
    /// Create a bootstrapper using the default protocol variant.
    pub fn new(
        collector: Arc<dyn CollectorApi>,
        developer: Credentials,
        teacher: Credentials,
    ) -> Self {
        Self::with_variant(collector, developer, teacher, ProtocolVariant::default())
    }

    /// Create a bootstrapper for a specific protocol variant.
    pub fn with_variant(
        collector: Arc<dyn CollectorApi>,
        developer: Credentials,
        teacher: Credentials,
        variant: ProtocolVariant,
    ) -> Self {
        Self {
            collector,
            developer,
            teacher,
            variant,
        }
    }

    /// Run the full bootstrap sequence, yielding the tracking context.
    pub async fn bootstrap(&self) -> Result<TrackingContext, BootstrapError> {
        let dev_auth = self.register_and_log_in(&self.developer).await?;

        let game = self
            .collector
            .create_game(&dev_auth, GAME_TITLE)
            .await
            .map_err(|e| BootstrapError::resource("game", e))?;
        self.collector
            .publish_game(&dev_auth, &game.id)
            .await
            .map_err(|e| BootstrapError::resource("game", e))?;
        info!(game_id = %game.id, "Created game");

        let version = self
            .collector
            .create_version(&dev_auth, &game.id)
            .await
            .map_err(|e| BootstrapError::resource("version", e))?;
        info!(
            version_id = %version.id,
            tracking_code = %version.tracking_code,
            "Created game version"
        );

        let teacher_auth = self.register_and_log_in(&self.teacher).await?;

        let class = self
            .collector
            .create_class(&teacher_auth, &game.id, &version.id, CLASS_NAME)
            .await
            .map_err(|e| BootstrapError::resource("class", e))?;
        info!(class_id = %class.id, "Created class");

        let mut ctx = TrackingContext {
            tracking_code: version.tracking_code,
            game_id: Some(game.id.clone()),
            version_id: Some(version.id.clone()),
            class_id: Some(class.id.clone()),
            session_id: None,
            activity_id: None,
        };

        match self.variant {
            ProtocolVariant::ClassSession => {
                let session = self
                    .collector
                    .create_session(&teacher_auth, &game.id, &version.id, &class.id, SESSION_NAME)
                    .await
                    .map_err(|e| BootstrapError::resource("session", e))?;
                self.activate(&teacher_auth, StartTarget::Session, &session.id)
                    .await?;
                info!(session_id = %session.id, "Session started");
                ctx.session_id = Some(session.id);
            }
            ProtocolVariant::ClassActivity => {
                let activity = self
                    .collector
                    .create_activity(&teacher_auth, ACTIVITY_NAME, &game.id, &version.id, &class.id)
                    .await
                    .map_err(|e| BootstrapError::resource("activity", e))?;
                self.activate(&teacher_auth, StartTarget::Activity, &activity.id)
                    .await?;
                info!(activity_id = %activity.id, "Activity started");
                ctx.activity_id = Some(activity.id);
            }
        }

        Ok(ctx)
    }

    /// Sign up and authenticate one account, yielding its bearer credential.
    async fn register_and_log_in(
        &self,
        credentials: &Credentials,
    ) -> Result<String, BootstrapError> {
        let request = SignUpRequest::from_credentials(credentials);
        self.collector
            .sign_up(&request)
            .await
            .map_err(|e| BootstrapError::registration(&credentials.username, e))?;
        info!(username = %credentials.username, role = %credentials.role, "Signed up");

        let login = self
            .collector
            .log_in(&credentials.username, &credentials.password)
            .await
            .map_err(|e| BootstrapError::auth(&credentials.username, e))?;
        info!(username = %credentials.username, "Logged in");

        Ok(login.bearer_token())
    }

    /// Enable anonymous participation, then start the session/activity.
    async fn activate(
        &self,
        auth: &str,
        target: StartTarget,
        id: &str,
    ) -> Result<(), BootstrapError> {
        let resource = match target {
            StartTarget::Session => "session",
            StartTarget::Activity => "activity",
        };
        self.collector
            .allow_anonymous(auth, target, id)
            .await
            .map_err(|e| BootstrapError::resource(resource, e))?;
        self.collector
            .start_event(auth, target, id)
            .await
            .map_err(|e| BootstrapError::resource(resource, e))?;
        Ok(())
    }
}
