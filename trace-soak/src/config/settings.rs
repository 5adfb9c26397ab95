//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use trace_soak_pipeline::bootstrap::ProtocolVariant;
use trace_soak_pipeline::driver::{FailurePolicy, SendMode, DEFAULT_SEND_DELAY};
use trace_soak_shared::types::Credentials;

/// Default collector base URL.
const DEFAULT_HOST: &str = "http://localhost:3000/";

/// Default statements directory.
const DEFAULT_STATEMENTS_DIR: &str = "statements";

const DEFAULT_DEV_USERNAME: &str = "tempdev1";
const DEFAULT_DEV_PASSWORD: &str = "dev";
const DEFAULT_DEV_ROLE: &str = "developer";
const DEFAULT_TEACHER_USERNAME: &str = "tempteacher2";
const DEFAULT_TEACHER_PASSWORD: &str = "tea";
const DEFAULT_TEACHER_ROLE: &str = "teacher";

/// Immutable run configuration, populated once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Collector base URL.
    pub host: String,
    /// Directory the statement batches are read from.
    pub statements_dir: PathBuf,
    /// How many times to send the whole source.
    pub rounds: u32,
    /// When present, bootstrap is skipped and statements are sent directly
    /// against this code.
    pub tracking_code: Option<String>,
    pub developer: Credentials,
    pub teacher: Credentials,
    pub variant: ProtocolVariant,
    pub send_mode: SendMode,
    pub send_delay: Duration,
    pub failure_policy: FailurePolicy,
    /// Prefix actor names with the round index.
    pub prefix_actor_names: bool,
    /// Attach randomized experiment extensions to every statement.
    pub experiment_extensions: bool,
    /// Overwrite statement actors with the collector's canonical descriptor.
    pub stamp_canonical_actor: bool,
}

impl Config {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HOST`: collector base URL (default: http://localhost:3000/)
    /// - `STATEMENTS_DIR`: statements directory (default: statements)
    /// - `ROUNDS`: round count, floored at 1 (default: 1)
    /// - `TRACKING_CODE`: externally supplied tracking code; skips bootstrap
    /// - `DEV_USERNAME` / `DEV_PASSWORD` / `DEV_ROLE`: developer account
    /// - `TEACHER_USERNAME` / `TEACHER_PASSWORD` / `TEACHER_ROLE`: teacher account
    /// - `PROTOCOL_VARIANT`: "class-session" or "class-activity" (default: class-session)
    /// - `SEND_MODE`: "per-statement" or "per-batch" (default: per-statement)
    /// - `SEND_DELAY_MS`: inter-send delay in milliseconds (default: 750)
    /// - `FAILURE_POLICY`: "skip" or "fail-fast" (default: skip)
    /// - `ROUND_PREFIX`: prefix actor names per round (default: true)
    /// - `EXPERIMENTAL_EXTENSIONS`: attach experiment extensions (default: false)
    /// - `STAMP_ACTOR`: stamp the canonical actor (default: false)
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            statements_dir: env::var("STATEMENTS_DIR")
                .unwrap_or_else(|_| DEFAULT_STATEMENTS_DIR.to_string())
                .into(),
            rounds: parse_rounds(env::var("ROUNDS").ok().as_deref()),
            tracking_code: env::var("TRACKING_CODE").ok().filter(|c| !c.is_empty()),
            developer: Credentials::new(
                env::var("DEV_USERNAME").unwrap_or_else(|_| DEFAULT_DEV_USERNAME.to_string()),
                env::var("DEV_PASSWORD").unwrap_or_else(|_| DEFAULT_DEV_PASSWORD.to_string()),
                env::var("DEV_ROLE").unwrap_or_else(|_| DEFAULT_DEV_ROLE.to_string()),
            ),
            teacher: Credentials::new(
                env::var("TEACHER_USERNAME")
                    .unwrap_or_else(|_| DEFAULT_TEACHER_USERNAME.to_string()),
                env::var("TEACHER_PASSWORD")
                    .unwrap_or_else(|_| DEFAULT_TEACHER_PASSWORD.to_string()),
                env::var("TEACHER_ROLE").unwrap_or_else(|_| DEFAULT_TEACHER_ROLE.to_string()),
            ),
            variant: parse_variant(env::var("PROTOCOL_VARIANT").ok().as_deref()),
            send_mode: parse_send_mode(env::var("SEND_MODE").ok().as_deref()),
            send_delay: parse_send_delay(env::var("SEND_DELAY_MS").ok().as_deref()),
            failure_policy: parse_failure_policy(env::var("FAILURE_POLICY").ok().as_deref()),
            prefix_actor_names: parse_bool(env::var("ROUND_PREFIX").ok().as_deref(), true),
            experiment_extensions: parse_bool(
                env::var("EXPERIMENTAL_EXTENSIONS").ok().as_deref(),
                false,
            ),
            stamp_canonical_actor: parse_bool(env::var("STAMP_ACTOR").ok().as_deref(), false),
        }
    }
}

fn parse_rounds(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.parse::<u32>().ok()).unwrap_or(1).max(1)
}

fn parse_send_delay(raw: Option<&str>) -> Duration {
    raw.and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_SEND_DELAY)
}

fn parse_variant(raw: Option<&str>) -> ProtocolVariant {
    match raw.map(str::to_lowercase).as_deref() {
        None | Some("class-session") | Some("class_session") | Some("session") => {
            ProtocolVariant::ClassSession
        }
        Some("class-activity") | Some("class_activity") | Some("activity") => {
            ProtocolVariant::ClassActivity
        }
        Some(_) => {
            warn!("Invalid PROTOCOL_VARIANT, defaulting to 'class-session'");
            ProtocolVariant::ClassSession
        }
    }
}

fn parse_send_mode(raw: Option<&str>) -> SendMode {
    match raw.map(str::to_lowercase).as_deref() {
        None | Some("per-statement") | Some("per_statement") | Some("statement") => {
            SendMode::PerStatement
        }
        Some("per-batch") | Some("per_batch") | Some("batch") => SendMode::PerBatch,
        Some(_) => {
            warn!("Invalid SEND_MODE, defaulting to 'per-statement'");
            SendMode::PerStatement
        }
    }
}

fn parse_failure_policy(raw: Option<&str>) -> FailurePolicy {
    match raw.map(str::to_lowercase).as_deref() {
        None | Some("skip") | Some("skip-and-continue") => FailurePolicy::SkipAndContinue,
        Some("fail-fast") | Some("failfast") | Some("fail_fast") => FailurePolicy::FailFast,
        Some(_) => {
            warn!("Invalid FAILURE_POLICY, defaulting to 'skip'");
            FailurePolicy::SkipAndContinue
        }
    }
}

fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw.map(str::to_lowercase).as_deref() {
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        _ => default,
    }
}
