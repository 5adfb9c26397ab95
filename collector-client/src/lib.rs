//! # Collector Client
//!
//! This crate provides traits and implementations for talking to the
//! statement collector service. It includes definitions for errors, the
//! collector API interface, a concrete HTTP implementation, and a mock
//! collector for testing.

pub mod config;
pub mod errors;
pub mod http;
pub mod interfaces;
pub mod mock;
pub mod types;

pub use config::CollectorConfig;
pub use errors::CollectorError;
pub use http::HttpCollector;
pub use interfaces::CollectorApi;
pub use mock::MockCollector;
pub use types::{
    CreatedResource, LoginResponse, SignUpRequest, StartResponse, StartTarget, VersionResponse,
};
