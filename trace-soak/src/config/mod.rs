//! Configuration module for the trace-soak client.
//! Defines the environment-backed settings and wires up application
//! dependencies.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::Config;
