//! # Trace Soak Shared
//! This crate defines shared data structures used across the trace-soak
//! workspace: statements, actors, batches, tracking contexts, and account
//! credentials.
pub mod types;
