//! # Trace Soak Pipeline
//! This crate defines the core workflow for soak-testing a statement
//! collector. It includes modules for reading statement batches from a
//! source, normalizing them, bootstrapping a tracking session, delivering
//! batches across rounds, and error handling.
pub mod bootstrap;
pub mod deliverer;
pub mod driver;
pub mod processor;
pub mod source;
pub mod token_cache;

pub mod errors;
