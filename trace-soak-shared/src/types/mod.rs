mod actor;
mod batch;
mod credentials;
mod statement;
mod tracking;

pub use actor::Actor;
pub use batch::Batch;
pub use credentials::Credentials;
pub use statement::{ObjectDefinition, Statement, StatementObject, StatementResult};
pub use tracking::TrackingContext;
