mod collector_error;

pub use collector_error::CollectorError;
