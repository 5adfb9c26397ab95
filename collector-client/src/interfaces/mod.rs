mod collector_api;

pub use collector_api::CollectorApi;
