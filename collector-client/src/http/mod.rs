mod client;

pub use client::HttpCollector;
