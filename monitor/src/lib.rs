pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod metrics;
pub mod pipeline;
pub mod poller;
pub mod sink;
