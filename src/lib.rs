pub mod agent;
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod data_models;
pub mod error;
pub mod logging;
pub mod search;
pub mod summarizer;
