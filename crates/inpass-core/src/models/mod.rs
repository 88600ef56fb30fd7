//! Data models: the extracted passport record and pipeline configuration.

pub mod config;
pub mod passport;
