pub mod analytics;
pub mod config;
pub mod fetch;
pub mod output;
pub mod records;
pub mod source;
