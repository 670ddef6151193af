pub mod config;
pub mod story;
