pub mod config;
pub mod engine;
pub mod grid;
pub mod pack;
