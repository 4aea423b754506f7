pub mod args;
pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod readwrite;
pub mod runner;
