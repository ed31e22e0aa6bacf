// src/lib.rs
pub mod app;
pub mod args;
pub mod config;
pub mod options;
pub mod parsers;
pub mod presentation;
pub mod records;
pub mod report;
pub mod sample;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
