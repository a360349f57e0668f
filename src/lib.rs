pub mod annotate;
pub mod browser;
pub mod camera;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod frame;
pub mod notify;
pub mod scan_log;
pub mod scanner;
pub mod session;
pub mod ticker;
pub mod ui;
