pub mod commands;
pub mod config;
pub mod export;
pub mod formatter;
pub mod logging;
pub mod process_command;
