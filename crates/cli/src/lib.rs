pub mod browser;
pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
