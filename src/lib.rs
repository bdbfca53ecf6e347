pub mod cli;
pub mod collect;
pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod numeric;
pub mod output;
pub mod profile;
pub mod readers;
