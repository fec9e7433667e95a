//! polarjoin server: hosts the survey calculator API and the front-end
//! bundle behind one HTTP listener.
#![forbid(unsafe_code)]

pub mod config;
pub mod cors;
pub mod logging;
pub mod server;
pub mod signals;
pub mod web;

pub use config::{AppConfig, CliArgs};
