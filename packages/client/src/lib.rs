//! Terminal client for the Utage shared playlist.

pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod playlist;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
