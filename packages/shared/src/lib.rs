//! Utilities shared by the Utage server and client binaries.

pub mod logger;
pub mod time;
