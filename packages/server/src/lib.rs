//! Queue synchronization hub library.
//!
//! Holds one shared playlist and one "now playing" pointer, applies mutation
//! messages from any WebSocket client and rebroadcasts the resulting state to
//! every connected client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// composition root
pub mod bootstrap;
