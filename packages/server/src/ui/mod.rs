//! UI 層（axum による HTTP / WebSocket の入り口）

mod event_loop;
mod handler;
mod server;
mod signal;
pub mod state;

pub use event_loop::{EventLoop, EventLoopClosed, EventLoopHandle, HubEvent};
pub use server::Server;
