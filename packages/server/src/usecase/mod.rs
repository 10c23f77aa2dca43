//! UseCase 層
//!
//! 1 つの操作につき 1 つのユースケース。`MessageRouter` がメッセージ種別に応じて
//! ミューテーション系のユースケースへ振り分けます。

mod add_item;
mod broadcast;
mod clear_queue;
mod connect_client;
mod disconnect_client;
mod error;
mod get_connections;
mod get_queue_state;
mod message_router;
mod play_video;
mod replace_queue;

pub use add_item::AddItemUseCase;
pub use clear_queue::ClearQueueUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ConnectError, RouteError};
pub use get_connections::GetConnectionsUseCase;
pub use get_queue_state::GetQueueStateUseCase;
pub use message_router::MessageRouter;
pub use play_video::PlayVideoUseCase;
pub use replace_queue::ReplaceQueueUseCase;
