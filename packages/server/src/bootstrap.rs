//! Composition root: wires repository, pusher, use cases and the server.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;
use utage_shared::time::SystemClock;

use crate::{
    domain::ProtocolVariant,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryQueueRepository},
    ui::{EventLoop, Server},
    usecase::{
        AddItemUseCase, ClearQueueUseCase, ConnectClientUseCase, DisconnectClientUseCase,
        GetConnectionsUseCase, GetQueueStateUseCase, MessageRouter, PlayVideoUseCase,
        ReplaceQueueUseCase,
    },
};

/// Build a ready-to-run server speaking the given protocol variant
pub fn build_server(variant: ProtocolVariant) -> Server {
    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. MessageRouter + EventLoop
    // 5. Server

    // 1. Create Repository (in-memory, one queue per process)
    let repository = Arc::new(InMemoryQueueRepository::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(
        Arc::new(Mutex::new(HashMap::new())),
        variant,
    ));

    // 3. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        Arc::new(SystemClock),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(message_pusher.clone()));
    let add_item_usecase = Arc::new(AddItemUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let replace_queue_usecase = Arc::new(ReplaceQueueUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let play_video_usecase = Arc::new(PlayVideoUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let clear_queue_usecase = Arc::new(ClearQueueUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_queue_state_usecase = Arc::new(GetQueueStateUseCase::new(repository));
    let get_connections_usecase = Arc::new(GetConnectionsUseCase::new(message_pusher));

    // 4. Create MessageRouter and the event loop that drives it
    let message_router = Arc::new(MessageRouter::new(
        variant,
        add_item_usecase,
        replace_queue_usecase,
        play_video_usecase,
        clear_queue_usecase,
    ));
    let (event_loop, event_loop_handle) = EventLoop::new(
        connect_client_usecase,
        disconnect_client_usecase,
        message_router,
    );

    // 5. Create the server
    Server::new(
        event_loop,
        event_loop_handle,
        get_queue_state_usecase,
        get_connections_usecase,
    )
}
