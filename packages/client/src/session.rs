//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use utage_server::infrastructure::dto::websocket::ServerMessage;
use utage_shared::time::now_millis;

use crate::{
    command::parse_command,
    error::ClientError,
    playlist::{Action, Playlist, to_action},
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Run the WebSocket client session
pub async fn run_client_session(url: &str, username: Option<&str>) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let prompt = username.unwrap_or("utage").to_string();
    tracing::info!("Connected to queue server!");
    println!(
        "\nYou are '{}'. Type 'help' for commands. Press Ctrl+C to exit.\n",
        prompt
    );

    let (mut write, mut read) = ws_stream.split();
    let playlist = Arc::new(Mutex::new(Playlist::new()));

    // Spawn a task to handle incoming messages
    let playlist_for_read = playlist.clone();
    let prompt_for_read = prompt.clone();
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(server_msg) => {
                            let mut playlist = playlist_for_read.lock().await;
                            playlist.apply(&server_msg);
                            format_server_message(&server_msg, &playlist)
                        }
                        // If parsing fails, display as raw text
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&prompt_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&prompt_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_for_readline = format!("{}> ", prompt);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt_for_readline) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn typed commands into frames
    let username = username.map(str::to_string);
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let action = {
                let playlist = playlist.lock().await;
                parse_command(&line).and_then(|command| {
                    to_action(command, &playlist, username.as_deref(), &mut rand::rng())
                        .map(|action| (action, playlist.clone()))
                })
            };

            let message = match action {
                Ok((Action::Send(message), _)) => message,
                Ok((Action::ShowQueue, snapshot)) => {
                    print!(
                        "{}",
                        MessageFormatter::format_queue(snapshot.items(), snapshot.current())
                    );
                    redisplay_prompt(&prompt);
                    continue;
                }
                Ok((Action::ShowHelp, _)) => {
                    println!("{}", MessageFormatter::format_help());
                    redisplay_prompt(&prompt);
                    continue;
                }
                Err(e) => {
                    print!("{}", MessageFormatter::format_error(&e.to_string()));
                    redisplay_prompt(&prompt);
                    continue;
                }
            };

            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    }

    Ok(())
}

fn format_server_message(message: &ServerMessage, playlist: &Playlist) -> String {
    let now = now_millis();
    if let Some(video_id) = message.played_video_id() {
        return MessageFormatter::format_now_playing(video_id, now);
    }
    match message {
        ServerMessage::Init { .. } => {
            MessageFormatter::format_init(playlist.items(), playlist.current(), now)
        }
        _ => MessageFormatter::format_queue_updated(playlist.items(), playlist.current(), now),
    }
}
