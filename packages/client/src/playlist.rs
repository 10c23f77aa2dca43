//! Local mirror of the shared queue and the commands derived from it.
//!
//! The server only knows `add`, `queue`, `play` and `clear`. Removing, moving and
//! shuffling are computed here against the last state the server reported and sent
//! back as a whole-queue replace.

use rand::{Rng, seq::SliceRandom};
use utage_server::infrastructure::dto::websocket::{
    ClientMessage, QueueItemDto, ServerMessage,
};

use crate::{command::Command, domain::extract_video_id, error::ClientError};

/// Last queue and playback pointer reported by the server
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    items: Vec<QueueItemDto>,
    current: Option<String>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[QueueItemDto] {
        &self.items
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Fold a server message into the mirror
    pub fn apply(&mut self, message: &ServerMessage) {
        match message {
            ServerMessage::Init {
                queue,
                current_video,
            } => {
                self.items = queue.clone();
                self.current = current_video.clone();
            }
            ServerMessage::Queue { queue } => self.items = queue.clone(),
            ServerMessage::Play { video_id } | ServerMessage::CurrentVideo { video_id } => {
                self.current = Some(video_id.clone());
            }
        }
    }

    /// Link of the item at a 1-based position
    pub fn link_at(&self, position: usize) -> Result<&str, ClientError> {
        let index = self.index(position)?;
        self.items[index].link().ok_or_else(|| {
            ClientError::InvalidCommand(format!("item {} has no link to play", position))
        })
    }

    /// The queue with the item at `position` removed
    pub fn without(&self, position: usize) -> Result<Vec<QueueItemDto>, ClientError> {
        let index = self.index(position)?;
        let mut items = self.items.clone();
        items.remove(index);
        Ok(items)
    }

    /// The queue with the item at `from` moved to `to`
    pub fn moved(&self, from: usize, to: usize) -> Result<Vec<QueueItemDto>, ClientError> {
        let from = self.index(from)?;
        let to = self.index(to)?;
        let mut items = self.items.clone();
        let item = items.remove(from);
        items.insert(to, item);
        Ok(items)
    }

    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<QueueItemDto> {
        let mut items = self.items.clone();
        items.shuffle(rng);
        items
    }

    fn index(&self, position: usize) -> Result<usize, ClientError> {
        if position == 0 || position > self.items.len() {
            return Err(ClientError::IndexOutOfRange {
                index: position,
                len: self.items.len(),
            });
        }
        Ok(position - 1)
    }
}

/// What a typed command turns into
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send a frame to the server
    Send(ClientMessage),
    /// Print the local mirror
    ShowQueue,
    ShowHelp,
}

/// Turn a command into an action against the current mirror
pub fn to_action<R: Rng + ?Sized>(
    command: Command,
    playlist: &Playlist,
    username: Option<&str>,
    rng: &mut R,
) -> Result<Action, ClientError> {
    let action = match command {
        Command::Add(link) => Action::Send(ClientMessage::Add {
            item: Some(QueueItemDto::new(link, username).0),
        }),
        Command::PlayIndex(position) => play(playlist.link_at(position)?),
        Command::PlayLink(link) => play(&link),
        Command::Remove(position) => replace(playlist.without(position)?),
        Command::Move { from, to } => replace(playlist.moved(from, to)?),
        Command::Shuffle => replace(playlist.shuffled(rng)),
        Command::Clear => Action::Send(ClientMessage::Clear),
        Command::List => Action::ShowQueue,
        Command::Help => Action::ShowHelp,
    };
    Ok(action)
}

fn play(link: &str) -> Action {
    Action::Send(ClientMessage::Play {
        video_id: Some(extract_video_id(link)),
    })
}

fn replace(items: Vec<QueueItemDto>) -> Action {
    Action::Send(ClientMessage::Queue {
        queue: items.into_iter().map(|item| item.0).collect(),
    })
}
