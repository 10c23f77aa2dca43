//! Message formatting utilities for client display.

use utage_server::infrastructure::dto::websocket::QueueItemDto;
use utage_shared::time::timestamp_to_local_clock;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the snapshot received right after connecting
    ///
    /// # Arguments
    ///
    /// * `items` - The shared queue
    /// * `current` - The video currently playing, if any
    /// * `received_at` - Unix timestamp when the snapshot arrived (milliseconds)
    pub fn format_init(items: &[QueueItemDto], current: Option<&str>, received_at: i64) -> String {
        format!(
            "\n\nJoined at {}\n{}",
            timestamp_to_local_clock(received_at),
            Self::format_queue(items, current)
        )
    }

    /// Format the whole queue, marking the item whose link matches the current video
    pub fn format_queue(items: &[QueueItemDto], current: Option<&str>) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "Now playing: {}\n",
            current.unwrap_or("(nothing)")
        ));
        output.push_str("Queue:\n");

        if items.is_empty() {
            output.push_str("(empty)\n");
        } else {
            for (i, item) in items.iter().enumerate() {
                output.push_str(&Self::format_item(i + 1, item, current));
                output.push('\n');
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    fn format_item(position: usize, item: &QueueItemDto, current: Option<&str>) -> String {
        let marker = match (current, item.link()) {
            (Some(id), Some(link)) if link.contains(id) => "▶",
            _ => " ",
        };
        // エントリは任意の JSON 値なので、読めるものが無ければそのまま表示する
        let label = item
            .title()
            .or_else(|| item.link())
            .map(str::to_string)
            .unwrap_or_else(|| item.0.to_string());
        match item.username().filter(|name| !name.is_empty()) {
            Some(name) => format!("{} {:>2}. {} (by {})", marker, position, label, name),
            None => format!("{} {:>2}. {}", marker, position, label),
        }
    }

    /// Format a queue update notification
    pub fn format_queue_updated(
        items: &[QueueItemDto],
        current: Option<&str>,
        updated_at: i64,
    ) -> String {
        format!(
            "\n\nQueue updated at {}\n{}",
            timestamp_to_local_clock(updated_at),
            Self::format_queue(items, current)
        )
    }

    /// Format a playback notification
    pub fn format_now_playing(video_id: &str, received_at: i64) -> String {
        format!(
            "\n\n▶ Now playing {} (at {})\n",
            video_id,
            timestamp_to_local_clock(received_at)
        )
    }

    /// Format the list of commands
    pub fn format_help() -> String {
        [
            "",
            "Commands (positions start at 1):",
            "  add <link>          append a link to the queue",
            "  play <index|link>   play a queued item or any link / video id",
            "  remove <index>      remove an item",
            "  move <from> <to>    move an item",
            "  shuffle             shuffle the queue",
            "  clear               empty the queue",
            "  list                show the queue",
            "  help                show this help",
            "",
            "remove, move and shuffle resend the whole queue; a server started with",
            "--protocol current-video ignores them.",
            "",
        ]
        .join("\n")
    }

    /// Format a local error (bad command, position out of range)
    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\nReceived binary data: {} bytes\n", byte_count)
    }

    /// Format a raw text message that could not be parsed
    pub fn format_raw_message(text: &str) -> String {
        format!("\nReceived: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(link: &str, username: Option<&str>) -> QueueItemDto {
        QueueItemDto::new(link, username)
    }

    #[test]
    fn test_format_queue_lists_items_with_positions() {
        // テスト項目: キューが 1 始まりの番号と投稿者付きで表示される
        // given (前提条件):
        let items = vec![
            item("https://youtu.be/aaaaaaaaaaa", Some("alice")),
            item("https://youtu.be/bbbbbbbbbbb", None),
        ];

        // when (操作):
        let result = MessageFormatter::format_queue(&items, Some("bbbbbbbbbbb"));

        // then (期待する結果):
        assert!(result.contains("Now playing: bbbbbbbbbbb"));
        assert!(result.contains("  1. https://youtu.be/aaaaaaaaaaa (by alice)"));
        assert!(result.contains("▶  2. https://youtu.be/bbbbbbbbbbb"));
    }

    #[test]
    fn test_format_queue_prefers_title() {
        // テスト項目: タイトルがあればリンクの代わりに表示される
        // given (前提条件):
        let titled = QueueItemDto(serde_json::json!({
            "link": "https://youtu.be/aaaaaaaaaaa",
            "title": "Great song"
        }));

        // when (操作):
        let result = MessageFormatter::format_queue(&[titled], None);

        // then (期待する結果):
        assert!(result.contains("1. Great song"));
        assert!(!result.contains("youtu.be"));
    }

    #[test]
    fn test_format_queue_shows_entries_without_link_verbatim() {
        // テスト項目: link を持たないエントリは JSON のまま表示される
        // given (前提条件):
        let items = vec![
            QueueItemDto(serde_json::json!(42)),
            QueueItemDto(serde_json::json!("bare-link")),
        ];

        // when (操作):
        let result = MessageFormatter::format_queue(&items, None);

        // then (期待する結果):
        assert!(result.contains("1. 42"));
        assert!(result.contains("2. bare-link"));
    }

    #[test]
    fn test_format_empty_queue() {
        // テスト項目: 空のキューと再生中なしが表示される
        // given (前提条件):
        let items: Vec<QueueItemDto> = vec![];

        // when (操作):
        let result = MessageFormatter::format_init(&items, None, 1672498800000);

        // then (期待する結果):
        assert!(result.contains("Joined at"));
        assert!(result.contains("Now playing: (nothing)"));
        assert!(result.contains("(empty)"));
    }

    #[test]
    fn test_format_now_playing() {
        // テスト項目: 再生通知が動画 ID 付きで表示される
        // given (前提条件):
        let video_id = "xyz789";

        // when (操作):
        let result = MessageFormatter::format_now_playing(video_id, 1672498800000);

        // then (期待する結果):
        assert!(result.contains("Now playing xyz789"));
    }

    #[test]
    fn test_format_help_lists_every_command() {
        // テスト項目: ヘルプに全コマンドが載っている
        // given (前提条件):
        let commands = ["add", "play", "remove", "move", "shuffle", "clear", "list", "help"];

        // when (操作):
        let result = MessageFormatter::format_help();

        // then (期待する結果):
        for command in commands {
            assert!(result.contains(&format!("  {} ", command)), "missing {}", command);
        }
        assert!(result.contains("--protocol current-video ignores them"));
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 解釈できないメッセージがそのまま表示される
        // given (前提条件):
        let text = "unknown message format";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(result.contains("unknown message format"));
        assert!(result.contains("Received:"));
    }
}
