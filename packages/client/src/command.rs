//! Parsing of the lines typed at the prompt.

use crate::error::ClientError;

/// What the user can ask for from the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a link to the shared queue
    Add(String),
    /// Play the item at a 1-based position in the queue
    PlayIndex(usize),
    /// Play a link (or bare video id) directly
    PlayLink(String),
    /// Remove the item at a 1-based position
    Remove(usize),
    /// Move an item between two 1-based positions
    Move { from: usize, to: usize },
    Shuffle,
    Clear,
    List,
    Help,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, ClientError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "add" | "a" => required(rest, "add <link>").map(|link| Command::Add(link.to_string())),
        "play" | "p" => {
            let target = required(rest, "play <index|link>")?;
            Ok(match target.parse::<usize>() {
                Ok(index) => Command::PlayIndex(position(index)?),
                Err(_) => Command::PlayLink(target.to_string()),
            })
        }
        "remove" | "rm" => {
            let index = parse_position(required(rest, "remove <index>")?)?;
            Ok(Command::Remove(index))
        }
        "move" | "mv" => {
            let mut args = rest.split_whitespace();
            match (args.next(), args.next(), args.next()) {
                (Some(from), Some(to), None) => Ok(Command::Move {
                    from: parse_position(from)?,
                    to: parse_position(to)?,
                }),
                _ => Err(usage("move <from> <to>")),
            }
        }
        "shuffle" => Ok(Command::Shuffle),
        "clear" => Ok(Command::Clear),
        "list" | "ls" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        _ => Err(ClientError::InvalidCommand(format!(
            "unknown command '{}', type 'help' for the list",
            name
        ))),
    }
}

fn required<'a>(rest: &'a str, usage_text: &str) -> Result<&'a str, ClientError> {
    if rest.is_empty() {
        Err(usage(usage_text))
    } else {
        Ok(rest)
    }
}

fn parse_position(value: &str) -> Result<usize, ClientError> {
    let index = value
        .parse::<usize>()
        .map_err(|_| ClientError::InvalidCommand(format!("'{}' is not a position", value)))?;
    position(index)
}

fn position(index: usize) -> Result<usize, ClientError> {
    if index == 0 {
        return Err(ClientError::InvalidCommand(
            "positions start at 1".to_string(),
        ));
    }
    Ok(index)
}

fn usage(text: &str) -> ClientError {
    ClientError::InvalidCommand(format!("usage: {}", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_keeps_link_verbatim() {
        // テスト項目: add はリンクをそのまま保持する
        // given (前提条件):
        let line = "add   https://youtu.be/dQw4w9WgXcQ ";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(Command::Add("https://youtu.be/dQw4w9WgXcQ".to_string()))
        );
    }

    #[test]
    fn test_parse_play_distinguishes_index_and_link() {
        // テスト項目: play は数値なら位置、それ以外ならリンクとして解釈される
        // given (前提条件):
        let by_index = "play 2";
        let by_link = "p dQw4w9WgXcQ";

        // when (操作):
        let index_result = parse_command(by_index);
        let link_result = parse_command(by_link);

        // then (期待する結果):
        assert_eq!(index_result, Ok(Command::PlayIndex(2)));
        assert_eq!(link_result, Ok(Command::PlayLink("dQw4w9WgXcQ".to_string())));
    }

    #[test]
    fn test_parse_move() {
        // テスト項目: move は 2 つの位置を受け取る
        // given (前提条件):
        let line = "move 3 1";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Ok(Command::Move { from: 3, to: 1 }));
    }

    #[test]
    fn test_parse_rejects_missing_or_invalid_arguments() {
        // テスト項目: 引数の欠落や不正な位置はエラーになる
        // given (前提条件):
        let lines = ["add", "play", "remove x", "remove 0", "move 1", "move 1 2 3"];

        // when (操作):
        let results: Vec<_> = lines.iter().map(|line| parse_command(line)).collect();

        // then (期待する結果):
        for (line, result) in lines.iter().zip(results) {
            assert!(
                matches!(result, Err(ClientError::InvalidCommand(_))),
                "'{}' should be rejected",
                line
            );
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        // テスト項目: 未知のコマンドはエラーになる
        // given (前提条件):
        let line = "dance";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidCommand(msg)) if msg.contains("dance")));
    }

    #[test]
    fn test_parse_simple_commands_case_insensitively() {
        // テスト項目: 引数のないコマンドは大文字小文字を区別しない
        // given (前提条件):
        let lines = ["Shuffle", "CLEAR", "ls", "help"];

        // when (操作):
        let results: Vec<_> = lines.iter().map(|line| parse_command(line)).collect();

        // then (期待する結果):
        assert_eq!(
            results,
            vec![
                Ok(Command::Shuffle),
                Ok(Command::Clear),
                Ok(Command::List),
                Ok(Command::Help)
            ]
        );
    }
}
