use clap::{CommandFactory, Parser, Subcommand};
use tileslide_core::{Coord, Count, Tile};

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(
    no_binary_name = true,
    disable_help_subcommand = true,
    help_template = "{subcommands}"
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Back to the menu
    Menu,
    /// Play the published level
    Play,
    /// Open the level builder
    Build,
    /// Tap the tile at ROW COL
    #[command(visible_alias = "t")]
    Tap { row: Coord, col: Coord },
    /// Finish the current move now
    Settle,
    /// Restart the level or test run
    Reset,
    /// Show the board
    #[command(visible_alias = "b")]
    Board,
    /// Show the leaderboard
    Leaders,
    /// Submit a solved run's score, under your username unless NAME is given
    Submit { name: Vec<String> },
    /// Put the selected tile at ROW COL
    #[command(visible_alias = "p")]
    Paint { row: Coord, col: Coord },
    /// Choose a tile: blank, block, cracked, hole, drill, arrow-up, double-arrow-left, ...
    Select {
        #[arg(value_parser = tileslide_protocol::parse_tile)]
        tile: Tile,
    },
    /// Set max moves and timer seconds
    Limits {
        max_moves: Count,
        timer_seconds: Count,
    },
    /// Set the level title
    Title { text: Vec<String> },
    /// Blank the whole board
    Clear,
    /// Start a test run
    Test,
    /// Stop the test run
    Stop,
    /// Publish a verified level
    Publish,
    /// Show this text
    #[command(visible_alias = "?")]
    Help,
    /// Leave
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

impl Command {
    /// Parses one input line; blank lines give `None`. The command word is case-insensitive.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let mut words: Vec<String> = line.split_whitespace().map(String::from).collect();
        let Some(first) = words.first_mut() else {
            return Ok(None);
        };
        *first = first.to_ascii_lowercase();

        Ok(Some(Line::try_parse_from(words)?.command))
    }
}

/// Command list shown by `help`.
pub(crate) fn help() -> String {
    Line::command().render_help().to_string()
}

/// Joins free text split into words back together; no words gives `None`.
pub(crate) fn join_words(words: &[String]) -> Option<String> {
    (!words.is_empty()).then(|| words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileslide_core::Direction;

    #[test]
    fn parses_coordinates() {
        assert_eq!(
            Command::parse("tap 2 3").unwrap(),
            Some(Command::Tap { row: 2, col: 3 })
        );
        assert_eq!(
            Command::parse("  P 0 5 ").unwrap(),
            Some(Command::Paint { row: 0, col: 5 })
        );
        assert!(Command::parse("tap 2").is_err());
        assert!(Command::parse("tap x 1").is_err());
        assert!(Command::parse("tap 300 1").is_err());
    }

    #[test]
    fn parses_tile_names() {
        assert_eq!(
            Command::parse("select double-arrow-left").unwrap(),
            Some(Command::Select {
                tile: Tile::DoubleArrow(Direction::Left)
            })
        );
        assert!(Command::parse("select lava").is_err());
    }

    #[test]
    fn free_text_arguments() {
        let Some(Command::Title { text }) = Command::parse("title  Two holes, one way ").unwrap()
        else {
            panic!("expected a title");
        };
        assert_eq!(join_words(&text).as_deref(), Some("Two holes, one way"));

        assert_eq!(
            Command::parse("submit").unwrap(),
            Some(Command::Submit { name: Vec::new() })
        );
        let Some(Command::Submit { name }) = Command::parse("submit Ana B").unwrap() else {
            panic!("expected a submission");
        };
        assert_eq!(join_words(&name).as_deref(), Some("Ana B"));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("limits 4 20").unwrap(),
            Some(Command::Limits {
                max_moves: 4,
                timer_seconds: 20
            })
        );
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("?").unwrap(), Some(Command::Help));
        assert!(Command::parse("fly").is_err());
    }

    #[test]
    fn help_lists_every_command() {
        let text = help();
        for word in ["tap", "paint", "select", "limits", "publish", "quit"] {
            assert!(text.contains(word), "{} missing from help", word);
        }
    }
}
