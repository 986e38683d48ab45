//! Shapes of the values the host keeps in its key-value store.

use serde::{Deserialize, Serialize};
use tileslide_core::{
    Board, Count, DEFAULT_MAX_MOVES, DEFAULT_TIMER_SECONDS, Leaderboard, LeaderboardEntry, Level,
};

use crate::Result;

/// Stored form of a published level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelRecord {
    #[serde(rename = "levelData")]
    pub level_data: LevelData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<Count>,
    #[serde(rename = "builtBy", default, skip_serializing_if = "Option::is_none")]
    pub built_by: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_title: Option<String>,
    #[serde(with = "crate::tiles::board_names")]
    pub board: Board,
    #[serde(rename = "maxMoves", default, skip_serializing_if = "Option::is_none")]
    pub max_moves: Option<Count>,
}

impl LevelRecord {
    pub fn from_level(level: &Level) -> Self {
        Self {
            level_data: LevelData {
                level_title: Some(level.title().to_string()),
                board: level.board().clone(),
                max_moves: Some(level.max_moves()),
            },
            timer: Some(level.timer_seconds()),
            built_by: Some(level.author_name().to_string()),
        }
    }

    /// Builds the level, filling in the default budget for missing or zero values.
    pub fn into_level(self) -> Result<Level> {
        let max_moves = self
            .level_data
            .max_moves
            .filter(|&moves| moves > 0)
            .unwrap_or(DEFAULT_MAX_MOVES);
        let timer = self
            .timer
            .filter(|&seconds| seconds > 0)
            .unwrap_or(DEFAULT_TIMER_SECONDS);

        Ok(Level::new(
            self.level_data.level_title.unwrap_or_default(),
            self.level_data.board,
            max_moves,
            timer,
            self.built_by.unwrap_or_default(),
        )?)
    }
}

/// Stored form of one leaderboard entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub player_name: String,
    pub player_score: u32,
    pub level_reached: Count,
}

impl From<LeaderboardEntry> for ScoreRecord {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            player_name: entry.player_name,
            player_score: entry.score,
            level_reached: entry.level_reached,
        }
    }
}

impl From<ScoreRecord> for LeaderboardEntry {
    fn from(record: ScoreRecord) -> Self {
        LeaderboardEntry::new(record.player_name, record.player_score, record.level_reached)
    }
}

/// Decodes a stored level; the empty object `{}` means no level has been published.
pub fn decode_level(json: &str) -> Result<Option<Level>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.as_object().is_some_and(|object| object.is_empty()) || value.is_null() {
        return Ok(None);
    }

    let record: LevelRecord = serde_json::from_value(value)?;
    record.into_level().map(Some)
}

pub fn encode_level(level: Option<&Level>) -> Result<String> {
    match level {
        Some(level) => Ok(serde_json::to_string(&LevelRecord::from_level(level))?),
        None => Ok("{}".to_string()),
    }
}

pub fn decode_leaderboard(json: &str) -> Result<Leaderboard> {
    let records: Vec<ScoreRecord> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .map(LeaderboardEntry::from)
        .collect::<Vec<_>>()
        .into())
}

pub fn encode_leaderboard(leaderboard: &Leaderboard) -> Result<String> {
    let records: Vec<ScoreRecord> = leaderboard
        .entries()
        .iter()
        .cloned()
        .map(ScoreRecord::from)
        .collect();
    Ok(serde_json::to_string(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileslide_core::{Direction, Tile};

    const STORED: &str = r#"{
        "levelData": {
            "level_title": "First steps",
            "board": [
                ["arrow-right", "block", "hole", "blank", "blank", "blank"],
                ["blank", "blank", "blank", "blank", "blank", "blank"],
                ["blank", "blank", "blank", "blank", "blank", "blank"],
                ["blank", "blank", "blank", "blank", "blank", "blank"],
                ["blank", "blank", "blank", "blank", "blank", "blank"],
                ["blank", "blank", "blank", "blank", "blank", "double-arrow-up"]
            ],
            "maxMoves": 4
        },
        "timer": 45,
        "builtBy": "mira"
    }"#;

    #[test]
    fn decodes_stored_level() {
        let level = decode_level(STORED).unwrap().unwrap();

        assert_eq!(level.title(), "First steps");
        assert_eq!(level.max_moves(), 4);
        assert_eq!(level.timer_seconds(), 45);
        assert_eq!(level.author_name(), "mira");
        assert_eq!(level.board()[(0, 0)], Tile::Arrow(Direction::Right));
        assert_eq!(level.board()[(5, 5)], Tile::DoubleArrow(Direction::Up));
    }

    #[test]
    fn empty_object_means_no_level() {
        assert_eq!(decode_level("{}").unwrap(), None);
        assert_eq!(encode_level(None).unwrap(), "{}");
    }

    #[test]
    fn missing_budget_uses_defaults() {
        let json = r#"{"levelData": {"board": [
            ["blank","blank","blank","blank","blank","blank"],
            ["blank","blank","blank","blank","blank","blank"],
            ["blank","blank","blank","blank","blank","blank"],
            ["blank","blank","blank","blank","blank","blank"],
            ["blank","blank","blank","blank","blank","blank"],
            ["blank","blank","blank","blank","blank","blank"]
        ], "maxMoves": 0}}"#;

        let level = decode_level(json).unwrap().unwrap();

        assert_eq!(level.max_moves(), DEFAULT_MAX_MOVES);
        assert_eq!(level.timer_seconds(), DEFAULT_TIMER_SECONDS);
        assert_eq!(level.display_author(), "Anonymous");
        assert_eq!(level.display_title(), "Level by Anonymous");
    }

    #[test]
    fn unknown_tile_is_rejected() {
        let json = STORED.replace("\"block\"", "\"wall\"");
        assert!(decode_level(&json).is_err());
    }

    #[test]
    fn encoded_level_decodes_to_the_same_level() {
        let level = decode_level(STORED).unwrap().unwrap();
        let json = encode_level(Some(&level)).unwrap();
        assert_eq!(decode_level(&json).unwrap(), Some(level));
    }

    #[test]
    fn leaderboard_uses_player_score_field() {
        let board = decode_leaderboard(
            r#"[{"playerName":"A","playerScore":10,"levelReached":1},
                {"playerName":"B","playerScore":30,"levelReached":1}]"#,
        )
        .unwrap();

        assert_eq!(board.len(), 2);
        assert_eq!(board.best_score(), Some(30));
        assert!(encode_leaderboard(&board).unwrap().contains("\"playerScore\":30"));
    }
}
