//! String names of tiles as they appear in stored levels and the palette.

use tileslide_core::{Board, Direction, Tile};

use crate::{ProtocolError, Result};

const TILE_NAMES: [(Tile, &str); 13] = [
    (Tile::Blank, "blank"),
    (Tile::Block, "block"),
    (Tile::Cracked, "cracked"),
    (Tile::Hole, "hole"),
    (Tile::Drill, "drill"),
    (Tile::Arrow(Direction::Up), "arrow-up"),
    (Tile::Arrow(Direction::Down), "arrow-down"),
    (Tile::Arrow(Direction::Left), "arrow-left"),
    (Tile::Arrow(Direction::Right), "arrow-right"),
    (Tile::DoubleArrow(Direction::Up), "double-arrow-up"),
    (Tile::DoubleArrow(Direction::Down), "double-arrow-down"),
    (Tile::DoubleArrow(Direction::Left), "double-arrow-left"),
    (Tile::DoubleArrow(Direction::Right), "double-arrow-right"),
];

pub fn tile_name(tile: Tile) -> &'static str {
    TILE_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == tile)
        .map(|(_, name)| *name)
        .unwrap_or("blank")
}

/// Case-insensitive; underscores are accepted in place of dashes.
pub fn parse_tile(name: &str) -> Result<Tile> {
    let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
    TILE_NAMES
        .iter()
        .find(|(_, candidate)| *candidate == normalized)
        .map(|(tile, _)| *tile)
        .ok_or_else(|| ProtocolError::UnknownTile(name.to_string()))
}

/// Serde adapter storing a [`Board`] as rows of tile names.
pub mod board_names {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        board: &Board,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let rows: Vec<Vec<&str>> = board
            .rows()
            .map(|row| row.map(tile_name).collect())
            .collect();
        rows.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Board, D::Error> {
        let rows = Vec::<Vec<String>>::deserialize(deserializer)?;
        let tiles = rows
            .iter()
            .map(|row| row.iter().map(|name| parse_tile(name)).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()
            .map_err(D::Error::custom)?;
        Board::try_from(tiles).map_err(D::Error::custom)
    }
}
