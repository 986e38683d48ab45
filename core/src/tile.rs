use serde::{Deserialize, Serialize};

use crate::Direction;

/// Every kind of content a board cell can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Blank,
    Block,
    Cracked,
    Hole,
    Drill,
    Arrow(Direction),
    DoubleArrow(Direction),
}

impl Tile {
    /// All thirteen kinds, in palette order.
    pub const ALL: [Tile; 13] = [
        Self::Blank,
        Self::Block,
        Self::Cracked,
        Self::Hole,
        Self::Drill,
        Self::Arrow(Direction::Up),
        Self::Arrow(Direction::Down),
        Self::Arrow(Direction::Left),
        Self::Arrow(Direction::Right),
        Self::DoubleArrow(Direction::Up),
        Self::DoubleArrow(Direction::Down),
        Self::DoubleArrow(Direction::Left),
        Self::DoubleArrow(Direction::Right),
    ];

    pub const fn is_arrow(self) -> bool {
        matches!(self, Self::Arrow(_) | Self::DoubleArrow(_))
    }

    pub const fn is_double_arrow(self) -> bool {
        matches!(self, Self::DoubleArrow(_))
    }

    /// Whether the tile takes part in a push chain. The level is won once none remain.
    pub const fn is_pushable(self) -> bool {
        use Tile::*;
        match self {
            Block | Cracked | Drill | Arrow(_) | DoubleArrow(_) => true,
            Blank | Hole => false,
        }
    }

    /// Destroyed by tapping it directly instead of by pushing.
    pub const fn is_breakable(self) -> bool {
        matches!(self, Self::Cracked | Self::Drill)
    }

    /// Direction an arrow pushes in, `None` for every other kind.
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Arrow(dir) | Self::DoubleArrow(dir) => Some(dir),
            _ => None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Blank
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_matches_vocabulary() {
        let arrows = Tile::ALL.iter().filter(|t| t.is_arrow()).count();
        let doubles = Tile::ALL.iter().filter(|t| t.is_double_arrow()).count();
        let pushable = Tile::ALL.iter().filter(|t| t.is_pushable()).count();

        assert_eq!(arrows, 8);
        assert_eq!(doubles, 4);
        assert_eq!(pushable, 11);
        assert!(!Tile::Hole.is_pushable());
        assert!(!Tile::Blank.is_pushable());
        assert!(Tile::Drill.is_pushable());
    }

    #[test]
    fn direction_only_for_arrows() {
        assert_eq!(Tile::Arrow(Direction::Up).direction(), Some(Direction::Up));
        assert_eq!(
            Tile::DoubleArrow(Direction::Left).direction(),
            Some(Direction::Left)
        );
        assert_eq!(Tile::Block.direction(), None);
        assert_eq!(Direction::Up.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (0, 1));
    }
}
