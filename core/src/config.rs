use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one session.
///
/// A `GameConfig` obtained through [`GameConfig::new`] always describes a board
/// where lazy mine placement can succeed for any first click.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((width, height): Coord2, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }

        let max = max_mines((width, height));
        if mines > max {
            return Err(GameError::TooManyMines {
                requested: mines,
                max,
            });
        }

        Ok(Self::new_unchecked((width, height), mines))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

/// Largest mine count that still leaves room for the first-click exclusion zone
/// wherever the first click lands.
pub const fn max_mines((width, height): Coord2) -> CellCount {
    let zone_x = if width < 3 { width } else { 3 };
    let zone_y = if height < 3 { height } else { 3 };
    mult(width, height).saturating_sub(mult(zone_x, zone_y))
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Beginner => GameConfig::new_unchecked((9, 9), 10),
            Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Expert => GameConfig::new_unchecked((30, 16), 100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pass_validation() {
        for difficulty in Difficulty::ALL {
            let preset = difficulty.config();
            assert_eq!(GameConfig::new(preset.size(), preset.mines()), Ok(preset));
        }
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            GameConfig::new((0, 5), 1),
            Err(GameError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn mine_count_must_leave_exclusion_zone() {
        assert_eq!(max_mines((9, 9)), 72);
        assert!(GameConfig::new((9, 9), 72).is_ok());
        assert_eq!(
            GameConfig::new((9, 9), 73),
            Err(GameError::TooManyMines {
                requested: 73,
                max: 72
            })
        );
    }

    #[test]
    fn narrow_boards_clip_the_zone() {
        assert_eq!(max_mines((1, 1)), 0);
        assert_eq!(max_mines((2, 2)), 0);
        assert_eq!(max_mines((1, 10)), 7);
        assert_eq!(max_mines((Coord::MAX, Coord::MAX)), 65025 - 9);
    }

    #[test]
    fn safe_cells_excludes_mines() {
        let config = GameConfig::new((30, 16), 100).unwrap();
        assert_eq!(config.total_cells(), 480);
        assert_eq!(config.safe_cells(), 380);
    }
}
