use alloc::vec::Vec;
use core::ops::BitOr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of opening a cell or chording around one
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl Outcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use Outcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when a chord opens several cells
impl BitOr for Outcome {
    type Output = Outcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use Outcome::*;
        match (self, rhs) {
            // hitting a mine has priority
            (HitMine, _) | (_, HitMine) => HitMine,
            (Won, _) | (_, Won) => Won,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Everything a renderer needs to draw a lost board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossReport {
    /// Mines the player opened, at least one.
    pub triggered: Vec<Coord2>,
    pub mines: Vec<Coord2>,
    pub incorrect_flags: Vec<Coord2>,
}

/// State changes produced by one `open` or `chord` command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenResult {
    pub outcome: Outcome,
    /// Cells newly opened by this command, in reveal order, mines included.
    pub opened: Vec<Coord2>,
    pub mines_hit: Vec<Coord2>,
    /// Session state after the command.
    pub state: GameState,
    /// Set when this command lost the game.
    pub loss: Option<LossReport>,
}

impl OpenResult {
    pub(crate) const fn unchanged(state: GameState) -> Self {
        Self {
            outcome: Outcome::NoChange,
            opened: Vec::new(),
            mines_hit: Vec::new(),
            state,
            loss: None,
        }
    }

    pub const fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::*;

    #[test]
    fn merge_prefers_mine_then_win() {
        assert_eq!(Revealed | HitMine, HitMine);
        assert_eq!(Won | HitMine, HitMine);
        assert_eq!(Revealed | Won, Won);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(NoChange | NoChange, NoChange);
    }

    #[test]
    fn unchanged_result_has_no_update() {
        let result = OpenResult::unchanged(GameState::Playing);

        assert!(!result.has_update());
        assert!(result.opened.is_empty());
        assert_eq!(result.loss, None);
    }
}
