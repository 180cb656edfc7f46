use alloc::vec::Vec;
use core::time::Duration;
use ndarray::Array2;
use rand::{SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Playing (first successful open)
/// - Playing -> Won | Lost
/// - Playing <-> Paused
/// - any -> NotStarted (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    Playing,
    Paused,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Won or lost, only a reset leaves these.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Whether open, flag and chord commands are acted on.
    pub const fn accepts_moves(self) -> bool {
        matches!(self, Self::NotStarted | Self::Playing)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Field {
    Unseeded(Board<Unseeded>),
    Seeded(Board<Seeded>),
}

impl Field {
    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        match self {
            Self::Unseeded(board) => board.validate_coords(coords),
            Self::Seeded(board) => board.validate_coords(coords),
        }
    }

    fn cell(&self, coords: Coord2) -> Cell {
        match self {
            Self::Unseeded(board) => board[coords],
            Self::Seeded(board) => board[coords],
        }
    }

    fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        match self {
            Self::Unseeded(board) => board.toggle_flag(coords),
            Self::Seeded(board) => board.toggle_flag(coords),
        }
    }
}

/// Read-only picture of a session for renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub state: GameState,
    pub cells: Array2<CellView>,
    pub cells_opened: CellCount,
    pub cells_flagged: CellCount,
    pub elapsed: Duration,
    pub mines_left: isize,
}

/// One game from first click to win or loss, and every game after it through
/// [`Session::reset`].
///
/// The session owns the board exclusively. Collaborators send commands and read
/// back [`CellView`]s or a [`Snapshot`], never the board itself.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    field: Field,
    /// Fixed layout replayed on reset, when the session was built from one.
    preset: Option<Board<Seeded>>,
    state: GameState,
    cells_opened: CellCount,
    cells_flagged: CellCount,
    elapsed: Duration,
    triggered: Vec<Coord2>,
    rng: SmallRng,
}

impl Session {
    /// Starts a session whose mines are placed on the first open, seeded by `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            field: Field::Unseeded(Board::<Unseeded>::blank(config.size())),
            preset: None,
            state: GameState::NotStarted,
            cells_opened: 0,
            cells_flagged: 0,
            elapsed: Duration::ZERO,
            triggered: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Starts a session on a fixed mine layout. There is no exclusion zone, the
    /// first open may hit a mine.
    pub fn with_layout(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let board = Board::<Seeded>::from_mine_coords(size, mine_coords)?;
        let config = GameConfig::new_unchecked(size, board.mine_count());
        let mut session = Self::new(config, 0);
        session.field = Field::Seeded(board.clone());
        session.preset = Some(board);
        Ok(session)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn cells_opened(&self) -> CellCount {
        self.cells_opened
    }

    pub fn cells_flagged(&self) -> CellCount {
        self.cells_flagged
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.cells_flagged as isize)
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self.field, Field::Seeded(_))
    }

    /// Advances the session timer, only while playing.
    pub fn advance(&mut self, delta: Duration) {
        if matches!(self.state, GameState::Playing) {
            self.elapsed = self.elapsed.saturating_add(delta);
        }
    }

    pub fn pause(&mut self) -> bool {
        if matches!(self.state, GameState::Playing) {
            log::debug!("paused after {:?}", self.elapsed);
            self.state = GameState::Paused;
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if matches!(self.state, GameState::Paused) {
            log::debug!("resumed");
            self.state = GameState::Playing;
            true
        } else {
            false
        }
    }

    /// Discards the board and starts over with the same configuration.
    pub fn reset(&mut self) {
        self.field = match &self.preset {
            Some(board) => Field::Seeded(board.clone()),
            None => Field::Unseeded(Board::<Unseeded>::blank(self.config.size())),
        };
        self.state = GameState::NotStarted;
        self.cells_opened = 0;
        self.cells_flagged = 0;
        self.elapsed = Duration::ZERO;
        self.triggered.clear();
        log::debug!("reset {:?}", self.config);
    }

    /// Starts over with a different configuration, mines placed lazily again.
    pub fn new_game(&mut self, config: GameConfig) {
        self.config = config;
        self.preset = None;
        self.reset();
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.field.validate_coords(coords)?;
        Ok(self.view_at(coords))
    }

    pub fn snapshot(&self) -> Snapshot {
        let cells = Array2::from_shape_fn(self.size().to_nd_index(), |(x, y)| {
            // the shape comes from Coord dimensions
            self.view_at((x as Coord, y as Coord))
        });
        Snapshot {
            size: self.size(),
            state: self.state,
            cells,
            cells_opened: self.cells_opened,
            cells_flagged: self.cells_flagged,
            elapsed: self.elapsed,
            mines_left: self.mines_left(),
        }
    }

    /// Mines and wrong flags of a lost game, `None` unless the state is `Lost`.
    pub fn loss_report(&self) -> Option<LossReport> {
        match (&self.field, self.state) {
            (Field::Seeded(board), GameState::Lost) => Some(LossReport {
                triggered: self.triggered.clone(),
                mines: board.mine_coords(),
                incorrect_flags: board.incorrect_flags(),
            }),
            _ => None,
        }
    }

    /// Flag or unflag a closed cell
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.field.validate_coords(coords)?;
        if !self.state.accepts_moves() {
            return Ok(MarkOutcome::NoChange);
        }

        let outcome = self.field.toggle_flag(coords)?;
        match outcome {
            MarkOutcome::Flagged => self.cells_flagged += 1,
            MarkOutcome::Unflagged => self.cells_flagged -= 1,
            MarkOutcome::NoChange => {}
        }
        Ok(outcome)
    }

    /// Open a closed cell, placing mines first when this is the first open
    pub fn open(&mut self, coords: Coord2) -> Result<OpenResult> {
        let coords = self.field.validate_coords(coords)?;
        if !self.state.accepts_moves() || !self.field.cell(coords).is_openable() {
            return Ok(OpenResult::unchanged(self.state));
        }

        if self.state.is_initial() {
            self.seed_around(coords)?;
            log::debug!("started at {:?}", coords);
            self.state = GameState::Playing;
        }

        let mut result = OpenResult::unchanged(self.state);
        let outcome = self.reveal_into(coords, &mut result);
        result.outcome = outcome;
        Ok(self.settle(result))
    }

    /// Open every unflagged neighbor of a numbered cell whose flagged neighbors
    /// match its number exactly
    pub fn chord(&mut self, coords: Coord2) -> Result<OpenResult> {
        let coords = self.field.validate_coords(coords)?;
        let unchanged = OpenResult::unchanged(self.state);
        if !matches!(self.state, GameState::Playing) {
            return Ok(unchanged);
        }
        let Field::Seeded(board) = &self.field else {
            return Ok(unchanged);
        };

        let cell = board[coords];
        let adjacent = board.adjacent_mine_count(coords);
        if !cell.is_opened()
            || board.is_mine(coords)
            || adjacent == 0
            || board.count_flagged_neighbors(coords) != adjacent
        {
            return Ok(unchanged);
        }

        let targets: Vec<_> = board
            .iter_neighbors(coords)
            .filter(|&pos| board[pos].is_openable())
            .collect();
        log::debug!("chord at {:?} opens {} neighbors", coords, targets.len());

        let mut result = unchanged;
        let mut outcome = Outcome::NoChange;
        for pos in targets {
            outcome = outcome | self.reveal_into(pos, &mut result);
        }
        result.outcome = outcome;
        Ok(self.settle(result))
    }

    fn seed_around(&mut self, safe: Coord2) -> Result<()> {
        if let Field::Unseeded(board) = &self.field {
            let seeded = board.place_mines(self.config.mines(), safe, &mut self.rng)?;
            self.field = Field::Seeded(seeded);
        }
        Ok(())
    }

    fn reveal_into(&mut self, coords: Coord2, result: &mut OpenResult) -> Outcome {
        let Field::Seeded(board) = &mut self.field else {
            return Outcome::NoChange;
        };

        match board.reveal(coords, &mut result.opened) {
            Reveal::Blocked => Outcome::NoChange,
            Reveal::Safe { opened } => {
                self.cells_opened += opened;
                Outcome::Revealed
            }
            Reveal::Mine => {
                result.mines_hit.push(coords);
                Outcome::HitMine
            }
        }
    }

    /// Applies the end-of-command win and loss checks
    fn settle(&mut self, mut result: OpenResult) -> OpenResult {
        if !result.mines_hit.is_empty() {
            self.triggered.extend_from_slice(&result.mines_hit);
            self.end_game(false);
            result.loss = self.loss_report();
        } else if self.cells_opened == self.config.safe_cells() {
            self.end_game(true);
            result.outcome = result.outcome | Outcome::Won;
        }
        result.state = self.state;
        result
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!(
            "ended {:?} with {} cells opened after {:?}",
            self.state,
            self.cells_opened,
            self.elapsed
        );
    }

    fn view_at(&self, coords: Coord2) -> CellView {
        use CellView::*;

        let cell = self.field.cell(coords);
        let Field::Seeded(board) = &self.field else {
            return if cell.is_flagged() { Flagged } else { Hidden };
        };
        let mine = board.is_mine(coords);

        match (self.state, mine) {
            (GameState::Lost, true) if cell.is_opened() => TriggeredMine,
            (GameState::Lost, true) if cell.is_flagged() => Flagged,
            (GameState::Lost, true) => Mine,
            (GameState::Lost, false) if cell.is_flagged() => IncorrectFlag,
            (GameState::Won, true) => Flagged,
            _ if cell.is_opened() => Opened(board.adjacent_mine_count(coords)),
            _ if cell.is_flagged() => Flagged,
            _ => Hidden,
        }
    }
}
