use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;

use crate::*;

/// Board state before the first open: no mines, no adjacency.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unseeded;

/// Board state after mine placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Seeded {
    mine_count: CellCount,
}

/// Fixed-size grid of cells.
///
/// The seeding marker `S` decides what can be read: mines and adjacency
/// counts only exist on a `Board<Seeded>`, which is produced by
/// [`Board::place_mines`] or [`Board::from_mine_coords`].
#[derive(Clone, Debug, PartialEq)]
pub struct Board<S> {
    size: Coord2,
    cells: Array2<Cell>,
    seeding: S,
}

/// What a single reveal request did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Reveal {
    /// The cell was already opened or is flagged.
    Blocked,
    /// Safe cells were opened, cascade included.
    Safe { opened: CellCount },
    /// The cell held a mine and is now opened.
    Mine,
}

impl<S> Board<S> {
    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                coords,
                size: self.size,
            })
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, Cell::is_flagged)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_cells(Cell::is_flagged)
    }

    /// Flips the flag of a closed cell, opened cells are left alone.
    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(if cell.is_opened {
            MarkOutcome::NoChange
        } else if cell.is_flagged {
            cell.is_flagged = false;
            MarkOutcome::Unflagged
        } else {
            cell.is_flagged = true;
            MarkOutcome::Flagged
        })
    }

    fn count_neighbors(&self, coords: Coord2, pred: impl Fn(Cell) -> bool) -> u8 {
        // a Moore neighborhood has at most 8 cells
        self.iter_neighbors(coords)
            .filter(|&pos| pred(self[pos]))
            .count() as u8
    }

    fn count_cells(&self, pred: impl Fn(Cell) -> bool) -> CellCount {
        // bounded by `mult`, which never exceeds CellCount::MAX
        self.cells.iter().filter(|&&cell| pred(cell)).count() as CellCount
    }
}

impl<S> Index<Coord2> for Board<S> {
    type Output = Cell;

    /// Panics when `coords` is out of bounds, see [`Board::cell`] for a checked read.
    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl Board<Unseeded> {
    /// Allocates `width * height` closed cells without mines.
    pub fn new((width, height): Coord2) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(Self::blank((width, height)))
    }

    pub(crate) fn blank(size: Coord2) -> Self {
        Self {
            size,
            cells: Array2::default(size.to_nd_index()),
            seeding: Unseeded,
        }
    }

    /// Places `count` mines uniformly at random outside the 3x3 block around
    /// `safe`, then computes adjacency. Flags set so far are carried over.
    ///
    /// Fails with [`GameError::TooManyMines`] instead of sampling forever when
    /// the mines cannot fit outside the block.
    pub fn place_mines<R: Rng + ?Sized>(
        &self,
        count: CellCount,
        safe: Coord2,
        rng: &mut R,
    ) -> Result<Board<Seeded>> {
        let safe = self.validate_coords(safe)?;

        let max = self.total_cells() - block_size(safe, self.size);
        if count > max {
            log::warn!(
                "Cannot place {} mines around {:?}, only {} cells are free",
                count,
                safe,
                max
            );
            return Err(GameError::TooManyMines {
                requested: count,
                max,
            });
        }

        let mut cells = self.cells.clone();
        let mut placed = 0;
        while placed < count {
            let coords = (
                rng.random_range(0..self.size.0),
                rng.random_range(0..self.size.1),
            );
            let cell = &mut cells[coords.to_nd_index()];
            if cell.is_mine || in_block(safe, coords) {
                continue;
            }
            cell.is_mine = true;
            placed += 1;
        }
        log::debug!("Placed {} mines, safe block around {:?}", placed, safe);

        let mut board = Board {
            size: self.size,
            cells,
            seeding: Seeded { mine_count: count },
        };
        board.compute_adjacency();
        Ok(board)
    }
}

impl Board<Seeded> {
    /// Builds a seeded board from a fixed mine layout. Duplicate coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Board::<Unseeded>::new(size)?;
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.cells[coords.to_nd_index()].is_mine = true;
        }

        let mine_count = board.count_cells(|cell| cell.is_mine);
        let mut board = Board {
            size: board.size,
            cells: board.cells,
            seeding: Seeded { mine_count },
        };
        board.compute_adjacency();
        Ok(board)
    }

    /// Stores the Moore-neighborhood mine count on every safe cell.
    fn compute_adjacency(&mut self) {
        for coords in iter_coords(self.size) {
            if self[coords].is_mine {
                continue;
            }
            let adjacent = self.count_neighbors(coords, |cell| cell.is_mine);
            self.cells[coords.to_nd_index()].adjacent_mines = adjacent;
        }
    }

    pub fn mine_count(&self) -> CellCount {
        self.seeding.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.seeding.mine_count
    }

    /// Panics when `coords` is out of bounds.
    pub fn is_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine
    }

    /// Number of mines around a safe cell. Meaningless for a mine. Panics when
    /// `coords` is out of bounds.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self[coords].adjacent_mines
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        iter_coords(self.size)
            .filter(|&coords| self[coords].is_mine)
            .collect()
    }

    /// Flags placed on cells without a mine.
    pub fn incorrect_flags(&self) -> Vec<Coord2> {
        iter_coords(self.size)
            .filter(|&coords| self[coords].is_flagged && !self[coords].is_mine)
            .collect()
    }

    /// Opens `start` and, when it has no adjacent mines, cascades through the
    /// connected zero region and its numbered border. Flagged cells are never
    /// opened by the cascade. Every newly opened cell is appended to `opened`.
    ///
    /// The `is_opened` flag doubles as the visited marker, so each cell is
    /// opened at most once and the work list stays bounded by the board.
    pub(crate) fn reveal(&mut self, start: Coord2, opened: &mut Vec<Coord2>) -> Reveal {
        let cell = self[start];
        if !cell.is_openable() {
            return Reveal::Blocked;
        }

        if cell.is_mine {
            self.cells[start.to_nd_index()].is_opened = true;
            opened.push(start);
            return Reveal::Mine;
        }

        let mut newly_opened = 0;
        let mut to_visit = vec![start];
        while let Some(coords) = to_visit.pop() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_openable() {
                continue;
            }
            debug_assert!(!cell.is_mine, "cascade reached a mine at {coords:?}");

            cell.is_opened = true;
            let adjacent = cell.adjacent_mines;
            opened.push(coords);
            newly_opened += 1;

            if adjacent == 0 {
                let cells = &self.cells;
                to_visit.extend(
                    cells
                        .iter_neighbors(coords)
                        .filter(|pos| cells[pos.to_nd_index()].is_openable()),
                );
            } else {
                log::trace!("Cascade stops at {:?}, {} adjacent", coords, adjacent);
            }
        }
        log::trace!("Opened {} cells from {:?}", newly_opened, start);

        Reveal::Safe {
            opened: newly_opened,
        }
    }
}
