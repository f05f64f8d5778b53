use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Game board: the cell grid, its mine layout and the game status.
///
/// Moves on a finished game, on revealed cells, or on flagged cells (for
/// reveal) are no-ops. Only coordinates outside the grid are errors.
#[derive(Clone, Debug)]
pub struct Board<G = RandomMineGenerator> {
    config: GameConfig,
    generator: G,
    cells: Array2<Cell>,
    flags_remaining: CellCount,
    revealed_count: CellCount,
    status: GameStatus,
    detonated_mine: Option<Coord2>,
}

impl Board {
    /// New board with mines placed from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::from_entropy())
    }

    /// Shorthand for [`Board::new`] from bare dimensions.
    pub fn initialize(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        Self::new(GameConfig::new(rows, cols, mines)?)
    }

    /// New board whose mine layouts, including those of later resets, are
    /// reproducible from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::from_seed(seed))
    }
}

impl Board<FixedMineGenerator> {
    /// Board over a hand-built layout. Resetting restores the same layout.
    pub fn with_layout(layout: MineLayout) -> Result<Self> {
        let config = layout.game_config();
        Self::with_generator(config, FixedMineGenerator::new(layout))
    }
}

impl<G: MineGenerator> Board<G> {
    pub fn with_generator(config: GameConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let layout = generator.generate(config)?;
        let mut board = Self {
            config,
            generator,
            cells: Array2::default(config.size.to_nd_index()),
            flags_remaining: config.mines,
            revealed_count: 0,
            status: GameStatus::Playing,
            detonated_mine: None,
        };
        board.load_layout(&layout);
        log::debug!(
            "Board initialized: {}x{} with {} mines",
            config.rows(),
            config.cols(),
            config.mines
        );
        Ok(board)
    }

    /// Starts a new game with the same dimensions and mine count.
    pub fn reset(&mut self) -> Result<()> {
        let layout = self.generator.generate(self.config)?;
        self.cells = Array2::default(self.config.size.to_nd_index());
        self.flags_remaining = self.config.mines;
        self.revealed_count = 0;
        self.status = GameStatus::Playing;
        self.detonated_mine = None;
        self.load_layout(&layout);
        log::debug!("Board reset with {} mines", self.config.mines);
        Ok(())
    }

    /// Reveals a cell, flood-filling outward from cells with no adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        log::trace!("reveal {:?}", coords);

        if !self.status.is_playing() || !self.cells[coords.to_nd_index()].is_revealable() {
            return Ok(self.reveal_outcome(Vec::new()));
        }

        let mut changed = Vec::new();
        if self.cells[coords.to_nd_index()].is_mine {
            self.cells[coords.to_nd_index()].is_revealed = true;
            self.detonated_mine = Some(coords);
            self.end_game(GameStatus::Lost);
            self.push_exposed_mines(&mut changed);
            return Ok(self.reveal_outcome(changed));
        }

        let mut to_visit = vec![coords];
        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if !cell.is_revealable() {
                continue;
            }
            cell.is_revealed = true;
            let adjacent_mines = cell.adjacent_mines;
            self.revealed_count += 1;
            changed.push(CellChange {
                coords: visit_coords,
                view: CellView::Revealed(adjacent_mines),
            });

            if adjacent_mines == 0 {
                // flagged and revealed neighbors are filtered before they are queued
                let neighbors = self.cells.iter_neighbors(visit_coords);
                to_visit.extend(
                    neighbors.filter(|&pos| self.cells[pos.to_nd_index()].is_revealable()),
                );
            }
        }

        if self.is_won() {
            self.end_game(GameStatus::Won);
            self.push_exposed_mines(&mut changed);
        }
        Ok(self.reveal_outcome(changed))
    }

    /// Toggles the flag on an unrevealed cell. Placing a flag needs one left.
    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        log::trace!("flag {:?}", coords);

        let mut changed = Vec::new();
        if self.status.is_playing() {
            let cell = &mut self.cells[coords.to_nd_index()];
            let view = match (cell.is_revealed, cell.is_flagged) {
                (true, _) => None,
                (false, true) => {
                    cell.is_flagged = false;
                    self.flags_remaining += 1;
                    Some(CellView::Hidden)
                }
                (false, false) if self.flags_remaining > 0 => {
                    cell.is_flagged = true;
                    self.flags_remaining -= 1;
                    Some(CellView::Flagged)
                }
                (false, false) => None,
            };
            changed.extend(view.map(|view| CellChange { coords, view }));
        }

        Ok(FlagOutcome {
            status: self.status,
            changed,
            flags_remaining: self.flags_remaining,
        })
    }

    /// True once every non-mine cell is revealed. Flags play no part.
    pub fn is_won(&self) -> bool {
        self.revealed_count == self.config.safe_cells()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn detonated_mine(&self) -> Option<Coord2> {
        self.detonated_mine
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// What the presentation layer should draw at `coords` right now.
    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.validate_coords(coords)?;
        Ok(self.view_of(coords))
    }

    /// Every cell with its current view, in row-major order.
    pub fn views(&self) -> impl Iterator<Item = CellChange> + '_ {
        self.cells.indexed_iter().map(|((row, col), _)| {
            let coords = (row as Coord, col as Coord);
            CellChange {
                coords,
                view: self.view_of(coords),
            }
        })
    }

    fn view_of(&self, coords: Coord2) -> CellView {
        let cell = self.cells[coords.to_nd_index()];
        if cell.is_mine && (cell.is_revealed || self.status.is_finished()) {
            CellView::Mine {
                detonated: self.detonated_mine == Some(coords),
            }
        } else if cell.is_revealed {
            CellView::Revealed(cell.adjacent_mines)
        } else if cell.is_flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }

    fn load_layout(&mut self, layout: &MineLayout) {
        for mine in layout.iter_mines() {
            self.cells[mine.to_nd_index()].is_mine = true;
        }
        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            if !cell.is_mine {
                cell.adjacent_mines = layout.adjacent_mine_count((row as Coord, col as Coord));
            }
        }
    }

    /// Every mine becomes visible once the game is over.
    fn push_exposed_mines(&self, changed: &mut Vec<CellChange>) {
        changed.extend(
            self.cells
                .indexed_iter()
                .filter(|(_, cell)| cell.is_mine)
                .map(|((row, col), _)| {
                    let coords = (row as Coord, col as Coord);
                    CellChange {
                        coords,
                        view: self.view_of(coords),
                    }
                }),
        );
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        log::info!(
            "Game over: {:?} with {} of {} safe cells revealed",
            status,
            self.revealed_count,
            self.config.safe_cells()
        );
        self.status = status;
    }

    fn reveal_outcome(&self, changed: Vec<CellChange>) -> RevealOutcome {
        RevealOutcome {
            status: self.status,
            changed,
        }
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.config.size;
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords {
                row: coords.0,
                col: coords.1,
            })
        }
    }
}
