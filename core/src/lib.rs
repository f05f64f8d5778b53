//! Rules engine for Minesweeper.
//!
//! A [`Board`] owns the grid, the mine layout and the game status. A
//! presentation layer creates one, forwards player actions to [`Board::reveal`]
//! and [`Board::flag`], and redraws the [`CellChange`]s each call returns.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated configuration: both dimensions non-zero and at least one safe cell.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked((rows, cols), mines);
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration such as `{"size":[9,9],"mines":10}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }
        Ok(())
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        self.size.0 as CellCount * self.size.1 as CellCount
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((16, 30), 99)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((10, 10), 15)
    }
}

/// Which cells hold a mine. Immutable once built.
///
/// Deserialization recounts the mask, so a stored `mine_count` that disagrees
/// with it is rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineLayoutRepr")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct MineLayoutRepr {
    mine_mask: Array2<bool>,
    mine_count: Option<CellCount>,
}

impl TryFrom<MineLayoutRepr> for MineLayout {
    type Error = GameError;

    fn try_from(repr: MineLayoutRepr) -> Result<Self> {
        let (rows, cols) = repr.mine_mask.dim();
        let max = usize::from(Coord::MAX);
        if rows > max || cols > max {
            return Err(GameError::BoardTooLarge { max: Coord::MAX });
        }

        let layout = Self::from_mine_mask(repr.mine_mask);
        match repr.mine_count {
            Some(count) if count != layout.mine_count => Err(GameError::LayoutMismatch),
            _ => Ok(layout),
        }
    }
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from explicit mine positions. Duplicates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &(row, col) in mine_coords {
            if row >= size.0 || col >= size.1 {
                return Err(GameError::InvalidCoords { row, col });
            }
            mine_mask[(row, col).to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// A cell whose display changed during one call, with its new appearance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub coords: Coord2,
    pub view: CellView,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealOutcome {
    pub status: GameStatus,
    pub changed: Vec<CellChange>,
}

impl RevealOutcome {
    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlagOutcome {
    pub status: GameStatus,
    pub changed: Vec<CellChange>,
    pub flags_remaining: CellCount,
}

impl FlagOutcome {
    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_dimensions() {
        assert!(matches!(GameConfig::new(0, 5, 0), Err(GameError::EmptyBoard)));
        assert!(matches!(GameConfig::new(5, 0, 0), Err(GameError::EmptyBoard)));
    }

    #[test]
    fn config_requires_a_safe_cell() {
        assert!(matches!(
            GameConfig::new(3, 3, 9),
            Err(GameError::TooManyMines { mines: 9, cells: 9 })
        ));
        assert!(GameConfig::new(3, 3, 8).is_ok());
        assert!(GameConfig::new(3, 3, 0).is_ok());
    }

    #[test]
    fn config_errors_are_configuration_errors() {
        let err = GameConfig::new(2, 2, 10).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
            GameConfig::default(),
        ] {
            config.validate().unwrap();
        }
        assert_eq!(GameConfig::default().safe_cells(), 85);
    }

    #[test]
    fn config_from_json() {
        let config = GameConfig::from_json(r#"{"size":[16,30],"mines":99}"#).unwrap();
        assert_eq!(config, GameConfig::expert());
        assert_eq!((config.rows(), config.cols()), (16, 30));
    }

    #[test]
    fn config_from_json_validates() {
        let too_many = GameConfig::from_json(r#"{"size":[2,2],"mines":4}"#);
        assert!(matches!(too_many, Err(GameError::TooManyMines { .. })));

        let malformed = GameConfig::from_json(r#"{"size":[2,2]}"#);
        assert!(matches!(malformed, Err(GameError::MalformedConfig(_))));
    }

    #[test]
    fn layout_from_coords_counts_unique_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2), (0, 0)]).unwrap();
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.safe_cell_count(), 7);
        assert_eq!(layout.iter_mines().collect::<Vec<_>>(), vec![(0, 0), (2, 2)]);
    }

    #[test]
    fn layout_rejects_out_of_range_mine() {
        let result = MineLayout::from_mine_coords((3, 3), &[(3, 0)]);
        assert!(matches!(result, Err(GameError::InvalidCoords { row: 3, col: 0 })));
    }

    #[test]
    fn layout_deserialize_recounts_mines() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        assert_eq!(serde_json::from_str::<MineLayout>(&json).unwrap(), layout);

        let mut tampered = serde_json::to_value(&layout).unwrap();
        tampered["mine_count"] = 3.into();
        assert!(serde_json::from_value::<MineLayout>(tampered.clone()).is_err());

        tampered.as_object_mut().unwrap().remove("mine_count");
        let recounted: MineLayout = serde_json::from_value(tampered).unwrap();
        assert_eq!(recounted.mine_count(), 1);
        assert_eq!(recounted.game_config(), GameConfig::new(2, 2, 1).unwrap());
    }

    #[test]
    fn layout_deserialize_rejects_oversized_mask() {
        let mask: Array2<bool> = Array2::default([256, 1]);
        let json = serde_json::json!({ "mine_mask": mask, "mine_count": 0 });
        assert!(serde_json::from_value::<MineLayout>(json).is_err());
    }

    #[test]
    fn adjacent_counts_on_fixed_layout() {
        // . * .
        // . . *
        // * . .
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(layout.adjacent_mine_count((0, 0)), 1);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 3);
        assert_eq!(layout.adjacent_mine_count((2, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((2, 2)), 1);
    }
}
