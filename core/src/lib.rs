#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use card::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use menu::*;
pub use surface::*;
pub use types::*;
pub use workbook::*;

mod card;
mod controller;
mod error;
mod generator;
mod menu;
mod surface;
mod types;
mod workbook;

/// Black cards on every board.
pub const ASSASSIN_CARDS: CellCount = 1;

/// Extra card given to the team that plays first.
pub const STARTING_BONUS: CellCount = 1;

/// Placeholder labels start at this letter for column 0.
pub const PLACEHOLDER_FIRST_LETTER: u8 = b'J';

/// Widest board whose placeholder letters stay within `J..=Z`.
pub const MAX_COLS: Coord = b'Z' - PLACEHOLDER_FIRST_LETTER + 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    /// Cards per team before the starting bonus.
    pub team_cards: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, team_cards: CellCount) -> Self {
        Self { size, team_cards }
    }

    pub const fn classic() -> Self {
        Self::new_unchecked((5, 5), 8)
    }

    pub fn new((rows, cols): Coord2, team_cards: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, MAX_COLS);
        let spare = mult(rows, cols).saturating_sub(ASSASSIN_CARDS + STARTING_BONUS);
        let team_cards = team_cards.min(spare / 2);
        Self::new_unchecked((rows, cols), team_cards)
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cards(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Cards that get a team or assassin color, the rest are neutral.
    pub const fn colored_cards(&self) -> CellCount {
        self.team_cards
            .saturating_mul(2)
            .saturating_add(ASSASSIN_CARDS + STARTING_BONUS)
    }

    pub const fn neutral_cards(&self) -> CellCount {
        self.total_cards().saturating_sub(self.colored_cards())
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 || cols > MAX_COLS {
            return Err(GameError::InvalidBoardShape);
        }

        let required = usize::from(ASSASSIN_CARDS + STARTING_BONUS)
            + 2 * usize::from(self.team_cards);
        let available = usize::from(self.total_cards());
        if required > available {
            return Err(GameError::TooManyCards {
                required,
                available,
            });
        }

        Ok(())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.rows() && coords.1 < self.cols() {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub const fn coords_of(&self, position: CellCount) -> Coord2 {
        position_to_coords(position, self.cols())
    }

    pub const fn position_of(&self, coords: Coord2) -> CellCount {
        coords_to_position(coords, self.cols())
    }

    /// Every card coordinate in ascending linear order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let config = *self;
        (0..config.total_cards()).map(move |position| config.coords_of(position))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}
