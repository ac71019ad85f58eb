use alloc::string::String;
use alloc::vec::Vec;

use crate::*;

/// Read and write access to the cells of the board tab.
pub trait GridSurface {
    /// Address of the cell holding the card at `coords`.
    fn card(&self, coords: Coord2) -> Result<CellRef>;

    fn value(&self, cell: CellRef) -> Result<String>;

    /// Writing an empty string clears the cell.
    fn set_value(&mut self, cell: CellRef, value: &str) -> Result<()>;

    fn background(&self, cell: CellRef) -> Result<Option<Rgb>>;

    fn set_background(&mut self, cell: CellRef, color: Option<Rgb>) -> Result<()>;
}

impl<G: GridSurface + ?Sized> GridSurface for &mut G {
    fn card(&self, coords: Coord2) -> Result<CellRef> {
        (**self).card(coords)
    }

    fn value(&self, cell: CellRef) -> Result<String> {
        (**self).value(cell)
    }

    fn set_value(&mut self, cell: CellRef, value: &str) -> Result<()> {
        (**self).set_value(cell, value)
    }

    fn background(&self, cell: CellRef) -> Result<Option<Rgb>> {
        (**self).background(cell)
    }

    fn set_background(&mut self, cell: CellRef, color: Option<Rgb>) -> Result<()> {
        (**self).set_background(cell, color)
    }
}

/// The cell next to a card, holding its reveal mark.
pub fn companion_cell(card: CellRef) -> Result<CellRef> {
    card.offset(0, 1).ok_or(GameError::InvalidCell(card))
}

/// Candidate words, already narrowed down by whatever filter the host applies.
pub trait WordSource {
    fn filtered_words(&self) -> Result<Vec<String>>;
}

impl<S: AsRef<str>> WordSource for [S] {
    fn filtered_words(&self) -> Result<Vec<String>> {
        Ok(self.iter().map(|word| String::from(word.as_ref())).collect())
    }
}

/// Modal dialogs, both calls block until the user answers.
pub trait DialogSurface {
    fn alert(&mut self, message: &str);

    fn confirm(&mut self, message: &str) -> bool;
}

impl<D: DialogSurface + ?Sized> DialogSurface for &mut D {
    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }

    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }
}

/// Host document holding the board and the word list.
pub trait Document {
    type Board<'a>: GridSurface
    where
        Self: 'a;

    type Words<'a>: WordSource
    where
        Self: 'a;

    /// Fails with [`GameError::MissingResource`] when the board tab is absent.
    fn board(&mut self) -> Result<Self::Board<'_>>;

    /// Fails with [`GameError::MissingResource`] when the word list is absent.
    fn words(&self) -> Result<Self::Words<'_>>;
}
