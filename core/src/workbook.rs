//! In-memory spreadsheet used as the game's host document.
//!
//! It mirrors the sheet the game was designed for: a `BOARD` tab where card `(r, c)` sits at `C3`
//! shifted by two rows and two columns per step, with the reveal mark right of each card, and a
//! `WORDS` tab holding a filtered word list under a header row.

use alloc::collections::{BTreeSet, VecDeque};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the board and the word list live inside a workbook.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub board_tab: String,
    pub words_tab: String,
    pub first_card: CellRef,
    /// Rows and columns between two neighbouring cards.
    pub card_step: (u32, u32),
    /// Any cell covered by the word list filter.
    pub word_filter: CellRef,
}

impl SheetLayout {
    /// Cards must not overlap each other or the reveal mark written right of them.
    pub fn validate(&self) -> Result<()> {
        let (row_step, col_step) = self.card_step;
        if row_step < 1 || col_step < 2 {
            return Err(GameError::InvalidLayout(self.card_step));
        }
        Ok(())
    }

    /// Cell of the card at `coords`, ignoring the tab bounds.
    pub fn card_cell(&self, (row, col): Coord2) -> Option<CellRef> {
        let (row_step, col_step) = self.card_step;
        self.first_card.checked_add(
            u32::from(row).checked_mul(row_step)?,
            u32::from(col).checked_mul(col_step)?,
        )
    }

    /// Rows and columns a board tab needs, companion cells included.
    pub fn board_extent(&self, config: &GameConfig) -> Option<(u32, u32)> {
        let last = self.card_cell((config.rows().checked_sub(1)?, config.cols().checked_sub(1)?))?;
        let companion = last.offset(0, 1)?;
        Some((companion.row.checked_add(1)?, companion.col.checked_add(1)?))
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            board_tab: String::from("BOARD"),
            words_tab: String::from("WORDS"),
            first_card: CellRef::new(2, 2),
            card_step: (2, 2),
            word_filter: CellRef::new(0, 0),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCell {
    pub value: String,
    pub background: Option<Rgb>,
}

/// Block of rows a filter applies to; its first row holds the filter controls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRange {
    pub top_left: CellRef,
    pub rows: u32,
    pub cols: u32,
}

impl FilterRange {
    pub fn contains(&self, cell: CellRef) -> bool {
        let top = self.top_left;
        cell.row >= top.row
            && cell.col >= top.col
            && u64::from(cell.row) < u64::from(top.row) + u64::from(self.rows)
            && u64::from(cell.col) < u64::from(top.col) + u64::from(self.cols)
    }

    /// Rows below the header row.
    pub fn data_rows(&self) -> impl Iterator<Item = u32> + use<> {
        let start = self.top_left.row.saturating_add(1);
        let end = self.top_left.row.saturating_add(self.rows);
        start..end
    }
}

/// A single named tab with a fixed number of rows and columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    name: String,
    cells: Array2<SheetCell>,
    hidden_rows: BTreeSet<u32>,
    filter: Option<FilterRange>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: u32, cols: u32) -> Self {
        Self {
            name: name.into(),
            cells: Array2::default((rows as usize, cols as usize)),
            hidden_rows: BTreeSet::new(),
            filter: None,
        }
    }

    /// Tab with a header row and one word per row below it, all covered by a filter.
    pub fn word_list<W: AsRef<str>>(name: impl Into<String>, header: &str, words: &[W]) -> Self {
        let rows = u32::try_from(words.len()).unwrap_or(u32::MAX - 1) + 1;
        let mut sheet = Self::new(name, rows, 1);
        sheet.cells[(0, 0)].value = String::from(header);
        for (row, word) in words.iter().enumerate().take(rows as usize - 1) {
            sheet.cells[(row + 1, 0)].value = String::from(word.as_ref());
        }
        sheet.filter = Some(FilterRange {
            top_left: CellRef::new(0, 0),
            rows,
            cols: 1,
        });
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(rows, cols)`
    pub fn dim(&self) -> (u32, u32) {
        let (rows, cols) = self.cells.dim();
        (rows as u32, cols as u32)
    }

    pub fn cell(&self, cell: CellRef) -> Result<&SheetCell> {
        self.cells
            .get((cell.row as usize, cell.col as usize))
            .ok_or(GameError::InvalidCell(cell))
    }

    pub fn cell_mut(&mut self, cell: CellRef) -> Result<&mut SheetCell> {
        self.cells
            .get_mut((cell.row as usize, cell.col as usize))
            .ok_or(GameError::InvalidCell(cell))
    }

    pub fn filter(&self) -> Option<&FilterRange> {
        self.filter.as_ref()
    }

    pub fn set_filter(&mut self, filter: Option<FilterRange>) {
        self.filter = filter;
    }

    pub fn is_row_hidden(&self, row: u32) -> bool {
        self.hidden_rows.contains(&row)
    }

    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        if hidden {
            self.hidden_rows.insert(row);
        } else {
            self.hidden_rows.remove(&row);
        }
    }
}

/// Ordered collection of tabs plus the layout and board size the game uses to find its way
/// around them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    layout: SheetLayout,
    #[serde(default)]
    game: GameConfig,
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(layout: SheetLayout) -> Self {
        Self {
            layout,
            game: GameConfig::default(),
            sheets: Vec::new(),
        }
    }

    /// Workbook with a board tab sized for `config` and a filtered word list.
    pub fn with_game_tabs<W: AsRef<str>>(
        layout: SheetLayout,
        config: &GameConfig,
        words: &[W],
    ) -> Result<Self> {
        layout.validate()?;
        config.validate()?;
        let (rows, cols) = layout
            .board_extent(config)
            .ok_or(GameError::InvalidBoardShape)?;
        let board = Sheet::new(layout.board_tab.clone(), rows, cols);
        let word_list = Sheet::word_list(layout.words_tab.clone(), "MOTS", words);

        let mut workbook = Self::new(layout);
        workbook.game = *config;
        workbook.insert_sheet(board);
        workbook.insert_sheet(word_list);
        Ok(workbook)
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Board size the tabs were created for.
    pub fn game(&self) -> &GameConfig {
        &self.game
    }

    /// Checks the stored layout and board size, e.g. after loading a saved document.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.game.validate()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Adds a tab, replacing any tab with the same name.
    pub fn insert_sheet(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    pub fn remove_sheet(&mut self, name: &str) -> Option<Sheet> {
        let index = self.sheets.iter().position(|s| s.name == name)?;
        Some(self.sheets.remove(index))
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }
}

impl Document for Workbook {
    type Board<'a> = BoardTab<'a>;
    type Words<'a> = WordsTab<'a>;

    fn board(&mut self) -> Result<BoardTab<'_>> {
        let Self { layout, sheets, .. } = self;
        let sheet = sheets
            .iter_mut()
            .find(|s| s.name == layout.board_tab)
            .ok_or_else(|| GameError::MissingResource(format!("tab {}", layout.board_tab)))?;
        Ok(BoardTab { sheet, layout })
    }

    fn words(&self) -> Result<WordsTab<'_>> {
        let sheet = self
            .sheet(&self.layout.words_tab)
            .ok_or_else(|| GameError::MissingResource(format!("tab {}", self.layout.words_tab)))?;
        Ok(WordsTab {
            sheet,
            anchor: self.layout.word_filter,
        })
    }
}

/// Board tab seen through the card layout.
#[derive(Debug)]
pub struct BoardTab<'a> {
    sheet: &'a mut Sheet,
    layout: &'a SheetLayout,
}

impl GridSurface for BoardTab<'_> {
    fn card(&self, coords: Coord2) -> Result<CellRef> {
        self.layout.card_cell(coords).ok_or(GameError::InvalidCoords)
    }

    fn value(&self, cell: CellRef) -> Result<String> {
        Ok(self.sheet.cell(cell)?.value.clone())
    }

    fn set_value(&mut self, cell: CellRef, value: &str) -> Result<()> {
        let target = self.sheet.cell_mut(cell)?;
        target.value.clear();
        target.value.push_str(value);
        Ok(())
    }

    fn background(&self, cell: CellRef) -> Result<Option<Rgb>> {
        Ok(self.sheet.cell(cell)?.background)
    }

    fn set_background(&mut self, cell: CellRef, color: Option<Rgb>) -> Result<()> {
        self.sheet.cell_mut(cell)?.background = color;
        Ok(())
    }
}

/// Word list tab, read through its filter.
#[derive(Copy, Clone, Debug)]
pub struct WordsTab<'a> {
    sheet: &'a Sheet,
    anchor: CellRef,
}

impl WordSource for WordsTab<'_> {
    fn filtered_words(&self) -> Result<Vec<String>> {
        let filter = self
            .sheet
            .filter()
            .filter(|filter| filter.contains(self.anchor))
            .ok_or_else(|| {
                GameError::MissingResource(format!("filter at {}!{}", self.sheet.name, self.anchor))
            })?;

        let col = filter.top_left.col;
        let words = filter
            .data_rows()
            .filter(|&row| !self.sheet.is_row_hidden(row))
            .filter_map(|row| self.sheet.cell(CellRef::new(row, col)).ok())
            .map(|cell| cell.value.trim())
            .filter(|word| !word.is_empty())
            .map(String::from)
            .collect();
        Ok(words)
    }
}

/// Dialog stand-in that answers confirmations from a script and records every message.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDialog {
    answers: VecDeque<bool>,
    alerts: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confirmations are answered in order, then declined once the script runs out.
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl DialogSurface for ScriptedDialog {
    fn alert(&mut self, message: &str) {
        self.alerts.push(String::from(message));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(String::from(message));
        self.answers.pop_front().unwrap_or(false)
    }
}
