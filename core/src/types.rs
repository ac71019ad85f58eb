use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Single coordinate axis used for board rows and columns.
pub type Coord = u8;

/// Count type used for card counts and linear board positions.
pub type CellCount = u16;

/// Board coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major decomposition of a linear board position.
pub const fn position_to_coords(position: CellCount, cols: Coord) -> Coord2 {
    let cols = cols as CellCount;
    ((position / cols) as Coord, (position % cols) as Coord)
}

pub const fn coords_to_position((row, col): Coord2, cols: Coord) -> CellCount {
    row as CellCount * cols as CellCount + col as CellCount
}

/// Zero-based address of a cell inside a workbook tab, written `C3` in A1 notation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Moves by a signed delta, `None` when it would leave the addressable range.
    pub fn offset(self, rows: i32, cols: i32) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(rows)?,
            col: self.col.checked_add_signed(cols)?,
        })
    }

    pub fn checked_add(self, rows: u32, cols: u32) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(rows)?,
            col: self.col.checked_add(cols)?,
        })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // bijective base 26: A..Z, AA..AZ, ...
        let mut letters = [0u8; 8];
        let mut len = 0;
        let mut col = u64::from(self.col) + 1;
        while col > 0 {
            col -= 1;
            letters[len] = b'A' + (col % 26) as u8;
            len += 1;
            col /= 26;
        }
        for &letter in letters[..len].iter().rev() {
            write!(f, "{}", letter as char)?;
        }
        write!(f, "{}", u64::from(self.row) + 1)
    }
}

impl FromStr for CellRef {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || digits.is_empty() {
            return Err(GameError::InvalidCellName);
        }

        let mut col: u64 = 0;
        for letter in letters.bytes() {
            col = col * 26 + u64::from(letter.to_ascii_uppercase() - b'A' + 1);
            if col > u64::from(u32::MAX) + 1 {
                return Err(GameError::InvalidCellName);
            }
        }

        let row: u32 = digits.parse().map_err(|_| GameError::InvalidCellName)?;
        if row == 0 {
            return Err(GameError::InvalidCellName);
        }

        Ok(Self::new(row - 1, (col - 1) as u32))
    }
}

impl TryFrom<String> for CellRef {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CellRef> for String {
    fn from(cell: CellRef) -> Self {
        cell.to_string()
    }
}

/// Cell background color, written `#rrggbb`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GameError::InvalidColor);
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| GameError::InvalidColor)
        };
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}
