use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// One of the two playing teams.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const fn affiliation(self) -> Affiliation {
        match self {
            Self::Red => Affiliation::Red,
            Self::Blue => Affiliation::Blue,
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// Team name as announced to the players.
    pub const fn announce_name(self) -> &'static str {
        match self {
            Self::Red => "ROUGE",
            Self::Blue => "BLEU",
        }
    }

    pub const fn from_coin(heads: bool) -> Self {
        if heads { Self::Blue } else { Self::Red }
    }
}

/// Hidden category of a card, stored as the card's background color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affiliation {
    Red,
    Blue,
    /// Black card, revealing it loses the game.
    Assassin,
    /// Yellow filler card.
    Neutral,
}

impl Affiliation {
    pub const fn reveal_mark(self) -> RevealMark {
        match self {
            Self::Assassin => RevealMark::Assassin,
            Self::Blue => RevealMark::Blue,
            Self::Red => RevealMark::Red,
            Self::Neutral => RevealMark::Neutral,
        }
    }
}

/// Single character written next to a card once it has been revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealMark {
    Assassin,
    Blue,
    Red,
    Neutral,
}

impl RevealMark {
    /// Unset or unknown affiliations reveal as neutral.
    pub const fn from_affiliation(affiliation: Option<Affiliation>) -> Self {
        match affiliation {
            Some(affiliation) => affiliation.reveal_mark(),
            None => Self::Neutral,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assassin => "X",
            Self::Blue => "B",
            Self::Red => "R",
            Self::Neutral => "Y",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "X" => Some(Self::Assassin),
            "B" => Some(Self::Blue),
            "R" => Some(Self::Red),
            "Y" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for RevealMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player-visible state of a card.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    #[default]
    Hidden,
    Revealed(RevealMark),
}

impl CardState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    /// Reads the companion cell text; anything that is not a mark counts as hidden.
    pub fn from_mark_text(text: &str) -> Self {
        match RevealMark::parse(text) {
            Some(mark) => Self::Revealed(mark),
            None => {
                if !text.trim().is_empty() {
                    log::warn!("Ignoring unknown reveal mark {text:?}");
                }
                Self::Hidden
            }
        }
    }
}

/// A card as read back from the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub word: String,
    pub affiliation: Option<Affiliation>,
    pub state: CardState,
}

/// Background colors used to encode affiliations on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub red: Rgb,
    pub blue: Rgb,
    pub black: Rgb,
    pub yellow: Rgb,
}

impl Palette {
    pub const CLASSIC: Self = Self {
        red: Rgb(0xf4, 0xcc, 0xcc),
        blue: Rgb(0xcf, 0xe2, 0xf3),
        black: Rgb(0x99, 0x99, 0x99),
        yellow: Rgb(0xfc, 0xf8, 0xec),
    };

    pub const AFFILIATIONS: [Affiliation; 4] = [
        Affiliation::Red,
        Affiliation::Blue,
        Affiliation::Assassin,
        Affiliation::Neutral,
    ];

    /// Every affiliation needs its own color to be read back from the board.
    pub fn validate(&self) -> Result<()> {
        for (i, &first) in Self::AFFILIATIONS.iter().enumerate() {
            for &second in &Self::AFFILIATIONS[i + 1..] {
                if self.color(first) == self.color(second) {
                    return Err(GameError::InvalidPalette(first, second));
                }
            }
        }
        Ok(())
    }

    pub const fn color(&self, affiliation: Affiliation) -> Rgb {
        match affiliation {
            Affiliation::Red => self.red,
            Affiliation::Blue => self.blue,
            Affiliation::Assassin => self.black,
            Affiliation::Neutral => self.yellow,
        }
    }

    pub fn affiliation_of(&self, background: Option<Rgb>) -> Option<Affiliation> {
        let background = background?;
        if background == self.black {
            Some(Affiliation::Assassin)
        } else if background == self.blue {
            Some(Affiliation::Blue)
        } else if background == self.red {
            Some(Affiliation::Red)
        } else if background == self.yellow {
            Some(Affiliation::Neutral)
        } else {
            log::warn!("Background {background} matches no affiliation, reading it as unset");
            None
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::CLASSIC
    }
}
