use crate::*;

/// Title of the game menu added to the host.
pub const MENU_TITLE: &str = "JEU";

/// Entries listed under [`MENU_TITLE`], in display order.
pub const MENU_ITEMS: [MenuAction; 2] = [MenuAction::NewGame, MenuAction::Reset];

/// Something the user can trigger from the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Reset, draw words, draw colors.
    NewGame,
    Reset,
    /// Bound to the current selection rather than to a menu entry.
    RevealSelected(CellRef),
}

impl MenuAction {
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::NewGame => Some("Nouveau"),
            Self::Reset => Some("RAZ"),
            Self::RevealSelected(_) => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Started(Team),
    Cleared,
    Reveal(RevealOutcome),
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Started(_) | Self::Cleared => true,
            Self::Reveal(outcome) => outcome.has_update(),
        }
    }
}
