use confinames_core::{Affiliation, Card, CardState, CellRef};
use ndarray::Array2;
use std::io::{self, Write};

fn affiliation_tag(affiliation: Option<Affiliation>) -> char {
    match affiliation {
        Some(Affiliation::Red) => 'r',
        Some(Affiliation::Blue) => 'b',
        Some(Affiliation::Assassin) => 'x',
        Some(Affiliation::Neutral) => 'y',
        None => '-',
    }
}

fn card_text(cell: CellRef, card: &Card, key: bool) -> String {
    let mut text = format!("{cell} {}", card.word);
    if key {
        text.push_str(&format!(" ({})", affiliation_tag(card.affiliation)));
    }
    if let CardState::Revealed(mark) = card.state {
        text.push_str(&format!(" [{mark}]"));
    }
    text
}

/// Writes one line per board row; `cells` gives the sheet address of each card.
pub(crate) fn render_board(
    out: &mut impl Write,
    cards: &Array2<Card>,
    cells: &Array2<CellRef>,
    key: bool,
) -> io::Result<()> {
    let texts = ndarray::Zip::from(cards)
        .and(cells)
        .map_collect(|card, &cell| card_text(cell, card, key));
    let width = texts.iter().map(|text| text.chars().count()).max().unwrap_or(0);

    for row in texts.rows() {
        let line = row
            .iter()
            .map(|text| format!("{text:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
