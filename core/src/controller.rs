use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The user cancelled the confirmation, nothing was written.
    Declined,
    Revealed(RevealMark),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Declined => false,
            Self::Revealed(_) => true,
        }
    }
}

/// Placeholder shown on a blank board: column letter from `J`, then the 1-based row.
pub fn placeholder_label((row, col): Coord2) -> String {
    let letter = char::from(PLACEHOLDER_FIRST_LETTER + col);
    format!("{letter}{}", u16::from(row) + 1)
}

pub fn start_announcement(team: Team) -> String {
    format!("Les {} commencent !", team.announce_name())
}

pub fn reveal_prompt(word: &str) -> String {
    format!("Révéler \"{word}\" ?")
}

/// Affiliations in the order they are dealt: the assassin, alternating team cards, the starting
/// team's extra card, then neutral cards for whatever is left.
pub fn affiliation_plan(config: &GameConfig, start: Team) -> Vec<Affiliation> {
    let mut plan = Vec::with_capacity(config.total_cards().into());
    plan.extend((0..ASSASSIN_CARDS).map(|_| Affiliation::Assassin));
    for _ in 0..config.team_cards {
        plan.push(Affiliation::Red);
        plan.push(Affiliation::Blue);
    }
    plan.extend((0..STARTING_BONUS).map(|_| start.affiliation()));
    plan.extend((0..config.neutral_cards()).map(|_| Affiliation::Neutral));
    plan
}

/// Runs the game actions against the host surfaces.
#[derive(Clone, Debug)]
pub struct BoardController<S = RandomAssignmentEngine> {
    config: GameConfig,
    palette: Palette,
    sampler: S,
}

impl<S: IndexSampler> BoardController<S> {
    pub fn new(config: GameConfig, palette: Palette, sampler: S) -> Result<Self> {
        config.validate()?;
        palette.validate()?;
        Ok(Self {
            config,
            palette,
            sampler,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Blanks every card: placeholder word, no color, no reveal mark.
    pub fn reset<G: GridSurface + ?Sized>(&self, grid: &mut G) -> Result<()> {
        log::debug!("Resetting {}x{} board", self.config.rows(), self.config.cols());
        for coords in self.config.iter_coords() {
            let card = grid.card(coords)?;
            grid.set_value(card, &placeholder_label(coords))?;
            grid.set_background(card, None)?;
            grid.set_value(companion_cell(card)?, "")?;
        }
        Ok(())
    }

    /// Puts a distinct, uppercased pool entry on every card, visiting positions in linear order.
    pub fn draw_words<G, W>(&mut self, grid: &mut G, pool: &[W]) -> Result<()>
    where
        G: GridSurface + ?Sized,
        W: AsRef<str>,
    {
        let total = usize::from(self.config.total_cards());
        let picks = self.sampler.draw_distinct(total, pool.len())?;
        log::debug!("Drawing {} words out of {}", total, pool.len());

        for (position, pick) in picks.into_iter().enumerate() {
            let coords = self.config.coords_of(position as CellCount);
            let card = grid.card(coords)?;
            grid.set_value(card, &pool[pick].as_ref().to_uppercase())?;
        }
        Ok(())
    }

    /// Deals the hidden affiliations and announces which team starts.
    ///
    /// Previous backgrounds are not cleared first, only the drawn positions are written.
    pub fn draw_colors<G, D>(&mut self, grid: &mut G, dialog: &mut D) -> Result<Team>
    where
        G: GridSurface + ?Sized,
        D: DialogSurface + ?Sized,
    {
        let start = Team::from_coin(self.sampler.coin_flip());
        let plan = affiliation_plan(&self.config, start);
        let positions = self
            .sampler
            .draw_distinct(plan.len(), self.config.total_cards().into())?;

        for (affiliation, position) in plan.into_iter().zip(positions) {
            let card = grid.card(self.config.coords_of(position as CellCount))?;
            grid.set_background(card, Some(self.palette.color(affiliation)))?;
        }

        log::info!("{start:?} team starts");
        dialog.alert(&start_announcement(start));
        Ok(start)
    }

    /// Asks for confirmation, then writes the mark matching the cell's background next to it.
    pub fn reveal_card<G, D>(
        &self,
        grid: &mut G,
        dialog: &mut D,
        cell: CellRef,
    ) -> Result<RevealOutcome>
    where
        G: GridSurface + ?Sized,
        D: DialogSurface + ?Sized,
    {
        let companion = companion_cell(cell)?;
        let previous = grid.value(companion)?;
        let word = grid.value(cell)?;

        if !dialog.confirm(&reveal_prompt(&word)) {
            log::debug!("Reveal of {cell} declined");
            return Ok(RevealOutcome::Declined);
        }

        let affiliation = self.palette.affiliation_of(grid.background(cell)?);
        let mark = RevealMark::from_affiliation(affiliation);
        if !previous.is_empty() {
            log::debug!("{cell} was already marked {previous:?}");
        }
        grid.set_value(companion, mark.as_str())?;

        log::info!("Revealed {cell} {word:?} as {mark}");
        Ok(RevealOutcome::Revealed(mark))
    }

    /// Reset, draw words, draw colors. Nothing is written when the word list is too short.
    pub fn new_game<Doc, D>(&mut self, document: &mut Doc, dialog: &mut D) -> Result<Team>
    where
        Doc: Document + ?Sized,
        D: DialogSurface + ?Sized,
    {
        let pool = document.words()?.filtered_words()?;
        let required = usize::from(self.config.total_cards());
        if pool.len() < required {
            return Err(GameError::PoolTooSmall {
                required,
                available: pool.len(),
            });
        }

        let mut board = document.board()?;
        self.reset(&mut board)?;
        self.draw_words(&mut board, &pool)?;
        self.draw_colors(&mut board, dialog)
    }

    pub fn dispatch<Doc, D>(
        &mut self,
        action: MenuAction,
        document: &mut Doc,
        dialog: &mut D,
    ) -> Result<ActionOutcome>
    where
        Doc: Document + ?Sized,
        D: DialogSurface + ?Sized,
    {
        log::debug!("Running {action:?}");
        Ok(match action {
            MenuAction::NewGame => ActionOutcome::Started(self.new_game(document, dialog)?),
            MenuAction::Reset => {
                self.reset(&mut document.board()?)?;
                ActionOutcome::Cleared
            }
            MenuAction::RevealSelected(cell) => {
                ActionOutcome::Reveal(self.reveal_card(&mut document.board()?, dialog, cell)?)
            }
        })
    }

    /// Reads every card back from the grid.
    pub fn snapshot<G: GridSurface + ?Sized>(&self, grid: &G) -> Result<Array2<Card>> {
        let mut cards: Array2<Card> = Array2::default(self.config.size.to_nd_index());
        for coords in self.config.iter_coords() {
            let cell = grid.card(coords)?;
            let mark = grid.value(companion_cell(cell)?)?;
            cards[coords.to_nd_index()] = Card {
                word: grid.value(cell)?,
                affiliation: self.palette.affiliation_of(grid.background(cell)?),
                state: CardState::from_mark_text(&mark),
            };
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::string::ToString;

    /// Hands out `0, 1, 2, ...` so rejection sampling fills positions in order.
    struct Sequential {
        next: usize,
        heads: bool,
    }

    impl IndexSampler for Sequential {
        fn random_index(&mut self, bound: usize) -> usize {
            let index = self.next % bound;
            self.next += 1;
            index
        }

        fn coin_flip(&mut self) -> bool {
            self.heads
        }
    }

    fn pool(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("mot{i}")).collect()
    }

    fn workbook(words: usize) -> Workbook {
        Workbook::with_game_tabs(SheetLayout::default(), &GameConfig::classic(), &pool(words))
            .unwrap()
    }

    fn seeded(seed: u64) -> BoardController {
        BoardController::new(
            GameConfig::classic(),
            Palette::default(),
            RandomAssignmentEngine::from_seed(seed),
        )
        .unwrap()
    }

    fn count(cards: &Array2<Card>, affiliation: Affiliation) -> usize {
        cards
            .iter()
            .filter(|card| card.affiliation == Some(affiliation))
            .count()
    }

    #[test]
    fn placeholders_start_at_j() {
        let labels: Vec<_> = (0..5).map(|col| placeholder_label((0, col))).collect();

        assert_eq!(labels, ["J1", "K1", "L1", "M1", "N1"]);
        assert_eq!(placeholder_label((4, 4)), "N5");
    }

    #[test]
    fn reset_writes_placeholders_and_clears_state() {
        let mut book = workbook(30);
        let controller = seeded(1);
        let mut board = book.board().unwrap();

        let card = board.card((0, 0)).unwrap();
        board.set_background(card, Some(Palette::CLASSIC.red)).unwrap();
        board.set_value(companion_cell(card).unwrap(), "R").unwrap();

        controller.reset(&mut board).unwrap();

        assert_eq!(board.value(board.card((0, 0)).unwrap()).unwrap(), "J1");
        assert_eq!(board.value(board.card((1, 2)).unwrap()).unwrap(), "L2");
        let cards = controller.snapshot(&board).unwrap();
        assert!(cards.iter().all(|card| card.affiliation.is_none()));
        assert!(cards.iter().all(|card| card.state == CardState::Hidden));
    }

    #[test]
    fn reset_is_idempotent() {
        let controller = seeded(2);
        let mut once = workbook(30);
        controller.reset(&mut once.board().unwrap()).unwrap();

        let mut twice = once.clone();
        controller.reset(&mut twice.board().unwrap()).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn drawn_words_are_distinct_uppercased_pool_members() {
        let mut book = workbook(40);
        let mut controller = seeded(3);
        let words = pool(40);

        controller.draw_words(&mut book.board().unwrap(), &words).unwrap();

        let cards = controller.snapshot(&book.board().unwrap()).unwrap();
        let drawn: BTreeSet<_> = cards.iter().map(|card| card.word.clone()).collect();
        assert_eq!(drawn.len(), 25);
        for word in &drawn {
            assert!(words.iter().any(|candidate| candidate.to_uppercase() == *word));
        }
    }

    #[test]
    fn words_follow_draw_order_in_linear_positions() {
        let mut book = workbook(25);
        let mut controller =
            BoardController::new(GameConfig::classic(), Palette::default(), Sequential {
                next: 0,
                heads: false,
            })
            .unwrap();

        controller.draw_words(&mut book.board().unwrap(), &pool(25)).unwrap();

        let cards = controller.snapshot(&book.board().unwrap()).unwrap();
        assert_eq!(cards[[0, 0]].word, "MOT0");
        assert_eq!(cards[[1, 2]].word, "MOT7");
        assert_eq!(cards[[4, 4]].word, "MOT24");
    }

    #[test]
    fn short_pool_is_rejected_before_writing() {
        let mut book = workbook(30);
        let mut controller = seeded(4);
        controller.reset(&mut book.board().unwrap()).unwrap();
        let before = book.clone();

        let result = controller.draw_words(&mut book.board().unwrap(), &pool(24));

        assert_eq!(
            result,
            Err(GameError::PoolTooSmall {
                required: 25,
                available: 24
            })
        );
        assert_eq!(book, before);
    }

    #[test]
    fn color_counts_hold_for_many_seeds() {
        for seed in 0..50 {
            let mut book = workbook(30);
            let mut controller = seeded(seed);
            let mut dialog = ScriptedDialog::new();

            let start = controller
                .draw_colors(&mut book.board().unwrap(), &mut dialog)
                .unwrap();

            let cards = controller.snapshot(&book.board().unwrap()).unwrap();
            assert_eq!(count(&cards, Affiliation::Assassin), 1);
            assert_eq!(count(&cards, Affiliation::Neutral), 7);
            assert_eq!(count(&cards, start.affiliation()), 9);
            assert_eq!(count(&cards, start.other().affiliation()), 8);
            assert!(cards.iter().all(|card| card.affiliation.is_some()));
        }
    }

    #[test]
    fn colors_are_dealt_in_narrative_order() {
        let mut book = workbook(25);
        let mut controller =
            BoardController::new(GameConfig::classic(), Palette::default(), Sequential {
                next: 0,
                heads: true,
            })
            .unwrap();
        let mut dialog = ScriptedDialog::new();

        let start = controller
            .draw_colors(&mut book.board().unwrap(), &mut dialog)
            .unwrap();

        let cards = controller.snapshot(&book.board().unwrap()).unwrap();
        assert_eq!(start, Team::Blue);
        assert_eq!(cards[[0, 0]].affiliation, Some(Affiliation::Assassin));
        assert_eq!(cards[[0, 1]].affiliation, Some(Affiliation::Red));
        assert_eq!(cards[[0, 2]].affiliation, Some(Affiliation::Blue));
        // position 17 carries the starting team's extra card
        assert_eq!(cards[[3, 2]].affiliation, Some(Affiliation::Blue));
        assert_eq!(cards[[3, 3]].affiliation, Some(Affiliation::Neutral));
        assert_eq!(dialog.alerts(), ["Les BLEU commencent !"]);
    }

    #[test]
    fn announcement_names_the_starting_team() {
        let mut controller =
            BoardController::new(GameConfig::classic(), Palette::default(), Sequential {
                next: 0,
                heads: false,
            })
            .unwrap();
        let mut book = workbook(25);
        let mut dialog = ScriptedDialog::new();

        let start = controller
            .draw_colors(&mut book.board().unwrap(), &mut dialog)
            .unwrap();

        assert_eq!(start, Team::Red);
        assert_eq!(dialog.alerts(), ["Les ROUGE commencent !"]);
    }

    #[test]
    fn reveal_writes_mark_for_each_affiliation() {
        let controller = seeded(5);
        let cases = [
            (Some(Palette::CLASSIC.black), "X"),
            (Some(Palette::CLASSIC.blue), "B"),
            (Some(Palette::CLASSIC.red), "R"),
            (Some(Palette::CLASSIC.yellow), "Y"),
            (None, "Y"),
        ];

        for (background, expected) in cases {
            let mut book = workbook(25);
            let mut board = book.board().unwrap();
            controller.reset(&mut board).unwrap();
            let card = board.card((2, 3)).unwrap();
            board.set_background(card, background).unwrap();
            let mut dialog = ScriptedDialog::answering([true]);

            let outcome = controller.reveal_card(&mut board, &mut dialog, card).unwrap();

            assert!(outcome.has_update());
            assert_eq!(board.value(companion_cell(card).unwrap()).unwrap(), expected);
            assert_eq!(dialog.prompts(), ["Révéler \"M3\" ?"]);
        }
    }

    #[test]
    fn declined_reveal_changes_nothing() {
        let mut book = workbook(30);
        let mut controller = seeded(6);
        controller
            .new_game(&mut book, &mut ScriptedDialog::new())
            .unwrap();
        let before = book.clone();
        let card = book.board().unwrap().card((0, 0)).unwrap();
        let mut dialog = ScriptedDialog::answering([false]);

        let outcome = controller
            .reveal_card(&mut book.board().unwrap(), &mut dialog, card)
            .unwrap();

        assert_eq!(outcome, RevealOutcome::Declined);
        assert_eq!(book, before);
    }

    #[test]
    fn revealed_cards_stay_revealed_until_reset() {
        let mut book = workbook(30);
        let mut controller = seeded(7);
        controller
            .new_game(&mut book, &mut ScriptedDialog::new())
            .unwrap();
        let card = book.board().unwrap().card((4, 0)).unwrap();

        controller
            .reveal_card(&mut book.board().unwrap(), &mut ScriptedDialog::answering([true]), card)
            .unwrap();
        let cards = controller.snapshot(&book.board().unwrap()).unwrap();
        assert!(cards[[4, 0]].state.is_revealed());
        assert_eq!(cards.iter().filter(|card| card.state.is_revealed()).count(), 1);

        controller.reset(&mut book.board().unwrap()).unwrap();
        let cards = controller.snapshot(&book.board().unwrap()).unwrap();
        assert_eq!(cards[[4, 0]].state, CardState::Hidden);
        assert_eq!(cards[[4, 0]].word, "J5");
    }

    #[test]
    fn reveal_on_last_column_fails_before_asking() {
        let mut book = workbook(25);
        let controller = seeded(8);
        let mut dialog = ScriptedDialog::answering([true]);
        let edge = CellRef::new(2, 11);

        let result = controller.reveal_card(&mut book.board().unwrap(), &mut dialog, edge);

        assert_eq!(result, Err(GameError::InvalidCell(CellRef::new(2, 12))));
        assert!(dialog.prompts().is_empty());
    }

    #[test]
    fn new_game_fills_the_board_and_announces() {
        let mut book = workbook(60);
        let mut controller = seeded(9);
        let mut dialog = ScriptedDialog::new();

        let start = controller.new_game(&mut book, &mut dialog).unwrap();

        let cards = controller.snapshot(&book.board().unwrap()).unwrap();
        let words: BTreeSet<_> = cards.iter().map(|card| card.word.as_str()).collect();
        assert_eq!(words.len(), 25);
        assert!(words.iter().all(|word| word.starts_with("MOT")));
        assert_eq!(count(&cards, start.affiliation()), 9);
        assert_eq!(dialog.alerts(), [start_announcement(start)]);
    }

    #[test]
    fn new_game_with_short_pool_leaves_board_untouched() {
        let mut book = workbook(10);
        let mut controller = seeded(10);
        controller.reset(&mut book.board().unwrap()).unwrap();
        let before = book.clone();
        let mut dialog = ScriptedDialog::new();

        let result = controller.new_game(&mut book, &mut dialog);

        assert_eq!(
            result,
            Err(GameError::PoolTooSmall {
                required: 25,
                available: 10
            })
        );
        assert_eq!(book, before);
        assert!(dialog.alerts().is_empty());
    }

    #[test]
    fn new_game_reports_missing_tabs() {
        let mut controller = seeded(11);
        let mut dialog = ScriptedDialog::new();

        let mut no_words = workbook(30);
        no_words.remove_sheet("WORDS");
        assert_eq!(
            controller.new_game(&mut no_words, &mut dialog),
            Err(GameError::MissingResource("tab WORDS".to_string()))
        );

        let mut no_board = workbook(30);
        no_board.remove_sheet("BOARD");
        assert_eq!(
            controller.new_game(&mut no_board, &mut dialog),
            Err(GameError::MissingResource("tab BOARD".to_string()))
        );
    }

    #[test]
    fn dispatch_runs_menu_actions() {
        let mut book = workbook(30);
        let mut controller = seeded(12);
        let mut dialog = ScriptedDialog::answering([true]);

        let started = controller
            .dispatch(MenuAction::NewGame, &mut book, &mut dialog)
            .unwrap();
        assert!(matches!(started, ActionOutcome::Started(_)));

        let card = book.board().unwrap().card((1, 1)).unwrap();
        let revealed = controller
            .dispatch(MenuAction::RevealSelected(card), &mut book, &mut dialog)
            .unwrap();
        assert!(matches!(
            revealed,
            ActionOutcome::Reveal(RevealOutcome::Revealed(_))
        ));

        let cleared = controller
            .dispatch(MenuAction::Reset, &mut book, &mut dialog)
            .unwrap();
        assert_eq!(cleared, ActionOutcome::Cleared);
        let cards = controller.snapshot(&book.board().unwrap()).unwrap();
        assert!(cards.iter().all(|card| card.state == CardState::Hidden));
    }

    #[test]
    fn controller_rejects_invalid_config() {
        let result = BoardController::new(
            GameConfig::new_unchecked((2, 2), 2),
            Palette::default(),
            RandomAssignmentEngine::from_seed(0),
        );

        assert!(matches!(result, Err(GameError::TooManyCards { .. })));
    }

    #[test]
    fn controller_rejects_palette_with_shared_colors() {
        let palette = Palette {
            blue: Palette::CLASSIC.red,
            ..Palette::CLASSIC
        };
        let result = BoardController::new(
            GameConfig::classic(),
            palette,
            RandomAssignmentEngine::from_seed(0),
        );

        assert!(matches!(result, Err(GameError::InvalidPalette(..))));
    }
}
