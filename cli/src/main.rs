use anyhow::{Context, Result};
use clap::Parser;
use confinames_core::{
    ActionOutcome, BoardController, CellRef, DialogSurface, Document, GridSurface, IndexSampler,
    MENU_TITLE, MenuAction, Palette, RandomAssignmentEngine, RevealOutcome, ToNdIndex, Workbook,
};
use ndarray::Array2;
use std::io;
use std::path::Path;
use tracing_subscriber::filter::LevelFilter;

mod args;
mod config;
mod document;
mod render;
mod terminal;

use args::{Args, Command};
use config::AppConfig;
use terminal::TerminalDialog;

fn init_logging(level: log::LevelFilter) {
    let level = match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());
    log::debug!("seed: {:?}", args.seed);

    let config = AppConfig::load(args.config.as_deref())?;
    let engine = match args.seed {
        Some(seed) => RandomAssignmentEngine::from_seed(seed),
        None => RandomAssignmentEngine::from_entropy(),
    };

    match args.command {
        Command::Init { words, force } => {
            let controller = BoardController::new(config.game, config.palette, engine)
                .context("Unsupported game config")?;
            document::ensure_absent(&args.document, force)?;
            let words = document::read_word_list(&words)?;
            let mut workbook = Workbook::with_game_tabs(config.layout, &config.game, &words)?;
            controller.reset(&mut workbook.board()?)?;
            document::save(&args.document, &workbook)?;
            println!("{}: {} words", args.document.display(), words.len());
        }
        Command::Show { key } => {
            let mut workbook = document::load(&args.document)?;
            let controller = controller_for(&workbook, config.palette, engine)?;
            let board = workbook.board()?;
            let cards = controller.snapshot(&board)?;
            let mut cells =
                Array2::from_elem(controller.config().size.to_nd_index(), CellRef::new(0, 0));
            for coords in controller.config().iter_coords() {
                cells[coords.to_nd_index()] = board.card(coords)?;
            }
            render::render_board(&mut io::stdout().lock(), &cards, &cells, key)?;
        }
        Command::New => {
            perform(&args.document, config.palette, engine, MenuAction::NewGame, false)?
        }
        Command::Reset => {
            perform(&args.document, config.palette, engine, MenuAction::Reset, false)?
        }
        Command::Reveal { cell, yes } => perform(
            &args.document,
            config.palette,
            engine,
            MenuAction::RevealSelected(cell),
            yes,
        )?,
    }

    Ok(())
}

fn perform(
    path: &Path,
    palette: Palette,
    engine: RandomAssignmentEngine,
    action: MenuAction,
    assume_yes: bool,
) -> Result<()> {
    let mut dialog = TerminalDialog::new(io::stdin().lock(), io::stdout(), assume_yes);
    let outcome = run_action(path, palette, engine, action, &mut dialog)?;
    if let ActionOutcome::Reveal(RevealOutcome::Revealed(mark)) = outcome {
        println!("{mark}");
    }
    Ok(())
}

/// Controller sized for the board the document was created with.
fn controller_for<S: IndexSampler>(
    workbook: &Workbook,
    palette: Palette,
    sampler: S,
) -> Result<BoardController<S>> {
    BoardController::new(*workbook.game(), palette, sampler).context("Unsupported game config")
}

/// Runs one menu action against the document file, saving it only when something changed.
fn run_action<S: IndexSampler, D: DialogSurface>(
    path: &Path,
    palette: Palette,
    sampler: S,
    action: MenuAction,
    dialog: &mut D,
) -> Result<ActionOutcome> {
    let mut workbook = document::load(path)?;
    let mut controller = controller_for(&workbook, palette, sampler)?;

    let label = action.label().unwrap_or("reveal");
    let outcome = controller
        .dispatch(action, &mut workbook, dialog)
        .with_context(|| format!("{MENU_TITLE} > {label} failed"))?;

    if outcome.has_update() {
        document::save(path, &workbook)?;
    } else {
        log::info!("Nothing changed, {} left as is", path.display());
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use confinames_core::{GameConfig, ScriptedDialog, SheetLayout};
    use std::fs;
    use std::path::PathBuf;

    fn small_document(dir: &Path) -> PathBuf {
        let words: Vec<String> = (0..20).map(|i| format!("mot{i}")).collect();
        let config = GameConfig::new_unchecked((4, 4), 5);
        let workbook = Workbook::with_game_tabs(SheetLayout::default(), &config, &words).unwrap();
        let path = dir.join("partie.json");
        // Compact on purpose: `document::save` writes pretty JSON, so any save shows up.
        fs::write(&path, serde_json::to_string(&workbook).unwrap()).unwrap();
        path
    }

    fn first_card(path: &Path) -> CellRef {
        let mut workbook = document::load(path).unwrap();
        workbook.board().unwrap().card((0, 0)).unwrap()
    }

    #[test]
    fn declined_reveal_leaves_the_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = small_document(dir.path());
        let before = fs::read_to_string(&path).unwrap();
        let mut dialog = ScriptedDialog::answering([false]);

        let outcome = run_action(
            &path,
            Palette::default(),
            RandomAssignmentEngine::from_seed(1),
            MenuAction::RevealSelected(first_card(&path)),
            &mut dialog,
        )
        .unwrap();

        assert_eq!(outcome, ActionOutcome::Reveal(RevealOutcome::Declined));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn confirmed_reveal_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = small_document(dir.path());
        let before = fs::read_to_string(&path).unwrap();
        let mut dialog = ScriptedDialog::answering([true]);

        let outcome = run_action(
            &path,
            Palette::default(),
            RandomAssignmentEngine::from_seed(1),
            MenuAction::RevealSelected(first_card(&path)),
            &mut dialog,
        )
        .unwrap();

        assert!(outcome.has_update());
        assert_ne!(fs::read_to_string(&path).unwrap(), before);
        let mut workbook = document::load(&path).unwrap();
        let board = workbook.board().unwrap();
        let mark = board.value(first_card(&path).offset(0, 1).unwrap()).unwrap();
        assert_eq!(mark, "Y");
    }

    #[test]
    fn new_game_uses_the_board_size_stored_in_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = small_document(dir.path());
        let mut dialog = ScriptedDialog::new();

        let outcome = run_action(
            &path,
            Palette::default(),
            RandomAssignmentEngine::from_seed(7),
            MenuAction::NewGame,
            &mut dialog,
        )
        .unwrap();

        assert!(matches!(outcome, ActionOutcome::Started(_)));
        assert_eq!(dialog.alerts().len(), 1);
        let mut workbook = document::load(&path).unwrap();
        let controller =
            controller_for(&workbook, Palette::default(), RandomAssignmentEngine::from_seed(0))
                .unwrap();
        let cards = controller.snapshot(&workbook.board().unwrap()).unwrap();
        assert_eq!(cards.dim(), (4, 4));
        assert!(cards.iter().all(|card| card.affiliation.is_some()));
    }
}
