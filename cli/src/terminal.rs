use confinames_core::DialogSurface;
use std::io::{BufRead, Write};

/// Dialogs on a line-based terminal: alerts are printed, confirmations read a yes/no answer.
pub(crate) struct TerminalDialog<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> TerminalDialog<R, W> {
    pub(crate) fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}

impl<R: BufRead, W: Write> DialogSurface for TerminalDialog<R, W> {
    fn alert(&mut self, message: &str) {
        if let Err(err) = writeln!(self.output, "{message}") {
            log::error!("failed to show alert: {:?}", err);
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            if let Err(err) = writeln!(self.output, "{message} [o/N] o") {
                log::error!("failed to show prompt: {:?}", err);
            }
            return true;
        }

        if let Err(err) = write!(self.output, "{message} [o/N] ").and_then(|_| self.output.flush()) {
            log::error!("failed to show prompt: {:?}", err);
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                log::error!("failed to read answer: {:?}", err);
                false
            }
        }
    }
}
