//! Terminal dialogs for the native binary: alerts are printed, confirmations are
//! read from the input stream, and a page reload is reported as a notice.

use super::Dialogs;
use std::{
    cell::RefCell,
    io::{self, BufRead, BufReader, Stdin, Stdout, Write},
};
use tracing::debug;

pub struct TerminalDialogs<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
    assume_yes: bool,
}

impl TerminalDialogs<BufReader<Stdin>, Stdout> {
    #[must_use]
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> TerminalDialogs<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
            assume_yes,
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn write_line(&self, line: &str) {
        let mut output = self.output.borrow_mut();
        if writeln!(output, "{line}").and_then(|()| output.flush()).is_err() {
            debug!("terminal output closed");
        }
    }
}

impl<R: BufRead, W: Write> Dialogs for TerminalDialogs<R, W> {
    fn alert(&self, message: &str) {
        self.write_line(message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            self.write_line(&format!("{message} [y/N] y"));
            return true;
        }

        {
            let mut output = self.output.borrow_mut();
            if write!(output, "{message} [y/N] ")
                .and_then(|()| output.flush())
                .is_err()
            {
                return false;
            }
        }

        let mut answer = String::new();
        match self.input.borrow_mut().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(err) => {
                debug!("failed to read confirmation: {err}");
                false
            }
        }
    }

    fn reload(&self) {
        self.write_line("(page reload requested)");
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
