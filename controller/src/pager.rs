// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! Screenful-at-a-time output.
//!
//! The whole result is rendered before paging starts; the pager only decides
//! where to stop and wait for the operator.

use anyhow::Error;
use console::Term;
use std::io::{self, BufRead, IsTerminal, Write};

/// Something that waits until the operator wants to see more
pub trait Acknowledge {
    fn acknowledge(&mut self) -> Result<(), Error>;
}

/// Prompts on stdout and blocks until a line is read from stdin
#[derive(Debug, Default)]
pub struct EnterToContinue;

impl Acknowledge for EnterToContinue {
    fn acknowledge(&mut self) -> Result<(), Error> {
        print!("Press Enter to continue...");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}

/// Never blocks, for scripted sessions and tests
#[derive(Debug, Default)]
pub struct NoPause;

impl Acknowledge for NoPause {
    fn acknowledge(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<A: Acknowledge + ?Sized> Acknowledge for Box<A> {
    fn acknowledge(&mut self) -> Result<(), Error> {
        (**self).acknowledge()
    }
}

/// Waiting only makes sense when the operator reads stdout and types on
/// stdin, piped input would otherwise be eaten by the pause
pub fn should_pause(no_pause: bool, stdin_tty: bool, stdout_tty: bool) -> bool {
    !no_pause && stdin_tty && stdout_tty
}

/// [`EnterToContinue`] for an attended session, [`NoPause`] otherwise
pub fn acknowledger(no_pause: bool) -> Box<dyn Acknowledge> {
    if should_pause(no_pause, io::stdin().is_terminal(), console::user_attended()) {
        Box::new(EnterToContinue)
    } else {
        log::debug!("Not attended, paging without pauses");
        Box::new(NoPause)
    }
}

/// Current height of the terminal attached to stdout, if any
pub fn terminal_height() -> Option<usize> {
    Term::stdout()
        .size_checked()
        .map(|(rows, _cols)| rows as usize)
}

pub struct Pager<W, A> {
    out: W,
    ack: A,
    height: usize,
}

impl<W: Write, A: Acknowledge> Pager<W, A> {
    pub fn new(out: W, ack: A, height: usize) -> Self {
        Self { out, ack, height }
    }

    /// Build a pager whose height is read from the terminal right now,
    /// `fallback` is used when stdout isn't a terminal
    pub fn for_terminal(out: W, ack: A, fallback: usize) -> Self {
        let height = terminal_height().unwrap_or(fallback);
        Self::new(out, ack, height)
    }

    /// Lines shown before each pause, one row is left for the prompt
    pub fn lines_per_page(&self) -> usize {
        self.height.saturating_sub(1).max(1)
    }

    /// Write every line, pausing after each screenful (the last one
    /// included). Returns how many times the operator was asked to continue
    pub fn page<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<usize, Error> {
        let per_page = self.lines_per_page();
        let mut pauses = 0;

        for page in lines.chunks(per_page) {
            for line in page {
                writeln!(self.out, "{}", line.as_ref())?;
            }

            self.out.flush()?;
            self.ack.acknowledge()?;
            pauses += 1;
        }

        log::debug!(
            "Paged {} lines in {} screens of {}",
            lines.len(),
            pauses,
            per_page
        );

        Ok(pauses)
    }

    pub fn into_inner(self) -> (W, A) {
        (self.out, self.ack)
    }
}
