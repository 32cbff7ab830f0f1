// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Progress reporting.  The dispatcher reports each row as it hands
//! it to a worker, not when the row is finished, so the numbers are a
//! measure of throughput rather than a promise of completion.

use std::io::{self, Write};

/// Observes rows as they are dispatched.
pub trait Progress {
    /// Called after `row` (of `total`) has been handed to a worker.
    fn dispatched(&mut self, row: usize, total: usize);

    /// Called once, after the last row has been handed out.
    fn finish(&mut self) {}
}

/// Reports nothing.
impl Progress for () {
    fn dispatched(&mut self, _row: usize, _total: usize) {}
}

/// Writes `row/total (percent%)` over itself on a terminal line, and
/// ends the line when the last row is out.
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl ConsoleProgress<io::Stdout> {
    /// A progress line on standard output.
    pub fn stdout() -> Self {
        ConsoleProgress { out: io::stdout() }
    }
}

impl<W: Write> ConsoleProgress<W> {
    /// A progress line on any writer.
    pub fn new(out: W) -> Self {
        ConsoleProgress { out }
    }

    /// Gives back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

// Progress is decoration; a closed terminal must not stop the render,
// so write errors are dropped.
impl<W: Write> Progress for ConsoleProgress<W> {
    fn dispatched(&mut self, row: usize, total: usize) {
        let percent = if total == 0 { 100 } else { 100 * row / total };
        let _ = write!(self.out, "\r{}/{} ({}%)", row, total, percent);
        let _ = self.out.flush();
    }

    fn finish(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }
}
