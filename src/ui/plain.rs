//! Clear-and-print rendering for terminals where a full-screen UI is not
//! wanted.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::format::summary_lines;
use crate::system::snapshot::TickReport;

pub fn render<W: Write>(out: &mut W, report: &TickReport, clock: &str) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    for line in summary_lines(report, clock) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
