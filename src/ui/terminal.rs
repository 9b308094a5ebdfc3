//! ui::terminal
//!
//! Line-oriented terminal output with cursor control.
//!
//! # Design
//!
//! The confirmation loop redraws its summary in place: it erases the lines
//! it wrote, lets nested prompts run, then moves the cursor back up by the
//! number of rows those prompts scrolled. [`TerminalWriter`] is the narrow
//! capability it needs for that, passed in explicitly so that tests can
//! substitute [`RecordingTerminal`].

use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::{cursor, queue, terminal};

/// Terminal capability used by the confirmation loop.
pub trait TerminalWriter {
    /// Write text at the cursor.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Erase `count` lines ending at the cursor line, leaving the cursor at
    /// column 0 of the topmost erased line.
    fn erase_lines(&mut self, count: usize) -> io::Result<()>;

    /// Zero-based row of the cursor.
    fn cursor_row(&mut self) -> io::Result<u16>;

    fn move_cursor_up(&mut self, rows: u16) -> io::Result<()>;

    /// Clear from the cursor to the end of the screen.
    fn clear_below(&mut self) -> io::Result<()>;

    /// Terminal size as `(columns, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;
}

/// [`TerminalWriter`] on stdout.
#[derive(Debug)]
pub struct CrosstermTerminal {
    out: io::Stdout,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter for CrosstermTerminal {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn erase_lines(&mut self, count: usize) -> io::Result<()> {
        for i in 0..count {
            queue!(self.out, terminal::Clear(terminal::ClearType::CurrentLine))?;
            if i + 1 < count {
                queue!(self.out, cursor::MoveUp(1))?;
            }
        }
        if count > 0 {
            queue!(self.out, cursor::MoveToColumn(0))?;
        }
        self.out.flush()
    }

    fn cursor_row(&mut self) -> io::Result<u16> {
        cursor::position().map(|(_, row)| row)
    }

    fn move_cursor_up(&mut self, rows: u16) -> io::Result<()> {
        if rows > 0 {
            queue!(self.out, cursor::MoveUp(rows))?;
        }
        self.out.flush()
    }

    fn clear_below(&mut self) -> io::Result<()> {
        queue!(self.out, terminal::Clear(terminal::ClearType::FromCursorDown))?;
        self.out.flush()
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

/// One call recorded by [`RecordingTerminal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalOp {
    Write(String),
    EraseLines(usize),
    MoveCursorUp(u16),
    ClearBelow,
}

/// In-memory [`TerminalWriter`] for tests.
///
/// Tracks the cursor row by counting written newlines (scrolling at the
/// bottom of the screen) unless rows have been scripted with
/// [`RecordingTerminal::with_cursor_rows`].
#[derive(Debug, Clone)]
pub struct RecordingTerminal {
    pub ops: Vec<TerminalOp>,
    columns: u16,
    rows: u16,
    row: u16,
    scripted_rows: VecDeque<u16>,
}

impl RecordingTerminal {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            ops: Vec::new(),
            columns,
            rows,
            row: 0,
            scripted_rows: VecDeque::new(),
        }
    }

    /// Answer the next `cursor_row` calls with these rows, in order.
    pub fn with_cursor_rows(mut self, rows: impl IntoIterator<Item = u16>) -> Self {
        self.scripted_rows.extend(rows);
        self
    }

    /// Everything written, concatenated.
    pub fn output(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TerminalOp::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All writes, in order.
    pub fn writes(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TerminalOp::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All `erase_lines` counts, in order.
    pub fn erasures(&self) -> Vec<usize> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TerminalOp::EraseLines(n) => Some(*n),
                _ => None,
            })
            .collect()
    }
}

impl TerminalWriter for RecordingTerminal {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let newlines = text.matches('\n').count();
        let max_row = self.rows.saturating_sub(1);
        self.row = (self.row as usize + newlines).min(max_row as usize) as u16;
        self.ops.push(TerminalOp::Write(text.to_string()));
        Ok(())
    }

    fn erase_lines(&mut self, count: usize) -> io::Result<()> {
        let up = count.saturating_sub(1).min(u16::MAX as usize) as u16;
        self.row = self.row.saturating_sub(up);
        self.ops.push(TerminalOp::EraseLines(count));
        Ok(())
    }

    fn cursor_row(&mut self) -> io::Result<u16> {
        Ok(self.scripted_rows.pop_front().unwrap_or(self.row))
    }

    fn move_cursor_up(&mut self, rows: u16) -> io::Result<()> {
        self.row = self.row.saturating_sub(rows);
        self.ops.push(TerminalOp::MoveCursorUp(rows));
        Ok(())
    }

    fn clear_below(&mut self) -> io::Result<()> {
        self.ops.push(TerminalOp::ClearBelow);
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.columns, self.rows))
    }
}
