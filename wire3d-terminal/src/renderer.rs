/// Crossterm display for serialized frames
use crossterm::{
    cursor,
    style::Print,
    terminal::{self, Clear, ClearType},
    QueueableCommand,
};
use std::io::{self, Write};

use crate::FrameSink;

/// Writes frames to a terminal, one row per screen line
pub struct TerminalSink<W: Write> {
    writer: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.writer.queue(Clear(ClearType::All))?;
        self.writer.queue(cursor::MoveTo(0, 0))?;
        Ok(())
    }

    fn emit(&mut self, frame: &str) -> io::Result<()> {
        // Raw mode does not return the carriage on '\n', so position each row
        for (row, line) in frame.lines().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            self.writer.queue(cursor::MoveTo(0, row))?;
            self.writer.queue(Print(line))?;
        }
        self.writer.flush()
    }
}

/// Puts the terminal into raw mode on the alternate screen and restores it on drop
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.queue(terminal::EnterAlternateScreen)?;
        stdout.queue(cursor::Hide)?;
        stdout.flush()?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let restored = stdout
            .queue(terminal::LeaveAlternateScreen)
            .and_then(|out| out.queue(cursor::Show))
            .and_then(|out| out.flush())
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(e) = restored {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}
