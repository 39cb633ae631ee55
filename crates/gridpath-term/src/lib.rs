//! Crossterm terminal driver for gridpath.
//!
//! Provides a [`TermDriver`] that draws a [`Grid`] into the terminal, one
//! character per node, and reads keyboard input. Full redraws go through
//! [`TermDriver::draw`]; playback updates go through [`TermDriver::flush`]
//! with the [`Frame`] of changed nodes.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::{Classification, Coord, Frame, Grid, Node};

/// A key press relevant to the visualiser.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Character and colours used to draw a node.
fn glyph(node: &Node) -> (char, Color, Color) {
    match node.classification {
        Classification::Empty => ('·', Color::DarkGrey, Color::Reset),
        Classification::Wall => (' ', Color::Reset, Color::Grey),
        Classification::Start => ('S', Color::Black, Color::Green),
        Classification::End => ('E', Color::Black, Color::Red),
        Classification::Visited => ('•', Color::Cyan, Color::DarkBlue),
        Classification::Path => ('*', Color::Black, Color::Yellow),
    }
}

/// Terminal back-end for the visualiser.
#[derive(Debug, Default)]
pub struct TermDriver {
    cursor: Option<Coord>,
    status_row: u16,
}

impl TermDriver {
    /// Create a new driver. Call [`init`](Self::init) before drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
    }

    /// Wait up to `timeout` for a key press.
    ///
    /// Returns `None` on timeout and for events that are not key presses.
    pub fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => Ok(to_key(code)),
            _ => Ok(None),
        }
    }

    /// Set the highlighted cell. Takes effect on the next draw.
    pub fn set_cursor(&mut self, at: Option<Coord>) {
        self.cursor = at;
    }

    /// Redraw the whole grid and the status line below it.
    pub fn draw(&mut self, grid: &Grid, status: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, terminal::Clear(ClearType::All))?;
        for node in grid.iter() {
            self.put(&mut stdout, node)?;
        }
        self.status_row = u16::try_from(grid.rows()).unwrap_or(u16::MAX).saturating_add(1);
        self.status(status)?;
        stdout.flush()
    }

    /// Redraw only the nodes in `frame`.
    pub fn flush(&mut self, frame: &Frame) -> io::Result<()> {
        let mut stdout = io::stdout();
        for node in &frame.nodes {
            self.put(&mut stdout, node)?;
        }
        stdout.flush()
    }

    /// Replace the status line.
    pub fn status(&mut self, text: &str) -> io::Result<()> {
        execute!(
            io::stdout(),
            cursor::MoveTo(0, self.status_row),
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )
    }

    /// Leave the alternate screen and restore the terminal.
    pub fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }

    fn put(&self, out: &mut impl Write, node: &Node) -> io::Result<()> {
        let (Ok(x), Ok(y)) = (u16::try_from(node.coord.col), u16::try_from(node.coord.row)) else {
            return Ok(());
        };
        let (ch, mut fg, mut bg) = glyph(node);
        if self.cursor == Some(node.coord) {
            (fg, bg) = (Color::Black, Color::White);
        }
        execute!(
            out,
            cursor::MoveTo(x, y),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(ch),
            ResetColor
        )
    }
}

impl Drop for TermDriver {
    fn drop(&mut self) {
        if terminal::is_raw_mode_enabled().unwrap_or(false) {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_keys() {
        assert_eq!(to_key(KeyCode::Char('q')), Some(Key::Char('q')));
        assert_eq!(to_key(KeyCode::Up), Some(Key::Up));
        assert_eq!(to_key(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(to_key(KeyCode::Tab), None);
    }

    #[test]
    fn every_classification_is_distinct() {
        let at = Coord::new(0, 0);
        let classes = [
            Classification::Empty,
            Classification::Wall,
            Classification::Start,
            Classification::End,
            Classification::Visited,
            Classification::Path,
        ];
        let glyphs: Vec<_> = classes
            .iter()
            .map(|&c| glyph(&Node::new(at).with_classification(c)))
            .collect();
        for (i, a) in glyphs.iter().enumerate() {
            for b in &glyphs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
