use crate::nav::keys::Key;
use crate::theme::{Emphasis, Theme};
use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend, TestBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::collections::VecDeque;
use std::io::Stdout;

/// Character-grid terminal the menu draws on and reads keys from.
pub trait Surface {
    /// Visible `(rows, cols)`.
    fn size(&self) -> Result<(u16, u16)>;
    fn clear(&mut self) -> Result<()>;
    fn write_styled(&mut self, row: u16, col: u16, text: &str, emphasis: Emphasis) -> Result<()>;
    /// Blocks until the next key press. No timeout.
    fn read_key(&mut self) -> Result<Key>;
}

pub trait KeySource {
    fn next_key(&mut self) -> Result<Key>;
}

/// Reads key presses from the real terminal via crossterm.
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> Result<Key> {
        loop {
            // Release/repeat events (kitty protocol, Windows) and non-key events are skipped
            if let Event::Key(key) = event::read().context("reading terminal event")? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Key::from(key.code));
                }
            }
        }
    }
}

/// Pre-recorded key sequence, for headless runs and tests.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| anyhow!("key script exhausted before the menu finished"))
    }
}

/// A [`Surface`] backed by a ratatui terminal.
///
/// Writes are composed into an off-screen buffer sized once at construction
/// (resizing is not supported) and presented with a single `Terminal::draw`
/// right before blocking on the next key.
pub struct TerminalSurface<B: Backend, K: KeySource> {
    terminal: Terminal<B>,
    keys: K,
    frame: Buffer,
    theme: Theme,
}

pub type CrosstermSurface = TerminalSurface<CrosstermBackend<Stdout>, CrosstermKeys>;
pub type ScriptedSurface = TerminalSurface<TestBackend, ScriptedKeys>;

impl<B: Backend, K: KeySource> TerminalSurface<B, K> {
    pub fn new(backend: B, keys: K, theme: Theme) -> Result<Self> {
        let terminal = Terminal::new(backend).context("creating terminal")?;
        let size = terminal.size().context("querying terminal size")?;
        let frame = Buffer::empty(Rect::new(0, 0, size.width, size.height));
        Ok(Self {
            terminal,
            keys,
            frame,
            theme,
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    /// The frame composed since the last `clear`, whether presented or not.
    pub fn frame(&self) -> &Buffer {
        &self.frame
    }

    fn present(&mut self) -> Result<()> {
        let Self {
            terminal, frame, ..
        } = self;
        terminal
            .draw(|f| {
                let area = f.area();
                let buf = f.buffer_mut();
                for y in 0..area.height.min(frame.area.height) {
                    for x in 0..area.width.min(frame.area.width) {
                        buf[(x, y)] = frame[(x, y)].clone();
                    }
                }
            })
            .context("drawing frame")?;
        Ok(())
    }
}

impl ScriptedSurface {
    pub fn scripted(rows: u16, cols: u16, keys: impl IntoIterator<Item = Key>) -> Result<Self> {
        Self::new(
            TestBackend::new(cols, rows),
            ScriptedKeys::new(keys),
            Theme::plain(),
        )
    }
}

impl CrosstermSurface {
    /// Surface over stdout. Pair with a [`Session`] so the terminal is in raw mode.
    pub fn stdout(theme: Theme) -> Result<Self> {
        Self::new(CrosstermBackend::new(std::io::stdout()), CrosstermKeys, theme)
    }
}

impl<B: Backend, K: KeySource> Surface for TerminalSurface<B, K> {
    fn size(&self) -> Result<(u16, u16)> {
        Ok((self.frame.area.height, self.frame.area.width))
    }

    fn clear(&mut self) -> Result<()> {
        self.frame.reset();
        Ok(())
    }

    fn write_styled(&mut self, row: u16, col: u16, text: &str, emphasis: Emphasis) -> Result<()> {
        let area = self.frame.area;
        if row >= area.height || col >= area.width {
            return Ok(());
        }
        let max_width = (area.width - col) as usize;
        let style = self.theme.style_for(emphasis);
        self.frame
            .set_stringn(area.x + col, area.y + row, text, max_width, style);
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key> {
        self.present()?;
        self.keys.next_key()
    }
}

/// Raw mode + alternate screen for the lifetime of the value.
pub struct Session {
    _private: (),
}

impl Session {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = std::io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("entering alternate screen");
        }
        Ok(Self { _private: () })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

/// Text content of each buffer row, trailing blanks trimmed.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let mut lines = Vec::with_capacity(buf.area.height as usize);
    for y in buf.area.top()..buf.area.bottom() {
        let mut line = String::new();
        for x in buf.area.left()..buf.area.right() {
            line.push_str(buf[(x, y)].symbol());
        }
        while line.ends_with(' ') {
            line.pop();
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    #[test]
    fn writes_are_clipped_to_the_frame() {
        let mut s = ScriptedSurface::scripted(2, 8, std::iter::empty()).unwrap();
        s.write_styled(0, 0, "abcdefghijk", Emphasis::Normal).unwrap();
        s.write_styled(1, 6, "xyz", Emphasis::Reversed).unwrap();
        s.write_styled(5, 0, "off screen", Emphasis::Normal).unwrap();
        s.write_styled(0, 20, "off screen", Emphasis::Normal).unwrap();
        let lines = buffer_lines(s.frame());
        assert_eq!(lines, vec!["abcdefgh".to_string(), "      xy".to_string()]);
        assert!(s.frame()[(6, 1)].modifier.contains(Modifier::REVERSED));
        assert!(!s.frame()[(0, 0)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn read_key_presents_the_frame_then_pops_the_script() {
        let mut s = ScriptedSurface::scripted(3, 10, [Key::Down]).unwrap();
        assert_eq!(s.size().unwrap(), (3, 10));
        s.write_styled(1, 2, "hi", Emphasis::Normal).unwrap();
        assert_eq!(s.read_key().unwrap(), Key::Down);
        let shown = buffer_lines(s.terminal().backend().buffer());
        assert_eq!(shown[1], "  hi");
        assert_eq!(s.keys().remaining(), 0);
        assert!(s.read_key().is_err());
    }

    #[test]
    fn clear_blanks_the_composed_frame() {
        let mut s = ScriptedSurface::scripted(1, 5, std::iter::empty()).unwrap();
        s.write_styled(0, 0, "abc", Emphasis::Normal).unwrap();
        s.clear().unwrap();
        assert_eq!(buffer_lines(s.frame()), vec![String::new()]);
    }
}
