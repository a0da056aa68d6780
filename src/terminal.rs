//! Terminal surface: the front buffer the framebuffer is presented to.
//!
//! Each character cell shows two vertically stacked pixels with the upper
//! half block glyph, foreground for the upper pixel and background for the
//! lower one.

use crate::error::ContextError;
use crate::graphics::FrameBuffer;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
    tty::IsTty,
};
use log::{info, warn};
use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

const UPPER_HALF_BLOCK: char = '▀';
const OVERLAY_COLOR: Color = Color::Rgb {
    r: 255,
    g: 255,
    b: 255,
};

pub struct Terminal {
    out: BufWriter<Stdout>,
    columns: u16,
    rows: u16,
}

impl Terminal {
    /// Switches the terminal to raw mode on the alternate screen.
    ///
    /// The terminal is restored when the value is dropped.
    pub fn open() -> Result<Self, ContextError> {
        let stdout = io::stdout();
        if !stdout.is_tty() {
            return Err(ContextError::NotATerminal);
        }
        let size = termsize::get().ok_or(ContextError::SizeUnavailable)?;
        if size.cols == 0 || size.rows == 0 {
            return Err(ContextError::InvalidDimensions {
                width: size.cols as usize,
                height: size.rows as usize * 2,
            });
        }

        terminal::enable_raw_mode()?;
        let mut terminal = Terminal {
            out: BufWriter::new(stdout),
            columns: size.cols,
            rows: size.rows,
        };
        execute!(
            terminal.out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(terminal::ClearType::All)
        )?;
        info!("terminal surface {}x{} cells", size.cols, size.rows);
        Ok(terminal)
    }

    /// Pixel dimensions of the surface
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.columns as usize, self.rows as usize * 2)
    }

    /// Drains pending input without blocking; true once a quit key was seen
    pub fn poll_quit(&mut self) -> io::Result<bool> {
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            quit |= is_quit(&event::read()?);
        }
        Ok(quit)
    }

    /// Copies the framebuffer to the screen, with `overlay` lines of text on top
    pub fn present(&mut self, frame: &FrameBuffer, overlay: &[String]) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let columns = frame.width().min(self.columns as usize);
        let rows = frame.height().div_ceil(2).min(self.rows as usize);
        for row in 0..rows {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            let mut current: Option<(Color, Color)> = None;
            for column in 0..columns {
                let (upper, lower) = cell_colors(frame, column, row);
                if current != Some((upper, lower)) {
                    queue!(self.out, SetForegroundColor(upper), SetBackgroundColor(lower))?;
                    current = Some((upper, lower));
                }
                queue!(self.out, Print(UPPER_HALF_BLOCK))?;
            }
        }

        for (row, line) in overlay.iter().enumerate().take(self.rows as usize) {
            let text: String = line.chars().take(self.columns as usize).collect();
            queue!(
                self.out,
                cursor::MoveTo(0, row as u16),
                SetForegroundColor(OVERLAY_COLOR),
                SetBackgroundColor(Color::Black),
                Print(text)
            )?;
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        ) {
            warn!("failed to leave the alternate screen: {err}");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("failed to disable raw mode: {err}");
        }
    }
}

/// Foreground and background colors of the cell at `(column, row)`
fn cell_colors(frame: &FrameBuffer, column: usize, row: usize) -> (Color, Color) {
    let upper = frame.pixel(column, row * 2);
    let lower = if row * 2 + 1 < frame.height() {
        frame.pixel(column, row * 2 + 1)
    } else {
        [0, 0, 0, 255]
    };
    (rgb(upper), rgb(lower))
}

fn rgb([r, g, b, _]: [u8; 4]) -> Color {
    Color::Rgb { r, g, b }
}

/// Keys that close the view: Esc, q, or Ctrl+C since raw mode swallows SIGINT
fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{draw_triangle, Shading};
    use crate::vertex::Vertex;
    use glam::{DVec3, DVec4};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn quit_keys_are_recognised() {
        assert!(is_quit(&press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&press(KeyCode::Char('p'), KeyModifiers::NONE)));
        assert!(!is_quit(&Event::Resize(80, 24)));
    }

    #[test]
    fn key_release_does_not_quit() {
        let mut release = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_quit(&Event::Key(release)));
    }

    #[test]
    fn cells_pair_adjacent_pixel_rows() {
        let mut frame = FrameBuffer::new(2, 3);
        frame.clear();
        // Fill the top pixel row only
        let vertex = |x: f64, y: f64| Vertex {
            normal: DVec3::Z,
            screen_position: [x, y],
            depth: 0.0,
        };
        draw_triangle(
            &vertex(0.0, 0.0),
            &vertex(4.0, 0.0),
            &vertex(0.0, 1.0),
            &mut frame,
            &Shading::Flat(DVec4::new(1.0, 0.0, 0.0, 1.0)),
        );

        let red = Color::Rgb { r: 255, g: 0, b: 0 };
        let black = Color::Rgb { r: 0, g: 0, b: 0 };
        assert_eq!(cell_colors(&frame, 0, 0), (red, black));
        // The odd last row is padded with black
        assert_eq!(cell_colors(&frame, 0, 1), (black, black));
    }
}
