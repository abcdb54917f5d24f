use super::{Canvas, RenderError};
use crate::animations::Color;
use crossterm::QueueableCommand;
use crossterm::cursor::MoveToColumn;
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use std::io::Write;

const DOT: char = '●';

/// Paints dots on a single terminal line, one column per layout unit.
///
/// Terminal cells can't be translucent, so every dot is blended against the strip's background
/// color before being printed.
pub struct TerminalCanvas<W: Write> {
    writer: W,
    width: u16,
    background: Color,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(writer: W, width: u16, background: Color) -> Self {
        Self { writer, width, background }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn as_terminal_color(color: Color) -> style::Color {
        style::Color::Rgb { r: color.r, g: color.g, b: color.b }
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        let strip = " ".repeat(self.width as usize);
        self.writer
            .queue(MoveToColumn(0))?
            .queue(SetBackgroundColor(Self::as_terminal_color(self.background)))?
            .queue(Print(strip))?;
        Ok(())
    }

    fn fill_circle(&mut self, center_x: f32, _center_y: f32, radius: f32, color: Color) -> Result<(), RenderError> {
        let left = (center_x - radius).round();
        if left < 0.0 || left >= self.width as f32 {
            return Ok(());
        }
        let color = color.blend_over(self.background);
        self.writer
            .queue(MoveToColumn(left as u16))?
            .queue(SetBackgroundColor(Self::as_terminal_color(self.background)))?
            .queue(SetForegroundColor(Self::as_terminal_color(color)))?
            .queue(Print(DOT))?;
        Ok(())
    }

    fn finish_frame(&mut self) -> Result<(), RenderError> {
        self.writer.queue(ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }
}
