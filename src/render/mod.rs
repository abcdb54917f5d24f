mod clock;
mod driver;
mod terminal;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use driver::EllipsisPollable;
pub use terminal::TerminalCanvas;

use crate::animations::Color;

/// A surface dots can be painted on.
pub trait Canvas {
    /// Prepare for a new frame, wiping the previous one.
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Paint a filled circle. The color's alpha channel carries the dot's opacity.
    fn fill_circle(&mut self, center_x: f32, center_y: f32, radius: f32, color: Color) -> Result<(), RenderError>;

    /// Present everything painted since [Canvas::begin_frame].
    fn finish_frame(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// The state of a pollable after being polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollableState {
    /// The frame changed and needs to be presented.
    Modified,
    /// Nothing will change anymore.
    Done,
}

/// Something that is advanced by being polled once per host tick.
pub trait Pollable {
    fn poll(&mut self) -> Result<PollableState, RenderError>;
}

/// Errors that can occur when drawing
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
