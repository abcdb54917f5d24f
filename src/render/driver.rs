use super::{Canvas, Clock, Pollable, PollableState, RenderError};
use crate::animations::ProgressEllipsis;

/// Drives an ellipsis on behalf of a host that ticks once per frame.
///
/// Every poll samples the clock once, advances the ring to that instant and paints it. The
/// ellipsis never settles so every frame is reported as modified, until the optional frame limit
/// is reached.
pub struct EllipsisPollable<K, C> {
    ellipsis: ProgressEllipsis,
    clock: K,
    canvas: C,
    frame_limit: Option<u64>,
    frames: u64,
}

impl<K: Clock, C: Canvas> EllipsisPollable<K, C> {
    pub fn new(ellipsis: ProgressEllipsis, clock: K, canvas: C) -> Self {
        Self { ellipsis, clock, canvas, frame_limit: None, frames: 0 }
    }

    /// Stop after drawing `limit` frames.
    pub fn with_frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = limit;
        self
    }

    pub fn ellipsis(&self) -> &ProgressEllipsis {
        &self.ellipsis
    }

    pub fn ellipsis_mut(&mut self) -> &mut ProgressEllipsis {
        &mut self.ellipsis
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// The number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Restart the animation at the current time.
    pub fn restart(&mut self) {
        self.ellipsis.activate(self.clock.now());
    }
}

impl<K: Clock, C: Canvas> Pollable for EllipsisPollable<K, C> {
    fn poll(&mut self) -> Result<PollableState, RenderError> {
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            return Ok(PollableState::Done);
        }
        let now = self.clock.now();
        // Start on first poll
        if self.frames == 0 && !self.ellipsis.is_active() {
            self.ellipsis.activate(now);
        }
        self.canvas.begin_frame()?;
        self.ellipsis.draw(now, &mut self.canvas)?;
        self.canvas.finish_frame()?;
        self.frames += 1;
        Ok(PollableState::Modified)
    }
}
