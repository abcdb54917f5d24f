use super::common::{ALPHA_RANGE, Millis, Timing};

/// The way a dot's opacity is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeDirection {
    /// No transition has been started since the last reset.
    #[default]
    Idle,
    FadingIn,
    FadingOut,
}

/// The instruction a dot hands to the next dot in the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOff {
    FadeIn,
    FadeOut,
}

/// A single linear fade between two opacities.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: u8,
    to: u8,
    direction: FadeDirection,
    start: Millis,
    timing: Timing,
}

impl Transition {
    fn settled() -> Self {
        Self { from: 0, to: 0, direction: FadeDirection::Idle, start: 0, timing: Timing::default() }
    }

    /// How far along this transition is at `now`, in `[0, 1]`.
    fn factor(&self, now: Millis) -> f32 {
        if self.timing.duration == 0 {
            return 1.0;
        }
        // A clock that went backwards counts as no time elapsed
        let elapsed = now.saturating_sub(self.start);
        if elapsed == 0 {
            return 0.0;
        }
        (elapsed as f32 / self.timing.duration as f32).min(1.0)
    }
}

/// One animated dot in the ellipsis ring.
///
/// A dot only knows whether it's the last one in the ring. Advancing it returns the instruction
/// for its successor, which the ring owner then applies, so dots never hold references to each
/// other.
#[derive(Debug, Clone)]
pub struct Dot {
    current: u8,
    transition: Transition,
    has_broadcast_next: bool,
    is_terminal: bool,
}

impl Dot {
    pub fn new(is_terminal: bool) -> Self {
        Self { current: 0, transition: Transition::settled(), has_broadcast_next: false, is_terminal }
    }

    /// The opacity this dot should be drawn with.
    pub fn opacity(&self) -> u8 {
        self.current
    }

    pub fn direction(&self) -> FadeDirection {
        self.transition.direction
    }

    /// Whether this is the last dot in the ring, the one whose hand-off flips direction.
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Whether the current transition has reached its destination.
    pub fn is_settled(&self) -> bool {
        self.current == self.transition.to
    }

    /// Whether the current transition already started the next dot.
    pub fn has_broadcast_next(&self) -> bool {
        self.has_broadcast_next
    }

    /// Go back to a fully transparent dot with nothing in flight.
    pub fn reset(&mut self) {
        self.current = 0;
        self.transition = Transition::settled();
        self.has_broadcast_next = false;
    }

    pub fn start_fade_in(&mut self, now: Millis, timing: Timing) {
        self.start(now, 0, ALPHA_RANGE, timing);
    }

    pub fn start_fade_out(&mut self, now: Millis, timing: Timing) {
        self.start(now, ALPHA_RANGE, 0, timing);
    }

    /// Apply an instruction handed over by the previous dot.
    pub fn receive(&mut self, hand_off: HandOff, now: Millis, timing: Timing) {
        match hand_off {
            HandOff::FadeIn => self.start_fade_in(now, timing),
            HandOff::FadeOut => self.start_fade_out(now, timing),
        }
    }

    fn start(&mut self, now: Millis, from: u8, to: u8, timing: Timing) {
        let direction = if to > from { FadeDirection::FadingIn } else { FadeDirection::FadingOut };
        self.transition = Transition { from, to, direction, start: now, timing };
        self.current = from;
        self.has_broadcast_next = false;
    }

    /// Move this dot's opacity to where it should be at `now`.
    ///
    /// Returns the instruction for the next dot the first time this transition crosses its
    /// threshold (or completes, whichever comes first), and `None` otherwise.
    pub fn advance(&mut self, now: Millis) -> Option<HandOff> {
        if self.is_settled() {
            return None;
        }
        let Transition { from, to, direction, timing, .. } = self.transition;
        let factor = self.transition.factor(now);
        let value = from as f32 + (to as f32 - from as f32) * factor;
        self.current = value.clamp(0.0, ALPHA_RANGE as f32) as u8;

        let done = match direction {
            FadeDirection::Idle => {
                self.current = to;
                return None;
            }
            FadeDirection::FadingIn => self.current >= to,
            FadeDirection::FadingOut => self.current <= to,
        };
        if done {
            self.current = to;
        }
        if !(done || factor >= timing.threshold) || self.has_broadcast_next {
            return None;
        }
        // The last dot turns the sweep around
        let hand_off = match direction {
            FadeDirection::FadingIn if self.is_terminal => HandOff::FadeOut,
            FadeDirection::FadingIn => HandOff::FadeIn,
            FadeDirection::FadingOut if self.is_terminal => HandOff::FadeIn,
            FadeDirection::FadingOut => HandOff::FadeOut,
            FadeDirection::Idle => return None,
        };
        self.has_broadcast_next = true;
        Some(hand_off)
    }
}
