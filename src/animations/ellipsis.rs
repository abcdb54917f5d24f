use super::common::{Color, Millis, Timing};
use super::dot::{Dot, FadeDirection, HandOff};
use super::layout::DotLayout;
use crate::config::EllipsisConfig;
use crate::render::{Canvas, RenderError};

/// Whether the ellipsis is being ticked by its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Activity {
    #[default]
    Inactive,
    Active,
}

/// The opacity of one dot in a rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotSample {
    /// The dot's position, left to right.
    pub slot: usize,
    pub opacity: u8,
}

/// A row of dots with a fade chasing around them.
///
/// The dots form a ring: each one starts the next once its own fade crosses the threshold, and
/// the last one starts the first again with the opposite fade. There's no timer behind this, the
/// host calls [ProgressEllipsis::render_tick] or [ProgressEllipsis::draw] once per frame with the
/// current time and the ring catches up to it.
#[derive(Debug, Clone)]
pub struct ProgressEllipsis {
    dots: Vec<Dot>,
    timing: Timing,
    color: Color,
    layout: DotLayout,
    activity: Activity,
}

impl ProgressEllipsis {
    pub fn new(config: &EllipsisConfig) -> Self {
        let timing = Timing { duration: config.duration, threshold: config.threshold };
        Self {
            dots: Self::build_ring(config.quantity),
            timing,
            color: config.color,
            layout: DotLayout::default(),
            activity: Activity::Inactive,
        }
    }

    /// Build an ellipsis with `quantity` dots and default settings otherwise.
    pub fn with_quantity(quantity: usize) -> Self {
        Self::new(&EllipsisConfig { quantity, ..Default::default() })
    }

    fn build_ring(quantity: usize) -> Vec<Dot> {
        // last dot circles back around
        (0..quantity).map(|index| Dot::new(index + 1 == quantity)).collect()
    }

    pub fn quantity(&self) -> usize {
        self.dots.len()
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// The slot of the dot that `slot` hands off to.
    pub fn next_slot(&self, slot: usize) -> Option<usize> {
        (slot < self.dots.len()).then(|| (slot + 1) % self.dots.len())
    }

    pub fn duration(&self) -> Millis {
        self.timing.duration
    }

    /// Change the fade length. Fades already in flight keep the previous one.
    pub fn set_duration(&mut self, duration: Millis) {
        self.timing.duration = duration;
    }

    pub fn threshold(&self) -> f32 {
        self.timing.threshold
    }

    /// Change the hand-off threshold. Fades already in flight keep the previous one.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.timing.threshold = threshold;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn layout(&self) -> &DotLayout {
        &self.layout
    }

    pub fn is_active(&self) -> bool {
        self.activity == Activity::Active
    }

    /// Recompute dot size and spacing for a new drawing area.
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        self.layout = DotLayout::measure(self.dots.len(), width, height);
        tracing::debug!(width, height, spacing = self.layout.spacing(), "ellipsis resized");
    }

    /// Restart the animation from the first dot.
    pub fn activate(&mut self, now: Millis) {
        let Some((first, _)) = self.dots.split_first_mut() else {
            return;
        };
        first.reset();
        first.start_fade_in(now, self.timing);
        for dot in self.dots.iter_mut().skip(1) {
            dot.reset();
        }
        self.activity = Activity::Active;
        tracing::debug!(now, quantity = self.dots.len(), "ellipsis activated");
    }

    /// Stop drawing. The next [ProgressEllipsis::activate] starts over.
    pub fn deactivate(&mut self) {
        self.activity = Activity::Inactive;
        tracing::debug!("ellipsis deactivated");
    }

    /// Advance every dot to `now`, in ring order, and report their opacities.
    ///
    /// A dot started by its predecessor during this call is advanced right away if it comes
    /// later in the ring. The first dot, when started by the last one, waits for the next tick.
    /// An inactive ring isn't advanced, its current opacities are reported as they are.
    pub fn render_tick(&mut self, now: Millis) -> Vec<DotSample> {
        if !self.is_active() {
            return self.samples();
        }
        let quantity = self.dots.len();
        let mut samples = Vec::with_capacity(quantity);
        for slot in 0..quantity {
            if let Some(hand_off) = self.dots[slot].advance(now) {
                let next = (slot + 1) % quantity;
                self.hand_off(slot, next, hand_off, now);
            }
            samples.push(DotSample { slot, opacity: self.dots[slot].opacity() });
        }
        samples
    }

    fn samples(&self) -> Vec<DotSample> {
        self.dots.iter().enumerate().map(|(slot, dot)| DotSample { slot, opacity: dot.opacity() }).collect()
    }

    fn hand_off(&mut self, from: usize, to: usize, hand_off: HandOff, now: Millis) {
        tracing::trace!(from, to, ?hand_off, now, "handing off");
        self.dots[to].receive(hand_off, now, self.timing);
    }

    /// Tick the animation and paint every dot. Returns the number of dots painted.
    pub fn draw<C: Canvas + ?Sized>(&mut self, now: Millis, canvas: &mut C) -> Result<usize, RenderError> {
        if !self.is_active() {
            return Ok(0);
        }
        let samples = self.render_tick(now);
        let radius = self.layout.radius();
        let center_y = self.layout.center_y();
        for sample in &samples {
            let color = self.color.with_alpha(sample.opacity);
            canvas.fill_circle(self.layout.center_x(sample.slot), center_y, radius, color)?;
        }
        Ok(samples.len())
    }

    /// The direction each dot is currently fading in.
    pub fn directions(&self) -> Vec<FadeDirection> {
        self.dots.iter().map(Dot::direction).collect()
    }
}

impl Default for ProgressEllipsis {
    fn default() -> Self {
        Self::new(&EllipsisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animations::FadeDirection::*;
    use rstest::rstest;

    fn opacities(samples: &[DotSample]) -> Vec<u8> {
        samples.iter().map(|s| s.opacity).collect()
    }

    fn active(quantity: usize) -> ProgressEllipsis {
        let mut ellipsis = ProgressEllipsis::with_quantity(quantity);
        ellipsis.activate(0);
        ellipsis
    }

    #[derive(Default)]
    struct RecordingCanvas {
        circles: Vec<(f32, f32, f32, Color)>,
    }

    impl Canvas for RecordingCanvas {
        fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) -> Result<(), RenderError> {
            self.circles.push((x, y, radius, color));
            Ok(())
        }
    }

    #[test]
    fn defaults() {
        let ellipsis = ProgressEllipsis::default();
        assert_eq!(ellipsis.quantity(), 3);
        assert_eq!(ellipsis.duration(), 600);
        assert_eq!(ellipsis.threshold(), 0.35);
        assert_eq!(ellipsis.color(), Color::BLACK);
        assert!(!ellipsis.is_active());
    }

    #[test]
    fn ring_closes_over_every_dot() {
        let ellipsis = ProgressEllipsis::with_quantity(5);
        let mut visited = vec![0];
        let mut slot = 0;
        loop {
            slot = ellipsis.next_slot(slot).expect("no next slot");
            if slot == 0 {
                break;
            }
            visited.push(slot);
        }
        assert_eq!(visited, vec![0, 1, 2, 3, 4]);
        let terminals: Vec<_> = ellipsis.dots().iter().map(Dot::is_terminal).collect();
        assert_eq!(terminals, vec![false, false, false, false, true]);
        assert_eq!(ellipsis.next_slot(5), None);
    }

    #[test]
    fn activation_starts_first_dot_only() {
        let ellipsis = active(3);
        assert!(ellipsis.is_active());
        assert_eq!(ellipsis.directions(), vec![FadingIn, Idle, Idle]);
    }

    #[test]
    fn staggered_chase() {
        let mut ellipsis = active(3);
        assert_eq!(opacities(&ellipsis.render_tick(0)), vec![0, 0, 0]);

        assert_eq!(opacities(&ellipsis.render_tick(210)), vec![89, 0, 0]);
        assert_eq!(ellipsis.directions(), vec![FadingIn, FadingIn, Idle]);

        assert_eq!(opacities(&ellipsis.render_tick(420)), vec![178, 89, 0]);
        assert_eq!(ellipsis.directions(), vec![FadingIn, FadingIn, FadingIn]);

        assert_eq!(opacities(&ellipsis.render_tick(600)), vec![255, 165, 76]);

        // the last dot turns the first one around
        assert_eq!(opacities(&ellipsis.render_tick(630)), vec![255, 178, 89]);
        assert_eq!(ellipsis.directions(), vec![FadingOut, FadingIn, FadingIn]);
    }

    #[test]
    fn full_lap() {
        let mut ellipsis = active(3);
        let mut starts = vec![(0, 0, FadingIn)];
        let mut previous = ellipsis.directions();
        for now in (0..=1260).step_by(10) {
            ellipsis.render_tick(now);
            let current = ellipsis.directions();
            for (slot, (before, after)) in previous.iter().zip(&current).enumerate() {
                if before != after {
                    starts.push((now, slot, *after));
                }
            }
            previous = current;
        }
        let expected: Vec<(Millis, usize, FadeDirection)> = vec![
            (0, 0, FadingIn),
            (210, 1, FadingIn),
            (420, 2, FadingIn),
            (630, 0, FadingOut),
            (840, 1, FadingOut),
            (1050, 2, FadingOut),
            (1260, 0, FadingIn),
        ];
        assert_eq!(starts, expected);
    }

    #[test]
    fn keeps_chasing() {
        let mut ellipsis = active(4);
        let mut seen_full = [false; 4];
        let mut seen_empty_after_full = [false; 4];
        for now in (0..20_000).step_by(16) {
            for sample in ellipsis.render_tick(now) {
                if sample.opacity == 255 {
                    seen_full[sample.slot] = true;
                } else if sample.opacity == 0 && seen_full[sample.slot] {
                    seen_empty_after_full[sample.slot] = true;
                }
            }
        }
        assert_eq!(seen_full, [true; 4]);
        assert_eq!(seen_empty_after_full, [true; 4]);
    }

    #[test]
    fn empty_ring_is_inert() {
        let mut ellipsis = ProgressEllipsis::with_quantity(0);
        ellipsis.activate(0);
        ellipsis.on_size_changed(100, 10);
        assert!(!ellipsis.is_active());
        assert!(ellipsis.render_tick(100).is_empty());

        let mut canvas = RecordingCanvas::default();
        assert_eq!(ellipsis.draw(100, &mut canvas).expect("draw failed"), 0);
        assert!(canvas.circles.is_empty());
    }

    #[test]
    fn single_dot_blinks() {
        let mut ellipsis = active(1);
        assert_eq!(opacities(&ellipsis.render_tick(0)), vec![0]);
        assert_eq!(opacities(&ellipsis.render_tick(100)), vec![42]);
        // crossing the threshold makes the dot start fading itself out
        assert_eq!(opacities(&ellipsis.render_tick(210)), vec![255]);
        assert_eq!(ellipsis.directions(), vec![FadingOut]);
        assert_eq!(opacities(&ellipsis.render_tick(360)), vec![191]);
        assert_eq!(opacities(&ellipsis.render_tick(420)), vec![0]);
        assert_eq!(ellipsis.directions(), vec![FadingIn]);
        assert_eq!(opacities(&ellipsis.render_tick(630)), vec![255]);
        assert_eq!(ellipsis.directions(), vec![FadingOut]);
    }

    #[test]
    fn ticking_before_activation_draws_nothing() {
        let mut ellipsis = ProgressEllipsis::with_quantity(3);
        assert_eq!(opacities(&ellipsis.render_tick(500)), vec![0, 0, 0]);
        assert_eq!(ellipsis.directions(), vec![Idle, Idle, Idle]);

        let mut canvas = RecordingCanvas::default();
        assert_eq!(ellipsis.draw(500, &mut canvas).expect("draw failed"), 0);
        assert!(canvas.circles.is_empty());
    }

    #[test]
    fn reactivation_restarts_from_first_dot() {
        let mut ellipsis = active(3);
        for now in (0..=700).step_by(10) {
            ellipsis.render_tick(now);
        }
        ellipsis.deactivate();
        ellipsis.activate(5000);
        assert_eq!(ellipsis.directions(), vec![FadingIn, Idle, Idle]);
        assert_eq!(opacities(&ellipsis.render_tick(5000)), vec![0, 0, 0]);
        assert_eq!(opacities(&ellipsis.render_tick(5210)), vec![89, 0, 0]);
    }

    #[test]
    fn deactivated_ring_stays_frozen() {
        let mut ellipsis = active(3);
        ellipsis.render_tick(210);
        ellipsis.deactivate();
        assert_eq!(opacities(&ellipsis.render_tick(420)), vec![89, 0, 0]);
        assert_eq!(opacities(&ellipsis.render_tick(5000)), vec![89, 0, 0]);
        assert_eq!(ellipsis.directions(), vec![FadingIn, FadingIn, Idle]);
    }

    #[rstest]
    fn opacity_moves_toward_destination(
        #[values(1, 2, 3, 4, 5)] quantity: usize,
        #[values((600, 0.35), (100, 0.0), (0, 0.35), (600, 1.0), (37, 0.9))] timing: (Millis, f32),
    ) {
        let (duration, threshold) = timing;
        let config = EllipsisConfig { quantity, duration, threshold, ..Default::default() };
        let mut ellipsis = ProgressEllipsis::new(&config);
        ellipsis.activate(0);
        let snapshot = |ellipsis: &ProgressEllipsis| -> Vec<(FadeDirection, u8)> {
            ellipsis.dots().iter().map(|dot| (dot.direction(), dot.opacity())).collect()
        };
        let mut previous = snapshot(&ellipsis);
        for now in (0..3000).step_by(7) {
            ellipsis.render_tick(now);
            let current = snapshot(&ellipsis);
            for (slot, (&(before_dir, before), &(after_dir, after))) in previous.iter().zip(&current).enumerate() {
                if before_dir != after_dir {
                    continue;
                }
                match after_dir {
                    FadingIn => assert!(after >= before, "dot {slot} went down at {now}"),
                    FadingOut => assert!(after <= before, "dot {slot} went up at {now}"),
                    Idle => assert_eq!(after, 0),
                }
            }
            previous = current;
        }
    }

    #[test]
    fn timing_changes_apply_to_new_fades() {
        let mut ellipsis = active(3);
        ellipsis.set_duration(1200);
        ellipsis.render_tick(210);
        assert_eq!(ellipsis.directions(), vec![FadingIn, FadingIn, Idle]);
        ellipsis.render_tick(420);
        assert_eq!(ellipsis.directions()[2], Idle);
        ellipsis.render_tick(630);
        assert_eq!(ellipsis.directions()[2], FadingIn);

        ellipsis.set_threshold(1.0);
        assert_eq!(ellipsis.threshold(), 1.0);
        assert_eq!(ellipsis.duration(), 1200);
    }

    #[test]
    fn zero_duration_sweeps_in_one_tick() {
        let mut ellipsis = ProgressEllipsis::new(&EllipsisConfig { duration: 0, ..Default::default() });
        ellipsis.activate(0);
        assert_eq!(opacities(&ellipsis.render_tick(0)), vec![255, 255, 255]);
        assert_eq!(ellipsis.directions(), vec![FadingOut, FadingIn, FadingIn]);
        assert_eq!(opacities(&ellipsis.render_tick(1)), vec![0, 0, 0]);
        assert_eq!(ellipsis.directions(), vec![FadingIn, FadingOut, FadingOut]);
    }

    #[test]
    fn draw_paints_every_dot() {
        let mut ellipsis = active(3);
        ellipsis.set_color(Color::new(10, 20, 30, 255));
        ellipsis.on_size_changed(90, 10);
        let mut canvas = RecordingCanvas::default();
        assert_eq!(ellipsis.draw(210, &mut canvas).expect("draw failed"), 3);
        let expected = vec![
            (5.0, 5.0, 5.0, Color::new(10, 20, 30, 89)),
            (45.0, 5.0, 5.0, Color::new(10, 20, 30, 0)),
            (85.0, 5.0, 5.0, Color::new(10, 20, 30, 0)),
        ];
        assert_eq!(canvas.circles, expected);

        ellipsis.deactivate();
        assert_eq!(ellipsis.draw(300, &mut canvas).expect("draw failed"), 0);
        assert_eq!(canvas.circles.len(), 3);
    }
}
