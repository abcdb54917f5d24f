mod common;
mod dot;
mod ellipsis;
mod layout;

pub use common::{ALPHA_RANGE, Color, ColorParseError, DEFAULT_DURATION, DEFAULT_THRESHOLD, Millis, Timing};
pub use dot::{Dot, FadeDirection, HandOff};
pub use ellipsis::{DotSample, ProgressEllipsis};
pub use layout::DotLayout;
