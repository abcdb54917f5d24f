//! A loading ellipsis: a row of dots with a fade chasing around them.
//!
//! [ProgressEllipsis] owns the dots and is ticked by its host once per frame. The [render] module
//! holds the host side: the drawing surface, the clock and a terminal implementation of both.

pub mod animations;
pub mod config;
pub mod render;

pub use animations::{Color, ProgressEllipsis};
pub use config::{Config, ConfigError, EllipsisConfig, TerminalConfig};
