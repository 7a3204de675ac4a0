//! # SurfaceKit Core
//!
//! Core types and utilities for SurfaceKit.
//! Provides the G-code command model that toolpath generators emit,
//! the number formatting rules used when rendering commands, and the
//! clamped-inclusive stepped range used to enumerate rows and depth passes.

pub mod error;
pub mod gcode;
pub mod range;

pub use error::CommandError;

pub use gcode::{
    format_fixed, format_natural, Command, FeedMove, GcodeInstruction, RapidMove, ToolpathLine,
    Y_PRECISION,
};

pub use range::{stepped_range, SteppedRange};
