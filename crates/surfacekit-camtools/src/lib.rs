//! # SurfaceKit CAM Tools
//!
//! This crate turns physical surfacing parameters into G-Code.
//!
//! ## CAM Tools Included
//!
//! - **Surfacing**: Zig-zag flattening of rectangular stock with a framing
//!   pass along the long edges, repeated over several depth passes
//!
//! ## Supporting Infrastructure
//!
//! - **Statistics**: Move counts, travel distances and cut time estimates
//! - **Errors**: Parameter validation and generation errors

pub mod error;
pub mod stats;
pub mod surfacing;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use stats::{ModalState, ToolpathStats};
pub use surfacing::{
    framing_pass, generate_toolpath, header_comment, preamble, render_program, zig_zag_xy,
    InsetBounds, SurfacingGenerator, SurfacingParameters,
};
