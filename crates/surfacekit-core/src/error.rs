//! Error handling for SurfaceKit
//!
//! Command construction is the only fallible operation in the core crate.
//! Higher layers wrap [`CommandError`] in their own `thiserror` enums.

use thiserror::Error;

/// Command construction error type
///
/// Raised when a motion instruction would be emitted with no effective
/// parameters. This is the only check the command model performs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A motion command was built with every parameter absent
    #[error("{code} needs at least one {expected}")]
    EmptyMotion {
        /// The G-code word of the rejected command (e.g. "G0").
        code: &'static str,
        /// What the command requires at least one of.
        expected: &'static str,
    },
}
