//! # SurfaceKit
//!
//! Generates G-code that flattens a rectangular stock surface with a flat
//! end mill: a zig-zag sweep plus a framing pass, repeated for every depth
//! pass, wrapped in a machine preamble and shutdown sequence.
//!
//! ## Architecture
//!
//! SurfaceKit is organized as a workspace with multiple crates:
//!
//! 1. **surfacekit-core** - G-code command model, number formatting, stepped ranges
//! 2. **surfacekit-camtools** - Surfacing toolpath generation and program rendering
//! 3. **surfacekit-settings** - TOML/JSON job configuration and machine limits
//! 4. **surfacekit** - Command line binary that integrates all crates

pub mod cli;

pub use surfacekit_core::{
    stepped_range, Command, CommandError, FeedMove, GcodeInstruction, RapidMove, SteppedRange,
    ToolpathLine,
};

pub use surfacekit_camtools::{
    framing_pass, generate_toolpath, preamble, render_program, zig_zag_xy, CamToolError,
    ParameterError, SurfacingGenerator, SurfacingParameters, ToolpathStats,
};

pub use surfacekit_settings::{Config, MachineSettings, OutputSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so programs written to stdout stay clean
/// - RUST_LOG environment variable support
/// - `info` by default, `debug` when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
