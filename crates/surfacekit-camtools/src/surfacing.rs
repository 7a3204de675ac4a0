//! Surfacing / flattening toolpaths.
//!
//! A surfacing program levels the top of a rectangular stock with a flat
//! bit. Each depth pass is a zig-zag sweep over the inset stock rectangle
//! followed by a framing pass along the two long Y edges. Depths are
//! enumerated as positive magnitudes and negated at the call site, since
//! the machine's Z axis points up out of the material.

mod parameters;

pub use parameters::{row_spacing, InsetBounds, SurfacingParameters};

use crate::error::CamToolResult;
use std::path::Path;
use surfacekit_core::{format_natural, stepped_range, Command, CommandError, ToolpathLine};
use tracing::{debug, info};

/// Time the spindle is given to reach speed before any feed is set (seconds)
pub const SPINDLE_SETTLE_SECONDS: f64 = 1.8;

/// Machine setup that must run before any cutting move.
///
/// Selects G54, millimeters and absolute positioning, starts the spindle
/// and waits for it, raises to the clearance height before moving over
/// the origin, then establishes the cutting feed rate.
pub fn preamble(
    spindle_speed: f64,
    safe_z: f64,
    feed_rate: f64,
) -> Result<Vec<Command>, CommandError> {
    Ok(vec![
        Command::WorkCoordinates,
        Command::Millimeters,
        Command::AbsolutePositioning,
        Command::spindle_on(spindle_speed),
        Command::dwell(SPINDLE_SETTLE_SECONDS),
        Command::rapid(None, None, Some(safe_z))?,
        Command::rapid(Some(0.0), Some(0.0), None)?,
        Command::feed(None, None, None, Some(feed_rate))?,
    ])
}

/// Zig-zag sweep of the inset stock rectangle at depth `z`.
///
/// Rows advance along Y by the stepover distance and always finish on the
/// far inset edge. Even rows cut toward +X, odd rows toward -X. The
/// step-over move between rows only carries Y and relies on the modal Z.
pub fn zig_zag_xy(
    length_x: f64,
    length_y: f64,
    bit_diameter: f64,
    stepover_percent: f64,
    z: f64,
    safe_z: f64,
) -> Result<Vec<Command>, CommandError> {
    let bounds = InsetBounds::new(length_x, length_y, bit_diameter);

    let mut path = vec![
        Command::rapid(Some(bounds.min_x), Some(bounds.min_y), Some(safe_z))?,
        Command::feed(Some(bounds.min_x), Some(bounds.min_y), Some(z), None)?,
    ];

    let spacing = row_spacing(bit_diameter, stepover_percent);
    for (row, y) in stepped_range(bounds.min_y, bounds.max_y, spacing).enumerate() {
        let (from_x, to_x) = if row % 2 == 0 {
            (bounds.min_x, bounds.max_x)
        } else {
            (bounds.max_x, bounds.min_x)
        };

        path.push(Command::feed(None, Some(y), None, None)?);
        path.push(Command::feed(Some(from_x), Some(y), Some(z), None)?);
        path.push(Command::feed(Some(to_x), Some(y), Some(z), None)?);
    }

    Ok(path)
}

/// Edge relief along the two Y edges of the inset rectangle at depth `z`.
///
/// Cuts up the -X edge, lifts, crosses to the diagonally opposite corner
/// and cuts back down the +X edge. The X edges are left to the zig-zag rows.
pub fn framing_pass(
    length_x: f64,
    length_y: f64,
    bit_diameter: f64,
    z: f64,
    safe_z: f64,
) -> Result<Vec<Command>, CommandError> {
    let b = InsetBounds::new(length_x, length_y, bit_diameter);

    Ok(vec![
        Command::rapid(Some(b.min_x), Some(b.min_y), Some(safe_z))?,
        Command::feed(None, None, Some(z), None)?,
        Command::feed(Some(b.min_x), Some(b.max_y), Some(z), None)?,
        Command::rapid(None, None, Some(safe_z))?,
        Command::rapid(Some(b.max_x), Some(b.max_y), None)?,
        Command::feed(None, None, Some(z), None)?,
        Command::feed(Some(b.max_x), Some(b.min_y), Some(z), None)?,
    ])
}

/// Full surfacing toolpath: preamble, every depth pass, then shutdown.
pub fn generate_toolpath(p: &SurfacingParameters) -> Result<Vec<ToolpathLine>, CommandError> {
    let mut lines: Vec<ToolpathLine> = preamble(p.spindle_speed, p.safe_z, p.feed_rate)?
        .into_iter()
        .map(ToolpathLine::from)
        .collect();

    for (index, depth) in p.pass_depths().enumerate() {
        let pass = index + 1;
        let z = -depth;
        debug!("Generating pass {} at Z={}", pass, format_natural(z));

        lines.push(ToolpathLine::Blank);
        lines.push(ToolpathLine::comment(format!("Pass {}", pass)));
        lines.extend(
            zig_zag_xy(
                p.length_x,
                p.length_y,
                p.bit_diameter,
                p.stepover_percent,
                z,
                p.safe_z,
            )?
            .into_iter()
            .map(ToolpathLine::from),
        );
        lines.push(Command::rapid(None, None, Some(p.safe_z))?.into());

        lines.push(ToolpathLine::Blank);
        lines.push(ToolpathLine::comment(format!("Framing pass {}", pass)));
        lines.extend(
            framing_pass(p.length_x, p.length_y, p.bit_diameter, z, p.safe_z)?
                .into_iter()
                .map(ToolpathLine::from),
        );
    }

    lines.push(ToolpathLine::Blank);
    lines.push(ToolpathLine::comment("Finish steps"));
    lines.push(Command::rapid(None, None, Some(p.safe_z))?.into());
    lines.push(Command::rapid(Some(0.0), Some(0.0), None)?.into());
    lines.push(Command::SpindleOff.into());

    Ok(lines)
}

/// Comment block describing the run, placed above the program body.
pub fn header_comment(p: &SurfacingParameters) -> String {
    format!(
        "; Surfacing / Flattening Operation\n\
         ; Endmill Diameter: {}mm\n\
         ; Stepover: {}%, Feedrate: {}mm/min\n\
         ; X: {}, Y: {}, Z: {}\n",
        format_natural(p.bit_diameter),
        format_natural(p.stepover_percent),
        format_natural(p.feed_rate),
        format_natural(p.length_x),
        format_natural(p.length_y),
        format_natural(p.total_depth),
    )
}

/// Render the header and one line per toolpath element, newline terminated.
pub fn render_program(p: &SurfacingParameters, lines: &[ToolpathLine]) -> String {
    let body = lines
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    let mut program = header_comment(p);
    program.push_str(&body);
    program.push('\n');
    program
}

/// Generator for surfacing G-Code
pub struct SurfacingGenerator {
    params: SurfacingParameters,
}

impl SurfacingGenerator {
    /// Create a new SurfacingGenerator with the given parameters
    pub fn new(params: SurfacingParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SurfacingParameters {
        &self.params
    }

    /// Validate the parameters and build the toolpath without rendering it
    pub fn toolpath(&self) -> CamToolResult<Vec<ToolpathLine>> {
        self.params.validate()?;
        Ok(generate_toolpath(&self.params)?)
    }

    /// Generate the complete program text
    pub fn generate(&self) -> CamToolResult<String> {
        let lines = self.toolpath()?;
        let program = render_program(&self.params, &lines);
        info!(
            "Generated surfacing program: {} lines, {} depth passes",
            lines.len(),
            self.params.pass_depths().count()
        );
        Ok(program)
    }

    /// Generate the program and write it to `path` in a single write
    pub fn write_to_file(&self, path: &Path) -> CamToolResult<()> {
        let program = self.generate()?;
        std::fs::write(path, program)?;
        info!("Wrote surfacing program to {}", path.display());
        Ok(())
    }
}
