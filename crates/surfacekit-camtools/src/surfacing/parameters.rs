use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};
use surfacekit_core::{stepped_range, SteppedRange};

/// Parameters for the surfacing CAMTool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfacingParameters {
    /// Diameter of the surfacing bit (mm)
    pub bit_diameter: f64,
    /// Distance between rows as a percentage of the bit diameter
    pub stepover_percent: f64,
    /// Cutting feed rate (mm/min)
    pub feed_rate: f64,
    /// Stock length along X (mm)
    pub length_x: f64,
    /// Stock length along Y (mm)
    pub length_y: f64,
    /// Clearance height for rapid moves (mm)
    pub safe_z: f64,
    /// Material removed by each depth pass (mm, positive)
    pub depth_per_pass: f64,
    /// Total material removed (mm, positive)
    pub total_depth: f64,
    /// Spindle speed (RPM)
    pub spindle_speed: f64,
}

impl Default for SurfacingParameters {
    fn default() -> Self {
        Self {
            bit_diameter: 3.0,
            stepover_percent: 40.0,
            feed_rate: 1000.0,
            length_x: 261.0,
            length_y: 90.0,
            safe_z: 5.0,
            depth_per_pass: 0.2,
            total_depth: 0.2,
            spindle_speed: 8000.0,
        }
    }
}

impl SurfacingParameters {
    pub fn bit_radius(&self) -> f64 {
        self.bit_diameter / 2.0
    }

    /// Distance between adjacent zig-zag rows.
    pub fn row_spacing(&self) -> f64 {
        row_spacing(self.bit_diameter, self.stepover_percent)
    }

    /// Rectangle the bit center may travel in.
    pub fn inset_bounds(&self) -> InsetBounds {
        InsetBounds::new(self.length_x, self.length_y, self.bit_diameter)
    }

    /// Cumulative depth of each pass as positive magnitudes, ending on `total_depth`.
    pub fn pass_depths(&self) -> SteppedRange {
        stepped_range(self.depth_per_pass, self.total_depth, self.depth_per_pass)
    }

    /// Reject parameter sets that would produce a degenerate or unsafe toolpath.
    ///
    /// The free generation functions never call this; out of range values
    /// there just produce geometrically odd programs. [`SurfacingGenerator`]
    /// checks it before building a toolpath.
    ///
    /// [`SurfacingGenerator`]: crate::SurfacingGenerator
    pub fn validate(&self) -> ParameterResult<()> {
        let fields = [
            ("bit_diameter", self.bit_diameter),
            ("stepover_percent", self.stepover_percent),
            ("feed_rate", self.feed_rate),
            ("length_x", self.length_x),
            ("length_y", self.length_y),
            ("safe_z", self.safe_z),
            ("depth_per_pass", self.depth_per_pass),
            ("total_depth", self.total_depth),
            ("spindle_speed", self.spindle_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("must be a finite number, got {}", value),
                });
            }
        }

        if self.length_x <= 0.0 || self.length_y <= 0.0 {
            return Err(ParameterError::InvalidDimensions(format!(
                "stock must be larger than zero, got {} x {}",
                self.length_x, self.length_y
            )));
        }

        if self.stepover_percent <= 0.0 || self.stepover_percent > 100.0 {
            return Err(ParameterError::OutOfRange {
                name: "stepover_percent".to_string(),
                value: self.stepover_percent,
                min: 0.0,
                max: 100.0,
            });
        }

        ensure_positive("bit_diameter", self.bit_diameter)?;
        let narrowest = self.length_x.min(self.length_y);
        if self.bit_diameter >= narrowest {
            return Err(ParameterError::Incompatible(format!(
                "bit diameter {} must be smaller than the narrowest stock side {}",
                self.bit_diameter, narrowest
            )));
        }

        ensure_positive("depth_per_pass", self.depth_per_pass)?;
        ensure_positive("total_depth", self.total_depth)?;
        ensure_positive("safe_z", self.safe_z)?;
        ensure_positive("feed_rate", self.feed_rate)?;
        ensure_positive("spindle_speed", self.spindle_speed)?;

        Ok(())
    }
}

fn ensure_positive(name: &str, value: f64) -> ParameterResult<()> {
    if value <= 0.0 {
        return Err(ParameterError::InvalidValue {
            name: name.to_string(),
            reason: format!("must be > 0, got {}", value),
        });
    }
    Ok(())
}

/// Row spacing for a bit diameter and stepover percentage.
pub fn row_spacing(bit_diameter: f64, stepover_percent: f64) -> f64 {
    bit_diameter * (stepover_percent / 100.0)
}

/// Stock rectangle shrunk by one bit radius on every side
///
/// Keeping the bit center inside these bounds keeps the cutter edge on the
/// stock edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl InsetBounds {
    pub fn new(length_x: f64, length_y: f64, bit_diameter: f64) -> Self {
        let radius = bit_diameter / 2.0;
        Self {
            min_x: radius,
            min_y: radius,
            max_x: length_x - radius,
            max_y: length_y - radius,
        }
    }
}
