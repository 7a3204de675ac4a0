//! G-code command types and rendering

use super::{format_fixed, format_natural, Y_PRECISION};
use crate::error::CommandError;
use std::fmt;

/// A single renderable machine instruction
///
/// Every instruction produces a primary code line and may carry a
/// trailing comment. The rendered line is the code, followed by a space
/// and the comment when one is present.
pub trait GcodeInstruction {
    /// The instruction text without its comment (e.g. "G0 X1.5 Y1.5000 Z5").
    fn code(&self) -> String;

    /// Human readable annotation, including its leading `;`.
    fn comment(&self) -> Option<String> {
        None
    }

    /// Full output line.
    fn render(&self) -> String {
        match self.comment() {
            Some(comment) => format!("{} {}", self.code(), comment),
            None => self.code(),
        }
    }
}

fn axis_words(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Vec<String> {
    let mut words = Vec::with_capacity(3);
    if let Some(x) = x {
        words.push(format!("X{}", format_natural(x)));
    }
    if let Some(y) = y {
        words.push(format!("Y{}", format_fixed(y, Y_PRECISION)));
    }
    if let Some(z) = z {
        words.push(format!("Z{}", format_natural(z)));
    }
    words
}

/// Rapid positioning move (G0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RapidMove {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

impl RapidMove {
    /// Create a rapid move. At least one axis must be given.
    pub fn new(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Result<Self, CommandError> {
        if x.is_none() && y.is_none() && z.is_none() {
            return Err(CommandError::EmptyMotion {
                code: "G0",
                expected: "axis",
            });
        }
        Ok(Self { x, y, z })
    }

    pub fn x(&self) -> Option<f64> {
        self.x
    }

    pub fn y(&self) -> Option<f64> {
        self.y
    }

    pub fn z(&self) -> Option<f64> {
        self.z
    }
}

impl GcodeInstruction for RapidMove {
    fn code(&self) -> String {
        format!("G0 {}", axis_words(self.x, self.y, self.z).join(" "))
    }
}

/// Linear feed move (G1)
///
/// May set the feed rate on its own, which establishes the modal feed
/// for every following cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedMove {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
    feed_rate: Option<f64>,
}

impl FeedMove {
    /// Create a feed move. At least one axis or a feed rate must be given.
    pub fn new(
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        feed_rate: Option<f64>,
    ) -> Result<Self, CommandError> {
        if x.is_none() && y.is_none() && z.is_none() && feed_rate.is_none() {
            return Err(CommandError::EmptyMotion {
                code: "G1",
                expected: "axis, or a feedrate",
            });
        }
        Ok(Self { x, y, z, feed_rate })
    }

    pub fn x(&self) -> Option<f64> {
        self.x
    }

    pub fn y(&self) -> Option<f64> {
        self.y
    }

    pub fn z(&self) -> Option<f64> {
        self.z
    }

    pub fn feed_rate(&self) -> Option<f64> {
        self.feed_rate
    }
}

impl FeedMove {
    // A zero feed rate is kept on the move but never written out
    fn written_feed_rate(&self) -> Option<f64> {
        self.feed_rate.filter(|f| *f != 0.0)
    }
}

impl GcodeInstruction for FeedMove {
    fn code(&self) -> String {
        let mut words = axis_words(self.x, self.y, self.z);
        if let Some(feed_rate) = self.written_feed_rate() {
            words.push(format!("F{}", format_natural(feed_rate)));
        }
        format!("G1 {}", words.join(" "))
    }

    fn comment(&self) -> Option<String> {
        self.written_feed_rate()
            .map(|f| format!("; Set feedrate to {} mm/min", format_natural(f)))
    }
}

/// Machine instruction emitted by the toolpath generators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// G0 rapid move
    Rapid(RapidMove),
    /// G1 feed move
    Feed(FeedMove),
    /// G4 dwell for a number of seconds
    Dwell { seconds: f64 },
    /// G21 millimeter units
    Millimeters,
    /// G54 first work coordinate system
    WorkCoordinates,
    /// G90 absolute positioning
    AbsolutePositioning,
    /// G91 relative positioning
    RelativePositioning,
    /// M3 spindle on clockwise
    SpindleOn { rpm: f64 },
    /// M5 spindle off
    SpindleOff,
}

impl Command {
    /// G0 with the given axes.
    pub fn rapid(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Result<Self, CommandError> {
        RapidMove::new(x, y, z).map(Command::Rapid)
    }

    /// G1 with the given axes and optional feed rate.
    pub fn feed(
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        feed_rate: Option<f64>,
    ) -> Result<Self, CommandError> {
        FeedMove::new(x, y, z, feed_rate).map(Command::Feed)
    }

    pub fn dwell(seconds: f64) -> Self {
        Command::Dwell { seconds }
    }

    pub fn spindle_on(rpm: f64) -> Self {
        Command::SpindleOn { rpm }
    }

    /// Whether the command moves the tool.
    pub fn is_motion(&self) -> bool {
        matches!(self, Command::Rapid(_) | Command::Feed(_))
    }
}

impl GcodeInstruction for Command {
    fn code(&self) -> String {
        match self {
            Command::Rapid(m) => m.code(),
            Command::Feed(m) => m.code(),
            Command::Dwell { seconds } => format!("G4 P{}", format_natural(*seconds)),
            Command::Millimeters => "G21".to_string(),
            Command::WorkCoordinates => "G54".to_string(),
            Command::AbsolutePositioning => "G90".to_string(),
            Command::RelativePositioning => "G91".to_string(),
            Command::SpindleOn { rpm } => format!("M3 S{}", format_natural(*rpm)),
            Command::SpindleOff => "M5 S0".to_string(),
        }
    }

    fn comment(&self) -> Option<String> {
        match self {
            Command::Rapid(m) => m.comment(),
            Command::Feed(m) => m.comment(),
            Command::Dwell { seconds } => {
                Some(format!("; Wait for {} seconds", format_natural(*seconds)))
            }
            Command::Millimeters => Some("; mm-mode".to_string()),
            Command::WorkCoordinates => Some("; Work Coordinates".to_string()),
            Command::AbsolutePositioning => Some("; Absolute Positioning".to_string()),
            Command::RelativePositioning => Some("; Relative Positioning".to_string()),
            Command::SpindleOn { rpm } => {
                Some(format!("; Spindle on to {} RPM", format_natural(*rpm)))
            }
            Command::SpindleOff => Some("; Stop spindle".to_string()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<RapidMove> for Command {
    fn from(m: RapidMove) -> Self {
        Command::Rapid(m)
    }
}

impl From<FeedMove> for Command {
    fn from(m: FeedMove) -> Self {
        Command::Feed(m)
    }
}

/// One line of a generated program body
#[derive(Debug, Clone, PartialEq)]
pub enum ToolpathLine {
    /// A machine instruction
    Command(Command),
    /// A free-standing comment, stored without its leading `;`
    Comment(String),
    /// An empty separator line
    Blank,
}

impl ToolpathLine {
    pub fn comment(text: impl Into<String>) -> Self {
        ToolpathLine::Comment(text.into())
    }

    /// The instruction on this line, if any.
    pub fn as_command(&self) -> Option<&Command> {
        match self {
            ToolpathLine::Command(cmd) => Some(cmd),
            _ => None,
        }
    }
}

impl From<Command> for ToolpathLine {
    fn from(cmd: Command) -> Self {
        ToolpathLine::Command(cmd)
    }
}

impl fmt::Display for ToolpathLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolpathLine::Command(cmd) => write!(f, "{}", cmd),
            ToolpathLine::Comment(text) => write!(f, "; {}", text),
            ToolpathLine::Blank => Ok(()),
        }
    }
}
