//! Toolpath statistics.
//!
//! Walks a generated toolpath while tracking the machine's modal state, so
//! moves that omit an axis are measured from the last commanded position.

use surfacekit_core::{Command, ToolpathLine};

/// Machine position and modes as implied by the commands seen so far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub feed_rate: Option<f64>,
    pub absolute: bool,
    pub spindle_rpm: Option<f64>,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            feed_rate: None,
            absolute: true,
            spindle_rpm: None,
        }
    }
}

impl ModalState {
    /// Apply a command and return the distance it moved the tool.
    pub fn apply(&mut self, command: &Command) -> f64 {
        match command {
            Command::Rapid(m) => self.move_to(m.x(), m.y(), m.z()),
            Command::Feed(m) => {
                if let Some(f) = m.feed_rate() {
                    self.feed_rate = Some(f);
                }
                self.move_to(m.x(), m.y(), m.z())
            }
            Command::AbsolutePositioning => {
                self.absolute = true;
                0.0
            }
            Command::RelativePositioning => {
                self.absolute = false;
                0.0
            }
            Command::SpindleOn { rpm } => {
                self.spindle_rpm = Some(*rpm);
                0.0
            }
            Command::SpindleOff => {
                self.spindle_rpm = None;
                0.0
            }
            Command::Dwell { .. } | Command::Millimeters | Command::WorkCoordinates => 0.0,
        }
    }

    fn move_to(&mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) -> f64 {
        let resolve = |current: f64, target: Option<f64>, absolute: bool| match target {
            Some(v) if absolute => v,
            Some(v) => current + v,
            None => current,
        };

        let nx = resolve(self.x, x, self.absolute);
        let ny = resolve(self.y, y, self.absolute);
        let nz = resolve(self.z, z, self.absolute);

        let (dx, dy, dz) = (nx - self.x, ny - self.y, nz - self.z);
        self.x = nx;
        self.y = ny;
        self.z = nz;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Summary counts and distances for a toolpath
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolpathStats {
    pub total_lines: usize,
    pub commands: usize,
    pub rapid_moves: usize,
    pub feed_moves: usize,
    pub rapid_distance: f64,
    pub feed_distance: f64,
    /// Lowest Z reached by any move (mm)
    pub min_z: f64,
    /// Cutting time at the modal feed rate, excluding rapids and dwells
    pub estimated_cut_minutes: f64,
}

impl ToolpathStats {
    /// The machine is assumed to start at the work origin.
    pub fn from_toolpath(lines: &[ToolpathLine]) -> Self {
        let mut stats = Self {
            total_lines: lines.len(),
            ..Default::default()
        };
        let mut state = ModalState::default();

        for command in lines.iter().filter_map(ToolpathLine::as_command) {
            stats.commands += 1;
            let distance = state.apply(command);
            match command {
                Command::Rapid(_) => {
                    stats.rapid_moves += 1;
                    stats.rapid_distance += distance;
                }
                Command::Feed(_) => {
                    stats.feed_moves += 1;
                    stats.feed_distance += distance;
                    if let Some(f) = state.feed_rate.filter(|f| *f > 0.0) {
                        stats.estimated_cut_minutes += distance / f;
                    }
                }
                _ => {}
            }
            stats.min_z = stats.min_z.min(state.z);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_state_carries_omitted_axes() {
        let mut state = ModalState::default();
        state.apply(&Command::rapid(Some(10.0), Some(20.0), Some(5.0)).unwrap());
        let d = state.apply(&Command::feed(None, None, Some(-1.0), Some(600.0)).unwrap());

        assert_eq!((state.x, state.y, state.z), (10.0, 20.0, -1.0));
        assert_eq!(state.feed_rate, Some(600.0));
        assert!((d - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_relative_positioning() {
        let mut state = ModalState::default();
        state.apply(&Command::RelativePositioning);
        state.apply(&Command::rapid(Some(3.0), None, None).unwrap());
        state.apply(&Command::rapid(Some(4.0), None, None).unwrap());
        assert_eq!(state.x, 7.0);
    }

    #[test]
    fn test_stats_counts() {
        let lines = vec![
            ToolpathLine::from(Command::spindle_on(1000.0)),
            ToolpathLine::from(Command::feed(None, None, None, Some(100.0)).unwrap()),
            ToolpathLine::Blank,
            ToolpathLine::comment("cut"),
            ToolpathLine::from(Command::rapid(Some(0.0), Some(0.0), Some(1.0)).unwrap()),
            ToolpathLine::from(Command::feed(None, None, Some(-1.0), None).unwrap()),
            ToolpathLine::from(Command::feed(Some(100.0), None, None, None).unwrap()),
        ];

        let stats = ToolpathStats::from_toolpath(&lines);
        assert_eq!(stats.total_lines, 7);
        assert_eq!(stats.commands, 5);
        assert_eq!(stats.rapid_moves, 1);
        assert_eq!(stats.feed_moves, 3);
        assert!((stats.rapid_distance - 1.0).abs() < 1e-12);
        assert!((stats.feed_distance - 102.0).abs() < 1e-12);
        assert_eq!(stats.min_z, -1.0);
        assert!((stats.estimated_cut_minutes - 1.02).abs() < 1e-12);
    }
}
