use surfacekit_camtools::surfacing::{generate_toolpath, preamble, SurfacingParameters};
use surfacekit_core::{Command, GcodeInstruction, ToolpathLine};

fn comments(lines: &[ToolpathLine]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| match line {
            ToolpathLine::Comment(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_single_pass_when_depth_per_pass_equals_total() {
    let lines = generate_toolpath(&SurfacingParameters::default()).unwrap();
    assert_eq!(
        comments(&lines),
        vec!["Pass 1", "Framing pass 1", "Finish steps"]
    );
}

#[test]
fn test_pass_labels_for_several_depths() {
    let params = SurfacingParameters {
        depth_per_pass: 0.2,
        total_depth: 1.0,
        ..Default::default()
    };
    let lines = generate_toolpath(&params).unwrap();
    let labels = comments(&lines);

    assert_eq!(labels.len(), 5 * 2 + 1);
    assert_eq!(labels[8], "Pass 5");
    assert_eq!(labels[9], "Framing pass 5");
}

#[test]
fn test_depths_are_negated() {
    let params = SurfacingParameters {
        depth_per_pass: 0.5,
        total_depth: 1.0,
        ..Default::default()
    };
    let lines = generate_toolpath(&params).unwrap();
    let plunges: Vec<String> = lines
        .iter()
        .filter_map(ToolpathLine::as_command)
        .map(|c| c.code())
        .filter(|code| code.starts_with("G1 X1.5 Y1.5000 Z"))
        .collect();

    assert!(plunges.contains(&"G1 X1.5 Y1.5000 Z-0.5".to_string()));
    assert!(plunges.contains(&"G1 X1.5 Y1.5000 Z-1".to_string()));
    assert!(plunges.iter().all(|p| !p.contains("Z0.")));
}

#[test]
fn test_blank_line_precedes_every_section() {
    let lines = generate_toolpath(&SurfacingParameters::default()).unwrap();
    for (i, line) in lines.iter().enumerate() {
        if matches!(line, ToolpathLine::Comment(_)) {
            assert_eq!(lines[i - 1], ToolpathLine::Blank);
        }
    }
}

#[test]
fn test_retract_after_each_zig_zag() {
    let lines = generate_toolpath(&SurfacingParameters::default()).unwrap();
    let framing = lines
        .iter()
        .position(|l| *l == ToolpathLine::comment("Framing pass 1"))
        .unwrap();

    assert_eq!(lines[framing - 1], ToolpathLine::Blank);
    assert_eq!(
        lines[framing - 2],
        ToolpathLine::from(Command::rapid(None, None, Some(5.0)).unwrap())
    );
}

#[test]
fn test_spindle_settles_before_feed_and_z_rises_before_xy() {
    let commands = preamble(8000.0, 5.0, 1000.0).unwrap();
    assert_eq!(commands.len(), 8);

    let spindle = commands
        .iter()
        .position(|c| matches!(c, Command::SpindleOn { .. }))
        .unwrap();
    let dwell = commands
        .iter()
        .position(|c| matches!(c, Command::Dwell { .. }))
        .unwrap();
    let feed = commands
        .iter()
        .position(|c| matches!(c, Command::Feed(m) if m.feed_rate().is_some()))
        .unwrap();
    assert!(spindle < dwell && dwell < feed);

    let raise = commands
        .iter()
        .position(|c| matches!(c, Command::Rapid(m) if m.z().is_some()))
        .unwrap();
    let travel = commands
        .iter()
        .position(|c| matches!(c, Command::Rapid(m) if m.x().is_some()))
        .unwrap();
    assert!(raise < travel);
}

#[test]
fn test_finish_sequence() {
    let lines = generate_toolpath(&SurfacingParameters::default()).unwrap();
    let tail: Vec<String> = lines[lines.len() - 3..]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        tail,
        vec!["G0 Z5", "G0 X0 Y0.0000", "M5 S0 ; Stop spindle"]
    );
}
