use surfacekit_camtools::surfacing::{framing_pass, InsetBounds};
use surfacekit_core::{Command, GcodeInstruction};

fn xy(cmd: &Command) -> (Option<f64>, Option<f64>) {
    match cmd {
        Command::Rapid(m) => (m.x(), m.y()),
        Command::Feed(m) => (m.x(), m.y()),
        other => panic!("expected a motion command, got {:?}", other),
    }
}

#[test]
fn test_framing_has_seven_moves_between_diagonal_corners() {
    for (lx, ly, d) in [(261.0, 90.0, 3.0), (100.0, 100.0, 12.0), (40.5, 600.0, 6.35)] {
        let path = framing_pass(lx, ly, d, -0.3, 5.0).unwrap();
        let b = InsetBounds::new(lx, ly, d);

        assert_eq!(path.len(), 7);
        assert!(path.iter().all(Command::is_motion));
        assert_eq!(xy(&path[0]), (Some(b.min_x), Some(b.min_y)));
        assert_eq!(xy(&path[6]), (Some(b.max_x), Some(b.min_y)));
        assert_eq!(xy(&path[4]), (Some(b.max_x), Some(b.max_y)));
    }
}

#[test]
fn test_framing_lifts_before_crossing() {
    let path = framing_pass(261.0, 90.0, 3.0, -0.2, 5.0).unwrap();
    assert_eq!(path[3].code(), "G0 Z5");
    assert_eq!(path[4].code(), "G0 X259.5 Y88.5000");
    assert_eq!(path[5].code(), "G1 Z-0.2");
}
