use surfacekit_camtools::surfacing::{row_spacing, zig_zag_xy};
use surfacekit_core::{Command, FeedMove, GcodeInstruction};

fn feed(cmd: &Command) -> &FeedMove {
    match cmd {
        Command::Feed(m) => m,
        other => panic!("expected a feed move, got {:?}", other),
    }
}

#[test]
fn test_plunge_pair() {
    let path = zig_zag_xy(261.0, 90.0, 3.0, 40.0, -0.2, 5.0).unwrap();

    match path[0] {
        Command::Rapid(m) => {
            assert_eq!((m.x(), m.y(), m.z()), (Some(1.5), Some(1.5), Some(5.0)));
        }
        ref other => panic!("expected a rapid move, got {:?}", other),
    }
    let plunge = feed(&path[1]);
    assert_eq!(
        (plunge.x(), plunge.y(), plunge.z()),
        (Some(1.5), Some(1.5), Some(-0.2))
    );
}

#[test]
fn test_row_spacing() {
    assert!((row_spacing(3.0, 40.0) - 1.2).abs() < 1e-12);

    let path = zig_zag_xy(261.0, 90.0, 3.0, 40.0, -0.2, 5.0).unwrap();
    let first_y = feed(&path[2]).y().unwrap();
    let second_y = feed(&path[5]).y().unwrap();
    assert!((second_y - first_y - 1.2).abs() < 1e-9);
}

#[test]
fn test_rows_alternate_direction() {
    let path = zig_zag_xy(100.0, 20.0, 4.0, 50.0, -1.0, 5.0).unwrap();
    let rows: Vec<&[Command]> = path[2..].chunks(3).collect();

    for (i, row) in rows.iter().enumerate() {
        let step = feed(&row[0]);
        assert_eq!(step.x(), None);
        assert_eq!(step.z(), None);

        let start = feed(&row[1]).x().unwrap();
        let end = feed(&row[2]).x().unwrap();
        if i % 2 == 0 {
            assert_eq!((start, end), (2.0, 98.0));
        } else {
            assert_eq!((start, end), (98.0, 2.0));
        }
        assert_eq!(feed(&row[1]).z(), Some(-1.0));
        assert_eq!(feed(&row[2]).z(), Some(-1.0));
    }
}

#[test]
fn test_last_row_lands_on_inset_edge() {
    let path = zig_zag_xy(100.0, 20.0, 4.0, 50.0, -1.0, 5.0).unwrap();
    // Rows at 2, 4, ... 16, then clamped to 18
    assert_eq!(path.len(), 2 + 9 * 3);

    let last = feed(path.last().unwrap());
    assert_eq!(last.y(), Some(18.0));
}

#[test]
fn test_rows_never_decrease() {
    let path = zig_zag_xy(300.0, 123.4, 6.35, 35.0, -0.5, 10.0).unwrap();
    let ys: Vec<f64> = path[2..]
        .chunks(3)
        .map(|row| feed(&row[0]).y().unwrap())
        .collect();

    assert!(ys.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*ys.last().unwrap(), 123.4 - 6.35 / 2.0);
}

#[test]
fn test_half_way_rows_round_to_even() {
    // 1/8" bit at 45 %: rows fall on 1.5875, 3.01625, 4.445, 5.87375, ...
    let path = zig_zag_xy(100.0, 50.0, 3.175, 45.0, -0.2, 5.0).unwrap();
    let codes: Vec<String> = path.iter().map(|cmd| cmd.code()).collect();

    assert_eq!(codes[0], "G0 X1.5875 Y1.5875 Z5");
    assert_eq!(codes[5], "G1 Y3.0162");
    assert_eq!(codes[8], "G1 Y4.4450");
    assert_eq!(codes[11], "G1 Y5.8738");
}
