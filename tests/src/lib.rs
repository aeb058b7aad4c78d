use dashline::math::{point, Point};
use dashline::path::builder::*;
use dashline::path::{Commands, Polylines};

#[cfg(test)]
use dashline::algorithms::{dash, dash_lengths, reassemble, DashPattern};
#[cfg(test)]
use dashline::geom::fixed::{from_fixed, to_fixed};
#[cfg(test)]
use dashline::path::{flatten, Command, FixedPoint, FlattenOptions, RawPath};
#[cfg(test)]
use dashline::{dashed, dashed_commands, DashError, DashOptions};

#[cfg(test)]
static OFFSETS: [f64; 8] = [0.0, 0.5, 1.0, 2.5, -1.0, -7.25, 13.0, 1000.0];
#[cfg(test)]
static PATTERNS: [&[f64]; 5] = [&[0.5], &[4.0, 2.0], &[3.0, 1.0, 0.25], &[10.0, 0.1], &[0.001, 2.0]];

/// A path made of lines, quadratic and cubic curves.
pub fn wavy_path(waves: usize) -> Commands {
    let mut builder = Commands::builder().quantized();
    builder.begin(point(0.0, 0.0));
    for i in 0..waves {
        let x = i as f64 * 10.0;
        let h = 2.0 + (i % 3) as f64;
        builder.quadratic_bezier_to(point(x + 2.5, h), point(x + 5.0, 0.0));
        builder.cubic_bezier_to(point(x + 6.0, -h), point(x + 9.0, -h), point(x + 10.0, 0.0));
        if i % 4 == 3 {
            builder.line_to(point(x + 10.0, 5.0));
            builder.begin(point(x + 10.0, 0.0));
        }
    }

    builder.build()
}

/// Sub-paths of straight segments with varied lengths and directions.
pub fn zigzags(count: usize) -> Polylines {
    let mut polylines = Vec::with_capacity(count);
    for i in 0..count {
        let y = i as f64 * 3.0;
        let mut points: Vec<Point> = Vec::new();
        for j in 0..(i % 5 + 1) {
            let x = j as f64 * (1.0 + i as f64 * 0.75);
            points.push(point(x, y + (j % 2) as f64 * 1.5));
        }
        polylines.push(points);
    }

    polylines
}

#[cfg(test)]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
fn line() -> Polylines {
    vec![vec![point(0.0, 0.0), point(10.0, 0.0)]]
}

#[test]
fn empty_pattern_is_identity() {
    init_logger();

    let paths = zigzags(12);
    let flattened = flatten(&wavy_path(8), &FlattenOptions::DEFAULT);
    for &offset in OFFSETS.iter().chain(&[f64::NAN, f64::INFINITY]) {
        assert_eq!(dash_lengths(&paths, &[], offset), Ok(paths.clone()));
        assert_eq!(dash_lengths(&flattened, &[], offset), Ok(flattened.clone()));
    }
}

#[test]
fn single_length_is_doubled() {
    init_logger();

    let paths = zigzags(12);
    for &d in &[0.3, 1.0, 2.5, 7.0] {
        for &offset in &OFFSETS {
            assert_eq!(
                dash_lengths(&paths, &[d], offset),
                dash_lengths(&paths, &[d, d], offset)
            );
        }
    }
}

#[test]
fn no_degenerate_dashes() {
    init_logger();

    let mut inputs = zigzags(20);
    inputs.extend(flatten(&wavy_path(12), &FlattenOptions::density(2.0)));
    inputs.push(vec![point(1.0, 1.0)]);
    inputs.push(vec![point(1.0, 1.0), point(1.0, 1.0), point(1.0, 1.0)]);
    inputs.push(Vec::new());

    for pattern in &PATTERNS {
        let pattern = DashPattern::new(pattern).unwrap();
        for &offset in &OFFSETS {
            for d in dash(&inputs, &pattern, offset) {
                assert!(d.len() >= 2, "{:?}", d);
            }
        }
    }
}

#[test]
fn fixed_point_round_trip() {
    let mut x = -1000.0;
    while x < 1000.0 {
        let v = from_fixed(to_fixed(x));
        assert!((v - x).abs() <= 1.0 / 64.0, "{} -> {}", x, v);
        if x.abs() >= 1.0 / 64.0 {
            assert_eq!(v.is_sign_negative(), x.is_sign_negative(), "{}", x);
        }
        x += 0.0371;
    }

    assert_eq!(from_fixed(to_fixed(-10.5)), -10.5);
}

#[test]
fn dash_line() {
    assert_eq!(
        dash_lengths(&line(), &[4.0, 2.0], 0.0),
        Ok(vec![
            vec![point(0.0, 0.0), point(4.0, 0.0)],
            vec![point(6.0, 0.0), point(10.0, 0.0)],
        ])
    );
}

#[test]
fn dash_line_starting_in_a_gap() {
    // The offset consumes the whole first dash, the walk starts at the
    // beginning of the gap.
    assert_eq!(
        dash_lengths(&line(), &[4.0, 2.0], 4.0),
        Ok(vec![
            vec![point(2.0, 0.0), point(6.0, 0.0)],
            vec![point(8.0, 0.0), point(10.0, 0.0)],
        ])
    );
    // Same position in the next cycle.
    assert_eq!(
        dash_lengths(&line(), &[4.0, 2.0], 10.0),
        dash_lengths(&line(), &[4.0, 2.0], 4.0)
    );
}

#[test]
fn join_threshold() {
    let mut builder = Commands::builder();
    reassemble(
        &[
            vec![point(0.0, 0.0), point(0.0625, 0.0625)],
            vec![point(0.0, 0.0), point(0.125, 0.015625)],
        ],
        &mut builder,
    );

    assert_eq!(
        builder.build().as_slice(),
        &[
            Command::MoveTo {
                to: FixedPoint::from_bits(0, 0)
            },
            Command::MoveTo {
                to: FixedPoint::from_bits(0, 0)
            },
            Command::LineTo {
                to: FixedPoint::from_bits(8, 1)
            },
        ]
    );
}

#[test]
fn raw_and_typed_pipelines_agree() {
    init_logger();

    let commands = wavy_path(16);
    let raw = RawPath::from_commands(&commands);

    for pattern in &PATTERNS {
        for &offset in &OFFSETS {
            let options = DashOptions::dashes(pattern).with_offset(offset);
            let typed = dashed_commands(&commands, &options).unwrap();
            let buffer = dashed(&raw, &options).unwrap();

            assert_eq!(RawPath::from_commands(&typed), buffer);
        }
    }
}

#[test]
fn output_only_has_lines() {
    init_logger();

    let raw = RawPath::from_commands(&wavy_path(16));
    let options = DashOptions::dashes(&[3.0, 1.0, 0.25]).with_offset(-2.0);
    let dashes = dashed(&raw, &options).unwrap().decode().unwrap();

    assert!(dashes.num_subpaths() > 10);
    assert!(matches!(dashes[0], Command::MoveTo { .. }));
    for cmd in &dashes {
        assert!(
            matches!(cmd, Command::MoveTo { .. } | Command::LineTo { .. }),
            "{:?}",
            cmd
        );
    }

    // No segment is shorter than the join threshold.
    let mut previous = None;
    for cmd in &dashes {
        match cmd {
            Command::MoveTo { to } => previous = Some(to),
            Command::LineTo { to } => {
                if let Some(from) = previous {
                    assert!(from.manhattan_distance(to) > 8);
                }
                previous = Some(to);
            }
            _ => unreachable!(),
        }
    }
}

#[test]
fn every_subpath_restarts_the_pattern() {
    let options = DashOptions::dashes(&[1.5, 0.5]).with_offset(0.75);

    let mut builder = Commands::builder().quantized();
    builder.polyline(&[point(0.0, 0.0), point(7.0, 0.0)]);
    builder.polyline(&[point(0.0, 10.0), point(7.0, 10.0)]);
    let dashes = dashed_commands(&builder.build(), &options).unwrap();

    let (top, bottom): (Vec<FixedPoint>, Vec<FixedPoint>) = dashes
        .iter()
        .map(|cmd| cmd.to())
        .partition(|p| p.y.to_bits() == 0);

    assert!(top.len() > 2);
    assert_eq!(top.len(), bottom.len());
    for (a, b) in top.iter().zip(&bottom) {
        assert_eq!(a.x, b.x);
    }
}

#[test]
fn invalid_input() {
    let raw = RawPath::from_vec(vec![0, 0, 0, 0, 2, 64, 64]);
    assert!(matches!(
        dashed(&raw, &DashOptions::dashes(&[1.0, 1.0])),
        Err(DashError::Decode(_))
    ));

    let commands = wavy_path(2);
    assert!(matches!(
        dashed_commands(&commands, &DashOptions::dashes(&[1.0, f64::NAN])),
        Err(DashError::InvalidLength { index: 1, length }) if length.is_nan()
    ));
}
