//! Write polylines back as fixed-point drawing commands.
//!
//! Rasterizers produce artifacts when a line joins two points that are almost
//! at the same position. While writing the commands, points closer than a
//! threshold to the last emitted point are skipped. The distance is measured
//! in 1/64 units, as the sum of the absolute coordinate differences.
//!
//! ```
//! use dashline_algorithms::reassemble::reassemble;
//! use dashline_algorithms::path::{Command, Commands, FixedPoint};
//! use dashline_algorithms::path::builder::Build;
//! use dashline_algorithms::math::point;
//!
//! let polylines = vec![vec![point(0.0, 0.0), point(0.0625, 0.0625), point(2.0, 0.0)]];
//!
//! let mut builder = Commands::builder();
//! reassemble(&polylines, &mut builder);
//! let commands = builder.build();
//!
//! // The second point is only 8/64 away from the first one.
//! assert_eq!(
//!     commands.as_slice(),
//!     &[
//!         Command::MoveTo { to: FixedPoint::from_bits(0, 0) },
//!         Command::LineTo { to: FixedPoint::from_bits(128, 0) },
//!     ]
//! );
//! ```

use crate::path::builder::{Build, RasterBuilder};
use crate::path::{FixedPoint, Subpath};

/// Default join threshold: 8/64 of a unit.
pub const JOIN_THRESHOLD: i64 = 8;

/// A builder adapter that drops line segments shorter than a threshold.
///
/// The length of a segment is the Manhattan distance between its end and the
/// last position forwarded to the inner builder. Skipped points don't become
/// the reference of the next segment, so a run of short steps is forwarded
/// once it adds up to more than the threshold.
///
/// Starting a sub-path is always forwarded.
pub struct JoinFilter<Builder> {
    builder: Builder,
    threshold: i64,
    reference: Option<FixedPoint>,
    skipped: usize,
}

impl<Builder: RasterBuilder> JoinFilter<Builder> {
    #[inline]
    pub fn new(builder: Builder) -> Self {
        JoinFilter::with_threshold(builder, JOIN_THRESHOLD)
    }

    #[inline]
    pub fn with_threshold(builder: Builder, threshold: i64) -> Self {
        JoinFilter {
            builder,
            threshold,
            reference: None,
            skipped: 0,
        }
    }

    #[inline]
    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    /// Number of points that were skipped so far.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<Builder: RasterBuilder> RasterBuilder for JoinFilter<Builder> {
    fn begin(&mut self, at: FixedPoint) {
        self.builder.begin(at);
        self.reference = Some(at);
    }

    fn line_to(&mut self, to: FixedPoint) {
        if let Some(reference) = self.reference {
            if reference.manhattan_distance(to) <= self.threshold {
                self.skipped += 1;
                return;
            }
        }

        self.builder.line_to(to);
        self.reference = Some(to);
    }
}

impl<Builder: RasterBuilder + Build> Build for JoinFilter<Builder> {
    type PathType = Builder::PathType;

    fn build(self) -> Builder::PathType {
        self.builder.build()
    }
}

/// Writes polylines into a builder, skipping points within [`JOIN_THRESHOLD`]
/// of the previous one.
pub fn reassemble<B: RasterBuilder>(paths: &[Subpath], builder: &mut B) {
    reassemble_with_threshold(paths, JOIN_THRESHOLD, builder);
}

/// Writes polylines into a builder, skipping points within `threshold` of the
/// previous one.
///
/// Empty sub-paths are ignored. Every other sub-path starts with a `begin`
/// at its first point, rounded to fixed-point.
pub fn reassemble_with_threshold<B: RasterBuilder>(paths: &[Subpath], threshold: i64, builder: &mut B) {
    let mut filter = JoinFilter::with_threshold(builder, threshold);
    let mut points = 0;

    for path in paths {
        let (first, rest) = match path.split_first() {
            Some(split) => split,
            None => continue,
        };

        filter.begin(FixedPoint::from_point(*first));
        for p in rest {
            filter.line_to(FixedPoint::from_point(*p));
        }
        points += path.len();
    }

    log::debug!(
        "reassembled {} points, {} skipped by the join filter",
        points,
        filter.skipped()
    );
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::{Command, Commands};

#[cfg(test)]
fn run(paths: &[Subpath]) -> Commands {
    let mut builder = Commands::builder();
    reassemble(paths, &mut builder);

    builder.build()
}

#[test]
fn threshold_is_inclusive() {
    // (5 + 3) / 64 collapses.
    let collapsed = run(&[vec![point(0.0, 0.0), point(5.0 / 64.0, 3.0 / 64.0)]]);
    assert_eq!(
        collapsed.as_slice(),
        &[Command::MoveTo {
            to: FixedPoint::from_bits(0, 0)
        }]
    );

    // (5 + 4) / 64 is kept.
    let kept = run(&[vec![point(0.0, 0.0), point(5.0 / 64.0, -4.0 / 64.0)]]);
    assert_eq!(
        kept.as_slice(),
        &[
            Command::MoveTo {
                to: FixedPoint::from_bits(0, 0)
            },
            Command::LineTo {
                to: FixedPoint::from_bits(5, -4)
            },
        ]
    );
}

#[test]
fn skipped_points_do_not_move_the_reference() {
    let mut filter = JoinFilter::new(Commands::builder());
    filter.begin(FixedPoint::from_bits(0, 0));
    filter.line_to(FixedPoint::from_bits(4, 0));
    filter.line_to(FixedPoint::from_bits(8, 0));
    filter.line_to(FixedPoint::from_bits(12, 0));
    filter.line_to(FixedPoint::from_bits(16, 0));
    // 9 away from (12, 0), but only 5 away from the skipped (16, 0).
    filter.line_to(FixedPoint::from_bits(21, 0));

    assert_eq!(filter.skipped(), 3);
    assert_eq!(
        filter.build().as_slice(),
        &[
            Command::MoveTo {
                to: FixedPoint::from_bits(0, 0)
            },
            Command::LineTo {
                to: FixedPoint::from_bits(12, 0)
            },
            Command::LineTo {
                to: FixedPoint::from_bits(21, 0)
            },
        ]
    );
}

#[test]
fn subpath_starts_are_kept() {
    let commands = run(&[
        vec![point(0.0, 0.0), point(1.0, 0.0)],
        vec![],
        vec![point(1.0, 0.0)],
        vec![point(1.0, 0.0), point(1.0, 2.0)],
    ]);

    assert_eq!(commands.num_subpaths(), 3);
    assert_eq!(
        commands.as_slice(),
        &[
            Command::MoveTo {
                to: FixedPoint::from_bits(0, 0)
            },
            Command::LineTo {
                to: FixedPoint::from_bits(64, 0)
            },
            Command::MoveTo {
                to: FixedPoint::from_bits(64, 0)
            },
            Command::MoveTo {
                to: FixedPoint::from_bits(64, 0)
            },
            Command::LineTo {
                to: FixedPoint::from_bits(64, 128)
            },
        ]
    );
}

#[test]
fn custom_threshold() {
    let paths = vec![vec![point(0.0, 0.0), point(0.25, 0.0), point(0.5, 0.0)]];

    let mut builder = Commands::builder();
    reassemble_with_threshold(&paths, 0, &mut builder);
    assert_eq!(builder.build().len(), 3);

    let mut builder = Commands::builder();
    reassemble_with_threshold(&paths, 16, &mut builder);
    assert_eq!(
        builder.build().as_slice(),
        &[
            Command::MoveTo {
                to: FixedPoint::from_bits(0, 0)
            },
            Command::LineTo {
                to: FixedPoint::from_bits(32, 0)
            },
        ]
    );
}

#[test]
fn writes_raw_buffers() {
    use crate::path::RawPath;

    let mut raw = RawPath::new();
    reassemble(&[vec![point(0.0, 0.0), point(1.0, 1.0)]], &mut raw);

    assert_eq!(raw.as_slice(), &[0, 0, 0, 0, 1, 64, 64, 1]);
}
