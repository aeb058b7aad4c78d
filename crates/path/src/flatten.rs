//! Approximate drawing commands with polylines.
//!
//! # Flattening
//!
//! Flattening turns a command stream into a list of sub-paths, each of them a
//! sequence of points. Line segments are kept as is, while quadratic and cubic
//! bézier curves are replaced with points sampled along the curve (see
//! [`Segment::samples`](crate::geom::Segment::samples)).
//!
//! The number of samples per curve depends on the length of its control
//! polygon and on [`FlattenOptions::density`], which makes the output fully
//! deterministic.
//!
//! ```
//! use dashline_path::{Commands, FlattenOptions, flatten};
//! use dashline_path::builder::*;
//! use dashline_path::math::point;
//!
//! let mut builder = Commands::builder().quantized();
//! builder.begin(point(0.0, 0.0));
//! builder.quadratic_bezier_to(point(5.0, 5.0), point(10.0, 0.0));
//! let commands = builder.build();
//!
//! let polylines = flatten(&commands, &FlattenOptions::DEFAULT);
//! assert_eq!(polylines.len(), 1);
//! assert_eq!(polylines[0].first(), Some(&point(0.0, 0.0)));
//! assert_eq!(polylines[0].last(), Some(&point(10.0, 0.0)));
//! ```

use crate::builder::{Build, PathBuilder, RasterBuilder};
use crate::commands::Command;
use crate::error::DecodeError;
use crate::geom::{CubicBezierSegment, FixedPoint, QuadraticBezierSegment, Segment};
use crate::math::{point, Point};

use core::mem;

/// An ordered sequence of points. The first point is the start of the sub-path.
pub type Subpath = Vec<Point>;

/// An ordered list of sub-paths.
pub type Polylines = Vec<Subpath>;

/// Parameters for the flattener.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FlattenOptions {
    /// Number of curve samples per unit of control polygon length.
    ///
    /// Each curve gets at least `geom::MIN_SAMPLES` samples regardless of this value.
    /// Default value: `FlattenOptions::DEFAULT_DENSITY`.
    pub density: f64,
}

impl FlattenOptions {
    pub const DEFAULT_DENSITY: f64 = 1.0;

    pub const DEFAULT: Self = FlattenOptions {
        density: Self::DEFAULT_DENSITY,
    };

    #[inline]
    pub fn density(density: f64) -> Self {
        Self::DEFAULT.with_density(density)
    }

    #[inline]
    pub const fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A path builder that produces polylines.
///
/// Sub-paths that are started without adding any segment are kept as single
/// point sub-paths. It is up to the consumer to discard them.
pub struct Flattener {
    options: FlattenOptions,
    cursor: Point,
    current: Subpath,
    output: Polylines,
}

impl Flattener {
    pub fn new(options: &FlattenOptions) -> Self {
        Flattener {
            options: *options,
            cursor: point(0.0, 0.0),
            current: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Applies a single command.
    #[inline]
    pub fn command(&mut self, cmd: Command) {
        cmd.build_into(self);
    }

    /// The position after the last command.
    #[inline]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.output.push(mem::take(&mut self.current));
        }
    }

    // Segments added before any sub-path is started begin at the cursor.
    fn ensure_started(&mut self) {
        if self.current.is_empty() {
            self.current.push(self.cursor);
        }
    }

    /// Flushes the sub-path in progress and returns the polylines.
    pub fn build(mut self) -> Polylines {
        self.flush();
        log::debug!("flattened into {} sub-paths", self.output.len());

        self.output
    }
}

impl RasterBuilder for Flattener {
    fn begin(&mut self, at: FixedPoint) {
        self.flush();
        let at = at.to_point();
        self.current.push(at);
        self.cursor = at;
    }

    fn line_to(&mut self, to: FixedPoint) {
        self.ensure_started();
        let to = to.to_point();
        self.current.push(to);
        self.cursor = to;
    }
}

impl PathBuilder for Flattener {
    fn quadratic_bezier_to(&mut self, ctrl: FixedPoint, to: FixedPoint) {
        self.ensure_started();
        let curve = QuadraticBezierSegment {
            from: self.cursor,
            ctrl: ctrl.to_point(),
            to: to.to_point(),
        };
        self.current.extend(curve.samples(self.options.density));
        self.cursor = curve.to;
    }

    fn cubic_bezier_to(&mut self, ctrl1: FixedPoint, ctrl2: FixedPoint, to: FixedPoint) {
        self.ensure_started();
        let curve = CubicBezierSegment {
            from: self.cursor,
            ctrl1: ctrl1.to_point(),
            ctrl2: ctrl2.to_point(),
            to: to.to_point(),
        };
        self.current.extend(curve.samples(self.options.density));
        self.cursor = curve.to;
    }

    fn reserve(&mut self, commands: usize) {
        self.current.reserve(commands);
    }
}

impl Build for Flattener {
    type PathType = Polylines;

    fn build(self) -> Polylines {
        self.build()
    }
}

/// Flattens a sequence of commands into polylines.
pub fn flatten<Iter>(commands: Iter, options: &FlattenOptions) -> Polylines
where
    Iter: IntoIterator<Item = Command>,
{
    let mut flattener = Flattener::new(options);
    for cmd in commands {
        flattener.command(cmd);
    }

    flattener.build()
}

/// Flattens a sequence of decoded commands, aborting on the first decoding error.
///
/// No polylines are returned if any command fails to decode.
pub fn try_flatten<Iter>(commands: Iter, options: &FlattenOptions) -> Result<Polylines, DecodeError>
where
    Iter: IntoIterator<Item = Result<Command, DecodeError>>,
{
    let mut flattener = Flattener::new(options);
    for cmd in commands {
        flattener.command(cmd?);
    }

    Ok(flattener.build())
}

#[cfg(test)]
fn fp(x: f64, y: f64) -> FixedPoint {
    FixedPoint::from_point(point(x, y))
}

#[test]
fn lines_and_moves() {
    let mut flattener = Flattener::new(&FlattenOptions::DEFAULT);
    flattener.begin(fp(0.0, 0.0));
    flattener.line_to(fp(1.0, 0.0));
    flattener.line_to(fp(1.0, 1.0));
    flattener.begin(fp(5.0, 5.0));
    flattener.begin(fp(-2.5, 3.0));
    flattener.line_to(fp(-2.5, -3.0));

    assert_eq!(flattener.cursor(), point(-2.5, -3.0));
    assert_eq!(
        flattener.build(),
        vec![
            vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)],
            vec![point(5.0, 5.0)],
            vec![point(-2.5, 3.0), point(-2.5, -3.0)],
        ]
    );
}

#[test]
fn quadratic_curve() {
    let mut flattener = Flattener::new(&FlattenOptions::DEFAULT);
    flattener.begin(fp(0.0, 0.0));
    flattener.quadratic_bezier_to(fp(5.0, 5.0), fp(10.0, 0.0));
    flattener.line_to(fp(10.0, -1.0));
    let polylines = flattener.build();

    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(5.0, 5.0),
        to: point(10.0, 0.0),
    };
    let n = curve.sample_count(1.0);

    assert_eq!(polylines.len(), 1);
    // Start point, n - 1 curve samples and the final line-to.
    assert_eq!(polylines[0].len(), n + 1);
    assert_eq!(polylines[0][1], curve.sample(1.0 / (n - 1) as f64));
    assert_eq!(polylines[0][n - 1], point(10.0, 0.0));
    assert_eq!(polylines[0][n], point(10.0, -1.0));
}

#[test]
fn cubic_curve_density() {
    let build = |density: f64| {
        let mut flattener = Flattener::new(&FlattenOptions::density(density));
        flattener.begin(fp(0.0, 0.0));
        flattener.cubic_bezier_to(fp(0.0, 10.0), fp(10.0, 10.0), fp(10.0, 0.0));
        flattener.build()
    };

    // Control polygon length is 30.
    assert_eq!(build(1.0)[0].len(), 30);
    assert_eq!(build(2.0)[0].len(), 60);
    assert_eq!(build(0.0)[0].len(), 4);
    assert_eq!(build(1.0), build(1.0));
}

#[test]
fn segments_before_begin_start_at_the_origin() {
    let mut flattener = Flattener::new(&FlattenOptions::DEFAULT);
    flattener.line_to(fp(3.0, 4.0));

    assert_eq!(
        flattener.build(),
        vec![vec![point(0.0, 0.0), point(3.0, 4.0)]]
    );
}

#[test]
fn empty_stream() {
    let polylines = flatten(Vec::new(), &FlattenOptions::DEFAULT);
    assert!(polylines.is_empty());
}

#[test]
fn decode_error_aborts() {
    let commands = vec![
        Ok(Command::MoveTo { to: fp(0.0, 0.0) }),
        Ok(Command::LineTo { to: fp(1.0, 0.0) }),
        Err(DecodeError::UnknownTag { tag: 9, offset: 8 }),
        Ok(Command::LineTo { to: fp(2.0, 0.0) }),
    ];

    assert_eq!(
        try_flatten(commands, &FlattenOptions::DEFAULT),
        Err(DecodeError::UnknownTag { tag: 9, offset: 8 })
    );
}

#[test]
fn flatten_raw_buffer() {
    use crate::RawPath;

    let raw = RawPath::from_vec(vec![0, 0, 0, 0, 1, 640, 0, 1, 0, 0, 64, 0, 1, 64, 640, 1]);
    let polylines = raw.flatten(&FlattenOptions::DEFAULT).unwrap();

    assert_eq!(
        polylines,
        vec![
            vec![point(0.0, 0.0), point(10.0, 0.0)],
            vec![point(0.0, 1.0), point(1.0, 10.0)],
        ]
    );

    let broken = RawPath::from_vec(vec![0, 0, 0, 0, 5, 640, 0, 5]);
    assert_eq!(
        broken.flatten(&FlattenOptions::DEFAULT),
        Err(DecodeError::UnknownTag { tag: 5, offset: 4 })
    );
}
