//! Tools to write drawing commands.
//!
//! # Path builder
//!
//! The [`RasterBuilder`] trait is the protocol spoken by scanline rasterizers:
//! start a sub-path at a position, then add line segments to it. All positions
//! are 26.6 fixed-point.
//!
//! [`PathBuilder`] extends it with quadratic and cubic bézier curves, which is
//! what command buffers such as [`Commands`](crate::Commands) and
//! [`RawPath`](crate::RawPath) store.
//!
//! Unlike the rasterizer protocol, sub-paths are not explicitly ended: starting
//! a new sub-path ends the previous one.
//!
//! # Quantization
//!
//! Positions usually come from floating point computations. The
//! [`Quantized`] adapter (see [`PathBuilder::quantized`]) accepts `f64` points
//! and rounds them to the nearest 1/64 before forwarding them.
//!
//! ```
//! use dashline_path::{Command, Commands, FixedPoint};
//! use dashline_path::builder::*;
//! use dashline_path::math::point;
//!
//! let mut builder = Commands::builder().quantized();
//! builder.begin(point(1.0, 0.5));
//! builder.quadratic_bezier_to(point(2.0, 2.0), point(3.0, 0.0));
//! let commands = builder.build();
//!
//! assert_eq!(commands[0], Command::MoveTo { to: FixedPoint::from_bits(64, 32) });
//! ```

use crate::geom::FixedPoint;
use crate::math::Point;

/// The minimal interface used to feed a scanline rasterizer.
pub trait RasterBuilder {
    /// Starts a new sub-path at a given position.
    ///
    /// `at` becomes the current position of the sub-path.
    fn begin(&mut self, at: FixedPoint);

    /// Adds a line segment from the current position to `to`.
    fn line_to(&mut self, to: FixedPoint);
}

/// The interface for objects that store or consume drawing commands.
pub trait PathBuilder: RasterBuilder {
    /// Adds a quadratic bézier curve to the current sub-path.
    fn quadratic_bezier_to(&mut self, ctrl: FixedPoint, to: FixedPoint);

    /// Adds a cubic bézier curve to the current sub-path.
    fn cubic_bezier_to(&mut self, ctrl1: FixedPoint, ctrl2: FixedPoint, to: FixedPoint);

    /// Hints at the builder that a certain number of commands will be added.
    ///
    /// The Builder implementation may use this information to pre-allocate
    /// memory as an optimization.
    fn reserve(&mut self, _commands: usize) {}

    /// Returns a builder that accepts floating point positions.
    fn quantized(self) -> Quantized<Self>
    where
        Self: Sized,
    {
        Quantized::new(self)
    }
}

/// Builds a path object.
pub trait Build {
    /// The type of object that is created by this builder.
    type PathType;

    /// Builds a path object, consuming the builder.
    fn build(self) -> Self::PathType;
}

/// A builder adapter that rounds floating point positions to 26.6 fixed-point.
pub struct Quantized<Builder> {
    builder: Builder,
}

impl<Builder: PathBuilder> Quantized<Builder> {
    #[inline]
    pub fn new(builder: Builder) -> Self {
        Quantized { builder }
    }

    #[inline]
    pub fn begin(&mut self, at: Point) {
        self.builder.begin(FixedPoint::from_point(at));
    }

    #[inline]
    pub fn line_to(&mut self, to: Point) {
        self.builder.line_to(FixedPoint::from_point(to));
    }

    #[inline]
    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.builder
            .quadratic_bezier_to(FixedPoint::from_point(ctrl), FixedPoint::from_point(to));
    }

    #[inline]
    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.builder.cubic_bezier_to(
            FixedPoint::from_point(ctrl1),
            FixedPoint::from_point(ctrl2),
            FixedPoint::from_point(to),
        );
    }

    /// Adds line segments joining the points, starting a sub-path at the first one.
    pub fn polyline(&mut self, points: &[Point]) {
        if let Some((first, rest)) = points.split_first() {
            self.begin(*first);
            for p in rest {
                self.line_to(*p);
            }
        }
    }

    pub fn build(self) -> Builder::PathType
    where
        Builder: Build,
    {
        self.builder.build()
    }
}

impl<Builder: Build> Build for Quantized<Builder> {
    type PathType = Builder::PathType;

    fn build(self) -> Builder::PathType {
        self.builder.build()
    }
}

// Automatically implement the builder traits for all &mut Builder.
impl<'l, B: RasterBuilder> RasterBuilder for &'l mut B {
    #[inline]
    fn begin(&mut self, at: FixedPoint) {
        (**self).begin(at)
    }

    #[inline]
    fn line_to(&mut self, to: FixedPoint) {
        (**self).line_to(to)
    }
}

impl<'l, B: PathBuilder> PathBuilder for &'l mut B {
    #[inline]
    fn quadratic_bezier_to(&mut self, ctrl: FixedPoint, to: FixedPoint) {
        (**self).quadratic_bezier_to(ctrl, to)
    }

    #[inline]
    fn cubic_bezier_to(&mut self, ctrl1: FixedPoint, ctrl2: FixedPoint, to: FixedPoint) {
        (**self).cubic_bezier_to(ctrl1, ctrl2, to)
    }

    #[inline]
    fn reserve(&mut self, commands: usize) {
        (**self).reserve(commands)
    }
}

#[test]
fn quantized_polyline() {
    use crate::math::point;
    use crate::{Command, Commands};

    let mut builder = Commands::builder().quantized();
    builder.polyline(&[point(0.0, 0.0), point(1.0, 0.0), point(1.0, -0.5)]);
    builder.polyline(&[]);
    let commands = builder.build();

    assert_eq!(
        commands.as_slice(),
        &[
            Command::MoveTo {
                to: FixedPoint::from_bits(0, 0)
            },
            Command::LineTo {
                to: FixedPoint::from_bits(64, 0)
            },
            Command::LineTo {
                to: FixedPoint::from_bits(64, -32)
            },
        ]
    );
}

#[test]
fn build_through_mutable_reference() {
    use crate::Commands;

    fn write_curve<B: PathBuilder>(mut builder: B) {
        builder.begin(FixedPoint::from_bits(1, 2));
        builder.cubic_bezier_to(
            FixedPoint::from_bits(3, 4),
            FixedPoint::from_bits(5, 6),
            FixedPoint::from_bits(7, 8),
        );
    }

    let mut builder = Commands::builder();
    write_curve(&mut builder);
    write_curve(&mut builder);

    assert_eq!(builder.build().len(), 4);
}
