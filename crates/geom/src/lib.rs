#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [dashline](https://docs.rs/dashline/).
//!
//! # Overview.
//!
//! This crate implements the maths needed to turn vector paths into
//! polylines and back:
//!
//! - quadratic and cubic bézier curves,
//! - deterministic curve sampling,
//! - 26.6 fixed-point coordinates as consumed by scanline rasterizers.
//!
//! # Sampling
//!
//! Curves are approximated with a sequence of points taken at evenly spaced
//! values of `t`. The number of samples only depends on the length of the
//! control polygon and on a `density` parameter (samples per unit), so a
//! given curve always produces the same points.
//!
//! ```
//! use dashline_geom::{point, QuadraticBezierSegment, Segment};
//!
//! let curve = QuadraticBezierSegment {
//!     from: point(0.0, 0.0),
//!     ctrl: point(5.0, 5.0),
//!     to: point(10.0, 0.0),
//! };
//!
//! let points: Vec<_> = curve.samples(1.0).collect();
//! assert_eq!(points.last(), Some(&point(10.0, 0.0)));
//! ```
//!
//! # Fixed point
//!
//! ```
//! use dashline_geom::fixed::{from_fixed, to_fixed};
//!
//! assert_eq!(to_fixed(1.5).to_bits(), 96);
//! assert_eq!(from_fixed(to_fixed(-10.5)), -10.5);
//! ```

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod cubic_bezier;
pub mod fixed;
pub mod quadratic_bezier;
mod segment;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::fixed::{Fixed, FixedPoint};
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::segment::{Samples, Segment, MAX_SAMPLES, MIN_SAMPLES};

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use num_traits::cast::cast;
    pub(crate) use num_traits::{Float, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float + NumCast + Sized + Display + Debug + AddAssign + SubAssign + MulAssign + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const THREE: Self;
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}
