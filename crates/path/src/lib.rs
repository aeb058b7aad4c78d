#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Drawing commands in 26.6 fixed-point coordinates and the tools to turn
//! them into polylines.
//!
//! This crate is reexported in [dashline](https://docs.rs/dashline/).
//!
//! Commands can be stored either as a typed sequence ([`Commands`]) or as the
//! flat tag-prefixed integer buffer consumed by scanline rasterizers
//! ([`RawPath`]). Both are written through the [`PathBuilder`] trait.
//!
//! # Examples
//!
//! ```
//! use dashline_path::{Commands, FlattenOptions, flatten};
//! use dashline_path::builder::*;
//! use dashline_path::math::point;
//!
//! let mut builder = Commands::builder().quantized();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.begin(point(0.0, 5.0));
//! builder.line_to(point(10.0, 5.0));
//! let commands = builder.build();
//!
//! let polylines = flatten(&commands, &FlattenOptions::DEFAULT);
//! assert_eq!(polylines.len(), 2);
//! assert_eq!(polylines[1], vec![point(0.0, 5.0), point(10.0, 5.0)]);
//! ```

pub use dashline_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
pub mod commands;
mod error;
pub mod flatten;
pub mod raw;

#[doc(inline)]
pub use crate::commands::{Command, Commands, Verb};
pub use crate::error::DecodeError;
#[doc(inline)]
pub use crate::flatten::{flatten, try_flatten, FlattenOptions, Flattener, Polylines, Subpath};
#[doc(inline)]
pub use crate::geom::{Fixed, FixedPoint};
#[doc(inline)]
pub use crate::raw::RawPath;

pub mod traits {
    //! `dashline_path` traits reexported here for convenience.

    pub use crate::builder::Build;
    pub use crate::builder::PathBuilder;
    pub use crate::builder::RasterBuilder;
}

pub mod math {
    //! f64 version of the dashline_geom types used everywhere. Most other dashline crates
    //! reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }
}
