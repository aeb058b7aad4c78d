#![deny(bare_trait_objects)]

//! Dash patterns for the fixed-point paths consumed by scanline rasterizers.
//!
//! # Crates
//!
//! This meta-crate (`dashline`) reexports the following sub-crates for convenience:
//!
//! * **dashline_algorithms** - Dash patterns, join filtering and the dashing pipeline.
//! * **dashline_path** - Fixed-point drawing commands, their tagged buffer encoding
//!   and flattening.
//! * **dashline_geom** - Bézier curve sampling and 26.6 fixed-point numbers.
//!
//! Each `dashline_<name>` crate is reexported as a `<name>` module in `dashline`. For example:
//!
//! ```ignore
//! extern crate dashline_path;
//! use dashline_path::RawPath;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate dashline;
//! use dashline::path::RawPath;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Dashing a path
//!
//! ```
//! use dashline::math::point;
//! use dashline::path::{Commands, FlattenOptions};
//! use dashline::path::builder::*;
//! use dashline::{dashed_commands, DashOptions};
//!
//! // Build a path.
//! let mut builder = Commands::builder().quantized();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(20.0, 0.0));
//! builder.cubic_bezier_to(point(30.0, 0.0), point(30.0, 10.0), point(20.0, 10.0));
//! let path = builder.build();
//!
//! let options = DashOptions::dashes(&[5.0, 2.5])
//!     .with_offset(1.0)
//!     .with_flattening(FlattenOptions::density(2.0));
//!
//! let dashes = dashed_commands(&path, &options).unwrap();
//!
//! // Only move-to and line-to commands are left.
//! assert!(dashes.num_subpaths() > 1);
//! ```
//!
//! ## Feeding a rasterizer
//!
//! Rasterizers usually read a flat buffer of integers in which each command
//! is surrounded by its tag. [`RawPath`](crate::path::RawPath) is that buffer.
//!
//! ```
//! use dashline::path::RawPath;
//! use dashline::{dashed, DashOptions};
//!
//! // move-to (0, 0), line-to (10, 0), in 1/64 units.
//! let path = RawPath::from_vec(vec![0, 0, 0, 0, 1, 640, 0, 1]);
//!
//! let dashes = dashed(&path, &DashOptions::dashes(&[4.0, 2.0])).unwrap();
//! assert_eq!(dashes.len(), 16);
//!
//! // Malformed buffers are rejected.
//! assert!(dashed(&RawPath::from_vec(vec![0, 0, 0]), &DashOptions::DEFAULT).is_err());
//! ```

pub extern crate dashline_algorithms;

pub use dashline_algorithms as algorithms;
pub use algorithms::geom;
pub use algorithms::path;

pub use algorithms::{dashed, dashed_commands, DashError, DashOptions};
pub use path::math;
