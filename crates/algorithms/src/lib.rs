#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Dashing and clean-up algorithms for fixed-point paths.
//!
//! This crate is reexported in [dashline](https://docs.rs/dashline/).
//!
//! # Pipeline
//!
//! ```ascii
//!  commands ──> flatten ──> polylines ──> dash ──> polylines ──> reassemble ──> commands
//! ```
//!
//! - [`flatten`](crate::path::flatten) decodes the drawing commands and turns
//!   curves into points (see the `dashline_path` crate),
//! - [`dash`](crate::dash) keeps the "on" parts of a dash pattern,
//! - [`reassemble`](crate::reassemble) writes the polylines back as fixed-point
//!   commands, skipping points too close to the previous one.
//!
//! [`dashed`](crate::dashed) runs the whole pipeline.
//!
//! ```
//! use dashline_algorithms::{dashed_commands, DashOptions};
//! use dashline_algorithms::path::{Command, Commands, FixedPoint};
//! use dashline_algorithms::path::builder::*;
//! use dashline_algorithms::path::math::point;
//!
//! let mut builder = Commands::builder().quantized();
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(10.0, 0.0));
//! let line = builder.build();
//!
//! let options = DashOptions::dashes(&[4.0, 2.0]);
//! let dashes = dashed_commands(&line, &options).unwrap();
//!
//! assert_eq!(dashes.num_subpaths(), 2);
//! assert_eq!(dashes[1], Command::LineTo { to: FixedPoint::from_bits(256, 0) });
//! ```

pub extern crate dashline_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

pub mod dash;
mod error;
mod pipeline;
pub mod reassemble;

#[doc(inline)]
pub use crate::dash::{dash, dash_lengths, DashCursor, DashPattern, Dasher, WalkState};
pub use crate::error::DashError;
#[doc(inline)]
pub use crate::pipeline::{dash_polylines, dashed, dashed_commands, DashOptions};
#[doc(inline)]
pub use crate::reassemble::{reassemble, reassemble_with_threshold, JoinFilter, JOIN_THRESHOLD};

pub use crate::path::geom;
pub use crate::path::math;
