use crate::dash::{dash, DashPattern};
use crate::error::DashError;
use crate::path::builder::RasterBuilder;
use crate::path::{flatten, Commands, FlattenOptions, Polylines, RawPath, Subpath};
use crate::reassemble::{reassemble_with_threshold, JOIN_THRESHOLD};

/// Parameters for the dashing pipeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct DashOptions {
    /// Lengths of the alternating dashes and gaps, starting with a dash.
    ///
    /// An empty pattern leaves the path solid.
    /// Default value: empty.
    pub dashes: Vec<f64>,

    /// Distance into the pattern at which each sub-path starts.
    ///
    /// Default value: `0.0`.
    pub offset: f64,

    /// How curves are turned into points before dashing.
    ///
    /// Default value: `FlattenOptions::DEFAULT`.
    pub flattening: FlattenOptions,

    /// Points within this Manhattan distance (in 1/64 units) of the previous
    /// point are skipped in the output.
    ///
    /// Default value: `JOIN_THRESHOLD`.
    pub join_threshold: i64,
}

impl DashOptions {
    pub const DEFAULT: Self = DashOptions {
        dashes: Vec::new(),
        offset: 0.0,
        flattening: FlattenOptions::DEFAULT,
        join_threshold: JOIN_THRESHOLD,
    };

    #[inline]
    pub fn dashes(dashes: &[f64]) -> Self {
        Self::DEFAULT.with_dashes(dashes)
    }

    #[inline]
    pub fn with_dashes(mut self, dashes: &[f64]) -> Self {
        self.dashes = dashes.to_vec();
        self
    }

    #[inline]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    #[inline]
    pub fn with_flattening(mut self, flattening: FlattenOptions) -> Self {
        self.flattening = flattening;
        self
    }

    #[inline]
    pub fn with_join_threshold(mut self, threshold: i64) -> Self {
        self.join_threshold = threshold;
        self
    }

    fn pattern(&self) -> Result<DashPattern, DashError> {
        let pattern = DashPattern::new(&self.dashes)?;
        if !pattern.is_empty() && !self.offset.is_finite() {
            return Err(DashError::InvalidOffset(self.offset));
        }

        let density = self.flattening.density;
        if !density.is_finite() || !(density > 0.0) {
            return Err(DashError::InvalidDensity(density));
        }

        Ok(pattern)
    }
}

impl Default for DashOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Applies the dash pattern of the options to polylines.
pub fn dash_polylines(polylines: &[Subpath], options: &DashOptions) -> Result<Polylines, DashError> {
    let pattern = options.pattern()?;

    Ok(dash(polylines, &pattern, options.offset))
}

/// Dashes a tag-prefixed command buffer.
///
/// The buffer is flattened, dashed and written back as move-to and line-to
/// commands. Nothing is produced if the buffer fails to decode or if the
/// options are invalid.
///
/// ```
/// use dashline_algorithms::{dashed, DashOptions};
/// use dashline_algorithms::path::RawPath;
///
/// let line = RawPath::from_vec(vec![0, 0, 0, 0, 1, 640, 0, 1]);
/// let dashes = dashed(&line, &DashOptions::dashes(&[4.0, 2.0])).unwrap();
///
/// assert_eq!(
///     dashes.as_slice(),
///     &[
///         0, 0, 0, 0, 1, 256, 0, 1, //
///         0, 384, 0, 0, 1, 640, 0, 1,
///     ]
/// );
/// ```
pub fn dashed(path: &RawPath, options: &DashOptions) -> Result<RawPath, DashError> {
    let pattern = options.pattern()?;
    let polylines = path.flatten(&options.flattening)?;

    let mut output = RawPath::with_capacity(path.len());
    write_dashes(&polylines, &pattern, options, &mut output);

    Ok(output)
}

/// Dashes a sequence of typed commands.
///
/// See [`dashed`].
pub fn dashed_commands(commands: &Commands, options: &DashOptions) -> Result<Commands, DashError> {
    let pattern = options.pattern()?;
    let polylines = flatten(commands, &options.flattening);

    let mut output = Commands::builder();
    write_dashes(&polylines, &pattern, options, &mut output);

    Ok(output.build())
}

fn write_dashes<B: RasterBuilder>(
    polylines: &[Subpath],
    pattern: &DashPattern,
    options: &DashOptions,
    output: &mut B,
) {
    let dashes = dash(polylines, pattern, options.offset);
    reassemble_with_threshold(&dashes, options.join_threshold, output);
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::path::builder::*;
#[cfg(test)]
use crate::path::{Command, DecodeError, FixedPoint};

#[cfg(test)]
fn square() -> Commands {
    let mut builder = Commands::builder().quantized();
    builder.polyline(&[
        point(0.0, 0.0),
        point(4.0, 0.0),
        point(4.0, 4.0),
        point(0.0, 4.0),
        point(0.0, 0.0),
    ]);

    builder.build()
}

#[test]
fn options_builders() {
    let options = DashOptions::dashes(&[3.0])
        .with_offset(-1.5)
        .with_flattening(FlattenOptions::density(2.0))
        .with_join_threshold(0);

    assert_eq!(options.dashes, vec![3.0]);
    assert_eq!(options.offset, -1.5);
    assert_eq!(options.flattening.density, 2.0);
    assert_eq!(options.join_threshold, 0);
    assert_eq!(DashOptions::default(), DashOptions::DEFAULT);
    assert_eq!(DashOptions::DEFAULT.join_threshold, JOIN_THRESHOLD);
}

#[test]
fn solid_pattern_keeps_the_path() {
    let commands = square();
    assert_eq!(dashed_commands(&commands, &DashOptions::DEFAULT), Ok(commands.clone()));

    let raw = RawPath::from_commands(&commands);
    assert_eq!(dashed(&raw, &DashOptions::DEFAULT), Ok(raw.clone()));
}

#[test]
fn dashes_around_corners() {
    let dashes = dashed_commands(&square(), &DashOptions::dashes(&[6.0, 2.0])).unwrap();

    let fp = |x: f64, y: f64| FixedPoint::from_point(point(x, y));
    assert_eq!(
        dashes.as_slice(),
        &[
            Command::MoveTo { to: fp(0.0, 0.0) },
            Command::LineTo { to: fp(4.0, 0.0) },
            Command::LineTo { to: fp(4.0, 2.0) },
            Command::MoveTo { to: fp(4.0, 4.0) },
            Command::LineTo { to: fp(0.0, 4.0) },
            Command::LineTo { to: fp(0.0, 2.0) },
        ]
    );
}

#[test]
fn invalid_options() {
    let commands = square();

    assert_eq!(
        dashed_commands(&commands, &DashOptions::dashes(&[1.0, 0.0])),
        Err(DashError::InvalidLength {
            index: 1,
            length: 0.0
        })
    );
    assert_eq!(
        dashed_commands(&commands, &DashOptions::dashes(&[1.0]).with_offset(f64::INFINITY)),
        Err(DashError::InvalidOffset(f64::INFINITY))
    );
    // The offset is irrelevant without a pattern.
    assert!(dashed_commands(&commands, &DashOptions::DEFAULT.with_offset(f64::INFINITY)).is_ok());
}

#[test]
fn invalid_density() {
    let commands = square();
    let with_density = |density| DashOptions::dashes(&[1.0]).with_flattening(FlattenOptions::density(density));

    assert_eq!(
        dashed_commands(&commands, &with_density(0.0)),
        Err(DashError::InvalidDensity(0.0))
    );
    assert_eq!(
        dashed_commands(&commands, &with_density(-2.0)),
        Err(DashError::InvalidDensity(-2.0))
    );
    assert_eq!(
        dashed(&RawPath::from_commands(&commands), &with_density(f64::INFINITY)),
        Err(DashError::InvalidDensity(f64::INFINITY))
    );
    assert!(matches!(
        dashed_commands(&commands, &with_density(f64::NAN)),
        Err(DashError::InvalidDensity(d)) if d.is_nan()
    ));
    // Checked even when the path is left solid.
    assert_eq!(
        dashed_commands(&commands, &DashOptions::DEFAULT.with_flattening(FlattenOptions::density(0.0))),
        Err(DashError::InvalidDensity(0.0))
    );
}

#[test]
fn decode_errors_produce_nothing() {
    let raw = RawPath::from_vec(vec![0, 0, 0, 0, 1, 640, 0, 1, 4, 0, 0, 4]);

    assert_eq!(
        dashed(&raw, &DashOptions::dashes(&[4.0, 2.0])),
        Err(DashError::Decode(DecodeError::UnknownTag { tag: 4, offset: 8 }))
    );
}

#[test]
fn dash_polylines_validates() {
    let lines = vec![vec![point(0.0, 0.0), point(0.0, 3.0)]];

    assert_eq!(
        dash_polylines(&lines, &DashOptions::dashes(&[1.0])),
        Ok(vec![
            vec![point(0.0, 0.0), point(0.0, 1.0)],
            vec![point(0.0, 2.0), point(0.0, 3.0)],
        ])
    );
    assert!(dash_polylines(&lines, &DashOptions::dashes(&[-1.0])).is_err());
}
