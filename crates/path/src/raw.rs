//! The flat, tag-prefixed command buffer consumed by scanline rasterizers.
//!
//! # Representation
//!
//! Each command is written as its tag, its operands in 26.6 fixed-point
//! (x then y for each point), and its tag again. The trailing copy of the tag
//! makes it possible to walk the buffer backwards.
//!
//! ```ascii
//!  _______________________________________________________________________
//! |   |   |   |   |   |   |   |   |   |    |    |   |   |   |
//! | 0 | x | y | 0 | 1 | x | y | 1 | 2 | cx | cy | x | y | 2 | ...
//! |___|___|___|___|___|___|___|___|___|____|____|___|___|___|_
//!
//! ```
//!
//! | tag | command  | words |
//! |-----|----------|-------|
//! | 0   | move-to  | 4     |
//! | 1   | line-to  | 4     |
//! | 2   | quadratic| 6     |
//! | 3   | cubic    | 8     |
//!
//! Buffers received from elsewhere are decoded lazily: iterating over a
//! `RawPath` yields `Result<Command, DecodeError>` and stops after the first
//! error.

use crate::builder::{Build, PathBuilder, RasterBuilder};
use crate::commands::{Command, Commands, Verb};
use crate::error::DecodeError;
use crate::flatten::{try_flatten, FlattenOptions, Polylines};
use crate::geom::FixedPoint;

/// A tag-prefixed buffer of drawing commands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RawPath {
    data: Vec<i32>,
}

impl RawPath {
    #[inline]
    pub fn new() -> Self {
        RawPath { data: Vec::new() }
    }

    /// Creates an empty buffer with room for `words` integers.
    #[inline]
    pub fn with_capacity(words: usize) -> Self {
        RawPath {
            data: Vec::with_capacity(words),
        }
    }

    /// Wraps an existing buffer.
    ///
    /// The content is not validated here, decoding errors are reported while
    /// iterating.
    #[inline]
    pub fn from_vec(data: Vec<i32>) -> Self {
        RawPath { data }
    }

    /// Encodes a sequence of typed commands.
    pub fn from_commands(commands: &Commands) -> Self {
        let mut raw = RawPath::new();
        commands.build_into(&mut raw);

        raw
    }

    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<i32> {
        self.data
    }

    /// Number of words in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn iter(&self) -> RawIter {
        RawIter::new(&self.data)
    }

    /// Decodes the whole buffer, failing on the first malformed command.
    pub fn decode(&self) -> Result<Commands, DecodeError> {
        self.iter().collect()
    }

    /// Decodes and flattens the buffer.
    ///
    /// See [`try_flatten`](crate::flatten::try_flatten).
    pub fn flatten(&self, options: &FlattenOptions) -> Result<Polylines, DecodeError> {
        try_flatten(self.iter(), options)
    }

    fn push(&mut self, verb: Verb, points: &[FixedPoint]) {
        let tag = verb.tag();
        self.data.push(tag);
        for p in points {
            self.data.push(p.x.to_bits());
            self.data.push(p.y.to_bits());
        }
        self.data.push(tag);
    }
}

/// Number of words used by a command of a given kind.
#[inline]
pub fn encoded_len(verb: Verb) -> usize {
    2 + 2 * verb.num_points()
}

impl RasterBuilder for RawPath {
    #[inline]
    fn begin(&mut self, at: FixedPoint) {
        self.push(Verb::MoveTo, &[at]);
    }

    #[inline]
    fn line_to(&mut self, to: FixedPoint) {
        self.push(Verb::LineTo, &[to]);
    }
}

impl PathBuilder for RawPath {
    #[inline]
    fn quadratic_bezier_to(&mut self, ctrl: FixedPoint, to: FixedPoint) {
        self.push(Verb::QuadTo, &[ctrl, to]);
    }

    #[inline]
    fn cubic_bezier_to(&mut self, ctrl1: FixedPoint, ctrl2: FixedPoint, to: FixedPoint) {
        self.push(Verb::CubicTo, &[ctrl1, ctrl2, to]);
    }

    #[inline]
    fn reserve(&mut self, commands: usize) {
        self.data.reserve(commands * encoded_len(Verb::LineTo));
    }
}

impl Build for RawPath {
    type PathType = RawPath;

    fn build(self) -> RawPath {
        self
    }
}

impl From<Vec<i32>> for RawPath {
    fn from(data: Vec<i32>) -> Self {
        RawPath::from_vec(data)
    }
}

impl<'l> IntoIterator for &'l RawPath {
    type Item = Result<Command, DecodeError>;
    type IntoIter = RawIter<'l>;

    fn into_iter(self) -> RawIter<'l> {
        self.iter()
    }
}

/// Decodes the commands of a tag-prefixed buffer.
///
/// Yields at most one error, after which iteration stops.
#[derive(Clone, Debug)]
pub struct RawIter<'l> {
    data: &'l [i32],
    offset: usize,
    failed: bool,
}

impl<'l> RawIter<'l> {
    pub fn new(data: &'l [i32]) -> Self {
        RawIter {
            data,
            offset: 0,
            failed: false,
        }
    }

    /// Word index of the next command to decode.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn fail(&mut self, err: DecodeError) -> Option<Result<Command, DecodeError>> {
        log::debug!("decoding stopped: {}", err);
        self.failed = true;

        Some(Err(err))
    }
}

impl<'l> Iterator for RawIter<'l> {
    type Item = Result<Command, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None;
        }

        let offset = self.offset;
        let tag = self.data[offset];
        let verb = match Verb::from_tag(tag) {
            Some(verb) => verb,
            None => {
                return self.fail(DecodeError::UnknownTag { tag, offset });
            }
        };

        let end = offset + encoded_len(verb);
        let words = match self.data.get(offset..end) {
            Some(words) => words,
            None => {
                return self.fail(DecodeError::Truncated { tag, offset });
            }
        };

        let trailer = words[words.len() - 1];
        if trailer != tag {
            return self.fail(DecodeError::MismatchedTrailer {
                tag,
                trailer,
                offset,
            });
        }

        let p = |i: usize| FixedPoint::from_bits(words[1 + 2 * i], words[2 + 2 * i]);
        let cmd = match verb {
            Verb::MoveTo => Command::MoveTo { to: p(0) },
            Verb::LineTo => Command::LineTo { to: p(0) },
            Verb::QuadTo => Command::QuadTo {
                ctrl: p(0),
                to: p(1),
            },
            Verb::CubicTo => Command::CubicTo {
                ctrl1: p(0),
                ctrl2: p(1),
                to: p(2),
            },
        };

        log::trace!("decoded {:?} at offset {}", cmd, offset);
        self.offset = end;

        Some(Ok(cmd))
    }
}

impl<'l> core::iter::FusedIterator for RawIter<'l> {}

#[test]
fn encode_layout() {
    let mut raw = RawPath::new();
    raw.begin(FixedPoint::from_bits(1, 2));
    raw.line_to(FixedPoint::from_bits(3, 4));
    raw.quadratic_bezier_to(FixedPoint::from_bits(5, 6), FixedPoint::from_bits(7, 8));
    raw.cubic_bezier_to(
        FixedPoint::from_bits(9, 10),
        FixedPoint::from_bits(11, 12),
        FixedPoint::from_bits(13, 14),
    );

    assert_eq!(
        raw.as_slice(),
        &[
            0, 1, 2, 0, //
            1, 3, 4, 1, //
            2, 5, 6, 7, 8, 2, //
            3, 9, 10, 11, 12, 13, 14, 3,
        ]
    );
}

#[test]
fn decode_matches_typed_commands() {
    let mut builder = Commands::builder();
    builder.begin(FixedPoint::from_bits(-64, 32));
    builder.cubic_bezier_to(
        FixedPoint::from_bits(0, 640),
        FixedPoint::from_bits(640, 640),
        FixedPoint::from_bits(640, 0),
    );
    builder.line_to(FixedPoint::from_bits(-64, 32));
    let commands = builder.build();

    let raw = RawPath::from_commands(&commands);
    assert_eq!(raw.len(), 4 + 8 + 4);
    assert_eq!(raw.decode(), Ok(commands));
}

#[test]
fn unknown_tag() {
    let raw = RawPath::from_vec(vec![0, 0, 0, 0, 7, 1, 1, 7, 1, 2, 2, 1]);
    let mut iter = raw.iter();

    assert!(iter.next().unwrap().is_ok());
    assert_eq!(
        iter.next(),
        Some(Err(DecodeError::UnknownTag { tag: 7, offset: 4 }))
    );
    // Nothing is decoded past the first error.
    assert_eq!(iter.next(), None);

    assert_eq!(
        raw.decode(),
        Err(DecodeError::UnknownTag { tag: 7, offset: 4 })
    );
}

#[test]
fn truncated_command() {
    let raw = RawPath::from_vec(vec![0, 0, 0, 0, 3, 1, 1, 2, 2]);
    assert_eq!(
        raw.decode(),
        Err(DecodeError::Truncated { tag: 3, offset: 4 })
    );
}

#[test]
fn mismatched_trailer() {
    let raw = RawPath::from_vec(vec![0, 0, 0, 1]);
    let err = raw.decode().unwrap_err();
    assert_eq!(
        err,
        DecodeError::MismatchedTrailer {
            tag: 0,
            trailer: 1,
            offset: 0
        }
    );
    assert_eq!(err.offset(), 0);
    assert_eq!(
        std::format!("{}", err),
        "Offset 0: command with tag 0 ends with tag 1."
    );
}

#[test]
fn empty_buffer() {
    let raw = RawPath::new();
    assert_eq!(raw.iter().next(), None);
    assert_eq!(raw.decode(), Ok(Commands::new()));
}
