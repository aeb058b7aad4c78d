//! Apply a dash pattern to polylines.
//!
//! # Dash patterns
//!
//! A dash pattern is a cyclic sequence of lengths. Even indices are "on"
//! elements (the dashes) and odd indices are "off" elements (the gaps). A
//! pattern with an odd number of elements is repeated twice so that each
//! cycle alternates the same way, which means that `[d]` is equivalent to
//! `[d, d]`.
//!
//! The offset shifts the pattern along each sub-path: walking starts at
//! distance `offset` into the pattern, wrapping around its total length.
//! Negative offsets are supported.
//!
//! # Walking
//!
//! The [`Dasher`] walks each sub-path vertex by vertex. When the current
//! pattern element ends before the next vertex, it emits a breakpoint on the
//! edge, commits the current dash if the element was "on", and measures the
//! same vertex again against the next element. This is modeled with two
//! states, see [`WalkState`].
//!
//! ```
//! use dashline_algorithms::dash::{dash, DashPattern};
//! use dashline_algorithms::math::point;
//!
//! let pattern = DashPattern::new(&[4.0, 2.0]).unwrap();
//! let line = vec![vec![point(0.0, 0.0), point(10.0, 0.0)]];
//!
//! assert_eq!(
//!     dash(&line, &pattern, 0.0),
//!     vec![
//!         vec![point(0.0, 0.0), point(4.0, 0.0)],
//!         vec![point(6.0, 0.0), point(10.0, 0.0)],
//!     ]
//! );
//! ```

use crate::error::DashError;
use crate::math::Point;
use crate::path::{Polylines, Subpath};

use core::mem;

/// A validated dash pattern.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DashPattern {
    lengths: Vec<f64>,
    total_length: f64,
}

impl DashPattern {
    /// Creates a dash pattern.
    ///
    /// All lengths must be finite and strictly positive. Patterns with an odd
    /// number of elements are doubled.
    pub fn new(lengths: &[f64]) -> Result<Self, DashError> {
        for (index, &length) in lengths.iter().enumerate() {
            if !(length.is_finite() && length > 0.0) {
                return Err(DashError::InvalidLength { index, length });
            }
        }

        let mut lengths = lengths.to_vec();
        if lengths.len() % 2 == 1 {
            lengths.extend_from_within(..);
        }

        let total_length = lengths.iter().sum();

        Ok(DashPattern {
            lengths,
            total_length,
        })
    }

    /// The pattern that keeps paths unchanged.
    #[inline]
    pub fn solid() -> Self {
        DashPattern::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Number of elements, after doubling odd patterns.
    #[inline]
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    #[inline]
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Length of one cycle of the pattern.
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Whether the element at this index is a dash rather than a gap.
    #[inline]
    pub fn is_on(index: usize) -> bool {
        index % 2 == 0
    }

    /// The position in the pattern at distance `offset` from its start.
    ///
    /// Non-finite offsets start at the beginning of the pattern.
    pub fn start(&self, offset: f64) -> DashCursor {
        let mut cursor = DashCursor::default();
        if offset == 0.0 || self.is_empty() {
            return cursor;
        }

        let mut offset = offset.rem_euclid(self.total_length);
        for (index, &length) in self.lengths.iter().enumerate() {
            offset -= length;
            if offset < 0.0 {
                cursor.index = index;
                cursor.consumed = length + offset;
                break;
            }
        }

        cursor
    }
}

/// A position within a dash pattern.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DashCursor {
    /// Index of the current element.
    pub index: usize,
    /// Length already walked within the current element.
    pub consumed: f64,
}

/// The two states of the dash walk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WalkState {
    /// Measuring the edge between the previous point and the current vertex
    /// against what is left of the current pattern element.
    ConsumingVertex,
    /// The current pattern element ends at `at`, before the current vertex.
    ///
    /// Leaving this state closes the element and moves to the next one. It
    /// never moves past the current vertex.
    EmittingBreakpoint { at: Point },
}

/// Walks sub-paths against a dash pattern and collects the dashes.
pub struct Dasher<'l> {
    pattern: &'l DashPattern,
    start: DashCursor,
    cursor: DashCursor,
    previous: Point,
    segment: Subpath,
    state: WalkState,
    stalled: usize,
    output: Polylines,
}

impl<'l> Dasher<'l> {
    /// With an empty pattern, sub-paths of two points or more are committed
    /// unchanged.
    pub fn new(pattern: &'l DashPattern, offset: f64) -> Self {
        let start = pattern.start(offset);
        Dasher {
            pattern,
            start,
            cursor: start,
            previous: Point::zero(),
            segment: Vec::new(),
            state: WalkState::ConsumingVertex,
            stalled: 0,
            output: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> WalkState {
        self.state
    }

    #[inline]
    pub fn cursor(&self) -> DashCursor {
        self.cursor
    }

    /// The dash under construction.
    #[inline]
    pub fn current_segment(&self) -> &[Point] {
        &self.segment
    }

    /// The dashes committed so far.
    #[inline]
    pub fn dashes(&self) -> &[Subpath] {
        &self.output
    }

    /// Starts walking a sub-path at a given position.
    ///
    /// Each sub-path starts at the pattern position given by the offset.
    pub fn begin(&mut self, at: Point) {
        self.cursor = self.start;
        self.previous = at;
        self.segment.clear();
        self.segment.push(at);
        self.state = WalkState::ConsumingVertex;
        self.stalled = 0;
    }

    /// Performs a single transition of the walk towards `vertex`.
    ///
    /// Returns `true` once the vertex has been reached, in which case the caller
    /// moves on to the next vertex. Otherwise `step` must be called again with
    /// the same vertex.
    pub fn step(&mut self, vertex: Point) -> bool {
        if self.pattern.is_empty() {
            self.segment.push(vertex);
            self.previous = vertex;
            return true;
        }

        match self.state {
            WalkState::ConsumingVertex => {
                let d = self.previous.distance_to(vertex);
                // Rounding can make the consumed length overshoot the element.
                let remaining =
                    f64::max(self.pattern.lengths[self.cursor.index] - self.cursor.consumed, 0.0);
                if remaining < d && self.stalled <= self.pattern.len() {
                    let at = self.previous.lerp(vertex, remaining / d);
                    self.state = WalkState::EmittingBreakpoint { at };
                    return false;
                }

                self.segment.push(vertex);
                self.cursor.consumed += d;
                self.previous = vertex;
                self.stalled = 0;

                true
            }
            WalkState::EmittingBreakpoint { at } => {
                // A whole cycle of breakpoints that don't get closer to the vertex
                // means the pattern is below the precision of the coordinates.
                if at.distance_to(vertex) >= self.previous.distance_to(vertex) {
                    self.stalled += 1;
                } else {
                    self.stalled = 0;
                }

                self.segment.push(at);
                let segment = mem::replace(&mut self.segment, vec![at]);
                self.commit(segment);

                self.cursor.index = (self.cursor.index + 1) % self.pattern.len();
                self.cursor.consumed = 0.0;
                self.previous = at;
                self.state = WalkState::ConsumingVertex;

                false
            }
        }
    }

    /// Walks from the previous point to `vertex`.
    pub fn vertex(&mut self, vertex: Point) {
        while !self.step(vertex) {}
    }

    /// Ends the current sub-path, committing the dash in progress if any.
    pub fn end(&mut self) {
        let segment = mem::take(&mut self.segment);
        self.commit(segment);
    }

    /// Walks a whole sub-path. Sub-paths with less than two points are ignored.
    pub fn subpath(&mut self, points: &[Point]) {
        if points.len() < 2 {
            return;
        }

        self.begin(points[0]);
        for &vertex in &points[1..] {
            self.vertex(vertex);
        }
        self.end();
    }

    fn commit(&mut self, segment: Subpath) {
        if DashPattern::is_on(self.cursor.index) && segment.len() >= 2 {
            log::trace!(
                "dash #{} from {:?} to {:?}",
                self.output.len(),
                segment[0],
                segment[segment.len() - 1]
            );
            self.output.push(segment);
        }
    }

    /// Returns the dashes.
    pub fn build(self) -> Polylines {
        self.output
    }
}

/// Applies a dash pattern to polylines.
///
/// Returns the "on" parts of the sub-paths, in order. Sub-paths with less than
/// two points are dropped. An empty pattern returns the input unchanged.
pub fn dash(paths: &[Subpath], pattern: &DashPattern, offset: f64) -> Polylines {
    if pattern.is_empty() {
        return paths.to_vec();
    }

    let mut dasher = Dasher::new(pattern, offset);
    for path in paths {
        dasher.subpath(path);
    }

    let dashes = dasher.build();
    log::debug!("{} sub-paths dashed into {} dashes", paths.len(), dashes.len());

    dashes
}

/// Validates the pattern and offset, and applies the pattern.
///
/// See [`dash`].
pub fn dash_lengths(paths: &[Subpath], lengths: &[f64], offset: f64) -> Result<Polylines, DashError> {
    let pattern = DashPattern::new(lengths)?;
    if !pattern.is_empty() && !offset.is_finite() {
        return Err(DashError::InvalidOffset(offset));
    }

    Ok(dash(paths, &pattern, offset))
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn line() -> Polylines {
    vec![vec![point(0.0, 0.0), point(10.0, 0.0)]]
}

#[test]
fn dash_simple_line() {
    assert_eq!(
        dash_lengths(&line(), &[4.0, 2.0], 0.0).unwrap(),
        vec![
            vec![point(0.0, 0.0), point(4.0, 0.0)],
            vec![point(6.0, 0.0), point(10.0, 0.0)],
        ]
    );
}

#[test]
fn offset_starts_in_a_gap() {
    // An offset of 4 consumes the whole first dash, the walk starts at the
    // beginning of the gap.
    let pattern = DashPattern::new(&[4.0, 2.0]).unwrap();
    assert_eq!(
        pattern.start(4.0),
        DashCursor {
            index: 1,
            consumed: 0.0
        }
    );

    assert_eq!(
        dash(&line(), &pattern, 4.0),
        vec![
            vec![point(2.0, 0.0), point(6.0, 0.0)],
            vec![point(8.0, 0.0), point(10.0, 0.0)],
        ]
    );
}

#[test]
fn offset_normalization() {
    let pattern = DashPattern::new(&[4.0, 2.0]).unwrap();

    assert_eq!(pattern.start(0.0), DashCursor::default());
    assert_eq!(pattern.start(6.0), DashCursor::default());
    assert_eq!(pattern.start(-6.0), DashCursor::default());
    assert_eq!(pattern.start(1.0), DashCursor { index: 0, consumed: 1.0 });
    assert_eq!(pattern.start(5.0), DashCursor { index: 1, consumed: 1.0 });
    assert_eq!(pattern.start(13.0), DashCursor { index: 0, consumed: 1.0 });
    // -1 is the same position as 5.
    assert_eq!(pattern.start(-1.0), DashCursor { index: 1, consumed: 1.0 });
    assert_eq!(pattern.start(f64::NAN), DashCursor::default());
}

#[test]
fn negative_offset() {
    assert_eq!(
        dash_lengths(&line(), &[4.0, 2.0], -1.0).unwrap(),
        vec![
            vec![point(1.0, 0.0), point(5.0, 0.0)],
            vec![point(7.0, 0.0), point(10.0, 0.0)],
        ]
    );
}

#[test]
fn empty_pattern_is_identity() {
    let paths = vec![
        vec![point(0.0, 0.0), point(10.0, 0.0)],
        vec![point(3.0, 3.0)],
        vec![],
    ];

    for &offset in &[0.0, 1.5, -7.0, f64::NAN] {
        assert_eq!(dash_lengths(&paths, &[], offset).unwrap(), paths);
        assert_eq!(dash(&paths, &DashPattern::solid(), offset), paths);
    }
}

#[test]
fn single_element_pattern_is_doubled() {
    let paths = vec![
        vec![point(0.0, 0.0), point(7.0, 0.0), point(7.0, 5.0)],
        vec![point(-1.0, -1.0), point(4.0, 11.0)],
    ];

    let single = DashPattern::new(&[1.5]).unwrap();
    let double = DashPattern::new(&[1.5, 1.5]).unwrap();
    assert_eq!(single, double);

    for &offset in &[0.0, 0.7, 1.5, 4.2, -2.9] {
        assert_eq!(dash(&paths, &single, offset), dash(&paths, &double, offset));
    }
}

#[test]
fn odd_patterns_are_doubled() {
    let pattern = DashPattern::new(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(pattern.lengths(), &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    assert_eq!(pattern.total_length(), 12.0);
}

#[test]
fn invalid_lengths() {
    assert_eq!(
        DashPattern::new(&[1.0, 0.0]),
        Err(DashError::InvalidLength {
            index: 1,
            length: 0.0
        })
    );
    assert_eq!(
        DashPattern::new(&[-1.0]),
        Err(DashError::InvalidLength {
            index: 0,
            length: -1.0
        })
    );
    assert!(DashPattern::new(&[1.0, f64::INFINITY]).is_err());
    assert!(DashPattern::new(&[f64::NAN]).is_err());
    assert_eq!(
        dash_lengths(&line(), &[1.0], f64::INFINITY),
        Err(DashError::InvalidOffset(f64::INFINITY))
    );
}

#[test]
fn degenerate_subpaths_are_dropped() {
    let paths = vec![
        vec![point(1.0, 1.0)],
        vec![],
        vec![point(0.0, 0.0), point(0.0, 3.0)],
    ];

    let dashes = dash_lengths(&paths, &[1.0, 1.0], 0.0).unwrap();
    assert_eq!(
        dashes,
        vec![
            vec![point(0.0, 0.0), point(0.0, 1.0)],
            vec![point(0.0, 2.0), point(0.0, 3.0)],
        ]
    );
    for dash in &dashes {
        assert!(dash.len() >= 2);
    }
}

#[test]
fn dashes_follow_corners() {
    // The first dash wraps around the corner at (2, 0).
    let paths = vec![vec![point(0.0, 0.0), point(2.0, 0.0), point(2.0, 4.0)]];

    assert_eq!(
        dash_lengths(&paths, &[3.0, 1.0], 0.0).unwrap(),
        vec![
            vec![point(0.0, 0.0), point(2.0, 0.0), point(2.0, 1.0)],
            vec![point(2.0, 2.0), point(2.0, 4.0)],
        ]
    );
}

#[test]
fn each_subpath_restarts_the_pattern() {
    let paths = vec![
        vec![point(0.0, 0.0), point(5.0, 0.0)],
        vec![point(0.0, 1.0), point(5.0, 1.0)],
    ];

    assert_eq!(
        dash_lengths(&paths, &[2.0, 1.0], 1.0).unwrap(),
        vec![
            vec![point(0.0, 0.0), point(1.0, 0.0)],
            vec![point(2.0, 0.0), point(4.0, 0.0)],
            vec![point(0.0, 1.0), point(1.0, 1.0)],
            vec![point(2.0, 1.0), point(4.0, 1.0)],
        ]
    );
}

#[test]
fn breakpoint_does_not_advance_the_vertex() {
    let pattern = DashPattern::new(&[4.0, 2.0]).unwrap();
    let mut dasher = Dasher::new(&pattern, 0.0);
    let end = point(10.0, 0.0);

    dasher.begin(point(0.0, 0.0));
    assert_eq!(dasher.state(), WalkState::ConsumingVertex);

    // The first dash ends before the vertex.
    assert!(!dasher.step(end));
    assert_eq!(
        dasher.state(),
        WalkState::EmittingBreakpoint {
            at: point(4.0, 0.0)
        }
    );
    assert!(dasher.dashes().is_empty());

    // Emitting the breakpoint commits the dash and keeps the same vertex.
    assert!(!dasher.step(end));
    assert_eq!(dasher.state(), WalkState::ConsumingVertex);
    assert_eq!(dasher.dashes(), &[vec![point(0.0, 0.0), point(4.0, 0.0)]]);
    assert_eq!(dasher.cursor(), DashCursor { index: 1, consumed: 0.0 });
    assert_eq!(dasher.current_segment(), &[point(4.0, 0.0)]);

    // The gap ends before the vertex as well.
    assert!(!dasher.step(end));
    assert!(!dasher.step(end));
    assert_eq!(dasher.cursor(), DashCursor { index: 0, consumed: 0.0 });
    assert_eq!(dasher.dashes().len(), 1);

    // The second dash reaches the vertex.
    assert!(dasher.step(end));
    assert_eq!(dasher.cursor(), DashCursor { index: 0, consumed: 4.0 });

    dasher.end();
    assert_eq!(
        dasher.build(),
        vec![
            vec![point(0.0, 0.0), point(4.0, 0.0)],
            vec![point(6.0, 0.0), point(10.0, 0.0)],
        ]
    );
}

#[test]
fn tiny_pattern_terminates() {
    // The pattern is far below the precision of the coordinates.
    let paths = vec![vec![point(1e18, 0.0), point(1e18 + 1e6, 0.0)]];
    let dashes = dash_lengths(&paths, &[1e-9, 1e-9], 0.0).unwrap();

    for dash in &dashes {
        assert!(dash.len() >= 2);
    }
}

#[test]
fn pattern_below_coordinate_precision_terminates() {
    // Each breakpoint moves by 1e-300 but stays 1.0 away from the vertex, so
    // the vertex is consumed after one cycle of breakpoints.
    let paths = vec![vec![point(0.0, 0.0), point(1.0, 0.0)]];
    let dashes = dash_lengths(&paths, &[1e-300], 0.0).unwrap();

    assert_eq!(dashes.len(), 2);
    for dash in &dashes {
        assert!(dash.len() >= 2);
    }
}

#[test]
fn dasher_with_empty_pattern() {
    let pattern = DashPattern::solid();
    let mut dasher = Dasher::new(&pattern, 3.0);

    let path = vec![point(0.0, 0.0), point(4.0, 0.0), point(4.0, 4.0)];
    dasher.subpath(&path);
    dasher.subpath(&[point(1.0, 1.0)]);
    assert_eq!(dasher.state(), WalkState::ConsumingVertex);

    assert_eq!(dasher.build(), vec![path]);
}
