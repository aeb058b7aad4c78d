use crate::scalar::{cast, Float, Scalar};
use crate::Point;

use arrayvec::ArrayVec;

/// The smallest number of samples (start point included) taken along a curve.
pub const MIN_SAMPLES: usize = 4;

/// The largest number of samples taken along a curve, whatever its size and
/// the requested density.
pub const MAX_SAMPLES: usize = 4096;

/// Common APIs to curve segment types.
pub trait Segment: Copy + Sized {
    type Scalar: Scalar;

    /// Start of the curve.
    fn from(&self) -> Point<Self::Scalar>;

    /// End of the curve.
    fn to(&self) -> Point<Self::Scalar>;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: Self::Scalar) -> Point<Self::Scalar>;

    /// The endpoints and control points of the curve, in order.
    fn control_points(&self) -> ArrayVec<Point<Self::Scalar>, 4>;

    /// Length of the polyline joining the control points.
    ///
    /// This is an upper bound of the length of the curve.
    fn control_polygon_length(&self) -> Self::Scalar {
        let points = self.control_points();
        let mut length = Self::Scalar::ZERO;
        for pair in points.windows(2) {
            length += pair[0].distance_to(pair[1]);
        }

        length
    }

    /// Number of samples taken along the curve for a given density, start point
    /// included.
    ///
    /// This is the control polygon length times the density, rounded to the
    /// nearest integer and clamped to `MIN_SAMPLES..=MAX_SAMPLES`. A NaN or
    /// non-positive product gives `MIN_SAMPLES`.
    fn sample_count(&self, density: Self::Scalar) -> usize {
        let n = (self.control_polygon_length() * density + Self::Scalar::HALF).floor();
        if n.is_nan() || n <= Self::Scalar::ZERO {
            return MIN_SAMPLES;
        }

        let n: usize = cast(n).unwrap_or(MAX_SAMPLES);

        n.clamp(MIN_SAMPLES, MAX_SAMPLES)
    }

    /// Iterates over evenly spaced points of the curve, excluding the start
    /// point and ending exactly on the end point.
    fn samples(&self, density: Self::Scalar) -> Samples<Self> {
        Samples::new(*self, self.sample_count(density))
    }

    /// Invokes the callback for each point returned by `samples`.
    fn for_each_sample(&self, density: Self::Scalar, callback: &mut dyn FnMut(Point<Self::Scalar>)) {
        for p in self.samples(density) {
            callback(p);
        }
    }
}

/// An iterator over the points of a curve taken at evenly spaced values of `t`.
///
/// See `Segment::samples`.
#[derive(Clone, Debug)]
pub struct Samples<T> {
    segment: T,
    count: usize,
    index: usize,
}

impl<T: Segment> Samples<T> {
    /// Samples the curve at `t = i / (count - 1)` for `i` in `1..count`.
    pub fn new(segment: T, count: usize) -> Self {
        let count = usize::max(count, 2);
        Samples {
            segment,
            count,
            index: 1,
        }
    }
}

impl<T: Segment> Iterator for Samples<T> {
    type Item = Point<T::Scalar>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let i = self.index;
        self.index += 1;

        if i == self.count - 1 {
            return Some(self.segment.to());
        }

        let num: T::Scalar = cast(i).unwrap_or(T::Scalar::ZERO);
        let den: T::Scalar = cast(self.count - 1).unwrap_or(T::Scalar::ONE);

        Some(self.segment.sample(num / den))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count - self.index;
        (n, Some(n))
    }
}

impl<T: Segment> ExactSizeIterator for Samples<T> {}

#[test]
fn minimum_sample_count() {
    use crate::{point, QuadraticBezierSegment};

    let tiny = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(0.1, 0.1),
        to: point(0.2, 0.0),
    };

    assert_eq!(tiny.sample_count(1.0), MIN_SAMPLES);
    assert_eq!(tiny.samples(1.0).len(), MIN_SAMPLES - 1);
}

#[test]
fn sample_count_follows_density() {
    use crate::{point, QuadraticBezierSegment};

    // Control polygon length: 5 + 5 = 10.
    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(3.0, 4.0),
        to: point(6.0, 0.0),
    };

    assert_eq!(curve.control_polygon_length(), 10.0);
    assert_eq!(curve.sample_count(1.0), 10);
    assert_eq!(curve.sample_count(2.0), 20);
    assert_eq!(curve.sample_count(0.25), 4);
    assert_eq!(curve.sample_count(0.55), 6);
}

#[test]
fn degenerate_density() {
    use crate::{point, CubicBezierSegment};

    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(10.0, 0.0),
        ctrl2: point(10.0, 10.0),
        to: point(0.0, 10.0),
    };

    assert_eq!(curve.sample_count(-1.0), MIN_SAMPLES);
    assert_eq!(curve.sample_count(f64::NAN), MIN_SAMPLES);
    assert_eq!(curve.sample_count(0.0), MIN_SAMPLES);
    assert_eq!(curve.sample_count(f64::INFINITY), MAX_SAMPLES);
}

#[test]
fn sample_count_is_bounded() {
    use crate::{point, QuadraticBezierSegment};

    let small = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(4.0, 5.0),
        to: point(10.0, 0.0),
    };
    assert_eq!(small.sample_count(1e15), MAX_SAMPLES);
    assert_eq!(small.samples(1e15).len(), MAX_SAMPLES - 1);

    let huge = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(0.0, 3e7),
        to: point(3e7, 3e7),
    };
    assert_eq!(huge.sample_count(1.0), MAX_SAMPLES);

    let mut last = None;
    huge.for_each_sample(1.0, &mut |p| last = Some(p));
    assert_eq!(last, Some(huge.to));
}

#[test]
fn samples_end_on_the_end_point() {
    use crate::{point, CubicBezierSegment};

    let curve = CubicBezierSegment {
        from: point(0.1, 0.0),
        ctrl1: point(3.3, 7.0),
        ctrl2: point(8.7, -2.0),
        to: point(11.3, 1.9),
    };

    let mut count = 0;
    let mut last = None;
    curve.for_each_sample(1.0, &mut |p| {
        count += 1;
        last = Some(p);
    });

    assert_eq!(count, curve.sample_count(1.0) - 1);
    assert_eq!(last, Some(curve.to));
}
