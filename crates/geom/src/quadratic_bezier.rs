use crate::scalar::Scalar;
use crate::segment::Segment;
use crate::Point;

use arrayvec::ArrayVec;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }
}

impl<S: Scalar> Segment for QuadraticBezierSegment<S> {
    type Scalar = S;

    fn from(&self) -> Point<S> {
        self.from
    }

    fn to(&self) -> Point<S> {
        self.to
    }

    fn sample(&self, t: S) -> Point<S> {
        self.sample(t)
    }

    fn control_points(&self) -> ArrayVec<Point<S>, 4> {
        let mut points = ArrayVec::new();
        points.push(self.from);
        points.push(self.ctrl);
        points.push(self.to);

        points
    }
}

#[test]
fn sample_endpoints() {
    use crate::point;

    let curve = QuadraticBezierSegment {
        from: point(1.0, 2.0),
        ctrl: point(4.0, 8.0),
        to: point(7.0, 2.0),
    };

    assert_eq!(curve.sample(0.0), curve.from);
    assert_eq!(curve.sample(1.0), curve.to);
    assert_eq!(curve.sample(0.5), point(4.0, 5.0));
}

#[test]
fn samples_are_monotonic_in_t() {
    use crate::point;

    // A straight curve with its control point in the middle is sampled
    // at strictly increasing x.
    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(5.0, 0.0),
        to: point(10.0, 0.0),
    };

    let points: std::vec::Vec<_> = curve.samples(1.0).collect();
    assert_eq!(points.len(), 9);
    for pair in points.windows(2) {
        assert!(pair[0].x < pair[1].x);
    }
    assert_eq!(points[8], point(10.0, 0.0));
}
