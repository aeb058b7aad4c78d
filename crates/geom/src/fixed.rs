//! 26.6 fixed-point numbers.
//!
//! Scanline rasterizers usually work with integer coordinates that have
//! a few bits of sub-pixel precision. The `Fixed` type stores a signed value
//! with 6 fractional bits, that is, in units of 1/64.

use crate::{point, Point};

use core::fmt;
use core::ops::{Add, Neg, Sub};

const FRAC_MASK: i64 = (1 << Fixed::FRAC_BITS) - 1;
const SCALE: f64 = (1 << Fixed::FRAC_BITS) as f64;

/// A signed 26.6 fixed-point number.
#[repr(transparent)]
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Fixed(i32);

impl Fixed {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = 6;
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(1 << Self::FRAC_BITS);

    /// Creates a fixed-point number from its raw representation.
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Fixed(bits)
    }

    /// The raw representation, in 1/64 units.
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Quantizes a float, rounding half away from zero.
    ///
    /// Values outside of the representable range saturate and NaN maps to zero.
    #[inline]
    pub fn from_f64(x: f64) -> Self {
        Fixed((x * SCALE).round() as i32)
    }

    /// Converts back to a float.
    ///
    /// The integer and fractional parts are extracted from the magnitude so
    /// that negative values don't get floored by the arithmetic shift.
    pub fn to_f64(self) -> f64 {
        let bits = self.0 as i64;
        if bits >= 0 {
            split_magnitude(bits)
        } else {
            -split_magnitude(-bits)
        }
    }
}

#[inline]
fn split_magnitude(bits: i64) -> f64 {
    (bits >> Fixed::FRAC_BITS) as f64 + (bits & FRAC_MASK) as f64 / SCALE
}

/// Shorthand for `Fixed::from_f64(x)`.
#[inline]
pub fn to_fixed(x: f64) -> Fixed {
    Fixed::from_f64(x)
}

/// Shorthand for `v.to_f64()`.
#[inline]
pub fn from_fixed(v: Fixed) -> f64 {
    v.to_f64()
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, other: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(other.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, other: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(other.0))
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fixed({} = {})", self.0, self.to_f64())
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

/// A position in 26.6 fixed-point coordinates.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct FixedPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPoint {
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        FixedPoint { x, y }
    }

    /// Creates a point from raw 1/64 units.
    #[inline]
    pub const fn from_bits(x: i32, y: i32) -> Self {
        FixedPoint {
            x: Fixed::from_bits(x),
            y: Fixed::from_bits(y),
        }
    }

    #[inline]
    pub fn from_point(p: Point<f64>) -> Self {
        FixedPoint {
            x: Fixed::from_f64(p.x),
            y: Fixed::from_f64(p.y),
        }
    }

    #[inline]
    pub fn to_point(self) -> Point<f64> {
        point(self.x.to_f64(), self.y.to_f64())
    }

    /// Sum of the absolute coordinate differences, in 1/64 units.
    #[inline]
    pub fn manhattan_distance(self, other: FixedPoint) -> i64 {
        let dx = self.x.0 as i64 - other.x.0 as i64;
        let dy = self.y.0 as i64 - other.y.0 as i64;

        dx.abs() + dy.abs()
    }
}

/// Shorthand for `FixedPoint::from_point(p)`.
#[inline]
pub fn fixed_point(p: Point<f64>) -> FixedPoint {
    FixedPoint::from_point(p)
}

impl Add for FixedPoint {
    type Output = FixedPoint;
    #[inline]
    fn add(self, other: FixedPoint) -> FixedPoint {
        FixedPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for FixedPoint {
    type Output = FixedPoint;
    #[inline]
    fn sub(self, other: FixedPoint) -> FixedPoint {
        FixedPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for FixedPoint {
    type Output = FixedPoint;
    #[inline]
    fn neg(self) -> FixedPoint {
        FixedPoint::new(-self.x, -self.y)
    }
}

impl fmt::Debug for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x.0, self.y.0)
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Point<f64>> for FixedPoint {
    fn from(p: Point<f64>) -> Self {
        FixedPoint::from_point(p)
    }
}

#[test]
fn quantize_rounds_half_away_from_zero() {
    assert_eq!(to_fixed(1.0).to_bits(), 64);
    assert_eq!(to_fixed(0.5).to_bits(), 32);
    // 1/128 is exactly half a unit.
    assert_eq!(to_fixed(1.0 / 128.0).to_bits(), 1);
    assert_eq!(to_fixed(-1.0 / 128.0).to_bits(), -1);
    assert_eq!(to_fixed(3.0 / 128.0).to_bits(), 2);
    assert_eq!(to_fixed(-3.0 / 128.0).to_bits(), -2);
    assert_eq!(to_fixed(0.004).to_bits(), 0);
}

#[test]
fn negative_values_keep_their_sign() {
    assert_eq!(from_fixed(to_fixed(-10.5)), -10.5);
    assert_eq!(from_fixed(Fixed::from_bits(-1)), -1.0 / 64.0);
    assert_eq!(from_fixed(Fixed::from_bits(-65)), -(1.0 + 1.0 / 64.0));
    assert_eq!(from_fixed(Fixed::from_bits(-64)), -1.0);
    // The most negative value doesn't overflow when taking its magnitude.
    assert_eq!(from_fixed(Fixed::from_bits(i32::MIN)), -33554432.0);
}

#[test]
fn round_trip_precision() {
    let mut x = -300.0;
    while x < 300.0 {
        let y = from_fixed(to_fixed(x));
        assert!((y - x).abs() <= 1.0 / 64.0, "{} -> {}", x, y);
        if x.abs() >= 1.0 / 64.0 {
            assert_eq!(y.signum(), x.signum(), "{} -> {}", x, y);
        }
        x += 0.173;
    }
}

#[test]
fn out_of_range_saturates() {
    assert_eq!(to_fixed(1e12).to_bits(), i32::MAX);
    assert_eq!(to_fixed(-1e12).to_bits(), i32::MIN);
    assert_eq!(to_fixed(f64::NAN).to_bits(), 0);
}

#[test]
fn manhattan() {
    let a = FixedPoint::from_bits(10, -4);
    let b = FixedPoint::from_bits(4, 1);
    assert_eq!(a.manhattan_distance(b), 11);
    assert_eq!(b.manhattan_distance(a), 11);
    assert_eq!(a.manhattan_distance(a), 0);
}

#[test]
fn fixed_point_conversions() {
    let p = fixed_point(point(1.5, -2.25));
    assert_eq!(p, FixedPoint::from_bits(96, -144));
    assert_eq!(p.to_point(), point(1.5, -2.25));
    assert_eq!(std::format!("{}", p), "(1.5, -2.25)");
    assert_eq!(p - p, FixedPoint::default());
    assert_eq!(-Fixed::ONE + Fixed::ONE, Fixed::ZERO);
}

#[test]
fn negated_fixed_point() {
    let p = FixedPoint::from_bits(96, -144);
    assert_eq!(-p, FixedPoint::from_bits(-96, 144));
    assert_eq!(-p + p, FixedPoint::default());
    assert_eq!((-p).to_point(), point(-1.5, 2.25));
    assert_eq!(p.manhattan_distance(-p), 480);
}
