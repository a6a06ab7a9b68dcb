//! Signed 32.32 fixed-point numbers.
//!
//! Generation runs on fixed-point values so the same seed produces bit-identical
//! bodies on every platform. Arithmetic saturates at the representable range
//! instead of wrapping; `checked_*` variants report overflow to callers that
//! need to log it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Number of fractional bits.
pub const FRAC_BITS: u32 = 32;

const ONE_RAW: i64 = 1 << FRAC_BITS;

const fn clamp_raw(value: i128) -> i64 {
    if value > i64::MAX as i128 {
        i64::MAX
    } else if value < i64::MIN as i128 {
        i64::MIN
    } else {
        value as i64
    }
}

fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = 1u128 << ((128 - n.leading_zeros()).div_ceil(2));
    loop {
        let y = (x + n / x) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// A fixed-point number with 32 integer and 32 fractional bits.
///
/// # Examples
///
/// ```rust
/// use units::Fixed;
///
/// let a = Fixed::ratio(3, 2);
/// let b = Fixed::from_int(2);
///
/// assert_eq!(a * b, Fixed::from_int(3));
/// assert_eq!(Fixed::from_int(9).sqrt(), Fixed::from_int(3));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fixed(i64);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(ONE_RAW);
    pub const MAX: Fixed = Fixed(i64::MAX);
    pub const MIN: Fixed = Fixed(i64::MIN);

    /// Rational approximation of π (103993/33102) used by orbital plane generation.
    pub const PI: Fixed = Fixed::ratio(103_993, 33_102);

    /// Wraps a raw 32.32 bit pattern.
    pub const fn from_raw(raw: i64) -> Self {
        Fixed(raw)
    }

    /// The raw 32.32 bit pattern.
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Creates a value from an integer, saturating outside ±2³¹.
    pub const fn from_int(value: i64) -> Self {
        Fixed(value.saturating_mul(ONE_RAW))
    }

    /// Creates `numerator / denominator` exactly to 32 fractional bits.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    pub const fn ratio(numerator: i64, denominator: i64) -> Self {
        Fixed(clamp_raw(
            ((numerator as i128) << FRAC_BITS) / denominator as i128,
        ))
    }

    /// Converts from floating point, saturating at the representable range.
    pub fn from_f64(value: f64) -> Self {
        Fixed((value * ONE_RAW as f64) as i64)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / ONE_RAW as f64
    }

    /// Integer part, rounded toward negative infinity.
    pub fn to_int(self) -> i64 {
        self.0 >> FRAC_BITS
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn abs(self) -> Self {
        Fixed(self.0.saturating_abs())
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Fixed)
    }

    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let product = (self.0 as i128 * rhs.0 as i128) >> FRAC_BITS;
        i64::try_from(product).ok().map(Fixed)
    }

    pub fn saturating_mul(self, rhs: Self) -> Self {
        Fixed(clamp_raw((self.0 as i128 * rhs.0 as i128) >> FRAC_BITS))
    }

    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.0 == 0 {
            return None;
        }
        let quotient = ((self.0 as i128) << FRAC_BITS) / rhs.0 as i128;
        i64::try_from(quotient).ok().map(Fixed)
    }

    /// Division that saturates on overflow; division by zero yields the extreme
    /// value carrying the dividend's sign.
    pub fn saturating_div(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Some(q) => q,
            None if rhs.0 == 0 && self.0 < 0 => Fixed::MIN,
            None if rhs.0 == 0 => Fixed::MAX,
            None if (self.0 < 0) != (rhs.0 < 0) => Fixed::MIN,
            None => Fixed::MAX,
        }
    }

    /// Square root; zero for non-positive values.
    pub fn sqrt(self) -> Self {
        if self.0 <= 0 {
            return Fixed::ZERO;
        }
        Fixed(isqrt((self.0 as u128) << FRAC_BITS) as i64)
    }

    /// Cube root, evaluated through `f64`.
    pub fn cbrt(self) -> Self {
        Fixed::from_f64(self.to_f64().cbrt())
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl From<i64> for Fixed {
    fn from(value: i64) -> Self {
        Fixed::from_int(value)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        *self = *self - rhs;
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    fn mul(self, rhs: Fixed) -> Fixed {
        self.saturating_mul(rhs)
    }
}

impl MulAssign for Fixed {
    fn mul_assign(&mut self, rhs: Fixed) {
        *self = *self * rhs;
    }
}

impl Mul<i64> for Fixed {
    type Output = Fixed;

    fn mul(self, rhs: i64) -> Fixed {
        Fixed(self.0.saturating_mul(rhs))
    }
}

/// Allow i64 * Fixed (commutative multiplication)
impl Mul<Fixed> for i64 {
    type Output = Fixed;

    fn mul(self, rhs: Fixed) -> Fixed {
        rhs * self
    }
}

impl Div for Fixed {
    type Output = Fixed;

    fn div(self, rhs: Fixed) -> Fixed {
        self.saturating_div(rhs)
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    fn neg(self) -> Fixed {
        Fixed(self.0.saturating_neg())
    }
}
