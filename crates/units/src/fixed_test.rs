use approx::assert_relative_eq;

use crate::fixed::Fixed;
use crate::{AU_EARTH_RADIUS, AU_SOL_RADIUS};

#[test]
fn test_ratio_is_exact_for_binary_fractions() {
    assert_eq!(Fixed::ratio(1, 2).raw(), 1 << 31);
    assert_eq!(Fixed::ratio(6, 3), Fixed::from_int(2));
    assert_eq!(Fixed::ratio(-1, 4).to_f64(), -0.25);
}

#[test]
fn test_arithmetic() {
    let a = Fixed::ratio(135, 100);
    let b = Fixed::from_int(4);

    assert_relative_eq!((a + b).to_f64(), 5.35, epsilon = 1e-9);
    assert_relative_eq!((b - a).to_f64(), 2.65, epsilon = 1e-9);
    assert_relative_eq!((a * b).to_f64(), 5.4, epsilon = 1e-9);
    assert_relative_eq!((b / a).to_f64(), 4.0 / 1.35, epsilon = 1e-9);
    assert_relative_eq!((a * 3).to_f64(), 4.05, epsilon = 1e-9);
    assert_eq!(-Fixed::ONE, Fixed::from_int(-1));
}

#[test]
fn test_multiplication_saturates_instead_of_wrapping() {
    let big = Fixed::from_int(1 << 30);

    assert_eq!(big.checked_mul(big), None);
    assert_eq!(big * big, Fixed::MAX);
    assert_eq!((-big) * big, Fixed::MIN);
    assert_eq!(Fixed::MAX + Fixed::ONE, Fixed::MAX);
}

#[test]
fn test_division_by_zero_saturates() {
    assert_eq!(Fixed::ONE.checked_div(Fixed::ZERO), None);
    assert_eq!(Fixed::ONE / Fixed::ZERO, Fixed::MAX);
    assert_eq!(-Fixed::ONE / Fixed::ZERO, Fixed::MIN);
}

#[test]
fn test_roots() {
    assert_eq!(Fixed::from_int(16).sqrt(), Fixed::from_int(4));
    assert_relative_eq!(Fixed::from_int(2).sqrt().to_f64(), 2f64.sqrt(), epsilon = 1e-9);
    assert_eq!(Fixed::from_int(-4).sqrt(), Fixed::ZERO);
    assert_relative_eq!(Fixed::from_int(27).cbrt().to_f64(), 3.0, epsilon = 1e-9);
}

#[test]
fn test_ordering_and_conversions() {
    assert!(Fixed::ratio(1, 3) < Fixed::ratio(1, 2));
    assert_eq!(Fixed::from_f64(2.5), Fixed::ratio(5, 2));
    assert_eq!(Fixed::ratio(7, 2).to_int(), 3);
    assert_eq!(Fixed::from(5), Fixed::from_int(5));
    assert_relative_eq!(Fixed::PI.to_f64(), std::f64::consts::PI, epsilon = 1e-9);
}

#[test]
fn test_radius_ratios_match_physical_constants() {
    let sol = AU_SOL_RADIUS.to_f64();
    let earth = AU_EARTH_RADIUS.to_f64();

    assert_relative_eq!(sol, crate::length::SOLAR_RADIUS_AU, max_relative = 0.01);
    assert_relative_eq!(earth, crate::length::EARTH_RADIUS_AU, max_relative = 0.1);
}
