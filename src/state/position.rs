//! Unbounded coordinates stored as an exact integer plus a fraction in `[0, 1)`.
//!
//! A single `f64` loses sub-tile precision once the camera is far from the origin; keeping the
//! integer part in a `BigInt` means the fractional drawing offset is always as precise as it is
//! near zero, no matter how far the camera has travelled.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

/// Decompose `value` into `(floor(value), value - floor(value))`.
///
/// Non-finite input has no meaningful decomposition and yields `(0, 0.0)`.
pub fn split(value: f64) -> (BigInt, f64) {
    if !value.is_finite() {
        return (BigInt::zero(), 0.0);
    }
    let floor = value.floor();
    let mut whole = BigInt::from_f64(floor).unwrap_or_default();
    let mut frac = value - floor;
    // Tiny negative values round up to exactly 1.0.
    if frac >= 1.0 {
        whole += 1;
        frac -= 1.0;
    }
    if frac <= 0.0 {
        frac = 0.0;
    }
    (whole, frac)
}

/// One axis of a [`PrecisionPosition`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrecisionAxis {
    whole: BigInt,
    frac: f64,
}

impl PrecisionAxis {
    pub fn new(value: f64) -> Self {
        let (whole, frac) = split(value);
        Self { whole, frac }
    }

    /// Build from parts; `frac` outside `[0, 1)` is carried into `whole`.
    pub fn from_parts(whole: impl Into<BigInt>, frac: f64) -> Self {
        let mut axis = Self {
            whole: whole.into(),
            frac: if frac.is_finite() { frac } else { 0.0 },
        };
        axis.normalize();
        axis
    }

    pub fn whole(&self) -> &BigInt {
        &self.whole
    }

    pub fn frac(&self) -> f64 {
        self.frac
    }

    /// Lossy `f64` view, for diagnostics and tests only.
    pub fn approx(&self) -> f64 {
        self.whole.to_f64().unwrap_or(f64::NAN) + self.frac
    }

    /// Add `amount` without ever materialising `whole + frac` as a float.
    pub fn shift(&mut self, amount: f64) {
        if amount == 0.0 {
            return;
        }
        let (whole, frac) = split(amount);
        self.whole += whole;
        self.frac += frac;
        self.normalize();
    }

    /// Restore `0 <= frac < 1`. The carry is computed in one step, so the cost does not depend
    /// on how far out of range `frac` was.
    fn normalize(&mut self) {
        if (0.0..1.0).contains(&self.frac) {
            return;
        }
        let carry = self.frac.floor();
        self.whole += BigInt::from_f64(carry).unwrap_or_default();
        self.frac -= carry;
        if self.frac >= 1.0 {
            self.whole += 1;
            self.frac -= 1.0;
        }
        if self.frac <= 0.0 {
            self.frac = 0.0;
        }
    }
}

/// Digits after the decimal point of a value in `[0, 1)`, shortest round-trip form.
fn fraction_digits(frac: f64) -> String {
    let text = frac.to_string();
    match text.split_once('.') {
        Some((_, digits)) => digits.to_string(),
        None => "0".to_string(),
    }
}

impl fmt::Display for PrecisionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.whole.is_negative() && self.frac > 0.0 {
            // -5 + 0.25 is written -4.75: borrow one from the whole part.
            let borrowed = 1.0 - self.frac;
            if borrowed < 1.0 {
                let magnitude: BigInt = -(&self.whole + 1u32);
                return write!(f, "-{}.{}", magnitude, fraction_digits(borrowed));
            }
            return write!(f, "{}.0", self.whole);
        }
        write!(f, "{}.{}", self.whole, fraction_digits(self.frac))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrecisionPosition {
    pub x: PrecisionAxis,
    pub y: PrecisionAxis,
}

impl PrecisionPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: PrecisionAxis::new(x),
            y: PrecisionAxis::new(y),
        }
    }

    /// Add `dx * multiplier` to x and `dy * multiplier` to y. Non-finite products are dropped.
    pub fn move_by(&mut self, dx: f64, dy: f64, multiplier: f64) {
        for (axis, delta) in [(&mut self.x, dx), (&mut self.y, dy)] {
            if delta == 0.0 {
                continue;
            }
            let amount = delta * multiplier;
            if !amount.is_finite() {
                log::warn!("ignoring non-finite camera move {delta} * {multiplier}");
                continue;
            }
            axis.shift(amount);
        }
    }
}

impl fmt::Display for PrecisionPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_normalized(pos: &PrecisionPosition) {
        for axis in [&pos.x, &pos.y] {
            assert!(
                (0.0..1.0).contains(&axis.frac()),
                "frac {} out of range",
                axis.frac()
            );
        }
    }

    #[test]
    fn split_floors_negative_values() {
        let (whole, frac) = split(-0.3);
        assert_eq!(whole, BigInt::from(-1));
        assert!((frac - 0.7).abs() < 1e-12);

        let (whole, frac) = split(2.5);
        assert_eq!(whole, BigInt::from(2));
        assert_eq!(frac, 0.5);
    }

    #[test]
    fn split_never_returns_a_full_unit() {
        let (whole, frac) = split(-1e-20);
        assert!(frac < 1.0);
        assert_eq!(whole, BigInt::zero());
    }

    #[test]
    fn zero_move_and_zero_multiplier_are_noops() {
        let mut pos = PrecisionPosition::new(3.25, -7.5);
        let before = pos.clone();
        pos.move_by(0.0, 0.0, 5.0);
        assert_eq!(pos, before);
        pos.move_by(1.0, -1.0, 0.0);
        assert_eq!(pos, before);
    }

    #[test]
    fn carries_across_whole_units() {
        let mut pos = PrecisionPosition::new(0.75, 0.25);
        pos.move_by(0.5, -0.5, 1.0);
        assert_eq!(pos.x.whole(), &BigInt::from(1));
        assert!((pos.x.frac() - 0.25).abs() < 1e-12);
        assert_eq!(pos.y.whole(), &BigInt::from(-1));
        assert!((pos.y.frac() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn large_single_displacement_carries_exactly() {
        let mut pos = PrecisionPosition::default();
        pos.move_by(1e15, -1e15, 1.0);
        assert_eq!(pos.x.whole(), &BigInt::from(1_000_000_000_000_000_i64));
        assert_eq!(pos.y.whole(), &BigInt::from(-1_000_000_000_000_000_i64));
        assert_normalized(&pos);
    }

    #[test]
    fn repeated_small_moves_stay_normalized_and_sum_exactly() {
        let mut pos = PrecisionPosition::default();
        let steps = [0.125, -0.375, 0.875, -1.625, 2.25, -0.0625, 0.6875];
        let mut expected_x = 0.0;
        let mut expected_y = 0.0;
        for round in 0..200 {
            for &step in &steps {
                let dy = -step * 0.5;
                pos.move_by(step, dy, 1.0);
                expected_x += step;
                expected_y += dy;
                assert_normalized(&pos);
            }
            if round % 50 == 0 {
                assert_eq!(pos.x.approx(), expected_x);
            }
        }
        assert_eq!(pos.x.whole(), &BigInt::from_f64(expected_x.floor()).unwrap());
        assert_eq!(pos.y.whole(), &BigInt::from_f64(expected_y.floor()).unwrap());
        assert_eq!(pos.y.approx(), expected_y);
    }

    #[test]
    fn precision_survives_far_from_origin() {
        let mut pos = PrecisionPosition::default();
        // 10^30 tiles out; a plain f64 cannot represent a quarter tile here.
        let far = BigInt::from(10).pow(30);
        pos.x = PrecisionAxis::from_parts(far.clone(), 0.0);
        pos.move_by(0.25, 0.0, 1.0);
        assert_eq!(pos.x.whole(), &far);
        assert_eq!(pos.x.frac(), 0.25);
    }

    #[test]
    fn from_parts_normalizes_out_of_range_fraction() {
        let axis = PrecisionAxis::from_parts(2, 3.5);
        assert_eq!(axis.whole(), &BigInt::from(5));
        assert_eq!(axis.frac(), 0.5);
        let axis = PrecisionAxis::from_parts(2, -0.25);
        assert_eq!(axis.whole(), &BigInt::from(1));
        assert_eq!(axis.frac(), 0.75);
    }

    #[test]
    fn non_finite_moves_are_ignored() {
        let mut pos = PrecisionPosition::new(1.5, 1.5);
        let before = pos.clone();
        pos.move_by(f64::INFINITY, f64::NAN, 1.0);
        assert_eq!(pos, before);
    }

    #[test]
    fn display_borrows_for_negative_wholes() {
        assert_eq!(PrecisionAxis::from_parts(-5, 0.25).to_string(), "-4.75");
        assert_eq!(PrecisionAxis::from_parts(-1, 0.25).to_string(), "-0.75");
        assert_eq!(PrecisionAxis::from_parts(-5, 0.0).to_string(), "-5.0");
        assert_eq!(PrecisionAxis::from_parts(3, 0.0).to_string(), "3.0");
        assert_eq!(PrecisionAxis::from_parts(3, 0.5).to_string(), "3.5");
    }

    #[test]
    fn position_displays_both_axes() {
        let pos = PrecisionPosition {
            x: PrecisionAxis::from_parts(12, 0.125),
            y: PrecisionAxis::from_parts(-3, 0.5),
        };
        assert_eq!(pos.to_string(), "12.125, -2.5");
    }
}
