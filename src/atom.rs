use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Float, Signed, ToPrimitive, Zero};

/// Type of an atomic value (semantics)
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum AtomTy {
    /// A character, stored as its code point
    Char,
    /// A number, either exact or real
    Num,
}

/// Numeric payload of an atom.
///
/// Integer arithmetic is exact as long as it fits in 64 bits, and silently
/// moves to reals when it does not.
#[derive(Debug, Clone, Copy)]
pub enum Num {
    Int(i64),
    Real(f64),
}

impl Num {
    pub fn to_f64(self: Self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Real(x) => x,
        }
    }

    /// Truncates towards zero, saturating at the bounds of `i64`.
    pub fn to_i64(self: Self) -> i64 {
        match self {
            Num::Int(n) => n,
            Num::Real(x) if x.is_nan() => 0,
            Num::Real(x) => x.trunc().to_i64().unwrap_or(if x > 0.0 { i64::MAX } else { i64::MIN }),
        }
    }

    pub fn is_zero(self: Self) -> bool {
        match self {
            Num::Int(n) => n.is_zero(),
            Num::Real(x) => x.is_zero(),
        }
    }

    pub fn is_int(self: Self) -> bool {
        matches!(self, Num::Int(_))
    }

    fn exact_or_real(
        a: Self,
        b: Self,
        exact: impl Fn(i64, i64) -> Option<i64>,
        real: impl Fn(f64, f64) -> f64,
    ) -> Self {
        match (a, b) {
            (Num::Int(x), Num::Int(y)) => match exact(x, y) {
                Some(z) => Num::Int(z),
                None => Num::Real(real(x as f64, y as f64)),
            },
            _ => Num::Real(real(a.to_f64(), b.to_f64())),
        }
    }

    pub fn add(self: Self, other: Self) -> Self {
        Self::exact_or_real(self, other, |x, y| CheckedAdd::checked_add(&x, &y), |x, y| x + y)
    }

    pub fn sub(self: Self, other: Self) -> Self {
        Self::exact_or_real(self, other, |x, y| CheckedSub::checked_sub(&x, &y), |x, y| x - y)
    }

    pub fn mul(self: Self, other: Self) -> Self {
        Self::exact_or_real(self, other, |x, y| CheckedMul::checked_mul(&x, &y), |x, y| x * y)
    }

    pub fn neg(self: Self) -> Self {
        match self {
            Num::Int(n) => n.checked_neg().map_or(Num::Real(-(n as f64)), Num::Int),
            Num::Real(x) => Num::Real(-x),
        }
    }

    pub fn abs(self: Self) -> Self {
        match self {
            Num::Int(n) => n.checked_abs().map_or(Num::Real((n as f64).abs()), Num::Int),
            Num::Real(x) => Num::Real(x.abs()),
        }
    }

    pub fn signum(self: Self) -> Self {
        match self {
            Num::Int(n) => Num::Int(n.signum()),
            Num::Real(x) if x.is_zero() || x.is_nan() => Num::Int(0),
            Num::Real(x) => Num::Int(Signed::signum(&x) as i64),
        }
    }

    /// `1 / self`; the reciprocal of zero is zero.
    pub fn recip(self: Self) -> Self {
        if self.is_zero() {
            Num::Int(0)
        } else {
            Num::Real(1.0 / self.to_f64())
        }
    }

    /// `self / divisor`, exact when both are integers and the division is.
    /// Zero on either side gives zero.
    pub fn div(self: Self, divisor: Self) -> Self {
        if self.is_zero() || divisor.is_zero() {
            return Num::Int(0);
        }
        match (self, divisor) {
            (Num::Int(x), Num::Int(y)) if x.checked_rem(y) == Some(0) => {
                x.checked_div(y).map_or(Num::Real(x as f64 / y as f64), Num::Int)
            }
            _ => Num::Real(self.to_f64() / divisor.to_f64()),
        }
    }

    /// Floored modulus, with the sign of the divisor.
    /// Zero on either side gives zero.
    pub fn modulo(self: Self, divisor: Self) -> Self {
        if self.is_zero() || divisor.is_zero() {
            return Num::Int(0);
        }
        match (self, divisor) {
            (Num::Int(x), Num::Int(y)) => match x.checked_rem(y) {
                Some(r) if r != 0 && (r < 0) != (y < 0) => Num::Int(r + y),
                Some(r) => Num::Int(r),
                None => Num::Int(0),
            },
            _ => {
                let (x, y) = (self.to_f64(), divisor.to_f64());
                Num::Real(x - y * (x / y).floor())
            }
        }
    }

    fn integral(self: Self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Num::Int(_) => self,
            Num::Real(x) => match f(x).to_i64() {
                Some(n) => Num::Int(n),
                None => Num::Real(f(x)),
            },
        }
    }

    pub fn floor(self: Self) -> Self {
        self.integral(Float::floor)
    }

    pub fn ceil(self: Self) -> Self {
        self.integral(Float::ceil)
    }

    /// Rounds half up.
    pub fn round(self: Self) -> Self {
        self.integral(|x| (x + 0.5).floor())
    }

    pub fn pow(self: Self, exp: Self) -> Self {
        match (self, exp) {
            (Num::Int(b), Num::Int(e)) if e >= 0 => e
                .to_u32()
                .and_then(|e| b.checked_pow(e))
                .map_or(Num::Real((b as f64).powf(e as f64)), Num::Int),
            _ => Num::Real(self.to_f64().powf(exp.to_f64())),
        }
    }

    pub fn xor(self: Self, other: Self) -> Self {
        Num::Int(self.to_i64() ^ other.to_i64())
    }
}

impl PartialEq for Num {
    fn eq(self: &Self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Num {}

impl PartialOrd for Num {
    fn partial_cmp(self: &Self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Num {
    fn cmp(self: &Self, other: &Self) -> Ordering {
        match (self, other) {
            (Num::Int(x), Num::Int(y)) => x.cmp(y),
            _ => {
                let (x, y) = (self.to_f64(), other.to_f64());
                x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y))
            }
        }
    }
}

impl Display for Num {
    fn fmt(self: &Self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Num::Int(n) => write!(f, "{}", n),
            Num::Real(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{:.1}", x)
            }
            Num::Real(x) => write!(f, "{}", x),
        }
    }
}

/// A scalar: a number or a character, each carrying a numeric value.
///
/// Atoms are ordered by type first (characters before numbers), then by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Atom {
    ty: AtomTy,
    value: Num,
}

impl Atom {
    pub fn new(ty: AtomTy, value: Num) -> Atom {
        Atom { ty, value }
    }

    pub fn num(value: i64) -> Atom {
        Atom::new(AtomTy::Num, Num::Int(value))
    }

    pub fn real(value: f64) -> Atom {
        Atom::new(AtomTy::Num, Num::Real(value))
    }

    pub fn char(c: char) -> Atom {
        Atom::new(AtomTy::Char, Num::Int(c as i64))
    }

    pub fn ty(self: &Self) -> AtomTy {
        self.ty
    }

    pub fn value(self: &Self) -> Num {
        self.value
    }

    pub fn to_i64(self: &Self) -> i64 {
        self.value.to_i64()
    }

    /// Keeps the type, replaces the value.
    pub fn with_value(self: &Self, value: Num) -> Atom {
        Atom::new(self.ty, value)
    }

    pub fn with_ty(self: &Self, ty: AtomTy) -> Atom {
        Atom::new(ty, self.value)
    }

    /// The character with this atom's code point, or U+FFFD if there is none.
    pub fn to_char(self: &Self) -> char {
        u32::try_from(self.to_i64())
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    pub fn is_truthy(self: &Self) -> bool {
        !self.value.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_is_zero() {
        assert_eq!(Num::Int(7).div(Num::Int(0)), Num::Int(0));
        assert_eq!(Num::Int(7).modulo(Num::Int(0)), Num::Int(0));
        assert_eq!(Num::Int(0).recip(), Num::Int(0));
    }

    #[test]
    fn exact_division_stays_integer() {
        assert!(Num::Int(12).div(Num::Int(4)).is_int());
        assert_eq!(Num::Int(7).div(Num::Int(2)), Num::Real(3.5));
    }

    #[test]
    fn dividing_min_by_minus_one_moves_to_reals() {
        assert_eq!(Num::Int(i64::MIN).div(Num::Int(-1)), Num::Real(-(i64::MIN as f64)));
        assert_eq!(Num::Int(i64::MIN).modulo(Num::Int(-1)), Num::Int(0));
    }

    #[test]
    fn modulus_follows_divisor_sign() {
        assert_eq!(Num::Int(-7).modulo(Num::Int(3)), Num::Int(2));
        assert_eq!(Num::Int(7).modulo(Num::Int(-3)), Num::Int(-2));
    }

    #[test]
    fn overflow_moves_to_reals() {
        assert!(!Num::Int(i64::MAX).add(Num::Int(1)).is_int());
        assert_eq!(Num::Int(2).pow(Num::Int(10)), Num::Int(1024));
    }

    #[test]
    fn atoms_order_by_type_first() {
        assert!(Atom::char('z') < Atom::num(0));
        assert!(Atom::num(1) < Atom::num(2));
        assert_ne!(Atom::char('a'), Atom::num('a' as i64));
    }

    #[test]
    fn rounding_produces_integers() {
        assert_eq!(Num::Real(2.5).round(), Num::Int(3));
        assert_eq!(Num::Real(-2.5).floor(), Num::Int(-3));
        assert_eq!(Num::Real(2.1).ceil(), Num::Int(3));
    }
}
