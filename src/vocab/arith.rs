//! Arithmetic and number bases.
//!
//! Atom-wise operations keep the type of their left operand, so e.g. adding
//! a number to a character gives a character.

use crate::atom::*;
use crate::run::*;
use crate::val::*;

use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.fun('+', Some(abs), Some(add));
    vocab.fun('-', Some(negate), Some(subtract));
    vocab.fun('*', Some(signum), Some(multiply));
    vocab.fun('%', Some(reciprocal), Some(divide));
    vocab.fun('|', Some(round), Some(modulus));
    vocab.fun('m', Some(floor), Some(min));
    vocab.fun('M', Some(ceil), Some(max));
    vocab.fun('x', Some(factorize), Some(xor));
    vocab.fun('b', Some(base2), Some(base));
    vocab.fun('d', Some(antibase2), Some(antibase));
}

fn atomwise(a: Value, f: fn(Num) -> Num) -> RResult<Value> {
    threaded_unary(a, 0, |x| {
        let x = x.atom()?;
        Ok(x.with_value(f(x.value())).into())
    })
}

fn atomwise2(a: Value, b: Value, f: fn(Num, Num) -> Num) -> RResult<Value> {
    threaded_binary(a, b, 0, 0, |x, y| {
        let (x, y) = (x.atom()?, y.atom()?);
        Ok(x.with_value(f(x.value(), y.value())).into())
    })
}

fn abs(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    atomwise(a, Num::abs)
}

fn add(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    atomwise2(a, b, Num::add)
}

fn negate(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    atomwise(a, Num::neg)
}

fn subtract(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    atomwise2(a, b, |a, b| b.sub(a))
}

fn signum(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    atomwise(a, Num::signum)
}

fn multiply(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    atomwise2(a, b, Num::mul)
}

fn reciprocal(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    atomwise(a, Num::recip)
}

fn divide(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    atomwise2(a, b, |a, b| b.div(a))
}

fn round(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    atomwise(a, Num::round)
}

fn modulus(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    atomwise2(a, b, |a, b| b.modulo(a))
}

fn floor(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    atomwise(a, Num::floor)
}

fn ceil(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    atomwise(a, Num::ceil)
}

/// The lesser of two whole values.
fn min(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    Ok(if b < a { b } else { a })
}

fn max(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    Ok(if b > a { b } else { a })
}

/// Prime factors in ascending order; 0 factors as `[0]` and negative
/// numbers start with `-1`.
fn factorize(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    threaded_unary(a, 0, |x| {
        let n = x.to_i64()?;
        if n == 0 {
            return Ok(Value::nums(&[0]));
        }
        let mut factors = if n < 0 { vec![-1] } else { vec![] };
        let mut n = n.unsigned_abs();
        let mut div = 2u64;
        while n > 1 {
            if div.saturating_mul(div) > n {
                factors.push(n as i64);
                break;
            }
            if n % div == 0 {
                n /= div;
                factors.push(div as i64);
            } else {
                div += 1;
            }
        }
        Ok(Value::nums(&factors))
    })
}

fn xor(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    atomwise2(a, b, Num::xor)
}

/// Floored quotient for integers, true quotient otherwise; zero divisor
/// gives zero.
fn quotient(num: Num, base: Num) -> Num {
    match (num, base) {
        (_, Num::Int(0)) => Num::Int(0),
        (Num::Int(x), Num::Int(y)) => match (x.checked_div(y), x.checked_rem(y)) {
            (Some(q), Some(r)) if r != 0 && (r < 0) != (y < 0) => Num::Int(q - 1),
            (Some(q), _) => Num::Int(q),
            _ => Num::Real(x as f64 / y as f64),
        },
        _ => num.div(base),
    }
}

fn num_value(n: Num) -> Value {
    Value::Atom(Atom::new(AtomTy::Num, n))
}

/// Digits of `num` in a single base, most significant first.
///
/// Bases of magnitude at most one and numbers that are not finite have no
/// finite expansion, so the number is returned as its own single digit.
fn digits(mut num: Num, base: Num) -> Vec<Value> {
    if base.abs() <= Num::Int(1) || !num.to_f64().is_finite() {
        return vec![num_value(num)];
    }
    let mut digits = Vec::new();
    while num.abs() >= base.abs() {
        digits.push(num_value(num.modulo(base)));
        num = quotient(num, base);
    }
    digits.push(num_value(num));
    digits.reverse();
    digits
}

/// Digits of `num` in mixed radix: one digit per base, least significant
/// base last.
fn mixed_digits(mut num: Num, bases: &[Value]) -> RResult<Vec<Value>> {
    let mut digits = Vec::with_capacity(bases.len());
    for base in bases.iter().rev() {
        let base = base.atom()?.value();
        digits.push(num_value(num.modulo(base)));
        num = quotient(num, base);
    }
    digits.reverse();
    Ok(digits)
}

fn base2(ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    base(ctx, Value::num(2), a)
}

fn base(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 1, 0, |a, b| {
        let num = b.atom()?.value();
        Ok(Value::Array(match a {
            Value::Atom(base) => digits(num, base.value()),
            Value::Array(bases) => mixed_digits(num, &bases)?,
        }))
    })
}

pub(super) fn digit_count(x: Atom) -> usize {
    digits(x.value(), Num::Int(10)).len()
}

fn antibase2(ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    antibase(ctx, Value::num(2), a)
}

/// The number whose digits `b` has in base(s) `a`.
fn antibase(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 1, 1, |a, b| {
        let digits = match b {
            Value::Atom(_) => return Ok(b),
            Value::Array(digits) => digits,
        };
        let bases = match a {
            Value::Atom(_) => vec![a; digits.len()],
            Value::Array(bases) => bases,
        };
        let mut total = Num::Int(0);
        let mut place = Num::Int(1);
        for (base, digit) in bases.iter().zip(&digits).rev() {
            total = total.add(digit.atom()?.value().mul(place));
            place = place.mul(base.atom()?.value());
        }
        Ok(num_value(total))
    })
}
