//! Combinatorics and randomness.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::atom::*;
use crate::run::*;
use crate::val::*;

use super::list::range_of;
use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.fun('!', Some(factorial_or_permutations), Some(partial_permutations));
    vocab.fun('C', Some(power_set), Some(combinations));
    vocab.fun('?', Some(random), Some(sample));
}

/// `lo * (lo + 1) * ... * hi`, exact while it fits.
fn product_range(lo: i64, hi: i64) -> Num {
    let mut acc = Num::Int(1);
    for k in lo.max(1)..=hi {
        acc = acc.mul(Num::Int(k));
    }
    acc
}

fn factorial(n: i64) -> Result<Num, VError> {
    if n < 0 {
        return Err(VError::Domain("factorial of a negative number"));
    }
    Ok(product_range(1, n))
}

/// Ordered selections of `k` elements, in index order.
fn permutations(items: &[Value], k: usize) -> Vec<Value> {
    fn go(items: &[Value], used: &mut Vec<bool>, k: usize, cur: &mut Vec<Value>, out: &mut Vec<Value>) {
        if cur.len() == k {
            out.push(Value::Array(cur.clone()));
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            cur.push(items[i].clone());
            go(items, used, k, cur, out);
            cur.pop();
            used[i] = false;
        }
    }

    let mut out = Vec::new();
    if k <= items.len() {
        go(items, &mut vec![false; items.len()], k, &mut Vec::new(), &mut out);
    }
    out
}

/// Unordered selections of `k` elements, in index order.
fn choose(items: &[Value], k: usize) -> Vec<Value> {
    fn go(items: &[Value], start: usize, k: usize, cur: &mut Vec<Value>, out: &mut Vec<Value>) {
        if cur.len() == k {
            out.push(Value::Array(cur.clone()));
            return;
        }
        for i in start..items.len() {
            cur.push(items[i].clone());
            go(items, i + 1, k, cur, out);
            cur.pop();
        }
    }

    let mut out = Vec::new();
    go(items, 0, k, &mut Vec::new(), &mut out);
    out
}

fn factorial_or_permutations(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    match a {
        Value::Atom(x) => Ok(x.with_value(factorial(x.to_i64())?).into()),
        Value::Array(items) => Ok(Value::Array(permutations(&items, items.len()))),
    }
}

/// `b! / (b-a)!` for atoms; otherwise the length-`a` permutations of `b`.
fn partial_permutations(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 0, -1, |a, b| {
        let n = a.atom()?;
        match b {
            Value::Atom(y) => {
                let (x, y) = (n.to_i64(), y.to_i64());
                factorial(y - x)?;
                Ok(n.with_value(product_range(y - x + 1, y)).into())
            }
            Value::Array(items) => {
                let k = n.to_i64();
                if k < 0 {
                    return Err(VError::Domain("negative permutation size").into());
                }
                Ok(Value::Array(permutations(&items, k as usize)))
            }
        }
    })
}

fn power_set(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    match a {
        Value::Atom(x) => Ok(x.with_value(Num::Int(2).pow(x.value())).into()),
        Value::Array(items) => Ok(Value::Array(
            (0..=items.len()).flat_map(|k| choose(&items, k)).collect(),
        )),
    }
}

/// Binomial coefficient for atoms, zero outside `0 <= a <= b`; otherwise the
/// size-`a` subsequences of `b`, with `a` taken modulo the length.
fn combinations(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 0, -1, |a, b| {
        let n = a.atom()?;
        let x = n.to_i64();
        match b {
            Value::Atom(y) => {
                let y = y.to_i64();
                if x < 0 || y < x {
                    return Ok(n.with_value(Num::Int(0)).into());
                }
                let k = x.min(y - x);
                let mut acc = Num::Int(1);
                for i in 1..=k {
                    acc = acc.mul(Num::Int(y - k + i)).div(Num::Int(i));
                }
                Ok(n.with_value(acc).into())
            }
            Value::Array(items) if items.is_empty() => Ok(Value::Array(items)),
            Value::Array(items) => {
                let k = x.rem_euclid(items.len() as i64) as usize;
                Ok(Value::Array(choose(&items, k)))
            }
        }
    })
}

/// A random number below `a` (between `a` and 0 when negative, in `[0, 1)`
/// for 0), or `a` shuffled.
fn random(ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    let rng = ctx.rng();
    match a {
        Value::Atom(x) => {
            let value = match x.value() {
                Num::Real(r) if r > 0.0 => Num::Real(rng.gen_range(0.0..r)),
                Num::Real(r) if r < 0.0 => Num::Real(rng.gen_range(r..0.0)),
                Num::Real(_) => Num::Real(0.0),
                Num::Int(0) => Num::Real(rng.gen::<f64>()),
                Num::Int(n) if n > 0 => Num::Int(rng.gen_range(0..n)),
                Num::Int(n) => Num::Int(rng.gen_range(n + 1..1)),
            };
            Ok(x.with_value(value).into())
        }
        Value::Array(mut items) => {
            items.shuffle(rng);
            Ok(Value::Array(items))
        }
    }
}

/// `k` elements of `items` chosen without replacement, in their original
/// order; returns the rest as well.
fn draw(rng: &mut dyn rand::RngCore, items: Vec<Value>, k: i64) -> (Vec<Value>, Vec<Value>) {
    let k = (k.max(0) as usize).min(items.len());
    let mut chosen = index::sample(rng, items.len(), k).into_vec();
    chosen.sort_unstable();
    let mut picked = Vec::with_capacity(k);
    let mut rest = Vec::with_capacity(items.len() - k);
    let mut next = chosen.into_iter().peekable();
    for (i, item) in items.into_iter().enumerate() {
        if next.peek() == Some(&i) {
            next.next();
            picked.push(item);
        } else {
            rest.push(item);
        }
    }
    (picked, rest)
}

/// `a` elements of `b` without replacement; a list of counts draws
/// successive disjoint samples. An atom `b` samples its range.
fn sample(ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 1, -1, |a, b| {
        let items = match b {
            Value::Atom(_) => range_of(b)?.into_list(),
            Value::Array(items) => items,
        };
        match a {
            Value::Atom(k) => Ok(Value::Array(draw(ctx.rng(), items, k.to_i64()).0)),
            Value::Array(counts) => {
                let mut items = items;
                let mut res = Vec::with_capacity(counts.len());
                for count in counts {
                    let (picked, rest) = draw(ctx.rng(), items, count.to_i64()?);
                    res.push(Value::Array(picked));
                    items = rest;
                }
                Ok(Value::Array(res))
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn factorials() {
        let mut ctx = runner("");
        assert_eq!(factorial_or_permutations(&mut ctx, Value::num(5)).unwrap(), Value::num(120));
        assert_eq!(factorial_or_permutations(&mut ctx, Value::num(0)).unwrap(), Value::num(1));
        assert!(factorial_or_permutations(&mut ctx, Value::num(-1)).is_err());
        assert_eq!(partial_permutations(&mut ctx, Value::num(2), Value::num(5)).unwrap(), Value::num(20));
    }

    #[test]
    fn permutations_in_index_order() {
        let mut ctx = runner("");
        let res = factorial_or_permutations(&mut ctx, Value::nums(&[1, 2, 3])).unwrap();
        assert_eq!(res.clone().into_list().len(), 6);
        assert_eq!(res.into_list()[1], Value::nums(&[1, 3, 2]));
        let res = partial_permutations(&mut ctx, Value::num(1), Value::nums(&[1, 2])).unwrap();
        assert_eq!(res, Value::Array(vec![Value::nums(&[1]), Value::nums(&[2])]));
        assert!(partial_permutations(&mut ctx, Value::num(-1), Value::nums(&[1])).is_err());
    }

    #[test]
    fn binomials() {
        let mut ctx = runner("");
        assert_eq!(combinations(&mut ctx, Value::num(2), Value::num(5)).unwrap(), Value::num(10));
        assert_eq!(combinations(&mut ctx, Value::num(6), Value::num(5)).unwrap(), Value::num(0));
        assert_eq!(combinations(&mut ctx, Value::num(-1), Value::num(5)).unwrap(), Value::num(0));
        assert_eq!(power_set(&mut ctx, Value::num(3)).unwrap(), Value::num(8));
    }

    #[test]
    fn subsequences_by_size() {
        let mut ctx = runner("");
        let res = power_set(&mut ctx, Value::nums(&[1, 2])).unwrap();
        assert_eq!(
            res,
            Value::Array(vec![
                Value::nums(&[]),
                Value::nums(&[1]),
                Value::nums(&[2]),
                Value::nums(&[1, 2]),
            ])
        );
        let res = combinations(&mut ctx, Value::num(4), Value::nums(&[1, 2, 3])).unwrap();
        assert_eq!(res, Value::Array(vec![Value::nums(&[1]), Value::nums(&[2]), Value::nums(&[3])]));
    }

    #[test]
    fn seeded_randomness_is_reproducible() {
        let run = || {
            let mut ctx = runner("");
            let x = random(&mut ctx, Value::num(100)).unwrap();
            let y = sample(&mut ctx, Value::num(3), Value::num(10)).unwrap();
            (x, y)
        };
        let (x, y) = run();
        assert_eq!(run(), (x.clone(), y.clone()));
        assert!(x.to_i64().unwrap() >= 0 && x.to_i64().unwrap() < 100);
        let picked = y.into_list();
        assert_eq!(picked.len(), 3);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut ctx = runner("");
        let mut res = random(&mut ctx, Value::nums(&[1, 2, 3, 4])).unwrap().into_list();
        res.sort();
        assert_eq!(Value::Array(res), Value::nums(&[1, 2, 3, 4]));
    }

    #[test]
    fn disjoint_samples() {
        let mut ctx = runner("");
        let res = sample(&mut ctx, Value::nums(&[2, 2]), Value::num(4)).unwrap();
        let mut all: Vec<Value> = res.into_list().into_iter().flat_map(Value::into_list).collect();
        all.sort();
        assert_eq!(Value::Array(all), Value::nums(&[0, 1, 2, 3]));
    }
}
