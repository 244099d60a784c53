//! Structural built-ins: slicing, shaping, indexing and ranges.

use crate::atom::*;
use crate::run::*;
use crate::val::*;

use super::arith::digit_count;
use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.fun('^', Some(init_or_square), Some(take_or_power));
    vocab.fun('v', Some(last_or_sqrt), Some(drop_or_root));
    vocab.fun('#', Some(length), Some(replicate));
    vocab.fun('R', Some(reverse), Some(rotate));
    vocab.fun('k', Some(mask_to_indices), None);
    vocab.fun('K', Some(indices_to_mask), None);
    vocab.fun('r', Some(range), Some(inclusive_range));
    vocab.fun(',', Some(flatten), Some(append));
    vocab.fun(';', Some(singleton), Some(pair));
    vocab.fun('$', Some(shape), Some(reshape));
    vocab.fun('@', Some(index_paths), Some(index));
}

fn init_or_square(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    match a {
        Value::Atom(x) => Ok(x.with_value(x.value().mul(x.value())).into()),
        Value::Array(mut items) => {
            items.pop();
            Ok(Value::Array(items))
        }
    }
}

/// The first `n` elements, or for negative `n` the last `-n`.
fn take(items: Vec<Value>, n: i64) -> Vec<Value> {
    let len = items.len();
    let k = n.unsigned_abs().min(len as u64) as usize;
    if n >= 0 {
        items.into_iter().take(k).collect()
    } else {
        items.into_iter().skip(len - k).collect()
    }
}

/// All but the first `n` elements, or for negative `n` all but the last `-n`.
fn drop(items: Vec<Value>, n: i64) -> Vec<Value> {
    let len = items.len();
    let k = (n.unsigned_abs().min(len as u64)) as usize;
    if n >= 0 {
        items.into_iter().skip(k).collect()
    } else {
        items.into_iter().take(len - k).collect()
    }
}

fn take_or_power(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 0, -1, |a, b| {
        let n = a.atom()?;
        match b {
            Value::Atom(x) => Ok(n.with_value(x.value().pow(n.value())).into()),
            Value::Array(items) => Ok(Value::Array(take(items, n.to_i64()))),
        }
    })
}

fn last_or_sqrt(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    match a {
        Value::Atom(x) => {
            let v = x.value().to_f64();
            if v < 0.0 {
                return Err(VError::Domain("square root of a negative number").into());
            }
            Ok(x.with_value(Num::Real(v.sqrt())).into())
        }
        Value::Array(items) => items.into_iter().last().ok_or_else(|| VError::IndexEmpty.into()),
    }
}

fn drop_or_root(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 0, -1, |a, b| {
        let n = a.atom()?;
        match b {
            Value::Atom(x) => {
                if n.value().is_zero() {
                    return Err(VError::Domain("zeroth root").into());
                }
                let root = x.value().to_f64().powf(1.0 / n.value().to_f64());
                if root.is_nan() {
                    return Err(VError::Domain("root of a negative number").into());
                }
                Ok(n.with_value(Num::Real(root)).into())
            }
            Value::Array(items) => Ok(Value::Array(drop(items, n.to_i64()))),
        }
    })
}

/// Number of elements; for an atom, the number of its decimal digits.
fn length(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    Ok(match a {
        Value::Atom(x) => Value::num(digit_count(x) as i64),
        Value::Array(items) => Value::num(items.len() as i64),
    })
}

/// Each element of `b` repeated by the matching count in `a`.
fn replicate(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 1, -1, |a, b| {
        let items = b.into_list();
        let counts = match a {
            Value::Atom(_) => vec![a; items.len()],
            Value::Array(counts) => counts,
        };
        let mut res = Vec::new();
        for (count, item) in counts.iter().zip(items) {
            for _ in 0..count.to_i64()?.max(0) {
                res.push(item.clone());
            }
        }
        Ok(Value::Array(res))
    })
}

fn reverse(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    Ok(match a {
        Value::Array(mut items) => {
            items.reverse();
            Value::Array(items)
        }
        a => a,
    })
}

fn rotate(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 0, -1, |a, b| match b {
        Value::Array(mut items) if !items.is_empty() => {
            let k = a.to_i64()?.rem_euclid(items.len() as i64) as usize;
            items.rotate_left(k);
            Ok(Value::Array(items))
        }
        b => Ok(b),
    })
}

/// Each index repeated by its count.
fn mask_to_indices(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    threaded_unary(a, 1, |a| {
        let mut res = Vec::new();
        match a {
            Value::Atom(x) => res.resize(x.to_i64().max(0) as usize, 0),
            Value::Array(counts) => {
                for (i, count) in counts.iter().enumerate() {
                    for _ in 0..count.to_i64()?.max(0) {
                        res.push(i as i64);
                    }
                }
            }
        }
        Ok(Value::nums(&res))
    })
}

/// How many times each index from 0 up to the largest occurs.
fn indices_to_mask(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    threaded_unary(a, 1, |a| {
        let indices = a
            .into_list()
            .iter()
            .map(Value::to_i64)
            .collect::<Result<Vec<_>, _>>()?;
        let top = match indices.iter().max() {
            Some(&top) if top >= 0 => top,
            _ => return Ok(Value::nums(&[])),
        };
        let counts: Vec<i64> = (0..=top)
            .map(|i| indices.iter().filter(|&&n| n == i).count() as i64)
            .collect();
        Ok(Value::nums(&counts))
    })
}

/// `0, 1, ..., n-1` with the type of `n`; for a list of dimensions, that
/// range over their product arranged in those dimensions.
pub(super) fn range_of(a: Value) -> RResult<Value> {
    match a {
        Value::Atom(x) => Ok(Value::Array(
            (0..x.to_i64().max(0))
                .map(|i| x.with_value(Num::Int(i)).into())
                .collect(),
        )),
        Value::Array(_) => {
            let dims = dims_of(&a)?;
            let count = dims.iter().product::<usize>() as i64;
            let flat: Vec<i64> = (0..count).collect();
            Ok(Value::nums(&flat).reshape(&dims)?)
        }
    }
}

fn range(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    range_of(a)
}

/// Every integer from `a` to `b` inclusive, counting down when `b < a`.
fn inclusive_range(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    let pairs = pair_cells(a, b, 0, 0)?;
    threaded_unary(pairs, 1, |pair| {
        let ends = pair.into_list();
        let (from, to) = match ends.as_slice() {
            [from, to] => (from.atom()?, to.to_i64()?),
            _ => return Err(VError::NotAtom.into()),
        };
        let start = from.to_i64();
        let items: Vec<Value> = if start <= to {
            (start..=to).map(|i| from.with_value(Num::Int(i)).into()).collect()
        } else {
            (to..=start).rev().map(|i| from.with_value(Num::Int(i)).into()).collect()
        };
        Ok(Value::Array(items))
    })
}

fn flatten(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    Ok(Value::Array(a.flatten(0)))
}

fn append(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    let mut items = a.into_list();
    items.extend(b.into_list());
    Ok(Value::Array(items))
}

fn singleton(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    Ok(Value::Array(vec![a]))
}

fn pair(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    Ok(Value::Array(vec![a, b]))
}

fn shape(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    let dims: Vec<i64> = a.shape().into_iter().map(|d| d as i64).collect();
    Ok(Value::nums(&dims))
}

fn reshape(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 1, -1, |a, b| Ok(b.reshape(&dims_of(&a)?)?))
}

/// Paths to every atom, in reading order; an atom has the single path `0`.
pub(super) fn paths(a: &Value) -> Value {
    match a {
        Value::Atom(_) => Value::num(0),
        Value::Array(items) => {
            let mut res = Vec::new();
            for (i, item) in items.iter().enumerate() {
                let head = Value::num(i as i64);
                match item {
                    Value::Atom(_) => res.push(Value::Array(vec![head])),
                    _ => {
                        for sub in paths(item).into_list() {
                            let mut path = vec![head.clone()];
                            path.extend(sub.into_list());
                            res.push(Value::Array(path));
                        }
                    }
                }
            }
            Value::Array(res)
        }
    }
}

fn index_paths(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    Ok(paths(&a))
}

/// The element at index `i` of `x`, wrapping around.
fn pick(x: Value, i: i64) -> Result<Value, VError> {
    let mut items = x.into_list();
    if items.is_empty() {
        return Err(VError::IndexEmpty);
    }
    let i = i.rem_euclid(items.len() as i64) as usize;
    Ok(items.swap_remove(i))
}

/// Follows the path `path` into `x`, stopping early at an atom.
pub(super) fn index_into(path: &Value, x: Value) -> Result<Value, VError> {
    if x.is_atom() {
        return Ok(x);
    }
    match path {
        Value::Atom(i) => pick(x, i.to_i64()),
        Value::Array(_) => {
            let mut x = x;
            for i in path.clone().flatten(0) {
                if x.is_atom() {
                    break;
                }
                x = pick(x, i.to_i64()?)?;
            }
            Ok(x)
        }
    }
}

fn index(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, -2, -1, |a, b| Ok(index_into(&a, b)?))
}
