//! Rank-generalized application ("threading").
//!
//! A function threaded at rank `r` is applied to every sub-structure of depth
//! at most `r`, and the results are reassembled in the shape of the levels
//! above. Negative ranks are resolved once per argument with [`resolve_rank`].

use super::err::*;
use super::shape::*;
use super::val::*;

pub fn thread_unary<F, E>(x: Value, rank: i64, f: &mut F) -> Result<Value, E>
where
    F: FnMut(Value) -> Result<Value, E>,
{
    fn go<F, E>(x: Value, rank: usize, f: &mut F) -> Result<Value, E>
    where
        F: FnMut(Value) -> Result<Value, E>,
    {
        if x.depth() <= rank {
            return f(x);
        }
        match x {
            Value::Array(items) => items
                .into_iter()
                .map(|item| go(item, rank, f))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Atom(_) => f(x),
        }
    }

    let rank = resolve_rank(rank, x.depth());
    go(x, rank, f)
}

pub fn thread_binary<F, E>(a: Value, b: Value, left: i64, right: i64, f: &mut F) -> Result<Value, E>
where
    F: FnMut(Value, Value) -> Result<Value, E>,
    E: From<VError>,
{
    fn go<F, E>(a: Value, b: Value, left: usize, right: usize, f: &mut F) -> Result<Value, E>
    where
        F: FnMut(Value, Value) -> Result<Value, E>,
        E: From<VError>,
    {
        let items = match (a.depth() > left, b.depth() > right) {
            (false, false) => return f(a, b),
            (true, true) => {
                let (xs, ys) = (a.into_list(), b.into_list());
                if xs.len() != ys.len() {
                    return Err(VError::LengthMismatch {
                        left: xs.len(),
                        right: ys.len(),
                    }
                    .into());
                }
                xs.into_iter()
                    .zip(ys)
                    .map(|(x, y)| go(x, y, left, right, f))
                    .collect::<Result<Vec<_>, _>>()?
            }
            (true, false) => a
                .into_list()
                .into_iter()
                .map(|x| go(x, b.clone(), left, right, f))
                .collect::<Result<Vec<_>, _>>()?,
            (false, true) => b
                .into_list()
                .into_iter()
                .map(|y| go(a.clone(), y, left, right, f))
                .collect::<Result<Vec<_>, _>>()?,
        };
        Ok(Value::Array(items))
    }

    let left = resolve_rank(left, a.depth());
    let right = resolve_rank(right, b.depth());
    go(a, b, left, right, f)
}

/// Pairs up the cells of `a` and `b` at the given ranks.
pub fn pair_cells(a: Value, b: Value, left: i64, right: i64) -> Result<Value, VError> {
    thread_binary(a, b, left, right, &mut |x, y| Ok(Value::Array(vec![x, y])))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Value {
        Value::Array(vec![
            Value::nums(&[1, 2]),
            Value::Array(vec![Value::nums(&[3]), Value::nums(&[4, 5])]),
        ])
    }

    fn inc(x: Value) -> Result<Value, VError> {
        Ok(Value::num(x.to_i64()? + 1))
    }

    #[test]
    fn rank_zero_maps_atoms_and_keeps_shape() {
        let res = thread_unary(nested(), 0, &mut inc).unwrap();
        assert_eq!(
            res,
            Value::Array(vec![
                Value::nums(&[2, 3]),
                Value::Array(vec![Value::nums(&[4]), Value::nums(&[5, 6])]),
            ])
        );
    }

    #[test]
    fn rank_one_sees_vectors() {
        let mut lens = |x: Value| -> Result<Value, VError> {
            Ok(Value::num(x.into_list().len() as i64))
        };
        let res = thread_unary(nested(), 1, &mut lens).unwrap();
        assert_eq!(
            res,
            Value::Array(vec![Value::num(2), Value::nums(&[1, 2])])
        );
    }

    #[test]
    fn negative_rank_is_whole_argument() {
        let mut calls = 0;
        let mut count = |x: Value| -> Result<Value, VError> {
            calls += 1;
            Ok(x)
        };
        let res = thread_unary(nested(), -1, &mut count).unwrap();
        assert_eq!(res, nested());
        assert_eq!(calls, 1);
    }

    #[test]
    fn binary_broadcasts_atoms() {
        let mut add = |x: Value, y: Value| -> Result<Value, VError> {
            Ok(Value::num(x.to_i64()? + y.to_i64()?))
        };
        let res = thread_binary(Value::nums(&[1, 2]), Value::num(10), 0, 0, &mut add).unwrap();
        assert_eq!(res, Value::nums(&[11, 12]));
    }

    #[test]
    fn binary_length_mismatch_fails() {
        let res = pair_cells(Value::nums(&[1, 2]), Value::nums(&[1, 2, 3]), 0, 0);
        assert_eq!(res, Err(VError::LengthMismatch { left: 2, right: 3 }));
    }
}
