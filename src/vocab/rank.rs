//! Rank and level operators: `` ` ``, `L` and `O`.

use std::rc::Rc;

use crate::run::*;
use crate::val::*;

use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.op('`', Some(thread_atoms), Some(thread_ranks));
    vocab.op('L', Some(levels1), Some(levels));
    vocab.op('O', Some(product_or_table), None);
}

/// `f` applied to cells of fixed rank.
#[derive(Debug)]
struct Threaded {
    f: Fun,
    sole: i64,
    left: i64,
    right: i64,
}

impl Threaded {
    fn new(f: Fun, ranks: Value) -> RResult<Threaded> {
        let (sole, right, left) = ranks.rank_triple()?;
        Ok(Threaded {
            f,
            sole,
            left,
            right,
        })
    }
}

impl RFun for Threaded {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        threaded_unary(a, self.sole, |x| self.f.unary(ctx, x))
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        threaded_binary(a, b, self.left, self.right, |x, y| self.f.binary(ctx, x, y))
    }
}

/// Ranks computed per call by `ranks`: a single rank from the unary result,
/// a rank triple from the binary one.
#[derive(Debug)]
struct DynThreaded {
    ranks: Fun,
    f: Fun,
}

impl RFun for DynThreaded {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        let rank = self.ranks.unary(ctx, a.clone())?.reshape(&[])?.to_i64()?;
        threaded_unary(a, rank, |x| self.f.unary(ctx, x))
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let (_, right, left) = self.ranks.binary(ctx, a.clone(), b.clone())?.rank_triple()?;
        threaded_binary(a, b, left, right, |x, y| self.f.binary(ctx, x, y))
    }
}

fn thread_atoms(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    Ok(Rc::new(Threaded::new(f.into_fun(), Value::num(0))?))
}

fn thread_ranks(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    Ok(match (f, g) {
        (f, Operand::Val(ranks)) => Rc::new(Threaded::new(f.into_fun(), ranks)?),
        (Operand::Val(ranks), Operand::Fun(g)) => Rc::new(Threaded::new(g, ranks)?),
        (Operand::Fun(ranks), Operand::Fun(f)) => Rc::new(DynThreaded { ranks, f }),
    })
}

/// `g` mapped over `a` flattened to each level of `levels`; the binary form
/// zips both arguments flattened to the left rank of each level triple.
#[derive(Debug)]
struct Levels {
    levels: Value,
    g: Fun,
}

impl RFun for Levels {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        threaded_unary(self.levels.clone(), 0, |level| {
            let cells = a.clone().flatten(level.to_i64()?);
            let res = cells
                .into_iter()
                .map(|x| self.g.unary(ctx, x))
                .collect::<RResult<Vec<_>>>()?;
            Ok(Value::Array(res))
        })
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        threaded_unary(self.levels.clone(), 1, |level| {
            let (_, _, left) = level.rank_triple()?;
            let xs = a.clone().flatten(left);
            let ys = b.clone().flatten(left);
            let res = xs
                .into_iter()
                .zip(ys)
                .map(|(x, y)| self.g.binary(ctx, x, y))
                .collect::<RResult<Vec<_>>>()?;
            Ok(Value::Array(res))
        })
    }
}

/// Levels computed per call by `f`.
#[derive(Debug)]
struct DynLevels {
    f: Fun,
    g: Fun,
}

impl RFun for DynLevels {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        let levels = self.f.unary(ctx, a.clone())?;
        Levels {
            levels,
            g: self.g.clone(),
        }
        .unary(ctx, a)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let levels = self.f.binary(ctx, a.clone(), b.clone())?;
        Levels {
            levels,
            g: self.g.clone(),
        }
        .binary(ctx, a, b)
    }
}

/// The argument itself, or both arguments as a pair.
#[derive(Debug)]
struct IdOrPair;

impl RFun for IdOrPair {
    fn unary(self: &Self, _ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        Ok(a)
    }

    fn binary(self: &Self, _ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        Ok(Value::Array(vec![a, b]))
    }
}

fn levels1(ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    match f {
        Operand::Val(_) => levels(ctx, f, Operand::Fun(Rc::new(IdOrPair))),
        Operand::Fun(g) => levels(ctx, Operand::Val(Value::num(0)), Operand::Fun(g)),
    }
}

fn levels(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    let g = g.into_fun();
    Ok(match f {
        Operand::Val(levels) => Rc::new(Levels { levels, g }),
        Operand::Fun(f) => Rc::new(DynLevels { f, g }),
    })
}

/// Every way of picking one element from each list in `factors`, in
/// reading order.
fn cartesian(factors: Vec<Vec<Value>>) -> Vec<Value> {
    let mut rows: Vec<Vec<Value>> = vec![vec![]];
    for factor in factors {
        let mut next = Vec::with_capacity(rows.len() * factor.len());
        for row in &rows {
            for x in &factor {
                let mut row = row.clone();
                row.push(x.clone());
                next.push(row);
            }
        }
        rows = next;
    }
    rows.into_iter().map(Value::Array).collect()
}

/// Unary: the cartesian product of the elements of the argument, each taken
/// as a list of its rank-`n` cells. Binary: the table pairing each rank-`n`
/// cell of `a` with each one of `b`.
#[derive(Debug)]
struct Product {
    n: Value,
}

impl RFun for Product {
    fn unary(self: &Self, _ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        threaded_unary(self.n.clone(), 0, |n| {
            let n = n.to_i64()?;
            let factors = a.clone().into_list().into_iter().map(|x| x.flatten(n)).collect();
            Ok(Value::Array(cartesian(factors)))
        })
    }

    fn binary(self: &Self, _ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        threaded_unary(self.n.clone(), 0, |n| {
            let n = n.to_i64()?;
            let ys = b.clone().flatten(n);
            let rows = a
                .clone()
                .flatten(n)
                .into_iter()
                .map(|x| {
                    Value::Array(
                        ys.iter()
                            .map(|y| Value::Array(vec![x.clone(), y.clone()]))
                            .collect(),
                    )
                })
                .collect();
            Ok(Value::Array(rows))
        })
    }
}

fn product_or_table(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    Ok(match f {
        Operand::Val(n) => Rc::new(Product { n }),
        Operand::Fun(f) => Rc::new(Threaded::new(f, Value::nums(&[-2, -2, -1]))?),
    })
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    fn matrix() -> Value {
        Value::Array(vec![Value::nums(&[1, 2]), Value::nums(&[3, 4])])
    }

    #[test]
    fn thread_at_atoms_is_identity_on_shape() {
        let mut ctx = runner("");
        let h = derive(&mut ctx, '`', Some(fun('{')), None);
        assert_eq!(h.unary(&mut ctx, matrix()).unwrap(), matrix());
    }

    #[test]
    fn rank_one_sums_rows() {
        let mut ctx = runner("");
        let sum = derive(&mut ctx, '/', Some(fun('+')), None);
        let h = derive(&mut ctx, '`', Some(Operand::Fun(sum)), Some(val(Value::num(1))));
        assert_eq!(h.unary(&mut ctx, matrix()).unwrap(), Value::nums(&[3, 7]));
    }

    #[test]
    fn binary_ranks_from_triple() {
        let mut ctx = runner("");
        // sole 0, right 1, left 0: pair each atom of a with the whole row b
        let h = derive(&mut ctx, '`', Some(val(Value::nums(&[0, 1, 0]))), Some(fun(';')));
        let res = h.binary(&mut ctx, Value::nums(&[1, 2]), Value::nums(&[7, 8])).unwrap();
        assert_eq!(
            res,
            Value::Array(vec![
                Value::Array(vec![Value::num(1), Value::nums(&[7, 8])]),
                Value::Array(vec![Value::num(2), Value::nums(&[7, 8])]),
            ])
        );
    }

    #[test]
    fn level_map_flattens_first() {
        let mut ctx = runner("");
        let h = derive(&mut ctx, 'L', Some(val(Value::num(0))), Some(fun('-')));
        assert_eq!(h.unary(&mut ctx, matrix()).unwrap(), Value::nums(&[-1, -2, -3, -4]));
        let h = derive(&mut ctx, 'L', Some(val(Value::num(1))), None);
        assert_eq!(h.unary(&mut ctx, matrix()).unwrap(), matrix());
    }

    #[test]
    fn level_zip_flattens_both_sides_at_left_rank() {
        let mut ctx = runner("");
        // sole 0, right 1, left 0: both sides become atoms
        let h = derive(&mut ctx, 'L', Some(val(Value::nums(&[0, 1, 0]))), Some(fun(';')));
        let res = h.binary(&mut ctx, Value::nums(&[1, 2]), matrix()).unwrap();
        assert_eq!(res, Value::Array(vec![Value::nums(&[1, 1]), Value::nums(&[2, 2])]));

        // sole 0, right 0, left 1: both sides become rows
        let h = derive(&mut ctx, 'L', Some(val(Value::nums(&[0, 0, 1]))), Some(fun(';')));
        let res = h.binary(&mut ctx, matrix(), matrix()).unwrap();
        assert_eq!(
            res,
            Value::Array(vec![
                Value::Array(vec![Value::nums(&[1, 2]), Value::nums(&[1, 2])]),
                Value::Array(vec![Value::nums(&[3, 4]), Value::nums(&[3, 4])]),
            ])
        );
    }

    #[test]
    fn cartesian_product() {
        let mut ctx = runner("");
        let h = derive(&mut ctx, 'O', Some(val(Value::num(0))), None);
        assert_eq!(
            h.unary(&mut ctx, matrix()).unwrap(),
            Value::Array(vec![
                Value::nums(&[1, 3]),
                Value::nums(&[1, 4]),
                Value::nums(&[2, 3]),
                Value::nums(&[2, 4]),
            ])
        );
    }

    #[test]
    fn table() {
        let mut ctx = runner("");
        let h = derive(&mut ctx, 'O', Some(val(Value::num(0))), None);
        let res = h.binary(&mut ctx, Value::nums(&[1, 2]), Value::nums(&[3])).unwrap();
        assert_eq!(
            res,
            Value::Array(vec![
                Value::Array(vec![Value::nums(&[1, 3])]),
                Value::Array(vec![Value::nums(&[2, 3])]),
            ])
        );
    }

    #[test]
    fn callable_product_threads_cells() {
        let mut ctx = runner("");
        let h = derive(&mut ctx, 'O', Some(fun(';')), None);
        let res = h.binary(&mut ctx, Value::nums(&[1, 2]), Value::nums(&[3, 4])).unwrap();
        assert_eq!(
            res,
            Value::Array(vec![
                Value::Array(vec![Value::nums(&[1, 2]), Value::num(3)]),
                Value::Array(vec![Value::nums(&[1, 2]), Value::num(4)]),
            ])
        );
    }
}
