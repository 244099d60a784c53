//! Folds, joins, choice, windows and iteration: `/` and `\`.

use std::rc::Rc;

use crate::run::*;
use crate::val::*;

use super::list::index_into;
use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.op('/', Some(join_or_fold), Some(choice));
    vocab.op('\\', Some(windows), Some(iteration));
}

/// Joins `times` levels; the binary form first intersperses `a` between the
/// elements of `b`.
#[derive(Debug)]
struct Join {
    times: Value,
}

impl RFun for Join {
    fn unary(self: &Self, _ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        threaded_unary(self.times.clone(), 0, |t| Ok(a.clone().join_times(t.to_i64()?)))
    }

    fn binary(self: &Self, _ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let joined = intersperse(a, b);
        threaded_unary(self.times.clone(), 0, |t| Ok(joined.clone().join_times(t.to_i64()?)))
    }
}

/// Left fold. An empty array folds to 0 and an atom to itself; the binary
/// form seeds the fold with `a`.
#[derive(Debug)]
struct Fold {
    f: Fun,
}

impl RFun for Fold {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        let mut items = match a {
            Value::Atom(_) => return Ok(a),
            Value::Array(items) => items.into_iter(),
        };
        let mut acc = match items.next() {
            Some(first) => first,
            None => return Ok(Value::num(0)),
        };
        for x in items {
            acc = self.f.binary(ctx, acc, x)?;
        }
        Ok(acc)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        match b {
            Value::Atom(_) => self.f.binary(ctx, a, b),
            Value::Array(items) => {
                let mut acc = a;
                for x in items {
                    acc = self.f.binary(ctx, acc, x)?;
                }
                Ok(acc)
            }
        }
    }
}

fn join_or_fold(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    Ok(match f {
        Operand::Val(times) => Rc::new(Join { times }),
        Operand::Fun(f) => Rc::new(Fold { f }),
    })
}

/// Conditional selection; which of the operands and arguments act as the
/// condition depends on which operands are values.
#[derive(Debug)]
struct Choice {
    f: Operand,
    g: Operand,
}

impl RFun for Choice {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        match (&self.f, &self.g) {
            (Operand::Val(x), Operand::Val(y)) => Ok(if a.is_truthy() { x } else { y }.clone()),
            (Operand::Val(c), Operand::Fun(g)) => {
                if c.is_truthy() {
                    g.unary(ctx, a)
                } else {
                    Ok(a)
                }
            }
            (Operand::Fun(f), Operand::Val(y)) => {
                if a.is_truthy() {
                    f.unary(ctx, y.clone())
                } else {
                    Ok(y.clone())
                }
            }
            (Operand::Fun(f), Operand::Fun(g)) => {
                if f.unary(ctx, a.clone())?.is_truthy() {
                    g.unary(ctx, a)
                } else {
                    Ok(a)
                }
            }
        }
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        match (&self.f, &self.g) {
            (Operand::Val(x), Operand::Val(y)) => {
                let pick = if a.is_truthy() { x } else { y };
                Ok(Value::Array(vec![pick.clone(), b]))
            }
            (Operand::Val(c), Operand::Fun(g)) => {
                if c.is_truthy() {
                    g.unary(ctx, b)
                } else {
                    g.unary(ctx, a)
                }
            }
            (Operand::Fun(f), Operand::Val(y)) => {
                if a.is_truthy() {
                    f.unary(ctx, b)
                } else {
                    Ok(y.clone())
                }
            }
            (Operand::Fun(f), Operand::Fun(g)) => {
                if a.is_truthy() {
                    f.unary(ctx, b)
                } else {
                    g.unary(ctx, b)
                }
            }
        }
    }
}

fn choice(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    Ok(Rc::new(Choice { f, g }))
}

/// Length-`n` windows of the argument; the binary form selects, cell by
/// cell, from `a` or `b` by the parity of `n`.
#[derive(Debug)]
struct Infixes {
    n: Value,
}

impl RFun for Infixes {
    fn unary(self: &Self, _ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        threaded_unary(self.n.clone(), 0, |n| Ok(Value::Array(a.clone().infixes(n.to_i64()?))))
    }

    fn binary(self: &Self, _ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let pairs = pair_cells(a, b, -2, -2)?;
        threaded_binary(pairs, self.n.clone(), 1, 0, |pair, n| {
            let side = n.to_i64()?.rem_euclid(2);
            Ok(index_into(&Value::num(side), pair)?)
        })
    }
}

/// `f` over each prefix; the binary form maps `f` over the length-`a`
/// windows of `b`.
#[derive(Debug)]
struct Prefixes {
    f: Fun,
}

impl RFun for Prefixes {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        let res = a
            .prefixes()
            .into_iter()
            .map(|p| self.f.unary(ctx, p))
            .collect::<RResult<Vec<_>>>()?;
        Ok(Value::Array(res))
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        threaded_binary(a, b, 0, -1, |n, b| {
            let res = b
                .infixes(n.to_i64()?)
                .into_iter()
                .map(|w| self.f.unary(ctx, w))
                .collect::<RResult<Vec<_>>>()?;
            Ok(Value::Array(res))
        })
    }
}

fn windows(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    Ok(match f {
        Operand::Val(n) => Rc::new(Infixes { n }),
        Operand::Fun(f) => Rc::new(Prefixes { f }),
    })
}

/// Iterates `step` from the argument, collecting every value, until it
/// produces `target`. The binary form steps with `x -> step(a, x)` from `b`.
#[derive(Debug)]
struct IterateTo {
    target: Value,
    step: Fun,
}

impl IterateTo {
    fn run(self: &Self, ctx: &mut dyn RunContext, step: &dyn RFun, x: Value) -> RResult<Value> {
        let mut seen = vec![x.clone()];
        let mut x = x;
        loop {
            x = step.unary(ctx, x)?;
            seen.push(x.clone());
            if x == self.target {
                return Ok(Value::Array(seen));
            }
        }
    }
}

impl RFun for IterateTo {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        self.run(ctx, &*self.step, a)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let step = BindLeft {
            f: self.step.clone(),
            a,
        };
        self.run(ctx, &step, b)
    }
}

/// Applies `step` a fixed number of times, once per atom of `count`.
#[derive(Debug)]
struct IterateTimes {
    step: Fun,
    count: Value,
}

impl RFun for IterateTimes {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        threaded_unary(self.count.clone(), 0, |n| iterate(ctx, &*self.step, a.clone(), n.to_i64()?))
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let step = BindLeft {
            f: self.step.clone(),
            a,
        };
        threaded_unary(self.count.clone(), 0, |n| iterate(ctx, &step, b.clone(), n.to_i64()?))
    }
}

/// Applies `step` until `done(prev, next)` holds.
#[derive(Debug)]
struct IterateWhile {
    step: Fun,
    done: Fun,
}

impl RFun for IterateWhile {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        iterate_until(ctx, &*self.step, a, &*self.done)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let step = BindLeft {
            f: self.step.clone(),
            a,
        };
        iterate_until(ctx, &step, b, &*self.done)
    }
}

fn iteration(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    match (f, g) {
        (Operand::Val(_), Operand::Val(_)) => Err(RError::unimplemented_on_values('\\', Arity::Binary)),
        (Operand::Val(target), Operand::Fun(step)) => Ok(Rc::new(IterateTo { target, step })),
        (Operand::Fun(step), Operand::Val(count)) => Ok(Rc::new(IterateTimes { step, count })),
        (Operand::Fun(step), Operand::Fun(done)) => Ok(Rc::new(IterateWhile { step, done })),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn folds() {
        let mut ctx = runner("");
        let sum = derive(&mut ctx, '/', Some(fun('+')), None);
        assert_eq!(sum.unary(&mut ctx, Value::nums(&[1, 2, 3, 4])).unwrap(), Value::num(10));
        assert_eq!(sum.unary(&mut ctx, Value::nums(&[])).unwrap(), Value::num(0));
        assert_eq!(sum.unary(&mut ctx, Value::num(5)).unwrap(), Value::num(5));
        assert_eq!(sum.binary(&mut ctx, Value::num(10), Value::nums(&[1, 2])).unwrap(), Value::num(13));
    }

    #[test]
    fn joins() {
        let mut ctx = runner("");
        let words = Value::Array(vec![Value::string("ab"), Value::string("c")]);
        let join = derive(&mut ctx, '/', Some(val(Value::num(1))), None);
        assert_eq!(join.unary(&mut ctx, words.clone()).unwrap(), Value::string("abc"));
        assert_eq!(
            join.binary(&mut ctx, Value::char(','), words).unwrap(),
            Value::string("ab,c")
        );
    }

    #[test]
    fn choices() {
        let mut ctx = runner("");
        let pick = derive(&mut ctx, '/', Some(val(Value::num(1))), Some(val(Value::num(2))));
        assert_eq!(pick.unary(&mut ctx, Value::num(0)).unwrap(), Value::num(2));
        assert_eq!(pick.binary(&mut ctx, Value::num(7), Value::num(9)).unwrap(), Value::nums(&[1, 9]));

        let abs_if_neg = derive(&mut ctx, '/', Some(fun('*')), Some(fun('-')));
        assert_eq!(abs_if_neg.unary(&mut ctx, Value::num(-3)).unwrap(), Value::num(3));
        assert_eq!(abs_if_neg.unary(&mut ctx, Value::num(0)).unwrap(), Value::num(0));
    }

    #[test]
    fn prefixes_and_windows() {
        let mut ctx = runner("");
        let sums = derive(&mut ctx, '\\', Some(fun('#')), None);
        assert_eq!(sums.unary(&mut ctx, Value::nums(&[5, 5, 5])).unwrap(), Value::nums(&[1, 2, 3]));
        assert_eq!(
            sums.binary(&mut ctx, Value::num(2), Value::nums(&[5, 5, 5])).unwrap(),
            Value::nums(&[2, 2])
        );
        let pairs = derive(&mut ctx, '\\', Some(val(Value::num(2))), None);
        assert_eq!(
            pairs.unary(&mut ctx, Value::nums(&[1, 2, 3])).unwrap(),
            Value::Array(vec![Value::nums(&[1, 2]), Value::nums(&[2, 3])])
        );
    }

    #[test]
    fn parity_select() {
        let mut ctx = runner("");
        let sel = derive(&mut ctx, '\\', Some(val(Value::nums(&[0, 1, 0]))), None);
        let res = sel.binary(&mut ctx, Value::nums(&[1, 2, 3]), Value::nums(&[7, 8, 9])).unwrap();
        assert_eq!(res, Value::nums(&[1, 8, 3]));
    }

    #[test]
    fn iterate_counts_and_fixed_points() {
        let mut ctx = runner("");
        let twice = derive(&mut ctx, '\\', Some(fun('>')), Some(val(Value::num(2))));
        assert_eq!(twice.unary(&mut ctx, Value::num(0)).unwrap(), Value::num(2));
        let add_twice = derive(&mut ctx, '\\', Some(fun('+')), Some(val(Value::num(2))));
        assert_eq!(add_twice.binary(&mut ctx, Value::num(3), Value::num(1)).unwrap(), Value::num(7));

        let halve = derive(&mut ctx, '~', Some(val(Value::num(2))), Some(fun('%')));
        let step = derive(&mut ctx, '&', Some(fun('m')), Some(Operand::Fun(halve)));
        let fixed = derive(&mut ctx, '\\', Some(Operand::Fun(step)), Some(fun('=')));
        assert_eq!(fixed.unary(&mut ctx, Value::num(37)).unwrap(), Value::num(0));
    }

    #[test]
    fn iterate_to_target_collects() {
        let mut ctx = runner("");
        let count = derive(&mut ctx, '\\', Some(val(Value::num(3))), Some(fun('>')));
        assert_eq!(count.unary(&mut ctx, Value::num(0)).unwrap(), Value::nums(&[0, 1, 2, 3]));
    }
}
