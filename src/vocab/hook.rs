//! Hooks `(` `)` and forks `[` `]`.
//!
//! All four build a pair out of an argument and the result of an inner
//! callable, then hand that pair to an outer callable (or just return it).
//! The parenthesis forms feed the inner callable a single argument, the
//! bracket forms feed it both.

use std::rc::Rc;

use crate::run::*;
use crate::val::*;

use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.op('(', Some(left_hook1), Some(left_hook));
    vocab.op(')', Some(right_hook1), Some(right_hook));
    vocab.op('[', Some(left_fork1), Some(left_fork));
    vocab.op(']', Some(right_fork1), Some(right_fork));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// The inner result goes on `side` of the pair; `outer` combines the pair,
/// or the pair itself is returned when there is none.
#[derive(Debug)]
struct Train {
    side: Side,
    fork: bool,
    inner: Fun,
    outer: Option<Fun>,
}

impl Train {
    fn finish(self: &Self, ctx: &mut dyn RunContext, x: Value, y: Value) -> RResult<Value> {
        match &self.outer {
            Some(outer) => outer.binary(ctx, x, y),
            None => Ok(Value::Array(vec![x, y])),
        }
    }
}

impl RFun for Train {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        let r = self.inner.unary(ctx, a.clone())?;
        match self.side {
            Side::Left => self.finish(ctx, r, a),
            Side::Right => self.finish(ctx, a, r),
        }
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        match (self.side, self.fork) {
            (Side::Left, false) => {
                let r = self.inner.unary(ctx, a)?;
                self.finish(ctx, r, b)
            }
            (Side::Right, false) => {
                let r = self.inner.unary(ctx, b)?;
                self.finish(ctx, a, r)
            }
            (Side::Left, true) => {
                let r = self.inner.binary(ctx, a, b.clone())?;
                self.finish(ctx, r, b)
            }
            (Side::Right, true) => {
                let r = self.inner.binary(ctx, a.clone(), b)?;
                self.finish(ctx, a, r)
            }
        }
    }
}

fn train1(glyph: char, side: Side, fork: bool, f: Operand) -> RResult<Fun> {
    Ok(Rc::new(Train {
        side,
        fork,
        inner: expect_fun(glyph, Arity::Unary, f)?,
        outer: None,
    }))
}

/// On the left, `f` is inner and `g` outer; on the right it is the reverse.
fn train2(glyph: char, side: Side, fork: bool, f: Operand, g: Operand) -> RResult<Fun> {
    let f = expect_fun(glyph, Arity::Binary, f)?;
    let g = expect_fun(glyph, Arity::Binary, g)?;
    let (inner, outer) = match side {
        Side::Left => (f, g),
        Side::Right => (g, f),
    };
    Ok(Rc::new(Train {
        side,
        fork,
        inner,
        outer: Some(outer),
    }))
}

fn left_hook1(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    train1('(', Side::Left, false, f)
}

fn left_hook(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    train2('(', Side::Left, false, f, g)
}

fn right_hook1(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    train1(')', Side::Right, false, f)
}

fn right_hook(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    train2(')', Side::Right, false, f, g)
}

fn left_fork1(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    train1('[', Side::Left, true, f)
}

fn left_fork(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    train2('[', Side::Left, true, f, g)
}

fn right_fork1(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    train1(']', Side::Right, true, f)
}

fn right_fork(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    train2(']', Side::Right, true, f, g)
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    fn n(x: i64) -> Value {
        Value::num(x)
    }

    #[test]
    fn unary_trains_build_pairs() {
        let mut ctx = runner("");
        let h = derive(&mut ctx, '(', Some(fun('-')), None);
        assert_eq!(h.unary(&mut ctx, n(2)).unwrap(), Value::nums(&[-2, 2]));
        assert_eq!(h.binary(&mut ctx, n(2), n(5)).unwrap(), Value::nums(&[-2, 5]));

        let h = derive(&mut ctx, ')', Some(fun('-')), None);
        assert_eq!(h.unary(&mut ctx, n(2)).unwrap(), Value::nums(&[2, -2]));
        assert_eq!(h.binary(&mut ctx, n(2), n(5)).unwrap(), Value::nums(&[2, -5]));

        let h = derive(&mut ctx, '[', Some(fun('+')), None);
        assert_eq!(h.binary(&mut ctx, n(2), n(5)).unwrap(), Value::nums(&[7, 5]));

        let h = derive(&mut ctx, ']', Some(fun('+')), None);
        assert_eq!(h.binary(&mut ctx, n(2), n(5)).unwrap(), Value::nums(&[2, 7]));
    }

    #[test]
    fn binary_hooks() {
        let mut ctx = runner("");
        // g(f a, b) with f = negate, g = pair
        let h = derive(&mut ctx, '(', Some(fun('-')), Some(fun(';')));
        assert_eq!(h.binary(&mut ctx, n(2), n(5)).unwrap(), Value::nums(&[-2, 5]));
        assert_eq!(h.unary(&mut ctx, n(2)).unwrap(), Value::nums(&[-2, 2]));

        // f(a, g b) with f = pair, g = negate
        let h = derive(&mut ctx, ')', Some(fun(';')), Some(fun('-')));
        assert_eq!(h.binary(&mut ctx, n(2), n(5)).unwrap(), Value::nums(&[2, -5]));
    }

    #[test]
    fn binary_forks() {
        let mut ctx = runner("");
        let h = derive(&mut ctx, '[', Some(fun('+')), Some(fun(';')));
        assert_eq!(h.binary(&mut ctx, n(2), n(5)).unwrap(), Value::nums(&[7, 5]));

        let h = derive(&mut ctx, ']', Some(fun(';')), Some(fun('*')));
        assert_eq!(h.binary(&mut ctx, n(2), n(5)).unwrap(), Value::nums(&[2, 10]));
        assert_eq!(h.unary(&mut ctx, n(-3)).unwrap(), Value::nums(&[-3, -1]));
    }

    #[test]
    fn values_are_rejected() {
        let mut ctx = runner("");
        let def = match lookup('(') {
            Some(Entry::Op(def)) => def,
            _ => unreachable!(),
        };
        let res = def.apply(&mut ctx, Arg::Present(val(n(1))), Arg::Present(fun('+')));
        assert!(matches!(
            res,
            Err(RError::Unimplemented {
                glyph: '(',
                arity: Arity::Binary,
                ..
            })
        ));
    }
}
