//! Constants, flips and composition: `_`, `~` and `&`.

use std::rc::Rc;

use crate::run::*;
use crate::val::*;

use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.op('_', Some(identity), Some(apply));
    vocab.op('~', Some(const_or_flip), Some(curry_or_precompose));
    vocab.op('&', Some(self_apply), Some(two_sided_or_postcompose));
}

fn identity(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    expect_fun('_', Arity::Unary, f)
}

/// A value operand is applied to the callable one right away.
fn apply(ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    match (f, g) {
        (Operand::Val(_), Operand::Val(_)) => Err(RError::unimplemented_on_values('_', Arity::Binary)),
        (Operand::Val(x), Operand::Fun(g)) => Ok(Rc::new(Const {
            value: g.unary(ctx, x)?,
        })),
        (Operand::Fun(f), Operand::Val(x)) => Ok(Rc::new(Const {
            value: f.unary(ctx, x)?,
        })),
        (Operand::Fun(f), Operand::Fun(_)) => Ok(f),
    }
}

/// `f` with its arguments swapped.
#[derive(Debug)]
struct Flip {
    f: Fun,
}

impl RFun for Flip {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        self.f.unary(ctx, a)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        self.f.binary(ctx, b, a)
    }
}

fn const_or_flip(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    Ok(match f {
        Operand::Val(value) => Rc::new(Const { value }),
        Operand::Fun(f) => Rc::new(Flip { f }),
    })
}

/// `f` with its right argument fixed: `x -> f(x, b)`.
#[derive(Debug)]
struct BindRight {
    f: Fun,
    b: Value,
}

impl RFun for BindRight {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        self.f.binary(ctx, a, self.b.clone())
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, _b: Value) -> RResult<Value> {
        self.f.binary(ctx, a, self.b.clone())
    }
}

/// `x -> g(f x)`, and `(x, y) -> f(g x, g y)`.
#[derive(Debug)]
struct Over {
    f: Fun,
    g: Fun,
}

impl RFun for Over {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        let x = self.f.unary(ctx, a)?;
        self.g.unary(ctx, x)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let x = self.g.unary(ctx, a)?;
        let y = self.g.unary(ctx, b)?;
        self.f.binary(ctx, x, y)
    }
}

fn curry_or_precompose(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    Ok(match (f, g) {
        (Operand::Val(x), Operand::Val(y)) => Rc::new(Const {
            value: Value::Array(vec![x, y]),
        }),
        (Operand::Val(a), Operand::Fun(g)) => Rc::new(BindLeft { f: g, a }),
        (Operand::Fun(f), Operand::Val(b)) => Rc::new(BindRight { f, b }),
        (Operand::Fun(f), Operand::Fun(g)) => Rc::new(Over { f, g }),
    })
}

/// `x -> f(x, x)`, and `(x, y) -> f y`.
#[derive(Debug)]
struct SelfApply {
    f: Fun,
}

impl RFun for SelfApply {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        self.f.binary(ctx, a.clone(), a)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, _a: Value, b: Value) -> RResult<Value> {
        self.f.unary(ctx, b)
    }
}

fn self_apply(_ctx: &mut dyn RunContext, f: Operand) -> RResult<Fun> {
    let f = expect_fun('&', Arity::Unary, f)?;
    Ok(Rc::new(SelfApply { f }))
}

/// Wraps an argument in `h` on both sides with a fixed value `v`: with the
/// value on the left, `x -> h(v, h(x, v))`; on the right,
/// `x -> h(h(v, x), v)`. The binary form applies that `a` times to `b`.
#[derive(Debug)]
struct TwoSided {
    h: Fun,
    v: Value,
    value_left: bool,
}

impl RFun for TwoSided {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        let v = self.v.clone();
        if self.value_left {
            let inner = self.h.binary(ctx, a, v.clone())?;
            self.h.binary(ctx, v, inner)
        } else {
            let inner = self.h.binary(ctx, v.clone(), a)?;
            self.h.binary(ctx, inner, v)
        }
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        iterate(ctx, self, b, a.to_i64()?)
    }
}

/// `x -> f(g x)`, and `(x, y) -> f(g(x, y))`.
#[derive(Debug)]
struct Compose {
    f: Fun,
    g: Fun,
}

impl RFun for Compose {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        let x = self.g.unary(ctx, a)?;
        self.f.unary(ctx, x)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let x = self.g.binary(ctx, a, b)?;
        self.f.unary(ctx, x)
    }
}

fn two_sided_or_postcompose(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    match (f, g) {
        (Operand::Val(_), Operand::Val(_)) => Err(RError::unimplemented_on_values('&', Arity::Binary)),
        (Operand::Val(v), Operand::Fun(h)) => Ok(Rc::new(TwoSided {
            h,
            v,
            value_left: true,
        })),
        (Operand::Fun(h), Operand::Val(v)) => Ok(Rc::new(TwoSided {
            h,
            v,
            value_left: false,
        })),
        (Operand::Fun(f), Operand::Fun(g)) => Ok(Rc::new(Compose { f, g })),
    }
}
