//! Callables and operator operands.

use std::fmt::{Debug, Error, Formatter};
use std::rc::Rc;

use crate::run::*;
use crate::val::*;

/// Something that can be called with one or two values.
///
/// Every built-in function and every callable produced by an operator
/// implements this trait; produced callables are plain structs holding their
/// captured operands.
pub trait RFun: Debug {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value>;
    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value>;
}

pub type Fun = Rc<dyn RFun>;

/// Calls `f` with whichever arguments are present: one selects the unary
/// form, two the binary form, none gives nothing.
pub fn invoke(
    f: &dyn RFun,
    ctx: &mut dyn RunContext,
    a: Option<Value>,
    b: Option<Value>,
) -> RResult<Option<Value>> {
    match (a, b) {
        (None, None) => Ok(None),
        (Some(a), None) | (None, Some(a)) => f.unary(ctx, a).map(Some),
        (Some(a), Some(b)) => f.binary(ctx, a, b).map(Some),
    }
}

/// A present operand of an operator.
#[derive(Debug, Clone)]
pub enum Operand {
    Val(Value),
    Fun(Fun),
}

/// An operator operand, possibly absent.
#[derive(Debug, Clone)]
pub enum Arg {
    Absent,
    Present(Operand),
}

impl Operand {
    /// A value becomes a constant callable.
    pub fn into_fun(self: Self) -> Fun {
        match self {
            Operand::Val(v) => Rc::new(Const { value: v }),
            Operand::Fun(f) => f,
        }
    }
}

/// Ignores its arguments.
#[derive(Debug)]
pub struct Const {
    pub value: Value,
}

impl RFun for Const {
    fn unary(self: &Self, _ctx: &mut dyn RunContext, _a: Value) -> RResult<Value> {
        Ok(self.value.clone())
    }

    fn binary(self: &Self, _ctx: &mut dyn RunContext, _a: Value, _b: Value) -> RResult<Value> {
        Ok(self.value.clone())
    }
}

/// `f` with its left argument fixed: `x -> f(a, x)`.
#[derive(Debug)]
pub struct BindLeft {
    pub f: Fun,
    pub a: Value,
}

impl RFun for BindLeft {
    fn unary(self: &Self, ctx: &mut dyn RunContext, x: Value) -> RResult<Value> {
        self.f.binary(ctx, self.a.clone(), x)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, _x: Value, y: Value) -> RResult<Value> {
        self.f.binary(ctx, self.a.clone(), y)
    }
}

/// Plain function pointer signatures of built-ins.
pub type UnaryFn = fn(&mut dyn RunContext, Value) -> RResult<Value>;
pub type BinaryFn = fn(&mut dyn RunContext, Value, Value) -> RResult<Value>;

/// A built-in function: a glyph and the forms it implements.
#[derive(Clone, Copy)]
pub struct FunDef {
    pub glyph: char,
    pub unary: Option<UnaryFn>,
    pub binary: Option<BinaryFn>,
}

impl Debug for FunDef {
    fn fmt(self: &Self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "FunDef({:?})", self.glyph)
    }
}

impl RFun for FunDef {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        match self.unary {
            Some(f) => f(ctx, a).map_err(|e| e.tagged(self.glyph, Arity::Unary)),
            None => Err(RError::unimplemented(self.glyph, Arity::Unary)),
        }
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        match self.binary {
            Some(f) => f(ctx, a, b).map_err(|e| e.tagged(self.glyph, Arity::Binary)),
            None => Err(RError::unimplemented(self.glyph, Arity::Binary)),
        }
    }
}

/// A built-in function as a shareable callable.
#[derive(Debug)]
pub struct Builtin {
    pub def: &'static FunDef,
}

impl RFun for Builtin {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        self.def.unary(ctx, a)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        self.def.binary(ctx, a, b)
    }
}

pub type OpUnaryFn = fn(&mut dyn RunContext, Operand) -> RResult<Fun>;
pub type OpBinaryFn = fn(&mut dyn RunContext, Operand, Operand) -> RResult<Fun>;

/// A combinator: builds a callable from one or two operands.
#[derive(Clone, Copy)]
pub struct OpDef {
    pub glyph: char,
    pub unary: Option<OpUnaryFn>,
    pub binary: Option<OpBinaryFn>,
}

impl Debug for OpDef {
    fn fmt(self: &Self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "OpDef({:?})", self.glyph)
    }
}

impl OpDef {
    /// Applies the operator to whichever operands are present; nothing when
    /// both are absent.
    pub fn apply(self: &Self, ctx: &mut dyn RunContext, left: Arg, right: Arg) -> RResult<Option<Fun>> {
        let (arity, res) = match (left, right) {
            (Arg::Absent, Arg::Absent) => return Ok(None),
            (Arg::Present(f), Arg::Absent) | (Arg::Absent, Arg::Present(f)) => (
                Arity::Unary,
                match self.unary {
                    Some(op) => op(ctx, f),
                    None => Err(RError::unimplemented(self.glyph, Arity::Unary)),
                },
            ),
            (Arg::Present(f), Arg::Present(g)) => (
                Arity::Binary,
                match self.binary {
                    Some(op) => op(ctx, f, g),
                    None => Err(RError::unimplemented(self.glyph, Arity::Binary)),
                },
            ),
        };
        let inner = res.map_err(|e| e.tagged(self.glyph, arity))?;
        Ok(Some(Rc::new(Derived {
            glyph: self.glyph,
            inner,
        })))
    }
}

/// A callable produced by an operator; attributes value-model failures
/// raised inside it to the operator's glyph.
#[derive(Debug)]
pub struct Derived {
    pub glyph: char,
    pub inner: Fun,
}

impl RFun for Derived {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        self.inner
            .unary(ctx, a)
            .map_err(|e| e.tagged(self.glyph, Arity::Unary))
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        self.inner
            .binary(ctx, a, b)
            .map_err(|e| e.tagged(self.glyph, Arity::Binary))
    }
}

/// The callable of a function operand, or an `Unimplemented` error naming
/// the operator when a value was given instead.
pub fn expect_fun(glyph: char, arity: Arity, f: Operand) -> RResult<Fun> {
    match f {
        Operand::Fun(f) => Ok(f),
        Operand::Val(_) => Err(RError::unimplemented_on_values(glyph, arity)),
    }
}
