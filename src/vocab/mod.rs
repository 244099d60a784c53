//! Built-in functions and operators, keyed by glyph.

pub use fun::*;
pub use registry::*;

mod fun;
mod registry;

mod arith;
mod combin;
mod compare;
mod io;
mod list;

mod compose;
mod fold;
mod hook;
mod modify;
mod rank;

use crate::run::*;
use crate::val::*;

/// Threads a fallible closure at the given rank.
fn threaded_unary(x: Value, rank: i64, mut f: impl FnMut(Value) -> RResult<Value>) -> RResult<Value> {
    thread_unary(x, rank, &mut f)
}

/// Threads a fallible closure at the given pair of ranks.
fn threaded_binary(
    a: Value,
    b: Value,
    left: i64,
    right: i64,
    mut f: impl FnMut(Value, Value) -> RResult<Value>,
) -> RResult<Value> {
    thread_binary(a, b, left, right, &mut f)
}

/// Applies `step` to `x` `n` times; non-positive counts give `x`.
fn iterate(ctx: &mut dyn RunContext, step: &dyn RFun, x: Value, n: i64) -> RResult<Value> {
    let mut x = x;
    for _ in 0..n {
        x = step.unary(ctx, x)?;
    }
    Ok(x)
}

/// Applies `step` until `done(prev, next)` is truthy, and returns that last
/// `next`.
fn iterate_until(ctx: &mut dyn RunContext, step: &dyn RFun, x: Value, done: &dyn RFun) -> RResult<Value> {
    let mut x = x;
    loop {
        let y = step.unary(ctx, x.clone())?;
        if done.binary(ctx, x, y.clone())?.is_truthy() {
            return Ok(y);
        }
        x = y;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Cursor;

    use crate::run::{RunContext, Runner};
    use crate::val::Value;

    use super::*;

    pub type TestRunner = Runner<Cursor<Vec<u8>>, Vec<u8>>;

    pub fn runner(input: &str) -> TestRunner {
        Runner::with_seed(Cursor::new(input.as_bytes().to_vec()), Vec::new(), 7)
    }

    pub fn fun(glyph: char) -> Operand {
        Operand::Fun(builtin(glyph).unwrap())
    }

    pub fn val(x: Value) -> Operand {
        Operand::Val(x)
    }

    fn arg(x: Option<Operand>) -> Arg {
        match x {
            Some(x) => Arg::Present(x),
            None => Arg::Absent,
        }
    }

    /// The callable operator `glyph` derives from the given operands.
    pub fn derive(ctx: &mut dyn RunContext, glyph: char, f: Option<Operand>, g: Option<Operand>) -> Fun {
        match lookup(glyph) {
            Some(Entry::Op(def)) => def.apply(ctx, arg(f), arg(g)).unwrap().unwrap(),
            _ => panic!("`{}` is not an operator", glyph),
        }
    }
}
