//! Argument selection, input and printing.

use log::debug;

use crate::atom::*;
use crate::run::*;
use crate::val::*;

use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.fun('{', Some(identity), Some(left));
    vocab.fun('}', Some(identity), Some(right));
    vocab.fun('j', Some(read_value), Some(convert_text));
    vocab.fun('J', Some(read_text), Some(read_raw));
    vocab.fun('p', Some(print_pretty), None);
    vocab.fun('P', Some(print_matrix), None);
}

fn identity(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    Ok(a)
}

fn left(_ctx: &mut dyn RunContext, a: Value, _b: Value) -> RResult<Value> {
    Ok(a)
}

fn right(_ctx: &mut dyn RunContext, _a: Value, b: Value) -> RResult<Value> {
    Ok(b)
}

fn read_value(ctx: &mut dyn RunContext, _a: Value) -> RResult<Value> {
    let line = ctx.read_line()?;
    Ok(parse_value(&line)?.0)
}

/// Positive `a` parses the character codes of `b`; otherwise `b` is
/// pretty-printed into a string.
fn convert_text(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, 0, -1, |a, b| {
        if a.atom()?.value() > Num::Int(0) {
            let text: String = b
                .atoms()
                .iter()
                .map(|atom| atom.with_ty(AtomTy::Char).with_value(atom.value().abs()).to_char())
                .collect();
            Ok(parse_value(&text)?.0)
        } else {
            Ok(Value::string(&pretty_print(&b)))
        }
    })
}

fn read_text(ctx: &mut dyn RunContext, _a: Value) -> RResult<Value> {
    Ok(Value::string(&ctx.read_line()?))
}

fn read_raw(ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    threaded_binary(a, b, -1, 0, |_, n| {
        let n = n.to_i64()?.max(0) as usize;
        Ok(Value::string(&ctx.read_chars(n)?))
    })
}

fn print_pretty(ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    let text = pretty_print(&a);
    debug!("PRINT {}", text);
    ctx.write_line(&text)?;
    Ok(a)
}

fn print_matrix(ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    ctx.write_line(&matrix_print(&a))?;
    Ok(a)
}
