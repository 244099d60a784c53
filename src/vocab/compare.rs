//! Comparison, set operations and sorting.

use crate::atom::*;
use crate::run::*;
use crate::val::*;

use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.fun('=', None, Some(equals));
    vocab.fun('<', Some(head_or_decrement), Some(less_than));
    vocab.fun('>', Some(tail_or_increment), Some(greater_than));
    vocab.fun('N', Some(not), Some(without));
    vocab.fun('c', Some(to_char), Some(member));
    vocab.fun('n', Some(to_num), Some(intersection));
    vocab.fun('u', Some(uniques_of), Some(union));
    vocab.fun('o', Some(sort), Some(sort_by));
}

fn truth(b: bool) -> Value {
    Value::num(b as i64)
}

fn equals(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    Ok(truth(a.is_atom() == b.is_atom() && a == b))
}

fn head_or_decrement(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    match a {
        Value::Atom(x) => Ok(x.with_value(x.value().sub(Num::Int(1))).into()),
        Value::Array(items) => items.into_iter().next().ok_or_else(|| VError::IndexEmpty.into()),
    }
}

fn tail_or_increment(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    match a {
        Value::Atom(x) => Ok(x.with_value(x.value().add(Num::Int(1))).into()),
        Value::Array(items) => Ok(Value::Array(items.into_iter().skip(1).collect())),
    }
}

/// Atoms sort before arrays.
fn less_than(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    Ok(truth(a < b))
}

fn greater_than(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    Ok(truth(a > b))
}

fn not(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    Ok(truth(!a.is_truthy()))
}

fn without(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    let b = b.into_list();
    Ok(Value::Array(a.into_list().into_iter().filter(|x| !b.contains(x)).collect()))
}

fn retype(a: Value, ty: AtomTy) -> RResult<Value> {
    threaded_unary(a, 0, |x| Ok(x.atom()?.with_ty(ty).into()))
}

fn to_char(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    retype(a, AtomTy::Char)
}

fn member(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    Ok(truth(b.into_list().contains(&a)))
}

fn to_num(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    retype(a, AtomTy::Num)
}

fn intersection(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    let b = b.into_list();
    Ok(Value::Array(a.into_list().into_iter().filter(|x| b.contains(x)).collect()))
}

fn uniques_of(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    Ok(Value::Array(uniques(a.into_list())))
}

fn union(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    let mut res = a.into_list();
    let extra: Vec<_> = uniques(b.into_list())
        .into_iter()
        .filter(|x| !res.contains(x))
        .collect();
    res.extend(extra);
    Ok(Value::Array(res))
}

fn sort(_ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
    let mut items = a.into_list();
    items.sort();
    Ok(Value::Array(items))
}

/// Sorts `b` by the keys `a`, cycled to the length of `b`; ties are broken by
/// the elements themselves.
fn sort_by(_ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
    let keys = match a {
        Value::Array(keys) if !keys.is_empty() => keys,
        a => vec![a],
    };
    let items = b.into_list();
    let mut pairs: Vec<(Value, Value)> = keys.into_iter().cycle().zip(items).collect();
    pairs.sort();
    Ok(Value::Array(pairs.into_iter().map(|(_, x)| x).collect()))
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn equality_respects_atom_ness() {
        let mut ctx = runner("");
        assert_eq!(equals(&mut ctx, Value::char('a'), Value::char('a')).unwrap(), Value::num(1));
        assert_eq!(equals(&mut ctx, Value::num(1), Value::nums(&[1])).unwrap(), Value::num(0));
        assert_eq!(equals(&mut ctx, Value::nums(&[1, 2]), Value::nums(&[1, 2])).unwrap(), Value::num(1));
    }

    #[test]
    fn atoms_are_less_than_arrays() {
        let mut ctx = runner("");
        assert_eq!(less_than(&mut ctx, Value::num(9), Value::nums(&[])).unwrap(), Value::num(1));
        assert_eq!(greater_than(&mut ctx, Value::num(9), Value::nums(&[])).unwrap(), Value::num(0));
        assert_eq!(less_than(&mut ctx, Value::char('z'), Value::num(0)).unwrap(), Value::num(1));
    }

    #[test]
    fn head_and_tail() {
        let mut ctx = runner("");
        assert_eq!(head_or_decrement(&mut ctx, Value::nums(&[4, 5])).unwrap(), Value::num(4));
        assert_eq!(head_or_decrement(&mut ctx, Value::num(4)).unwrap(), Value::num(3));
        assert!(head_or_decrement(&mut ctx, Value::nums(&[])).is_err());
        assert_eq!(tail_or_increment(&mut ctx, Value::nums(&[4, 5])).unwrap(), Value::nums(&[5]));
        assert_eq!(tail_or_increment(&mut ctx, Value::char('a')).unwrap(), Value::char('b'));
    }

    #[test]
    fn set_operations_keep_left_order() {
        let mut ctx = runner("");
        let a = Value::nums(&[3, 1, 2, 1]);
        let b = Value::nums(&[1, 4, 4]);
        assert_eq!(intersection(&mut ctx, a.clone(), b.clone()).unwrap(), Value::nums(&[1, 1]));
        assert_eq!(without(&mut ctx, a.clone(), b.clone()).unwrap(), Value::nums(&[3, 2]));
        assert_eq!(union(&mut ctx, a.clone(), b).unwrap(), Value::nums(&[3, 1, 2, 1, 4]));
        assert_eq!(uniques_of(&mut ctx, a).unwrap(), Value::nums(&[3, 1, 2]));
        assert_eq!(member(&mut ctx, Value::num(2), Value::num(2)).unwrap(), Value::num(1));
    }

    #[test]
    fn sorts_by_keys() {
        let mut ctx = runner("");
        let res = sort_by(&mut ctx, Value::nums(&[2, 0, 1]), Value::string("abc")).unwrap();
        assert_eq!(res, Value::string("bca"));
        let res = sort(&mut ctx, Value::nums(&[3, 1, 2])).unwrap();
        assert_eq!(res, Value::nums(&[1, 2, 3]));
    }

    #[test]
    fn char_conversion() {
        let mut ctx = runner("");
        assert_eq!(to_char(&mut ctx, Value::nums(&[104, 105])).unwrap(), Value::string("hi"));
        assert_eq!(to_num(&mut ctx, Value::char('A')).unwrap(), Value::num(65));
    }
}
