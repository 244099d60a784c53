//! Index-directed modification `Z`.

use std::rc::Rc;

use crate::run::*;
use crate::val::*;

use super::list::index_into;
use super::registry::Vocab;
use super::*;

pub(super) fn register(vocab: &mut Vocab) {
    vocab.op('Z', None, Some(modify));
}

/// `indices` derives index paths from the argument and `update` maps the
/// values found there; the result is a copy of the argument with only those
/// positions replaced.
#[derive(Debug)]
struct Modify {
    indices: Fun,
    update: Fun,
}

impl RFun for Modify {
    fn unary(self: &Self, ctx: &mut dyn RunContext, a: Value) -> RResult<Value> {
        modify_at(ctx, &*self.indices, &*self.update, a)
    }

    fn binary(self: &Self, ctx: &mut dyn RunContext, a: Value, b: Value) -> RResult<Value> {
        let indices = BindLeft {
            f: self.indices.clone(),
            a: a.clone(),
        };
        let update = BindLeft {
            f: self.update.clone(),
            a,
        };
        modify_at(ctx, &indices, &update, b)
    }
}

fn modify(_ctx: &mut dyn RunContext, f: Operand, g: Operand) -> RResult<Fun> {
    Ok(Rc::new(Modify {
        indices: f.into_fun(),
        update: g.into_fun(),
    }))
}

/// The values at `indices`, one per index, picked the way `@` does.
fn gather(indices: &Value, x: &Value) -> Result<Value, VError> {
    thread_binary(indices.clone(), x.clone(), -2, -1, &mut |i, x| index_into(&i, x))
}

fn modify_at(ctx: &mut dyn RunContext, indices: &dyn RFun, update: &dyn RFun, a: Value) -> RResult<Value> {
    let ind = indices.unary(ctx, a.clone())?;
    let found = gather(&ind, &a)?;
    let new = update.unary(ctx, found)?;

    let (paths, new) = match ind {
        Value::Atom(_) => (vec![ind], vec![new]),
        Value::Array(paths) => match new {
            Value::Atom(_) => {
                let new = vec![new; paths.len()];
                (paths, new)
            }
            Value::Array(new) => (paths, new),
        },
    };

    // `a` is an owned copy; patching it leaves the caller's value intact.
    let mut res = a;
    for (path, item) in paths.into_iter().zip(new) {
        if res.is_atom() {
            res = item;
            continue;
        }
        let coords: Vec<i64> = path
            .flatten(0)
            .iter()
            .map(Value::to_i64)
            .collect::<Result<_, _>>()?;
        assign(&mut res, &coords, item)?;
    }
    Ok(res)
}

/// Replaces the element reached by following `path` through `target`,
/// wrapping each coordinate. The walk stops at the first atom, which is then
/// the element replaced; an empty path replaces the first element.
fn assign(target: &mut Value, path: &[i64], item: Value) -> Result<(), VError> {
    let path: &[i64] = if path.is_empty() { &[0] } else { path };
    let mut resolved = Vec::with_capacity(path.len());
    let mut focus = &*target;
    for &coord in path {
        let items = match focus {
            Value::Array(items) => items,
            Value::Atom(_) => return Err(VError::IndexAtom),
        };
        if items.is_empty() {
            return Err(VError::IndexEmpty);
        }
        let i = coord.rem_euclid(items.len() as i64) as usize;
        resolved.push(i);
        focus = &items[i];
        if focus.is_atom() {
            break;
        }
    }

    let mut slot = target;
    for &i in &resolved {
        slot = match slot {
            Value::Array(items) => &mut items[i],
            Value::Atom(_) => return Err(VError::IndexAtom),
        };
    }
    *slot = item;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    fn matrix() -> Value {
        Value::Array(vec![Value::nums(&[1, 2]), Value::nums(&[3, 4])])
    }

    #[test]
    fn modifies_single_index() {
        let mut ctx = runner("");
        let h = derive(&mut ctx, 'Z', Some(val(Value::num(1))), Some(fun('-')));
        assert_eq!(h.unary(&mut ctx, Value::nums(&[1, 2, 3])).unwrap(), Value::nums(&[1, -2, 3]));
    }

    #[test]
    fn modifies_paths_with_broadcast_value() {
        let mut ctx = runner("");
        let paths = Value::Array(vec![Value::nums(&[0, 1]), Value::nums(&[1, 0])]);
        let h = derive(&mut ctx, 'Z', Some(val(paths)), Some(val(Value::num(0))));
        assert_eq!(
            h.unary(&mut ctx, matrix()).unwrap(),
            Value::Array(vec![Value::nums(&[1, 0]), Value::nums(&[0, 4])])
        );
    }

    #[test]
    fn paths_stop_at_atoms() {
        let mut target = Value::nums(&[5, 6]);
        assign(&mut target, &[1, 3, 3], Value::num(0)).unwrap();
        assert_eq!(target, Value::nums(&[5, 0]));
        let mut empty = Value::Array(vec![Value::nums(&[])]);
        assert_eq!(assign(&mut empty, &[0, 0], Value::num(1)), Err(VError::IndexEmpty));
    }

    #[test]
    fn binary_curries_left_argument() {
        let mut ctx = runner("");
        // indices: {(a, x) -> a}; update: +(a, found)
        let h = derive(&mut ctx, 'Z', Some(fun('{')), Some(fun('+')));
        let res = h.binary(&mut ctx, Value::num(2), Value::nums(&[10, 20, 30])).unwrap();
        assert_eq!(res, Value::nums(&[10, 20, 32]));
    }

    #[test]
    fn input_is_not_aliased() {
        let mut ctx = runner("");
        let original = matrix();
        let h = derive(&mut ctx, 'Z', Some(val(Value::num(0))), Some(val(Value::num(9))));
        let res = h.unary(&mut ctx, original.clone()).unwrap();
        assert_eq!(res, Value::Array(vec![Value::num(9), Value::nums(&[3, 4])]));
        assert_eq!(original, matrix());
    }
}
