//! Structural operations: depth, flattening, shape and reshaping, joins.

use crate::atom::*;

use super::err::*;
use super::val::*;

/// Turns a possibly negative rank into a depth.
///
/// Non-negative ranks are depths. Negative ranks count up from `depth`:
/// `-1` is `depth` itself, `-2` one level below, and so on, never below 0.
pub fn resolve_rank(rank: i64, depth: usize) -> usize {
    if rank >= 0 {
        rank as usize
    } else {
        (depth as i64 + 1 + rank).max(0) as usize
    }
}

impl Value {
    /// Nesting depth: 0 for atoms, one more than the deepest element for arrays.
    pub fn depth(self: &Self) -> usize {
        match self {
            Value::Atom(_) => 0,
            Value::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
        }
    }

    /// Collapses nesting until every element has depth at most `depth`.
    pub fn flatten(self: Self, depth: i64) -> Vec<Value> {
        fn go(x: Value, depth: usize, out: &mut Vec<Value>) {
            match x {
                Value::Array(items) if x_depth(&items) > depth => {
                    for item in items {
                        go(item, depth, out)
                    }
                }
                x => out.push(x),
            }
        }

        fn x_depth(items: &[Value]) -> usize {
            1 + items.iter().map(Value::depth).max().unwrap_or(0)
        }

        let depth = resolve_rank(depth, self.depth());
        let mut out = Vec::new();
        go(self, depth, &mut out);
        out
    }

    /// All atoms, in reading order.
    pub fn atoms(self: &Self) -> Vec<Atom> {
        fn go(x: &Value, out: &mut Vec<Atom>) {
            match x {
                Value::Atom(atom) => out.push(*atom),
                Value::Array(items) => items.iter().for_each(|item| go(item, out)),
            }
        }

        let mut out = Vec::new();
        go(self, &mut out);
        out
    }

    /// Lengths along the first element at each level.
    pub fn shape(self: &Self) -> Vec<usize> {
        let mut dims = Vec::new();
        let mut cur = self;
        while let Value::Array(items) = cur {
            dims.push(items.len());
            match items.first() {
                Some(first) => cur = first,
                None => break,
            }
        }
        dims
    }

    /// Arranges the atoms of `self`, cycled as needed, into an array of the
    /// given dimensions. Empty `dims` gives the first atom.
    pub fn reshape(self: &Self, dims: &[usize]) -> Result<Value, VError> {
        fn build(dims: &[usize], atoms: &[Atom], next: &mut usize) -> Value {
            match dims.split_first() {
                None => {
                    let atom = atoms[*next % atoms.len()];
                    *next += 1;
                    Value::Atom(atom)
                }
                Some((&len, rest)) => {
                    Value::Array((0..len).map(|_| build(rest, atoms, next)).collect())
                }
            }
        }

        let atoms = self.atoms();
        if atoms.is_empty() && dims.iter().all(|&d| d > 0) {
            return Err(VError::EmptyReshape);
        }
        if atoms.is_empty() {
            return Ok(build(dims, &[Atom::num(0)], &mut 0));
        }
        Ok(build(dims, &atoms, &mut 0))
    }

    /// The first three atoms of a rank specification, cycled:
    /// `(sole, right, left)`.
    pub fn rank_triple(self: &Self) -> Result<(i64, i64, i64), VError> {
        match self.reshape(&[3])? {
            Value::Array(items) => Ok((items[0].to_i64()?, items[1].to_i64()?, items[2].to_i64()?)),
            Value::Atom(_) => unreachable!(),
        }
    }

    /// Concatenates the elements of an array, treating atoms as singletons.
    pub fn join(self: Self) -> Value {
        match self {
            Value::Atom(_) => self,
            Value::Array(items) => {
                Value::Array(items.into_iter().flat_map(Value::into_list).collect())
            }
        }
    }

    /// Joins `times` times; negative counts are resolved against the depth.
    pub fn join_times(self: Self, times: i64) -> Value {
        let times = resolve_rank(times, self.depth());
        let mut x = self;
        for _ in 0..times {
            if x.depth() <= 1 {
                break;
            }
            x = x.join();
        }
        x
    }

    /// Non-empty prefixes, shortest first.
    pub fn prefixes(self: Self) -> Vec<Value> {
        let items = self.into_list();
        (1..=items.len())
            .map(|n| Value::Array(items[..n].to_vec()))
            .collect()
    }

    /// Overlapping windows of length `n`, or for negative `n` consecutive
    /// chunks of length `-n` (the last may be shorter).
    pub fn infixes(self: Self, n: i64) -> Vec<Value> {
        let items = self.into_list();
        if n > 0 {
            items
                .windows(n as usize)
                .map(|w| Value::Array(w.to_vec()))
                .collect()
        } else if n < 0 {
            items
                .chunks(n.unsigned_abs() as usize)
                .map(|c| Value::Array(c.to_vec()))
                .collect()
        } else {
            vec![]
        }
    }
}

/// `items` with `sep` between each pair of elements.
pub fn intersperse(sep: Value, items: Value) -> Value {
    let mut res = Vec::new();
    for (i, item) in items.into_list().into_iter().enumerate() {
        if i > 0 {
            res.push(sep.clone());
        }
        res.push(item);
    }
    Value::Array(res)
}

/// Dimensions from an atom or a list of atoms; negative lengths are empty.
pub fn dims_of(x: &Value) -> Result<Vec<usize>, VError> {
    x.clone()
        .into_list()
        .iter()
        .map(|d| Ok(d.to_i64()?.max(0) as usize))
        .collect()
}
