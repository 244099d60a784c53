use crate::atom::*;

use super::err::*;

/// A runtime value: an atom or an array of values.
///
/// The derived ordering puts atoms before arrays and compares arrays
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Atom(Atom),
    Array(Vec<Value>),
}

impl Value {
    pub fn num(n: i64) -> Value {
        Value::Atom(Atom::num(n))
    }

    pub fn char(c: char) -> Value {
        Value::Atom(Atom::char(c))
    }

    pub fn string(s: &str) -> Value {
        Value::Array(s.chars().map(Value::char).collect())
    }

    pub fn nums(ns: &[i64]) -> Value {
        Value::Array(ns.iter().map(|&n| Value::num(n)).collect())
    }

    pub fn is_atom(self: &Self) -> bool {
        matches!(self, Value::Atom(_))
    }

    pub fn atom(self: &Self) -> Result<Atom, VError> {
        match self {
            Value::Atom(atom) => Ok(*atom),
            Value::Array(_) => Err(VError::NotAtom),
        }
    }

    /// Integer value of an atom, truncated towards zero.
    pub fn to_i64(self: &Self) -> Result<i64, VError> {
        Ok(self.atom()?.to_i64())
    }

    /// Atoms are truthy when non-zero, arrays when non-empty.
    pub fn is_truthy(self: &Self) -> bool {
        match self {
            Value::Atom(atom) => atom.is_truthy(),
            Value::Array(items) => !items.is_empty(),
        }
    }

    /// Elements of an array; an atom is treated as a singleton.
    pub fn into_list(self: Self) -> Vec<Value> {
        match self {
            Value::Atom(_) => vec![self],
            Value::Array(items) => items,
        }
    }

    /// The characters of an array made only of character atoms, if it is one.
    pub fn as_string(self: &Self) -> Option<String> {
        match self {
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Atom(atom) if atom.ty() == AtomTy::Char => Some(atom.to_char()),
                    _ => None,
                })
                .collect(),
            Value::Atom(_) => None,
        }
    }
}

impl From<Atom> for Value {
    fn from(atom: Atom) -> Self {
        Value::Atom(atom)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Order-preserving deduplication.
pub fn uniques(items: Vec<Value>) -> Vec<Value> {
    let mut res: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !res.contains(&item) {
            res.push(item);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_sort_before_arrays() {
        assert!(Value::num(100) < Value::Array(vec![]));
        assert!(Value::nums(&[1, 2]) < Value::nums(&[1, 2, 0]));
        assert!(Value::nums(&[1, 3]) > Value::nums(&[1, 2, 9]));
    }

    #[test]
    fn truthiness() {
        assert!(!Value::num(0).is_truthy());
        assert!(Value::char('a').is_truthy());
        assert!(!Value::Array(vec![]).is_truthy());
        assert!(Value::nums(&[0]).is_truthy());
    }

    #[test]
    fn strings_are_char_arrays() {
        let s = Value::string("hi");
        assert_eq!(s.as_string().as_deref(), Some("hi"));
        assert_eq!(Value::nums(&[1]).as_string(), None);
        assert_eq!(Value::Array(vec![]).as_string().as_deref(), Some(""));
    }
}
