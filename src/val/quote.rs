//! Renders values as text.

use crate::atom::*;

use super::val::*;

/// Renders a value in the same syntax [`parse_value`](super::parse_value) reads.
///
/// Numbers print plainly, characters as `'c`, non-empty character arrays as
/// quoted strings, and any other array as `[x,y,...]`.
pub fn pretty_print(x: &Value) -> String {
    let mut out = String::new();
    quote_into(x, &mut out);
    out
}

fn quote_into(x: &Value, out: &mut String) {
    match x {
        Value::Atom(atom) => quote_atom(atom, out),
        Value::Array(items) => match x.as_string() {
            Some(s) if !s.is_empty() => {
                out.push('"');
                for c in s.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        c => out.push(c),
                    }
                }
                out.push('"');
            }
            _ => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    quote_into(item, out);
                }
                out.push(']');
            }
        },
    }
}

fn quote_atom(atom: &Atom, out: &mut String) {
    match atom.ty() {
        AtomTy::Char => {
            out.push('\'');
            out.push(atom.to_char());
        }
        AtomTy::Num => out.push_str(&atom.value().to_string()),
    }
}

/// Renders a value as a grid: strings raw, vectors space-separated,
/// matrices with right-aligned columns, higher ranks as blank-line separated
/// layers.
pub fn matrix_print(x: &Value) -> String {
    match x.depth() {
        0 => cell(x),
        1 => row(x),
        2 => grid(x),
        _ => match x {
            Value::Array(items) => items
                .iter()
                .map(matrix_print)
                .collect::<Vec<_>>()
                .join("\n\n"),
            Value::Atom(_) => unreachable!(),
        },
    }
}

fn cell(x: &Value) -> String {
    match x {
        Value::Atom(atom) if atom.ty() == AtomTy::Char => atom.to_char().to_string(),
        Value::Atom(atom) => atom.value().to_string(),
        Value::Array(_) => match x.as_string() {
            Some(s) => s,
            None => pretty_print(x),
        },
    }
}

fn row(x: &Value) -> String {
    if let Some(s) = x.as_string() {
        return s;
    }
    match x {
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(" "),
        Value::Atom(_) => cell(x),
    }
}

fn grid(x: &Value) -> String {
    let rows: Vec<Vec<String>> = match x {
        Value::Array(rows) => rows
            .iter()
            .map(|r| r.clone().into_list().iter().map(cell).collect())
            .collect(),
        Value::Atom(_) => return cell(x),
    };
    let all_chars = x.atoms().iter().all(|a| a.ty() == AtomTy::Char);
    if all_chars {
        return rows
            .iter()
            .map(|r| r.concat())
            .collect::<Vec<_>>()
            .join("\n");
    }

    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..cols)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|r| {
            r.iter()
                .zip(&widths)
                .map(|(s, &w)| format!("{:>width$}", s, width = w))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
