//! Reads values written in the literal syntax produced by [`pretty_print`](super::pretty_print).

use thiserror::Error;

use crate::atom::*;

use super::val::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseValueError {
    #[error("unexpected `{found}` while reading a value")]
    Unexpected { found: char },
    #[error("malformed number `{text}`")]
    Number { text: String },
}

/// Parses one value from the start of `text`, returning it with the rest of
/// the text. Blank text reads as the empty array.
///
/// Accepted forms: numbers (`12`, `-3`, `¯3`, `2.5`), characters (`'c`),
/// strings (`"a\"b"`), and arrays (`[1,'a,[2 3]]`, separated by commas or
/// whitespace).
pub fn parse_value(text: &str) -> Result<(Value, &str), ParseValueError> {
    let rest = text.trim_start();
    match rest.chars().next() {
        None => Ok((Value::Array(vec![]), rest)),
        Some(_) => parse_item(rest),
    }
}

fn parse_item(text: &str) -> Result<(Value, &str), ParseValueError> {
    let mut chars = text.chars();
    match chars.next() {
        Some('\'') => {
            let c = chars.next().unwrap_or('\n');
            Ok((Value::char(c), chars.as_str()))
        }
        Some('"') => {
            let mut s = String::new();
            loop {
                match chars.next() {
                    None | Some('"') => break,
                    Some('\\') => match chars.next() {
                        None | Some('n') => s.push('\n'),
                        Some(c) => s.push(c),
                    },
                    Some(c) => s.push(c),
                }
            }
            Ok((Value::string(&s), chars.as_str()))
        }
        Some('[') => {
            let mut items = Vec::new();
            let mut rest = chars.as_str();
            loop {
                rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
                match rest.chars().next() {
                    None => break,
                    Some(']') => {
                        rest = &rest[1..];
                        break;
                    }
                    Some(_) => {
                        let (item, next) = parse_item(rest)?;
                        items.push(item);
                        rest = next;
                    }
                }
            }
            Ok((Value::Array(items), rest))
        }
        Some(c) if c.is_ascii_digit() || c == '-' || c == '¯' || c == '.' => parse_number(text),
        Some(found) => Err(ParseValueError::Unexpected { found }),
        None => Ok((Value::Array(vec![]), text)),
    }
}

fn parse_number(text: &str) -> Result<(Value, &str), ParseValueError> {
    let (negative, body) = match text.chars().next() {
        Some(c @ '-') | Some(c @ '¯') => (true, &text[c.len_utf8()..]),
        _ => (false, text),
    };
    let int_len = body.find(|c: char| !c.is_ascii_digit()).unwrap_or(body.len());
    let mut len = int_len;
    if body[len..].starts_with('.') {
        let frac = &body[len + 1..];
        let frac_len = frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
        if frac_len > 0 {
            len += 1 + frac_len;
        }
    }

    let digits = &body[..len];
    let rest = &body[len..];
    let err = || ParseValueError::Number {
        text: text[..text.len() - rest.len()].to_string(),
    };
    let num = if digits.contains('.') {
        Num::Real(digits.parse::<f64>().map_err(|_| err())?)
    } else {
        match digits.parse::<i64>() {
            Ok(n) => Num::Int(n),
            Err(_) => Num::Real(digits.parse::<f64>().map_err(|_| err())?),
        }
    };
    let num = if negative { num.neg() } else { num };
    Ok((Value::Atom(Atom::new(AtomTy::Num, num)), rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::val::pretty_print;

    #[test]
    fn reads_nested_arrays() {
        let (v, rest) = parse_value(" [1, -2 ,['a \"bc\"]] tail").unwrap();
        assert_eq!(
            v,
            Value::Array(vec![
                Value::num(1),
                Value::num(-2),
                Value::Array(vec![Value::char('a'), Value::string("bc")]),
            ])
        );
        assert_eq!(rest, " tail");
    }

    #[test]
    fn reads_reals_and_high_minus() {
        assert_eq!(parse_value("2.5").unwrap().0, Value::Atom(Atom::real(2.5)));
        assert_eq!(parse_value("¯4").unwrap().0, Value::num(-4));
        assert_eq!(parse_value("3.").unwrap(), (Value::num(3), "."));
    }

    #[test]
    fn blank_is_empty_array() {
        assert_eq!(parse_value("   ").unwrap().0, Value::Array(vec![]));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_value("abc"),
            Err(ParseValueError::Unexpected { found: 'a' })
        );
        assert!(parse_value("-").is_err());
    }

    #[test]
    fn reads_back_printed_values() {
        let v = Value::Array(vec![Value::string("q\"\\"), Value::nums(&[0, -7])]);
        assert_eq!(parse_value(&pretty_print(&v)).unwrap().0, v);
    }
}
