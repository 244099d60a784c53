use std::fmt::{Display, Error, Formatter};

use thiserror::Error;

use crate::grid::Pos;
use crate::val::*;

pub type RResult<T> = Result<T, RError>;

/// Which form of a glyph was requested.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Display for Arity {
    fn fmt(self: &Self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Arity::Unary => write!(f, "unary"),
            Arity::Binary => write!(f, "binary"),
        }
    }
}

/// A failure that aborts the run.
#[derive(Debug, Error)]
pub enum RError {
    #[error("{arity} `{glyph}` is not implemented{}", detail_suffix(.detail))]
    Unimplemented {
        glyph: char,
        arity: Arity,
        detail: Option<&'static str>,
    },
    #[error("{arity} `{glyph}`: {cause}")]
    Structural {
        glyph: char,
        arity: Arity,
        cause: VError,
    },
    #[error("{arity} `{glyph}`: {message}")]
    Domain {
        glyph: char,
        arity: Arity,
        message: &'static str,
    },
    /// A value-model failure not yet attributed to a glyph.
    #[error(transparent)]
    Value(#[from] VError),
    #[error("malformed input: {0}")]
    Input(#[from] ParseValueError),
    #[error("cannot access input/output: {0}")]
    Io(#[from] std::io::Error),
    #[error("{error} (at {pos})")]
    At { pos: Pos, error: Box<RError> },
}

fn detail_suffix(detail: &Option<&'static str>) -> String {
    match detail {
        Some(detail) => format!(" {}", detail),
        None => String::new(),
    }
}

impl RError {
    pub fn unimplemented(glyph: char, arity: Arity) -> RError {
        RError::Unimplemented {
            glyph,
            arity,
            detail: None,
        }
    }

    pub fn unimplemented_on_values(glyph: char, arity: Arity) -> RError {
        RError::Unimplemented {
            glyph,
            arity,
            detail: Some("on values"),
        }
    }

    /// Attributes a value-model failure to the glyph that raised it.
    /// Errors already attributed are left alone.
    pub fn tagged(self: Self, glyph: char, arity: Arity) -> RError {
        match self {
            RError::Value(VError::Domain(message)) => RError::Domain {
                glyph,
                arity,
                message,
            },
            RError::Value(cause) => RError::Structural {
                glyph,
                arity,
                cause,
            },
            e => e,
        }
    }

    /// Records the grid position of the item whose resolution failed.
    /// Only the innermost position is kept.
    pub fn at(self: Self, pos: Pos) -> RError {
        match self {
            RError::At { .. } => self,
            e => RError::At {
                pos,
                error: Box::new(e),
            },
        }
    }

    pub fn pos(self: &Self) -> Option<Pos> {
        match self {
            RError::At { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// The error without its position.
    pub fn root(self: &Self) -> &RError {
        match self {
            RError::At { error, .. } => error.root(),
            e => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagging_attributes_value_errors() {
        let e = RError::from(VError::IndexAtom).tagged('@', Arity::Binary);
        assert!(matches!(
            e,
            RError::Structural {
                glyph: '@',
                arity: Arity::Binary,
                cause: VError::IndexAtom
            }
        ));

        let e = RError::from(VError::Domain("square root of a negative")).tagged('v', Arity::Unary);
        assert!(matches!(e, RError::Domain { glyph: 'v', .. }));
    }

    #[test]
    fn innermost_position_wins() {
        let inner = Pos { x: 3, y: 1 };
        let e = RError::unimplemented('K', Arity::Binary)
            .at(inner)
            .at(Pos { x: 0, y: 0 });
        assert_eq!(e.pos(), Some(inner));
        assert_eq!(e.root().to_string(), "binary `K` is not implemented");
    }

    #[test]
    fn unimplemented_message_has_detail() {
        let e = RError::unimplemented_on_values('_', Arity::Unary);
        assert_eq!(e.to_string(), "unary `_` is not implemented on values");
    }
}
