use thiserror::Error;

/// Failure of a value-model operation.
///
/// Carries no glyph: the vocabulary attaches the glyph and arity when the
/// error leaves a built-in.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VError {
    #[error("expected an atom, got an array")]
    NotAtom,
    #[error("cannot index into an atom")]
    IndexAtom,
    #[error("cannot index into an empty array")]
    IndexEmpty,
    #[error("length mismatch between arrays of length {left} and {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("no atoms to fill the requested shape")]
    EmptyReshape,
    #[error("{0}")]
    Domain(&'static str),
}
