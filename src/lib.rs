//! Interpreter for a two-dimensional, array-oriented esoteric language.
//!
//! A program is a grid of characters. Literals, built-in functions and
//! operators become items; each item takes its arguments from the nearest
//! items south and east of it, and the program's result is the value of
//! the item in the top-left cell.

pub mod atom;
pub mod grid;
pub mod run;
pub mod val;
pub mod vocab;

pub use run::{interpret, RError, RResult, RunContext, Runner};
pub use val::{parse_value, pretty_print, Value};
