//! Value model: atoms and arbitrarily nested arrays.
//!
//! Arrays own their elements, so cloning a value is a deep copy and no two
//! values ever share structure.

pub use err::*;
pub use parse::*;
pub use quote::*;
pub use shape::*;
pub use thread::*;
pub use val::*;

mod err;
mod parse;
mod quote;
mod shape;
mod thread;
mod val;
