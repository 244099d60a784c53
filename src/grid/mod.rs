//! The program grid: tokenizing source text into items and connecting
//! each item to its south and east neighbours.

pub use graph::*;
pub use item::*;
pub use parse::*;

mod graph;
mod item;
mod parse;
