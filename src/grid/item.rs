use std::fmt::{Display, Error, Formatter};

use crate::val::*;
use crate::vocab::*;

/// A cell coordinate: `x` is the column, `y` the row, both from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn step(self: Self, dir: Dir) -> Pos {
        match dir {
            Dir::South => Pos {
                x: self.x,
                y: self.y + 1,
            },
            Dir::East => Pos {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

impl Display for Pos {
    fn fmt(self: &Self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "row {}, column {}", self.y + 1, self.x + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    South,
    East,
}

/// The outcome of searching from an item for its nearest neighbour in one
/// direction, with what the neighbour may contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub target: Option<Pos>,
    pub value: bool,
    pub function: bool,
    pub args: bool,
}

impl Connection {
    /// No neighbour; nothing may be taken.
    pub fn none() -> Connection {
        Connection {
            target: None,
            value: false,
            function: false,
            args: false,
        }
    }
}

/// Glyphs that steer or block connection searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// `B`: ends the search with no connection.
    Block,
    /// `V`
    NoValue,
    /// `F`
    NoFunction,
    /// `A`
    NoArgs,
    /// `E`
    East,
    /// `S`
    South,
    /// `X`: swaps south and east.
    Switch,
}

impl Control {
    pub fn from_glyph(glyph: char) -> Option<Control> {
        Some(match glyph {
            'B' => Control::Block,
            'V' => Control::NoValue,
            'F' => Control::NoFunction,
            'A' => Control::NoArgs,
            'E' => Control::East,
            'S' => Control::South,
            'X' => Control::Switch,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum ItemKind {
    Data(Value),
    Function { glyph: char, fun: Fun },
    Operator(&'static OpDef),
    Control(Control),
    /// Stands in for a missing neighbour.
    Dummy,
}

/// A node of the program graph.
///
/// Resolution fields start empty and are written once by the fill; an item
/// is never reset.
#[derive(Debug, Clone)]
pub struct Item {
    pub kind: ItemKind,
    pub south: Connection,
    pub east: Connection,
    pub filled: bool,
    pub evaluated: bool,
    pub value: Option<Value>,
    pub fun: Option<Fun>,
    pub l_arg: Option<Value>,
    pub r_arg: Option<Value>,
}

impl Item {
    pub fn new(kind: ItemKind) -> Item {
        Item {
            kind,
            south: Connection::none(),
            east: Connection::none(),
            filled: false,
            evaluated: false,
            value: None,
            fun: None,
            l_arg: None,
            r_arg: None,
        }
    }

    pub fn dummy() -> Item {
        Item::new(ItemKind::Dummy)
    }

    /// Whether the item computes something from its neighbours.
    pub fn is_active(self: &Self) -> bool {
        matches!(self.kind, ItemKind::Function { .. } | ItemKind::Operator(_))
    }

    pub fn glyph(self: &Self) -> Option<char> {
        match &self.kind {
            ItemKind::Function { glyph, .. } => Some(*glyph),
            ItemKind::Operator(def) => Some(def.glyph),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_display_one_based() {
        assert_eq!(Pos { x: 0, y: 2 }.to_string(), "row 3, column 1");
    }

    #[test]
    fn steps() {
        let p = Pos { x: 1, y: 1 };
        assert_eq!(p.step(Dir::South), Pos { x: 1, y: 2 });
        assert_eq!(p.step(Dir::East), Pos { x: 2, y: 1 });
    }

    #[test]
    fn control_glyphs() {
        assert_eq!(Control::from_glyph('X'), Some(Control::Switch));
        assert_eq!(Control::from_glyph('Z'), None);
    }
}
