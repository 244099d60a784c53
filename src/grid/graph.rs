use std::collections::HashMap;

use log::trace;

use super::item::*;

/// The program graph: the items of a grid by position, plus a dummy item
/// that every missing connection resolves to.
#[derive(Debug)]
pub struct Graph {
    items: HashMap<Pos, Item>,
    dummy: Item,
    pub width: usize,
    pub height: usize,
}

impl Graph {
    pub fn new(items: HashMap<Pos, Item>, width: usize, height: usize) -> Graph {
        let mut graph = Graph {
            items,
            dummy: Item::dummy(),
            width,
            height,
        };
        graph.connect();
        graph
    }

    pub fn len(self: &Self) -> usize {
        self.items.len()
    }

    pub fn is_empty(self: &Self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(self: &Self, pos: Pos) -> bool {
        self.items.contains_key(&pos)
    }

    /// The item at `pos`, or the dummy.
    pub fn get(self: &Self, pos: Option<Pos>) -> &Item {
        pos.and_then(|pos| self.items.get(&pos)).unwrap_or(&self.dummy)
    }

    pub fn get_mut(self: &mut Self, pos: Option<Pos>) -> &mut Item {
        let Graph { items, dummy, .. } = self;
        match pos.and_then(move |pos| items.get_mut(&pos)) {
            Some(item) => item,
            None => dummy,
        }
    }

    fn in_bounds(self: &Self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Searches from `origin` (exclusive) for the first data, function or
    /// operator item, applying control items met on the way.
    pub fn find_item(self: &Self, origin: Pos, dir: Dir) -> Connection {
        let mut conn = Connection {
            target: None,
            value: true,
            function: true,
            args: true,
        };
        let mut dir = dir;
        let mut pos = origin.step(dir);
        while self.in_bounds(pos) {
            if let Some(item) = self.items.get(&pos) {
                match &item.kind {
                    ItemKind::Data(_) => {
                        return Connection {
                            target: Some(pos),
                            function: false,
                            ..conn
                        }
                    }
                    ItemKind::Function { .. } | ItemKind::Operator(_) => {
                        return Connection {
                            target: Some(pos),
                            ..conn
                        }
                    }
                    ItemKind::Control(control) => match control {
                        Control::Block => return Connection::none(),
                        Control::NoValue => conn.value = false,
                        Control::NoFunction => conn.function = false,
                        Control::NoArgs => conn.args = false,
                        Control::East => dir = Dir::East,
                        Control::South => dir = Dir::South,
                        Control::Switch => {
                            dir = match dir {
                                Dir::East => Dir::South,
                                Dir::South => Dir::East,
                            }
                        }
                    },
                    ItemKind::Dummy => (),
                }
            }
            pos = pos.step(dir);
        }
        Connection::none()
    }

    /// Computes the south and east connections of every active item.
    fn connect(self: &mut Self) {
        let conns: Vec<(Pos, Connection, Connection)> = self
            .items
            .iter()
            .filter(|(_, item)| item.is_active())
            .map(|(&pos, _)| (pos, self.find_item(pos, Dir::South), self.find_item(pos, Dir::East)))
            .collect();

        for (pos, south, east) in conns {
            trace!("CONN  {} south -> {:?}, east -> {:?}", pos, south.target, east.target);
            if let Some(item) = self.items.get_mut(&pos) {
                item.south = south;
                item.east = east;
            }
        }
    }
}
