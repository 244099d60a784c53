//! Tokenizes a grid into items.

use std::collections::HashMap;

use log::debug;

use crate::run::*;
use crate::val::*;
use crate::vocab::*;

use super::graph::*;
use super::item::*;

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Reads one item starting at column `x` of `row`, returning it with the
/// column where the next token starts. Unrecognized characters give no item.
fn next_item(row: &[char], x: usize, pos: Pos, ctx: &mut dyn RunContext) -> RResult<(Option<Item>, usize)> {
    let c = row[x];
    let data = |v| Some(Item::new(ItemKind::Data(v)));

    Ok(match c {
        '\'' => {
            let c = row.get(x + 1).copied().unwrap_or('\n');
            (data(Value::char(c)), x + 2)
        }
        '"' => {
            let mut text = String::new();
            let mut i = x + 1;
            while i < row.len() && row[i] != '"' {
                if row[i] == '\\' {
                    text.push(match row.get(i + 1) {
                        None | Some('n') => '\n',
                        Some(&c) => c,
                    });
                    i += 2;
                } else {
                    text.push(row[i]);
                    i += 1;
                }
            }
            (data(Value::string(&text)), i + 1)
        }
        c if is_digit(c) => {
            let end = (x..row.len()).find(|&i| !is_digit(row[i])).unwrap_or(row.len());
            let digits: String = row[x..end].iter().collect();
            let (n, _) = parse_value(&digits).map_err(|e| RError::from(e).at(pos))?;
            (data(n), end)
        }
        'i' => {
            let line = ctx.read_line().map_err(|e| e.at(pos))?;
            let (v, _) = parse_value(&line).map_err(|e| RError::from(e).at(pos))?;
            (data(v), x + 1)
        }
        'I' => {
            let line = ctx.read_line().map_err(|e| e.at(pos))?;
            (data(Value::string(&line)), x + 1)
        }
        c => {
            let kind = match (Control::from_glyph(c), lookup(c)) {
                (Some(control), _) => Some(ItemKind::Control(control)),
                (None, Some(Entry::Fun(_))) => builtin(c).map(|fun| ItemKind::Function { glyph: c, fun }),
                (None, Some(Entry::Op(def))) => Some(ItemKind::Operator(def)),
                (None, None) => None,
            };
            (kind.map(Item::new), x + 1)
        }
    })
}

/// Builds the program graph of `source`, reading input for every `i` and
/// `I` item in reading order.
pub fn parse_grid(source: &str, ctx: &mut dyn RunContext) -> RResult<Graph> {
    let rows: Vec<Vec<char>> = source.lines().map(|line| line.chars().collect()).collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let height = rows.len();

    let mut items = HashMap::new();
    for (y, row) in rows.iter().enumerate() {
        let mut x = 0;
        while x < row.len() {
            let pos = Pos { x, y };
            let (item, next) = next_item(row, x, pos, ctx)?;
            if let Some(item) = item {
                items.insert(pos, item);
            }
            x = next;
        }
    }

    debug!("PARSE {} items in a {}x{} grid", items.len(), width, height);
    Ok(Graph::new(items, width, height))
}

#[cfg(test)]
mod tests {
    use crate::atom::*;
    use crate::vocab::testing::*;

    use super::*;

    fn data_at(graph: &Graph, x: usize, y: usize) -> Option<Value> {
        match &graph.get(Some(Pos { x, y })).kind {
            ItemKind::Data(v) => Some(v.clone()),
            _ => None,
        }
    }

    #[test]
    fn literals_sit_at_their_first_column() {
        let mut ctx = runner("");
        let graph = parse_grid("12 'a\"b\\nc\"", &mut ctx).unwrap();
        assert_eq!(data_at(&graph, 0, 0), Some(Value::num(12)));
        assert!(!graph.contains(Pos { x: 1, y: 0 }));
        assert_eq!(data_at(&graph, 3, 0), Some(Value::char('a')));
        assert_eq!(data_at(&graph, 5, 0), Some(Value::string("b\nc")));
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn quote_at_row_end_is_newline() {
        let mut ctx = runner("");
        let graph = parse_grid("'\n\"ab\\", &mut ctx).unwrap();
        assert_eq!(data_at(&graph, 0, 0), Some(Value::char('\n')));
        assert_eq!(data_at(&graph, 0, 1), Some(Value::string("ab\n")));
    }

    #[test]
    fn quoted_glyphs_are_not_items() {
        let mut ctx = runner("");
        let graph = parse_grid("'+\"B+\"", &mut ctx).unwrap();
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn input_read_in_reading_order() {
        let mut ctx = runner("[1,2]\nhi\n");
        let graph = parse_grid("i\n I", &mut ctx).unwrap();
        assert_eq!(data_at(&graph, 0, 0), Some(Value::nums(&[1, 2])));
        assert_eq!(data_at(&graph, 1, 1), Some(Value::string("hi")));
    }

    #[test]
    fn malformed_input_has_position() {
        let mut ctx = runner("]\n");
        let e = parse_grid(" i", &mut ctx).unwrap_err();
        assert_eq!(e.pos(), Some(Pos { x: 1, y: 0 }));
        assert!(matches!(e.root(), RError::Input(_)));
    }

    #[test]
    fn glyph_kinds() {
        let mut ctx = runner("");
        let graph = parse_grid("+/Bw", &mut ctx).unwrap();
        assert_eq!(graph.get(Some(Pos { x: 0, y: 0 })).glyph(), Some('+'));
        assert!(matches!(graph.get(Some(Pos { x: 1, y: 0 })).kind, ItemKind::Operator(_)));
        assert!(matches!(
            graph.get(Some(Pos { x: 2, y: 0 })).kind,
            ItemKind::Control(Control::Block)
        ));
        assert!(!graph.contains(Pos { x: 3, y: 0 }));
    }

    #[test]
    fn control_glyphs_win_over_vocabulary() {
        let mut ctx = runner("");
        let graph = parse_grid("BVFAESX", &mut ctx).unwrap();
        for x in 0..7 {
            assert!(matches!(graph.get(Some(Pos { x, y: 0 })).kind, ItemKind::Control(_)));
        }
    }

    #[test]
    fn long_digit_runs_become_reals() {
        let mut ctx = runner("");
        let graph = parse_grid("99999999999999999999", &mut ctx).unwrap();
        let n = data_at(&graph, 0, 0).unwrap().atom().unwrap().value();
        assert_eq!(n, Num::Real(1e20));
    }

    fn conn(graph: &Graph, x: usize, y: usize) -> (Connection, Connection) {
        let item = graph.get(Some(Pos { x, y }));
        (item.south, item.east)
    }

    #[test]
    fn connections_skip_blanks() {
        let mut ctx = runner("");
        let graph = parse_grid("-  2\n\n3", &mut ctx).unwrap();
        let (south, east) = conn(&graph, 0, 0);
        assert_eq!(south.target, Some(Pos { x: 0, y: 2 }));
        assert!(south.value && !south.function && south.args);
        assert_eq!(east.target, Some(Pos { x: 3, y: 0 }));
    }

    #[test]
    fn block_and_masks() {
        let mut ctx = runner("");
        let graph = parse_grid("-VF+\nB\n1", &mut ctx).unwrap();
        let (south, east) = conn(&graph, 0, 0);
        assert_eq!(south, Connection::none());
        assert_eq!(east.target, Some(Pos { x: 3, y: 0 }));
        assert!(!east.value && !east.function && east.args);
    }

    #[test]
    fn turns() {
        let mut ctx = runner("");
        // east from `-` turns south at `X`, reaching `1`
        let graph = parse_grid("-X\n 1\nS 2", &mut ctx).unwrap();
        let (_, east) = conn(&graph, 0, 0);
        assert_eq!(east.target, Some(Pos { x: 1, y: 1 }));
        // `S` keeps a southward search going south, off the grid
        let (south, _) = conn(&graph, 0, 0);
        assert_eq!(south.target, None);

        let graph = parse_grid("-\nE 3", &mut ctx).unwrap();
        let (south, _) = conn(&graph, 0, 0);
        assert_eq!(south.target, Some(Pos { x: 2, y: 1 }));
    }

    #[test]
    fn searches_stop_at_edges() {
        let mut ctx = runner("");
        let graph = parse_grid("+\n", &mut ctx).unwrap();
        assert_eq!(conn(&graph, 0, 0), (Connection::none(), Connection::none()));
    }
}
