use log::{debug, trace};

use crate::grid::*;
use crate::val::*;
use crate::vocab::*;

use super::ctx::*;
use super::err::*;

impl Graph {
    /// Resolves the item at `root` and every item it depends on.
    ///
    /// Connections only lead south or east, so the dependency graph is
    /// acyclic. Items are filled at most once; filling again is a no-op.
    pub fn fill(self: &mut Self, ctx: &mut dyn RunContext, root: Pos) -> RResult<()> {
        let mut pending = vec![root];
        while let Some(&pos) = pending.last() {
            let item = self.get(Some(pos));
            if item.filled {
                pending.pop();
                continue;
            }

            if item.is_active() {
                // east below south, so the south side is resolved first
                let deps: Vec<Pos> = [item.east.target, item.south.target]
                    .iter()
                    .flatten()
                    .copied()
                    .filter(|&dep| !self.get(Some(dep)).filled)
                    .collect();
                if !deps.is_empty() {
                    pending.extend(deps);
                    continue;
                }
            }

            pending.pop();
            self.resolve(ctx, pos)?;
        }
        Ok(())
    }

    /// Fills a single item whose neighbours are already filled.
    fn resolve(self: &mut Self, ctx: &mut dyn RunContext, pos: Pos) -> RResult<()> {
        let item = self.get(Some(pos));
        let (south, east) = (item.south, item.east);
        trace!("FILL  {} {:?}", pos, item.kind);

        match item.kind.clone() {
            ItemKind::Data(content) => {
                let item = self.get_mut(Some(pos));
                item.value = Some(content.clone());
                item.r_arg = Some(content);
            }
            ItemKind::Function { fun, .. } => {
                let l_arg = self.neighbour_value(ctx, south)?;
                let r_arg = self.neighbour_value(ctx, east)?;
                let item = self.get_mut(Some(pos));
                item.fun = Some(fun);
                item.l_arg = l_arg;
                item.r_arg = r_arg;
            }
            ItemKind::Operator(def) => {
                let left = self.operand(ctx, south)?;
                let right = self.operand(ctx, east)?;
                let fun = def.apply(ctx, left, right).map_err(|e| e.at(pos))?;
                let (l_arg, r_arg) = self.passed_args(south, east);
                let item = self.get_mut(Some(pos));
                item.fun = fun;
                item.l_arg = l_arg;
                item.r_arg = r_arg;
            }
            ItemKind::Control(_) | ItemKind::Dummy => (),
        }

        self.get_mut(Some(pos)).filled = true;
        Ok(())
    }

    /// The value of the item at `pos`, computed on first request.
    ///
    /// Only function and operator items compute anything; data items give
    /// their content and everything else gives nothing.
    pub fn evaluate(self: &mut Self, ctx: &mut dyn RunContext, pos: Option<Pos>) -> RResult<Option<Value>> {
        let item = self.get(pos);
        if !item.is_active() || item.evaluated {
            return Ok(item.value.clone());
        }

        let value = match &item.fun {
            Some(fun) => {
                let fun = fun.clone();
                let (l_arg, r_arg) = (item.l_arg.clone(), item.r_arg.clone());
                invoke(&*fun, ctx, l_arg, r_arg).map_err(|e| match pos {
                    Some(pos) => e.at(pos),
                    None => e,
                })?
            }
            None => None,
        };

        if let (Some(pos), Some(value)) = (pos, &value) {
            debug!("EVAL  {} -> {}", pos, pretty_print(value));
        }

        let item = self.get_mut(pos);
        item.value = value.clone();
        item.evaluated = true;
        Ok(value)
    }

    fn neighbour_value(self: &mut Self, ctx: &mut dyn RunContext, conn: Connection) -> RResult<Option<Value>> {
        if conn.value {
            self.evaluate(ctx, conn.target)
        } else {
            Ok(None)
        }
    }

    /// What a neighbour contributes to an operator: its callable when
    /// functions may pass and it has one, otherwise its value.
    fn operand(self: &mut Self, ctx: &mut dyn RunContext, conn: Connection) -> RResult<Arg> {
        if conn.function {
            if let Some(fun) = &self.get(conn.target).fun {
                return Ok(Arg::Present(Operand::Fun(fun.clone())));
            }
        }
        Ok(match self.neighbour_value(ctx, conn)? {
            Some(value) => Arg::Present(Operand::Val(value)),
            None => Arg::Absent,
        })
    }

    /// The arguments an operator inherits: the east neighbour's when it has
    /// any, otherwise the south neighbour's.
    fn passed_args(self: &Self, south: Connection, east: Connection) -> (Option<Value>, Option<Value>) {
        let args_of = |conn: Connection| {
            if conn.args {
                let item = self.get(conn.target);
                (item.l_arg.clone(), item.r_arg.clone())
            } else {
                (None, None)
            }
        };
        match args_of(east) {
            (None, None) => args_of(south),
            args => args,
        }
    }
}
