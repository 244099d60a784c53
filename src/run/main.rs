use log::info;

use crate::grid::*;
use crate::val::*;

use super::ctx::*;
use super::err::*;
use super::sess::*;

/// Runs a program and returns the value of its top-left item; nothing when
/// that cell holds no item or the item produces no value.
pub fn interpret(source: &str, ctx: &mut dyn RunContext) -> RResult<Option<Value>> {
    let root = Pos { x: 0, y: 0 };
    let mut graph = parse_grid(source, ctx)?;
    if !graph.contains(root) {
        info!("no item at the top-left cell");
        return Ok(None);
    }
    graph.fill(ctx, root)?;
    graph.evaluate(ctx, Some(root))
}

/// Runs a program, writing its result to the output, or reports the
/// failure against the source. Returns whether the run succeeded.
pub fn run_program(sess: &Sess, ctx: &mut dyn RunContext) -> bool {
    let res = interpret(sess.file.source(), ctx).and_then(|value| match value {
        Some(value) => ctx.write_line(&pretty_print(&value)),
        None => Ok(()),
    });
    match res {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{}", e.diagnostic_message(sess));
            false
        }
    }
}
