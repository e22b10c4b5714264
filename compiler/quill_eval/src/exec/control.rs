//! Control flow: `if` selection and the `range` loop boundaries.
//!
//! `break` and `continue` travel as `ControlAction` values. `eval_range`
//! is the only place that consumes them: `continue` ends the current
//! iteration, `break` ends the loop, and errors pass straight through.

use quill_ir::NodeId;
use quill_value::{ControlAction, EvalError, ExecResult, Value};

/// Result of one loop iteration.
#[derive(Debug, PartialEq)]
pub enum LoopAction {
    Continue,
    Break,
    Error(Box<EvalError>),
}

/// Classify the outcome of a loop body.
///
/// Normal completion and `continue` both move on to the next element.
#[inline]
pub fn to_loop_action(result: ExecResult) -> LoopAction {
    match result {
        Ok(()) | Err(ControlAction::Continue) => LoopAction::Continue,
        Err(ControlAction::Break) => LoopAction::Break,
        Err(ControlAction::Error(e)) => LoopAction::Error(e),
    }
}

/// Run `body` once per item, in order, with each item as the context.
pub fn eval_range<F>(items: &[Value], mut body: F) -> ExecResult
where
    F: FnMut(&Value) -> ExecResult,
{
    for item in items {
        match to_loop_action(body(item)) {
            LoopAction::Continue => {}
            LoopAction::Break => return Ok(()),
            LoopAction::Error(e) => return Err(ControlAction::Error(e)),
        }
    }
    Ok(())
}

/// Pick the branch an `if` runs, if any.
#[inline]
pub fn select_branch(cond: bool, then_list: NodeId, else_list: Option<NodeId>) -> Option<NodeId> {
    if cond {
        Some(then_list)
    } else {
        else_list
    }
}
