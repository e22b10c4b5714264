//! Execution helpers the `Evaluator` delegates to.
//!
//! - `expr`: literal evaluation
//! - `call`: function calls from commands
//! - `control`: `if` selection and `range` loop boundaries

pub mod call;
pub mod control;
pub mod expr;
