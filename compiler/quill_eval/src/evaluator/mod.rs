//! Tree-walking evaluator for template trees.
//!
//! An `Evaluator` is a view over one tree plus the shared registry and
//! function table. Invoking a named template creates a child evaluator
//! over the callee's tree with the depth bumped by one; everything else
//! is borrowed from the parent.

mod builder;

pub use builder::EvaluatorBuilder;

use std::io;

use quill_ir::{
    ExprId, ExprKind, Name, NodeId, NodeKind, Span, StringInterner, TemplateRegistry, Tree,
    TreeArena,
};
use quill_stack::ensure_sufficient_stack;
use quill_value::errors::{recursion_limit_exceeded, unknown_template, unsupported_node};
use quill_value::{
    BacktraceFrame, ControlAction, EvalError, EvalResult, ExecResult, FunctionTable, Value,
};
use smallvec::SmallVec;

use crate::config::EvalConfig;
use crate::exec::{call, control, expr};
use crate::output::Output;

/// Evaluates one template tree against a context value.
pub struct Evaluator<'a> {
    tree: &'a Tree,
    templates: &'a TemplateRegistry,
    functions: &'a FunctionTable,
    config: EvalConfig,
    /// Number of `{{template}}` invocations enclosing this tree.
    depth: usize,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator with the default configuration.
    pub fn new(
        tree: &'a Tree,
        templates: &'a TemplateRegistry,
        functions: &'a FunctionTable,
    ) -> Self {
        EvaluatorBuilder::new(tree, templates, functions).build()
    }

    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    fn arena(&self) -> &'a TreeArena {
        self.tree.arena()
    }

    #[inline]
    fn interner(&self) -> &'a StringInterner {
        self.templates.interner()
    }

    /// Execute the tree's root, writing output to `sink` as it is produced.
    ///
    /// Output written before an error stays in the sink. A `break` or
    /// `continue` that escapes every `range` is reported as
    /// `StrayControlSignal`.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(template = self.interner().lookup(self.tree.name()), depth = self.depth)
    )]
    pub fn run<W: io::Write + ?Sized>(
        &self,
        context: &Value,
        sink: &mut W,
    ) -> Result<(), EvalError> {
        let mut sink = sink;
        let mut out = Output::new(&mut sink);
        let result = self
            .exec_node(self.tree.root(), context, &mut out)
            .map_err(ControlAction::into_eval_error);
        match &result {
            Ok(()) => tracing::debug!(bytes = out.bytes_written(), "template executed"),
            Err(err) => tracing::debug!(
                kind = err.kind.variant_name(),
                error = %err,
                bytes = out.bytes_written(),
                "template execution failed"
            ),
        }
        result
    }

    /// Evaluator for a template invoked from this one.
    fn child(&self, tree: &'a Tree) -> Result<Self, EvalError> {
        let depth = self.depth + 1;
        if let Some(max) = self.config.exceeded_limit(depth) {
            return Err(recursion_limit_exceeded(max));
        }
        Ok(Evaluator {
            tree,
            templates: self.templates,
            functions: self.functions,
            config: self.config,
            depth,
        })
    }

    // Statements

    /// Execute a node; errors without a location get the node's span.
    pub(crate) fn exec_node(&self, id: NodeId, ctx: &Value, out: &mut Output<'_>) -> ExecResult {
        ensure_sufficient_stack(|| {
            let node = self.arena().get_node(id);
            self.exec_node_kind(&node.kind, node.span, ctx, out)
                .map_err(|action| action.with_span_if_error(node.span))
        })
    }

    fn exec_node_kind(
        &self,
        kind: &NodeKind,
        span: Span,
        ctx: &Value,
        out: &mut Output<'_>,
    ) -> ExecResult {
        match kind {
            NodeKind::Text(text) => out.write_bytes(self.arena().get_text(*text))?,
            NodeKind::Comment => {}
            NodeKind::If {
                cond,
                then_list,
                else_list,
            } => {
                let cond = self.eval_expr(*cond, ctx)?.as_boolean()?;
                if let Some(branch) = control::select_branch(cond, *then_list, *else_list) {
                    self.exec_node(branch, ctx, out)?;
                }
            }
            NodeKind::Range { iter, body } => {
                let iter = self.eval_expr(*iter, ctx)?;
                let items = iter.as_sequence()?;
                control::eval_range(items, |item| self.exec_node(*body, item, out))?;
            }
            NodeKind::Break => return Err(ControlAction::Break),
            NodeKind::Continue => return Err(ControlAction::Continue),
            NodeKind::List(nodes) => {
                for &child in self.arena().get_node_list(*nodes) {
                    self.exec_node(child, ctx, out)?;
                }
            }
            NodeKind::TemplateCall { name, arg } => {
                self.exec_template_call(*name, *arg, span, ctx, out)?;
            }
            NodeKind::Action(expr) => {
                let value = self.eval_expr(*expr, ctx)?;
                out.write_value(&value)?;
            }
            other => return Err(unsupported_node(other.kind_name()).into()),
        }
        Ok(())
    }

    /// Run a named template with the value of `arg` as its context.
    ///
    /// `break` and `continue` raised in the callee keep unwinding into the
    /// caller's enclosing `range`, if any.
    fn exec_template_call(
        &self,
        name: Name,
        arg: ExprId,
        span: Span,
        ctx: &Value,
        out: &mut Output<'_>,
    ) -> ExecResult {
        let interner = self.interner();
        let Some(tree) = self.templates.get(name) else {
            return Err(unknown_template(interner.lookup(name)).into());
        };
        let context = self.eval_expr(arg, ctx)?;
        let child = self.child(tree)?;
        tracing::trace!(
            template = interner.lookup(name),
            depth = child.depth,
            "invoking template"
        );

        child
            .exec_node(tree.root(), &context, out)
            .map_err(|action| match action {
                ControlAction::Error(err) => ControlAction::Error(Box::new(err.with_frame(
                    BacktraceFrame {
                        name: interner.lookup(name).to_string(),
                        span: Some(span),
                    },
                ))),
                signal => signal,
            })
    }

    // Expressions

    /// Evaluate an expression; errors without a location get its span.
    pub(crate) fn eval_expr(&self, id: ExprId, ctx: &Value) -> EvalResult {
        let expr = self.arena().get_expr(id);
        self.eval_expr_kind(&expr.kind, ctx)
            .map_err(|err| err.with_span_if_none(expr.span))
    }

    fn eval_expr_kind(&self, kind: &ExprKind, ctx: &Value) -> EvalResult {
        match kind {
            // Only the first command of a pipeline is evaluated.
            ExprKind::Pipe(commands) => match self.arena().get_expr_list(*commands).first() {
                Some(&first) => self.eval_expr(first, ctx),
                None => Err(unsupported_node("empty pipeline")),
            },
            ExprKind::Command(args) => self.eval_command(self.arena().get_expr_list(*args), ctx),
            ExprKind::Field(path) => ctx.project(self.arena().get_names(*path), self.interner()),
            ExprKind::Number(lit) => Ok(expr::eval_number(*lit)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::String(text) => Ok(expr::eval_string(*text, self.interner())),
            ExprKind::Dot => Ok(ctx.clone()),
            // Identifiers are only meaningful as the lead of a command.
            other => Err(unsupported_node(other.kind_name())),
        }
    }

    /// Evaluate a command.
    ///
    /// An identifier lead calls a function with the remaining arguments,
    /// all evaluated first. Any other lead is the command's value.
    fn eval_command(&self, args: &[ExprId], ctx: &Value) -> EvalResult {
        let Some((&lead, rest)) = args.split_first() else {
            return Err(unsupported_node("empty command"));
        };
        let lead_expr = self.arena().get_expr(lead);
        let ExprKind::Identifier(function) = lead_expr.kind else {
            return self.eval_expr(lead, ctx);
        };

        let values = rest
            .iter()
            .map(|&arg| self.eval_expr(arg, ctx))
            .collect::<Result<SmallVec<[Value; 4]>, _>>()?;
        call::call_function(self.functions, function, &values, self.interner())
            .map_err(|err| err.with_span_if_none(lead_expr.span))
    }
}
