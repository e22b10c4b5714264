//! `EvaluatorBuilder` for creating `Evaluator` instances with various configurations.

use quill_ir::{TemplateRegistry, Tree};
use quill_value::FunctionTable;

use super::Evaluator;
use crate::config::EvalConfig;

/// Builder for creating `Evaluator` instances.
///
/// The tree, registry, and function table are required; everything else
/// has a default.
pub struct EvaluatorBuilder<'a> {
    tree: &'a Tree,
    templates: &'a TemplateRegistry,
    functions: &'a FunctionTable,
    config: EvalConfig,
}

impl<'a> EvaluatorBuilder<'a> {
    pub fn new(
        tree: &'a Tree,
        templates: &'a TemplateRegistry,
        functions: &'a FunctionTable,
    ) -> Self {
        Self {
            tree,
            templates,
            functions,
            config: EvalConfig::default(),
        }
    }

    /// Set the maximum template invocation depth; `None` disables the limit.
    #[must_use]
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the evaluator for the root template.
    pub fn build(self) -> Evaluator<'a> {
        Evaluator {
            tree: self.tree,
            templates: self.templates,
            functions: self.functions,
            config: self.config,
            depth: 0,
        }
    }
}
