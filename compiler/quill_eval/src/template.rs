//! Validated, ready-to-run templates.
//!
//! `Template` owns a registry of trees and a function table behind shared
//! handles. Construction validates every tree up front, including that each
//! called function is in the table, so the only errors left for `execute`
//! are the ones that depend on the data.

use std::io;

use quill_ir::{
    Name, Span, TemplateRegistry, Tree, ValidationError, ValidationErrorKind, ValidationErrors,
};
use quill_value::errors::unknown_template;
use quill_value::{EvalError, FunctionTable, ToValue};

use crate::config::EvalConfig;
use crate::evaluator::EvaluatorBuilder;
use crate::shared::SharedRegistry;

/// A named entry point into a validated template registry.
///
/// Cheap to clone; clones share the registry and function table.
#[derive(Clone, Debug)]
pub struct Template {
    root: Name,
    templates: SharedRegistry<TemplateRegistry>,
    functions: SharedRegistry<FunctionTable>,
    config: EvalConfig,
}

impl Template {
    /// Validate `templates` and select `name` as the entry point.
    pub fn new(
        name: &str,
        templates: TemplateRegistry,
        functions: FunctionTable,
    ) -> Result<Self, ValidationErrors> {
        Self::from_shared(
            name,
            SharedRegistry::new(templates),
            SharedRegistry::new(functions),
        )
    }

    /// Like `new`, for a registry and function table that are already shared.
    pub fn from_shared(
        name: &str,
        templates: SharedRegistry<TemplateRegistry>,
        functions: SharedRegistry<FunctionTable>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = match quill_ir::validate_with_functions(&templates, &*functions) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.into_vec(),
        };
        let root = templates.get_by_str(name).map(Tree::name);
        if root.is_none() {
            errors.push(ValidationError {
                template: name.to_string(),
                kind: ValidationErrorKind::UnknownTemplate {
                    name: name.to_string(),
                },
                span: Span::DUMMY,
            });
        }

        match root {
            Some(root) if errors.is_empty() => {
                tracing::debug!(template = name, trees = templates.len(), "template validated");
                Ok(Template {
                    root,
                    templates,
                    functions,
                    config: EvalConfig::default(),
                })
            }
            _ => {
                tracing::debug!(template = name, errors = errors.len(), "template rejected");
                Err(ValidationErrors::new(errors))
            }
        }
    }

    /// Use `config` for every later run.
    #[must_use]
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum template invocation depth; `None` disables the limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Name of the entry-point template.
    pub fn name(&self) -> &str {
        self.templates.interner().lookup(self.root)
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    pub fn templates(&self) -> &SharedRegistry<TemplateRegistry> {
        &self.templates
    }

    pub fn functions(&self) -> &SharedRegistry<FunctionTable> {
        &self.functions
    }

    /// Render `data` into `sink`.
    ///
    /// Output produced before an error stays in the sink.
    pub fn execute<W, T>(&self, sink: &mut W, data: &T) -> Result<(), EvalError>
    where
        W: io::Write + ?Sized,
        T: ToValue + ?Sized,
    {
        let Some(tree) = self.templates.get(self.root) else {
            return Err(unknown_template(self.name()));
        };
        let context = data.to_value(self.templates.interner());
        EvaluatorBuilder::new(tree, &self.templates, &self.functions)
            .config(self.config)
            .build()
            .run(&context, sink)
    }

    /// Render `data` to a string.
    ///
    /// Invalid UTF-8 in text nodes is replaced with U+FFFD.
    pub fn render<T: ToValue + ?Sized>(&self, data: &T) -> Result<String, EvalError> {
        let mut buf = Vec::new();
        self.execute(&mut buf, data)?;
        Ok(match String::from_utf8(buf) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
