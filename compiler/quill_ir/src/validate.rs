//! Eager structural checks over registered trees.
//!
//! Evaluation reports every problem lazily, when (and if) the offending
//! construct is reached. Validation finds them up front so a `Template`
//! can refuse to exist rather than fail halfway through writing output.
//!
//! A tree whose names came from another interner is rejected outright.
//! Otherwise two passes run per tree. The id pass checks that every id a
//! tree holds indexes its own arena or interner and that children precede
//! parents, which rules out cycles. Only a tree that passes it is walked by
//! the structural pass.

use std::fmt;

use super::visitor::{walk_expr, walk_node, Visitor};
use super::{
    Expr, ExprId, ExprKind, Name, Node, NodeId, NodeKind, Span, StringInterner,
    TemplateRegistry, Tree, TreeArena,
};

/// The set of function names a command may lead with.
///
/// Implemented by whatever table the evaluator resolves calls against, so
/// undefined functions are caught before anything runs.
pub trait FunctionScope {
    fn is_defined(&self, name: Name) -> bool;
}

/// What a validation error is about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationErrorKind {
    /// Pipeline with no commands.
    EmptyPipeline,
    /// Command with no arguments.
    EmptyCommand,
    /// Field path with no names.
    EmptyFieldPath,
    /// Function identifier outside a command's leading position.
    MisplacedIdentifier { name: String },
    /// Command led by something other than a function, given arguments.
    ArgumentsToNonFunction { kind: &'static str },
    /// Pipeline with more than one command.
    ChainedPipeline { commands: usize },
    /// `break` or `continue` with no enclosing `range` in the same tree.
    ControlOutsideRange { keyword: &'static str },
    /// Call or root name not present in the registry.
    UnknownTemplate { name: String },
    /// Command led by a name the function scope doesn't define.
    UnknownFunction { name: String },
    /// Construct the evaluator has no semantics for (`with`, variables, `nil`).
    UnsupportedConstruct { kind: &'static str },
    /// Id outside the tree's arena or interner, or a child allocated after
    /// its parent.
    DanglingId { what: &'static str, index: u32 },
    /// Tree built against a different interner than the registry's.
    ForeignTree,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPipeline => write!(f, "empty pipeline"),
            Self::EmptyCommand => write!(f, "empty command"),
            Self::EmptyFieldPath => write!(f, "empty field path"),
            Self::MisplacedIdentifier { name } => {
                write!(f, "function `{name}` used outside command position")
            }
            Self::ArgumentsToNonFunction { kind } => {
                write!(f, "can't give argument to non-function {kind}")
            }
            Self::ChainedPipeline { commands } => {
                write!(f, "chained pipelines are not supported ({commands} commands)")
            }
            Self::ControlOutsideRange { keyword } => {
                write!(f, "{{{{{keyword}}}}} outside {{{{range}}}}")
            }
            Self::UnknownTemplate { name } => write!(f, "no such template \"{name}\""),
            Self::UnknownFunction { name } => write!(f, "function \"{name}\" not defined"),
            Self::UnsupportedConstruct { kind } => write!(f, "{kind} is not supported"),
            Self::DanglingId { what, index } => {
                write!(f, "{what} id {index} does not belong to this tree")
            }
            Self::ForeignTree => {
                write!(f, "tree was built with a different interner than its registry")
            }
        }
    }
}

/// A problem found in one template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationError {
    /// Name of the template the problem is in.
    pub template: String,
    pub kind: ValidationErrorKind,
    pub span: Span,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template \"{}\": {}", self.template, self.kind)?;
        if self.span != Span::DUMMY {
            write!(f, " at {}", self.span)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Every problem found while validating a registry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        ValidationErrors(errors)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validate every tree in the registry.
///
/// Errors are grouped by template, templates in name order. Function calls
/// are not checked; see [`validate_with_functions`].
pub fn validate(registry: &TemplateRegistry) -> Result<(), ValidationErrors> {
    check_registry(registry, None)
}

/// Validate every tree, also requiring each command's leading identifier to
/// be defined in `functions`.
pub fn validate_with_functions(
    registry: &TemplateRegistry,
    functions: &dyn FunctionScope,
) -> Result<(), ValidationErrors> {
    check_registry(registry, Some(functions))
}

fn check_registry(
    registry: &TemplateRegistry,
    functions: Option<&dyn FunctionScope>,
) -> Result<(), ValidationErrors> {
    let mut trees: Vec<&Tree> = registry.trees().collect();
    trees.sort_by_cached_key(|tree| (!registry.owns(tree), template_label(tree, registry)));

    let errors: Vec<_> = trees
        .into_iter()
        .flat_map(|tree| check_tree(tree, registry, functions))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Validate one tree against the registry it will be evaluated with.
pub fn validate_tree(tree: &Tree, registry: &TemplateRegistry) -> Vec<ValidationError> {
    check_tree(tree, registry, None)
}

/// Name a tree for error messages without trusting a foreign `Name`.
fn template_label(tree: &Tree, registry: &TemplateRegistry) -> String {
    let name = tree.name();
    match registry.interner().try_lookup(name) {
        Some(text) if registry.owns(tree) => text.to_owned(),
        _ => format!("#{}", name.raw()),
    }
}

fn check_tree(
    tree: &Tree,
    registry: &TemplateRegistry,
    functions: Option<&dyn FunctionScope>,
) -> Vec<ValidationError> {
    let template = template_label(tree, registry);
    if !registry.owns(tree) {
        return vec![error(&template, ValidationErrorKind::ForeignTree, Span::DUMMY)];
    }

    let mut ids = IdCheck {
        arena: tree.arena(),
        interner: registry.interner(),
        template: &template,
        errors: Vec::new(),
    };
    ids.check(tree.root());
    if !ids.errors.is_empty() {
        return ids.errors;
    }

    let mut structure = StructureCheck {
        registry,
        functions,
        template: &template,
        range_depth: 0,
        errors: Vec::new(),
    };
    structure.visit_node_id(tree.root(), tree.arena());
    structure.errors
}

fn error(template: &str, kind: ValidationErrorKind, span: Span) -> ValidationError {
    ValidationError {
        template: template.to_owned(),
        kind,
        span,
    }
}

/// Arena-wide id check; runs before anything follows an id.
struct IdCheck<'a> {
    arena: &'a TreeArena,
    interner: &'a StringInterner,
    template: &'a str,
    errors: Vec<ValidationError>,
}

impl IdCheck<'_> {
    fn dangling(&mut self, what: &'static str, index: u32, span: Span) {
        self.errors.push(error(
            self.template,
            ValidationErrorKind::DanglingId { what, index },
            span,
        ));
    }

    fn check(&mut self, root: NodeId) {
        if self.arena.try_get_node(root).is_none() {
            self.dangling("node", root.raw(), Span::DUMMY);
            return;
        }
        for (id, node) in self.arena.nodes() {
            self.check_node(id, node);
        }
        for (id, expr) in self.arena.exprs() {
            self.check_expr(id, expr);
        }
    }

    fn name(&mut self, name: Name, span: Span) {
        if self.interner.try_lookup(name).is_none() {
            self.dangling("name", name.raw(), span);
        }
    }

    fn child_node(&mut self, parent: NodeId, child: NodeId, span: Span) {
        if child.raw() >= parent.raw() {
            self.dangling("node", child.raw(), span);
        }
    }

    fn node_expr(&mut self, expr: ExprId, span: Span) {
        if self.arena.try_get_expr(expr).is_none() {
            self.dangling("expression", expr.raw(), span);
        }
    }

    fn check_node(&mut self, id: NodeId, node: &Node) {
        let span = node.span;
        match &node.kind {
            NodeKind::Text(text) => {
                if self.arena.try_get_text(*text).is_none() {
                    self.dangling("text", text.raw(), span);
                }
            }
            NodeKind::Comment | NodeKind::Break | NodeKind::Continue => {}
            NodeKind::If {
                cond,
                then_list,
                else_list,
            } => {
                self.node_expr(*cond, span);
                self.child_node(id, *then_list, span);
                if let Some(else_list) = else_list {
                    self.child_node(id, *else_list, span);
                }
            }
            NodeKind::Range { iter, body } => {
                self.node_expr(*iter, span);
                self.child_node(id, *body, span);
            }
            NodeKind::List(children) => match self.arena.try_get_node_list(*children) {
                Some(children) => {
                    for &child in children {
                        self.child_node(id, child, span);
                    }
                }
                None => self.dangling("node list", children.start, span),
            },
            NodeKind::TemplateCall { name, arg } => {
                self.name(*name, span);
                self.node_expr(*arg, span);
            }
            NodeKind::Action(expr) => self.node_expr(*expr, span),
            NodeKind::With {
                pipe,
                body,
                else_list,
            } => {
                self.node_expr(*pipe, span);
                self.child_node(id, *body, span);
                if let Some(else_list) = else_list {
                    self.child_node(id, *else_list, span);
                }
            }
        }
    }

    fn check_expr(&mut self, id: ExprId, expr: &Expr) {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Pipe(children) | ExprKind::Command(children) => {
                match self.arena.try_get_expr_list(*children) {
                    Some(children) => {
                        for &child in children {
                            if child.raw() >= id.raw() {
                                self.dangling("expression", child.raw(), span);
                            }
                        }
                    }
                    None => self.dangling("expression list", children.start, span),
                }
            }
            ExprKind::Field(path) => match self.arena.try_get_names(*path) {
                Some(names) => {
                    for &name in names {
                        self.name(name, span);
                    }
                }
                None => self.dangling("name list", path.start, span),
            },
            ExprKind::Identifier(name) | ExprKind::String(name) | ExprKind::Variable(name) => {
                self.name(*name, span);
            }
            ExprKind::Number(_) | ExprKind::Bool(_) | ExprKind::Dot | ExprKind::Nil => {}
        }
    }
}

/// Structural rules, checked by walking from the root.
struct StructureCheck<'a> {
    registry: &'a TemplateRegistry,
    functions: Option<&'a dyn FunctionScope>,
    template: &'a str,
    range_depth: usize,
    errors: Vec<ValidationError>,
}

impl StructureCheck<'_> {
    fn push(&mut self, kind: ValidationErrorKind, span: Span) {
        self.errors.push(error(self.template, kind, span));
    }
}

impl<'ast> Visitor<'ast> for StructureCheck<'_> {
    fn visit_node(&mut self, node: &'ast Node, arena: &'ast TreeArena) {
        match &node.kind {
            NodeKind::Range { iter, body } => {
                self.visit_expr_id(*iter, arena);
                self.range_depth += 1;
                self.visit_node_id(*body, arena);
                self.range_depth -= 1;
            }
            NodeKind::Break | NodeKind::Continue => {
                if self.range_depth == 0 {
                    let keyword = node.kind.kind_name();
                    self.push(ValidationErrorKind::ControlOutsideRange { keyword }, node.span);
                }
            }
            NodeKind::TemplateCall { name, .. } => {
                if !self.registry.contains(*name) {
                    let name = self.registry.interner().lookup(*name).to_owned();
                    self.push(ValidationErrorKind::UnknownTemplate { name }, node.span);
                }
                walk_node(self, node, arena);
            }
            NodeKind::With { .. } => {
                let kind = node.kind.kind_name();
                self.push(ValidationErrorKind::UnsupportedConstruct { kind }, node.span);
                walk_node(self, node, arena);
            }
            _ => walk_node(self, node, arena),
        }
    }

    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast TreeArena) {
        match &expr.kind {
            ExprKind::Pipe(commands) => {
                if commands.is_empty() {
                    self.push(ValidationErrorKind::EmptyPipeline, expr.span);
                } else if commands.len() > 1 {
                    self.push(
                        ValidationErrorKind::ChainedPipeline {
                            commands: commands.len(),
                        },
                        expr.span,
                    );
                }
                walk_expr(self, expr, arena);
            }
            ExprKind::Command(args) => {
                let args = arena.get_expr_list(*args);
                let Some((&lead, rest)) = args.split_first() else {
                    self.push(ValidationErrorKind::EmptyCommand, expr.span);
                    return;
                };
                let lead_expr = arena.get_expr(lead);
                let lead_kind = &lead_expr.kind;
                if let ExprKind::Identifier(function) = *lead_kind {
                    if self.functions.is_some_and(|scope| !scope.is_defined(function)) {
                        let name = self.registry.interner().lookup(function).to_owned();
                        self.push(ValidationErrorKind::UnknownFunction { name }, lead_expr.span);
                    }
                    for &arg in rest {
                        self.visit_expr_id(arg, arena);
                    }
                } else {
                    if !rest.is_empty() {
                        let kind = lead_kind.kind_name();
                        self.push(ValidationErrorKind::ArgumentsToNonFunction { kind }, expr.span);
                    }
                    for &arg in args {
                        self.visit_expr_id(arg, arena);
                    }
                }
            }
            ExprKind::Identifier(name) => {
                let name = self.registry.interner().lookup(*name).to_owned();
                self.push(ValidationErrorKind::MisplacedIdentifier { name }, expr.span);
            }
            ExprKind::Field(path) if path.is_empty() => {
                self.push(ValidationErrorKind::EmptyFieldPath, expr.span);
            }
            ExprKind::Variable(_) | ExprKind::Nil => {
                let kind = expr.kind.kind_name();
                self.push(ValidationErrorKind::UnsupportedConstruct { kind }, expr.span);
            }
            _ => walk_expr(self, expr, arena),
        }
    }
}
