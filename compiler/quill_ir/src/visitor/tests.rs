use super::*;
use crate::{StringInterner, TreeBuilder};

#[derive(Default)]
struct KindCounter {
    nodes: Vec<&'static str>,
    exprs: Vec<&'static str>,
}

impl<'ast> Visitor<'ast> for KindCounter {
    fn visit_node(&mut self, node: &'ast Node, arena: &'ast TreeArena) {
        self.nodes.push(node.kind.kind_name());
        walk_node(self, node, arena);
    }

    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast TreeArena) {
        self.exprs.push(expr.kind.kind_name());
        walk_expr(self, expr, arena);
    }
}

#[test]
fn test_walk_visits_in_source_order() {
    let interner = StringInterner::new();
    let mut b = TreeBuilder::new(&interner);
    let items = b.field(["Items"]);
    let dot = b.dot();
    let show = b.action(dot);
    let cont = b.continue_node();
    let body = b.list([show, cont]);
    let range = b.range(items, body);
    let arg = b.dot();
    let call = b.template_call("row", arg);
    let root = b.list([range, call]);
    let tree = b.build("main", root);

    let mut counter = KindCounter::default();
    counter.visit_node_id(tree.root(), tree.arena());

    assert_eq!(
        counter.nodes,
        vec!["list", "range", "list", "action", "continue", "template"]
    );
    assert_eq!(counter.exprs, vec!["field", "dot", "dot"]);
}

#[test]
fn test_walk_descends_into_commands_and_else() {
    let interner = StringInterner::new();
    let mut b = TreeBuilder::new(&interner);
    let arg = b.string("x");
    let call = b.call("len", [arg]);
    let pipe = b.pipe([call]);
    let then_list = b.text("a");
    let else_list = b.comment();
    let root = b.with(pipe, then_list, Some(else_list));
    let tree = b.build("main", root);

    let mut counter = KindCounter::default();
    counter.visit_node_id(tree.root(), tree.arena());

    assert_eq!(counter.nodes, vec!["with", "text", "comment"]);
    assert_eq!(
        counter.exprs,
        vec!["pipeline", "command", "identifier", "string"]
    );
}
