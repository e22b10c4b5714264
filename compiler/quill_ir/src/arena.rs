//! Per-tree storage for nodes, expressions, and their child lists.

use super::{
    Expr, ExprId, ExprRange, Name, NameRange, Node, NodeId, NodeRange, TextId,
};

/// Flat storage backing one template tree.
///
/// Every id handed out by an arena indexes only that arena. Accessors panic
/// on out-of-range ids; [`validate`](crate::validate) checks a tree's ids
/// up front so evaluation never sees a foreign one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TreeArena {
    nodes: Vec<Node>,
    exprs: Vec<Expr>,
    node_lists: Vec<NodeId>,
    expr_lists: Vec<ExprId>,
    names: Vec<Name>,
    texts: Vec<Box<[u8]>>,
}

/// Convert a storage length into an index, panicking on overflow.
#[inline]
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("{what} arena exceeded u32::MAX entries"))
}

impl TreeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(to_u32(self.nodes.len(), "node"));
        self.nodes.push(node);
        id
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expression"));
        self.exprs.push(expr);
        id
    }

    pub fn alloc_text(&mut self, bytes: &[u8]) -> TextId {
        let id = TextId::new(to_u32(self.texts.len(), "text"));
        self.texts.push(bytes.into());
        id
    }

    pub fn alloc_node_list(&mut self, ids: impl IntoIterator<Item = NodeId>) -> NodeRange {
        let start = to_u32(self.node_lists.len(), "node list");
        self.node_lists.extend(ids);
        let len = to_u32(self.node_lists.len(), "node list") - start;
        NodeRange::new(start, len)
    }

    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expression list");
        self.expr_lists.extend(ids);
        let len = to_u32(self.expr_lists.len(), "expression list") - start;
        ExprRange::new(start, len)
    }

    pub fn alloc_names(&mut self, names: impl IntoIterator<Item = Name>) -> NameRange {
        let start = to_u32(self.names.len(), "name list");
        self.names.extend(names);
        let len = to_u32(self.names.len(), "name list") - start;
        NameRange::new(start, len)
    }

    #[inline]
    pub fn get_node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn get_text(&self, id: TextId) -> &[u8] {
        &self.texts[id.index()]
    }

    #[inline]
    pub fn get_node_list(&self, range: NodeRange) -> &[NodeId] {
        &self.node_lists[range.as_range()]
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.as_range()]
    }

    #[inline]
    pub fn get_names(&self, range: NameRange) -> &[Name] {
        &self.names[range.as_range()]
    }

    // Checked accessors used by validation.

    pub fn try_get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn try_get_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    pub fn try_get_text(&self, id: TextId) -> Option<&[u8]> {
        self.texts.get(id.index()).map(|text| &**text)
    }

    pub fn try_get_node_list(&self, range: NodeRange) -> Option<&[NodeId]> {
        self.node_lists.get(range.as_range())
    }

    pub fn try_get_expr_list(&self, range: ExprRange) -> Option<&[ExprId]> {
        self.expr_lists.get(range.as_range())
    }

    pub fn try_get_names(&self, range: NameRange) -> Option<&[Name]> {
        self.names.get(range.as_range())
    }

    /// All nodes in allocation order, paired with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        (0u32..)
            .zip(&self.nodes)
            .map(|(i, node)| (NodeId::new(i), node))
    }

    /// All expressions in allocation order, paired with their ids.
    pub fn exprs(&self) -> impl Iterator<Item = (ExprId, &Expr)> {
        (0u32..)
            .zip(&self.exprs)
            .map(|(i, expr)| (ExprId::new(i), expr))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }
}

#[cfg(test)]
mod tests;
