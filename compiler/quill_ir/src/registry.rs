//! Named template registry.

use rustc_hash::FxHashMap;

use super::{Name, SharedInterner, StringInterner, Tree, TreeBuilder};

/// Read-only table of trees keyed by interned template name.
///
/// The registry owns every tree for the lifetime of a session along with the
/// interner their names were produced by. Evaluators only ever borrow it.
#[derive(Clone, Debug, Default)]
pub struct TemplateRegistry {
    interner: SharedInterner,
    trees: FxHashMap<Name, Tree>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::with_interner(SharedInterner::new())
    }

    /// Registry over an interner shared with other collaborators.
    pub fn with_interner(interner: SharedInterner) -> Self {
        TemplateRegistry {
            interner,
            trees: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    #[inline]
    pub fn shared_interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Start building a tree against this registry's interner.
    pub fn builder(&self) -> TreeBuilder<'_> {
        TreeBuilder::new(&self.interner)
    }

    /// Register a tree under its own name, returning any tree it replaces.
    ///
    /// Trees built against another interner are accepted here and reported
    /// by validation; see [`owns`](Self::owns).
    pub fn insert(&mut self, tree: Tree) -> Option<Tree> {
        self.trees.insert(tree.name(), tree)
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<&Tree> {
        self.trees.get(&name)
    }

    /// Look up by string without interning it.
    pub fn get_by_str(&self, name: &str) -> Option<&Tree> {
        self.interner.get(name).and_then(|name| self.get(name))
    }

    /// Check whether `tree`'s names came from this registry's interner.
    #[inline]
    pub fn owns(&self, tree: &Tree) -> bool {
        tree.interner_id() == self.interner.id()
    }

    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.trees.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Trees in unspecified order.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.values()
    }

    /// Template names sorted by their text, skipping foreign trees.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .trees
            .values()
            .filter(|tree| self.owns(tree))
            .filter_map(|tree| self.interner.try_lookup(tree.name()))
            .collect();
        names.sort_unstable();
        names
    }
}
