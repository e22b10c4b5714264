//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup behind a single `RwLock`. Interned
//! strings are leaked so lookups can hand out `'static` references.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

static NEXT_INTERNER_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of one `StringInterner`, unique within the process.
///
/// Trees record the identity of the interner that produced their names so a
/// registry can tell its own trees from foreign ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct InternerId(u32);

impl InternerId {
    fn next() -> Self {
        InternerId(NEXT_INTERNER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Backing storage for interned strings.
struct InternTable {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Table exceeded capacity (over 4 billion strings).
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

impl InternTable {
    fn with_empty() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        let mut strings = Vec::with_capacity(64);
        strings.push(empty);
        Self { map, strings }
    }
}

/// String interner for template names, field names, and literals.
///
/// # Thread Safety
/// Uses an `RwLock` so a registry can be shared across threads while
/// collaborators intern new names.
pub struct StringInterner {
    id: InternerId,
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the empty string at `Name::EMPTY`.
    pub fn new() -> Self {
        StringInterner {
            id: InternerId::next(),
            table: RwLock::new(InternTable::with_empty()),
        }
    }

    #[inline]
    pub fn id(&self) -> InternerId {
        self.id
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        {
            let guard = self.table.read();
            if let Some(&index) = guard.map.get(s) {
                return Ok(Name::from_raw(index));
            }
        }

        let mut guard = self.table.write();

        // Another writer may have won the race.
        if let Some(&index) = guard.map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let index = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity (over 4 billion strings).
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up a previously interned string without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied().map(Name::from_raw)
    }

    /// Look up the string for a Name.
    ///
    /// # Panics
    /// Panics if `name` was produced by a different interner and is out of range.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().strings[name.index()]
    }

    /// Look up the string for a Name, or `None` if it is out of range.
    pub fn try_lookup(&self, name: Name) -> Option<&'static str> {
        self.table.read().strings.get(name.index()).copied()
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if the interner holds only the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("id", &self.id)
            .field("len", &self.len())
            .finish()
    }
}

/// Trait for looking up interned string names.
///
/// Lets value rendering and error formatting accept any lookup source
/// without depending on `StringInterner` directly.
pub trait StringLookup {
    /// Look up the string for an interned name.
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

/// Shared interner handle.
///
/// The registry owns one of these so trees, records, and function tables
/// built for the same session agree on every `Name`.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }

    /// Check whether two handles refer to the same interner.
    pub fn ptr_eq(&self, other: &SharedInterner) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Debug for SharedInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}

#[cfg(test)]
mod tests;
