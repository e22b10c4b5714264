//! Records: field-addressable values with a shared name layout.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use quill_ir::{Name, StringInterner, StringLookup};

use super::Value;
use crate::ToValue;

/// Field names of a record, in declaration order, with O(1) lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    names: Vec<Name>,
    indices: FxHashMap<Name, usize>,
}

impl RecordLayout {
    /// Build a layout from field names. A repeated name keeps its first slot.
    pub fn new(names: &[Name]) -> Self {
        let mut layout = RecordLayout {
            names: Vec::with_capacity(names.len()),
            indices: FxHashMap::default(),
        };
        for &name in names {
            layout.slot(name);
        }
        layout
    }

    /// Index for `name`, appending a new slot if it is not present.
    fn slot(&mut self, name: Name) -> usize {
        let next = self.names.len();
        let index = *self.indices.entry(name).or_insert(next);
        if index == next {
            self.names.push(name);
        }
        index
    }

    pub fn get_index(&self, field: Name) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Record instance.
///
/// Fields and layout are reference counted, so cloning a record (and
/// therefore rebinding it as a template context) never copies field data.
#[derive(Clone, Debug)]
pub struct RecordValue {
    fields: Arc<Vec<Value>>,
    layout: Arc<RecordLayout>,
}

impl RecordValue {
    /// Start building a record whose field names are interned in `interner`.
    pub fn builder(interner: &StringInterner) -> RecordBuilder<'_> {
        RecordBuilder {
            interner,
            layout: RecordLayout::new(&[]),
            fields: Vec::new(),
        }
    }

    /// Record over an existing layout.
    ///
    /// Returns `None` when the number of values does not match the layout.
    pub fn with_layout(layout: Arc<RecordLayout>, fields: Vec<Value>) -> Option<Self> {
        (layout.len() == fields.len()).then(|| RecordValue {
            fields: Arc::new(fields),
            layout,
        })
    }

    /// Get a field value by name with O(1) lookup.
    pub fn get_field(&self, field: Name) -> Option<&Value> {
        let index = self.layout.get_index(field)?;
        self.fields.get(index)
    }

    /// Get a field value by its text.
    pub fn get_field_by_str<I: StringLookup>(&self, field: &str, interner: &I) -> Option<&Value> {
        self.layout
            .names()
            .iter()
            .position(|&name| interner.lookup(name) == field)
            .and_then(|index| self.fields.get(index))
    }

    /// Field values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.fields
    }

    pub fn layout(&self) -> &Arc<RecordLayout> {
        &self.layout
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.layout.names().iter().copied().zip(self.fields.iter())
    }
}

impl PartialEq for RecordValue {
    fn eq(&self, other: &Self) -> bool {
        self.layout.names() == other.layout.names() && self.fields == other.fields
    }
}

/// Builder returned by [`RecordValue::builder`].
pub struct RecordBuilder<'i> {
    interner: &'i StringInterner,
    layout: RecordLayout,
    fields: Vec<Value>,
}

impl RecordBuilder<'_> {
    /// Add a field. Setting a name twice keeps its first position and the
    /// last value.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl ToValue) -> Self {
        let value = value.to_value(self.interner);
        let index = self.layout.slot(self.interner.intern(name));
        if index == self.fields.len() {
            self.fields.push(value);
        } else {
            self.fields[index] = value;
        }
        self
    }

    pub fn build(self) -> RecordValue {
        RecordValue {
            fields: Arc::new(self.fields),
            layout: Arc::new(self.layout),
        }
    }
}
