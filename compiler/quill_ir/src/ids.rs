//! Arena indices and ranges.
//!
//! Trees are flat: nodes, expressions, and text chunks live in per-tree
//! vectors and refer to each other by `u32` index. Child lists are stored
//! contiguously and addressed by `(start, len)` ranges.

use std::fmt;

/// Macro to define arena index newtypes.
///
/// Each generated type has an `INVALID` sentinel, `new()`, `index()`,
/// `raw()`, `is_valid()`, and a `Debug` impl showing `TypeName(n)`.
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for "no index".
            pub const INVALID: Self = Self(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }
    )* };
}

define_id!(
    /// Index into a tree's node arena.
    NodeId,
    /// Index into a tree's expression arena.
    ExprId,
    /// Index into a tree's raw text storage.
    TextId,
);

/// Macro to define range types for arena-allocated lists.
///
/// Each generated type has `start: u32` and `len: u32` fields, an `EMPTY`
/// constant, and a `Debug` impl showing the range as `TypeName(start..end)`.
macro_rules! define_range {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        #[repr(C)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            /// Index range into the backing list storage.
            #[inline]
            pub const fn as_range(&self) -> ::std::ops::Range<usize> {
                self.start as usize..self.start as usize + self.len as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}({}..{})",
                    stringify!($name),
                    self.start,
                    u64::from(self.start) + u64::from(self.len)
                )
            }
        }
    )* };
}

define_range!(
    /// Children of a `List` node.
    NodeRange,
    /// Commands of a pipeline or arguments of a command.
    ExprRange,
    /// Field names of a field path.
    NameRange,
);
