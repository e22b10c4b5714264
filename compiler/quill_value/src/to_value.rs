//! Conversion of host data into template values.
//!
//! Records carry no runtime type information: a host type becomes a record
//! by implementing `ToValue` and listing its fields through
//! [`RecordValue::builder`](crate::RecordValue::builder).
//!
//! ```text
//! impl ToValue for User {
//!     fn to_value(&self, interner: &StringInterner) -> Value {
//!         Value::record(
//!             RecordValue::builder(interner)
//!                 .field("Name", &self.name)
//!                 .field("Roles", &self.roles)
//!                 .build(),
//!         )
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use quill_ir::StringInterner;

use crate::Value;

/// Conversion into a [`Value`].
pub trait ToValue {
    fn to_value(&self, interner: &StringInterner) -> Value;
}

macro_rules! impl_to_value_lossless_int {
    ($($ty:ty),*) => { $(
        impl ToValue for $ty {
            #[inline]
            fn to_value(&self, _interner: &StringInterner) -> Value {
                Value::int(i64::from(*self))
            }
        }
    )* };
}

impl_to_value_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_to_value_wide_int {
    ($($ty:ty),*) => { $(
        impl ToValue for $ty {
            /// Integers beyond `i64` become floats.
            #[allow(
                clippy::cast_precision_loss,
                reason = "only reached for magnitudes i64 cannot hold"
            )]
            fn to_value(&self, _interner: &StringInterner) -> Value {
                i64::try_from(*self).map_or_else(|_| Value::float(*self as f64), Value::int)
            }
        }
    )* };
}

impl_to_value_wide_int!(u64, usize, isize);

impl ToValue for f32 {
    #[inline]
    fn to_value(&self, _interner: &StringInterner) -> Value {
        Value::float(f64::from(*self))
    }
}

impl ToValue for f64 {
    #[inline]
    fn to_value(&self, _interner: &StringInterner) -> Value {
        Value::float(*self)
    }
}

impl ToValue for bool {
    #[inline]
    fn to_value(&self, _interner: &StringInterner) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for str {
    fn to_value(&self, _interner: &StringInterner) -> Value {
        Value::string(self)
    }
}

impl ToValue for String {
    fn to_value(&self, _interner: &StringInterner) -> Value {
        Value::string(self.as_str())
    }
}

impl ToValue for Value {
    #[inline]
    fn to_value(&self, _interner: &StringInterner) -> Value {
        self.clone()
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self, interner: &StringInterner) -> Value {
        Value::list(self.iter().map(|item| item.to_value(interner)).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self, interner: &StringInterner) -> Value {
        self.as_slice().to_value(interner)
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self, interner: &StringInterner) -> Value {
        self.as_slice().to_value(interner)
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self, interner: &StringInterner) -> Value {
        Value::map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value(interner)))
                .collect(),
        )
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    #[inline]
    fn to_value(&self, interner: &StringInterner) -> Value {
        (**self).to_value(interner)
    }
}

#[cfg(test)]
mod tests;
