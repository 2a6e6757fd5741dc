//! Traits shared by every resource updated under optimistic concurrency.

/// A stored record carrying a version stamp.
///
/// The version starts at 1 on insert and is bumped by exactly one on each
/// successful conditional write.
pub trait Versioned {
    fn id(&self) -> i64;
    fn version(&self) -> i32;
    fn set_version(&mut self, version: i32);
}

/// Partial update where only present fields overwrite the target.
///
/// Implementations must leave the target's version untouched.
pub trait Patch<T> {
    fn apply_to(self, target: &mut T);
}

/// Implements [`Versioned`] for a struct with `id: i64` and `version: i32` fields.
macro_rules! impl_versioned {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::domain::Versioned for $ty {
                fn id(&self) -> i64 {
                    self.id
                }

                fn version(&self) -> i32 {
                    self.version
                }

                fn set_version(&mut self, version: i32) {
                    self.version = version;
                }
            }
        )+
    };
}

pub(crate) use impl_versioned;
