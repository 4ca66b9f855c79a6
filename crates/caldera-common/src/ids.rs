//! Stable integer ids for the definition arenas.
//!
//! Definitions form a graph — classes point at supertypes, methods, and type
//! parameters; type parameters point back at their bounds. Rather than own
//! references that would form cycles, every definition lives in an arena and
//! is referred to everywhere else by a small `Copy` id. `new_id!` generates
//! the newtype wrapper plus the `Debug` impl used when a definition needs to
//! be named in a diagnostic before its arena is available.

/// Declares a `Copy` newtype id backed by a `u32`, with a `Debug` impl that
/// prints `<tag#n>` (e.g. `<class#3>`).
#[macro_export]
macro_rules! new_id {
    ($name:ident, $tag:literal) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            #[must_use]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "<{}#{}>", $tag, self.0)
            }
        }
    };
}

new_id!(PackageId, "package");
