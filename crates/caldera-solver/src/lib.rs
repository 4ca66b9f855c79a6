//! The type lattice: `lub`, `glb`, subtyping, and the substitutions that
//! need a definition table to resolve (`substitute_for_base`,
//! `substitute_for_inheritance`). Everything purely structural about a
//! `Type` — `substitute`, `find_variables`, `close_existential`,
//! `is_equivalent` — lives in `caldera-ir`; this crate re-exports that API
//! so callers see one unified `Type` surface instead of having to know
//! which crate a given operation lives in.

pub mod common_base;
pub mod lattice;
pub mod substitute;

pub use caldera_ir::{
    ClassType, ExistentialType, Package, PackageLoader, PrimitiveKind, Type, VariableType,
};
pub use common_base::{find_common_base_class, find_common_upper_bound};
pub use lattice::{glb, is_disjoint, is_subtype_of, lub};
pub use substitute::{substitute_for_base, substitute_for_inheritance};
