//! Read-only intermediate representation shared by every analysis pass:
//! the closed type family, the definition tables a package is built from,
//! and the minimal AST/scope-table shapes the checker walks.
//!
//! `lub`/`glb`/`is_subtype_of` and every other operation that needs to
//! consult the definition table (rather than just a `Type`'s own shape)
//! live in `caldera-solver`, which re-exports this crate's `Type` API so
//! downstream crates see one surface.

pub mod ast;
pub mod defs;
pub mod flags;
pub mod ids;
pub mod package;
pub mod types;

pub use ast::{
    DefnInfo, Expr, ExprKind, FunctionBody, GlobalInit, Literal, MatchCase, NodeId, Pattern,
    PatternKind, Scope, ScopeId, ScopeTable, TypeArgNode, TypeNode,
};
pub use caldera_common::Atom;
pub use defs::{DefnKind, Field, Function, Global, ObjectTypeDefn, TypeParameter, Variable};
pub use flags::{ClassFlags, FunctionFlags, TypeFlags, TypeParameterFlags, Variance};
pub use ids::{FieldId, FunctionId, GlobalId, TypeDefnId, TypeParameterId, VariableId};
pub use package::{EmptyPackageLoader, Package, PackageLoader, StdSurface};
pub use types::{ClassType, ExistentialType, PrimitiveKind, Type, VariableType};
