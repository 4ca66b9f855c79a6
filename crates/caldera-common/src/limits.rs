//! Centralized recursion and iteration limits.
//!
//! Centralizing these avoids duplicate, inconsistently-tuned constants across
//! the solver, binder, and checker crates.

/// Upper bound on the visited-pair stack `lub`/`glb` push before giving up
/// and falling back to the root-class/`AnyType`/`NoType` answer. F-bounded
/// type cycles are caught by exact pair membership long before this fires;
/// this is a backstop against pathological, very deep (but acyclic) nesting.
pub const MAX_LATTICE_STACK_DEPTH: usize = 1_000;

/// Upper bound on scope-chain walks when resolving an identifier or
/// searching for an inherited binding, so a malformed (but acyclic after
/// inheritance analysis) scope chain can't hang the checker.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Upper bound on superclass-chain walks when searching for a common base
/// class in `lub`/`glb`'s object-type case.
pub const MAX_SUPERCLASS_WALK: usize = 10_000;

/// Upper bound on the number of overload candidates considered for a single
/// call site before the checker reports an ambiguous-overload error instead
/// of continuing to search.
pub const MAX_OVERLOAD_CANDIDATES: usize = 4_096;
