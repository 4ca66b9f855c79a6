//! The two error sums the checker raises: `TypeError` for everything the
//! `TypeAnalyzer` pass itself rejects, `ScopeError` for the failures that
//! belong to the scope collaborator but surface here because a property
//! access or identifier lookup is what reveals them.

use caldera_common::Span;
use caldera_ir::{FieldId, FunctionId, NodeId, TypeDefnId, TypeParameterId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeError {
    #[error("could not unify type parameters of the callee at {node:?}")]
    UnificationFailure { node: NodeId, span: Span },

    #[error("expected a subtype of the target type at {node:?}")]
    SubtypeViolation {
        node: NodeId,
        span: Span,
        context: SubtypeContext,
    },

    #[error("type argument at position {index} is outside its parameter's bounds")]
    TypeArgumentOutOfBounds {
        node: NodeId,
        span: Span,
        type_parameter: TypeParameterId,
        index: usize,
    },

    #[error("operator applied to disjoint types")]
    OperatorOnDisjointTypes { node: NodeId, span: Span },

    #[error("no viable overload for this call")]
    NoViableOverload { node: NodeId, span: Span },

    #[error("ambiguous overload: more than one candidate is equally specific")]
    AmbiguousOverload {
        node: NodeId,
        span: Span,
        candidates: Vec<FunctionId>,
    },

    #[error("test pattern against an unerasable type")]
    UnerasableTestPattern { node: NodeId, span: Span },

    #[error("cannot instantiate abstract class")]
    InstantiatingAbstractClass {
        node: NodeId,
        span: Span,
        class: TypeDefnId,
    },

    #[error("`new(n) C` requires C to be an array class")]
    NotAnArrayClass {
        node: NodeId,
        span: Span,
        class: TypeDefnId,
    },

    #[error("array element count must have type I32")]
    ArrayCountNotI32 { node: NodeId, span: Span },

    #[error("public member signature references a less-visible type")]
    NonPublicTypeInPublicSignature {
        span: Span,
        function: Option<FunctionId>,
        field: Option<FieldId>,
    },

    #[error("variance violation in member signature")]
    VarianceViolation {
        span: Span,
        type_parameter: TypeParameterId,
    },

    #[error("a mutable array-element type requires an invariant element parameter")]
    ArrayElementVarianceViolation { span: Span },

    #[error("integer literal does not fit its declared width")]
    LiteralWidensPastWidth { node: NodeId, span: Span },

    #[error("cannot assign to a non-`var` binding")]
    AssignToNonVar { node: NodeId, span: Span },

    #[error("storing into an existentially-quantified field whose element type isn't proven stable")]
    UnstableExistentialStore { node: NodeId, span: Span },

    #[error("thrown value is not a subtype of Exception")]
    ThrowingNonException { node: NodeId, span: Span },

    #[error("`return` outside of a function body")]
    ReturnOutsideFunction { node: NodeId, span: Span },

    #[error("`throw`/`return` type is disjoint from the scrutinee/branch it joins")]
    DisjointBranchTypes { node: NodeId, span: Span },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtypeContext {
    Assignment,
    Return,
    Argument,
    FieldInit,
}

impl TypeError {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            TypeError::UnificationFailure { span, .. }
            | TypeError::SubtypeViolation { span, .. }
            | TypeError::TypeArgumentOutOfBounds { span, .. }
            | TypeError::OperatorOnDisjointTypes { span, .. }
            | TypeError::NoViableOverload { span, .. }
            | TypeError::AmbiguousOverload { span, .. }
            | TypeError::UnerasableTestPattern { span, .. }
            | TypeError::InstantiatingAbstractClass { span, .. }
            | TypeError::NotAnArrayClass { span, .. }
            | TypeError::ArrayCountNotI32 { span, .. }
            | TypeError::NonPublicTypeInPublicSignature { span, .. }
            | TypeError::VarianceViolation { span, .. }
            | TypeError::ArrayElementVarianceViolation { span }
            | TypeError::LiteralWidensPastWidth { span, .. }
            | TypeError::AssignToNonVar { span, .. }
            | TypeError::UnstableExistentialStore { span, .. }
            | TypeError::ThrowingNonException { span, .. }
            | TypeError::ReturnOutsideFunction { span, .. }
            | TypeError::DisjointBranchTypes { span, .. } => *span,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("unresolved name")]
    UnresolvedName { node: NodeId, span: Span },

    #[error("ambiguous import")]
    AmbiguousImport { node: NodeId, span: Span },

    #[error("visibility violation")]
    VisibilityViolation { node: NodeId, span: Span },

    #[error("existential variable used outside its enclosing type")]
    ExistentialVariableEscapes {
        node: NodeId,
        span: Span,
        type_parameter: TypeParameterId,
    },
}

impl ScopeError {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            ScopeError::UnresolvedName { span, .. }
            | ScopeError::AmbiguousImport { span, .. }
            | ScopeError::VisibilityViolation { span, .. }
            | ScopeError::ExistentialVariableEscapes { span, .. } => *span,
        }
    }
}
