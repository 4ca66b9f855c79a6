//! `InheritanceError`: every way a package's subtype/inheritance structure
//! can fail to be well-formed. Each variant carries the span of the
//! definition the error should be reported against.

use caldera_common::Span;
use caldera_ir::{FunctionId, TypeDefnId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InheritanceError {
    #[error("subtype graph has a cycle through this definition")]
    CyclicSubtypeGraph { defn: TypeDefnId, span: Span },

    #[error("a class or trait cannot list itself as a supertype")]
    SelfSupertype { defn: TypeDefnId, span: Span },

    #[error("supertype may not be nullable")]
    NullableSupertype { defn: TypeDefnId, span: Span },

    #[error("cannot inherit from the bottom class")]
    InheritsNothing { defn: TypeDefnId, span: Span },

    #[error("cannot inherit from a final class")]
    InheritsFinalClass {
        defn: TypeDefnId,
        base: TypeDefnId,
        span: Span,
    },

    #[error("only the first supertype may be a class; every later supertype must be a trait")]
    SupertypeOrderViolation { defn: TypeDefnId, span: Span },

    #[error("a trait supertype's own base-class requirement is unrelated to the first supertype's")]
    InconsistentTraitBaseClass {
        defn: TypeDefnId,
        trait_id: TypeDefnId,
        span: Span,
    },

    #[error("the same base is listed more than once in the supertype list")]
    DuplicateSupertype {
        defn: TypeDefnId,
        base: TypeDefnId,
        span: Span,
    },

    #[error("two inheritance paths reach the same ancestor with different type arguments")]
    InconsistentDiamond {
        defn: TypeDefnId,
        ancestor: TypeDefnId,
        span: Span,
    },

    #[error("cannot override a final method")]
    OverridesFinalMethod {
        method: FunctionId,
        base_method: FunctionId,
        span: Span,
    },

    #[error("a given base method may be overridden at most once per deriving class")]
    DuplicateOverride {
        method: FunctionId,
        base_method: FunctionId,
        span: Span,
    },

    #[error("method is marked `override` but does not override anything")]
    OverrideFlagWithoutOverride { method: FunctionId, span: Span },

    #[error("method overrides a base method but is not marked `override`")]
    OverridesWithoutOverrideFlag { method: FunctionId, span: Span },

    #[error("concrete class leaves an abstract method unimplemented")]
    AbstractMethodNotImplemented {
        class: TypeDefnId,
        method: FunctionId,
        span: Span,
    },

    #[error("an array class descendant may not declare additional fields")]
    ArrayDescendantAddsFields { defn: TypeDefnId, span: Span },

    #[error("an array class descendant may not redeclare the element type")]
    ArrayDescendantChangesElementType { defn: TypeDefnId, span: Span },
}

impl InheritanceError {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            InheritanceError::CyclicSubtypeGraph { span, .. }
            | InheritanceError::SelfSupertype { span, .. }
            | InheritanceError::NullableSupertype { span, .. }
            | InheritanceError::InheritsNothing { span, .. }
            | InheritanceError::InheritsFinalClass { span, .. }
            | InheritanceError::SupertypeOrderViolation { span, .. }
            | InheritanceError::InconsistentTraitBaseClass { span, .. }
            | InheritanceError::DuplicateSupertype { span, .. }
            | InheritanceError::InconsistentDiamond { span, .. }
            | InheritanceError::OverridesFinalMethod { span, .. }
            | InheritanceError::DuplicateOverride { span, .. }
            | InheritanceError::OverrideFlagWithoutOverride { span, .. }
            | InheritanceError::OverridesWithoutOverrideFlag { span, .. }
            | InheritanceError::AbstractMethodNotImplemented { span, .. }
            | InheritanceError::ArrayDescendantAddsFields { span, .. }
            | InheritanceError::ArrayDescendantChangesElementType { span, .. } => *span,
        }
    }
}
