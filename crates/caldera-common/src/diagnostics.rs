//! The diagnostic data model shared by `InheritanceError`, `TypeError`, and
//! `ScopeError` (the three error kinds of §7's taxonomy).
//!
//! Each subsystem owns its own error enum (see `caldera-binder::InheritanceError`
//! and `caldera-checker::TypeError`); this module is just the rendering target
//! they convert into, the way `tsz-common::Diagnostic` is the shared sink for
//! every `tsz-*` error kind.

use crate::span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Error,
    Warning,
}

/// A rendered diagnostic: a message tied to a source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            span,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            span,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
        };
        write!(f, "{kind} at {}: {}", self.span, self.message)
    }
}
