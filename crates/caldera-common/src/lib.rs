//! Common types shared across the caldera semantic analysis crates.
//!
//! This crate provides the foundations every other crate in the workspace
//! builds on:
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`, `Spanned`, `SpanBuilder`)
//! - Line/column positions for rendering diagnostics (`Position`, `LineMap`)
//! - The diagnostic data model (`Diagnostic`, `DiagnosticCategory`, `DiagnosticSeverity`)
//! - Stable integer ids (`new_id!`) used by the definition arenas in `caldera-ir`
//! - Centralized recursion/iteration limits
//! - The configuration surface (`AnalysisOptions`)

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

pub mod ids;
pub use ids::PackageId;

pub mod interner;
pub use interner::{Atom, Interner};

pub mod limits;

pub mod options;
pub use options::AnalysisOptions;

pub mod position;
pub use position::{LineMap, Position, Range};

pub mod span;
pub use span::{ByteSpan, Span, SpanBuilder, Spanned};
