//! Configuration surface for the analysis passes.
//!
//! Lives in `caldera-common` (rather than the checker crate) so the solver,
//! binder, and checker can all reference it without a circular dependency.

use crate::PackageId;

/// The only runtime configuration that affects the core analysis passes.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// Whether the standard library's tuple/option classes are in scope.
    /// Enables tuple literals and destructuring-pattern resolution against
    /// `Option[X]` / `Tuple_k[X1, .., Xk]`.
    pub is_using_std: bool,
    /// Identity of the package currently being compiled.
    pub target_package_id: PackageId,
}

impl AnalysisOptions {
    #[must_use]
    pub fn new(target_package_id: PackageId) -> Self {
        Self {
            is_using_std: true,
            target_package_id,
        }
    }
}
