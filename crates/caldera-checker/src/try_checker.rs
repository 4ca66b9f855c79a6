//! `try`/`catch`/`finally`: the body's type joins with each catch body's
//! type; catch patterns are checked exactly like a `match` whose scrutinee
//! is `Exception`. `finally` is checked independently and doesn't affect
//! the result type.

use crate::context::CheckerState;
use crate::error::{SubtypeContext, TypeError};
use caldera_common::Span;
use caldera_ir::{Expr, MatchCase, NodeId, PrimitiveKind, ScopeId, Type};
use caldera_solver::lub;

impl<'a> CheckerState<'a> {
    pub(crate) fn check_try(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        body: &Expr,
        catches: &[MatchCase],
        finally: &Option<Box<Expr>>,
    ) -> Type {
        let mut result = self.check_expr(scope, body);
        let exception_ty = self.resolve_well_known_class(scope, node, span, "Exception");

        for case in catches {
            self.check_pattern(case.scope, &case.pattern, &exception_ty);
            if let Some(guard) = &case.guard {
                let guard_ty = self.check_expr(case.scope, guard);
                if !matches!(guard_ty, Type::Primitive(PrimitiveKind::Bool)) {
                    self.error(TypeError::SubtypeViolation {
                        node: guard.id,
                        span: guard.span,
                        context: SubtypeContext::Argument,
                    });
                }
            }
            let case_ty = self.check_expr(case.scope, &case.body);
            result = lub(&self.pkg, &result, &case_ty);
        }

        if let Some(f) = finally {
            self.check_expr(scope, f);
        }

        self.record_type(node, result)
    }
}
