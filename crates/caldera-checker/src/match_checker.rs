//! `match` expressions: scrutinee typing, per-case pattern checking, guard
//! typing, and `lub`-joining every case body into the match's result type.

use crate::context::CheckerState;
use crate::error::{ScopeError, SubtypeContext, TypeError};
use caldera_common::Span;
use caldera_ir::{
    DefnInfo, Expr, Literal, MatchCase, Pattern, PatternKind, PrimitiveKind, ScopeId, Type,
};
use caldera_solver::{find_common_base_class, is_subtype_of, lub, substitute_for_base};

impl<'a> CheckerState<'a> {
    pub(crate) fn check_match(
        &mut self,
        node: caldera_ir::NodeId,
        span: Span,
        match_scope: ScopeId,
        scrutinee: &Expr,
        cases: &[MatchCase],
    ) -> Type {
        let scrutinee_ty = self.check_expr(match_scope, scrutinee);

        let mut result: Option<Type> = None;
        for case in cases {
            self.check_pattern(case.scope, &case.pattern, &scrutinee_ty);
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
            let body_ty = self.check_expr(case.scope, &case.body);
            result = Some(match result {
                None => body_ty,
                Some(acc) => lub(&self.pkg, &acc, &body_ty),
            });
        }
        self.record_type(node, result.unwrap_or(Type::NoType))
    }

    /// Catch patterns in a `try` behave as a `match` whose scrutinee is
    /// `Exception` — shared here so `try_checker` doesn't duplicate the
    /// per-pattern dispatch.
    pub(crate) fn check_pattern(&mut self, scope: ScopeId, pattern: &Pattern, scrutinee: &Type) {
        match &pattern.kind {
            PatternKind::Wildcard => {}
            PatternKind::Variable { annotation, .. } => {
                let Some(ann) = annotation else { return };
                let mut fresh = Vec::new();
                let resolved = self.resolve_type_node(scope, pattern.id, pattern.span, ann, &mut fresh);
                if !is_subtype_of(&self.pkg, &resolved, scrutinee) {
                    self.error(TypeError::SubtypeViolation {
                        node: pattern.id,
                        span: pattern.span,
                        context: SubtypeContext::Assignment,
                    });
                }
            }
            PatternKind::Literal(lit) => self.check_literal_pattern(pattern.id, pattern.span, lit, scrutinee),
            PatternKind::TypeTest { ty, .. } => {
                self.check_type_test_pattern(scope, pattern.id, pattern.span, ty, scrutinee);
            }
            PatternKind::Destructure {
                function_name,
                subpatterns,
            } => {
                self.check_destructure_pattern(scope, pattern.id, pattern.span, *function_name, subpatterns, scrutinee);
            }
        }
    }

    fn check_literal_pattern(
        &mut self,
        node: caldera_ir::NodeId,
        span: Span,
        lit: &Literal,
        scrutinee: &Type,
    ) {
        let lit_ty = self.check_literal(node, span, lit);
        let ok = match (lit, scrutinee) {
            (Literal::Int { value, .. }, Type::Primitive(kind)) => kind.fits_i64(*value),
            _ => lit_ty.is_equivalent(scrutinee) || is_subtype_of(&self.pkg, &lit_ty, scrutinee),
        };
        if !ok {
            self.error(TypeError::UnerasableTestPattern { node, span });
        }
    }

    /// `x: U` — testable iff `U` and the scrutinee's erasure share a common
    /// base class and every type argument not introduced by `_` matches the
    /// scrutinee's corresponding (substituted) argument exactly.
    fn check_type_test_pattern(
        &mut self,
        scope: ScopeId,
        node: caldera_ir::NodeId,
        span: Span,
        ty: &caldera_ir::TypeNode,
        scrutinee: &Type,
    ) {
        let mut fresh = Vec::new();
        let resolved = self.resolve_type_node(scope, node, span, ty, &mut fresh);

        match (scrutinee, &resolved) {
            (Type::Primitive(a), Type::Primitive(b)) => {
                if a != b {
                    self.error(TypeError::UnerasableTestPattern { node, span });
                }
            }
            _ if scrutinee.is_object() && resolved.is_object() => {
                let Some(scrutinee_class) = self.resolve_receiver_class(scrutinee) else {
                    self.error(TypeError::UnerasableTestPattern { node, span });
                    return;
                };
                let Some(test_class) = self.resolve_receiver_class(&resolved) else {
                    self.error(TypeError::UnerasableTestPattern { node, span });
                    return;
                };
                let Some(base) = find_common_base_class(&self.pkg, scrutinee_class, test_class) else {
                    self.error(TypeError::UnerasableTestPattern { node, span });
                    return;
                };
                let scrutinee_at_base = substitute_for_base(&self.pkg, scrutinee, base);
                let test_at_base = substitute_for_base(&self.pkg, &resolved, base);
                let (Type::Class(scrutinee_c), Type::Class(test_c)) = (&scrutinee_at_base, &test_at_base) else {
                    self.error(TypeError::UnerasableTestPattern { node, span });
                    return;
                };
                for (s_arg, t_arg) in scrutinee_c.type_args.iter().zip(&test_c.type_args) {
                    let is_fresh = matches!(t_arg, Type::Variable(v) if fresh.contains(&v.type_parameter));
                    if !is_fresh && s_arg != t_arg {
                        self.error(TypeError::UnerasableTestPattern { node, span });
                        return;
                    }
                }
            }
            _ => self.error(TypeError::UnerasableTestPattern { node, span }),
        }
    }

    /// Resolves `function_name` as either a free function or a try-match
    /// method on the scrutinee's class, returning `Option[X]`/
    /// `Option[Tuple_k[...]]`, and recurses each sub-pattern against the
    /// corresponding unwrapped `Xi`.
    fn check_destructure_pattern(
        &mut self,
        scope: ScopeId,
        node: caldera_ir::NodeId,
        span: Span,
        function_name: caldera_ir::Atom,
        subpatterns: &[Pattern],
        scrutinee: &Type,
    ) {
        let candidates = self
            .resolve_receiver_class(scrutinee)
            .map(|c| self.method_candidates(c, function_name))
            .filter(|c| !c.is_empty())
            .or_else(|| {
                self.scopes.lookup(scope, function_name).map(|bindings| match bindings.first() {
                    Some(DefnInfo::Function(f)) => vec![*f],
                    Some(DefnInfo::Overloaded(fs)) => fs.clone(),
                    _ => Vec::new(),
                })
            })
            .unwrap_or_default();

        if candidates.is_empty() {
            self.scope_error(ScopeError::UnresolvedName { node, span });
            return;
        }

        let receiver = scrutinee.clone();
        let Some(winner) = self.resolve_overload(node, span, &candidates, Some(&receiver), None, std::slice::from_ref(scrutinee))
        else {
            return;
        };

        let Some(std_surface) = self.pkg.std_surface.clone() else {
            self.error(TypeError::UnerasableTestPattern { node, span });
            return;
        };
        let Type::Class(option) = &winner.return_type else {
            self.error(TypeError::UnerasableTestPattern { node, span });
            return;
        };
        if option.class != std_surface.option_class || option.type_args.len() != 1 {
            self.error(TypeError::UnerasableTestPattern { node, span });
            return;
        }
        let inner = &option.type_args[0];

        if subpatterns.len() == 1 {
            self.check_pattern(scope, &subpatterns[0], inner);
            return;
        }
        let Type::Class(tuple) = inner else {
            self.error(TypeError::UnerasableTestPattern { node, span });
            return;
        };
        if std_surface.tuple_class(subpatterns.len()) != Some(tuple.class)
            || tuple.type_args.len() != subpatterns.len()
        {
            self.error(TypeError::UnerasableTestPattern { node, span });
            return;
        }
        for (sub, arg) in subpatterns.iter().zip(&tuple.type_args) {
            self.check_pattern(scope, sub, arg);
        }
    }
}
