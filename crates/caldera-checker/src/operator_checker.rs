//! Operators are ordinary functions named by their symbol: `a + b` is
//! `a.+(b)`. A symbol ending in `:` is right-associative and swaps operand
//! order before dispatch, so `a +: b` is `b.+(a)`. Assignment and compound
//! assignment (`x @= y`, desugared to `x = x @ y`) live here too since they
//! share the same "check the target is a legal assignee" plumbing.

use crate::context::CheckerState;
use crate::error::TypeError;
use caldera_common::Span;
use caldera_ir::{Atom, DefnInfo, Expr, ExprKind, NodeId, ScopeId, Type};

impl<'a> CheckerState<'a> {
    pub(crate) fn check_binary(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        op: Atom,
        left: &Expr,
        right: &Expr,
    ) -> Type {
        let left_ty = self.check_expr(scope, left);
        let right_ty = self.check_expr(scope, right);
        let (receiver_ty, arg_ty) = if self.atom_text(op).ends_with(':') {
            (right_ty, left_ty)
        } else {
            (left_ty, right_ty)
        };
        self.check_method_call(node, span, &receiver_ty, op, None, std::slice::from_ref(&arg_ty))
    }

    pub(crate) fn check_unary(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        op: Atom,
        operand: &Expr,
    ) -> Type {
        let operand_ty = self.check_expr(scope, operand);
        self.check_method_call(node, span, &operand_ty, op, None, &[])
    }

    pub(crate) fn check_assign(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        target: &Expr,
        value: &Expr,
    ) -> Type {
        let target_ty = self.check_expr(scope, target);
        let value_ty = self.check_expr(scope, value);
        self.check_assignable_target(node, span, target);
        if !caldera_solver::is_subtype_of(&self.pkg, &value_ty, &target_ty) {
            self.error(TypeError::SubtypeViolation {
                node,
                span,
                context: crate::error::SubtypeContext::Assignment,
            });
        }
        Type::Primitive(caldera_ir::PrimitiveKind::Unit)
    }

    pub(crate) fn check_compound_assign(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        op: Atom,
        target: &Expr,
        value: &Expr,
    ) -> Type {
        let target_ty = self.check_expr(scope, target);
        let value_ty = self.check_expr(scope, value);
        self.check_assignable_target(node, span, target);
        let computed = self.check_method_call(node, span, &target_ty, op, None, std::slice::from_ref(&value_ty));
        if !caldera_solver::is_subtype_of(&self.pkg, &computed, &target_ty) {
            self.error(TypeError::SubtypeViolation {
                node,
                span,
                context: crate::error::SubtypeContext::Assignment,
            });
        }
        Type::Primitive(caldera_ir::PrimitiveKind::Unit)
    }

    /// Only a binding reachable as a mutable `var`/field resolves as a legal
    /// assignment target; anything else (an expression, a `val`, an
    /// immutable field) raises `AssignToNonVar`.
    fn check_assignable_target(&mut self, node: NodeId, span: Span, target: &Expr) {
        let is_mutable = match &target.kind {
            ExprKind::Identifier(_) => match self.node_defn_info(target.id) {
                Some(DefnInfo::Variable(id)) => self.pkg.variable(*id).is_mutable,
                Some(DefnInfo::Global(id)) => self.pkg.global(*id).is_mutable,
                Some(DefnInfo::Field(id)) => self.pkg.field(*id).is_mutable,
                _ => false,
            },
            ExprKind::PropertyAccess { .. } => match self.node_defn_info(target.id) {
                Some(DefnInfo::Field(id)) => self.pkg.field(*id).is_mutable,
                _ => false,
            },
            _ => false,
        };
        if !is_mutable {
            self.error(TypeError::AssignToNonVar { node, span });
        }
    }
}
