//! `block`, `if`, `var`, `return`, `throw` — the structural expression forms
//! that don't need overload resolution or pattern matching.

use crate::context::CheckerState;
use crate::error::{SubtypeContext, TypeError};
use caldera_common::Span;
use caldera_ir::{Expr, NodeId, PrimitiveKind, ScopeId, Type, TypeNode};
use caldera_solver::{is_subtype_of, lub};

impl<'a> CheckerState<'a> {
    pub(crate) fn check_block(
        &mut self,
        node: NodeId,
        block_scope: ScopeId,
        stmts: &[Expr],
    ) -> Type {
        let mut last = Type::Primitive(PrimitiveKind::Unit);
        for stmt in stmts {
            last = self.check_expr(block_scope, stmt);
        }
        self.record_type(node, last)
    }

    pub(crate) fn check_if(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        cond: &Expr,
        then_branch: &Expr,
        else_branch: &Option<Box<Expr>>,
    ) -> Type {
        let cond_ty = self.check_expr(scope, cond);
        if !matches!(cond_ty, Type::Primitive(PrimitiveKind::Bool)) {
            self.error(TypeError::SubtypeViolation {
                node: cond.id,
                span: cond.span,
                context: SubtypeContext::Argument,
            });
        }
        let then_ty = self.check_expr(scope, then_branch);
        let result = match else_branch {
            Some(e) => {
                let else_ty = self.check_expr(scope, e);
                lub(&self.pkg, &then_ty, &else_ty)
            }
            // A missing `else` can only be used for its side effects; the
            // expression's value is `Unit`.
            None => Type::Primitive(PrimitiveKind::Unit),
        };
        self.record_type(node, result)
    }

    pub(crate) fn check_var_decl(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        annotation: &Option<TypeNode>,
        init: &Option<Box<Expr>>,
    ) -> Type {
        let init_ty = init.as_ref().map(|e| self.check_expr(scope, e));
        if let (Some(ann), Some(init_ty)) = (annotation, &init_ty) {
            let mut fresh = Vec::new();
            let declared = self.resolve_type_node(scope, node, span, ann, &mut fresh);
            if !is_subtype_of(&self.pkg, init_ty, &declared) {
                self.error(TypeError::SubtypeViolation {
                    node,
                    span,
                    context: SubtypeContext::FieldInit,
                });
            }
        }
        self.record_type(node, Type::Primitive(PrimitiveKind::Unit))
    }

    pub(crate) fn check_return(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        value: &Option<Box<Expr>>,
    ) -> Type {
        let value_ty = match value {
            Some(e) => self.check_expr(scope, e),
            None => Type::Primitive(PrimitiveKind::Unit),
        };
        match self.current_function() {
            None => self.error(TypeError::ReturnOutsideFunction { node, span }),
            Some(frame) => {
                let declared = frame.declared_return_type.clone();
                if !is_subtype_of(&self.pkg, &value_ty, &declared) {
                    self.error(TypeError::SubtypeViolation {
                        node,
                        span,
                        context: SubtypeContext::Return,
                    });
                }
            }
        }
        self.record_type(node, Type::NoType)
    }

    pub(crate) fn check_throw(&mut self, scope: ScopeId, node: NodeId, span: Span, value: &Expr) -> Type {
        let value_ty = self.check_expr(scope, value);
        let exception_ty = self.resolve_well_known_class(scope, node, span, "Exception");
        if !is_subtype_of(&self.pkg, &value_ty, &exception_ty) {
            self.error(TypeError::ThrowingNonException { node, span });
        }
        self.record_type(node, Type::NoType)
    }
}
