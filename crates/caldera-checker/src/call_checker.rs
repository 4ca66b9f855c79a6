//! Call resolution: free-function calls, instance/static method calls via
//! property access, constructor calls `C(args)`, and `new(n) C` array
//! construction.

use crate::context::CheckerState;
use crate::error::TypeError;
use caldera_common::Span;
use caldera_ir::{ClassFlags, DefnInfo, Expr, ExprKind, NodeId, PrimitiveKind, ScopeId, Type, TypeNode};

impl<'a> CheckerState<'a> {
    pub(crate) fn check_call(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        callee: &Expr,
        type_args: &[TypeNode],
        args: &[Expr],
    ) -> Type {
        let arg_types: Vec<Type> = args.iter().map(|a| self.check_expr(scope, a)).collect();
        let mut fresh = Vec::new();
        let explicit_type_args: Option<Vec<Type>> = if type_args.is_empty() {
            None
        } else {
            Some(
                type_args
                    .iter()
                    .map(|t| self.resolve_type_node(scope, node, span, t, &mut fresh))
                    .collect(),
            )
        };

        match &callee.kind {
            ExprKind::Identifier(name) => {
                self.check_free_call(scope, node, span, *name, explicit_type_args.as_deref(), &arg_types)
            }
            ExprKind::PropertyAccess { receiver, name } => {
                let receiver_ty = self.check_expr(scope, receiver);
                self.check_method_call(
                    node,
                    span,
                    &receiver_ty,
                    *name,
                    explicit_type_args.as_deref(),
                    &arg_types,
                )
            }
            _ => {
                // No first-class function values: any other callee shape
                // (a call on a call's result, say) never resolves.
                self.error(TypeError::NoViableOverload { node, span });
                Type::AnyType
            }
        }
    }

    fn check_free_call(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        name: caldera_ir::Atom,
        explicit_type_args: Option<&[Type]>,
        arg_types: &[Type],
    ) -> Type {
        let Some(bindings) = self.scopes.lookup(scope, name) else {
            self.scope_error(crate::error::ScopeError::UnresolvedName { node, span });
            return Type::AnyType;
        };
        match bindings.first().cloned() {
            Some(DefnInfo::Class(class_id)) | Some(DefnInfo::Trait(class_id)) => {
                self.check_constructor_call(node, span, class_id, explicit_type_args, arg_types)
            }
            Some(DefnInfo::Function(f)) => {
                self.finish_call(node, span, &[f], None, explicit_type_args, arg_types)
            }
            Some(DefnInfo::Overloaded(fs)) => {
                self.finish_call(node, span, &fs, None, explicit_type_args, arg_types)
            }
            _ => {
                self.scope_error(crate::error::ScopeError::UnresolvedName { node, span });
                Type::AnyType
            }
        }
    }

    pub(crate) fn check_method_call(
        &mut self,
        node: NodeId,
        span: Span,
        receiver_ty: &Type,
        name: caldera_ir::Atom,
        explicit_type_args: Option<&[Type]>,
        arg_types: &[Type],
    ) -> Type {
        if let Type::Existential(e) = receiver_ty {
            let opened = self.check_method_call(node, span, &e.inner, name, explicit_type_args, arg_types);
            return Type::close_existential(&e.vars, opened);
        }
        let Some(class_id) = self.resolve_receiver_class(receiver_ty) else {
            self.scope_error(crate::error::ScopeError::UnresolvedName { node, span });
            return Type::AnyType;
        };
        let candidates = self.method_candidates(class_id, name);
        self.finish_call(node, span, &candidates, Some(receiver_ty), explicit_type_args, arg_types)
    }

    fn finish_call(
        &mut self,
        node: NodeId,
        span: Span,
        candidates: &[caldera_ir::FunctionId],
        receiver: Option<&Type>,
        explicit_type_args: Option<&[Type]>,
        arg_types: &[Type],
    ) -> Type {
        if candidates.is_empty() {
            self.error(TypeError::NoViableOverload { node, span });
            return Type::AnyType;
        }
        for &f in candidates {
            let flags = self.pkg.function(f).flags;
            let declaring = self.pkg.function(f).declaring_class;
            if let Some(class) = declaring {
                if !self.check_member_visibility(node, span, class, flags) {
                    return Type::AnyType;
                }
            }
        }
        let Some(winner) = self.resolve_overload(node, span, candidates, receiver, explicit_type_args, arg_types)
        else {
            return Type::AnyType;
        };
        self.record_defn_info(node, DefnInfo::Function(winner.function));
        self.record_type(node, winner.return_type)
    }

    fn check_constructor_call(
        &mut self,
        node: NodeId,
        span: Span,
        class_id: caldera_ir::TypeDefnId,
        explicit_type_args: Option<&[Type]>,
        arg_types: &[Type],
    ) -> Type {
        let defn = self.pkg.class(class_id);
        if defn.is_abstract() {
            self.error(TypeError::InstantiatingAbstractClass {
                node,
                span,
                class: class_id,
            });
            return Type::AnyType;
        }
        let constructors = defn.constructors.clone();
        let type_parameters = defn.type_parameters.clone();
        let receiver = Type::class(
            class_id,
            type_parameters.iter().map(|&tp| Type::variable(tp)).collect(),
        );
        self.finish_call(node, span, &constructors, Some(&receiver), explicit_type_args, arg_types)
    }

    pub(crate) fn check_new_array(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        class_name: caldera_ir::Atom,
        type_args: &[TypeNode],
        count: &Expr,
    ) -> Type {
        let count_ty = self.check_expr(scope, count);
        if !matches!(count_ty, Type::Primitive(PrimitiveKind::I32)) {
            self.error(TypeError::ArrayCountNotI32 { node, span });
        }

        let Some(bindings) = self.scopes.lookup(scope, class_name) else {
            self.scope_error(crate::error::ScopeError::UnresolvedName { node, span });
            return Type::AnyType;
        };
        let class_id = match bindings.first().cloned() {
            Some(DefnInfo::Class(id)) => id,
            _ => {
                self.scope_error(crate::error::ScopeError::UnresolvedName { node, span });
                return Type::AnyType;
            }
        };
        if !self.pkg.class(class_id).flags.contains(ClassFlags::ARRAY) {
            self.error(TypeError::NotAnArrayClass {
                node,
                span,
                class: class_id,
            });
            return Type::AnyType;
        }

        let mut fresh = Vec::new();
        let args: Vec<Type> = type_args
            .iter()
            .map(|t| self.resolve_type_node(scope, node, span, t, &mut fresh))
            .collect();
        let expected = self.pkg.class(class_id).type_parameters.len();
        if args.len() != expected {
            self.scope_error(crate::error::ScopeError::UnresolvedName { node, span });
            return Type::AnyType;
        }
        Type::class(class_id, args)
    }
}
