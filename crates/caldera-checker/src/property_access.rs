//! §4.3 "Property access `recv.name`": resolves `name` in the non-local
//! member scope of the receiver's static type. An existential receiver is
//! opened (bound variables treated as fresh) and the result re-closed over
//! whichever of them still appear in it.

use crate::context::CheckerState;
use crate::error::ScopeError;
use caldera_common::Span;
use caldera_ir::{Atom, DefnInfo, NodeId, Type, TypeDefnId};
use caldera_solver::substitute_for_base;

impl<'a> CheckerState<'a> {
    pub(crate) fn check_property_access(
        &mut self,
        node: NodeId,
        span: Span,
        receiver: &Type,
        name: Atom,
    ) -> Type {
        match receiver {
            Type::Existential(e) => {
                let opened = self.check_property_access(node, span, &e.inner, name);
                Type::close_existential(&e.vars, opened)
            }
            Type::Class(_) | Type::Variable(_) => {
                let Some(class_id) = self.resolve_receiver_class(receiver) else {
                    self.scope_error(ScopeError::UnresolvedName { node, span });
                    return Type::AnyType;
                };
                self.resolve_member(node, span, receiver, class_id, name)
            }
            Type::NoType | Type::AnyType | Type::Primitive(_) => Type::AnyType,
        }
    }

    /// Every method declared (directly or inherited) on `class_id` named
    /// `name` — shared by property-access resolution and call resolution,
    /// which both need the raw candidate set before overload filtering.
    pub(crate) fn method_candidates(&self, class_id: TypeDefnId, name: Atom) -> Vec<caldera_ir::FunctionId> {
        self.pkg
            .class(class_id)
            .methods
            .iter()
            .copied()
            .filter(|&f| self.pkg.function(f).name == name)
            .collect()
    }

    /// Peels a `VariableType` down to the `ClassType` its upper bound
    /// resolves to, the way `caldera-solver`'s lattice does before
    /// combining two object types.
    pub(crate) fn resolve_receiver_class(&self, ty: &Type) -> Option<TypeDefnId> {
        match ty {
            Type::Class(c) => Some(c.class),
            Type::Variable(v) => self.resolve_receiver_class(&self.pkg.type_parameter(v.type_parameter).upper_bound),
            _ => None,
        }
    }

    fn resolve_member(
        &mut self,
        node: NodeId,
        span: Span,
        receiver: &Type,
        class_id: TypeDefnId,
        name: Atom,
    ) -> Type {
        let defn = self.pkg.class(class_id);
        if let Some(&field_id) = defn.fields.iter().find(|&&f| self.pkg.field(f).name == name) {
            let field = self.pkg.field(field_id).clone();
            if !self.check_member_visibility(node, span, field.declaring_class, field.flags) {
                return Type::AnyType;
            }
            self.record_defn_info(node, DefnInfo::Field(field_id));
            return self.instantiate_member_type(receiver, field.declaring_class, &field.ty);
        }
        let candidates = self.method_candidates(class_id, name);
        match candidates.len() {
            0 => {
                self.scope_error(ScopeError::UnresolvedName { node, span });
                Type::AnyType
            }
            1 => {
                let f = self.pkg.function(candidates[0]).clone();
                if !self.check_member_visibility(node, span, f.declaring_class.unwrap_or(class_id), f.flags) {
                    return Type::AnyType;
                }
                self.record_defn_info(node, DefnInfo::Function(candidates[0]));
                self.instantiate_member_type(receiver, f.declaring_class.unwrap_or(class_id), &f.return_type)
            }
            _ => {
                self.record_defn_info(node, DefnInfo::Overloaded(candidates));
                Type::AnyType
            }
        }
    }

    /// Rewrites a member's declared type (expressed in terms of its
    /// `declaring_class`'s own type parameters) into the receiver's actual
    /// type arguments, via `substitute_for_base`.
    pub(crate) fn instantiate_member_type(
        &self,
        receiver: &Type,
        declaring_class: TypeDefnId,
        member_ty: &Type,
    ) -> Type {
        let Type::Class(base) = substitute_for_base(&self.pkg, receiver, declaring_class) else {
            return member_ty.clone();
        };
        let declaring_params = self.pkg.class(declaring_class).type_parameters.clone();
        member_ty.substitute(&declaring_params, &base.type_args)
    }
}
