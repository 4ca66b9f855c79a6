//! §4.3 "Variables and identifiers": looking up a name in scope, recording
//! the `DefnInfo` it resolved to and the type that implies.

use crate::context::CheckerState;
use crate::error::ScopeError;
use caldera_common::Span;
use caldera_ir::{Atom, DefnInfo, NodeId, ScopeId, Type};

impl<'a> CheckerState<'a> {
    pub(crate) fn resolve_identifier(
        &mut self,
        scope: ScopeId,
        node: NodeId,
        span: Span,
        name: Atom,
    ) -> Type {
        let Some(bindings) = self.scopes.lookup(scope, name) else {
            self.scope_error(ScopeError::UnresolvedName { node, span });
            return Type::AnyType;
        };

        let info = if bindings.len() == 1 {
            bindings[0].clone()
        } else if bindings.iter().all(|b| matches!(b, DefnInfo::Function(_))) {
            let ids = bindings
                .iter()
                .map(|b| match b {
                    DefnInfo::Function(id) => *id,
                    _ => unreachable!(),
                })
                .collect();
            DefnInfo::Overloaded(ids)
        } else {
            self.scope_error(ScopeError::AmbiguousImport { node, span });
            return Type::AnyType;
        };

        let ty = self.type_of_defn_info(&info);
        self.record_defn_info(node, info);
        ty
    }

    /// The type an identifier use implies, per §4.3: a variable/global's
    /// declared type, a function's return type (calls are resolved
    /// separately at the call site — looking up the bare name just gives
    /// the contract its return obeys), the package's sentinel type, or
    /// `AnyType` for a deferred overload set.
    pub(crate) fn type_of_defn_info(&self, info: &DefnInfo) -> Type {
        match info {
            DefnInfo::Variable(id) => self.pkg.variable(*id).ty.clone(),
            DefnInfo::Global(id) => self.pkg.global(*id).ty.clone(),
            DefnInfo::Field(id) => self.pkg.field(*id).ty.clone(),
            DefnInfo::Function(id) => self.pkg.function(*id).return_type.clone(),
            DefnInfo::TypeParameter(id) => Type::variable(*id),
            DefnInfo::Class(id) | DefnInfo::Trait(id) => {
                let type_parameters = &self.pkg.class(*id).type_parameters;
                Type::class(*id, type_parameters.iter().map(|&tp| Type::variable(tp)).collect())
            }
            // No dedicated "package type" in the closed `Type` family — a
            // package identifier is only ever a receiver for property
            // access, which consults `DefnInfo::Package` directly rather
            // than this type.
            DefnInfo::Package(_) | DefnInfo::Overloaded(_) => Type::AnyType,
        }
    }
}
