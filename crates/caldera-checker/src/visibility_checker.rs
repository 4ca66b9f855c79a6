//! §4.3 "Visibility": `private` bindings are usable only within the same
//! class/trait scope, `protected` extends this to subclasses, `public` is
//! unrestricted. A separate standalone check walks the whole package
//! looking for a public member whose signature leaks a less-visible type.

use crate::context::CheckerState;
use crate::error::TypeError;
use caldera_ir::{ClassFlags, FunctionFlags, Package, Type, TypeDefnId};

/// Visibility ordering: `Public > Protected > Private`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Visibility {
    Private,
    Protected,
    Public,
}

fn class_visibility(flags: ClassFlags) -> Visibility {
    if flags.contains(ClassFlags::PRIVATE) {
        Visibility::Private
    } else if flags.contains(ClassFlags::PROTECTED) {
        Visibility::Protected
    } else {
        Visibility::Public
    }
}

fn member_visibility(flags: FunctionFlags) -> Visibility {
    if flags.contains(FunctionFlags::PRIVATE) {
        Visibility::Private
    } else if flags.contains(FunctionFlags::PROTECTED) {
        Visibility::Protected
    } else {
        Visibility::Public
    }
}

impl<'a> CheckerState<'a> {
    /// Whether the member declared on `declaring_class` with `flags` is
    /// usable from the current checking context. Records a
    /// `ScopeError::VisibilityViolation` and returns `false` if not.
    pub(crate) fn check_member_visibility(
        &mut self,
        node: caldera_ir::NodeId,
        span: caldera_common::Span,
        declaring_class: TypeDefnId,
        flags: FunctionFlags,
    ) -> bool {
        let ok = match member_visibility(flags) {
            Visibility::Public => true,
            Visibility::Protected => self
                .current_class()
                .is_some_and(|c| self.pkg.is_derived_from(c, declaring_class)),
            Visibility::Private => self.current_class() == Some(declaring_class),
        };
        if !ok {
            self.scope_error(crate::error::ScopeError::VisibilityViolation { node, span });
        }
        ok
    }
}

/// Every type reachable from a class's own type-argument position, walked
/// shallowly (one level of class type-arguments) — enough to catch "a
/// public member's signature names a private class" without needing a full
/// reachability closure.
fn referenced_classes(ty: &Type, out: &mut Vec<TypeDefnId>) {
    match ty {
        Type::Class(c) => {
            out.push(c.class);
            for arg in &c.type_args {
                referenced_classes(arg, out);
            }
        }
        Type::Existential(e) => referenced_classes(&e.inner, out),
        Type::NoType | Type::AnyType | Type::Primitive(_) | Type::Variable(_) => {}
    }
}

/// §4.3: "Public surface (globals, public functions, public class members)
/// may not reference types whose definitions are less visible than the
/// member itself." A standalone pass since it only needs the definition
/// table, not an AST traversal.
pub fn check_public_surface_visibility(pkg: &Package) -> Vec<TypeError> {
    let mut errors = Vec::new();
    for defn in &pkg.classes {
        let class_vis = class_visibility(defn.flags);
        for &fn_id in defn.methods.iter().chain(defn.constructors.iter()) {
            let f = pkg.function(fn_id);
            if f.declaring_class != Some(defn.id) {
                continue;
            }
            let vis = member_visibility(f.flags).min(class_vis);
            if vis != Visibility::Public {
                continue;
            }
            let mut referenced = Vec::new();
            referenced_classes(&f.return_type, &mut referenced);
            for p in &f.parameter_types {
                referenced_classes(p, &mut referenced);
            }
            for class in referenced {
                if class_visibility(pkg.class(class).flags) != Visibility::Public {
                    errors.push(TypeError::NonPublicTypeInPublicSignature {
                        span: f.span,
                        function: Some(fn_id),
                        field: None,
                    });
                }
            }
        }
        for &field_id in &defn.fields {
            let f = pkg.field(field_id);
            if f.declaring_class != defn.id {
                continue;
            }
            let vis = member_visibility(f.flags).min(class_vis);
            if vis != Visibility::Public {
                continue;
            }
            let mut referenced = Vec::new();
            referenced_classes(&f.ty, &mut referenced);
            for class in referenced {
                if class_visibility(pkg.class(class).flags) != Visibility::Public {
                    errors.push(TypeError::NonPublicTypeInPublicSignature {
                        span: defn.span,
                        function: None,
                        field: Some(field_id),
                    });
                }
            }
        }
    }
    for g in &pkg.globals {
        let mut referenced = Vec::new();
        referenced_classes(&g.ty, &mut referenced);
        for class in referenced {
            if class_visibility(pkg.class(class).flags) != Visibility::Public {
                errors.push(TypeError::NonPublicTypeInPublicSignature {
                    span: caldera_common::Span::dummy(),
                    function: None,
                    field: None,
                });
            }
        }
    }
    errors
}
