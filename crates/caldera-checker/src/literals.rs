//! Literal typing: §4.3's "integer/float literals take their suffix width;
//! an unsuffixed integer defaults to `I64`, float to `F64`. A literal whose
//! value does not fit its declared width is rejected."

use crate::context::CheckerState;
use crate::error::TypeError;
use caldera_common::Span;
use caldera_ir::{Literal, NodeId, PrimitiveKind, Type, TypeFlags};

impl<'a> CheckerState<'a> {
    pub(crate) fn check_literal(&mut self, node: NodeId, span: Span, lit: &Literal) -> Type {
        match *lit {
            Literal::Unit => Type::Primitive(PrimitiveKind::Unit),
            Literal::Bool(_) => Type::Primitive(PrimitiveKind::Bool),
            Literal::Int { value, suffix } => {
                let kind = suffix.unwrap_or(PrimitiveKind::I64);
                if !kind.fits_i64(value) {
                    self.error(TypeError::LiteralWidensPastWidth { node, span });
                }
                Type::Primitive(kind)
            }
            Literal::Float { suffix, .. } => Type::Primitive(suffix.unwrap_or(PrimitiveKind::F64)),
            Literal::Null => {
                Type::class(self.pkg.nothing_class, Vec::new()).with_flag(TypeFlags::NULLABLE)
            }
        }
    }

    /// A `String` literal's type: the `String` class looked up by name,
    /// the same way a type annotation would resolve it — there's no
    /// dedicated `PrimitiveKind` for strings.
    pub(crate) fn check_string_literal(&mut self, scope: caldera_ir::ScopeId, node: NodeId, span: Span) -> Type {
        self.resolve_well_known_class(scope, node, span, "String")
    }
}
