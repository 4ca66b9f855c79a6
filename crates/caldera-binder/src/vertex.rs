//! The subtype graph's vertex space: classes/traits and type parameters
//! share one graph, so a type parameter whose upper bound is another type
//! parameter and a class whose supertype is another class are both just
//! edges between `Vertex`es.

use caldera_ir::{TypeDefnId, TypeParameterId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    Defn(TypeDefnId),
    TypeParam(TypeParameterId),
}
