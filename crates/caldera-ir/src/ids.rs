//! Id newtypes for every definition arena in a `Package`.

use caldera_common::new_id;

new_id!(TypeDefnId, "defn"); // a Class or a Trait
new_id!(TypeParameterId, "tparam");
new_id!(FunctionId, "fn");
new_id!(FieldId, "field");
new_id!(GlobalId, "global");
new_id!(VariableId, "var");
