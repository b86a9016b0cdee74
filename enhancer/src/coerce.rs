//! Optional-scalar wrapping and the narrow, named type coercions the wire
//! format needs.
//!
//! The two coercion targets are fixed by the protocol: the iteration
//! cursor's remaining-item count (declared as text, semantically a
//! non-negative integer) and the raw `iterator` attribute (declared as
//! text, semantically an `IteratorType`). Both coercions are decode-only.
//! Re-encoding goes through the untouched raw member, which is the only
//! path validated against the schema's lexical constraints. This asymmetry
//! is deliberate and must not spread to other members.

use qbx_model::{MemberDecl, SchemaModel, TypeDecl};

use crate::cardinality;
use crate::diagnostics::Warning;
use crate::enhanced::{Cardinality, EnhancedTypeDecl, Storage, SynthesizedMember};

const ITERATOR: &str = "iterator";
const REMAINING_COUNT: &str = "iteratorRemainingCount";

pub(crate) fn is_coercion_target(wire_name: &str) -> bool {
    wire_name == ITERATOR || wire_name == REMAINING_COUNT
}

/// First pass: normalizes the iteration members. Deletes their presence
/// flags outright (these fields never legitimately report "absent" on the
/// wire) and layers a decode-only typed view over each raw member.
pub(crate) fn normalize_iteration_members(
    naive: &TypeDecl,
    schema: &SchemaModel,
    out: &mut EnhancedTypeDecl,
    warnings: &mut Vec<Warning>,
) {
    coerce_member(naive, schema, out, warnings, REMAINING_COUNT, |member| {
        Storage::CoercedCount {
            value_member: member.to_string(),
        }
    });
    coerce_member(naive, schema, out, warnings, ITERATOR, |member| {
        Storage::CoercedIterator {
            value_member: member.to_string(),
        }
    });
}

fn coerce_member(
    naive: &TypeDecl,
    schema: &SchemaModel,
    out: &mut EnhancedTypeDecl,
    warnings: &mut Vec<Warning>,
    wire_name: &str,
    storage: impl FnOnce(&str) -> Storage,
) {
    let Some(MemberDecl::Scalar(scalar)) = naive.member(wire_name) else {
        return;
    };
    if !cardinality::member_in_schema(schema, &naive.name, wire_name) {
        warnings.push(Warning::SchemaMismatch {
            type_name: naive.name.clone(),
            member: wire_name.to_string(),
        });
        return;
    }

    if scalar.presence_flag.is_some() {
        out.clear_presence_flag(wire_name);
    }
    out.hide(wire_name);

    let storage = storage(wire_name);
    let value_type = match storage {
        Storage::CoercedIterator { .. } => "IteratorType",
        _ => "int",
    };
    out.synthesized.push(SynthesizedMember {
        name: format!("{wire_name}Value"),
        value_type: value_type.to_string(),
        declared_type: false,
        cardinality: Cardinality::Single,
        storage,
    });
}

/// Fourth pass: every remaining scalar + presence-flag pair becomes one
/// optional-value accessor. Reads yield "absent" while the flag is clear;
/// writes set or clear both members together. The two-member wire encoding
/// stays exactly as the compiler produced it.
pub(crate) fn wrap_optional_scalars(
    naive: &TypeDecl,
    schema: &SchemaModel,
    all_types: &[TypeDecl],
    out: &mut EnhancedTypeDecl,
    warnings: &mut Vec<Warning>,
) {
    for member in &naive.members {
        let MemberDecl::Scalar(scalar) = member else {
            continue;
        };
        let Some(flag) = &scalar.presence_flag else {
            continue;
        };
        // Members the coercion pass already rewrote (or chose to leave
        // alone) are not wrapped again.
        if is_coercion_target(&scalar.wire_name) {
            continue;
        }
        if !cardinality::member_in_schema(schema, &naive.name, &scalar.wire_name) {
            warnings.push(Warning::SchemaMismatch {
                type_name: naive.name.clone(),
                member: scalar.wire_name.clone(),
            });
            continue;
        }

        out.hide(&scalar.wire_name);
        out.synthesized.push(SynthesizedMember {
            name: format!("{}Value", scalar.wire_name),
            value_type: scalar.value_type.clone(),
            declared_type: crate::expand::is_declared_type(all_types, &scalar.value_type),
            cardinality: Cardinality::Single,
            storage: Storage::OptionalScalar {
                value_member: scalar.wire_name.clone(),
                flag_member: flag.clone(),
            },
        });
    }
}
