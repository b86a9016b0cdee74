//! Aggregator expansion: one named, correctly typed accessor descriptor per
//! alternative, backed by the aggregator's choice item store.

use qbx_model::{AggregatorMember, MemberDecl, SchemaModel, TypeDecl};

use crate::cardinality;
use crate::diagnostics::{EnhanceError, Warning};
use crate::enhanced::{Cardinality, ChoiceKey, EnhancedTypeDecl, Storage, SynthesizedMember};

pub(crate) fn expand_aggregator(
    naive: &TypeDecl,
    aggregator: &AggregatorMember,
    schema: &SchemaModel,
    all_types: &[TypeDecl],
    out: &mut EnhancedTypeDecl,
    warnings: &mut Vec<Warning>,
) -> Result<(), EnhanceError> {
    let discriminator = match &aggregator.discriminator {
        Some(reference) => match naive.member(reference) {
            Some(MemberDecl::Discriminator(decl)) => Some(decl),
            _ => {
                // The naive model is internally inconsistent; there is no
                // safe default for a dangling discriminator reference.
                return Err(EnhanceError::MalformedAggregator {
                    type_name: naive.name.clone(),
                    aggregator: aggregator.wire_name.clone(),
                    discriminator: reference.clone(),
                });
            }
        },
        None => None,
    };

    for alternative in &aggregator.alternatives {
        let cardinality =
            match cardinality::resolve(schema, &naive.name, &alternative.element_name) {
                Some(cardinality) => cardinality,
                None => {
                    warnings.push(Warning::SchemaMismatch {
                        type_name: naive.name.clone(),
                        member: alternative.element_name.clone(),
                    });
                    Cardinality::Single
                }
            };

        let key = discriminator.map(|decl| ChoiceKey {
            enum_name: decl.enum_name.clone(),
            variant: alternative.element_name.clone(),
        });

        out.synthesized.push(SynthesizedMember {
            name: alternative.element_name.clone(),
            value_type: alternative.value_type.clone(),
            declared_type: is_declared_type(all_types, &alternative.value_type),
            cardinality,
            storage: Storage::ChoiceItem {
                aggregator: aggregator.wire_name.clone(),
                key,
            },
        });
    }

    Ok(())
}

pub(crate) fn is_declared_type(all_types: &[TypeDecl], value_type: &str) -> bool {
    all_types.iter().any(|t| t.name == value_type)
}
