//! Rewrites the schema-compiled ("naive") QBXML type model into an
//! ergonomic API surface while preserving exact wire-format compatibility.
//!
//! The naive model exposes the schema compiler's serialization idioms
//! directly: untyped choice aggregators, raw value + presence-flag pairs,
//! and a handful of members whose wire type does not match their semantic
//! type. [`enhance`] runs a fixed, ordered set of rewrite passes over one
//! type and produces an [`EnhancedTypeDecl`] the emitter renders verbatim.
//! Passes only hide or append members; wire-affecting members keep their
//! set and relative order.

mod capability;
mod cardinality;
mod coerce;
mod diagnostics;
mod enhanced;
mod expand;

pub use diagnostics::{EnhanceError, Warning};
pub use enhanced::{
    Cardinality, ChoiceKey, EnhancedTypeDecl, Storage, SynthesizedMember, WireMember,
};
pub use qbx_runtime::Capability;

use qbx_model::{MemberDecl, SchemaModel, TypeDecl};

/// The enhanced type plus the non-fatal diagnostics collected while
/// producing it.
#[derive(Clone, Debug)]
pub struct Enhancement {
    pub type_decl: EnhancedTypeDecl,
    pub warnings: Vec<Warning>,
}

/// Enhances one type. Pure function of its inputs; `all_types` and `schema`
/// are consulted read-only, so types can be enhanced in any order (or in
/// parallel).
///
/// Pass order is fixed, later passes assume earlier ones already rewrote
/// the members they target:
///
/// 1. iteration-member normalization (named decode-only coercions),
/// 2. aggregator expansion with cardinality resolution,
/// 3. aggregator/discriminator hiding,
/// 4. optional-scalar wrapping,
/// 5. capability tagging.
pub fn enhance(
    naive: &TypeDecl,
    schema: &SchemaModel,
    all_types: &[TypeDecl],
) -> Result<Enhancement, EnhanceError> {
    let mut out = EnhancedTypeDecl::from_naive(naive);
    let mut warnings = Vec::new();

    coerce::normalize_iteration_members(naive, schema, &mut out, &mut warnings);

    let mut expanded = Vec::new();
    for member in &naive.members {
        if let MemberDecl::Aggregator(aggregator) = member {
            expand::expand_aggregator(naive, aggregator, schema, all_types, &mut out, &mut warnings)?;
            expanded.push(aggregator.wire_name.clone());
            expanded.extend(aggregator.discriminator.clone());
        }
    }
    for wire_name in &expanded {
        out.hide(wire_name);
    }

    coerce::wrap_optional_scalars(naive, schema, all_types, &mut out, &mut warnings);

    out.capability = capability::tag(naive, &mut warnings);

    Ok(Enhancement {
        type_decl: out,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbx_model::{
        AggregatorMember, Alternative, AttributeDecl, Compositor, ContentModel,
        DiscriminatorMember, MaxOccurs, Particle, ScalarMember,
    };

    fn scalar(wire_name: &str, value_type: &str, presence_flag: Option<&str>) -> MemberDecl {
        MemberDecl::Scalar(ScalarMember {
            wire_name: wire_name.to_string(),
            value_type: value_type.to_string(),
            presence_flag: presence_flag.map(str::to_string),
            is_attribute: false,
        })
    }

    fn attribute(wire_name: &str, value_type: &str, presence_flag: Option<&str>) -> MemberDecl {
        MemberDecl::Scalar(ScalarMember {
            wire_name: wire_name.to_string(),
            value_type: value_type.to_string(),
            presence_flag: presence_flag.map(str::to_string),
            is_attribute: true,
        })
    }

    fn query_type() -> TypeDecl {
        TypeDecl {
            name: "CustomerQueryRqType".to_string(),
            members: vec![
                MemberDecl::Aggregator(AggregatorMember {
                    wire_name: "Items".to_string(),
                    alternatives: vec![
                        Alternative {
                            element_name: "ListID".to_string(),
                            value_type: "string".to_string(),
                        },
                        Alternative {
                            element_name: "FullName".to_string(),
                            value_type: "string".to_string(),
                        },
                    ],
                    discriminator: Some("ItemsElementName".to_string()),
                }),
                MemberDecl::Discriminator(DiscriminatorMember {
                    wire_name: "ItemsElementName".to_string(),
                    enum_name: "ItemsChoiceType".to_string(),
                    values: vec!["ListID".to_string(), "FullName".to_string()],
                }),
                scalar("ActiveStatus", "string", None),
            ],
        }
    }

    fn query_schema() -> SchemaModel {
        let mut schema = SchemaModel::new();
        schema.insert_complex_type(
            "CustomerQueryRqType",
            ContentModel {
                particle: Particle::group(
                    Compositor::Sequence,
                    1,
                    MaxOccurs::Count(1),
                    vec![
                        Particle::element("ListID", 0, MaxOccurs::Count(1)),
                        Particle::group(
                            Compositor::Choice,
                            0,
                            MaxOccurs::Unbounded,
                            vec![Particle::element("FullName", 1, MaxOccurs::Count(1))],
                        ),
                        Particle::element("ActiveStatus", 0, MaxOccurs::Count(1)),
                    ],
                ),
                attributes: Vec::new(),
            },
        );
        schema
    }

    fn accessor<'a>(enhancement: &'a Enhancement, name: &str) -> &'a SynthesizedMember {
        enhancement
            .type_decl
            .synthesized
            .iter()
            .find(|m| m.name == name)
            .unwrap_or_else(|| panic!("no synthesized member {name:?}"))
    }

    #[test]
    fn wire_members_keep_set_and_order() {
        let naive = query_type();
        let enhancement = enhance(&naive, &query_schema(), &[]).unwrap();

        let wire: Vec<&str> = enhancement
            .type_decl
            .members
            .iter()
            .map(|m| m.decl.wire_name())
            .collect();
        assert_eq!(wire, ["Items", "ItemsElementName", "ActiveStatus"]);
        assert!(enhancement.warnings.is_empty());
    }

    #[test]
    fn aggregator_and_discriminator_are_hidden_but_kept() {
        let enhancement = enhance(&query_type(), &query_schema(), &[]).unwrap();
        let decl = &enhancement.type_decl;

        assert!(decl.wire_member("Items").unwrap().hidden);
        assert!(decl.wire_member("ItemsElementName").unwrap().hidden);
        let visible: Vec<&str> = decl.visible_members().map(MemberDecl::wire_name).collect();
        assert_eq!(visible, ["ActiveStatus"]);
    }

    #[test]
    fn alternatives_expand_with_resolved_cardinality() {
        let enhancement = enhance(&query_type(), &query_schema(), &[]).unwrap();

        let list_id = accessor(&enhancement, "ListID");
        assert_eq!(list_id.cardinality, Cardinality::Single);
        assert_eq!(
            list_id.storage,
            Storage::ChoiceItem {
                aggregator: "Items".to_string(),
                key: Some(ChoiceKey {
                    enum_name: "ItemsChoiceType".to_string(),
                    variant: "ListID".to_string(),
                }),
            }
        );

        let full_name = accessor(&enhancement, "FullName");
        assert_eq!(full_name.cardinality, Cardinality::Many);
    }

    #[test]
    fn sequence_group_aggregation_has_no_key() {
        let naive = TypeDecl {
            name: "DataExtRetList".to_string(),
            members: vec![MemberDecl::Aggregator(AggregatorMember {
                wire_name: "Items".to_string(),
                alternatives: vec![Alternative {
                    element_name: "DataExtRet".to_string(),
                    value_type: "DataExtRetType".to_string(),
                }],
                discriminator: None,
            })],
        };
        let mut schema = SchemaModel::new();
        schema.insert_complex_type(
            "DataExtRetList",
            ContentModel {
                particle: Particle::group(
                    Compositor::Sequence,
                    1,
                    MaxOccurs::Count(1),
                    vec![Particle::element("DataExtRet", 0, MaxOccurs::Unbounded)],
                ),
                attributes: Vec::new(),
            },
        );
        let catalog = vec![TypeDecl {
            name: "DataExtRetType".to_string(),
            members: vec![],
        }];

        let enhancement = enhance(&naive, &schema, &catalog).unwrap();
        let ret = accessor(&enhancement, "DataExtRet");
        assert_eq!(ret.cardinality, Cardinality::Many);
        assert!(ret.declared_type);
        assert_eq!(
            ret.storage,
            Storage::ChoiceItem {
                aggregator: "Items".to_string(),
                key: None,
            }
        );
    }

    #[test]
    fn missing_alternative_falls_back_to_singular_with_one_warning() {
        let mut naive = query_type();
        if let MemberDecl::Aggregator(aggregator) = &mut naive.members[0] {
            aggregator.alternatives.push(Alternative {
                element_name: "TotalBalance".to_string(),
                value_type: "string".to_string(),
            });
        }

        let enhancement = enhance(&naive, &query_schema(), &[]).unwrap();
        assert_eq!(
            enhancement.warnings,
            vec![Warning::SchemaMismatch {
                type_name: "CustomerQueryRqType".to_string(),
                member: "TotalBalance".to_string(),
            }]
        );
        assert_eq!(
            accessor(&enhancement, "TotalBalance").cardinality,
            Cardinality::Single
        );
        // The rest of the type is still enhanced.
        assert_eq!(enhancement.type_decl.synthesized.len(), 3);
    }

    #[test]
    fn dangling_discriminator_reference_is_fatal() {
        let naive = TypeDecl {
            name: "BrokenType".to_string(),
            members: vec![MemberDecl::Aggregator(AggregatorMember {
                wire_name: "Items".to_string(),
                alternatives: vec![],
                discriminator: Some("ItemsElementName".to_string()),
            })],
        };

        let error = enhance(&naive, &SchemaModel::new(), &[]).unwrap_err();
        assert!(matches!(error, EnhanceError::MalformedAggregator { .. }));
    }

    #[test]
    fn optional_scalar_pair_becomes_one_value_accessor() {
        let naive = TypeDecl {
            name: "CustomerRetType".to_string(),
            members: vec![scalar("Sublevel", "int", Some("SublevelSpecified"))],
        };
        let mut schema = SchemaModel::new();
        schema.insert_complex_type(
            "CustomerRetType",
            ContentModel {
                particle: Particle::group(
                    Compositor::Sequence,
                    1,
                    MaxOccurs::Count(1),
                    vec![Particle::element("Sublevel", 0, MaxOccurs::Count(1))],
                ),
                attributes: Vec::new(),
            },
        );

        let enhancement = enhance(&naive, &schema, &[]).unwrap();
        let decl = &enhancement.type_decl;
        let raw = decl.wire_member("Sublevel").unwrap();
        assert!(raw.hidden);
        match &raw.decl {
            MemberDecl::Scalar(scalar) => {
                // The wire encoding keeps its flag; only the presentation
                // changes.
                assert_eq!(scalar.presence_flag.as_deref(), Some("SublevelSpecified"));
            }
            _ => panic!("expected scalar member"),
        }

        let value = accessor(&enhancement, "SublevelValue");
        assert_eq!(
            value.storage,
            Storage::OptionalScalar {
                value_member: "Sublevel".to_string(),
                flag_member: "SublevelSpecified".to_string(),
            }
        );
        assert!(enhancement.warnings.is_empty());
    }

    fn response_schema() -> SchemaModel {
        let mut schema = SchemaModel::new();
        schema.insert_complex_type(
            "CustomerQueryRsType",
            ContentModel {
                particle: Particle::group(Compositor::Sequence, 1, MaxOccurs::Count(1), vec![]),
                attributes: vec![
                    AttributeDecl {
                        name: "iterator".to_string(),
                        value_type: "string".to_string(),
                    },
                    AttributeDecl {
                        name: "iteratorID".to_string(),
                        value_type: "string".to_string(),
                    },
                    AttributeDecl {
                        name: "iteratorRemainingCount".to_string(),
                        value_type: "string".to_string(),
                    },
                ],
            },
        );
        schema
    }

    #[test]
    fn remaining_count_coercion_deletes_flag_and_adds_decode_view() {
        let naive = TypeDecl {
            name: "CustomerQueryRsType".to_string(),
            members: vec![
                attribute("iteratorID", "string", None),
                attribute(
                    "iteratorRemainingCount",
                    "string",
                    Some("iteratorRemainingCountSpecified"),
                ),
            ],
        };

        let enhancement = enhance(&naive, &response_schema(), &[]).unwrap();
        let decl = &enhancement.type_decl;

        // The flag is the one sanctioned deletion; the raw text member
        // stays for the encode path.
        let raw = decl.wire_member("iteratorRemainingCount").unwrap();
        assert!(raw.hidden);
        match &raw.decl {
            MemberDecl::Scalar(scalar) => assert!(scalar.presence_flag.is_none()),
            _ => panic!("expected scalar member"),
        }

        let value = accessor(&enhancement, "iteratorRemainingCountValue");
        assert_eq!(value.value_type, "int");
        assert_eq!(
            value.storage,
            Storage::CoercedCount {
                value_member: "iteratorRemainingCount".to_string(),
            }
        );
        assert_eq!(enhancement.type_decl.capability, Capability::IterationResponse);
        assert!(enhancement.warnings.is_empty());
    }

    #[test]
    fn iterator_attribute_coerces_to_iterator_type() {
        let naive = TypeDecl {
            name: "CustomerQueryRsType".to_string(),
            members: vec![attribute("iterator", "string", Some("iteratorSpecified"))],
        };

        let enhancement = enhance(&naive, &response_schema(), &[]).unwrap();
        let decl = &enhancement.type_decl;
        match &decl.wire_member("iterator").unwrap().decl {
            MemberDecl::Scalar(scalar) => assert!(scalar.presence_flag.is_none()),
            _ => panic!("expected scalar member"),
        }

        let value = accessor(&enhancement, "iteratorValue");
        assert_eq!(value.value_type, "IteratorType");
        assert_eq!(
            value.storage,
            Storage::CoercedIterator {
                value_member: "iterator".to_string(),
            }
        );
    }

    #[test]
    fn iteration_request_shape_is_tagged() {
        let naive = TypeDecl {
            name: "CustomerQueryRqType".to_string(),
            members: vec![
                attribute("iteratorID", "string", None),
                scalar("MaxReturned", "int", None),
            ],
        };
        let enhancement = enhance(&naive, &query_schema(), &[]).unwrap();
        assert_eq!(enhancement.type_decl.capability, Capability::IterationRequest);
    }

    #[test]
    fn plain_type_is_untagged() {
        let naive = TypeDecl {
            name: "VendorRetType".to_string(),
            members: vec![scalar("Name", "string", None)],
        };
        let enhancement = enhance(&naive, &SchemaModel::new(), &[]).unwrap();
        assert_eq!(enhancement.type_decl.capability, Capability::None);
    }

    #[test]
    fn both_shapes_warn_and_stay_untagged() {
        let naive = TypeDecl {
            name: "ConfusedType".to_string(),
            members: vec![
                attribute("iteratorID", "string", None),
                scalar("MaxReturned", "int", None),
                attribute("iteratorRemainingCount", "string", None),
            ],
        };
        let enhancement = enhance(&naive, &response_schema(), &[]).unwrap();
        assert_eq!(enhancement.type_decl.capability, Capability::None);
        assert!(enhancement
            .warnings
            .contains(&Warning::AmbiguousCapability {
                type_name: "ConfusedType".to_string(),
            }));
    }
}
