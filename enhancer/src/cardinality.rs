//! Cardinality resolution against the schema content model.
//!
//! An expanded alternative is repeating when its element particle declares
//! `maxOccurs > 1`, or when the particle's immediate parent is a choice
//! group whose own bound repeats: the choice bound multiplies into any
//! directly nested element that keeps the default bound of one.

use qbx_model::{Compositor, MaxOccurs, Particle, SchemaModel, Term};

use crate::enhanced::Cardinality;

/// Looks up the element particle for `element_name` in the content model
/// backing `type_name` and derives its cardinality. `None` means the lookup
/// failed; the caller applies the singular fallback and warns.
pub(crate) fn resolve(
    schema: &SchemaModel,
    type_name: &str,
    element_name: &str,
) -> Option<Cardinality> {
    let content = schema.content_model(type_name)?;
    let mut matches = Vec::new();
    collect(&content.particle, None, element_name, &mut matches);
    matches.first().copied()
}

/// True when the type's content model declares `member` as an element
/// particle or as an attribute.
pub(crate) fn member_in_schema(schema: &SchemaModel, type_name: &str, member: &str) -> bool {
    if resolve(schema, type_name, member).is_some() {
        return true;
    }
    schema
        .content_model(type_name)
        .is_some_and(|content| content.attributes.iter().any(|a| a.name == member))
}

fn collect(
    particle: &Particle,
    enclosing_choice: Option<&Particle>,
    element_name: &str,
    out: &mut Vec<Cardinality>,
) {
    match &particle.term {
        Term::Element(element) => {
            let matched = element.name == element_name
                || element.ref_name.as_deref() == Some(element_name);
            if matched {
                let effective = match enclosing_choice {
                    // Default-bounded element directly inside a choice:
                    // the choice bound propagates.
                    Some(choice) if particle.max_occurs == MaxOccurs::Count(1) => {
                        particle.max_occurs.mul(&choice.max_occurs)
                    }
                    _ => particle.max_occurs.clone(),
                };
                out.push(if effective.is_many() {
                    Cardinality::Many
                } else {
                    Cardinality::Single
                });
            }
        }
        Term::Group(group) => {
            let choice = (group.compositor == Compositor::Choice).then_some(particle);
            for child in &group.particles {
                collect(child, choice, element_name, out);
            }
        }
    }
}
