//! Mechanical compilation of the schema catalog into the naive type model,
//! shaped the way the upstream schema compiler shapes it: one type per
//! complex type, choice groups collapsed into an untyped aggregator slot
//! with a discriminator companion, optional value-typed scalars paired with
//! presence flags. The enhancer patches these idioms up afterwards; nothing
//! here tries to be ergonomic.

use qbx_model::{
    AggregatorMember, Alternative, AttributeDecl, Compositor, ElementDecl, DiscriminatorMember,
    MemberDecl, ModelGroup, Particle, ScalarMember, SchemaModel, Term, TypeDecl,
};

pub fn compile_types(schema: &SchemaModel) -> Vec<TypeDecl> {
    let mut names: Vec<&str> = schema.complex_type_names().collect();
    names.extend(
        schema
            .top_level_element_names()
            .filter(|name| schema.complex_type(name).is_none()),
    );
    names.sort_unstable();
    names
        .into_iter()
        .filter_map(|name| compile_type(schema, name))
        .collect()
}

fn compile_type(schema: &SchemaModel, name: &str) -> Option<TypeDecl> {
    let content = schema.content_model(name)?;
    let mut members = Vec::new();

    match &content.particle.term {
        Term::Group(group) => compile_group_children(name, group, &mut members),
        Term::Element(element) => members.push(element_member(element, &content.particle)),
    }
    for attribute in &content.attributes {
        members.push(attribute_member(attribute));
    }

    Some(TypeDecl {
        name: name.to_string(),
        members,
    })
}

fn compile_group_children(type_name: &str, group: &ModelGroup, members: &mut Vec<MemberDecl>) {
    for particle in &group.particles {
        match &particle.term {
            Term::Element(element) => members.push(element_member(element, particle)),
            Term::Group(child) => match child.compositor {
                Compositor::Choice => push_aggregator(type_name, particle, child, true, members),
                Compositor::Sequence if particle.max_occurs.is_many() => {
                    push_aggregator(type_name, particle, child, false, members)
                }
                // Non-repeating nested sequences flatten into the parent.
                Compositor::Sequence => compile_group_children(type_name, child, members),
            },
        }
    }
}

fn push_aggregator(
    type_name: &str,
    particle: &Particle,
    group: &ModelGroup,
    is_choice: bool,
    members: &mut Vec<MemberDecl>,
) {
    let preceding = members
        .iter()
        .filter(|m| matches!(m, MemberDecl::Aggregator(_)))
        .count();
    let wire_name = match (particle.max_occurs.is_many(), preceding) {
        (true, 0) => "Items".to_string(),
        (false, 0) => "Item".to_string(),
        (_, n) => format!("Item{n}"),
    };

    let mut alternatives = Vec::new();
    collect_alternatives(group, &mut alternatives);

    let discriminator = is_choice.then(|| {
        let disc_name = format!("{wire_name}ElementName");
        members.push(MemberDecl::Discriminator(DiscriminatorMember {
            wire_name: disc_name.clone(),
            enum_name: format!("{type_name}{wire_name}ChoiceType"),
            values: alternatives.iter().map(|a| a.element_name.clone()).collect(),
        }));
        disc_name
    });

    // Keep the aggregator ahead of its discriminator companion in wire
    // order, the way the compiler lays the pair out.
    let aggregator = MemberDecl::Aggregator(AggregatorMember {
        wire_name,
        alternatives,
        discriminator,
    });
    members.insert(members.len() - usize::from(is_choice), aggregator);
}

fn collect_alternatives(group: &ModelGroup, out: &mut Vec<Alternative>) {
    for particle in &group.particles {
        match &particle.term {
            Term::Element(element) => out.push(Alternative {
                element_name: element.name.clone(),
                value_type: element_value_type(element),
            }),
            Term::Group(child) => collect_alternatives(child, out),
        }
    }
}

fn element_member(element: &ElementDecl, particle: &Particle) -> MemberDecl {
    let value_type = element_value_type(element);
    let presence_flag = (particle.min_occurs == 0 && is_value_type(&value_type))
        .then(|| format!("{}Specified", element.name));
    MemberDecl::Scalar(ScalarMember {
        wire_name: element.name.clone(),
        value_type,
        presence_flag,
        is_attribute: false,
    })
}

fn attribute_member(attribute: &AttributeDecl) -> MemberDecl {
    // Integer-typed wire text compiles to a plain string member, the idiom
    // the enhancer's named coercions exist for.
    let value_type = match attribute.value_type.as_str() {
        "integer" | "nonNegativeInteger" | "positiveInteger" => "string".to_string(),
        other => other.to_string(),
    };
    let presence_flag = (attribute.value_type != "string")
        .then(|| format!("{}Specified", attribute.name));
    MemberDecl::Scalar(ScalarMember {
        wire_name: attribute.name.clone(),
        value_type,
        presence_flag,
        is_attribute: true,
    })
}

fn element_value_type(element: &ElementDecl) -> String {
    element
        .type_name
        .clone()
        .or_else(|| element.ref_name.clone())
        .unwrap_or_else(|| "string".to_string())
}

fn is_value_type(name: &str) -> bool {
    matches!(
        name,
        "int" | "integer" | "boolean" | "decimal" | "float" | "double" | "date" | "dateTime" | "time"
    )
}
