//! Maps the subset of XSD this protocol uses onto the schema model:
//! top-level complex types and element declarations, sequence/choice groups
//! with occurrence bounds, and attributes declared on complex types.

use qbx_model::{
    AttributeDecl, Compositor, ContentModel, ElementDecl, MaxOccurs, ModelGroup, Particle,
    SchemaModel, Term,
};
use roxmltree::{Document, Node};

pub fn load_schema(document: &Document) -> SchemaModel {
    let root = document.root_element();
    let mut schema = SchemaModel::new();
    // Elements declared via type="..." can only be resolved once every
    // named complex type has been mapped.
    let mut element_refs = Vec::new();

    for child in root.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "complexType" => {
                if let (Some(name), Some(content)) = (child.attribute("name"), map_content(child))
                {
                    schema.insert_complex_type(name, content);
                }
            }
            "element" => {
                let Some(name) = child.attribute("name") else {
                    continue;
                };
                if let Some(type_name) = child.attribute("type") {
                    element_refs.push((name.to_string(), local_name(type_name).to_string()));
                } else if let Some(inline) = named_child(child, "complexType") {
                    if let Some(content) = map_content(inline) {
                        schema.insert_top_level_element(name, content);
                    }
                }
            }
            _ => {}
        }
    }

    for (element, type_name) in element_refs {
        if let Some(content) = schema.complex_type(&type_name).cloned() {
            schema.insert_top_level_element(&element, content);
        }
    }

    schema
}

fn map_content(complex_type: Node) -> Option<ContentModel> {
    let group = complex_type
        .children()
        .filter(Node::is_element)
        .find(|c| matches!(c.tag_name().name(), "sequence" | "choice"))?;

    let attributes = complex_type
        .children()
        .filter(Node::is_element)
        .filter(|c| c.tag_name().name() == "attribute")
        .filter_map(|c| {
            Some(AttributeDecl {
                name: c.attribute("name")?.to_string(),
                value_type: c
                    .attribute("type")
                    .map(|t| local_name(t).to_string())
                    .unwrap_or_else(|| "string".to_string()),
            })
        })
        .collect();

    Some(ContentModel {
        particle: map_group(group),
        attributes,
    })
}

fn map_group(node: Node) -> Particle {
    let compositor = match node.tag_name().name() {
        "choice" => Compositor::Choice,
        _ => Compositor::Sequence,
    };
    let particles = node
        .children()
        .filter(Node::is_element)
        .filter_map(map_particle)
        .collect();

    Particle {
        min_occurs: min_occurs(node),
        max_occurs: max_occurs(node),
        term: Term::Group(ModelGroup {
            compositor,
            particles,
        }),
    }
}

fn map_particle(node: Node) -> Option<Particle> {
    match node.tag_name().name() {
        "element" => {
            let ref_name = node.attribute("ref").map(local_name);
            let name = node.attribute("name").or(ref_name)?;
            Some(Particle {
                min_occurs: min_occurs(node),
                max_occurs: max_occurs(node),
                term: Term::Element(ElementDecl {
                    name: name.to_string(),
                    ref_name: ref_name.map(str::to_string),
                    type_name: node.attribute("type").map(|t| local_name(t).to_string()),
                }),
            })
        }
        "sequence" | "choice" => Some(map_group(node)),
        _ => None,
    }
}

fn min_occurs(node: Node) -> u64 {
    node.attribute("minOccurs")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
}

fn max_occurs(node: Node) -> MaxOccurs {
    match node.attribute("maxOccurs") {
        Some("unbounded") => MaxOccurs::Unbounded,
        Some(value) => value
            .parse()
            .map(MaxOccurs::Count)
            .unwrap_or(MaxOccurs::Count(1)),
        None => MaxOccurs::Count(1),
    }
}

fn named_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .filter(Node::is_element)
        .find(|c| c.tag_name().name() == name)
}

fn local_name(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}
