//! Content-model tree of one complex type, as handed over by the schema
//! loader. The shape mirrors the XSD particle structure: an element
//! declaration or a model group, each carrying occurrence bounds.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaxOccurs {
    Unbounded,
    Count(u64),
}

impl MaxOccurs {
    pub fn mul(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Unbounded, _) | (_, Self::Unbounded) => Self::Unbounded,
            (Self::Count(a), Self::Count(b)) => Self::Count(a * b),
        }
    }

    pub fn is_many(&self) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Count(n) => *n > 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub min_occurs: u64,
    pub max_occurs: MaxOccurs,
    pub term: Term,
}

#[derive(Clone, Debug)]
pub enum Term {
    Element(ElementDecl),
    Group(ModelGroup),
}

/// An element particle. `ref_name` is set when the particle references a
/// top-level element declaration instead of declaring the element locally;
/// `type_name` carries the declared schema type, if one is named.
#[derive(Clone, Debug)]
pub struct ElementDecl {
    pub name: String,
    pub ref_name: Option<String>,
    pub type_name: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ModelGroup {
    pub compositor: Compositor,
    pub particles: Vec<Particle>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compositor {
    Sequence,
    Choice,
}

/// An attribute declared on a complex type. Attributes carry no occurrence
/// bounds; presence is governed by the naive model's presence flags instead.
#[derive(Clone, Debug)]
pub struct AttributeDecl {
    pub name: String,
    pub value_type: String,
}

impl Particle {
    pub fn element(name: &str, min_occurs: u64, max_occurs: MaxOccurs) -> Self {
        Self {
            min_occurs,
            max_occurs,
            term: Term::Element(ElementDecl {
                name: name.to_string(),
                ref_name: None,
                type_name: None,
            }),
        }
    }

    pub fn group(
        compositor: Compositor,
        min_occurs: u64,
        max_occurs: MaxOccurs,
        particles: Vec<Particle>,
    ) -> Self {
        Self {
            min_occurs,
            max_occurs,
            term: Term::Group(ModelGroup {
                compositor,
                particles,
            }),
        }
    }
}
