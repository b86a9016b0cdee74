//! The naive type model produced by the schema compiler: one type per
//! complex type, one member per element or attribute, with the compiler's
//! serialization idioms (aggregator slots, discriminator enums, presence
//! flags) copied through untouched.

/// One schema-compiled type. Member order is wire order and is semantically
/// significant: it constrains the order the serializer emits elements in.
#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub name: String,
    pub members: Vec<MemberDecl>,
}

impl TypeDecl {
    pub fn member(&self, wire_name: &str) -> Option<&MemberDecl> {
        self.members.iter().find(|m| m.wire_name() == wire_name)
    }
}

#[derive(Clone, Debug)]
pub enum MemberDecl {
    /// A plain element or attribute member, possibly paired with a boolean
    /// presence-flag companion.
    Scalar(ScalarMember),
    /// An untyped slot standing in for a schema choice or sequence group
    /// (the compiler's "Items"/"Item" idiom).
    Aggregator(AggregatorMember),
    /// The enum companion of a true-choice aggregator, recording which
    /// alternative is currently populated.
    Discriminator(DiscriminatorMember),
}

impl MemberDecl {
    pub fn wire_name(&self) -> &str {
        match self {
            Self::Scalar(member) => &member.wire_name,
            Self::Aggregator(member) => &member.wire_name,
            Self::Discriminator(member) => &member.wire_name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScalarMember {
    pub wire_name: String,
    pub value_type: String,
    /// Wire name of the companion presence-flag member, if any.
    pub presence_flag: Option<String>,
    pub is_attribute: bool,
}

#[derive(Clone, Debug)]
pub struct AggregatorMember {
    pub wire_name: String,
    pub alternatives: Vec<Alternative>,
    /// Wire name of the discriminator member when the aggregator stands in
    /// for a true choice; `None` for sequence-group aggregation.
    pub discriminator: Option<String>,
}

/// One element alternative an aggregator stands in for.
#[derive(Clone, Debug)]
pub struct Alternative {
    pub element_name: String,
    pub value_type: String,
}

#[derive(Clone, Debug)]
pub struct DiscriminatorMember {
    pub wire_name: String,
    pub enum_name: String,
    /// Variant names, 1:1 with the aggregator's alternatives.
    pub values: Vec<String>,
}
