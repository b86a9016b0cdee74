use qbx_model::{MemberDecl, TypeDecl};
use qbx_runtime::Capability;

/// One type after enhancement: the original wire members (some hidden, one
/// sanctioned deletion) plus plain-data descriptors for the ergonomic
/// members layered on top. The emitter renders these descriptors without
/// any further decisions of its own.
#[derive(Clone, Debug)]
pub struct EnhancedTypeDecl {
    pub name: String,
    /// Original members in wire order. Hidden members still occupy their
    /// relative positions; the serializer needs them.
    pub members: Vec<WireMember>,
    /// Appended ergonomic members. Order among these carries no wire
    /// position.
    pub synthesized: Vec<SynthesizedMember>,
    pub capability: Capability,
}

#[derive(Clone, Debug)]
pub struct WireMember {
    pub decl: MemberDecl,
    /// Excluded from default presentation but kept for wire fidelity.
    pub hidden: bool,
}

impl EnhancedTypeDecl {
    pub(crate) fn from_naive(naive: &TypeDecl) -> Self {
        Self {
            name: naive.name.clone(),
            members: naive
                .members
                .iter()
                .map(|decl| WireMember {
                    decl: decl.clone(),
                    hidden: false,
                })
                .collect(),
            synthesized: Vec::new(),
            capability: Capability::None,
        }
    }

    pub fn wire_member(&self, wire_name: &str) -> Option<&WireMember> {
        self.members.iter().find(|m| m.decl.wire_name() == wire_name)
    }

    pub fn visible_members(&self) -> impl Iterator<Item = &MemberDecl> {
        self.members.iter().filter(|m| !m.hidden).map(|m| &m.decl)
    }

    pub(crate) fn hide(&mut self, wire_name: &str) {
        if let Some(member) = self
            .members
            .iter_mut()
            .find(|m| m.decl.wire_name() == wire_name)
        {
            member.hidden = true;
        }
    }

    /// Deletes a scalar's presence-flag companion outright. Only the named
    /// iteration coercions go through here; everything else is hidden, not
    /// removed.
    pub(crate) fn clear_presence_flag(&mut self, wire_name: &str) {
        if let Some(member) = self
            .members
            .iter_mut()
            .find(|m| m.decl.wire_name() == wire_name)
        {
            if let MemberDecl::Scalar(scalar) = &mut member.decl {
                scalar.presence_flag = None;
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct SynthesizedMember {
    pub name: String,
    pub value_type: String,
    /// True when `value_type` names another type in the catalog rather than
    /// a schema builtin.
    pub declared_type: bool,
    pub cardinality: Cardinality,
    pub storage: Storage,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Many,
}

/// Discriminator enum value keying one alternative in the choice item store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceKey {
    pub enum_name: String,
    pub variant: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Storage {
    /// Backed by the aggregator's choice item store. `key` is present for
    /// true choices and absent for sequence-group aggregation.
    ChoiceItem {
        aggregator: String,
        key: Option<ChoiceKey>,
    },
    /// Proxies a raw value member and its presence flag as one optional
    /// value.
    OptionalScalar {
        value_member: String,
        flag_member: String,
    },
    /// Decode-only view of a wire text member as a non-negative integer.
    /// Re-encoding goes through the unmodified raw member.
    CoercedCount { value_member: String },
    /// Decode-only view of the raw iterator attribute as `IteratorType`.
    CoercedIterator { value_member: String },
}
