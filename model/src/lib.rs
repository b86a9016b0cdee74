pub mod decl;
pub mod particle;
pub mod schema;

pub use decl::{
    AggregatorMember, Alternative, DiscriminatorMember, MemberDecl, ScalarMember, TypeDecl,
};
pub use particle::{AttributeDecl, Compositor, ElementDecl, MaxOccurs, ModelGroup, Particle, Term};
pub use schema::{ContentModel, SchemaModel};
