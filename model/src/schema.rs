use std::collections::HashMap;

use crate::particle::{AttributeDecl, Particle};

/// The content model of one complex type: its particle tree plus the
/// attributes declared directly on the type.
#[derive(Clone, Debug)]
pub struct ContentModel {
    pub particle: Particle,
    pub attributes: Vec<AttributeDecl>,
}

/// Read-only catalog of content models, keyed by named complex type and by
/// top-level element declaration. Built once by the schema loader.
#[derive(Debug, Default)]
pub struct SchemaModel {
    complex_types: HashMap<String, ContentModel>,
    top_level_elements: HashMap<String, ContentModel>,
}

impl SchemaModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_complex_type(&mut self, name: &str, content: ContentModel) {
        self.complex_types.insert(name.to_string(), content);
    }

    pub fn insert_top_level_element(&mut self, name: &str, content: ContentModel) {
        self.top_level_elements.insert(name.to_string(), content);
    }

    pub fn complex_type(&self, name: &str) -> Option<&ContentModel> {
        self.complex_types.get(name)
    }

    /// Content model backing the type of the given name: a named complex
    /// type takes precedence, then a top-level element declaration whose
    /// (possibly anonymous) type provides the particle tree.
    pub fn content_model(&self, name: &str) -> Option<&ContentModel> {
        self.complex_types
            .get(name)
            .or_else(|| self.top_level_elements.get(name))
    }

    pub fn complex_type_names(&self) -> impl Iterator<Item = &str> {
        self.complex_types.keys().map(String::as_str)
    }

    pub fn top_level_element_names(&self) -> impl Iterator<Item = &str> {
        self.top_level_elements.keys().map(String::as_str)
    }
}
