use crate::data_structures::material::{Material, MaterialDef};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterialError {
    #[error("no materials are defined, cannot look up `{0}`")]
    Empty(String),
    #[error("no material defined under `{0}`")]
    UnknownTag(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialEntry {
    pub tag: String,
    pub material: Material,
}

/// Tag to material mapping. If a tag is defined twice, lookups return the first
/// definition.
#[derive(Debug, Default, Clone)]
pub struct MaterialRegistry {
    entries: Vec<MaterialEntry>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, tag: &str, diffuse: [f32; 3], specular: [f32; 3], shininess: f32) {
        self.define_material(tag, Material::new(diffuse, specular, shininess));
    }

    pub fn define_material(&mut self, tag: &str, material: Material) {
        if self.entries.iter().any(|entry| entry.tag == tag) {
            log::warn!("material `{tag}` is defined twice, the first definition is kept");
        }
        self.entries.push(MaterialEntry {
            tag: tag.to_string(),
            material,
        });
    }

    pub fn define_all(&mut self, defs: &[MaterialDef]) {
        for def in defs {
            self.define_material(def.tag, def.material());
        }
    }

    pub fn find(&self, tag: &str) -> Result<&Material, MaterialError> {
        if self.entries.is_empty() {
            return Err(MaterialError::Empty(tag.to_string()));
        }
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| &entry.material)
            .ok_or_else(|| MaterialError::UnknownTag(tag.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
