use glam::Vec4;
use toon_xml::{Color, Material, Named, Property, PropertySource, TexEnv, TextureRef};
use tracing::debug;

use crate::apply::MaterialSink;
use crate::lookups::{LILTOON_PROPERTIES, LILTOON_SHADERS};

/// A material document entry being rewritten for lilToon. Only properties the lilToon
/// shaders expose, with the kind they expose them as, are ever written.
pub struct LilMaterial<'a> {
    material: &'a mut Material,
}

impl<'a> LilMaterial<'a> {
    pub fn new(material: &'a mut Material) -> Self {
        Self { material }
    }

    fn write(&mut self, property: Property) {
        if LILTOON_PROPERTIES.get(property.name()) == Some(&property.kind()) {
            self.material.set_property(property);
        } else {
            debug!(name = property.name(), "not a lilToon property, dropped");
        }
    }
}

impl MaterialSink for LilMaterial<'_> {
    fn has_property(&self, name: &str) -> bool {
        LILTOON_PROPERTIES.contains_key(name)
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.write(Property::float(name, value));
    }

    fn set_color(&mut self, name: &str, value: Color) {
        self.write(Property::color(name, value));
    }

    fn set_vector(&mut self, name: &str, value: Vec4) {
        self.write(Property::vector(name, value));
    }

    fn set_texture_env(&mut self, name: &str, value: &TexEnv) {
        self.write(Property::texture(name, value.clone()));
    }

    fn set_texture(&mut self, name: &str, texture: Option<&TextureRef>) {
        let mut env = self.material.texture(name).unwrap_or_default();
        env.texture = texture.cloned();
        self.write(Property::texture(name, env));
    }

    fn set_shader(&mut self, shader: &str) -> bool {
        if !LILTOON_SHADERS.contains(shader) {
            return false;
        }
        self.material.shader = Some(shader.to_owned());
        true
    }

    fn set_render_queue(&mut self, queue: i32) {
        self.material.render_queue = Some(queue);
    }

    fn disable_keywords(&mut self) {
        self.material.keywords.clear();
    }

    fn remove_unused_properties(&mut self) {
        let before = self.material.properties.entries.len();
        self.material
            .properties
            .entries
            .retain(|p| LILTOON_PROPERTIES.get(p.name()) == Some(&p.kind()));
        debug!(
            removed = before - self.material.properties.entries.len(),
            "removed stale properties"
        );
    }
}
