use glam::Vec4;

use crate::properties::{Color, Property, TexEnv};
use crate::schema::Material;

/// Read-only, typed access to a material's properties.
///
/// Every getter distinguishes "not defined on this material" (`None`) from a defined
/// value, including zero. A property of another kind reads as `None` as well.
pub trait PropertySource {
    /// `None` when the shader reference has been lost.
    fn shader_name(&self) -> Option<&str>;
    fn has_property(&self, name: &str) -> bool;
    fn float(&self, name: &str) -> Option<f32>;
    fn color(&self, name: &str) -> Option<Color>;
    fn vector(&self, name: &str) -> Option<Vec4>;
    fn texture(&self, name: &str) -> Option<TexEnv>;
    fn is_keyword_enabled(&self, keyword: &str) -> bool;
    fn render_queue(&self) -> Option<i32>;

    /// A toggle is on only when defined and exactly 1.
    fn toggle(&self, name: &str) -> bool {
        self.float(name) == Some(1.0)
    }

    fn color_opaque(&self, name: &str) -> Option<Color> {
        self.color(name).map(Color::opaque)
    }

    fn shader_name_contains(&self, pattern: &str) -> bool {
        self.shader_name().is_some_and(|s| s.contains(pattern))
    }
}

impl PropertySource for Material {
    fn shader_name(&self) -> Option<&str> {
        self.shader.as_deref()
    }

    fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    fn float(&self, name: &str) -> Option<f32> {
        match self.property(name)? {
            Property::Float(p) => Some(p.value),
            _ => None,
        }
    }

    fn color(&self, name: &str) -> Option<Color> {
        match self.property(name)? {
            Property::Color(p) => Some(p.value),
            _ => None,
        }
    }

    fn vector(&self, name: &str) -> Option<Vec4> {
        match self.property(name)? {
            Property::Vector(p) => Some(p.value),
            _ => None,
        }
    }

    fn texture(&self, name: &str) -> Option<TexEnv> {
        match self.property(name)? {
            Property::Texture(p) => Some(p.tex_env()),
            _ => None,
        }
    }

    fn is_keyword_enabled(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k.name == keyword)
    }

    fn render_queue(&self) -> Option<i32> {
        self.render_queue
    }
}
