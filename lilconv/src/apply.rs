//! Writing a translated record onto a destination material.

use glam::Vec4;
use toon_xml::{Color, TexEnv, TextureRef};
use tracing::{debug, warn};

use crate::slots::{SlotValue, TargetPropertySet};

/// The destination side of a conversion.
pub trait MaterialSink {
    /// Whether the current shader exposes `name`.
    fn has_property(&self, name: &str) -> bool;
    fn set_float(&mut self, name: &str, value: f32);
    fn set_color(&mut self, name: &str, value: Color);
    fn set_vector(&mut self, name: &str, value: Vec4);
    fn set_texture_env(&mut self, name: &str, value: &TexEnv);
    /// Replaces the texture only, keeping the UV transform.
    fn set_texture(&mut self, name: &str, texture: Option<&TextureRef>);
    /// Returns false when the host has no shader by that name.
    fn set_shader(&mut self, shader: &str) -> bool;
    fn set_render_queue(&mut self, queue: i32);
    fn disable_keywords(&mut self);
    /// Drops serialized properties the current shader doesn't expose.
    fn remove_unused_properties(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub shader: String,
    /// False when the variant was missing and the old shader was kept.
    pub shader_applied: bool,
    pub written: usize,
    pub skipped: Vec<&'static str>,
}

const TRANSPARENT_BLEND: [(&str, f32); 12] = [
    ("_SrcBlend", 1.0),
    ("_DstBlend", 10.0),
    ("_SrcBlendAlpha", 1.0),
    ("_DstBlendAlpha", 10.0),
    ("_BlendOp", 0.0),
    ("_BlendOpAlpha", 0.0),
    ("_SrcBlendFA", 1.0),
    ("_DstBlendFA", 1.0),
    ("_SrcBlendAlphaFA", 0.0),
    ("_DstBlendAlphaFA", 1.0),
    ("_BlendOpFA", 4.0),
    ("_BlendOpAlphaFA", 4.0),
];

pub fn blend_constants(transparent: bool) -> [(&'static str, f32); 12] {
    let mut constants = TRANSPARENT_BLEND;
    if !transparent {
        constants[1].1 = 0.0;
    }
    constants
}

pub fn apply(set: &TargetPropertySet, dest: &mut impl MaterialSink) -> ApplyOutcome {
    let shader = set.shader_name();
    let shader_applied = dest.set_shader(&shader);
    if !shader_applied {
        warn!(%shader, "shader variant not found, keeping the current shader");
    }

    for (name, value) in blend_constants(set.variant.transparent) {
        dest.set_float(name, value);
    }
    dest.set_float("_AlphaToMask", if set.variant.cutout { 1.0 } else { 0.0 });

    let mut written = 0;
    let mut skipped = vec![];
    for (name, value) in set.slots() {
        if !dest.has_property(name) {
            skipped.push(name);
            continue;
        }
        match &value {
            SlotValue::Float(v) => dest.set_float(name, *v),
            SlotValue::Color(c) => dest.set_color(name, *c),
            SlotValue::Vector(v) => dest.set_vector(name, *v),
            SlotValue::TexEnv(env) => dest.set_texture_env(name, env),
            SlotValue::Texture(tex) => dest.set_texture(name, Some(tex)),
        }
        written += 1;
    }
    if !skipped.is_empty() {
        debug!(?skipped, "slots not exposed by the destination shader");
    }

    dest.disable_keywords();
    // Without the new shader, "unused" would be judged against the old one.
    if shader_applied {
        dest.remove_unused_properties();
    }
    dest.set_render_queue(set.render_queue);

    ApplyOutcome {
        shader,
        shader_applied,
        written,
        skipped,
    }
}
