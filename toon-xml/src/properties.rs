use std::borrow::Cow;
use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::{Vec2, Vec3, Vec4};
use serde::de::{Deserialize, Deserializer, Error, Unexpected};
use serde_derive::Deserialize;

use toon_xml_macros::element;

use crate::Named;

enums! {
    PropertyKind { Float, Color, Vector, Texture }
}

/// Linear RGBA color.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Color(pub Vec4);

impl Color {
    pub const WHITE: Self = Self(Vec4::ONE);
    pub const BLACK: Self = Self(Vec4::new(0.0, 0.0, 0.0, 1.0));

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(Vec4::new(r, g, b, a))
    }

    pub fn r(&self) -> f32 {
        self.0.x
    }

    pub fn g(&self) -> f32 {
        self.0.y
    }

    pub fn b(&self) -> f32 {
        self.0.z
    }

    pub fn a(&self) -> f32 {
        self.0.w
    }

    /// Same color with alpha forced to 1.
    pub fn opaque(self) -> Self {
        Self(self.0.truncate().extend(1.0))
    }

    /// Alpha is ignored.
    pub fn is_black(&self) -> bool {
        self.0.truncate() == Vec3::ZERO
    }

    /// Interpolates every channel, with `t` clamped to [0, 1].
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self(self.0.lerp(other.0, t.clamp(0.0, 1.0)))
    }

    /// Component-wise division. A zero divisor leaves that component unchanged.
    pub fn div(self, rhs: Self) -> Self {
        let a = self.0.to_array();
        let b = rhs.0.to_array();
        Self(Vec4::from_array(std::array::from_fn(|i| {
            if b[i] == 0.0 {
                a[i]
            } else {
                a[i] / b[i]
            }
        })))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_floats(&self.0.to_array()))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        match float_seq(de)?[..] {
            [r, g, b] => Ok(Self::rgba(r, g, b, 1.0)),
            [r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
            ref v => Err(D::Error::invalid_length(v.len(), &"3 or 4")),
        }
    }
}

/// Reference to a texture asset. Two references name the same texture iff their
/// paths are equal.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TextureRef(pub String);

impl TextureRef {
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A texture slot: an optional texture plus its UV transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TexEnv {
    pub texture: Option<TextureRef>,
    pub offset: Vec2,
    pub scale: Vec2,
}

impl Default for TexEnv {
    fn default() -> Self {
        Self {
            texture: None,
            offset: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl TexEnv {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: Some(TextureRef(texture.into())),
            ..Default::default()
        }
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}

#[element]
struct FloatProperty {
    value: f32,
}

#[element]
struct ColorProperty {
    value: Color,
}

#[element]
struct VectorProperty {
    #[serde(deserialize_with = "vec4_attr")]
    value: Vec4,
}

#[element]
struct TextureProperty {
    texture: Option<TextureRef>,
    #[serde(default, deserialize_with = "vec2_attr")]
    offset: Vec2,
    #[serde(default = "unit_scale", deserialize_with = "vec2_attr")]
    scale: Vec2,
}

impl TextureProperty {
    pub fn tex_env(&self) -> TexEnv {
        TexEnv {
            texture: self.texture.clone(),
            offset: self.offset,
            scale: self.scale,
        }
    }
}

#[derive(Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "snake_case")]
#[enum_dispatch(Named)]
pub enum Property {
    Float(FloatProperty),
    Color(ColorProperty),
    Vector(VectorProperty),
    Texture(TextureProperty),
}

impl Property {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Float(_) => PropertyKind::Float,
            Self::Color(_) => PropertyKind::Color,
            Self::Vector(_) => PropertyKind::Vector,
            Self::Texture(_) => PropertyKind::Texture,
        }
    }

    pub fn float(name: &str, value: f32) -> Self {
        Self::Float(FloatProperty {
            name: name.to_owned(),
            value,
        })
    }

    pub fn color(name: &str, value: Color) -> Self {
        Self::Color(ColorProperty {
            name: name.to_owned(),
            value,
        })
    }

    pub fn vector(name: &str, value: Vec4) -> Self {
        Self::Vector(VectorProperty {
            name: name.to_owned(),
            value,
        })
    }

    pub fn texture(name: &str, env: TexEnv) -> Self {
        Self::Texture(TextureProperty {
            name: name.to_owned(),
            texture: env.texture,
            offset: env.offset,
            scale: env.scale,
        })
    }
}

/// Space-separated shortest round-trip representation, as read back by `float_seq`.
pub fn format_floats(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn unit_scale() -> Vec2 {
    Vec2::ONE
}

fn vec2_attr<'de, D: Deserializer<'de>>(de: D) -> Result<Vec2, D::Error> {
    let v = float_seq(de)?;
    let arr = <[f32; 2]>::try_from(v).map_err(|v| D::Error::invalid_length(v.len(), &"2"))?;
    Ok(Vec2::from_array(arr))
}

fn vec4_attr<'de, D: Deserializer<'de>>(de: D) -> Result<Vec4, D::Error> {
    let v = float_seq(de)?;
    let arr = <[f32; 4]>::try_from(v).map_err(|v| D::Error::invalid_length(v.len(), &"4"))?;
    Ok(Vec4::from_array(arr))
}

fn float_seq<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<f32>, D::Error> {
    let s: Cow<'de, str> = Deserialize::deserialize(de)?;
    let mut v = vec![];
    for x in s.split_whitespace() {
        let n = x
            .trim_end_matches(',')
            .parse::<f32>()
            .map_err(|_| D::Error::invalid_value(Unexpected::Str(x), &"a float"))?;
        v.push(n)
    }
    Ok(v)
}
