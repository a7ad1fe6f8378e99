//! The target property record: one optional slot per lilToon property the converter
//! can produce. An unset slot means "leave the destination property alone".

use glam::Vec4;
use toon_xml::{Color, TexEnv, TextureRef};
use toon_xml_macros::property_set;

use crate::classify::ClassificationFlags;

#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Float(f32),
    Color(Color),
    Vector(Vec4),
    /// Texture plus UV transform.
    TexEnv(TexEnv),
    /// Texture only; the destination keeps its UV transform.
    Texture(TextureRef),
}

impl From<f32> for SlotValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Color> for SlotValue {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

impl From<Vec4> for SlotValue {
    fn from(v: Vec4) -> Self {
        Self::Vector(v)
    }
}

impl From<TexEnv> for SlotValue {
    fn from(v: TexEnv) -> Self {
        Self::TexEnv(v)
    }
}

impl From<TextureRef> for SlotValue {
    fn from(v: TextureRef) -> Self {
        Self::Texture(v)
    }
}

/// Which lilToon shader a converted material lands on.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ShaderVariant {
    pub cutout: bool,
    pub transparent: bool,
    pub outline: bool,
}

impl From<&ClassificationFlags> for ShaderVariant {
    fn from(flags: &ClassificationFlags) -> Self {
        Self {
            cutout: flags.cutout,
            transparent: flags.transparent,
            outline: flags.outline,
        }
    }
}

impl ShaderVariant {
    pub fn shader_name(&self) -> String {
        let mut name = String::from("lilToon");
        if self.cutout {
            name += "Cutout";
        }
        if self.transparent {
            name += "Transparent";
        }
        if self.outline {
            name += "Outline";
        }
        if name != "lilToon" {
            name.insert_str(0, "Hidden/");
        }
        name
    }
}

#[property_set]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetPropertySet {
    #[skip]
    pub variant: ShaderVariant,
    /// -1 lets the shader decide.
    #[skip]
    pub render_queue: i32,

    // Main
    pub main_tex: Option<TexEnv>,
    pub main_color: Option<Color>,
    pub cutoff: Option<f32>,
    pub cull: Option<f32>,

    // Alpha mask
    pub alpha_mask_mode: Option<f32>,
    pub alpha_mask: Option<TexEnv>,
    pub alpha_mask_scale: Option<f32>,
    pub alpha_mask_value: Option<f32>,

    // Lighting
    pub light_min_limit: Option<f32>,
    pub as_unlit: Option<f32>,
    pub light_direction_override: Option<Vec4>,

    // Shadow
    pub use_shadow: Option<f32>,
    pub shadow_receive: Option<f32>,
    #[rename = "_Shadow2ndReceive"]
    pub shadow_2nd_receive: Option<f32>,
    #[rename = "_ShadowAOShift"]
    pub shadow_ao_shift: Option<Vec4>,
    #[rename = "_ShadowPostAO"]
    pub shadow_post_ao: Option<f32>,
    pub shadow_color: Option<Color>,
    pub shadow_color_tex: Option<TexEnv>,
    pub shadow_normal_strength: Option<f32>,
    pub shadow_border: Option<f32>,
    pub shadow_blur: Option<f32>,
    #[rename = "_Shadow2ndColor"]
    pub shadow_2nd_color: Option<Color>,
    #[rename = "_Shadow2ndColorTex"]
    pub shadow_2nd_color_tex: Option<TexEnv>,
    #[rename = "_Shadow2ndNormalStrength"]
    pub shadow_2nd_normal_strength: Option<f32>,
    #[rename = "_Shadow2ndBorder"]
    pub shadow_2nd_border: Option<f32>,
    #[rename = "_Shadow2ndBlur"]
    pub shadow_2nd_blur: Option<f32>,
    pub shadow_main_strength: Option<f32>,
    pub shadow_border_color: Option<Color>,
    /// Packed AO map; written as a texture only.
    pub shadow_border_mask: Option<TextureRef>,

    // Normal map
    pub use_bump_map: Option<f32>,
    pub bump_map: Option<TexEnv>,
    pub bump_scale: Option<f32>,

    // Reflection
    pub use_reflection: Option<f32>,
    pub smoothness: Option<f32>,
    pub specular_toon: Option<f32>,
    pub specular_normal_strength: Option<f32>,
    pub specular_border: Option<f32>,
    pub specular_blur: Option<f32>,
    pub reflection_color: Option<Color>,
    pub reflection_color_tex: Option<TexEnv>,

    // MatCap
    pub use_mat_cap: Option<f32>,
    pub mat_cap_color: Option<Color>,
    pub mat_cap_tex: Option<TexEnv>,
    #[rename = "_MatCapBlendUV1"]
    pub mat_cap_blend_uv1: Option<Vec4>,
    pub mat_cap_z_rot_cancel: Option<f32>,
    pub mat_cap_perspective: Option<f32>,
    pub mat_cap_blend_mask: Option<TexEnv>,
    pub mat_cap_enable_lighting: Option<f32>,
    pub mat_cap_shadow_mask: Option<f32>,
    pub mat_cap_lod: Option<f32>,
    pub mat_cap_blend_mode: Option<f32>,
    pub mat_cap_normal_strength: Option<f32>,
    pub mat_cap_custom_normal: Option<f32>,
    pub mat_cap_bump_map: Option<TexEnv>,
    pub mat_cap_bump_scale: Option<f32>,

    // MatCap 2nd
    #[rename = "_UseMatCap2nd"]
    pub use_mat_cap_2nd: Option<f32>,
    #[rename = "_MatCap2ndColor"]
    pub mat_cap_2nd_color: Option<Color>,
    #[rename = "_MatCap2ndTex"]
    pub mat_cap_2nd_tex: Option<TexEnv>,
    #[rename = "_MatCap2ndBlendUV1"]
    pub mat_cap_2nd_blend_uv1: Option<Vec4>,
    #[rename = "_MatCap2ndZRotCancel"]
    pub mat_cap_2nd_z_rot_cancel: Option<f32>,
    #[rename = "_MatCap2ndPerspective"]
    pub mat_cap_2nd_perspective: Option<f32>,
    #[rename = "_MatCap2ndBlendMask"]
    pub mat_cap_2nd_blend_mask: Option<TexEnv>,
    #[rename = "_MatCap2ndEnableLighting"]
    pub mat_cap_2nd_enable_lighting: Option<f32>,
    #[rename = "_MatCap2ndShadowMask"]
    pub mat_cap_2nd_shadow_mask: Option<f32>,
    #[rename = "_MatCap2ndLod"]
    pub mat_cap_2nd_lod: Option<f32>,
    #[rename = "_MatCap2ndBlendMode"]
    pub mat_cap_2nd_blend_mode: Option<f32>,
    #[rename = "_MatCap2ndNormalStrength"]
    pub mat_cap_2nd_normal_strength: Option<f32>,
    #[rename = "_MatCap2ndCustomNormal"]
    pub mat_cap_2nd_custom_normal: Option<f32>,

    // Rim light
    pub use_rim: Option<f32>,
    pub rim_color: Option<Color>,
    pub rim_color_tex: Option<TexEnv>,
    pub rim_normal_strength: Option<f32>,
    pub rim_border: Option<f32>,
    pub rim_blur: Option<f32>,
    pub rim_fresnel_power: Option<f32>,
    pub rim_enable_lighting: Option<f32>,
    pub rim_dir_strength: Option<f32>,
    pub rim_dir_range: Option<f32>,
    pub rim_indir_range: Option<f32>,
    pub rim_indir_color: Option<Color>,
    pub rim_indir_border: Option<f32>,
    pub rim_indir_blur: Option<f32>,

    // Emission
    pub use_emission: Option<f32>,
    pub emission_color: Option<Color>,
    pub emission_map: Option<TexEnv>,
    #[rename = "_EmissionMap_ScrollRotate"]
    pub emission_map_scroll_rotate: Option<Vec4>,

    // Outline
    pub outline_color: Option<Color>,
    pub outline_tex: Option<TexEnv>,
    pub outline_width: Option<f32>,
    pub outline_width_mask: Option<TexEnv>,
    pub outline_fix_width: Option<f32>,
    pub outline_vector_tex: Option<TexEnv>,

    // Stencil
    pub stencil_ref: Option<f32>,
    pub stencil_comp: Option<f32>,
    pub stencil_pass: Option<f32>,
    pub stencil_fail: Option<f32>,
    pub outline_stencil_ref: Option<f32>,
    pub outline_stencil_comp: Option<f32>,
    pub outline_stencil_pass: Option<f32>,
    pub outline_stencil_fail: Option<f32>,
}

impl TargetPropertySet {
    /// Every slot unset, render queue left to the shader.
    pub fn new(variant: ShaderVariant) -> Self {
        Self {
            variant,
            render_queue: -1,
            ..Default::default()
        }
    }

    pub fn shader_name(&self) -> String {
        self.variant.shader_name()
    }
}
