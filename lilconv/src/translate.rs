//! Derives the lilToon property record from a UnityChanToonShader material.

use std::f32::consts::PI;

use glam::{Vec2, Vec4};
use toon_xml::{Color, PropertySource, TexEnv, TextureRef};
use tracing::{debug, debug_span, warn};

use crate::ao::{reconcile_ao, AoDecision, TextureBaker};
use crate::classify::{ClassificationFlags, SourceFamily};
use crate::slots::{ShaderVariant, TargetPropertySet};

pub const COMPARE_ALWAYS: f32 = 8.0;
pub const COMPARE_NOT_EQUAL: f32 = 6.0;
pub const STENCIL_KEEP: f32 = 0.0;
pub const STENCIL_REPLACE: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Complete(TargetPropertySet),
    /// Both AO sources hold different textures; the caller decides whether to bake.
    NeedsAoBake(PendingAoMask),
}

impl Translation {
    /// Resolves a pending AO decision by leaving the mask unset.
    pub fn without_bake(self) -> TargetPropertySet {
        match self {
            Self::Complete(set) => set,
            Self::NeedsAoBake(pending) => pending.decline(),
        }
    }
}

/// A translated record waiting on an AO bake decision. Every other slot is final.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAoMask {
    set: TargetPropertySet,
    first: TextureRef,
    second: TextureRef,
}

impl PendingAoMask {
    pub fn first(&self) -> &TextureRef {
        &self.first
    }

    pub fn second(&self) -> &TextureRef {
        &self.second
    }

    pub fn decline(self) -> TargetPropertySet {
        debug!(first = %self.first, second = %self.second, "AO bake declined");
        self.set
    }

    /// Bakes both masks into one. A failed bake leaves the mask unset.
    pub fn accept(self, baker: &mut impl TextureBaker) -> TargetPropertySet {
        let mut set = self.set;
        match baker.bake_composite(&self.first, &self.second) {
            Ok(baked) => {
                debug!(%baked, "AO mask baked");
                set.shadow_border_mask = Some(baked);
            }
            Err(e) => warn!("AO bake failed, leaving the mask unset: {e}"),
        }
        set
    }
}

pub fn translate(
    source: &impl PropertySource,
    flags: &ClassificationFlags,
    family: SourceFamily,
) -> Translation {
    let _span = debug_span!("translate", ?family).entered();

    let mut set = TargetPropertySet::new(ShaderVariant::from(flags));
    set.render_queue = source.render_queue().unwrap_or(-1);

    base(&mut set, source, flags);
    lighting(&mut set, source);
    let ao = shadow(&mut set, source, flags);
    normal_map(&mut set, source);
    reflection(&mut set, source);
    mat_cap(&mut set, source);
    if flags.angel_ring {
        angel_ring(&mut set, source);
    }
    rim_light(&mut set, source);
    emission(&mut set, source);
    if flags.outline {
        outline(&mut set, source);
    }
    stencil(&mut set, source, flags);

    debug!(slots = set.slots().len(), shader = %set.shader_name(), "translated");

    match ao {
        AoDecision::Unset => Translation::Complete(set),
        AoDecision::PassThrough(tex) => {
            set.shadow_border_mask = Some(tex);
            Translation::Complete(set)
        }
        AoDecision::Ambiguous { first, second } => {
            Translation::NeedsAoBake(PendingAoMask { set, first, second })
        }
    }
}

/// Border/blur pair lilToon uses in place of a min/max range.
pub fn border_and_blur(max: f32, min: f32) -> (f32, f32) {
    ((max + min) * 0.5, max - min)
}

/// Pulls a band that starts below zero back to zero, blending its color toward
/// `toward` by the share of the band that was cut off. Returns the color and new min.
pub fn fix_shadow_band(color: Color, toward: Color, max: f32, min: f32) -> (Color, f32) {
    if min >= 0.0 {
        return (color, min);
    }
    let factor = -min / (max - min);
    (color.lerp(toward, factor), 0.0)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Specular {
    pub smoothness: f32,
    pub toon: f32,
    pub border_max: f32,
    pub border_min: f32,
}

pub fn specular_rolloff(power: f32, soft: bool) -> Specular {
    if soft {
        Specular {
            smoothness: (0.969 - 0.136 * power + 0.0387 * power.powi(2) - 0.725 * power.powi(3))
                .clamp(0.0, 1.0),
            toon: 0.0,
            border_max: 1.0,
            border_min: 0.0,
        }
    } else {
        let border = (1.0 - 2.0 * power.powi(5)).clamp(0.0, 1.0);
        Specular {
            smoothness: 0.0,
            toon: 1.0,
            border_max: border,
            border_min: border,
        }
    }
}

pub fn mat_cap_uv_factor(tweak: f32) -> f32 {
    if tweak == 0.5 {
        999999.0
    } else {
        0.5 / (0.5 - tweak)
    }
}

/// Moves the UV origin to the far corner and scales by `factor`.
pub fn remap_mat_cap_uv(env: &TexEnv, factor: f32) -> TexEnv {
    TexEnv {
        texture: env.texture.clone(),
        offset: env.offset + env.scale - Vec2::ONE,
        scale: env.scale * factor,
    }
}

fn base(set: &mut TargetPropertySet, m: &impl PropertySource, flags: &ClassificationFlags) {
    set.main_tex = m.texture("_MainTex");
    set.main_color = Some(m.color_opaque("_BaseColor").unwrap_or(Color::WHITE));
    set.cull = m.float("_CullMode");

    if flags.cutout || flags.transparent {
        if !m.toggle("_IsBaseMapAlphaAsClippingMask") {
            set.alpha_mask = m.texture("_ClippingMask");
        }
        let tweak = m.float("_Tweak_transparency");
        if m.toggle("_Inverse_Clipping") {
            set.alpha_mask_scale = Some(-1.0);
            set.alpha_mask_value = Some(1.0 + tweak.unwrap_or(0.0));
        } else {
            set.alpha_mask_scale = Some(1.0);
            set.alpha_mask_value = tweak;
        }
        if set.alpha_mask.is_some() {
            set.alpha_mask_mode = Some(1.0);
        }
        let level = m.float("_Clipping_Level").unwrap_or(0.0);
        set.cutoff = Some((0.5 - level).clamp(0.0, 1.0));
    }
}

fn lighting(set: &mut TargetPropertySet, m: &impl PropertySource) {
    set.as_unlit = Some(1.0 - m.float("_Is_LightColor_Base").unwrap_or(1.0));
    set.light_min_limit = Some(0.05);

    if m.toggle("_Is_BLD") {
        let x = m.float("_Offset_X_Axis_BLD").unwrap_or(0.0) * 1000.0;
        let y = m.float("_Offset_Y_Axis_BLD").unwrap_or(0.0) * 1000.0;
        let z = if m.toggle("_Inverse_Z_Axis_BLD") {
            -100.0
        } else {
            100.0
        };
        set.light_direction_override = Some(Vec4::new(x, y, z, 1.0));
    }
}

fn shadow(
    set: &mut TargetPropertySet,
    m: &impl PropertySource,
    flags: &ClassificationFlags,
) -> AoDecision {
    let main_color = set.main_color.unwrap_or(Color::WHITE);
    set.use_shadow = Some(1.0);

    let color = m
        .color_opaque("_1st_ShadeColor")
        .unwrap_or(Color::WHITE)
        .div(main_color);
    let max = m.float("_BaseColor_Step").unwrap_or(0.5);
    let min = max - m.float("_BaseShade_Feather").unwrap_or(0.25);
    let (color, min) = fix_shadow_band(color, Color::WHITE, max, min);
    let (border, blur) = border_and_blur(max, min);
    set.shadow_color = Some(color);
    set.shadow_border = Some(border);
    set.shadow_blur = Some(blur);
    if !m.toggle("_Use_BaseAs1st") {
        set.shadow_color_tex = m.texture("_1st_ShadeMap");
    }

    let color_2nd = m
        .color_opaque("_2nd_ShadeColor")
        .unwrap_or(Color::WHITE)
        .div(main_color);
    let max = m.float("_ShadeColor_Step").unwrap_or(0.25);
    let min = max - m.float("_1st2nd_Shades_Feather").unwrap_or(0.125);
    let (color_2nd, min) = fix_shadow_band(color_2nd, color, max, min);
    let (border, blur) = border_and_blur(max, min);
    set.shadow_2nd_color = Some(color_2nd);
    set.shadow_2nd_border = Some(border);
    set.shadow_2nd_blur = Some(blur);
    if !m.toggle("_Use_1stAs2nd") {
        set.shadow_2nd_color_tex = m.texture("_2nd_ShadeMap");
    }

    // A shade map that is just the main texture adds nothing.
    if let Some(main_tex) = set.main_tex.as_ref().and_then(|t| t.texture.as_ref()) {
        for slot in [&mut set.shadow_color_tex, &mut set.shadow_2nd_color_tex] {
            if slot.as_ref().and_then(|t| t.texture.as_ref()) == Some(main_tex) {
                *slot = None;
            }
        }
    }

    set.shadow_normal_strength = m.float("_Is_NormalMapToBase");
    set.shadow_2nd_normal_strength = set.shadow_normal_strength;
    set.shadow_receive = m.float("_Set_SystemShadowsToBase");
    set.shadow_2nd_receive = set.shadow_receive;
    set.shadow_border_color = Some(Color::BLACK);
    set.shadow_main_strength = Some(0.0);

    if flags.shading_grade_map {
        let grade = m.texture("_ShadingGradeMap");
        let level = m.float("_Tweak_ShadingGradeMapLevel").unwrap_or(0.0);
        set.shadow_ao_shift = Some(Vec4::new(1.0, level, 1.0, level));
        set.shadow_post_ao = Some(0.0);
        reconcile_ao(grade.as_ref(), grade.as_ref())
    } else {
        let first = m.texture("_Set_1st_ShadePosition");
        let second = m.texture("_Set_2nd_ShadePosition");
        let has_first = first.as_ref().is_some_and(TexEnv::has_texture);
        let has_second = second.as_ref().is_some_and(TexEnv::has_texture);
        set.shadow_ao_shift = Some(match (has_first, has_second) {
            (true, false) => Vec4::new(1.0, 0.0, 0.0, 1.0),
            (false, true) => Vec4::new(0.0, 1.0, 1.0, 0.0),
            _ => Vec4::new(1.0, 0.0, 1.0, 0.0),
        });
        set.shadow_post_ao = Some(1.0);
        reconcile_ao(first.as_ref(), second.as_ref())
    }
}

fn normal_map(set: &mut TargetPropertySet, m: &impl PropertySource) {
    set.bump_map = m.texture("_NormalMap");
    set.bump_scale = m.float("_BumpScale");
    set.use_bump_map = Some(if set.bump_map.is_some() { 1.0 } else { 0.0 });
}

fn reflection(set: &mut TargetPropertySet, m: &impl PropertySource) {
    set.reflection_color = m.color_opaque("_HighColor");
    set.reflection_color_tex = match m.texture("_HighColor_Tex") {
        Some(tex) if tex.has_texture() => Some(tex),
        _ => m.texture("_Set_HighColorMask"),
    };
    set.use_reflection = Some(on_unless_black(set.reflection_color));
    set.specular_normal_strength = m.float("_Is_NormalMapToHighColor");

    let power = m.float("_HighColor_Power").unwrap_or(0.0);
    let specular = specular_rolloff(power, m.toggle("_Is_SpecularToHighColor"));
    let (border, blur) = border_and_blur(specular.border_max, specular.border_min);
    set.smoothness = Some(specular.smoothness);
    set.specular_toon = Some(specular.toon);
    set.specular_border = Some(border);
    set.specular_blur = Some(blur);
}

fn mat_cap(set: &mut TargetPropertySet, m: &impl PropertySource) {
    set.use_mat_cap = m.float("_MatCap");
    set.mat_cap_color = m.color_opaque("_MatCapColor");
    set.mat_cap_enable_lighting = m.float("_Is_LightColor_MatCap");
    set.mat_cap_lod = m.float("_BlurLevelMatcap");
    set.mat_cap_blend_mode = Some(if m.toggle("_Is_BlendAddToMatCap") { 1.0 } else { 3.0 });

    let factor = mat_cap_uv_factor(m.float("_Tweak_MatCapUV").unwrap_or(0.0));
    set.mat_cap_tex = m
        .texture("_MatCap_Sampler")
        .map(|tex| remap_mat_cap_uv(&tex, factor));
    if !set.mat_cap_tex.as_ref().is_some_and(TexEnv::has_texture) {
        set.use_mat_cap = Some(0.0);
    }

    set.mat_cap_shadow_mask = Some(if m.toggle("_Is_UseTweakMatCapOnShadow") {
        1.0 - m.float("_TweakMatCapOnShadow").unwrap_or(1.0)
    } else {
        0.0
    });
    set.mat_cap_blend_mask = m.texture("_Set_MatcapMask");
    set.mat_cap_perspective = Some(if m.toggle("_Is_Ortho") { 0.0 } else { 1.0 });
    set.mat_cap_z_rot_cancel = m.float("_CameraRolling_Stabilizer");
    set.mat_cap_normal_strength = Some(0.0);
    set.mat_cap_custom_normal = m.float("_Is_NormalMapForMatCap");
    set.mat_cap_bump_map = m.texture("_NormalMapForMatCap");
    set.mat_cap_bump_scale = m.float("_BumpScaleMatcap");
}

fn angel_ring(set: &mut TargetPropertySet, m: &impl PropertySource) {
    let enabled = m.float("_AngelRing");
    let color = m.color_opaque("_AngelRing_Color");
    let factor = 1.0 - m.float("_AR_OffsetU").unwrap_or(0.0);
    let tex = m
        .texture("_AngelRing_Sampler")
        .map(|tex| remap_mat_cap_uv(&tex, factor));
    let lighting = m.float("_Is_LightColor_AR");
    let blend_mode = if m.toggle("_ARSampler_AlphaOn") { 0.0 } else { 1.0 };
    let blend_uv1 = Vec4::new(0.0, 1.0 - m.float("_AR_OffsetV").unwrap_or(1.0), 0.0, 0.0);

    // The ring takes whichever MatCap slot is still free.
    if set.use_mat_cap != Some(1.0) {
        set.use_mat_cap = enabled;
        set.mat_cap_color = color;
        set.mat_cap_tex = tex;
        set.mat_cap_enable_lighting = lighting;
        set.mat_cap_lod = Some(0.0);
        set.mat_cap_blend_mode = Some(blend_mode);
        set.mat_cap_blend_uv1 = Some(blend_uv1);
        set.mat_cap_shadow_mask = Some(0.0);
        set.mat_cap_blend_mask = None;
        set.mat_cap_perspective = Some(0.0);
        set.mat_cap_z_rot_cancel = Some(1.0);
        set.mat_cap_normal_strength = Some(0.0);
        set.mat_cap_custom_normal = Some(0.0);
    } else {
        set.use_mat_cap_2nd = enabled;
        set.mat_cap_2nd_color = color;
        set.mat_cap_2nd_tex = tex;
        set.mat_cap_2nd_enable_lighting = lighting;
        set.mat_cap_2nd_lod = Some(0.0);
        set.mat_cap_2nd_blend_mode = Some(blend_mode);
        set.mat_cap_2nd_blend_uv1 = Some(blend_uv1);
        set.mat_cap_2nd_shadow_mask = Some(0.0);
        set.mat_cap_2nd_blend_mask = None;
        set.mat_cap_2nd_perspective = Some(0.0);
        set.mat_cap_2nd_z_rot_cancel = Some(1.0);
        set.mat_cap_2nd_normal_strength = Some(0.0);
        set.mat_cap_2nd_custom_normal = Some(0.0);
    }
}

fn rim_light(set: &mut TargetPropertySet, m: &impl PropertySource) {
    let power = m.float("_RimLight_Power").unwrap_or(1.0);
    let mask_level = (1.0 + m.float("_Tweak_RimLightMaskLevel").unwrap_or(0.0)).powf(0.45);
    let inside = m.float("_RimLight_InsideMask").unwrap_or(0.0);

    set.use_rim = m.float("_RimLight");
    set.rim_color_tex = m.texture("_Set_RimLightMask");
    set.rim_enable_lighting = m.float("_Is_LightColor_RimLight");
    set.rim_normal_strength = m.float("_Is_NormalMapToRimLight");
    set.rim_fresnel_power = Some(2f32.powf(3.0 - 3.0 * power));
    set.rim_dir_strength = m.float("_LightDirection_MaskOn");
    set.rim_dir_range = Some(0.0);
    set.rim_indir_range = Some(0.0);

    let direction_mask = if set.rim_dir_strength.is_some_and(|s| s > 0.5) {
        m.float("_Tweak_LightDirection_MaskLevel").unwrap_or(0.0) + 0.2
    } else {
        0.0
    };
    let border_min = inside + direction_mask - inside * direction_mask;
    let border_max = if m.toggle("_RimLight_FeatherOff") {
        border_min
    } else {
        1.0
    };
    let indir_border_max = if m.toggle("_Ap_RimLight_FeatherOff") {
        border_min
    } else {
        1.0
    };
    (set.rim_border, set.rim_blur) = some_pair(border_and_blur(border_max, border_min));
    (set.rim_indir_border, set.rim_indir_blur) =
        some_pair(border_and_blur(indir_border_max, border_min));

    let color = m.color_opaque("_RimLightColor").unwrap_or(Color::BLACK);
    let indir_color = if m.toggle("_Add_Antipodean_RimLight") {
        m.color_opaque("_Ap_RimLightColor").unwrap_or(Color::BLACK)
    } else {
        Color::BLACK
    };
    set.rim_color = Some(Color::BLACK.lerp(color, mask_level));
    set.rim_indir_color = Some(Color::BLACK.lerp(indir_color, mask_level));
}

fn emission(set: &mut TargetPropertySet, m: &impl PropertySource) {
    set.emission_map = m.texture("_Emissive_Tex");
    set.emission_color = m.color_opaque("_Emissive_Color");
    set.use_emission = Some(on_unless_black(set.emission_color));

    if m.is_keyword_enabled("_EMISSIVE_ANIMATION") {
        let speed = m.float("_Base_Speed").unwrap_or(0.0);
        let scroll_u = m.float("_Scroll_EmissiveU").unwrap_or(0.0);
        let scroll_v = m.float("_Scroll_EmissiveV").unwrap_or(0.0);
        let rotate = m.float("_Rotate_EmissiveUV").unwrap_or(0.0);
        set.emission_map_scroll_rotate = Some(Vec4::new(
            -speed * scroll_u,
            -speed * scroll_v,
            0.0,
            -speed * rotate * PI,
        ));
    }
}

fn outline(set: &mut TargetPropertySet, m: &impl PropertySource) {
    set.outline_fix_width = Some(0.0);
    set.outline_width = Some(0.1 * m.float("_Outline_Width").unwrap_or(0.0));
    set.outline_width_mask = m.texture("_Outline_Sampler");
    set.outline_color = m.color_opaque("_Outline_Color");
    if m.toggle("_Is_OutlineTex") {
        set.outline_tex = m.texture("_OutlineTex");
    } else if m.toggle("_Is_BlendBaseColor") {
        set.outline_tex = m.texture("_MainTex");
    }
    if m.toggle("_Is_BakedNormal") {
        set.outline_vector_tex = m.texture("_BakedNormal");
    }
}

fn stencil(set: &mut TargetPropertySet, m: &impl PropertySource, flags: &ClassificationFlags) {
    let mut write = |comp: f32, op: f32| {
        let reference = m.float("_StencilNo");
        set.stencil_ref = reference;
        set.outline_stencil_ref = reference;
        set.stencil_comp = Some(comp);
        set.outline_stencil_comp = Some(comp);
        set.stencil_pass = Some(op);
        set.outline_stencil_pass = Some(op);
        set.stencil_fail = Some(op);
        set.outline_stencil_fail = Some(op);
    };

    if flags.stencil_mask {
        write(COMPARE_ALWAYS, STENCIL_REPLACE);
    }
    // Applied last, so it wins when both are requested.
    if flags.stencil_out {
        write(COMPARE_NOT_EQUAL, STENCIL_KEEP);
    }
}

fn on_unless_black(color: Option<Color>) -> f32 {
    match color {
        Some(c) if !c.is_black() => 1.0,
        _ => 0.0,
    }
}

fn some_pair((a, b): (f32, f32)) -> (Option<f32>, Option<f32>) {
    (Some(a), Some(b))
}

#[cfg(test)]
mod tests {
    use toon_xml::{Material, Property};

    use super::*;
    use crate::ao::BakeError;
    use crate::classify::classify;

    const EPS: f32 = 1e-5;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn uts(shader: &str) -> Material {
        Material::new("M", Some(shader))
    }

    fn run(m: &Material) -> TargetPropertySet {
        let (flags, family) = classify(m);
        translate(m, &flags, family).without_bake()
    }

    #[test]
    fn border_and_blur_pair() {
        let (border, blur) = border_and_blur(0.6, 0.3);
        assert!(approx(border, 0.45));
        assert!(approx(blur, 0.3));
    }

    #[test]
    fn negative_band_is_clamped_and_blended() {
        let black = Color::rgba(0.0, 0.0, 0.0, 1.0);
        let (color, min) = fix_shadow_band(black, Color::WHITE, 0.5, -0.2);
        assert_eq!(min, 0.0);
        assert!(approx(color.r(), 0.2 / 0.7));

        let (color, min) = fix_shadow_band(black, Color::WHITE, 0.5, 0.1);
        assert_eq!((color, min), (black, 0.1));
    }

    #[test]
    fn specular_boundaries() {
        let hard = specular_rolloff(0.0, false);
        assert_eq!(hard.border_max, 1.0);
        assert_eq!(hard.border_min, 1.0);
        assert_eq!(hard.smoothness, 0.0);
        assert_eq!(hard.toon, 1.0);

        assert_eq!(specular_rolloff(1.0, false).border_max, 0.0);

        let soft = specular_rolloff(0.0, true);
        assert!(approx(soft.smoothness, 0.969));
        assert_eq!((soft.border_min, soft.border_max, soft.toon), (0.0, 1.0, 0.0));
        assert_eq!(specular_rolloff(2.0, true).smoothness, 0.0);
    }

    #[test]
    fn mat_cap_uv() {
        assert_eq!(mat_cap_uv_factor(0.5), 999999.0);
        assert!(approx(mat_cap_uv_factor(0.0), 1.0));
        assert!(approx(mat_cap_uv_factor(0.25), 2.0));

        let env = TexEnv {
            texture: Some(TextureRef("m.png".into())),
            offset: Vec2::new(0.1, 0.2),
            scale: Vec2::new(2.0, 1.0),
        };
        let remapped = remap_mat_cap_uv(&env, 2.0);
        assert_eq!(remapped.texture, env.texture);
        assert!(approx(remapped.offset.x, 1.1));
        assert!(approx(remapped.offset.y, 0.2));
        assert_eq!(remapped.scale, Vec2::new(4.0, 2.0));
    }

    #[test]
    fn orphaned_clipping_material() {
        let mut m = Material::new("M", None);
        m.set_property(Property::float("_utsVersion", 2.0));
        m.set_property(Property::float("_Clipping_Level", 0.1));
        m.set_property(Property::texture("_ClippingMask", TexEnv::default()));
        m.set_property(Property::float("_Inverse_Clipping", 0.0));

        let (flags, family) = classify(&m);
        assert!(flags.cutout);
        assert!(!flags.transparent);

        let set = translate(&m, &flags, family).without_bake();
        assert!(approx(set.cutoff.unwrap(), 0.4));
        assert_eq!(set.alpha_mask_scale, Some(1.0));
        assert_eq!(set.alpha_mask_value, None);
        assert_eq!(set.alpha_mask_mode, Some(1.0));
        assert_eq!(set.shader_name(), "Hidden/lilToonCutout");
    }

    #[test]
    fn inverse_clipping() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather_TransClipping");
        m.set_property(Property::float("_Inverse_Clipping", 1.0));
        m.set_property(Property::float("_Tweak_transparency", -0.25));
        m.set_property(Property::float("_IsBaseMapAlphaAsClippingMask", 1.0));
        m.set_property(Property::texture("_ClippingMask", TexEnv::new("mask.png")));
        let set = run(&m);
        assert_eq!(set.alpha_mask_scale, Some(-1.0));
        assert_eq!(set.alpha_mask_value, Some(0.75));
        assert_eq!(set.alpha_mask, None);
        assert_eq!(set.alpha_mask_mode, None);
        assert_eq!(set.cutoff, Some(0.5));
    }

    #[test]
    fn opaque_material_leaves_alpha_alone() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::float("_Clipping_Level", 0.3));
        let set = run(&m);
        assert_eq!(set.cutoff, None);
        assert_eq!(set.alpha_mask_scale, None);
        assert_eq!(set.shader_name(), "Hidden/lilToonOutline");
    }

    #[test]
    fn absent_properties_stay_unset() {
        let set = run(&uts("UnityChanToonShader/NoOutline/ToonColor_DoubleShadeWithFeather"));
        assert_eq!(set.main_tex, None);
        assert_eq!(set.cull, None);
        assert_eq!(set.bump_scale, None);
        assert_eq!(set.use_bump_map, Some(0.0));
        assert_eq!(set.reflection_color, None);
        assert_eq!(set.use_reflection, Some(0.0));
        assert_eq!(set.use_rim, None);
        assert_eq!(set.emission_map_scroll_rotate, None);
        assert_eq!(set.outline_width, None);
        assert_eq!(set.stencil_ref, None);
        assert_eq!(set.shadow_border_mask, None);
        assert_eq!(set.render_queue, -1);
        assert_eq!(set.main_color, Some(Color::WHITE));
    }

    #[test]
    fn shadow_bands() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::color("_BaseColor", Color::rgba(0.5, 0.5, 0.5, 0.2)));
        m.set_property(Property::color("_1st_ShadeColor", Color::rgba(0.25, 0.5, 0.0, 1.0)));
        m.set_property(Property::float("_BaseColor_Step", 0.6));
        m.set_property(Property::float("_BaseShade_Feather", 0.3));
        m.set_property(Property::float("_ShadeColor_Step", 0.1));
        m.set_property(Property::float("_1st2nd_Shades_Feather", 0.2));
        let set = run(&m);

        assert_eq!(set.main_color, Some(Color::rgba(0.5, 0.5, 0.5, 1.0)));
        assert_eq!(set.shadow_color, Some(Color::rgba(0.5, 1.0, 0.0, 1.0)));
        assert!(approx(set.shadow_border.unwrap(), 0.45));
        assert!(approx(set.shadow_blur.unwrap(), 0.3));

        // 2nd band runs from 0.1 down to -0.1; half of it is cut off.
        let expected = Color::WHITE.div(Color::rgba(0.5, 0.5, 0.5, 1.0)).lerp(
            Color::rgba(0.5, 1.0, 0.0, 1.0),
            0.5,
        );
        let got = set.shadow_2nd_color.unwrap();
        for (a, b) in got.0.to_array().into_iter().zip(expected.0.to_array()) {
            assert!(approx(a, b));
        }
        assert!(approx(set.shadow_2nd_border.unwrap(), 0.05));
        assert!(approx(set.shadow_2nd_blur.unwrap(), 0.1));
        assert_eq!(set.shadow_border_color, Some(Color::BLACK));
        assert_eq!(set.shadow_main_strength, Some(0.0));
    }

    #[test]
    fn shade_maps() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::texture("_MainTex", TexEnv::new("body.png")));
        m.set_property(Property::texture("_1st_ShadeMap", TexEnv::new("body.png")));
        m.set_property(Property::texture("_2nd_ShadeMap", TexEnv::new("shade.png")));
        let set = run(&m);
        assert_eq!(set.shadow_color_tex, None);
        assert_eq!(set.shadow_2nd_color_tex, Some(TexEnv::new("shade.png")));

        m.set_property(Property::float("_Use_1stAs2nd", 1.0));
        assert_eq!(run(&m).shadow_2nd_color_tex, None);
    }

    #[test]
    fn ao_shift_and_pass_through() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::texture("_Set_1st_ShadePosition", TexEnv::new("ao.png")));
        m.set_property(Property::texture("_Set_2nd_ShadePosition", TexEnv::default()));
        let set = run(&m);
        assert_eq!(set.shadow_ao_shift, Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(set.shadow_post_ao, Some(1.0));
        assert_eq!(set.shadow_border_mask, Some(TextureRef("ao.png".into())));

        let mut m = uts("UnityChanToonShader/Toon_ShadingGradeMap");
        m.set_property(Property::texture("_ShadingGradeMap", TexEnv::new("grade.png")));
        m.set_property(Property::float("_Tweak_ShadingGradeMapLevel", -0.1));
        let set = run(&m);
        assert_eq!(set.shadow_ao_shift, Some(Vec4::new(1.0, -0.1, 1.0, -0.1)));
        assert_eq!(set.shadow_post_ao, Some(0.0));
        assert_eq!(set.shadow_border_mask, Some(TextureRef("grade.png".into())));
    }

    struct FakeBaker(Result<TextureRef, ()>);

    impl TextureBaker for FakeBaker {
        fn bake_composite(
            &mut self,
            first: &TextureRef,
            _: &TextureRef,
        ) -> Result<TextureRef, BakeError> {
            self.0
                .clone()
                .map_err(|()| BakeError::Empty(first.path().into()))
        }
    }

    fn two_ao_material() -> Material {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::texture("_Set_1st_ShadePosition", TexEnv::new("a.png")));
        m.set_property(Property::texture("_Set_2nd_ShadePosition", TexEnv::new("b.png")));
        m
    }

    #[test]
    fn ambiguous_ao_suspends() {
        let m = two_ao_material();
        let (flags, family) = classify(&m);
        let Translation::NeedsAoBake(pending) = translate(&m, &flags, family) else {
            panic!("expected a pending AO decision");
        };
        assert_eq!(pending.first(), &TextureRef("a.png".into()));
        assert_eq!(pending.second(), &TextureRef("b.png".into()));
        let declined = pending.clone().decline();
        assert_eq!(declined.shadow_border_mask, None);
        assert_eq!(declined.shadow_ao_shift, Some(Vec4::new(1.0, 0.0, 1.0, 0.0)));

        let baked = pending
            .clone()
            .accept(&mut FakeBaker(Ok(TextureRef("a_lilAO.png".into()))));
        assert_eq!(baked.shadow_border_mask, Some(TextureRef("a_lilAO.png".into())));

        let failed = pending.accept(&mut FakeBaker(Err(())));
        assert_eq!(failed.shadow_border_mask, None);
        // The source is never touched.
        assert_eq!(m, two_ao_material());
    }

    #[test]
    fn reflection_and_specular() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::color("_HighColor", Color::rgba(1.0, 1.0, 1.0, 0.0)));
        m.set_property(Property::texture("_HighColor_Tex", TexEnv::default()));
        m.set_property(Property::texture("_Set_HighColorMask", TexEnv::new("mask.png")));
        m.set_property(Property::float("_HighColor_Power", 1.0));
        let set = run(&m);
        assert_eq!(set.reflection_color, Some(Color::WHITE));
        assert_eq!(set.reflection_color_tex, Some(TexEnv::new("mask.png")));
        assert_eq!(set.use_reflection, Some(1.0));
        assert_eq!(set.specular_toon, Some(1.0));
        assert_eq!(set.specular_border, Some(0.0));
        assert_eq!(set.specular_blur, Some(0.0));

        m.set_property(Property::float("_Is_SpecularToHighColor", 1.0));
        let set = run(&m);
        assert_eq!(set.specular_toon, Some(0.0));
        assert_eq!(set.specular_border, Some(0.5));
        assert_eq!(set.specular_blur, Some(1.0));
        assert!(approx(set.smoothness.unwrap(), 0.969 - 0.136 + 0.0387 - 0.725));
    }

    #[test]
    fn mat_cap_without_texture_is_disabled() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::float("_MatCap", 1.0));
        m.set_property(Property::texture("_MatCap_Sampler", TexEnv::default()));
        m.set_property(Property::float("_Tweak_MatCapUV", 0.25));
        m.set_property(Property::float("_Is_UseTweakMatCapOnShadow", 1.0));
        m.set_property(Property::float("_TweakMatCapOnShadow", 0.25));
        m.set_property(Property::float("_Is_Ortho", 1.0));
        let set = run(&m);
        assert_eq!(set.use_mat_cap, Some(0.0));
        assert_eq!(set.mat_cap_tex.unwrap().scale, Vec2::new(2.0, 2.0));
        assert_eq!(set.mat_cap_shadow_mask, Some(0.75));
        assert_eq!(set.mat_cap_perspective, Some(0.0));
        assert_eq!(set.mat_cap_blend_mode, Some(3.0));
    }

    fn angel_ring_material() -> Material {
        let mut m = uts("UnityChanToonShader/Toon_ShadingGradeMap_AngelRing");
        m.set_property(Property::float("_AngelRing", 1.0));
        m.set_property(Property::color("_AngelRing_Color", Color::rgba(1.0, 0.9, 0.8, 0.5)));
        m.set_property(Property::texture("_AngelRing_Sampler", TexEnv::new("ring.png")));
        m.set_property(Property::float("_AR_OffsetU", 0.25));
        m.set_property(Property::float("_AR_OffsetV", 0.75));
        m.set_property(Property::float("_ARSampler_AlphaOn", 1.0));
        m.set_property(Property::texture("_Set_MatcapMask", TexEnv::new("mcmask.png")));
        m
    }

    #[test]
    fn angel_ring_takes_free_mat_cap_slot() {
        let set = run(&angel_ring_material());
        assert_eq!(set.use_mat_cap, Some(1.0));
        assert_eq!(set.mat_cap_color, Some(Color::rgba(1.0, 0.9, 0.8, 1.0)));
        assert_eq!(set.mat_cap_tex.as_ref().unwrap().scale, Vec2::splat(0.75));
        assert_eq!(set.mat_cap_blend_mode, Some(0.0));
        assert_eq!(set.mat_cap_blend_uv1, Some(Vec4::new(0.0, 0.25, 0.0, 0.0)));
        assert_eq!(set.mat_cap_blend_mask, None);
        assert_eq!(set.mat_cap_z_rot_cancel, Some(1.0));
        assert_eq!(set.mat_cap_lod, Some(0.0));
        assert_eq!(set.use_mat_cap_2nd, None);
    }

    #[test]
    fn angel_ring_falls_back_to_second_slot() {
        let mut m = angel_ring_material();
        m.set_property(Property::float("_MatCap", 1.0));
        m.set_property(Property::texture("_MatCap_Sampler", TexEnv::new("mc.png")));
        let set = run(&m);
        assert_eq!(set.use_mat_cap, Some(1.0));
        assert_eq!(set.mat_cap_tex.as_ref().unwrap().texture, Some(TextureRef("mc.png".into())));
        assert_eq!(set.mat_cap_blend_mask, Some(TexEnv::new("mcmask.png")));
        assert_eq!(set.use_mat_cap_2nd, Some(1.0));
        assert_eq!(
            set.mat_cap_2nd_tex.as_ref().unwrap().texture,
            Some(TextureRef("ring.png".into()))
        );
        assert_eq!(set.mat_cap_2nd_perspective, Some(0.0));
    }

    #[test]
    fn rim_light() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::float("_RimLight", 1.0));
        m.set_property(Property::float("_RimLight_Power", 0.5));
        m.set_property(Property::color("_RimLightColor", Color::rgba(1.0, 0.5, 0.0, 1.0)));
        m.set_property(Property::float("_RimLight_InsideMask", 0.5));
        m.set_property(Property::float("_LightDirection_MaskOn", 1.0));
        m.set_property(Property::float("_Tweak_LightDirection_MaskLevel", 0.3));
        m.set_property(Property::float("_RimLight_FeatherOff", 1.0));
        m.set_property(Property::float("_Add_Antipodean_RimLight", 1.0));
        let set = run(&m);

        assert!(approx(set.rim_fresnel_power.unwrap(), 2f32.powf(1.5)));
        assert_eq!(set.rim_color, Some(Color::rgba(1.0, 0.5, 0.0, 1.0)));
        // 0.5 + 0.5 - 0.25
        assert!(approx(set.rim_border.unwrap(), 0.75));
        assert_eq!(set.rim_blur, Some(0.0));
        assert!(approx(set.rim_indir_border.unwrap(), 0.875));
        assert!(approx(set.rim_indir_blur.unwrap(), 0.25));
        // Antipodean color missing on the source.
        assert_eq!(set.rim_indir_color, Some(Color::BLACK));
        assert_eq!(set.rim_dir_range, Some(0.0));
    }

    #[test]
    fn rim_mask_level_dims_color() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::color("_RimLightColor", Color::rgba(1.0, 1.0, 1.0, 1.0)));
        m.set_property(Property::float("_Tweak_RimLightMaskLevel", -0.5));
        let set = run(&m);
        let expected = 0.5f32.powf(0.45);
        assert!(approx(set.rim_color.unwrap().r(), expected));
        assert_eq!(set.rim_fresnel_power, Some(1.0));
    }

    #[test]
    fn emission_animation() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::color("_Emissive_Color", Color::rgba(0.0, 0.0, 0.0, 1.0)));
        m.set_property(Property::float("_Base_Speed", 2.0));
        m.set_property(Property::float("_Scroll_EmissiveU", 0.5));
        m.set_property(Property::float("_Rotate_EmissiveUV", 1.0));
        assert_eq!(run(&m).use_emission, Some(0.0));
        assert_eq!(run(&m).emission_map_scroll_rotate, None);

        m.enable_keyword("_EMISSIVE_ANIMATION");
        let v = run(&m).emission_map_scroll_rotate.unwrap();
        assert_eq!(v.x, -1.0);
        assert_eq!(v.y, 0.0);
        assert!(approx(v.w, -2.0 * PI));
    }

    #[test]
    fn outline_slots() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.set_property(Property::float("_Outline_Width", 2.0));
        m.set_property(Property::texture("_MainTex", TexEnv::new("body.png")));
        m.set_property(Property::float("_Is_BlendBaseColor", 1.0));
        m.set_property(Property::float("_Is_BakedNormal", 1.0));
        m.set_property(Property::texture("_BakedNormal", TexEnv::new("baked.png")));
        let set = run(&m);
        assert!(approx(set.outline_width.unwrap(), 0.2));
        assert_eq!(set.outline_fix_width, Some(0.0));
        assert_eq!(set.outline_tex, Some(TexEnv::new("body.png")));
        assert_eq!(set.outline_vector_tex, Some(TexEnv::new("baked.png")));

        m.shader = Some("UnityChanToonShader/NoOutline/ToonColor_DoubleShadeWithFeather".into());
        assert_eq!(run(&m).outline_width, None);
    }

    #[test]
    fn stencil_ops() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather_StencilMask");
        m.set_property(Property::float("_StencilNo", 3.0));
        let set = run(&m);
        assert_eq!(set.stencil_ref, Some(3.0));
        assert_eq!(set.outline_stencil_ref, Some(3.0));
        assert_eq!(set.stencil_comp, Some(COMPARE_ALWAYS));
        assert_eq!(set.stencil_pass, Some(STENCIL_REPLACE));
        assert_eq!(set.outline_stencil_fail, Some(STENCIL_REPLACE));

        m.shader = Some("UnityChanToonShader/Toon_DoubleShadeWithFeather_StencilOut".into());
        let set = run(&m);
        assert_eq!(set.stencil_comp, Some(COMPARE_NOT_EQUAL));
        assert_eq!(set.outline_stencil_pass, Some(STENCIL_KEEP));
    }

    #[test]
    fn built_in_light_direction_and_queue() {
        let mut m = uts("UnityChanToonShader/Toon_DoubleShadeWithFeather");
        m.render_queue = Some(2450);
        m.set_property(Property::float("_Is_BLD", 1.0));
        m.set_property(Property::float("_Offset_X_Axis_BLD", 0.5));
        m.set_property(Property::float("_Inverse_Z_Axis_BLD", 1.0));
        m.set_property(Property::float("_Is_LightColor_Base", 0.0));
        let set = run(&m);
        assert_eq!(
            set.light_direction_override,
            Some(Vec4::new(500.0, 0.0, -100.0, 1.0))
        );
        assert_eq!(set.render_queue, 2450);
        assert_eq!(set.as_unlit, Some(1.0));
        assert_eq!(set.light_min_limit, Some(0.05));
    }
}
