//! What the lilToon shaders expose, for writing only properties they understand.

use phf::{phf_map, phf_set};
use toon_xml::PropertyKind;

pub static LILTOON_PROPERTIES: phf::Map<&'static str, PropertyKind> = phf_map! {
    // Main
    "_MainTex" => PropertyKind::Texture,
    "_MainColor" => PropertyKind::Color,
    "_Cutoff" => PropertyKind::Float,
    "_Cull" => PropertyKind::Float,

    // Alpha mask
    "_AlphaMaskMode" => PropertyKind::Float,
    "_AlphaMask" => PropertyKind::Texture,
    "_AlphaMaskScale" => PropertyKind::Float,
    "_AlphaMaskValue" => PropertyKind::Float,

    // Lighting
    "_LightMinLimit" => PropertyKind::Float,
    "_AsUnlit" => PropertyKind::Float,
    "_LightDirectionOverride" => PropertyKind::Vector,

    // Shadow
    "_UseShadow" => PropertyKind::Float,
    "_ShadowReceive" => PropertyKind::Float,
    "_Shadow2ndReceive" => PropertyKind::Float,
    "_Shadow3rdReceive" => PropertyKind::Float,
    "_ShadowStrength" => PropertyKind::Float,
    "_ShadowStrengthMask" => PropertyKind::Texture,
    "_ShadowAOShift" => PropertyKind::Vector,
    "_ShadowPostAO" => PropertyKind::Float,
    "_ShadowColor" => PropertyKind::Color,
    "_ShadowColorTex" => PropertyKind::Texture,
    "_ShadowNormalStrength" => PropertyKind::Float,
    "_ShadowBorder" => PropertyKind::Float,
    "_ShadowBlur" => PropertyKind::Float,
    "_ShadowBlurMask" => PropertyKind::Texture,
    "_Shadow2ndColor" => PropertyKind::Color,
    "_Shadow2ndColorTex" => PropertyKind::Texture,
    "_Shadow2ndNormalStrength" => PropertyKind::Float,
    "_Shadow2ndBorder" => PropertyKind::Float,
    "_Shadow2ndBlur" => PropertyKind::Float,
    "_ShadowMainStrength" => PropertyKind::Float,
    "_ShadowEnvStrength" => PropertyKind::Float,
    "_ShadowBorderColor" => PropertyKind::Color,
    "_ShadowBorderRange" => PropertyKind::Float,
    "_ShadowBorderMask" => PropertyKind::Texture,

    // Normal map
    "_UseBumpMap" => PropertyKind::Float,
    "_BumpMap" => PropertyKind::Texture,
    "_BumpScale" => PropertyKind::Float,
    "_UseBump2ndMap" => PropertyKind::Float,
    "_Bump2ndMap" => PropertyKind::Texture,
    "_Bump2ndScale" => PropertyKind::Float,
    "_Bump2ndMask" => PropertyKind::Texture,

    // Reflection
    "_UseReflection" => PropertyKind::Float,
    "_Smoothness" => PropertyKind::Float,
    "_SmoothnessTex" => PropertyKind::Texture,
    "_Metallic" => PropertyKind::Float,
    "_MetallicGlossMap" => PropertyKind::Texture,
    "_Reflectance" => PropertyKind::Float,
    "_ApplySpecular" => PropertyKind::Float,
    "_ApplySpecularFA" => PropertyKind::Float,
    "_SpecularToon" => PropertyKind::Float,
    "_SpecularNormalStrength" => PropertyKind::Float,
    "_SpecularBorder" => PropertyKind::Float,
    "_SpecularBlur" => PropertyKind::Float,
    "_ApplyReflection" => PropertyKind::Float,
    "_ReflectionNormalStrength" => PropertyKind::Float,
    "_ReflectionColor" => PropertyKind::Color,
    "_ReflectionColorTex" => PropertyKind::Texture,
    "_ReflectionApplyTransparency" => PropertyKind::Float,

    // MatCap
    "_UseMatCap" => PropertyKind::Float,
    "_MatCapColor" => PropertyKind::Color,
    "_MatCapTex" => PropertyKind::Texture,
    "_MatCapBlendUV1" => PropertyKind::Vector,
    "_MatCapZRotCancel" => PropertyKind::Float,
    "_MatCapPerspective" => PropertyKind::Float,
    "_MatCapVRParallaxStrength" => PropertyKind::Float,
    "_MatCapBlend" => PropertyKind::Float,
    "_MatCapBlendMask" => PropertyKind::Texture,
    "_MatCapEnableLighting" => PropertyKind::Float,
    "_MatCapShadowMask" => PropertyKind::Float,
    "_MatCapBackfaceMask" => PropertyKind::Float,
    "_MatCapLod" => PropertyKind::Float,
    "_MatCapBlendMode" => PropertyKind::Float,
    "_MatCapApplyTransparency" => PropertyKind::Float,
    "_MatCapNormalStrength" => PropertyKind::Float,
    "_MatCapCustomNormal" => PropertyKind::Float,
    "_MatCapBumpMap" => PropertyKind::Texture,
    "_MatCapBumpScale" => PropertyKind::Float,

    // MatCap 2nd
    "_UseMatCap2nd" => PropertyKind::Float,
    "_MatCap2ndColor" => PropertyKind::Color,
    "_MatCap2ndTex" => PropertyKind::Texture,
    "_MatCap2ndBlendUV1" => PropertyKind::Vector,
    "_MatCap2ndZRotCancel" => PropertyKind::Float,
    "_MatCap2ndPerspective" => PropertyKind::Float,
    "_MatCap2ndVRParallaxStrength" => PropertyKind::Float,
    "_MatCap2ndBlend" => PropertyKind::Float,
    "_MatCap2ndBlendMask" => PropertyKind::Texture,
    "_MatCap2ndEnableLighting" => PropertyKind::Float,
    "_MatCap2ndShadowMask" => PropertyKind::Float,
    "_MatCap2ndBackfaceMask" => PropertyKind::Float,
    "_MatCap2ndLod" => PropertyKind::Float,
    "_MatCap2ndBlendMode" => PropertyKind::Float,
    "_MatCap2ndApplyTransparency" => PropertyKind::Float,
    "_MatCap2ndNormalStrength" => PropertyKind::Float,
    "_MatCap2ndCustomNormal" => PropertyKind::Float,
    "_MatCap2ndBumpMap" => PropertyKind::Texture,
    "_MatCap2ndBumpScale" => PropertyKind::Float,

    // Rim light
    "_UseRim" => PropertyKind::Float,
    "_RimColor" => PropertyKind::Color,
    "_RimColorTex" => PropertyKind::Texture,
    "_RimNormalStrength" => PropertyKind::Float,
    "_RimBorder" => PropertyKind::Float,
    "_RimBlur" => PropertyKind::Float,
    "_RimFresnelPower" => PropertyKind::Float,
    "_RimEnableLighting" => PropertyKind::Float,
    "_RimShadowMask" => PropertyKind::Float,
    "_RimBackfaceMask" => PropertyKind::Float,
    "_RimApplyTransparency" => PropertyKind::Float,
    "_RimDirStrength" => PropertyKind::Float,
    "_RimDirRange" => PropertyKind::Float,
    "_RimIndirRange" => PropertyKind::Float,
    "_RimIndirColor" => PropertyKind::Color,
    "_RimIndirBorder" => PropertyKind::Float,
    "_RimIndirBlur" => PropertyKind::Float,

    // Emission
    "_UseEmission" => PropertyKind::Float,
    "_EmissionColor" => PropertyKind::Color,
    "_EmissionMap" => PropertyKind::Texture,
    "_EmissionMap_ScrollRotate" => PropertyKind::Vector,
    "_EmissionMap_UVMode" => PropertyKind::Float,
    "_EmissionBlend" => PropertyKind::Float,
    "_EmissionBlendMask" => PropertyKind::Texture,
    "_EmissionBlendMask_ScrollRotate" => PropertyKind::Vector,
    "_EmissionBlink" => PropertyKind::Vector,
    "_EmissionUseGrad" => PropertyKind::Float,
    "_EmissionGradTex" => PropertyKind::Texture,
    "_EmissionGradSpeed" => PropertyKind::Float,
    "_EmissionParallaxDepth" => PropertyKind::Float,
    "_EmissionFluorescence" => PropertyKind::Float,

    // Outline
    "_OutlineColor" => PropertyKind::Color,
    "_OutlineTex" => PropertyKind::Texture,
    "_OutlineTex_ScrollRotate" => PropertyKind::Vector,
    "_OutlineTexHSVG" => PropertyKind::Vector,
    "_OutlineWidth" => PropertyKind::Float,
    "_OutlineWidthMask" => PropertyKind::Texture,
    "_OutlineFixWidth" => PropertyKind::Float,
    "_OutlineVertexR2Width" => PropertyKind::Float,
    "_OutlineVectorTex" => PropertyKind::Texture,
    "_OutlineEnableLighting" => PropertyKind::Float,

    // Stencil
    "_StencilRef" => PropertyKind::Float,
    "_StencilComp" => PropertyKind::Float,
    "_StencilPass" => PropertyKind::Float,
    "_StencilFail" => PropertyKind::Float,
    "_OutlineStencilRef" => PropertyKind::Float,
    "_OutlineStencilComp" => PropertyKind::Float,
    "_OutlineStencilPass" => PropertyKind::Float,
    "_OutlineStencilFail" => PropertyKind::Float,

    // Blending
    "_SrcBlend" => PropertyKind::Float,
    "_DstBlend" => PropertyKind::Float,
    "_SrcBlendAlpha" => PropertyKind::Float,
    "_DstBlendAlpha" => PropertyKind::Float,
    "_BlendOp" => PropertyKind::Float,
    "_BlendOpAlpha" => PropertyKind::Float,
    "_SrcBlendFA" => PropertyKind::Float,
    "_DstBlendFA" => PropertyKind::Float,
    "_SrcBlendAlphaFA" => PropertyKind::Float,
    "_DstBlendAlphaFA" => PropertyKind::Float,
    "_BlendOpFA" => PropertyKind::Float,
    "_BlendOpAlphaFA" => PropertyKind::Float,
    "_AlphaToMask" => PropertyKind::Float,
};

/// Shader variants lilToon installs. There is no cutout-and-transparent variant.
pub static LILTOON_SHADERS: phf::Set<&'static str> = phf_set! {
    "lilToon",
    "Hidden/lilToonCutout",
    "Hidden/lilToonTransparent",
    "Hidden/lilToonOutline",
    "Hidden/lilToonCutoutOutline",
    "Hidden/lilToonTransparentOutline",
};
