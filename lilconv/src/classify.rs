//! Decides which source shader family a material comes from and which variant of it.

use toon_xml::PropertySource;
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SourceFamily {
    /// UnityChanToonShader 2.x
    Uts,
    /// UnityChanToonShader 3 ("Toon (Built-in)")
    Uts3,
    Unsupported,
}

impl SourceFamily {
    pub fn detect(material: &impl PropertySource) -> Self {
        if material.shader_name_contains("Toon (Built-in)")
            || ["_utsVersionX", "_utsVersionY", "_utsVersionZ"]
                .iter()
                .any(|p| material.has_property(p))
        {
            Self::Uts3
        } else if material.shader_name_contains("UnityChanToonShader")
            || material.has_property("_utsVersion")
        {
            Self::Uts
        } else {
            Self::Unsupported
        }
    }

    pub fn is_supported(self) -> bool {
        self != Self::Unsupported
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ClassificationFlags {
    pub cutout: bool,
    pub transparent: bool,
    pub outline: bool,
    pub angel_ring: bool,
    pub shading_grade_map: bool,
    pub stencil_mask: bool,
    pub stencil_out: bool,
}

pub fn classify(material: &impl PropertySource) -> (ClassificationFlags, SourceFamily) {
    let family = SourceFamily::detect(material);
    let uts3 = family == SourceFamily::Uts3;
    let orphaned = material.shader_name().is_none();
    let stencil_mode = if uts3 {
        material.float("_StencilMode")
    } else {
        None
    };

    // Without a shader name, a material carrying `_Tweak_transparency` was a
    // transparent variant and anything else was a clipping one.
    let flags = ClassificationFlags {
        cutout: material.shader_name_contains("_Clipping")
            || (orphaned && !material.has_property("_Tweak_transparency"))
            || material.is_keyword_enabled("_IS_CLIPPING_MODE")
            || material.is_keyword_enabled("_IS_TRANSCLIPPING_OFF"),
        transparent: material.shader_name_contains("_TransClipping")
            || material.shader_name_contains("_Transparent")
            || (orphaned && material.has_property("_Tweak_transparency"))
            || material.is_keyword_enabled("_IS_CLIPPING_TRANSMODE")
            || material.is_keyword_enabled("_IS_TRANSCLIPPING_ON"),
        outline: if uts3 {
            !material.is_keyword_enabled("_DISABLE_OUTLINE")
        } else {
            match material.shader_name() {
                Some(name) => !name.contains("NoOutline"),
                None => material.has_property("_Outline_Width"),
            }
        },
        angel_ring: material.shader_name_contains("AngelRing")
            || ((orphaned || uts3) && material.has_property("_AngelRing")),
        shading_grade_map: material.shader_name_contains("ShadingGradeMap")
            || material.is_keyword_enabled("_SHADINGGRADEMAP"),
        stencil_mask: material.shader_name_contains("StencilMask") || stencil_mode == Some(2.0),
        stencil_out: material.shader_name_contains("StencilOut") || stencil_mode == Some(1.0),
    };

    debug!(?family, ?flags, "classified material");

    (flags, family)
}
