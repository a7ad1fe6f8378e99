//! Reconciling the two shadow-position (AO) textures into the single mask lilToon takes.

use std::path::PathBuf;

use toon_xml::{TexEnv, TextureRef};

#[derive(Debug, Clone, PartialEq)]
pub enum AoDecision {
    /// Neither source carries a texture; the mask slot stays untouched.
    Unset,
    PassThrough(TextureRef),
    /// Two different textures; only a composite of both can represent them.
    Ambiguous {
        first: TextureRef,
        second: TextureRef,
    },
}

pub fn reconcile_ao(first: Option<&TexEnv>, second: Option<&TexEnv>) -> AoDecision {
    let first = first.and_then(|t| t.texture.clone());
    let second = second.and_then(|t| t.texture.clone());

    match (first, second) {
        // Leaves `_ShadowBorderMask` as it was rather than clearing it.
        (None, None) => AoDecision::Unset,
        (Some(tex), None) | (None, Some(tex)) => AoDecision::PassThrough(tex),
        (Some(first), Some(second)) if first == second => AoDecision::PassThrough(first),
        (Some(first), Some(second)) => AoDecision::Ambiguous { first, second },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BakeError {
    #[error("could not read texture {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("texture {} is empty", .0.display())]
    Empty(PathBuf),
    #[error("baked mask {} would overwrite one of its inputs", .0.display())]
    Overwrite(PathBuf),
    #[error("could not write texture {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Packs the red channel of two masks into one texture.
pub trait TextureBaker {
    fn bake_composite(
        &mut self,
        first: &TextureRef,
        second: &TextureRef,
    ) -> Result<TextureRef, BakeError>;
}
