//! CPU stand-in for the host's texture packing pass.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use toon_xml::TextureRef;
use tracing::info;

use crate::ao::{BakeError, TextureBaker};

/// Writes `<first-stem>_lilAO.png` next to the first texture: R from the first mask,
/// G and B from the second, resized to the first's dimensions.
pub struct PngPacker {
    asset_root: PathBuf,
}

impl PngPacker {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }

    fn load(&self, texture: &TextureRef) -> Result<RgbaImage, BakeError> {
        let path = self.asset_root.join(texture.path());
        let image = image::open(&path)
            .map_err(|source| BakeError::Read {
                path: path.clone(),
                source,
            })?
            .to_rgba8();
        if image.width() == 0 || image.height() == 0 {
            return Err(BakeError::Empty(path));
        }
        Ok(image)
    }
}

pub fn baked_name(first: &TextureRef) -> TextureRef {
    let path = Path::new(first.path());
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("texture");
    let name = path.with_file_name(format!("{stem}_lilAO.png"));
    TextureRef(name.to_string_lossy().into_owned())
}

impl TextureBaker for PngPacker {
    fn bake_composite(
        &mut self,
        first: &TextureRef,
        second: &TextureRef,
    ) -> Result<TextureRef, BakeError> {
        let out = baked_name(first);
        let path = self.asset_root.join(out.path());
        if out == *second {
            return Err(BakeError::Overwrite(path));
        }

        let a = self.load(first)?;
        let mut b = self.load(second)?;
        let (width, height) = a.dimensions();
        if b.dimensions() != (width, height) {
            b = imageops::resize(&b, width, height, FilterType::Triangle);
        }

        let packed = RgbaImage::from_fn(width, height, |x, y| {
            let r = a.get_pixel(x, y)[0];
            let g = b.get_pixel(x, y)[0];
            Rgba([r, g, g, 255])
        });

        packed
            .save(&path)
            .map_err(|source| BakeError::Write { path, source })?;

        info!(texture = %out, "AO mask exported");
        Ok(out)
    }
}
