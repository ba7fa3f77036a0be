use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::error::ScriptResult;
use crate::tool::{Geometry, ImageTool, Offset, ensure_parent_dir};

/// [`ImageTool`] that decodes, composites and encodes in-process.
///
/// Relative locators resolve against `root`.
#[derive(Clone, Debug)]
pub struct RasterTool {
    root: PathBuf,
}

impl Default for RasterTool {
    fn default() -> Self {
        Self::new(".")
    }
}

impl RasterTool {
    /// Tool resolving relative locators against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory relative locators resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageTool for RasterTool {
    type Image = Arc<RgbaImage>;

    fn load(&self, locator: &str) -> ScriptResult<Arc<RgbaImage>> {
        let path = self.root.join(locator);
        let img = image::open(&path)
            .with_context(|| format!("decode image '{}'", path.display()))?;
        Ok(Arc::new(img.to_rgba8()))
    }

    fn composite(
        &self,
        foreground: &Arc<RgbaImage>,
        background: &Arc<RgbaImage>,
        offset: Offset,
        size: Option<Geometry>,
    ) -> ScriptResult<Arc<RgbaImage>> {
        let mut out = RgbaImage::clone(background);
        match size {
            Some(g) if foreground.dimensions() != (g.width, g.height) => {
                let scaled = imageops::resize(
                    &**foreground,
                    g.width,
                    g.height,
                    FilterType::Triangle,
                );
                imageops::overlay(&mut out, &scaled, offset.x, offset.y);
            }
            _ => imageops::overlay(&mut out, &**foreground, offset.x, offset.y),
        }
        Ok(Arc::new(out))
    }

    fn write(&self, image: &Arc<RgbaImage>, dest: &Path) -> ScriptResult<()> {
        ensure_parent_dir(dest)?;
        image
            .save(dest)
            .with_context(|| format!("write image '{}'", dest.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tool/raster.rs"]
mod tests;
