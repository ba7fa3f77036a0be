//! Image tools: the collaborators that load, composite and write images.
//!
//! The script engine never looks inside an image; it only passes handles between these calls.

/// `magick`-based tool (ImageMagick on PATH).
pub mod magick;
/// In-process tool built on the `image` crate.
pub mod raster;

use std::path::Path;

use crate::foundation::error::ScriptResult;

/// Placement of the foreground image, in pixels from the top-left of the background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Horizontal offset.
    pub x: i64,
    /// Vertical offset.
    pub y: i64,
}

impl Offset {
    /// Offset at `(x, y)`.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Size the foreground is scaled to before compositing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl std::str::FromStr for Geometry {
    type Err = String;

    /// Parse `WIDTHxHEIGHT`, e.g. `60x60`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("invalid dimension '{v}' in '{s}'"))
        };
        Ok(Self {
            width: parse(w)?,
            height: parse(h)?,
        })
    }
}

/// Contract between the composition driver and an image backend.
pub trait ImageTool {
    /// Opaque image handle.
    type Image: Clone;

    /// Resolve a locator (usually a path) into an image.
    fn load(&self, locator: &str) -> ScriptResult<Self::Image>;

    /// Draw `foreground` over `background` at `offset`, optionally scaled to `size`.
    fn composite(
        &self,
        foreground: &Self::Image,
        background: &Self::Image,
        offset: Offset,
        size: Option<Geometry>,
    ) -> ScriptResult<Self::Image>;

    /// Write `image` to `dest`; the format follows the extension.
    fn write(&self, image: &Self::Image, dest: &Path) -> ScriptResult<()>;
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> ScriptResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/tool/geometry.rs"]
mod tests;
