use std::path::PathBuf;

use anyhow::anyhow;

use crate::context::store::Context;
use crate::foundation::error::{ScriptError, ScriptResult};
use crate::tool::{Geometry, ImageTool, Offset};

/// Settings for [`render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeOpts {
    /// Image stamped at every coordinate.
    pub foreground: String,
    /// Starting image, used when the script has no `miff` line.
    pub background: String,
    /// Destination of the final composite.
    pub out: PathBuf,
    /// Size the foreground is scaled to, if any.
    pub size: Option<Geometry>,
    /// Axis feeding the horizontal offset.
    pub x_axis: String,
    /// Axis feeding the vertical offset.
    pub y_axis: String,
}

impl Default for ComposeOpts {
    fn default() -> Self {
        Self {
            foreground: "fg".to_string(),
            background: "bg".to_string(),
            out: PathBuf::from("output.png"),
            size: None,
            x_axis: "x".to_string(),
            y_axis: "y".to_string(),
        }
    }
}

impl ComposeOpts {
    /// Defaults overridden by the script variables `foreground`, `background`, `output` and
    /// `size` when they are set.
    pub fn from_vars<I>(ctx: &Context<I>) -> ScriptResult<Self> {
        let mut opts = Self::default();
        if let Ok(v) = ctx.get_var("foreground") {
            opts.foreground = v.to_string();
        }
        if let Ok(v) = ctx.get_var("background") {
            opts.background = v.to_string();
        }
        if let Ok(v) = ctx.get_var("output") {
            opts.out = PathBuf::from(v);
        }
        if let Ok(v) = ctx.get_var("size") {
            let size = v
                .parse::<Geometry>()
                .map_err(|e| ScriptError::Other(anyhow!("variable 'size': {e}")))?;
            opts.size = Some(size);
        }
        Ok(opts)
    }
}

/// Summary of a [`render`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// Number of composite calls made.
    pub composites: u64,
}

/// Stamp the foreground over the accumulating background at every coordinate, then write the
/// result to `opts.out`.
///
/// The background is the context's initial image when present, otherwise the image named
/// `opts.background`. Axes other than `x_axis`/`y_axis` only repeat the stamp; a missing axis
/// contributes an offset of 0.
#[tracing::instrument(skip_all, fields(out = %opts.out.display()))]
pub fn render<T: ImageTool>(
    ctx: &Context<T::Image>,
    tool: &T,
    opts: &ComposeOpts,
) -> ScriptResult<ComposeStats> {
    let foreground = ctx.get_img(&opts.foreground)?;
    let mut background = match ctx.initial_image() {
        Some(img) => img.clone(),
        None => ctx.get_img(&opts.background)?.clone(),
    };

    let mut stats = ComposeStats::default();
    for coord in ctx.coordinates() {
        let offset = Offset::new(
            coord.get(&opts.x_axis).unwrap_or(0),
            coord.get(&opts.y_axis).unwrap_or(0),
        );
        tracing::debug!(step = stats.composites, x = offset.x, y = offset.y, "composite");
        background = tool.composite(foreground, &background, offset, opts.size)?;
        stats.composites += 1;
    }

    tool.write(&background, &opts.out)?;
    tracing::info!(composites = stats.composites, "wrote {}", opts.out.display());
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/driver.rs"]
mod tests;
