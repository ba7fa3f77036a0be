//! tilescript turns small line-oriented scripts into image composites.
//!
//! A script declares variables, named images, an optional starting image and one or more
//! numeric axes:
//!
//! ```text
//! var output="out.png"
//! img fg tile.png
//! img bg canvas.png
//! range x 0 600 60
//! range y 0 400 40
//! ```
//!
//! # Pipeline overview
//!
//! 1. **Read**: bytes are pulled in chunks by [`ScriptReader`] and split into [`Record`]s by the
//!    incremental [`Tokenizer`]; lines may straddle chunk boundaries.
//! 2. **Interpret**: each record is dispatched through [`CommandKind`] to its handler, which
//!    updates a mutable [`ContextFactory`].
//! 3. **Build**: [`ContextFactory::build`] loads images through an [`ImageTool`] and freezes the
//!    result into an immutable [`Context`].
//! 4. **Iterate**: [`Context::coordinates`] walks the Cartesian product of the axes lazily, first
//!    declared axis outermost.
//! 5. **Compose**: [`render`] stamps the foreground at every coordinate and writes the result.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod context;
mod foundation;
mod script;

/// Image tools (ImageMagick and in-process raster backends).
pub mod tool;

pub use compose::driver::{ComposeOpts, ComposeStats, render};
pub use context::coords::{Coordinate, Coordinates};
pub use context::store::Context;
pub use foundation::error::{ScriptError, ScriptResult};
pub use foundation::range::{AxisRange, RangeIter, RangeSpec};
pub use script::commands::{CommandKind, FactoryCommand};
pub use script::factory::{ContextFactory, Diagnostic, DiagnosticKind, ScriptPlan};
pub use script::reader::{DEFAULT_CHUNK_SIZE, ScriptReader};
pub use script::tokenizer::{Record, Tokenizer, tokenize};
pub use script::{parse_path, parse_reader, parse_reader_with_chunk_size, parse_str};
pub use tool::magick::{MagickImage, MagickTool};
pub use tool::raster::RasterTool;
pub use tool::{Geometry, ImageTool, Offset};
