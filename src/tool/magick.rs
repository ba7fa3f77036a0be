use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::foundation::error::{ScriptError, ScriptResult};
use crate::tool::{Geometry, ImageTool, Offset, ensure_parent_dir};

/// Image as seen by `magick`: a name on the command line plus bytes piped to stdin.
///
/// File-backed images carry no bytes; intermediate results are named `<format>:-` and hold the
/// encoded output of the previous step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MagickImage {
    name: String,
    content: Arc<Vec<u8>>,
}

impl MagickImage {
    /// Image that `magick` reads from `locator` itself.
    pub fn from_file(locator: impl Into<String>) -> Self {
        Self {
            name: locator.into(),
            content: Arc::new(Vec::new()),
        }
    }

    /// In-memory image encoded as `format` (e.g. `miff`), read by `magick` from stdin.
    pub fn from_buffer(format: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: format!("{format}:-"),
            content: Arc::new(bytes),
        }
    }

    /// Name passed on the `magick` command line.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes piped to stdin when this image is an input.
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// [`ImageTool`] that shells out to ImageMagick for every step.
#[derive(Clone, Debug)]
pub struct MagickTool {
    program: PathBuf,
    intermediate_format: String,
}

impl Default for MagickTool {
    fn default() -> Self {
        Self {
            program: PathBuf::from("magick"),
            intermediate_format: "miff".to_string(),
        }
    }
}

impl MagickTool {
    /// Tool invoking `magick` from PATH.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Executable this tool spawns.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Whether the configured executable runs and reports success for `-version`.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn run(&self, args: &[String], inputs: &[&MagickImage]) -> ScriptResult<Vec<u8>> {
        tracing::debug!(program = %self.program.display(), ?args, "spawning magick");

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ScriptError::tool(format!(
                    "failed to spawn '{}' (is ImageMagick installed and on PATH?): {e}",
                    self.program.display()
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ScriptError::tool("failed to open magick stdin (unexpected)"))?;

        // Feed stdin from a helper thread so a full stdout pipe cannot stall the child.
        let payload: Vec<Arc<Vec<u8>>> = inputs
            .iter()
            .filter(|img| !img.content.is_empty())
            .map(|img| Arc::clone(&img.content))
            .collect();
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            for bytes in &payload {
                stdin.write_all(bytes)?;
            }
            Ok(())
        });

        let output = child
            .wait_with_output()
            .map_err(|e| ScriptError::tool(format!("failed to wait for magick: {e}")))?;
        let written = writer
            .join()
            .map_err(|_| ScriptError::tool("magick stdin writer panicked"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScriptError::tool(format!(
                "magick exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        written.map_err(|e| ScriptError::tool(format!("failed to write magick stdin: {e}")))?;

        Ok(output.stdout)
    }
}

/// `-geometry` value: optional `WxH` followed by signed offsets, e.g. `60x60+10-4`.
pub fn geometry_arg(offset: Offset, size: Option<Geometry>) -> String {
    match size {
        Some(g) => format!("{}x{}{:+}{:+}", g.width, g.height, offset.x, offset.y),
        None => format!("{:+}{:+}", offset.x, offset.y),
    }
}

/// Arguments for `magick composite`, foreground first then background.
pub fn composite_args(
    foreground: &MagickImage,
    background: &MagickImage,
    offset: Offset,
    size: Option<Geometry>,
    output_format: &str,
) -> Vec<String> {
    vec![
        "composite".to_string(),
        "-geometry".to_string(),
        geometry_arg(offset, size),
        foreground.name.clone(),
        background.name.clone(),
        format!("{output_format}:-"),
    ]
}

impl ImageTool for MagickTool {
    type Image = MagickImage;

    fn load(&self, locator: &str) -> ScriptResult<MagickImage> {
        Ok(MagickImage::from_file(locator))
    }

    fn composite(
        &self,
        foreground: &MagickImage,
        background: &MagickImage,
        offset: Offset,
        size: Option<Geometry>,
    ) -> ScriptResult<MagickImage> {
        let args = composite_args(
            foreground,
            background,
            offset,
            size,
            &self.intermediate_format,
        );
        let bytes = self.run(&args, &[foreground, background])?;
        Ok(MagickImage::from_buffer(&self.intermediate_format, bytes))
    }

    fn write(&self, image: &MagickImage, dest: &Path) -> ScriptResult<()> {
        ensure_parent_dir(dest)?;
        let args = vec![image.name.clone(), dest.to_string_lossy().into_owned()];
        self.run(&args, &[image])?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tool/magick.rs"]
mod tests;
