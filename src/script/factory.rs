use std::collections::BTreeMap;

use crate::context::coords::Coordinates;
use crate::context::store::Context;
use crate::foundation::error::ScriptResult;
use crate::foundation::range::AxisRange;
use crate::script::commands::CommandKind;
use crate::script::tokenizer::Record;
use crate::tool::ImageTool;

/// Non-fatal problem found while interpreting a script.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticKind {
    /// Command name not present in the registry.
    #[error("unknown command '{command}'")]
    UnknownCommand {
        /// Command name as written.
        command: String,
    },
    /// Known command whose arguments did not match its pattern; the line was skipped.
    #[error("'{command}' arguments do not match the expected pattern: {args}")]
    PatternMismatch {
        /// Command name.
        command: &'static str,
        /// Raw argument text.
        args: String,
    },
}

/// A [`DiagnosticKind`] with the line it was raised on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based script line.
    pub line: usize,
    /// What went wrong.
    pub kind: DiagnosticKind,
}

/// Mutable build-time configuration filled in by script commands.
///
/// Turned into an immutable [`Context`] by [`ContextFactory::build`].
#[derive(Clone, Debug, Default)]
pub struct ContextFactory {
    variables: BTreeMap<String, String>,
    axes: Vec<AxisRange>,
    images: BTreeMap<String, String>,
    initial: Option<String>,
    diagnostics: Vec<Diagnostic>,
    line: usize,
}

impl ContextFactory {
    /// Empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret one tokenized record.
    ///
    /// Unknown commands and pattern mismatches are recorded as diagnostics; handler failures
    /// are returned with the record's line attached.
    pub fn run(&mut self, record: &Record) -> ScriptResult<()> {
        self.line = record.line;
        let Some(kind) = CommandKind::parse(&record.command) else {
            self.note(DiagnosticKind::UnknownCommand {
                command: record.command.clone(),
            });
            return Ok(());
        };

        tracing::debug!(
            line = record.line,
            command = kind.name(),
            args = %record.args,
            "script command"
        );
        kind.handler()
            .init(self, &record.args)
            .map_err(|e| e.at_line(record.line))
    }

    /// Assign `name`, replacing any previous value.
    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Register an axis. Re-declaring an axis keeps its original nesting position.
    pub fn set_range(&mut self, range: AxisRange) -> &mut Self {
        match self.axes.iter_mut().find(|a| a.axis == range.axis) {
            Some(slot) => slot.spec = range.spec,
            None => self.axes.push(range),
        }
        self
    }

    /// Bind image `name` to `locator`, replacing any previous binding.
    pub fn set_img(&mut self, name: impl Into<String>, locator: impl Into<String>) -> &mut Self {
        self.images.insert(name.into(), locator.into());
        self
    }

    /// Set the initial image locator; an empty locator clears it.
    pub fn set_initial(&mut self, locator: impl Into<String>) -> &mut Self {
        let locator = locator.into();
        self.initial = if locator.is_empty() {
            None
        } else {
            Some(locator)
        };
        self
    }

    /// Record a non-fatal diagnostic against the line currently being run.
    pub fn note(&mut self, kind: DiagnosticKind) {
        tracing::warn!(line = self.line, "{kind}");
        self.diagnostics.push(Diagnostic {
            line: self.line,
            kind,
        });
    }

    /// Diagnostics recorded so far, in script order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Variables assigned so far.
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Axes in registration order.
    pub fn axes(&self) -> &[AxisRange] {
        &self.axes
    }

    /// Image locators by name.
    pub fn images(&self) -> &BTreeMap<String, String> {
        &self.images
    }

    /// Initial image locator, if set.
    pub fn initial(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    /// Load every referenced image through `tool` and freeze the configuration.
    ///
    /// The factory is left untouched and may be built again.
    #[tracing::instrument(skip_all, fields(images = self.images.len(), axes = self.axes.len()))]
    pub fn build<T: ImageTool>(&self, tool: &T) -> ScriptResult<Context<T::Image>> {
        let mut images = BTreeMap::new();
        for (name, locator) in &self.images {
            tracing::debug!(%name, %locator, "loading image");
            images.insert(name.clone(), tool.load(locator)?);
        }
        let initial = match self.initial.as_deref() {
            Some(locator) => Some(tool.load(locator)?),
            None => None,
        };

        let ctx = Context::new(self.variables.clone(), images, initial, self.axes.clone());
        tracing::info!(coordinates = ?ctx.coordinate_count(), "context built");
        Ok(ctx)
    }

    /// Serializable snapshot of the configuration.
    ///
    /// Coordinates are not materialized; they are walked lazily when the plan is serialized.
    pub fn plan(&self) -> ScriptPlan {
        ScriptPlan {
            variables: self.variables.clone(),
            images: self.images.clone(),
            initial: self.initial.clone(),
            axes: self.axes.clone(),
        }
    }
}

/// Image-free view of a parsed script, as printed by `tilescript plan`.
///
/// Serializes its fields plus a `coordinates` sequence streamed from [`ScriptPlan::coordinates`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptPlan {
    /// Variable table.
    pub variables: BTreeMap<String, String>,
    /// Image locators by name.
    pub images: BTreeMap<String, String>,
    /// Initial image locator.
    pub initial: Option<String>,
    /// Axes in nesting order, outermost first.
    pub axes: Vec<AxisRange>,
}

impl ScriptPlan {
    /// Lazy pass over every coordinate, in iteration order.
    pub fn coordinates(&self) -> Coordinates<'_> {
        Coordinates::new(&self.axes)
    }
}

struct CoordinateSeq<'a>(&'a [AxisRange]);

impl serde::Serialize for CoordinateSeq<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(Coordinates::new(self.0))
    }
}

impl serde::Serialize for ScriptPlan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut plan = serializer.serialize_struct("ScriptPlan", 5)?;
        plan.serialize_field("variables", &self.variables)?;
        plan.serialize_field("images", &self.images)?;
        plan.serialize_field("initial", &self.initial)?;
        plan.serialize_field("axes", &self.axes)?;
        plan.serialize_field("coordinates", &CoordinateSeq(&self.axes))?;
        plan.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/factory.rs"]
mod tests;
